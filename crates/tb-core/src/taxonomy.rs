//! Task codes, categories and the two classification tables.
//!
//! Classification is total: any character maps to a [`TaskCode`], unknown
//! characters land on [`TaskCode::Miscellaneous`], and every code belongs to
//! exactly one [`Category`] under either [`Taxonomy`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical task codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TaskCode {
    PlannedWork,
    UnplannedWork,
    Deployments,
    Meetings,
    Support,
    Maintenance,
    Miscellaneous,
}

impl TaskCode {
    /// All known codes in display order.
    pub const ALL: [Self; 7] = [
        Self::PlannedWork,
        Self::UnplannedWork,
        Self::Deployments,
        Self::Meetings,
        Self::Support,
        Self::Maintenance,
        Self::Miscellaneous,
    ];

    /// Classifies a single character. Matching is case-insensitive.
    pub fn from_char(c: char) -> Self {
        match c.to_ascii_uppercase() {
            'A' => Self::PlannedWork,
            'O' => Self::UnplannedWork,
            'D' => Self::Deployments,
            'M' => Self::Meetings,
            'S' => Self::Support,
            'W' => Self::Maintenance,
            _ => Self::Miscellaneous,
        }
    }

    /// The single-letter code as written in a timebook.
    pub const fn as_char(self) -> char {
        match self {
            Self::PlannedWork => 'A',
            Self::UnplannedWork => 'O',
            Self::Deployments => 'D',
            Self::Meetings => 'M',
            Self::Support => 'S',
            Self::Maintenance => 'W',
            Self::Miscellaneous => 'V',
        }
    }

    /// Human-readable task name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::PlannedWork => "Planned Work",
            Self::UnplannedWork => "Unplanned Work",
            Self::Deployments => "Deployments",
            Self::Meetings => "Meetings",
            Self::Support => "Support",
            Self::Maintenance => "Maintenance",
            Self::Miscellaneous => "Miscellaneous",
        }
    }
}

impl fmt::Display for TaskCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl Serialize for TaskCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Coarse grouping used for roll-up reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    PlannedWork,
    UnplannedWork,
    Deployments,
    Meetings,
    Support,
    Maintenance,
    Miscellaneous,
}

impl Category {
    pub const fn as_char(self) -> char {
        match self {
            Self::PlannedWork => 'A',
            Self::UnplannedWork => 'O',
            Self::Deployments => 'D',
            Self::Meetings => 'M',
            Self::Support => 'S',
            Self::Maintenance => 'W',
            Self::Miscellaneous => 'V',
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::PlannedWork => "Planned Work",
            Self::UnplannedWork => "Unplanned Work",
            Self::Deployments => "Deployments",
            Self::Meetings => "Meetings",
            Self::Support => "Support",
            Self::Maintenance => "Maintenance",
            Self::Miscellaneous => "Miscellaneous",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl Serialize for Category {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Which classification table to apply.
///
/// The choice only changes the category attached to a code; parsing and task
/// codes are identical under both.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Taxonomy {
    /// Every code is its own category.
    #[default]
    Standard,
    /// Deployments, support and maintenance roll up into Maintenance.
    Merged,
}

impl Taxonomy {
    /// Every known taxonomy.
    pub const ALL: [Self; 2] = [Self::Standard, Self::Merged];

    /// String representation for configuration and output.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Merged => "merged",
        }
    }

    /// Category for a task code under this table.
    pub const fn category(self, code: TaskCode) -> Category {
        match (self, code) {
            (_, TaskCode::PlannedWork) => Category::PlannedWork,
            (_, TaskCode::UnplannedWork) => Category::UnplannedWork,
            (_, TaskCode::Meetings) => Category::Meetings,
            (_, TaskCode::Maintenance) => Category::Maintenance,
            (_, TaskCode::Miscellaneous) => Category::Miscellaneous,
            (Self::Standard, TaskCode::Deployments) => Category::Deployments,
            (Self::Standard, TaskCode::Support) => Category::Support,
            (Self::Merged, TaskCode::Deployments | TaskCode::Support) => Category::Maintenance,
        }
    }

    /// Classifies a raw code character into its canonical code and category.
    pub fn classify(self, c: char) -> (TaskCode, Category) {
        let code = TaskCode::from_char(c);
        (code, self.category(code))
    }
}

impl fmt::Display for Taxonomy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Taxonomy {
    type Err = UnknownTaxonomy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(Self::Standard),
            "merged" => Ok(Self::Merged),
            _ => Err(UnknownTaxonomy(s.to_string())),
        }
    }
}

/// Error for unknown taxonomy names.
#[derive(Debug, Clone, Error)]
#[error("unknown taxonomy: {0} (expected \"standard\" or \"merged\")")]
pub struct UnknownTaxonomy(String);
