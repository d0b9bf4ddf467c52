//! Extraction of task entries and expectation declarations from single lines.
//!
//! Both extractors are best-effort: a line that does not have the expected
//! shape yields `None` and is simply not counted.
//!
//! ```text
//! - (A 9:00 - 10:30) Sprint planning        task entry
//! > - Planned work A: 120h                   expectation declaration
//! ```

use crate::duration::{self, ClockError};

const TASK_MARKER: &str = "- (";
const EXPECTATION_MARKER: &str = "> - ";

/// A task entry: code plus the raw start and end clock readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskLine<'a> {
    /// Uppercased first character of the task token.
    pub code: char,
    pub start: &'a str,
    pub end: &'a str,
}

impl TaskLine<'_> {
    /// Elapsed minutes between start and end.
    pub fn duration_minutes(&self) -> Result<u64, ClockError> {
        duration::elapsed_minutes(self.start, self.end)
    }
}

/// An expected-hours declaration for a task code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpectationLine {
    /// Uppercased character directly before the colon.
    pub code: char,
    pub expected_minutes: u64,
}

fn trim_blank(line: &str) -> &str {
    line.trim_matches([' ', '\t'])
}

/// Returns the trimmed line if it looks like a task entry (`- (` after
/// leading spaces and tabs).
pub fn task_candidate(line: &str) -> Option<&str> {
    let trimmed = trim_blank(line);
    trimmed.starts_with(TASK_MARKER).then_some(trimmed)
}

/// Parses a task entry line such as `- (V 1:23 - 4:56) Task description`.
///
/// The parenthesised part needs at least four whitespace-separated fields:
/// task token, start, separator and end. The separator is not checked and
/// only the first character of the task token is kept.
pub fn parse_task_line(line: &str) -> Option<TaskLine<'_>> {
    let line = task_candidate(line)?;
    let close = line.find(')')?;
    let inner = &line[TASK_MARKER.len()..close];

    let mut fields = inner.split_whitespace();
    let token = fields.next()?;
    let start = fields.next()?;
    let _separator = fields.next()?;
    let end = fields.next()?;

    let code = token.chars().next()?.to_ascii_uppercase();
    Some(TaskLine { code, start, end })
}

/// Parses an expectation line such as `> - Task Long A: 178h`.
///
/// Unlike task entries, the marker must start at column zero.
pub fn parse_expectation_line(line: &str) -> Option<ExpectationLine> {
    if !line.starts_with(EXPECTATION_MARKER) {
        return None;
    }

    let colon = line.find(':')?;
    let code = line[..colon]
        .chars()
        .next_back()
        .filter(|c| !c.is_whitespace())?
        .to_ascii_uppercase();

    let value = line[colon + 1..].trim();
    let value = value.strip_suffix('h').unwrap_or(value);
    if value.is_empty() {
        return None;
    }

    let hours = duration::parse_non_negative(value)?;
    let expected_minutes = hours.checked_mul(60)?;

    Some(ExpectationLine {
        code,
        expected_minutes,
    })
}
