//! Core parsing and aggregation for timebook files.
//!
//! This crate contains:
//! - Line splitting and task/expectation line extraction
//! - Clock-time resolution into elapsed minutes
//! - The task taxonomy (codes, categories, standard and merged tables)
//! - Aggregation into a [`TimebookSummary`]

pub mod duration;
pub mod extract;
pub mod lines;
mod summary;
pub mod taxonomy;
mod timebook;

pub use duration::{ClockError, ClockTime, elapsed_minutes};
pub use extract::{ExpectationLine, TaskLine, parse_expectation_line, parse_task_line};
pub use summary::{Aggregator, CategorySummary, SummaryEntry, TimebookSummary, summarize};
pub use taxonomy::{Category, TaskCode, Taxonomy, UnknownTaxonomy};
pub use timebook::{TimebookError, parse_bytes, parse_file, parse_str};
