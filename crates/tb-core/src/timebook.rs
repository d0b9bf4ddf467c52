//! Entry points for summarizing a whole timebook.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::lines::split_lines;
use crate::summary::{TimebookSummary, summarize};
use crate::taxonomy::Taxonomy;

/// Errors that abort summarizing a timebook.
///
/// Malformed lines never produce an error; they are skipped.
#[derive(Debug, Error)]
pub enum TimebookError {
    /// The file could not be read.
    #[error("failed to read timebook {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Reads and summarizes a timebook file.
pub fn parse_file(path: &Path, taxonomy: Taxonomy) -> Result<TimebookSummary, TimebookError> {
    let content = std::fs::read(path).map_err(|source| TimebookError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = content.len(), "read timebook");
    Ok(parse_bytes(&content, taxonomy))
}

/// Summarizes raw timebook content.
pub fn parse_bytes(content: &[u8], taxonomy: Taxonomy) -> TimebookSummary {
    let lines = split_lines(content);
    summarize(&lines, taxonomy)
}

/// Summarizes timebook text.
pub fn parse_str(content: &str, taxonomy: Taxonomy) -> TimebookSummary {
    parse_bytes(content.as_bytes(), taxonomy)
}
