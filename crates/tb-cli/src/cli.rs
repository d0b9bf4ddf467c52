//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tb_core::Taxonomy;

/// Timebook summarizer.
///
/// Reads a plain-text work journal and reports the time spent per task code,
/// compared against the expectations declared in the file.
#[derive(Debug, Parser)]
#[command(name = "tb", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Summarize a timebook file.
    Summary(SummaryArgs),

    /// List task codes and their categories.
    Codes {
        /// Classification table to show (standard or merged).
        #[arg(long)]
        taxonomy: Option<Taxonomy>,
    },
}

#[derive(Debug, Args)]
pub struct SummaryArgs {
    /// The timebook file to read.
    pub file: PathBuf,

    /// Classification table to apply (standard or merged).
    #[arg(long)]
    pub taxonomy: Option<Taxonomy>,

    /// Group rows by category instead of task code.
    #[arg(long)]
    pub by_category: bool,

    /// Output JSON instead of the human-readable report.
    #[arg(long)]
    pub json: bool,
}
