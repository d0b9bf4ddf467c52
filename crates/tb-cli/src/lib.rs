//! Timebook CLI library.
//!
//! This crate provides the CLI interface for summarizing timebooks.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands, SummaryArgs};
pub use config::Config;
