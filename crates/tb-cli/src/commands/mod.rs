//! CLI subcommand implementations.

pub mod codes;
pub mod summary;
