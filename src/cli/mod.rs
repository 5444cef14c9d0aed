//! CLI support for miniquery
//!
//! Provides programmatic access to the `mq` commands for embedding in
//! other tools.

mod check;
mod convert;
mod format;

pub use check::{CheckOptions, CheckResult, execute_check};
pub use convert::{node_to_json, value_to_json};
pub use format::{FormatOptions, execute_format};

use std::io;

use thiserror::Error;

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Parse error: {0}")]
    Parse(#[from] crate::ParseError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("No query provided. Pass it as an argument or pipe it to stdin.")]
    NoInput,
}
