//! Validate queries and dump their trees

use super::{CliError, node_to_json};
use crate::Parser;

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The query to validate
    pub query: String,
    /// Dump the parsed tree as JSON instead of only validating
    pub ast: bool,
}

/// Result of a check operation
#[derive(Debug)]
pub enum CheckResult {
    /// Syntax validation passed
    SyntaxValid,
    /// Query parsed; its tree as JSON
    Ast(serde_json::Value),
}

/// Execute a check operation
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    let mut parser = Parser::new(&options.query);
    let root = parser.parse()?;

    if !options.ast {
        return Ok(CheckResult::SyntaxValid);
    }

    Ok(CheckResult::Ast(node_to_json(&root)))
}
