//! Reformat queries into canonical text

use super::CliError;
use crate::render::{OperatorStyle, render_with};

/// Options for the format command
#[derive(Debug, Clone, Default)]
pub struct FormatOptions {
    pub query: String,
    /// Spell operators as symbols (`>=`, `&&`) instead of words
    pub symbols: bool,
}

/// Parses the query and renders it back in canonical form.
pub fn execute_format(options: &FormatOptions) -> Result<String, CliError> {
    let root = crate::parse(&options.query)?;
    let style = if options.symbols {
        OperatorStyle::Symbol
    } else {
        OperatorStyle::Word
    };
    Ok(render_with(&root, style))
}

#[test]
fn test_format() {
    let options = FormatOptions {
        query: "a>=1 AND b IS NULL".to_string(),
        symbols: false,
    };
    assert_eq!(execute_format(&options).unwrap(), "a gte 1 and b is null");

    let options = FormatOptions {
        symbols: true,
        ..options
    };
    assert_eq!(execute_format(&options).unwrap(), "a >= 1 && b is null");
}
