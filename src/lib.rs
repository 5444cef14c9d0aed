pub mod ast;
pub mod builder;
pub mod cli;
pub mod error;
mod join;
pub mod lexer;
pub mod parser;
pub mod render;
pub mod value;
pub mod visitor;

pub use ast::{Accessor, Node, Operation, Reference};
pub use error::{ErrorKind, ParseError, SemanticError};
pub use join::join;
pub use lexer::{Lexer, Position};
pub use parser::{MAX_DEPTH, Parser};
pub use render::{render, render_symbolic};
pub use value::Value;
pub use visitor::Visitor;

/// Parses a query into its predicate tree.
///
/// ```
/// use miniquery::{Node, Value};
///
/// let root = miniquery::parse("a>10").unwrap();
/// match root {
///     Node::Compare { left, op, right } => {
///         assert_eq!(*left, Node::Identifier("a".into()));
///         assert_eq!(op.code(), "gt");
///         assert_eq!(*right, Node::Value(Value::Int(10)));
///     }
///     _ => unreachable!(),
/// }
/// ```
pub fn parse(input: &str) -> Result<Node, ParseError> {
    Parser::new(input).parse()
}
