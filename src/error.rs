use thiserror::Error;

use crate::lexer::Position;

/// Class of a [`ParseError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Syntax,
    Semantic,
    Internal,
}

/// Errors returned by [`parse`](crate::parse).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// No alternative of the grammar matched.
    ///
    /// `offset` is the furthest byte offset any alternative reached while
    /// backtracking, which is usually where the malformed token sits.
    #[error("parse error near {near:?} at {position} (in {rule})")]
    Syntax {
        offset: usize,
        position: Position,
        rule: &'static str,
        near: String,
    },

    /// Parentheses or argument lists nest deeper than `limit`.
    #[error("nesting deeper than {limit} levels at {position}")]
    TooDeep {
        limit: usize,
        offset: usize,
        position: Position,
    },

    /// The text matched the grammar but building the tree failed.
    #[error(transparent)]
    Semantic(#[from] SemanticError),

    /// The builder finished with other than exactly one node.
    #[error("internal error: tree builder finished with {residual} nodes on the stack")]
    Internal { residual: usize },
}

impl ParseError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::Syntax { .. } | ParseError::TooDeep { .. } => ErrorKind::Syntax,
            ParseError::Semantic(_) => ErrorKind::Semantic,
            ParseError::Internal { .. } => ErrorKind::Internal,
        }
    }

    /// Line and column of a syntax error.
    pub fn position(&self) -> Option<Position> {
        match self {
            ParseError::Syntax { position, .. } | ParseError::TooDeep { position, .. } => Some(*position),
            _ => None,
        }
    }
}

/// Errors raised by tree builder reductions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SemanticError {
    #[error("invalid integer literal {text:?}: {reason}")]
    InvalidInteger { text: String, reason: String },

    #[error("invalid decimal literal {text:?}: {reason}")]
    InvalidFloat { text: String, reason: String },

    #[error("invalid boolean literal {0:?}")]
    InvalidBoolean(String),

    /// A call's head was not an identifier or its arguments were missing.
    #[error("invalid function expression: {name} applied to {args}")]
    InvalidFunction { name: &'static str, args: &'static str },

    #[error("array elements must be literal values, found {0}")]
    InvalidArrayElement(&'static str),

    #[error("{action}: no open marker")]
    MissingMarker { action: &'static str },

    #[error("{action}: operand stack is empty")]
    OperandUnderflow { action: &'static str },

    #[error("{action}: expected {expected}, found {found}")]
    UnexpectedOperand {
        action: &'static str,
        expected: &'static str,
        found: &'static str,
    },
}
