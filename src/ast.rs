//! # MiniQuery - Abstract Syntax Tree
//!
//! This module defines the predicate tree produced by parsing a MiniQuery
//! filter expression. The tree is backend-agnostic: SQL builders, ORM
//! adapters and other consumers walk it through the
//! [`Visitor`](crate::visitor::Visitor) trait.
//!
//! ## Architecture Overview
//!
//! - **[expressions]** - The [`Node`] sum type
//! - **[operators]** - Canonical operator codes and the normalizer
//! - **[references]** - Dotted and JSON-path access chains
//!
//! Literal payloads live in [`crate::value`].
//!
//! ## Quick Start
//!
//! ```text
//! age > 18 and status in ['active', 'trial']
//! ```
//!
//! parses as
//!
//! ```text
//! Logic(
//!     Compare(Identifier(age), gt, Value(18)),
//!     and,
//!     Compare(Identifier(status), in, Value([active, trial])),
//! )
//! ```
//!
//! ## Core Concepts
//!
//! ### Binding
//!
//! From tightest to loosest: primary (literal, array, reference, function
//! call, parenthesized expression), `between`, postfix `is null` style
//! matches, `in`, comparisons, `not`, and finally `and` / `or`.
//!
//! ### No precedence between `and` and `or`
//!
//! Both fold left to right as one chain:
//!
//! ```text
//! a or b and c    // (a or b) and c
//! ```
//!
//! ### Operator spellings
//!
//! Every operator is normalized, so the symbol, word and upper-case forms
//! are interchangeable:
//!
//! ```text
//! a >= 1     a gte 1     a GTE 1
//! a != 1     a <> 1      a neq 1
//! a && b     a and b     a AND b
//! ```
pub mod expressions;
pub mod operators;
pub mod references;

pub use expressions::Node;
pub use operators::{Operation, normalize};
pub use references::{Accessor, Reference};
