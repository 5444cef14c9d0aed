//! Canonical text output for query trees.
//!
//! The text produced here parses back into a structurally equal tree, so a
//! query can be normalized by parsing and rendering it once.
//!
//! # Features
//!
//! - **Word operators** via [`render()`] - canonical codes such as `gte`, `neq`, `not in`
//! - **Symbolic operators** via [`render_symbolic()`] - `>=`, `!=`, `&&` where a symbol exists
//! - **Exact literals** - decimals keep their scale, strings keep their content
//! - **Grouping** - explicit parentheses from the source are kept
//!
//! # Examples
//!
//! ```
//! use miniquery::render::{render, render_symbolic};
//!
//! let root = miniquery::parse("A >= 1 AND b IN (1, 2)").unwrap();
//!
//! assert_eq!(render(&root), "A gte 1 and b in [1, 2]");
//! assert_eq!(render_symbolic(&root), "A >= 1 && b in [1, 2]");
//! ```

use std::fmt::{self, Write};

use crate::ast::{Node, Operation, Reference};
use crate::value::Value;
use crate::visitor::Visitor;

/// How operators are spelled in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OperatorStyle {
    /// Canonical codes: `gt`, `eq`, `and`.
    #[default]
    Word,
    /// Symbols where one exists: `>`, `==`, `&&`.
    Symbol,
}

/// Writes a tree as query text into any [`fmt::Write`] sink.
pub struct Renderer<W> {
    out: W,
    style: OperatorStyle,
}

impl<W: Write> Renderer<W> {
    pub fn new(out: W, style: OperatorStyle) -> Self {
        Renderer { out, style }
    }

    pub fn render(&mut self, node: &Node) -> fmt::Result {
        self.visit(node)
    }

    fn write_string(&mut self, s: &str) -> fmt::Result {
        // There are no escapes, so pick the quote the content does not use.
        let quote = if s.contains('\'') { '"' } else { '\'' };
        write!(self.out, "{quote}{s}{quote}")
    }
}

impl<W: Write> Visitor for Renderer<W> {
    type Error = fmt::Error;

    fn visit_value(&mut self, value: &Value) -> fmt::Result {
        match value {
            Value::Int(n) => write!(self.out, "{}", n),
            Value::Float(d) => write!(self.out, "{}", d),
            Value::Bool(b) => write!(self.out, "{}", b),
            Value::String(s) => self.write_string(s),
            Value::Null => self.out.write_str("null"),
            Value::Array(elements) => {
                self.out.write_char('[')?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        self.out.write_str(", ")?;
                    }
                    self.visit_value(element)?;
                }
                self.out.write_char(']')
            }
        }
    }

    fn visit_operation(&mut self, op: &Operation) -> fmt::Result {
        match self.style {
            OperatorStyle::Word => self.out.write_str(op.code()),
            OperatorStyle::Symbol => self.out.write_str(op.symbol()),
        }
    }

    fn visit_identifier(&mut self, name: &str) -> fmt::Result {
        self.out.write_str(name)
    }

    fn visit_reference(&mut self, reference: &Reference) -> fmt::Result {
        self.out.write_str(&reference.head)?;
        for (accessor, name) in &reference.segments {
            self.out.write_str(accessor.as_str())?;
            self.out.write_str(name)?;
        }
        Ok(())
    }

    fn visit_compare(&mut self, left: &Node, op: &Operation, right: &Node) -> fmt::Result {
        self.visit(left)?;
        self.out.write_char(' ')?;
        self.visit_operation(op)?;
        self.out.write_char(' ')?;
        self.visit(right)
    }

    fn visit_logic(&mut self, left: &Node, op: &Operation, right: &Node) -> fmt::Result {
        self.visit_compare(left, op, right)
    }

    fn visit_predicate(&mut self, left: &Node, op: &Operation) -> fmt::Result {
        self.visit(left)?;
        // Predicate codes have no symbolic form.
        write!(self.out, " {}", op.code())
    }

    fn visit_not(&mut self, inner: &Node) -> fmt::Result {
        self.out.write_str("not ")?;
        self.visit(inner)
    }

    fn visit_parentheses(&mut self, inner: &Node) -> fmt::Result {
        self.out.write_char('(')?;
        self.visit(inner)?;
        self.out.write_char(')')
    }

    fn visit_between(&mut self, left: &Node, op: &Operation, low: &Node, high: &Node) -> fmt::Result {
        self.visit(left)?;
        write!(self.out, " {} ", op.code())?;
        self.visit(low)?;
        self.out.write_str(" and ")?;
        self.visit(high)
    }

    fn visit_function(&mut self, name: &str, params: &[Node]) -> fmt::Result {
        self.out.write_str(name)?;
        self.out.write_char('(')?;
        for (i, param) in params.iter().enumerate() {
            if i > 0 {
                self.out.write_str(", ")?;
            }
            self.visit(param)?;
        }
        self.out.write_char(')')
    }
}

/// Renders `node` with canonical word operators.
pub fn render(node: &Node) -> String {
    render_with(node, OperatorStyle::Word)
}

/// Renders `node` with symbolic operators where they exist.
pub fn render_symbolic(node: &Node) -> String {
    render_with(node, OperatorStyle::Symbol)
}

pub fn render_with(node: &Node, style: OperatorStyle) -> String {
    let mut out = String::new();
    Renderer::new(&mut out, style)
        .render(node)
        .expect("writing to a String cannot fail");
    out
}
