//! Traversal contract for backends.
//!
//! A backend implements [`Visitor`] and overrides only the hooks it cares
//! about. Every hook has a default: leaves do nothing, composite nodes
//! recurse into their children through the matching `walk_*` function.
//! An override that still wants the default traversal calls the `walk_*`
//! function itself.
//!
//! Traversal is depth-first and pre-order. The order of callbacks is part
//! of the contract:
//!
//! | Node        | Order                              |
//! |-------------|------------------------------------|
//! | compare     | left, operation, right             |
//! | logic       | left, operation, right             |
//! | predicate   | left, operation                    |
//! | between     | left, operation, low, high         |
//! | function    | each parameter                     |
//! | not, parens | inner expression                   |
//! | array value | each element                       |
//!
//! The first error returned by any hook stops the traversal and is returned
//! from [`Visitor::visit`].
//!
//! # Examples
//!
//! ```
//! use miniquery::visitor::Visitor;
//!
//! #[derive(Default)]
//! struct Columns(Vec<String>);
//!
//! impl Visitor for Columns {
//!     type Error = std::convert::Infallible;
//!
//!     fn visit_identifier(&mut self, name: &str) -> Result<(), Self::Error> {
//!         self.0.push(name.to_string());
//!         Ok(())
//!     }
//! }
//!
//! let root = miniquery::parse("a > 1 and f(b, c is null)").unwrap();
//! let mut columns = Columns::default();
//! columns.visit(&root).unwrap();
//! assert_eq!(columns.0, vec!["a", "b", "c"]);
//! ```

use crate::ast::{Node, Operation, Reference};
use crate::value::Value;

pub trait Visitor {
    type Error;

    /// Dispatches on the node variant.
    fn visit(&mut self, node: &Node) -> Result<(), Self::Error> {
        walk_node(self, node)
    }

    fn visit_value(&mut self, value: &Value) -> Result<(), Self::Error> {
        walk_value(self, value)
    }

    fn visit_operation(&mut self, _op: &Operation) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_identifier(&mut self, _name: &str) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_reference(&mut self, _reference: &Reference) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_compare(
        &mut self,
        left: &Node,
        op: &Operation,
        right: &Node,
    ) -> Result<(), Self::Error> {
        walk_binary(self, left, op, right)
    }

    fn visit_logic(&mut self, left: &Node, op: &Operation, right: &Node) -> Result<(), Self::Error> {
        walk_binary(self, left, op, right)
    }

    fn visit_predicate(&mut self, left: &Node, op: &Operation) -> Result<(), Self::Error> {
        walk_predicate(self, left, op)
    }

    fn visit_not(&mut self, inner: &Node) -> Result<(), Self::Error> {
        self.visit(inner)
    }

    fn visit_parentheses(&mut self, inner: &Node) -> Result<(), Self::Error> {
        self.visit(inner)
    }

    fn visit_between(
        &mut self,
        left: &Node,
        op: &Operation,
        low: &Node,
        high: &Node,
    ) -> Result<(), Self::Error> {
        walk_between(self, left, op, low, high)
    }

    fn visit_function(&mut self, _name: &str, params: &[Node]) -> Result<(), Self::Error> {
        walk_params(self, params)
    }
}

/// Calls the hook matching `node`'s variant.
pub fn walk_node<V: Visitor + ?Sized>(visitor: &mut V, node: &Node) -> Result<(), V::Error> {
    match node {
        Node::Value(value) => visitor.visit_value(value),
        Node::Operation(op) => visitor.visit_operation(op),
        Node::Identifier(name) => visitor.visit_identifier(name),
        Node::Reference(reference) => visitor.visit_reference(reference),
        Node::Compare { left, op, right } => visitor.visit_compare(left, op, right),
        Node::Logic { left, op, right } => visitor.visit_logic(left, op, right),
        Node::Predicate { left, op } => visitor.visit_predicate(left, op),
        Node::Not(inner) => visitor.visit_not(inner),
        Node::Parentheses(inner) => visitor.visit_parentheses(inner),
        Node::Between {
            left,
            op,
            low,
            high,
        } => visitor.visit_between(left, op, low, high),
        Node::Function { name, params } => visitor.visit_function(name, params),
    }
}

/// Visits each element of an array value. Scalars have no children.
pub fn walk_value<V: Visitor + ?Sized>(visitor: &mut V, value: &Value) -> Result<(), V::Error> {
    if let Value::Array(elements) = value {
        for element in elements {
            visitor.visit_value(element)?;
        }
    }
    Ok(())
}

pub fn walk_binary<V: Visitor + ?Sized>(
    visitor: &mut V,
    left: &Node,
    op: &Operation,
    right: &Node,
) -> Result<(), V::Error> {
    visitor.visit(left)?;
    visitor.visit_operation(op)?;
    visitor.visit(right)
}

pub fn walk_predicate<V: Visitor + ?Sized>(
    visitor: &mut V,
    left: &Node,
    op: &Operation,
) -> Result<(), V::Error> {
    visitor.visit(left)?;
    visitor.visit_operation(op)
}

pub fn walk_between<V: Visitor + ?Sized>(
    visitor: &mut V,
    left: &Node,
    op: &Operation,
    low: &Node,
    high: &Node,
) -> Result<(), V::Error> {
    visitor.visit(left)?;
    visitor.visit_operation(op)?;
    visitor.visit(low)?;
    visitor.visit(high)
}

pub fn walk_params<V: Visitor + ?Sized>(visitor: &mut V, params: &[Node]) -> Result<(), V::Error> {
    params.iter().try_for_each(|param| visitor.visit(param))
}
