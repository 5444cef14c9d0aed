//! Bottom-up tree construction.
//!
//! The parser fires one builder action per grammar reduction. Leaf actions
//! push a node; composite actions pop a fixed number of operands and push
//! the node built from them. Variable-length groups (arrays, argument lists,
//! reference chains) open a marker recording the stack depth, push their
//! elements, and on close collect everything above the marker.
//!
//! A builder belongs to a single parse. The parser takes a [`Checkpoint`]
//! before each alternative and rewinds to it when the alternative fails,
//! which discards whatever the alternative pushed.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::ast::{Accessor, Node, Operation, Reference};
use crate::error::{ParseError, SemanticError};
use crate::value::Value;

/// An entry on the operand stack.
#[derive(Debug, Clone, PartialEq)]
enum Operand {
    Node(Node),
    /// A closed argument list waiting for its function name.
    Arguments(Vec<Node>),
}

impl Operand {
    fn kind(&self) -> &'static str {
        match self {
            Operand::Node(node) => node.kind(),
            Operand::Arguments(_) => "argument list",
        }
    }
}

/// Saved builder state, see [`TreeBuilder::rewind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint {
    stack: usize,
    marks: usize,
    errors: usize,
}

#[derive(Debug, Default)]
pub struct TreeBuilder {
    stack: Vec<Operand>,
    marks: Vec<usize>,
    errors: Vec<SemanticError>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            stack: self.stack.len(),
            marks: self.marks.len(),
            errors: self.errors.len(),
        }
    }

    /// Drops everything pushed, marked or recorded since `checkpoint`.
    ///
    /// Every successful rule consumes only operands it pushed itself, so
    /// truncating restores the stack exactly.
    pub fn rewind(&mut self, checkpoint: Checkpoint) {
        if self.stack.len() > checkpoint.stack {
            log::trace!(
                "rewind: dropping {} operand(s)",
                self.stack.len() - checkpoint.stack
            );
        }
        self.stack.truncate(checkpoint.stack);
        self.marks.truncate(checkpoint.marks);
        self.errors.truncate(checkpoint.errors);
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Every semantic error recorded so far, in order.
    pub fn errors(&self) -> &[SemanticError] {
        &self.errors
    }

    fn push(&mut self, node: Node) {
        self.stack.push(Operand::Node(node));
    }

    fn add_error(&mut self, error: SemanticError) {
        log::debug!("semantic error: {}", error);
        self.errors.push(error);
    }

    fn pop(&mut self, action: &'static str) -> Option<Operand> {
        let operand = self.stack.pop();
        if operand.is_none() {
            self.add_error(SemanticError::OperandUnderflow { action });
        }
        operand
    }

    fn pop_node(&mut self, action: &'static str) -> Option<Node> {
        match self.pop(action)? {
            Operand::Node(node) => Some(node),
            other => {
                self.add_error(SemanticError::UnexpectedOperand {
                    action,
                    expected: "expression",
                    found: other.kind(),
                });
                None
            }
        }
    }

    fn pop_operation(&mut self, action: &'static str) -> Option<Operation> {
        match self.pop(action)? {
            Operand::Node(Node::Operation(op)) => Some(op),
            other => {
                self.add_error(SemanticError::UnexpectedOperand {
                    action,
                    expected: "operation",
                    found: other.kind(),
                });
                None
            }
        }
    }

    // Leaves

    pub fn add_name(&mut self, name: &str) {
        self.push(Node::Identifier(name.to_string()));
    }

    /// Pushes an operator after running it through the normalizer.
    pub fn add_operation(&mut self, raw: &str) {
        self.push(Node::Operation(Operation::new(raw)));
    }

    pub fn add_integer(&mut self, text: &str) {
        let n = text.parse::<i64>().unwrap_or_else(|e| {
            self.add_error(SemanticError::InvalidInteger {
                text: text.to_string(),
                reason: e.to_string(),
            });
            0
        });
        self.push(Node::Value(Value::Int(n)));
    }

    pub fn add_float(&mut self, text: &str) {
        let d = Decimal::from_str(text).unwrap_or_else(|e| {
            self.add_error(SemanticError::InvalidFloat {
                text: text.to_string(),
                reason: e.to_string(),
            });
            Decimal::ZERO
        });
        self.push(Node::Value(Value::Float(d)));
    }

    pub fn add_boolean(&mut self, text: &str) {
        let b = match text {
            "true" | "TRUE" => true,
            "false" | "FALSE" => false,
            other => {
                self.add_error(SemanticError::InvalidBoolean(other.to_string()));
                false
            }
        };
        self.push(Node::Value(Value::Bool(b)));
    }

    pub fn add_null(&mut self) {
        self.push(Node::Value(Value::Null));
    }

    pub fn add_string(&mut self, text: &str) {
        self.push(Node::Value(Value::String(text.to_string())));
    }

    // Variable-length groups

    /// Opens a group at the current stack depth.
    pub fn mark(&mut self) {
        self.marks.push(self.stack.len());
    }

    fn pop_marked(&mut self, action: &'static str) -> Option<Vec<Operand>> {
        match self.marks.pop() {
            Some(mark) if mark <= self.stack.len() => Some(self.stack.split_off(mark)),
            _ => {
                self.add_error(SemanticError::MissingMarker { action });
                None
            }
        }
    }

    /// Closes a literal array.
    pub fn pop_array(&mut self) {
        let Some(elements) = self.pop_marked("array") else {
            return;
        };

        let mut values = Vec::with_capacity(elements.len());
        for element in elements {
            match element {
                Operand::Node(Node::Value(value)) => values.push(value),
                other => self.add_error(SemanticError::InvalidArrayElement(other.kind())),
            }
        }
        log::trace!("reduce array of {}", values.len());
        self.push(Node::Value(Value::Array(values)));
    }

    /// Closes a function argument list.
    pub fn pop_arguments(&mut self) {
        let Some(elements) = self.pop_marked("arguments") else {
            return;
        };

        let mut params = Vec::with_capacity(elements.len());
        for element in elements {
            match element {
                Operand::Node(node) => params.push(node),
                other => self.add_error(SemanticError::UnexpectedOperand {
                    action: "arguments",
                    expected: "expression",
                    found: other.kind(),
                }),
            }
        }
        log::trace!("reduce argument list of {}", params.len());
        self.stack.push(Operand::Arguments(params));
    }

    /// Closes a name chain. `accessors[i]` joins name `i` to name `i + 1`.
    /// A chain of one name stays an identifier.
    pub fn pop_reference(&mut self, accessors: &[Accessor]) {
        let Some(elements) = self.pop_marked("reference") else {
            return;
        };

        let mut names = Vec::with_capacity(elements.len());
        for element in elements {
            match element {
                Operand::Node(Node::Identifier(name)) => names.push(name),
                other => {
                    self.add_error(SemanticError::UnexpectedOperand {
                        action: "reference",
                        expected: "identifier",
                        found: other.kind(),
                    });
                    return;
                }
            }
        }

        if names.len() != accessors.len() + 1 {
            self.add_error(SemanticError::UnexpectedOperand {
                action: "reference",
                expected: "one more name than accessors",
                found: "mismatched chain",
            });
            return;
        }

        let mut names = names.into_iter();
        let Some(head) = names.next() else {
            return;
        };
        if accessors.is_empty() {
            self.push(Node::Identifier(head));
            return;
        }

        let segments = accessors.iter().copied().zip(names).collect();
        self.push(Node::Reference(Reference::new(head, segments)));
    }

    // Reductions

    /// Pops an argument list and the identifier below it.
    pub fn pop_function(&mut self) {
        let Some(args) = self.pop("function") else {
            return;
        };
        let Some(head) = self.pop("function") else {
            return;
        };

        match (head, args) {
            (Operand::Node(Node::Identifier(name)), Operand::Arguments(params)) => {
                log::trace!("reduce function {}({})", name, params.len());
                self.push(Node::Function { name, params });
            }
            (head, args) => self.add_error(SemanticError::InvalidFunction {
                name: head.kind(),
                args: args.kind(),
            }),
        }
    }

    /// Pops `right`, `op`, `left`.
    pub fn pop_compare(&mut self) {
        if let Some((left, op, right)) = self.pop_binary("compare") {
            self.push(Node::Compare { left, op, right });
        }
    }

    /// Pops `right`, `op`, `left`.
    pub fn pop_logic(&mut self) {
        if let Some((left, op, right)) = self.pop_binary("logic") {
            self.push(Node::Logic { left, op, right });
        }
    }

    fn pop_binary(&mut self, action: &'static str) -> Option<(Box<Node>, Operation, Box<Node>)> {
        let right = self.pop_node(action)?;
        let op = self.pop_operation(action)?;
        let left = self.pop_node(action)?;
        log::trace!("reduce {} {}", action, op);
        Some((Box::new(left), op, Box::new(right)))
    }

    /// Pops `high`, `low`, `op`, `left`.
    pub fn pop_between(&mut self) {
        let Some(high) = self.pop_node("between") else {
            return;
        };
        let Some(low) = self.pop_node("between") else {
            return;
        };
        let Some(op) = self.pop_operation("between") else {
            return;
        };
        let Some(left) = self.pop_node("between") else {
            return;
        };
        log::trace!("reduce {}", op);
        self.push(Node::Between {
            left: Box::new(left),
            op,
            low: Box::new(low),
            high: Box::new(high),
        });
    }

    /// Pops `op`, `left`.
    pub fn pop_predicate(&mut self) {
        let Some(op) = self.pop_operation("predicate") else {
            return;
        };
        let Some(left) = self.pop_node("predicate") else {
            return;
        };
        log::trace!("reduce predicate {}", op);
        self.push(Node::Predicate {
            left: Box::new(left),
            op,
        });
    }

    pub fn pop_not(&mut self) {
        if let Some(inner) = self.pop_node("not") {
            self.push(Node::Not(Box::new(inner)));
        }
    }

    pub fn pop_parentheses(&mut self) {
        if let Some(inner) = self.pop_node("parentheses") {
            self.push(Node::Parentheses(Box::new(inner)));
        }
    }

    /// Takes the finished tree.
    ///
    /// Fails with the first recorded semantic error if there is one. A stack
    /// holding anything but a single node means a grammar action is wired
    /// wrong.
    pub fn finish(&mut self) -> Result<Node, ParseError> {
        if let Some(first) = self.errors.first() {
            return Err(ParseError::Semantic(first.clone()));
        }

        debug_assert!(
            self.stack.len() == 1 && self.marks.is_empty(),
            "tree builder finished with {} operands and {} open markers",
            self.stack.len(),
            self.marks.len()
        );

        match (self.stack.pop(), self.stack.is_empty()) {
            (Some(Operand::Node(root)), true) => Ok(root),
            (last, _) => {
                let residual = self.stack.len() + usize::from(last.is_some());
                log::error!("tree builder finished with {} operands", residual);
                Err(ParseError::Internal { residual })
            }
        }
    }
}
