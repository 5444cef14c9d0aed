use std::fmt;

use crate::ast::{Operation, Reference};
use crate::value::Value;

/// A node of the predicate tree.
///
/// Every variant carries only the fields it needs. Operators are stored as
/// [`Operation`] values produced by the normalizer, so `a = 1`, `a == 1`
/// and `a EQ 1` all build the same tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Node {
    // Leaves
    /// Literal value or array of literals
    ///
    /// # Example
    /// ```text
    /// 42
    /// 'hello'
    /// [1, 2, 3]
    /// ```
    Value(Value),

    /// A standalone operator
    ///
    /// Only appears while the tree is being built; in a finished tree the
    /// operators live inside their parent node.
    Operation(Operation),

    /// Unresolved column or field name
    ///
    /// # Example
    /// ```text
    /// age
    /// ```
    Identifier(String),

    /// Dotted or JSON-path access chain
    ///
    /// # Example
    /// ```text
    /// profile.age
    /// data->owner->name
    /// ```
    Reference(Reference),

    // Expressions
    /// Comparison, including `in` / `not in` against an array
    ///
    /// # Example
    /// ```text
    /// a > 10
    /// name like '%x%'
    /// id in [1, 2, 3]
    /// ```
    Compare {
        left: Box<Node>,
        op: Operation,
        right: Box<Node>,
    },

    /// `and` / `or`, folded left to right with no precedence between them
    ///
    /// # Example
    /// ```text
    /// a or b and c    // (a or b) and c
    /// ```
    Logic {
        left: Box<Node>,
        op: Operation,
        right: Box<Node>,
    },

    /// Postfix match with no right-hand side
    ///
    /// # Example
    /// ```text
    /// deleted_at is null
    /// active is not false
    /// ```
    Predicate { left: Box<Node>, op: Operation },

    /// `not <expr>`
    Not(Box<Node>),

    /// `( <expr> )`, kept so rendering reproduces the grouping
    Parentheses(Box<Node>),

    /// Range test with bounds normalized to (low, high)
    ///
    /// # Example
    /// ```text
    /// age between 10 and 20
    /// age not between [10, 20]
    /// ```
    Between {
        left: Box<Node>,
        op: Operation,
        low: Box<Node>,
        high: Box<Node>,
    },

    /// Function call with any number of expression arguments
    ///
    /// # Example
    /// ```text
    /// date(created_at)
    /// has_edge(owner, name = 'x')
    /// ```
    Function { name: String, params: Vec<Node> },
}

impl Node {
    /// Stable lower-case name of the variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Value(_) => "value",
            Node::Operation(_) => "operation",
            Node::Identifier(_) => "identifier",
            Node::Reference(_) => "reference",
            Node::Compare { .. } => "compare",
            Node::Logic { .. } => "logic",
            Node::Predicate { .. } => "predicate",
            Node::Not(_) => "not",
            Node::Parentheses(_) => "parentheses",
            Node::Between { .. } => "between",
            Node::Function { .. } => "function",
        }
    }

    pub fn is_value(&self) -> bool {
        matches!(self, Node::Value(_))
    }

    /// False for leaves (values, operations, identifiers, references).
    pub fn is_expression(&self) -> bool {
        !matches!(
            self,
            Node::Value(_) | Node::Operation(_) | Node::Identifier(_) | Node::Reference(_)
        )
    }

    /// The two bounds of a `between` node, in (low, high) order.
    pub fn bounds(&self) -> Option<[&Node; 2]> {
        match self {
            Node::Between { low, high, .. } => Some([low.as_ref(), high.as_ref()]),
            _ => None,
        }
    }

    /// The operator of an expression node, if it has one.
    pub fn operation(&self) -> Option<&Operation> {
        match self {
            Node::Operation(op)
            | Node::Compare { op, .. }
            | Node::Logic { op, .. }
            | Node::Predicate { op, .. }
            | Node::Between { op, .. } => Some(op),
            _ => None,
        }
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        Node::Value(value)
    }
}

impl From<Reference> for Node {
    fn from(reference: Reference) -> Self {
        Node::Reference(reference)
    }
}

/// Renders the node as canonical query text.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::render::Renderer::new(f, crate::render::OperatorStyle::Word).render(self)
    }
}
