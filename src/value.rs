use rust_decimal::Decimal;

/// A literal value appearing in a query.
///
/// Literals are the leaves of the predicate tree. Arrays only ever hold
/// other literals, never identifiers or expressions, so an array can be
/// handed to a backend as a plain list of bind parameters.
///
/// # Examples
///
/// ```
/// use miniquery::Value;
///
/// let int = Value::Int(42);
/// let string = Value::String("hello".to_string());
/// let array = Value::Array(vec![Value::Int(1), Value::Int(2)]);
///
/// assert_eq!(int.kind(), "int");
/// assert_eq!(string.kind(), "string");
/// assert_eq!(array.kind(), "array");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    /// Integer literal (`0`, `42`, `-7`)
    Int(i64),

    /// Decimal literal (`3.14`)
    ///
    /// Kept as an exact decimal so `1.50` renders back as `1.50`.
    Float(Decimal),

    /// `true` / `TRUE` / `false` / `FALSE`
    Bool(bool),

    /// Quoted string, content taken verbatim between the quotes
    String(String),

    /// `null` / `NULL`
    Null,

    /// `[1, 2, 3]` or `(1, 2, 3)`
    Array(Vec<Value>),
}

impl Value {
    /// Stable lower-case name of the value kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Bool(_) => "bool",
            Value::String(_) => "string",
            Value::Null => "null",
            Value::Array(_) => "array",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<Decimal> for Value {
    fn from(d: Decimal) -> Self {
        Value::Float(d)
    }
}
