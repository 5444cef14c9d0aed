use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

// Canonical operator codes

// Comparison
pub const GT: &str = "gt";
pub const GTE: &str = "gte";
pub const LT: &str = "lt";
pub const LTE: &str = "lte";
pub const EQ: &str = "eq";
pub const NEQ: &str = "neq";
pub const LIKE: &str = "like";
pub const NOT_LIKE: &str = "not like";
pub const IN: &str = "in";
pub const NOT_IN: &str = "not in";

// Range
pub const BETWEEN: &str = "between";
pub const NOT_BETWEEN: &str = "not between";

// Logical
pub const AND: &str = "and";
pub const OR: &str = "or";
pub const NOT: &str = "not";

// Postfix predicates
pub const IS_NULL: &str = "is null";
pub const IS_NOT_NULL: &str = "is not null";
pub const IS_TRUE: &str = "is true";
pub const IS_NOT_TRUE: &str = "is not true";
pub const IS_FALSE: &str = "is false";
pub const IS_NOT_FALSE: &str = "is not false";

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Maps a surface operator spelling to its canonical code.
///
/// The input is trimmed, lower-cased and has internal whitespace runs
/// collapsed to one space before the lookup, so `"NOT  LIKE"` and
/// `"not like"` normalize identically. Unknown spellings are returned in
/// their folded form unchanged.
///
/// # Examples
///
/// ```
/// use miniquery::ast::operators::normalize;
///
/// assert_eq!(normalize(">="), "gte");
/// assert_eq!(normalize("=="), "eq");
/// assert_eq!(normalize(" NOT \t IN "), "not in");
/// assert_eq!(normalize("regexp"), "regexp");
/// ```
pub fn normalize(raw: &str) -> String {
    let folded = raw.trim().to_lowercase();
    let folded = WHITESPACE.replace_all(&folded, " ");

    let canonical = match &*folded {
        ">=" => GTE,
        ">" => GT,
        "==" | "=" | ":" => EQ,
        "!=" | "<>" => NEQ,
        "<" => LT,
        "<=" => LTE,
        "&&" | "," => AND,
        "||" => OR,
        "isnull" => IS_NULL,
        "notnull" | "not null" => IS_NOT_NULL,
        other => return other.to_string(),
    };
    canonical.to_string()
}

/// A normalized operator.
///
/// The only way to build one is through [`normalize`], so two operations
/// compare equal whenever their source spellings mean the same thing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Operation {
    code: String,
}

impl Operation {
    pub fn new(raw: &str) -> Self {
        Operation {
            code: normalize(raw),
        }
    }

    /// The canonical code, e.g. `gt` or `not between`.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Symbolic spelling of the operator where one exists (`gt` → `>`).
    pub fn symbol(&self) -> &str {
        match self.code.as_str() {
            GTE => ">=",
            GT => ">",
            EQ => "==",
            NEQ => "!=",
            LT => "<",
            LTE => "<=",
            AND => "&&",
            OR => "||",
            other => other,
        }
    }

    pub fn is_comparison(&self) -> bool {
        matches!(
            self.code.as_str(),
            GT | GTE | LT | LTE | EQ | NEQ | LIKE | NOT_LIKE | IN | NOT_IN
        )
    }

    pub fn is_logic(&self) -> bool {
        matches!(self.code.as_str(), AND | OR)
    }

    pub fn is_range(&self) -> bool {
        matches!(self.code.as_str(), BETWEEN | NOT_BETWEEN)
    }

    pub fn is_predicate(&self) -> bool {
        matches!(
            self.code.as_str(),
            IS_NULL | IS_NOT_NULL | IS_TRUE | IS_NOT_TRUE | IS_FALSE | IS_NOT_FALSE
        )
    }

    /// True for the negated forms: `not in`, `not like`, `not between`,
    /// `is not ...`.
    pub fn is_negated(&self) -> bool {
        self.code.starts_with("not ") || self.code.starts_with("is not ")
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_fold_to_codes() {
        let cases = vec![
            (">=", GTE),
            (">", GT),
            ("==", EQ),
            ("=", EQ),
            (":", EQ),
            ("!=", NEQ),
            ("<>", NEQ),
            ("<", LT),
            ("<=", LTE),
            ("&&", AND),
            ("||", OR),
            (",", AND),
        ];

        for (input, expected) in cases {
            assert_eq!(normalize(input), expected, "Failed for input: {}", input);
        }
    }

    #[test]
    fn words_are_case_and_space_insensitive() {
        assert_eq!(normalize("GTE"), GTE);
        assert_eq!(normalize("  And "), AND);
        assert_eq!(normalize("NOT  LIKE"), normalize("not like"));
        assert_eq!(normalize("is\tnot\n null"), IS_NOT_NULL);
        assert_eq!(normalize("Not Between"), NOT_BETWEEN);
    }

    #[test]
    fn null_shorthands() {
        assert_eq!(normalize("isnull"), IS_NULL);
        assert_eq!(normalize("notnull"), IS_NOT_NULL);
        assert_eq!(normalize("not null"), IS_NOT_NULL);
    }

    #[test]
    fn unknown_spelling_passes_through() {
        assert_eq!(normalize("ILIKE"), "ilike");
        assert_eq!(normalize("similar   to"), "similar to");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn operation_classification() {
        assert!(Operation::new("<>").is_comparison());
        assert!(Operation::new("not in").is_negated());
        assert!(Operation::new("||").is_logic());
        assert!(Operation::new("not between").is_range());
        assert!(Operation::new("is not true").is_predicate());
        assert!(!Operation::new("like").is_negated());
        assert_eq!(Operation::new("gte").symbol(), ">=");
        assert_eq!(Operation::new("like").symbol(), "like");
    }
}
