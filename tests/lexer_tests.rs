// tests/lexer_tests.rs

use miniquery::lexer::{Lexer, NumberKind, Position};

// ============================================================================
// Identifiers
// ============================================================================

#[test]
fn test_identifiers() {
    let cases = vec![
        ("a", Some("a")),
        ("created_at", Some("created_at")),
        ("A1_b2 rest", Some("A1_b2")),
        ("notice", Some("notice")),
        ("_hidden", None),
        ("1abc", None),
        ("not", None),
        ("NOT", None),
        ("Not(", None),
    ];

    for (input, expected) in cases {
        let mut lexer = Lexer::new(input);
        assert_eq!(lexer.read_identifier(), expected, "Failed for input: {}", input);
        if expected.is_none() {
            assert_eq!(lexer.position(), 0, "Failed for input: {}", input);
        }
    }
}

// ============================================================================
// Strings
// ============================================================================

#[test]
fn test_strings() {
    let cases = vec![
        ("'hello'", Some("hello")),
        ("\"hello\"", Some("hello")),
        ("''", Some("")),
        ("'it\"s'", Some("it\"s")),
        ("\"it's\"", Some("it's")),
        ("'%wener%'", Some("%wener%")),
        ("'a\\'", Some("a\\")),
        ("'open", None),
        ("plain", None),
    ];

    for (input, expected) in cases {
        let mut lexer = Lexer::new(input);
        assert_eq!(lexer.read_string(), expected, "Failed for input: {}", input);
    }
}

#[test]
fn test_unterminated_string_fails_at_end() {
    let mut lexer = Lexer::new("'never closed");
    assert_eq!(lexer.read_string(), None);
    assert_eq!(lexer.position(), 0);
    assert_eq!(lexer.furthest().0, 13);
}

// ============================================================================
// Numbers
// ============================================================================

#[test]
fn test_numbers() {
    let cases = vec![
        ("0", Some(("0", NumberKind::Integer))),
        ("42", Some(("42", NumberKind::Integer))),
        ("-7", Some(("-7", NumberKind::Integer))),
        ("3.14", Some(("3.14", NumberKind::Float))),
        ("-0.5", Some(("-0.5", NumberKind::Float))),
        ("1.", Some(("1", NumberKind::Integer))),
        ("012", Some(("0", NumberKind::Integer))),
        ("-", None),
        ("-x", None),
        (".5", None),
    ];

    for (input, expected) in cases {
        let mut lexer = Lexer::new(input);
        assert_eq!(lexer.read_number(), expected, "Failed for input: {}", input);
    }
}

// ============================================================================
// Keywords and literals
// ============================================================================

#[test]
fn test_keyword_ignores_case() {
    for input in ["between", "BETWEEN", "Between", "bEtWeEn"] {
        let mut lexer = Lexer::new(input);
        assert!(lexer.keyword("between"), "Failed for input: {}", input);
        assert!(lexer.is_eof());
    }
}

#[test]
fn test_keyword_needs_boundary() {
    let cases = vec![("and", true), ("and(", true), ("and ", true), ("android", false), ("and_x", false), ("and1", false)];

    for (input, expected) in cases {
        let mut lexer = Lexer::new(input);
        assert_eq!(lexer.keyword("and"), expected, "Failed for input: {}", input);
    }
}

#[test]
fn test_exact_keyword_is_case_sensitive() {
    assert!(Lexer::new("NULL").exact_keyword("NULL"));
    assert!(!Lexer::new("Null").exact_keyword("null"));
    assert!(!Lexer::new("Null").exact_keyword("NULL"));
}

#[test]
fn test_literal() {
    let mut lexer = Lexer::new("->name");
    assert!(!lexer.literal("."));
    assert!(lexer.literal("->"));
    assert_eq!(lexer.read_identifier(), Some("name"));
    assert!(lexer.eof());
}

// ============================================================================
// Whitespace
// ============================================================================

#[test]
fn test_required_whitespace() {
    let mut lexer = Lexer::new("is  \t\r\n not");
    assert!(lexer.keyword("is"));
    assert!(lexer.require_whitespace());
    assert!(lexer.keyword("not"));
    assert!(!lexer.require_whitespace());
}

#[test]
fn test_comment_at_end_of_input() {
    let mut lexer = Lexer::new("a // done");
    assert_eq!(lexer.read_identifier(), Some("a"));
    lexer.skip_whitespace();
    assert!(lexer.eof());
}

#[test]
fn test_single_dash_is_not_a_comment() {
    let mut lexer = Lexer::new(" -1");
    lexer.skip_whitespace();
    assert_eq!(lexer.position(), 1);
    assert_eq!(lexer.read_number(), Some(("-1", NumberKind::Integer)));
}

// ============================================================================
// Failure tracking
// ============================================================================

#[test]
fn test_furthest_failure_keeps_first_rule() {
    let mut lexer = Lexer::new("abc ?");
    lexer.enter("Outer");
    assert_eq!(lexer.read_identifier(), Some("abc"));
    lexer.skip_whitespace();
    lexer.enter("First");
    assert!(!lexer.literal("("));
    lexer.leave();
    lexer.enter("Second");
    assert!(!lexer.literal("["));
    lexer.leave();
    lexer.reset(0);
    assert!(!lexer.literal("x"));

    assert_eq!(lexer.furthest(), (4, "First"));
    assert_eq!(lexer.snippet(4), "?");
}

#[test]
fn test_snippet() {
    let lexer = Lexer::new("a = 1 and ???? next");
    assert_eq!(lexer.snippet(10), "????");
    assert_eq!(lexer.snippet(19), "end of input");
    assert_eq!(lexer.snippet(1), " ");
}

#[test]
fn test_position_counts_characters() {
    let input = "名前 = 1\nx";
    let offset = input.find('=').unwrap();
    assert_eq!(Position::locate(input, offset), Position { line: 1, column: 4 });
    assert_eq!(Position::locate(input, input.len()).to_string(), "line 2, column 2");
}
