/// Combines independent filter strings into one query.
///
/// Each non-blank entry is wrapped in parentheses and the results are
/// joined with ` and `. A single entry is returned verbatim, even when it
/// is blank.
///
/// # Examples
///
/// ```
/// use miniquery::join;
///
/// assert_eq!(join::<&str>(&[]), "");
/// assert_eq!(join(&["a = 1"]), "a = 1");
/// assert_eq!(join(&["a = 1", " ", "b or c"]), "(a = 1) and (b or c)");
/// ```
pub fn join<S: AsRef<str>>(queries: &[S]) -> String {
    match queries {
        [] => String::new(),
        [only] => only.as_ref().to_string(),
        _ => {
            let mut out = String::new();
            for query in queries.iter().map(AsRef::as_ref) {
                if query.trim().is_empty() {
                    continue;
                }
                if !out.is_empty() {
                    out.push_str(" and ");
                }
                out.push('(');
                out.push_str(query);
                out.push(')');
            }
            out
        }
    }
}

#[test]
fn test_join() {
    let cases: Vec<(Vec<&str>, &str)> = vec![
        (vec![], ""),
        (vec!["1=1"], "1=1"),
        (vec!["  "], "  "),
        (vec!["1=1", "2=2"], "(1=1) and (2=2)"),
        (vec!["", "1=1", "\t", "2=2"], "(1=1) and (2=2)"),
        (vec!["", " "], ""),
    ];

    for (input, expected) in cases {
        assert_eq!(join(&input), expected, "Failed for input: {:?}", input);
    }
}

#[test]
fn test_join_accepts_owned_strings() {
    let filters = vec!["a > 1".to_string(), "b in [1]".to_string()];
    assert_eq!(join(&filters), "(a > 1) and (b in [1])");
}
