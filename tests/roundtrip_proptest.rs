//! Property-based tests for canonical rendering
//!
//! Any query the grammar accepts must render to text that parses back into
//! the same tree, in both operator styles.

use miniquery::{parse, render, render_symbolic};
use proptest::prelude::*;
use proptest::sample::select;

const COMPARE_OPS: &[&str] = &[
    ">", ">=", "<", "<=", "=", "==", "!=", "<>", "gt", "GTE", "lt", "lte", "eq", "NEQ", "like", "not like",
];
const IN_OPS: &[&str] = &["in", "IN", "not in"];
const BETWEEN_OPS: &[&str] = &["between", "not between", "NOT BETWEEN"];
const MATCH_OPS: &[&str] = &[
    "is null",
    "is not null",
    "IS TRUE",
    "is not true",
    "is false",
    "is not false",
    "isnull",
    "notnull",
    "not null",
];
const LOGIC_OPS: &[&str] = &["and", "or", "AND", "Or", "&&", "||"];
const WORD_LITERALS: &[&str] = &["true", "TRUE", "false", "FALSE", "null", "NULL"];

/// Identifiers always contain `_`, so they never collide with keywords.
fn identifier_strategy() -> impl Strategy<Value = String> {
    "[a-z]{1,3}_[a-z0-9]{0,4}"
}

fn literal_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        any::<i64>().prop_map(|n| n.to_string()),
        (-9999i64..9999, 0u32..1000).prop_map(|(i, f)| format!("{}.{:03}", i, f)),
        "[a-zA-Z0-9 %_-]{0,8}".prop_map(|s| format!("'{}'", s)),
        "[a-z' ]{0,6}".prop_map(|s| format!("\"{}\"", s)),
        select(WORD_LITERALS).prop_map(String::from),
    ]
}

fn operand_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        literal_strategy(),
        identifier_strategy(),
        (identifier_strategy(), identifier_strategy()).prop_map(|(a, b)| format!("{}.{}", a, b)),
        (identifier_strategy(), identifier_strategy()).prop_map(|(a, b)| format!("{}->{}", a, b)),
        (
            identifier_strategy(),
            prop::collection::vec(prop_oneof![literal_strategy(), identifier_strategy()], 0..3)
        )
            .prop_map(|(name, args)| format!("{}({})", name, args.join(", "))),
    ]
}

fn condition_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        (operand_strategy(), select(COMPARE_OPS), operand_strategy())
            .prop_map(|(l, op, r)| format!("{} {} {}", l, op, r)),
        (
            operand_strategy(),
            select(IN_OPS),
            prop::collection::vec(literal_strategy(), 0..4)
        )
            .prop_map(|(l, op, items)| format!("{} {} ({})", l, op, items.join(", "))),
        (
            operand_strategy(),
            select(BETWEEN_OPS),
            literal_strategy(),
            literal_strategy()
        )
            .prop_map(|(l, op, low, high)| format!("{} {} {} and {}", l, op, low, high)),
        (operand_strategy(), select(MATCH_OPS)).prop_map(|(l, op)| format!("{} {}", l, op)),
    ]
}

fn query_strategy() -> impl Strategy<Value = String> {
    condition_strategy().prop_recursive(3, 16, 2, |inner| {
        prop_oneof![
            (inner.clone(), select(LOGIC_OPS), inner.clone())
                .prop_map(|(l, op, r)| format!("{} {} {}", l, op, r)),
            inner.clone().prop_map(|q| format!("( {} )", q)),
            inner.prop_map(|q| format!("not ({})", q)),
        ]
    })
}

#[cfg(test)]
mod proptest_tests {
    use super::*;

    proptest! {
        #[test]
        fn test_render_round_trip(query in query_strategy()) {
            let first = parse(&query);
            prop_assert!(first.is_ok(), "Failed to parse: {}: {:?}", query, first);
            let first = first.unwrap();

            let text = render(&first);
            let second = parse(&text);
            prop_assert!(second.is_ok(), "Failed to re-parse: {} -> {}", query, text);
            prop_assert_eq!(&first, &second.unwrap());

            let symbolic = render_symbolic(&first);
            let third = parse(&symbolic);
            prop_assert!(third.is_ok(), "Failed to re-parse: {} -> {}", query, symbolic);
            prop_assert_eq!(&first, &third.unwrap());
        }

        #[test]
        fn test_render_is_a_fixed_point(query in query_strategy()) {
            let text = render(&parse(&query).unwrap());
            prop_assert_eq!(render(&parse(&text).unwrap()), text);
        }
    }
}
