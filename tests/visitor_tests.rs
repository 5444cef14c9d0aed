// tests/visitor_tests.rs

use miniquery::visitor::{Visitor, walk_binary, walk_params};
use miniquery::{Node, Operation, Reference, Value, parse};

/// Records every callback in order.
#[derive(Default)]
struct Recorder {
    events: Vec<String>,
}

impl Visitor for Recorder {
    type Error = ();

    fn visit_value(&mut self, value: &Value) -> Result<(), ()> {
        self.events.push(format!("value {}", value.kind()));
        miniquery::visitor::walk_value(self, value)
    }

    fn visit_operation(&mut self, op: &Operation) -> Result<(), ()> {
        self.events.push(format!("op {}", op.code()));
        Ok(())
    }

    fn visit_identifier(&mut self, name: &str) -> Result<(), ()> {
        self.events.push(format!("id {}", name));
        Ok(())
    }

    fn visit_reference(&mut self, reference: &Reference) -> Result<(), ()> {
        let names: Vec<&str> = reference.names().collect();
        self.events.push(format!("ref {}", names.join("/")));
        Ok(())
    }

    fn visit_not(&mut self, inner: &Node) -> Result<(), ()> {
        self.events.push("not".to_string());
        self.visit(inner)
    }

    fn visit_parentheses(&mut self, inner: &Node) -> Result<(), ()> {
        self.events.push("(".to_string());
        self.visit(inner)?;
        self.events.push(")".to_string());
        Ok(())
    }

    fn visit_function(&mut self, name: &str, params: &[Node]) -> Result<(), ()> {
        self.events.push(format!("call {}", name));
        walk_params(self, params)
    }
}

fn record(input: &str) -> Vec<String> {
    let root = parse(input).unwrap_or_else(|e| panic!("Failed for input: {}: {}", input, e));
    let mut recorder = Recorder::default();
    recorder.visit(&root).unwrap();
    recorder.events
}

// ============================================================================
// Traversal order
// ============================================================================

#[test]
fn test_logic_and_compare_order() {
    assert_eq!(
        record("a > 1 or profile.age <= 2"),
        vec!["id a", "op gt", "value int", "op or", "ref profile/age", "op lte", "value int"]
    );
}

#[test]
fn test_predicate_order() {
    assert_eq!(record("deleted_at is not null"), vec!["id deleted_at", "op is not null"]);
}

#[test]
fn test_between_order() {
    assert_eq!(
        record("age between [10, 'x']"),
        vec!["id age", "op between", "value int", "value string"]
    );
}

#[test]
fn test_wrappers_and_functions() {
    assert_eq!(
        record("not (f(a, [1, 2]) = 3)"),
        vec![
            "not",
            "(",
            "call f",
            "id a",
            "value array",
            "value int",
            "value int",
            "op eq",
            "value int",
            ")",
        ]
    );
}

#[test]
fn test_default_hooks_walk_everything() {
    // Counts identifiers only; every other hook keeps its default.
    struct Count(usize);

    impl Visitor for Count {
        type Error = std::convert::Infallible;

        fn visit_identifier(&mut self, _name: &str) -> Result<(), Self::Error> {
            self.0 += 1;
            Ok(())
        }
    }

    let root = parse("not (a = 1) and f(b, g(c)) or d between 1 and 2 or e is null").unwrap();
    let mut count = Count(0);
    count.visit(&root).unwrap();
    assert_eq!(count.0, 5);
}

// ============================================================================
// Overrides and errors
// ============================================================================

#[test]
fn test_override_can_reorder_children() {
    // Emits binary expressions in prefix form.
    #[derive(Default)]
    struct Prefix(String);

    impl Visitor for Prefix {
        type Error = ();

        fn visit_compare(&mut self, left: &Node, op: &Operation, right: &Node) -> Result<(), ()> {
            self.0.push_str(op.code());
            self.0.push('(');
            self.visit(left)?;
            self.0.push(',');
            self.visit(right)?;
            self.0.push(')');
            Ok(())
        }

        fn visit_logic(&mut self, left: &Node, op: &Operation, right: &Node) -> Result<(), ()> {
            self.visit_compare(left, op, right)
        }

        fn visit_identifier(&mut self, name: &str) -> Result<(), ()> {
            self.0.push_str(name);
            Ok(())
        }

        fn visit_value(&mut self, value: &Value) -> Result<(), ()> {
            if let Some(n) = value.as_int() {
                self.0.push_str(&n.to_string());
            }
            Ok(())
        }
    }

    let root = parse("a = 1 and b > 2").unwrap();
    let mut prefix = Prefix::default();
    prefix.visit(&root).unwrap();
    assert_eq!(prefix.0, "and(eq(a,1),gt(b,2))");
}

#[test]
fn test_walk_functions_are_reusable() {
    // Wraps the default binary traversal in brackets.
    #[derive(Default)]
    struct Bracket(Vec<String>);

    impl Visitor for Bracket {
        type Error = ();

        fn visit_logic(&mut self, left: &Node, op: &Operation, right: &Node) -> Result<(), ()> {
            self.0.push("[".to_string());
            walk_binary(self, left, op, right)?;
            self.0.push("]".to_string());
            Ok(())
        }

        fn visit_operation(&mut self, op: &Operation) -> Result<(), ()> {
            self.0.push(op.code().to_string());
            Ok(())
        }
    }

    let root = parse("a or b and c").unwrap();
    let mut bracket = Bracket::default();
    bracket.visit(&root).unwrap();
    assert_eq!(bracket.0, vec!["[", "[", "or", "]", "and", "]"]);
}

#[test]
fn test_error_stops_traversal() {
    #[derive(Default)]
    struct RejectStrings {
        seen: usize,
    }

    impl Visitor for RejectStrings {
        type Error = String;

        fn visit_value(&mut self, value: &Value) -> Result<(), String> {
            self.seen += 1;
            match value {
                Value::String(s) => Err(format!("string not allowed: {}", s)),
                _ => Ok(()),
            }
        }
    }

    let root = parse("f(1, 'x', 2, 'y')").unwrap();
    let mut visitor = RejectStrings::default();
    assert_eq!(visitor.visit(&root), Err("string not allowed: x".to_string()));
    assert_eq!(visitor.seen, 2);
}
