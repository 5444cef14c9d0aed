//! Tree -> JSON conversion utilities

use serde_json::{Map, Number, json};

use crate::{Node, Value};

/// Convert a literal to serde_json::Value
///
/// Decimals become JSON numbers with their exact digits.
pub fn value_to_json(v: &Value) -> serde_json::Value {
    match v {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Int(i) => serde_json::Value::Number((*i).into()),
        Value::Float(d) => {
            let text = d.to_string();
            match text.parse::<Number>() {
                Ok(n) => serde_json::Value::Number(n),
                Err(_) => serde_json::Value::String(text),
            }
        }
        Value::String(s) => serde_json::Value::String(s.clone()),
        Value::Array(arr) => serde_json::Value::Array(arr.iter().map(value_to_json).collect()),
    }
}

/// Convert a tree to `{"type": <kind>, ...}` objects
pub fn node_to_json(node: &Node) -> serde_json::Value {
    let mut obj = Map::new();
    obj.insert("type".to_string(), json!(node.kind()));

    match node {
        Node::Value(v) => {
            obj.insert("value_type".to_string(), json!(v.kind()));
            obj.insert("value".to_string(), value_to_json(v));
        }
        Node::Operation(op) => {
            obj.insert("operation".to_string(), json!(op.code()));
        }
        Node::Identifier(name) => {
            obj.insert("name".to_string(), json!(name));
        }
        Node::Reference(r) => {
            let accessors: Vec<&str> = r.segments.iter().map(|(a, _)| a.as_str()).collect();
            obj.insert("names".to_string(), json!(r.names().collect::<Vec<_>>()));
            obj.insert("accessors".to_string(), json!(accessors));
        }
        Node::Compare { left, op, right } | Node::Logic { left, op, right } => {
            obj.insert("left".to_string(), node_to_json(left));
            obj.insert("op".to_string(), json!(op.code()));
            obj.insert("right".to_string(), node_to_json(right));
        }
        Node::Predicate { left, op } => {
            obj.insert("left".to_string(), node_to_json(left));
            obj.insert("op".to_string(), json!(op.code()));
        }
        Node::Not(inner) | Node::Parentheses(inner) => {
            obj.insert("expression".to_string(), node_to_json(inner));
        }
        Node::Between {
            left,
            op,
            low,
            high,
        } => {
            obj.insert("left".to_string(), node_to_json(left));
            obj.insert("op".to_string(), json!(op.code()));
            obj.insert(
                "params".to_string(),
                json!([node_to_json(low), node_to_json(high)]),
            );
        }
        Node::Function { name, params } => {
            obj.insert("name".to_string(), json!(name));
            obj.insert(
                "params".to_string(),
                serde_json::Value::Array(params.iter().map(node_to_json).collect()),
            );
        }
    }

    serde_json::Value::Object(obj)
}
