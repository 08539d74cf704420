//! Template helper functions
//!
//! - `arr(a, b, ...)` builds a list from its arguments.
//! - `dict(k1, v1, k2, v2, ...)` builds a map. A key is either a string or a
//!   list of strings naming a path into nested maps, so
//!   `dict(["a", "b"], 1, "c", 2)` yields `{"a": {"b": 1}, "c": 2}`.

use std::collections::BTreeMap;

use minijinja::value::{Rest, Value, ValueKind};
use minijinja::{Environment, Error, ErrorKind};

use relnote_core::error::RenderError;

/// Build a list from the given values
pub fn arr(values: Vec<Value>) -> Value {
    Value::from(values)
}

/// Build a (possibly nested) map from interleaved key/value pairs
pub fn dict(values: Vec<Value>) -> Result<Value, RenderError> {
    if values.len() % 2 != 0 {
        return Err(RenderError::InvalidMappingArity(values.len()));
    }

    let mut root = BTreeMap::new();
    let mut pairs = values.into_iter();
    while let (Some(key), Some(value)) = (pairs.next(), pairs.next()) {
        let path = key_path(&key)?;
        insert(&mut root, &path, value)?;
    }

    Ok(branch_value(root))
}

/// Register `arr` and `dict` with a template environment
pub fn register(env: &mut Environment<'_>) {
    env.add_function("arr", |values: Rest<Value>| arr(values.0));
    env.add_function("dict", |values: Rest<Value>| {
        dict(values.0)
            .map_err(|e| Error::new(ErrorKind::InvalidOperation, e.to_string()).with_source(e))
    });
}

fn key_path(key: &Value) -> Result<Vec<String>, RenderError> {
    let invalid = || RenderError::InvalidMappingKey(key.to_string());

    match key.kind() {
        ValueKind::String => Ok(vec![key.as_str().ok_or_else(invalid)?.to_string()]),
        ValueKind::Seq => {
            let path = key
                .try_iter()
                .map_err(|_| invalid())?
                .map(|segment| segment.as_str().map(str::to_string).ok_or_else(invalid))
                .collect::<Result<Vec<_>, _>>()?;
            if path.is_empty() {
                return Err(invalid());
            }
            Ok(path)
        }
        _ => Err(invalid()),
    }
}

enum Node {
    Leaf(Value),
    Branch(BTreeMap<String, Node>),
}

impl Node {
    fn into_value(self) -> Value {
        match self {
            Node::Leaf(value) => value,
            Node::Branch(children) => branch_value(children),
        }
    }
}

/// Set `value` at `path`, creating intermediate maps as needed
fn insert(
    children: &mut BTreeMap<String, Node>,
    path: &[String],
    value: Value,
) -> Result<(), RenderError> {
    match path {
        [] => Ok(()),
        [last] => {
            children.insert(last.clone(), Node::Leaf(value));
            Ok(())
        }
        [head, rest @ ..] => {
            let child = children
                .entry(head.clone())
                .or_insert_with(|| Node::Branch(BTreeMap::new()));
            match child {
                Node::Branch(grandchildren) => insert(grandchildren, rest, value),
                Node::Leaf(_) => Err(RenderError::InvalidMappingKey(format!(
                    "'{}' already holds a value and cannot be nested into",
                    head
                ))),
            }
        }
    }
}

fn branch_value(children: BTreeMap<String, Node>) -> Value {
    let map: BTreeMap<String, Value> = children
        .into_iter()
        .map(|(key, node)| (key, node.into_value()))
        .collect();
    Value::from_serialize(&map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn to_json(value: &Value) -> serde_json::Value {
        serde_json::to_value(value).unwrap()
    }

    #[test]
    fn test_arr() {
        let list = arr(vec![Value::from(1), Value::from("two")]);
        assert_eq!(to_json(&list), json!([1, "two"]));
        assert_eq!(to_json(&arr(vec![])), json!([]));
    }

    #[test]
    fn test_dict_flat() {
        let map = dict(vec![
            Value::from("a"),
            Value::from(1),
            Value::from("b"),
            Value::from("x"),
        ])
        .unwrap();
        assert_eq!(to_json(&map), json!({ "a": 1, "b": "x" }));
    }

    #[test]
    fn test_dict_nested_path() {
        let map = dict(vec![
            Value::from(vec!["a", "b"]),
            Value::from(1),
            Value::from("c"),
            Value::from(2),
        ])
        .unwrap();
        assert_eq!(to_json(&map), json!({ "a": { "b": 1 }, "c": 2 }));
    }

    #[test]
    fn test_dict_paths_share_prefix() {
        let map = dict(vec![
            Value::from(vec!["links", "issue"]),
            Value::from("#1"),
            Value::from(vec!["links", "ticket"]),
            Value::from("FTI-1"),
        ])
        .unwrap();
        assert_eq!(
            to_json(&map),
            json!({ "links": { "issue": "#1", "ticket": "FTI-1" } })
        );
    }

    #[test]
    fn test_dict_later_key_wins() {
        let map = dict(vec![
            Value::from("a"),
            Value::from(1),
            Value::from("a"),
            Value::from(2),
        ])
        .unwrap();
        assert_eq!(to_json(&map), json!({ "a": 2 }));
    }

    #[test]
    fn test_dict_empty() {
        assert_eq!(to_json(&dict(vec![]).unwrap()), json!({}));
    }

    #[test]
    fn test_dict_odd_arity() {
        let err = dict(vec![Value::from("a"), Value::from(1), Value::from("b")]).unwrap_err();
        assert!(matches!(err, RenderError::InvalidMappingArity(3)));
    }

    #[test]
    fn test_dict_invalid_keys() {
        for key in [Value::from(1), Value::from(true), Value::from(vec![Value::from(1)])] {
            let err = dict(vec![key, Value::from("v")]).unwrap_err();
            assert!(matches!(err, RenderError::InvalidMappingKey(_)));
        }

        let empty_path =
            dict(vec![Value::from(Vec::<Value>::new()), Value::from("v")]).unwrap_err();
        assert!(matches!(empty_path, RenderError::InvalidMappingKey(_)));
    }

    #[test]
    fn test_dict_cannot_nest_into_value() {
        let err = dict(vec![
            Value::from("a"),
            Value::from(1),
            Value::from(vec!["a", "b"]),
            Value::from(2),
        ])
        .unwrap_err();
        assert!(matches!(err, RenderError::InvalidMappingKey(_)));
    }

    #[test]
    fn test_helpers_in_template() {
        let mut env = Environment::new();
        register(&mut env);

        let out = env
            .render_str(
                r#"{% set d = dict(["a", "b"], 1, "c", 2) %}{{ d.a.b }}-{{ d.c }}-{{ arr(1, 2, 3)|length }}"#,
                minijinja::context! {},
            )
            .unwrap();
        assert_eq!(out, "1-2-3");
    }
}
