//! JSON shorthand for raw values.
//!
//! Targets are usually described as plain JSON documents:
//!   { "x": 0, "center": { "x": 1, "y": 2 }, "fill": "#f00", "data": [1, 2] }
//! `parse_value` maps that shorthand onto [`Value`]; `to_json` is the inverse.
//! The tagged `{ "type": ..., "data": ... }` form produced by the serde derives
//! on `Value` is also accepted.

use serde_json::{Map, Value as JsonValue};
use thiserror::Error;

use crate::value::{RecordMap, Value};

#[derive(Debug, Error)]
pub enum JsonError {
    #[error("null is not a property value")]
    Null,
    #[error("number {0} is not representable as f32")]
    Number(String),
    #[error("unsupported json: {0}")]
    Unsupported(String),
    #[error("tagged value: {0}")]
    Tagged(#[from] serde_json::Error),
}

fn is_tagged(obj: &Map<String, JsonValue>) -> bool {
    obj.len() == 2
        && obj.contains_key("data")
        && obj
            .get("type")
            .and_then(|t| t.as_str())
            .is_some_and(|t| matches!(t, "float" | "bool" | "vec2" | "text" | "list" | "record"))
}

fn as_vec2(obj: &Map<String, JsonValue>) -> Option<[f32; 2]> {
    if obj.len() != 2 {
        return None;
    }
    let x = obj.get("x")?.as_f64()?;
    let y = obj.get("y")?.as_f64()?;
    Some([x as f32, y as f32])
}

/// Convert shorthand JSON into a [`Value`].
pub fn parse_value(value: JsonValue) -> Result<Value, JsonError> {
    match value {
        JsonValue::Null => Err(JsonError::Null),
        JsonValue::Bool(b) => Ok(Value::Bool(b)),
        JsonValue::Number(n) => n
            .as_f64()
            .map(|f| Value::Float(f as f32))
            .ok_or_else(|| JsonError::Number(n.to_string())),
        JsonValue::String(s) => Ok(Value::Text(s)),
        JsonValue::Array(items) => items
            .into_iter()
            .map(parse_value)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::List),
        JsonValue::Object(obj) => {
            if is_tagged(&obj) {
                return Ok(serde_json::from_value(JsonValue::Object(obj))?);
            }
            if let Some(v) = as_vec2(&obj) {
                return Ok(Value::Vec2(v));
            }
            let mut map = RecordMap::with_capacity(obj.len());
            for (key, val) in obj {
                map.insert(key, parse_value(val)?);
            }
            Ok(Value::Record(map))
        }
    }
}

/// Convert a [`Value`] back into shorthand JSON.
pub fn to_json(value: &Value) -> JsonValue {
    match value {
        Value::Float(f) => JsonValue::from(*f as f64),
        Value::Bool(b) => JsonValue::Bool(*b),
        Value::Vec2([x, y]) => {
            let mut obj = Map::new();
            obj.insert("x".to_string(), JsonValue::from(*x as f64));
            obj.insert("y".to_string(), JsonValue::from(*y as f64));
            JsonValue::Object(obj)
        }
        Value::Text(s) => JsonValue::String(s.clone()),
        Value::List(items) => JsonValue::Array(items.iter().map(to_json).collect()),
        Value::Record(map) => JsonValue::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), to_json(v)))
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn shorthand_maps_to_values() {
        let v = parse_value(json!({
            "x": 1.5,
            "center": { "x": 0, "y": 2 },
            "fill": "#fff",
            "visible": true,
            "points": [{ "x": 0, "y": 0 }, { "x": 1, "y": 1 }]
        }))
        .unwrap();
        let expected = Value::record([
            ("x", Value::f(1.5)),
            ("center", Value::vec2(0.0, 2.0)),
            ("fill", Value::text("#fff")),
            ("visible", Value::Bool(true)),
            (
                "points",
                Value::list([Value::vec2(0.0, 0.0), Value::vec2(1.0, 1.0)]),
            ),
        ]);
        assert_eq!(v, expected);
    }

    #[test]
    fn objects_with_extra_keys_stay_records() {
        let v = parse_value(json!({ "x": 0, "y": 1, "z": 2 })).unwrap();
        assert_eq!(v.as_record().map(|m| m.len()), Some(3));
    }

    #[test]
    fn accepts_tagged_form() {
        let v = parse_value(json!({ "type": "vec2", "data": [3.0, 4.0] })).unwrap();
        assert_eq!(v, Value::vec2(3.0, 4.0));
    }

    #[test]
    fn null_is_rejected() {
        assert!(matches!(parse_value(json!(null)), Err(JsonError::Null)));
        assert!(matches!(
            parse_value(json!({ "a": null })),
            Err(JsonError::Null)
        ));
    }

    #[test]
    fn to_json_inverts_parse() {
        let src = json!({ "pos": { "x": 1.0, "y": 2.0 }, "data": [1.0, 2.0], "c": "#000" });
        let v = parse_value(src.clone()).unwrap();
        assert_eq!(to_json(&v), src);
    }
}
