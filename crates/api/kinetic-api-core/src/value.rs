//! Value: raw property values held by animation targets.
//! All numeric types use f32.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Ordered key → value mapping used by [`Value::Record`].
pub type RecordMap = IndexMap<String, Value>;

/// Coarse kind of a raw value, useful for quick dispatch and error messages.
/// This is not the interpolation category; see [`crate::shape::Category`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    Float,
    Bool,
    Vec2,
    Text,
    List,
    Record,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum Value {
    /// Scalar float
    Float(f32),

    /// Boolean (never interpolated)
    Bool(bool),

    /// 2D vector (x, y)
    Vec2([f32; 2]),

    /// Text; color strings such as `#ff0000` or `rgba(0, 0, 0, 0.5)` animate
    Text(String),

    /// Ordered list of values
    List(Vec<Value>),

    /// Keyed record with a stable key order
    Record(RecordMap),
}

impl Value {
    /// Return the coarse kind of this value.
    #[inline]
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Float(_) => ValueKind::Float,
            Value::Bool(_) => ValueKind::Bool,
            Value::Vec2(_) => ValueKind::Vec2,
            Value::Text(_) => ValueKind::Text,
            Value::List(_) => ValueKind::List,
            Value::Record(_) => ValueKind::Record,
        }
    }

    /// Convenience constructors
    pub fn f(v: f32) -> Self {
        Value::Float(v)
    }

    pub fn vec2(x: f32, y: f32) -> Self {
        Value::Vec2([x, y])
    }

    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    pub fn list(items: impl IntoIterator<Item = Value>) -> Self {
        Value::List(items.into_iter().collect())
    }

    pub fn record<K: Into<String>>(pairs: impl IntoIterator<Item = (K, Value)>) -> Self {
        Value::Record(pairs.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    #[inline]
    pub fn as_float(&self) -> Option<f32> {
        match self {
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    pub fn as_record(&self) -> Option<&RecordMap> {
        match self {
            Value::Record(map) => Some(map),
            _ => None,
        }
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v)
    }
}

/// Narrowing conversion so bare float literals work with `impl Into<Value>`.
impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v as f32)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<[f32; 2]> for Value {
    fn from(v: [f32; 2]) -> Self {
        Value::Vec2(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_uses_tagged_form() {
        let v = Value::vec2(1.0, 2.0);
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "vec2", "data": [1.0, 2.0] }));
        let back: Value = serde_json::from_value(json).unwrap();
        assert_eq!(back, v);
    }

    #[test]
    fn record_keeps_insertion_order() {
        let v = Value::record([("b", Value::f(1.0)), ("a", Value::f(2.0))]);
        let keys: Vec<&str> = v.as_record().unwrap().keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["b", "a"]);
        assert_eq!(v.kind(), ValueKind::Record);
    }
}
