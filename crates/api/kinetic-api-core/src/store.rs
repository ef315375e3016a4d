//! In-memory property store: named targets holding nested values.
//!
//! This is the simplest [`PropertyAccess`] implementation and the one used by
//! tests and headless drivers. Scene graphs provide their own.

use hashbrown::HashMap;
use serde_json::Value as JsonValue;

use crate::access::{assign, resolve, AccessError, PropertyAccess};
use crate::json::{parse_value, JsonError};
use crate::typed_path::PropertyPath;
use crate::value::Value;

#[derive(Debug, Default, Clone)]
pub struct PropertyStore {
    targets: HashMap<String, Value>,
}

impl PropertyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a JSON object of `target -> value` entries.
    pub fn from_json(json: JsonValue) -> Result<Self, JsonError> {
        let JsonValue::Object(obj) = json else {
            return Err(JsonError::Unsupported(
                "property store root must be an object".to_string(),
            ));
        };
        let mut store = Self::new();
        for (name, value) in obj {
            store.insert_target(name, parse_value(value)?);
        }
        Ok(store)
    }

    /// Insert or replace a target, returning the previous value if any.
    pub fn insert_target(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.targets.insert(name.into(), value)
    }

    pub fn target(&self, name: &str) -> Option<&Value> {
        self.targets.get(name)
    }

    pub fn target_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.targets.get_mut(name)
    }

    pub fn remove_target(&mut self, name: &str) -> Option<Value> {
        self.targets.remove(name)
    }

    /// Convenience read by path string, e.g. `store.get("circle.x")`.
    pub fn get(&self, path: &str) -> Option<Value> {
        let path = PropertyPath::parse(path).ok()?;
        self.read(&path)
    }

    /// Convenience read of a scalar by path string.
    pub fn get_f32(&self, path: &str) -> Option<f32> {
        self.get(path).and_then(|v| v.as_float())
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

impl PropertyAccess for PropertyStore {
    fn read(&self, path: &PropertyPath) -> Option<Value> {
        let root = self.targets.get(&path.target)?;
        resolve(root, &path.keys)
    }

    fn write(&mut self, path: &PropertyPath, value: Value) -> Result<(), AccessError> {
        let root = self
            .targets
            .get_mut(&path.target)
            .ok_or_else(|| AccessError::TargetNotFound(path.target.clone()))?;
        assign(root, path, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_json_builds_targets() {
        let store = PropertyStore::from_json(json!({
            "circle": { "x": 0, "fill": "#f00", "center": { "x": 1, "y": 2 } },
            "plot": { "values": [1, 2, 3] }
        }))
        .unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.get_f32("circle.x"), Some(0.0));
        assert_eq!(store.get("circle.center"), Some(Value::vec2(1.0, 2.0)));
        assert_eq!(store.get("circle.fill"), Some(Value::text("#f00")));
        assert_eq!(store.get_f32("plot.values.2"), Some(3.0));
    }

    #[test]
    fn write_requires_known_target() {
        let mut store = PropertyStore::new();
        let path = PropertyPath::parse("ghost.x").unwrap();
        assert_eq!(
            store.write(&path, Value::f(1.0)),
            Err(AccessError::TargetNotFound("ghost".into()))
        );
        store.insert_target("ghost", Value::record([("x", Value::f(0.0))]));
        store.write(&path, Value::f(1.0)).unwrap();
        assert_eq!(store.get_f32("ghost.x"), Some(1.0));
    }

    #[test]
    fn rejects_non_object_root() {
        assert!(PropertyStore::from_json(json!([1, 2])).is_err());
    }
}
