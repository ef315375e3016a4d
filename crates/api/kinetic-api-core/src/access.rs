//! Property access: the read/write capability animation drivers use to reach
//! target fields.
//!
//! Reads and writes share one resolution walk over nested values:
//! - `Record` members are addressed by name
//! - `List` items are addressed by decimal index
//! - `Vec2` components are addressed by `x` / `y`

use thiserror::Error;

use crate::typed_path::PropertyPath;
use crate::value::Value;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    #[error("target '{0}' not found")]
    TargetNotFound(String),
    #[error("key '{key}' not found on '{path}'")]
    KeyNotFound { path: String, key: String },
    #[error("cannot write {found} into '{path}'")]
    TypeMismatch { path: String, found: String },
}

/// Get/set capability over a graph of targets.
///
/// Adapters (scene graphs, ECS worlds, plain stores) implement this and pass
/// it into timeline/tween evaluation.
pub trait PropertyAccess {
    fn read(&self, path: &PropertyPath) -> Option<Value>;
    fn write(&mut self, path: &PropertyPath, value: Value) -> Result<(), AccessError>;
}

fn key_error(path: &PropertyPath, key: &str) -> AccessError {
    AccessError::KeyNotFound {
        path: path.to_string(),
        key: key.to_string(),
    }
}

fn step<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    match value {
        Value::Record(map) => map.get(key),
        Value::List(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    }
}

fn step_mut<'a>(value: &'a mut Value, key: &str) -> Option<&'a mut Value> {
    match value {
        Value::Record(map) => map.get_mut(key),
        Value::List(items) => key.parse::<usize>().ok().and_then(|i| items.get_mut(i)),
        _ => None,
    }
}

#[inline]
fn component_index(key: &str) -> Option<usize> {
    match key {
        "x" => Some(0),
        "y" => Some(1),
        _ => None,
    }
}

/// Resolve `keys` against `root`, returning an owned value.
pub fn resolve(root: &Value, keys: &[String]) -> Option<Value> {
    let (leaf, parents) = keys.split_last()?;
    let mut current = root;
    for key in parents {
        current = step(current, key)?;
    }
    match current {
        Value::Vec2(v) => component_index(leaf).map(|i| Value::Float(v[i])),
        other => step(other, leaf).cloned(),
    }
}

/// Write `value` at `keys` under `root`. Every key must already exist: writes
/// never create structure.
pub fn assign(
    root: &mut Value,
    path: &PropertyPath,
    value: Value,
) -> Result<(), AccessError> {
    let Some((leaf, parents)) = path.keys.split_last() else {
        return Err(key_error(path, ""));
    };
    let mut current = root;
    for key in parents {
        current = step_mut(current, key).ok_or_else(|| key_error(path, key))?;
    }
    if let Value::Vec2(v) = current {
        let i = component_index(leaf).ok_or_else(|| key_error(path, leaf))?;
        return match value {
            Value::Float(f) => {
                v[i] = f;
                Ok(())
            }
            other => Err(AccessError::TypeMismatch {
                path: path.to_string(),
                found: format!("{:?}", other.kind()),
            }),
        };
    }
    let slot = step_mut(current, leaf).ok_or_else(|| key_error(path, leaf))?;
    *slot = value;
    Ok(())
}
