//! PropertyPath parsing and formatting.
//!
//! Grammar:
//!   namespace/.../target.key.subkey[.index]
//! - '/' separates namespace segments, which are part of the target handle
//! - The last '/'-separated segment holds the target name and one or more
//!   `.`-separated keys
//!   Examples:
//!   "circle.position.x" -> target="circle", keys=["position","x"]
//!   "scene/plot.points.3" -> target="scene/plot", keys=["points","3"]
//!
//! A path always names at least one key; a bare target is not animatable.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Target handle of the reserved phantom binding.
pub const PHANTOM_TARGET: &str = "@phantom";
const PHANTOM_KEY: &str = "time";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertyPath {
    /// Target handle, including any namespace prefix
    pub target: String,
    /// Ordered key selectors on the target (never empty)
    pub keys: Vec<String>,
}

fn has_whitespace(s: &str) -> bool {
    s.chars().any(char::is_whitespace)
}

impl PropertyPath {
    /// Construct a path from components. Returns `None` when `keys` is empty.
    pub fn new(target: impl Into<String>, keys: Vec<String>) -> Option<Self> {
        if keys.is_empty() {
            return None;
        }
        Some(Self {
            target: target.into(),
            keys,
        })
    }

    /// The reserved binding with no backing value. Tweens bound to it only
    /// drive time (progress/completion events) and never read or write.
    pub fn phantom() -> Self {
        Self {
            target: PHANTOM_TARGET.to_string(),
            keys: vec![PHANTOM_KEY.to_string()],
        }
    }

    #[inline]
    pub fn is_phantom(&self) -> bool {
        self.target == PHANTOM_TARGET
    }

    /// Parse a path string according to the grammar described above.
    pub fn parse(s: &str) -> Result<Self, String> {
        if s.is_empty() {
            return Err("empty path".to_string());
        }
        let mut parts: Vec<&str> = s.split('/').collect();
        if parts.iter().any(|seg| seg.is_empty()) {
            return Err("invalid property path: empty namespace segment".to_string());
        }
        let last = match parts.pop() {
            Some(last) => last,
            None => return Err("invalid property path".to_string()),
        };
        let mut last_parts = last.split('.');
        let name = last_parts.next().unwrap_or_default();
        if name.is_empty() {
            return Err("invalid property path: empty target name".to_string());
        }
        let keys: Vec<String> = last_parts.map(|k| k.to_string()).collect();
        if keys.is_empty() {
            return Err(format!("property path '{s}' names no key"));
        }
        if keys.iter().any(|k| k.is_empty()) {
            return Err("invalid property path: empty key segment".to_string());
        }
        if has_whitespace(s) {
            return Err("invalid property path: contains whitespace".to_string());
        }

        parts.push(name);
        Ok(PropertyPath {
            target: parts.join("/"),
            keys,
        })
    }

    /// Return the target handle of the path.
    pub fn target_name(&self) -> &str {
        &self.target
    }

    /// Iterate over key selectors on the target.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(|s| s.as_str())
    }

    /// The last key, i.e. the field actually written.
    pub fn leaf_key(&self) -> &str {
        self.keys.last().map(|s| s.as_str()).unwrap_or_default()
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.target, self.keys.join("."))
    }
}

impl FromStr for PropertyPath {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PropertyPath::parse(s)
    }
}

// Serde support: serialize as string, deserialize from string
impl Serialize for PropertyPath {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for PropertyPath {
    fn deserialize<D>(deserializer: D) -> Result<PropertyPath, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        PropertyPath::parse(&s).map_err(de::Error::custom)
    }
}
