//! Error types for tweens and timelines.

use kinetic_api_core::AccessError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures local to a single tween. Schedulers report these as events and
/// keep evaluating sibling tweens.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum TweenError {
    /// The binding resolved to no value when the tween started.
    #[error("property not found: {path}")]
    PropertyNotFound { path: String },

    /// Neither endpoint classifies, or they classify differently.
    #[error("unsupported value type: {detail}")]
    UnsupportedValueType { detail: String },

    /// List lengths or record members are incompatible.
    #[error("shape mismatch: {detail}")]
    ShapeMismatch { detail: String },

    /// Duration must be finite and strictly positive.
    #[error("invalid duration: {duration}")]
    InvalidDuration { duration: f32 },

    /// Progress was driven before a successful `start()`.
    #[error("tween bound to {path} has not been started")]
    NotStarted { path: String },

    /// Writing the interpolated value back failed.
    #[error("write to {path} failed: {reason}")]
    Access { path: String, reason: String },
}

impl TweenError {
    pub(crate) fn access(path: &impl ToString, err: AccessError) -> Self {
        Self::Access {
            path: path.to_string(),
            reason: err.to_string(),
        }
    }

    /// Error category for logging.
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::PropertyNotFound { .. } | Self::Access { .. } => "binding",
            Self::UnsupportedValueType { .. } | Self::ShapeMismatch { .. } => "value",
            Self::InvalidDuration { .. } => "construction",
            Self::NotStarted { .. } => "lifecycle",
        }
    }
}

/// Caller errors rejected synchronously when composing a timeline.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TimelineError {
    #[error("start time must be finite and >= 0, got {0}")]
    InvalidStartTime(f32),
    #[error("gap must be finite, got {0}")]
    InvalidGap(f32),
}

pub type Result<T, E = TweenError> = core::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories() {
        let e = TweenError::PropertyNotFound { path: "a.b".into() };
        assert_eq!(e.category(), "binding");
        assert_eq!(e.to_string(), "property not found: a.b");
        let e = TweenError::InvalidDuration { duration: 0.0 };
        assert_eq!(e.category(), "construction");
    }

    #[test]
    fn access_errors_carry_path() {
        let e = TweenError::access(&"c.x", AccessError::TargetNotFound("c".into()));
        assert_eq!(
            e,
            TweenError::Access {
                path: "c.x".into(),
                reason: "target 'c' not found".into()
            }
        );
    }
}
