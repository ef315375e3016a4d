//! Tween: a single property animated from its captured current value to a
//! fixed end value.
//!
//! A `Tween` never owns a clock. It is driven by progress ratios handed to it
//! by a scheduler (`Timeline`) or by the elapsed-time wrapper
//! [`crate::standalone::StandaloneTween`].
//!
//! Lifecycle:
//! - `Unstarted --start()--> Active --set_progress(1)--> Completed`
//! - `set_progress(p < 1)` on a Completed tween moves it back to Active
//! - `reset_to_start()` writes the captured start value back and returns to
//!   Unstarted; the next `start()` captures fresh state
//!
//! Completion is reported at most once per activation. Only `start()` opens a
//! new activation.

use kinetic_api_core::{Category, PropertyAccess, PropertyPath, Value};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::easing::Easing;
use crate::error::{Result, TweenError};
use crate::interp::{category_for, finalize, interpolate};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TweenState {
    #[default]
    Unstarted,
    Active,
    Completed,
}

/// Result of driving a tween to a progress ratio.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TweenStep {
    /// Clamped raw progress in [0, 1].
    pub progress: f32,
    /// Progress after easing. Exactly 1.0 once complete.
    pub eased: f32,
    /// The value written through the binding (eased progress for phantom tweens).
    pub value: Value,
    /// True only on the call that completed this activation.
    pub completed: bool,
}

#[derive(Clone, Debug)]
pub struct Tween {
    binding: PropertyPath,
    end_value: Value,
    start_value: Option<Value>,
    category: Option<Category>,
    duration: f32,
    easing: Easing,
    state: TweenState,
    progress: f32,
    completion_fired: bool,
}

impl Tween {
    /// Create a tween bound to `binding`. Start/end compatibility is checked
    /// by `start()`, not here.
    pub fn new(
        binding: PropertyPath,
        end_value: impl Into<Value>,
        duration: f32,
        easing: Easing,
    ) -> Result<Self> {
        if !duration.is_finite() || duration <= 0.0 {
            return Err(TweenError::InvalidDuration { duration });
        }
        Ok(Self {
            binding,
            end_value: end_value.into(),
            start_value: None,
            category: None,
            duration,
            easing,
            state: TweenState::Unstarted,
            progress: 0.0,
            completion_fired: false,
        })
    }

    /// Parse `path` and create a tween. Unparseable paths report as
    /// `PropertyNotFound`.
    pub fn to(
        path: &str,
        end_value: impl Into<Value>,
        duration: f32,
        easing: Easing,
    ) -> Result<Self> {
        let binding = PropertyPath::parse(path).map_err(|_| TweenError::PropertyNotFound {
            path: path.to_string(),
        })?;
        Self::new(binding, end_value, duration, easing)
    }

    /// A tween on the phantom binding: it only produces progress and
    /// completion, never touching any property.
    pub fn phantom(duration: f32, easing: Easing) -> Result<Self> {
        Self::new(PropertyPath::phantom(), Value::Float(1.0), duration, easing)
    }

    #[inline]
    pub fn binding(&self) -> &PropertyPath {
        &self.binding
    }

    #[inline]
    pub fn end_value(&self) -> &Value {
        &self.end_value
    }

    /// Snapshot captured by the latest successful `start()`.
    #[inline]
    pub fn start_value(&self) -> Option<&Value> {
        self.start_value.as_ref()
    }

    #[inline]
    pub fn category(&self) -> Option<Category> {
        self.category
    }

    #[inline]
    pub fn duration(&self) -> f32 {
        self.duration
    }

    #[inline]
    pub fn easing(&self) -> Easing {
        self.easing
    }

    #[inline]
    pub fn state(&self) -> TweenState {
        self.state
    }

    #[inline]
    pub fn progress(&self) -> f32 {
        self.progress
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.state == TweenState::Active
    }

    #[inline]
    pub fn is_completed(&self) -> bool {
        self.state == TweenState::Completed
    }

    #[inline]
    pub fn is_phantom(&self) -> bool {
        self.binding.is_phantom()
    }

    /// Capture the current value of the binding and become Active.
    ///
    /// On failure the tween is left Unstarted with no snapshot.
    pub fn start(&mut self, access: &dyn PropertyAccess) -> Result<()> {
        self.state = TweenState::Unstarted;
        self.start_value = None;
        self.category = None;
        self.progress = 0.0;
        self.completion_fired = false;

        let (start, category) = if self.is_phantom() {
            (Value::Float(0.0), Category::Scalar)
        } else {
            let start = access
                .read(&self.binding)
                .ok_or_else(|| TweenError::PropertyNotFound {
                    path: self.binding.to_string(),
                })?;
            let category = category_for(&start, &self.end_value)?;
            (start, category)
        };

        debug!(binding = %self.binding, ?category, "tween started");
        self.start_value = Some(start);
        self.category = Some(category);
        self.state = TweenState::Active;
        Ok(())
    }

    /// Drive the tween to raw progress `p` (clamped to [0, 1]) and write the
    /// resulting value through the binding.
    ///
    /// At `p >= 1` the exact end value is written (merged into the start for
    /// records) and the tween becomes Completed.
    pub fn set_progress(&mut self, p: f32, access: &mut dyn PropertyAccess) -> Result<TweenStep> {
        let (Some(start), Some(category)) = (self.start_value.as_ref(), self.category) else {
            return Err(self.not_started());
        };
        if self.state == TweenState::Unstarted {
            return Err(self.not_started());
        }

        let p = if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) };
        let done = p >= 1.0;
        let eased = if done { 1.0 } else { self.easing.apply(p) };

        let value = if self.is_phantom() {
            Value::Float(eased)
        } else {
            let value = if done {
                finalize(category, start, &self.end_value)
            } else {
                interpolate(category, start, &self.end_value, eased)?
            };
            access
                .write(&self.binding, value.clone())
                .map_err(|e| TweenError::access(&self.binding, e))?;
            value
        };

        self.progress = p;
        let completed = if done {
            self.state = TweenState::Completed;
            let first = !self.completion_fired;
            self.completion_fired = true;
            if first {
                debug!(binding = %self.binding, "tween completed");
            }
            first
        } else {
            self.state = TweenState::Active;
            false
        };

        Ok(TweenStep {
            progress: p,
            eased,
            value,
            completed,
        })
    }

    /// Write the captured start value back and return to Unstarted.
    ///
    /// A tween that is already Unstarted is left untouched.
    pub fn reset_to_start(&mut self, access: &mut dyn PropertyAccess) -> Result<()> {
        if self.state == TweenState::Unstarted {
            return Ok(());
        }
        self.state = TweenState::Unstarted;
        self.progress = 0.0;
        debug!(binding = %self.binding, "tween reset");
        match &self.start_value {
            Some(start) if !self.is_phantom() => access
                .write(&self.binding, start.clone())
                .map_err(|e| TweenError::access(&self.binding, e)),
            _ => Ok(()),
        }
    }

    fn not_started(&self) -> TweenError {
        TweenError::NotStarted {
            path: self.binding.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kinetic_api_core::PropertyStore;
    use serde_json::json;

    fn store() -> PropertyStore {
        PropertyStore::from_json(json!({
            "target": { "x": 0.0, "label": "hi", "fill": "#000000" }
        }))
        .unwrap()
    }

    #[test]
    fn rejects_non_positive_duration() {
        for d in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let err = Tween::to("target.x", 1.0, d, Easing::Linear).unwrap_err();
            assert!(matches!(err, TweenError::InvalidDuration { .. }));
        }
    }

    #[test]
    fn progress_before_start_is_an_error() {
        let mut s = store();
        let mut t = Tween::to("target.x", 10.0, 1.0, Easing::Linear).unwrap();
        assert!(matches!(
            t.set_progress(0.5, &mut s),
            Err(TweenError::NotStarted { .. })
        ));
    }

    #[test]
    fn completes_once_and_writes_exact_end() {
        let mut s = store();
        let mut t = Tween::to("target.fill", "#ff8000", 1.0, Easing::InOutCubic).unwrap();
        t.start(&s).unwrap();
        let mid = t.set_progress(0.5, &mut s).unwrap();
        assert!(!mid.completed);
        assert!(mid.value.as_text().unwrap().starts_with("rgba("));

        let end = t.set_progress(1.0, &mut s).unwrap();
        assert!(end.completed);
        assert_eq!(s.get("target.fill"), Some(Value::text("#ff8000")));
        assert!(t.is_completed());

        assert!(!t.set_progress(1.0, &mut s).unwrap().completed);
        assert!(!t.set_progress(2.0, &mut s).unwrap().completed);
    }

    #[test]
    fn rewinding_a_completed_tween_does_not_refire() {
        let mut s = store();
        let mut t = Tween::to("target.x", 4.0, 1.0, Easing::Linear).unwrap();
        t.start(&s).unwrap();
        assert!(t.set_progress(1.0, &mut s).unwrap().completed);
        t.set_progress(0.25, &mut s).unwrap();
        assert_eq!(t.state(), TweenState::Active);
        assert_eq!(s.get_f32("target.x"), Some(1.0));
        assert!(!t.set_progress(1.0, &mut s).unwrap().completed);

        t.start(&s).unwrap();
        assert_eq!(t.start_value(), Some(&Value::f(4.0)));
        assert!(t.set_progress(1.0, &mut s).unwrap().completed);
    }

    #[test]
    fn failed_start_leaves_tween_unstarted() {
        let s = store();
        let mut missing = Tween::to("target.nope", 1.0, 1.0, Easing::Linear).unwrap();
        assert!(matches!(
            missing.start(&s),
            Err(TweenError::PropertyNotFound { .. })
        ));
        assert_eq!(missing.state(), TweenState::Unstarted);

        let mut wrong = Tween::to("target.label", 1.0, 1.0, Easing::Linear).unwrap();
        assert!(matches!(
            wrong.start(&s),
            Err(TweenError::UnsupportedValueType { .. })
        ));
        assert!(wrong.start_value().is_none());
    }

    #[test]
    fn reset_restores_snapshot() {
        let mut s = store();
        let mut t = Tween::to("target.x", 10.0, 2.0, Easing::Linear).unwrap();
        t.start(&s).unwrap();
        t.set_progress(0.7, &mut s).unwrap();
        t.reset_to_start(&mut s).unwrap();
        assert_eq!(s.get_f32("target.x"), Some(0.0));
        assert_eq!(t.state(), TweenState::Unstarted);
        assert_eq!(t.progress(), 0.0);
    }

    #[test]
    fn phantom_never_touches_properties() {
        let mut s = PropertyStore::new();
        let mut t = Tween::phantom(1.0, Easing::InQuad).unwrap();
        t.start(&s).unwrap();
        let step = t.set_progress(0.5, &mut s).unwrap();
        assert_eq!(step.value, Value::f(0.25));
        assert!(t.set_progress(1.0, &mut s).unwrap().completed);
        assert!(s.is_empty());
    }
}
