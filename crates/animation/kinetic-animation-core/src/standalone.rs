//! Self-clocked tween wrapper.

use kinetic_api_core::PropertyAccess;

use crate::error::Result;
use crate::tween::{Tween, TweenState, TweenStep};

/// A [`Tween`] that owns its elapsed time and advances from `update(dt)`.
#[derive(Clone, Debug)]
pub struct StandaloneTween {
    tween: Tween,
    elapsed: f32,
}

impl StandaloneTween {
    pub fn new(tween: Tween) -> Self {
        Self {
            tween,
            elapsed: 0.0,
        }
    }

    pub fn tween(&self) -> &Tween {
        &self.tween
    }

    pub fn into_inner(self) -> Tween {
        self.tween
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn state(&self) -> TweenState {
        self.tween.state()
    }

    pub fn is_completed(&self) -> bool {
        self.tween.is_completed()
    }

    /// Capture the start value and rewind the clock.
    pub fn start(&mut self, access: &dyn PropertyAccess) -> Result<()> {
        self.elapsed = 0.0;
        self.tween.start(access)
    }

    /// Advance by `dt` seconds. Negative deltas are ignored.
    pub fn update(&mut self, dt: f32, access: &mut dyn PropertyAccess) -> Result<TweenStep> {
        if dt.is_finite() && dt > 0.0 {
            self.elapsed += dt;
        }
        let p = (self.elapsed / self.tween.duration()).min(1.0);
        let step = self.tween.set_progress(p, access)?;
        // Keep the clock from drifting past the end once complete.
        self.elapsed = self.elapsed.min(self.tween.duration());
        Ok(step)
    }

    pub fn reset_to_start(&mut self, access: &mut dyn PropertyAccess) -> Result<()> {
        self.elapsed = 0.0;
        self.tween.reset_to_start(access)
    }
}

impl From<Tween> for StandaloneTween {
    fn from(tween: Tween) -> Self {
        Self::new(tween)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::Easing;
    use crate::error::TweenError;
    use kinetic_api_core::PropertyStore;
    use serde_json::json;

    #[test]
    fn clock_accumulates_and_clamps() {
        let mut s = PropertyStore::from_json(json!({ "target": { "x": 0.0 } })).unwrap();
        let mut t = StandaloneTween::new(Tween::to("target.x", 10.0, 2.0, Easing::Linear).unwrap());
        t.start(&s).unwrap();
        let step = t.update(0.5, &mut s).unwrap();
        assert_eq!(step.progress, 0.25);
        assert_eq!(s.get_f32("target.x"), Some(2.5));
        let step = t.update(5.0, &mut s).unwrap();
        assert!(step.completed);
        assert_eq!(t.elapsed(), 2.0);
        assert_eq!(s.get_f32("target.x"), Some(10.0));

        t.reset_to_start(&mut s).unwrap();
        assert_eq!(t.elapsed(), 0.0);
        assert_eq!(s.get_f32("target.x"), Some(0.0));
    }

    #[test]
    fn update_requires_start() {
        let mut s = PropertyStore::new();
        let mut t = StandaloneTween::new(Tween::phantom(1.0, Easing::Linear).unwrap());
        assert!(matches!(
            t.update(0.1, &mut s),
            Err(TweenError::NotStarted { .. })
        ));
    }
}
