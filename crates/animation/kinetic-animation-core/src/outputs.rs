//! Output contracts from timelines and animators.
//!
//! Property writes go straight through the caller's `PropertyAccess`; outputs
//! carry only the semantic events of one `update`/`seek` call, in the order
//! they happened. Callers consume them instead of registering callbacks.

use kinetic_api_core::Value;
use serde::{Deserialize, Serialize};

use crate::error::TweenError;
use crate::ids::TweenId;

/// Discrete signals emitted while evaluating.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum CoreEvent {
    /// The tween captured its start value and became active.
    TweenStarted { id: TweenId },
    /// The tween was driven to `progress`; `value` is what was written
    /// (or the eased progress for phantom tweens).
    TweenProgress {
        id: TweenId,
        progress: f32,
        value: Value,
    },
    /// Fired exactly once per activation.
    TweenCompleted { id: TweenId },
    /// The tween restored its start value and went back to unstarted.
    TweenReset { id: TweenId },
    /// The tween failed locally and is inert until reset.
    TweenFailed { id: TweenId, error: TweenError },
    /// A looping timeline wrapped around; `iteration` counts completed cycles.
    TimelineLooped { iteration: u32 },
    /// A non-looping timeline reached its end during playback.
    TimelineCompleted,
}

/// Events produced by one `update`/`seek` call.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Outputs {
    #[serde(default)]
    pub events: Vec<CoreEvent>,
}

impl Outputs {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn clear(&mut self) {
        self.events.clear();
    }

    #[inline]
    pub fn push_event(&mut self, event: CoreEvent) {
        self.events.push(event);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Ids of tweens that completed during this call, in order.
    pub fn completed(&self) -> impl Iterator<Item = TweenId> + '_ {
        self.events.iter().filter_map(|e| match e {
            CoreEvent::TweenCompleted { id } => Some(*id),
            _ => None,
        })
    }

    /// Ids of tweens that started during this call, in order.
    pub fn started(&self) -> impl Iterator<Item = TweenId> + '_ {
        self.events.iter().filter_map(|e| match e {
            CoreEvent::TweenStarted { id } => Some(*id),
            _ => None,
        })
    }

    /// Latest progress reported for `id` during this call.
    pub fn progress_of(&self, id: TweenId) -> Option<f32> {
        self.events.iter().rev().find_map(|e| match e {
            CoreEvent::TweenProgress { id: eid, progress, .. } if *eid == id => Some(*progress),
            _ => None,
        })
    }

    pub fn timeline_completed(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, CoreEvent::TimelineCompleted))
    }

    pub fn failures(&self) -> impl Iterator<Item = (TweenId, &TweenError)> + '_ {
        self.events.iter().filter_map(|e| match e {
            CoreEvent::TweenFailed { id, error } => Some((*id, error)),
            _ => None,
        })
    }
}
