//! Core configuration for kinetic-animation-core.

use serde::{Deserialize, Serialize};

/// Configuration shared by timelines and animators.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Push a `TweenProgress` event for every evaluated tween each tick.
    /// Lifecycle events (start/complete/reset/failure) are always emitted.
    pub emit_progress_events: bool,

    /// Initial capacity hint for the per-tick event buffer.
    pub event_capacity: usize,

    /// Initial playback rate multiplier for timelines.
    pub time_scale: f32,

    /// Whether timelines wrap around when they reach their end.
    pub looping: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            emit_progress_events: true,
            event_capacity: 64,
            time_scale: 1.0,
            looping: false,
        }
    }
}
