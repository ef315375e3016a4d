//! Kinetic Animation Core (engine-agnostic)
//!
//! Tweens animate one property from its current value to an end value;
//! timelines compose tweens at start offsets under a shared play-head that can
//! be played, looped, time-scaled or scrubbed. Property reads and writes go
//! through [`PropertyAccess`], and everything that happens during a tick is
//! reported as [`CoreEvent`]s in the returned [`Outputs`].

pub mod animator;
pub mod config;
pub mod easing;
pub mod error;
pub mod ids;
pub mod interp;
pub mod outputs;
pub mod standalone;
pub mod timeline;
pub mod tween;

// Re-exports for consumers (adapters)
pub use animator::Animator;
pub use config::Config;
pub use easing::{EaseFn, Easing, EasingRegistry};
pub use error::{TimelineError, TweenError};
pub use ids::{IdAllocator, TweenId};
pub use outputs::{CoreEvent, Outputs};
pub use standalone::StandaloneTween;
pub use timeline::{ParallelOptions, SequenceOptions, Timeline, TimelineEntry};
pub use tween::{Tween, TweenState, TweenStep};
pub use kinetic_api_core::{
    AccessError, Category, PropertyAccess, PropertyPath, PropertyStore, Value, ValueKind,
};
