//! Animator: the self-driving registry for standalone tweens.
//!
//! Tweens added here start on their first tick, advance by the tick delta and
//! are dropped once complete or failed. Use a `Timeline` when tweens need to be
//! composed in time or scrubbed.

use kinetic_api_core::PropertyAccess;
use tracing::{trace, warn};

use crate::config::Config;
use crate::error::TweenError;
use crate::ids::{IdAllocator, TweenId};
use crate::outputs::{CoreEvent, Outputs};
use crate::standalone::StandaloneTween;
use crate::tween::TweenState;

#[derive(Debug)]
struct Slot {
    id: TweenId,
    tween: StandaloneTween,
    finished: bool,
}

#[derive(Debug, Default)]
pub struct Animator {
    cfg: Config,
    ids: IdAllocator,
    slots: Vec<Slot>,
    outputs: Outputs,
}

impl Animator {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(cfg: Config) -> Self {
        let outputs = Outputs::with_capacity(cfg.event_capacity);
        Self {
            cfg,
            ids: IdAllocator::new(),
            slots: Vec::new(),
            outputs,
        }
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Register a tween. It starts on the next `update` unless it was already
    /// started by the caller.
    pub fn add(&mut self, tween: impl Into<StandaloneTween>) -> TweenId {
        let id = self.ids.alloc_tween();
        self.slots.push(Slot {
            id,
            tween: tween.into(),
            finished: false,
        });
        id
    }

    /// Remove a tween without touching its property. Returns it if present.
    pub fn cancel(&mut self, id: TweenId) -> Option<StandaloneTween> {
        let idx = self.slots.iter().position(|s| s.id == id)?;
        Some(self.slots.remove(idx).tween)
    }

    pub fn get(&self, id: TweenId) -> Option<&StandaloneTween> {
        self.slots.iter().find(|s| s.id == id).map(|s| &s.tween)
    }

    pub fn contains(&self, id: TweenId) -> bool {
        self.slots.iter().any(|s| s.id == id)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Events from the most recent `update`.
    pub fn outputs(&self) -> &Outputs {
        &self.outputs
    }

    /// Advance every registered tween by `dt` seconds, in registration order.
    pub fn update(&mut self, dt: f32, access: &mut dyn PropertyAccess) -> &Outputs {
        self.outputs.clear();
        trace!(dt, tweens = self.slots.len(), "animator update");

        for slot in self.slots.iter_mut() {
            if slot.tween.state() == TweenState::Unstarted {
                if let Err(error) = slot.tween.start(&*access) {
                    fail(&mut self.outputs, slot, error);
                    continue;
                }
                self.outputs
                    .push_event(CoreEvent::TweenStarted { id: slot.id });
            }
            match slot.tween.update(dt, access) {
                Ok(step) => {
                    if self.cfg.emit_progress_events {
                        self.outputs.push_event(CoreEvent::TweenProgress {
                            id: slot.id,
                            progress: step.progress,
                            value: step.value,
                        });
                    }
                    if step.completed {
                        self.outputs
                            .push_event(CoreEvent::TweenCompleted { id: slot.id });
                    }
                    slot.finished = slot.tween.is_completed();
                }
                Err(error) => fail(&mut self.outputs, slot, error),
            }
        }

        self.slots.retain(|s| !s.finished);
        &self.outputs
    }
}

fn fail(outputs: &mut Outputs, slot: &mut Slot, error: TweenError) {
    warn!(
        id = %slot.id,
        binding = %slot.tween.tween().binding(),
        category = error.category(),
        %error,
        "tween failed"
    );
    slot.finished = true;
    outputs.push_event(CoreEvent::TweenFailed { id: slot.id, error });
}
