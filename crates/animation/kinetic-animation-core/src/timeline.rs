//! Timeline: schedules tweens at absolute start offsets under one play-head.
//!
//! Every entry owns a window `[start, start + duration)`. Whether the play-head
//! arrives by `update` (playback) or `seek` (scrubbing), each entry is brought
//! to the state its window dictates:
//! - before the window: Unstarted (reset if it had been activated)
//! - inside the window: started on entry, then driven to local progress
//! - past the window: started if it never was ("catch-up"), then completed
//!
//! Entries past their window are driven to 1 on every evaluation, so when
//! windows on one property overlap, the entry later in container order wins.
//! The tween's completion guard keeps this from re-reporting completion.
//!
//! Resets run first, in reverse container order, so entries chained on the same
//! property restore the earliest captured value. The forward pass then runs in
//! container order. Within one call, every `TweenReset` therefore precedes the
//! forward pass's events and writes, even for entries later in the container:
//! ordering by container position holds per pass, not across the whole call.

use kinetic_api_core::PropertyAccess;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::config::Config;
use crate::error::{TimelineError, TweenError};
use crate::ids::{IdAllocator, TweenId};
use crate::outputs::{CoreEvent, Outputs};
use crate::tween::{Tween, TweenStep};

/// A tween scheduled at `start_time` on a timeline.
#[derive(Debug, Clone)]
pub struct TimelineEntry {
    id: TweenId,
    tween: Tween,
    start_time: f32,
    activated: bool,
    inert: bool,
}

impl TimelineEntry {
    pub fn id(&self) -> TweenId {
        self.id
    }

    pub fn tween(&self) -> &Tween {
        &self.tween
    }

    pub fn start_time(&self) -> f32 {
        self.start_time
    }

    pub fn end_time(&self) -> f32 {
        self.start_time + self.tween.duration()
    }

    /// Started at least once since the last reset.
    pub fn is_activated(&self) -> bool {
        self.activated
    }

    /// Failed and skipped until the play-head moves back before its window.
    pub fn is_inert(&self) -> bool {
        self.inert
    }
}

/// Options for [`Timeline::sequence`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequenceOptions {
    /// Start of the first tween. Defaults to the current timeline duration.
    pub offset: Option<f32>,
    /// Seconds between the end of one tween and the start of the next.
    pub gap: f32,
}

/// Options for [`Timeline::parallel`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallelOptions {
    /// Shared start time. Defaults to the current timeline duration.
    pub offset: Option<f32>,
}

#[derive(Debug)]
pub struct Timeline {
    cfg: Config,
    ids: IdAllocator,
    entries: Vec<TimelineEntry>,
    duration: f32,
    current_time: f32,
    playing: bool,
    time_scale: f32,
    looping: bool,
    iteration: u32,
    outputs: Outputs,
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}

fn check_start(t: f32) -> Result<f32, TimelineError> {
    if t.is_finite() && t >= 0.0 {
        Ok(t)
    } else {
        Err(TimelineError::InvalidStartTime(t))
    }
}

impl Timeline {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(cfg: Config) -> Self {
        let time_scale = if cfg.time_scale.is_finite() {
            cfg.time_scale
        } else {
            1.0
        };
        Self {
            ids: IdAllocator::new(),
            entries: Vec::new(),
            duration: 0.0,
            current_time: 0.0,
            playing: false,
            time_scale,
            looping: cfg.looping,
            iteration: 0,
            outputs: Outputs::with_capacity(cfg.event_capacity),
            cfg,
        }
    }

    // ---------- composition ----------

    /// Schedule `tween` at `start_time` seconds.
    pub fn add(&mut self, tween: Tween, start_time: f32) -> Result<TweenId, TimelineError> {
        let start_time = check_start(start_time)?;
        Ok(self.push(tween, start_time))
    }

    /// Chain tweens back to back, `gap` seconds apart, starting at `offset`.
    /// Either every tween is added or none is.
    pub fn sequence(
        &mut self,
        tweens: impl IntoIterator<Item = Tween>,
        opts: SequenceOptions,
    ) -> Result<Vec<TweenId>, TimelineError> {
        if !opts.gap.is_finite() {
            return Err(TimelineError::InvalidGap(opts.gap));
        }
        let mut cursor = check_start(opts.offset.unwrap_or(self.duration))?;
        let mut planned = Vec::new();
        for tween in tweens {
            let start = check_start(cursor)?;
            cursor = start + tween.duration() + opts.gap;
            planned.push((tween, start));
        }
        Ok(planned
            .into_iter()
            .map(|(tween, start)| self.push(tween, start))
            .collect())
    }

    /// Schedule every tween at the same start time.
    pub fn parallel(
        &mut self,
        tweens: impl IntoIterator<Item = Tween>,
        opts: ParallelOptions,
    ) -> Result<Vec<TweenId>, TimelineError> {
        let start = check_start(opts.offset.unwrap_or(self.duration))?;
        Ok(tweens
            .into_iter()
            .map(|tween| self.push(tween, start))
            .collect())
    }

    fn push(&mut self, tween: Tween, start_time: f32) -> TweenId {
        let id = self.ids.alloc_tween();
        self.entries.push(TimelineEntry {
            id,
            tween,
            start_time,
            activated: false,
            inert: false,
        });
        self.recompute_duration();
        id
    }

    fn recompute_duration(&mut self) {
        self.duration = self
            .entries
            .iter()
            .map(TimelineEntry::end_time)
            .fold(0.0, f32::max);
    }

    // ---------- queries ----------

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn current_time(&self) -> f32 {
        self.current_time
    }

    /// Play-head position as a fraction of the duration (0 when empty).
    pub fn progress(&self) -> f32 {
        if self.duration > 0.0 {
            self.current_time / self.duration
        } else {
            0.0
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    /// Number of completed loop cycles since the last `play_from_start`.
    pub fn iteration(&self) -> u32 {
        self.iteration
    }

    pub fn entries(&self) -> &[TimelineEntry] {
        &self.entries
    }

    pub fn entry(&self, id: TweenId) -> Option<&TimelineEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn tween(&self, id: TweenId) -> Option<&Tween> {
        self.entry(id).map(TimelineEntry::tween)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Events from the most recent `update`, `seek` or `play_from_start`.
    pub fn outputs(&self) -> &Outputs {
        &self.outputs
    }

    // ---------- transport ----------

    pub fn play(&mut self) {
        self.playing = true;
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    pub fn set_loop(&mut self, looping: bool) {
        self.looping = looping;
    }

    /// Set the playback rate. Non-finite rates are ignored.
    pub fn set_time_scale(&mut self, scale: f32) {
        if scale.is_finite() {
            self.time_scale = scale;
        } else {
            warn!(scale, "ignoring non-finite time scale");
        }
    }

    /// Reset every entry, rewind to 0 and start playing.
    pub fn play_from_start(&mut self, access: &mut dyn PropertyAccess) -> &Outputs {
        self.outputs.clear();
        self.reset_all(access);
        self.current_time = 0.0;
        self.iteration = 0;
        self.playing = true;
        &self.outputs
    }

    /// Move the play-head to `t` (clamped to `[0, duration]`) and bring every
    /// entry to the matching state. Playback state is unchanged. Seeking to
    /// the same time twice has no further effect.
    pub fn seek(&mut self, t: f32, access: &mut dyn PropertyAccess) -> &Outputs {
        self.outputs.clear();
        let t = if t.is_nan() { 0.0 } else { t };
        self.current_time = t.clamp(0.0, self.duration);
        self.evaluate(access);
        &self.outputs
    }

    /// Advance the play-head by `dt * time_scale` while playing.
    pub fn update(&mut self, dt: f32, access: &mut dyn PropertyAccess) -> &Outputs {
        self.outputs.clear();
        if !self.playing || !dt.is_finite() {
            return &self.outputs;
        }
        if self.duration <= 0.0 {
            self.current_time = 0.0;
            self.evaluate(access);
            self.finish();
            return &self.outputs;
        }

        let next = self.current_time + dt * self.time_scale;
        trace!(from = self.current_time, to = next, "timeline update");

        if next <= 0.0 && self.time_scale < 0.0 {
            self.current_time = 0.0;
            self.evaluate(access);
            self.playing = false;
            debug!("timeline rewound to start");
            return &self.outputs;
        }

        if next < self.duration {
            self.current_time = next.max(0.0);
            self.evaluate(access);
            return &self.outputs;
        }

        // Finish the current cycle first so every entry completes.
        self.current_time = self.duration;
        self.evaluate(access);

        if !self.looping {
            self.finish();
            return &self.outputs;
        }

        let cycles = (next / self.duration).floor().max(1.0);
        self.iteration = self.iteration.saturating_add(cycles as u32);
        self.current_time = next % self.duration;
        debug!(
            iteration = self.iteration,
            time = self.current_time,
            "timeline looped"
        );
        self.reset_all(access);
        self.outputs.push_event(CoreEvent::TimelineLooped {
            iteration: self.iteration,
        });
        // Settle so the next cycle's state is in place before the next tick.
        self.evaluate(access);
        &self.outputs
    }

    fn finish(&mut self) {
        self.playing = false;
        debug!(duration = self.duration, "timeline completed");
        self.outputs.push_event(CoreEvent::TimelineCompleted);
    }

    // ---------- evaluation ----------

    fn reset_all(&mut self, access: &mut dyn PropertyAccess) {
        for entry in self.entries.iter_mut().rev() {
            reset_entry(entry, access, &mut self.outputs);
        }
    }

    fn evaluate(&mut self, access: &mut dyn PropertyAccess) {
        let t = self.current_time;
        let emit_progress = self.cfg.emit_progress_events;

        for entry in self.entries.iter_mut().rev() {
            if t < entry.start_time {
                reset_entry(entry, access, &mut self.outputs);
            }
        }

        for entry in self.entries.iter_mut() {
            if entry.inert || t < entry.start_time {
                continue;
            }
            let d = entry.tween.duration();
            let local = t - entry.start_time;

            if !entry.activated {
                if let Err(error) = entry.tween.start(&*access) {
                    fail(entry, error, &mut self.outputs);
                    continue;
                }
                entry.activated = true;
                self.outputs
                    .push_event(CoreEvent::TweenStarted { id: entry.id });
            }

            let p = if local >= d { 1.0 } else { local / d };
            match entry.tween.set_progress(p, access) {
                Ok(step) => report(entry.id, step, emit_progress, &mut self.outputs),
                Err(error) => fail(entry, error, &mut self.outputs),
            }
        }
    }
}

fn reset_entry(entry: &mut TimelineEntry, access: &mut dyn PropertyAccess, outputs: &mut Outputs) {
    entry.inert = false;
    if !entry.activated {
        return;
    }
    entry.activated = false;
    match entry.tween.reset_to_start(access) {
        Ok(()) => outputs.push_event(CoreEvent::TweenReset { id: entry.id }),
        Err(error) => {
            warn!(id = %entry.id, %error, "tween reset failed");
            outputs.push_event(CoreEvent::TweenFailed {
                id: entry.id,
                error,
            });
        }
    }
}

fn report(id: TweenId, step: TweenStep, emit_progress: bool, outputs: &mut Outputs) {
    if emit_progress {
        outputs.push_event(CoreEvent::TweenProgress {
            id,
            progress: step.progress,
            value: step.value,
        });
    }
    if step.completed {
        outputs.push_event(CoreEvent::TweenCompleted { id });
    }
}

fn fail(entry: &mut TimelineEntry, error: TweenError, outputs: &mut Outputs) {
    warn!(
        id = %entry.id,
        binding = %entry.tween.binding(),
        category = error.category(),
        %error,
        "tween failed; entry is inert until reset"
    );
    entry.inert = true;
    outputs.push_event(CoreEvent::TweenFailed {
        id: entry.id,
        error,
    });
}
