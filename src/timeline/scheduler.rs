//! The timeline: owns the scene, the compiled records and the playback clock.

use std::collections::BTreeMap;

use crate::animation::ease::{EaseCurve, EaseSpec};
use crate::compile::compiler::{CompileOptions, PropertyError, compile_animation};
use crate::compile::spec::AnimationSpec;
use crate::compile::tween::TweenRecord;
use crate::foundation::core::Direction;
use crate::foundation::error::TweenlineResult;
use crate::scene::element::{ElementId, Scene, Snapshot};
use crate::timeline::clock::{Ticker, TimelineClock};
use crate::timeline::config::{TimelineConfig, TimelineHooks};
use crate::timeline::ghost::Ghost;
use crate::timeline::render::{FramePass, FrameTargets, render_frame};

/// Where the playback loop stands between ticks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Phase {
    /// Not advancing.
    Idle,
    /// `play` was called; waiting out the start-up deferral. `since` is the first tick seen.
    Deferred {
        /// Time of the first tick after `play`.
        since: Option<f64>,
    },
    /// Advancing; elapsed is measured from `origin`.
    Running {
        /// Tick time at which `elapsed` was last anchored.
        origin: f64,
    },
}

#[derive(Clone, Debug)]
struct TrackedTarget {
    id: ElementId,
    selectors: Vec<String>,
    snapshot: Snapshot,
}

/// Seekable, reversible timeline animating the elements of a [`Scene`].
///
/// Time only moves when the host calls [`Timeline::tick`] in answer to the [`Ticker`]'s
/// requests.
pub struct Timeline<S: Scene> {
    scene: S,
    config: TimelineConfig,
    hooks: TimelineHooks,
    ticker: Box<dyn Ticker>,
    easing: EaseCurve,
    records: Vec<TweenRecord>,
    targets: Vec<TrackedTarget>,
    ghosts: BTreeMap<ElementId, Ghost>,
    errors: Vec<PropertyError>,
    dirty: Vec<(ElementId, String)>,
    clock: TimelineClock,
    phase: Phase,
    initial_elapsed: f64,
    max_duration: f64,
}

impl<S: Scene> Timeline<S> {
    /// Build a timeline over `scene`.
    pub fn new(
        scene: S,
        config: TimelineConfig,
        hooks: TimelineHooks,
        ticker: impl Ticker + 'static,
    ) -> TweenlineResult<Self> {
        config.validate()?;
        let easing = EaseSpec::Named(config.easing.clone()).resolve();
        let clock = TimelineClock::new(config.speed, config.loop_playback);
        let max_duration = config.duration.unwrap_or(0.0);
        Ok(Self {
            scene,
            config,
            hooks,
            ticker: Box::new(ticker),
            easing,
            records: Vec::new(),
            targets: Vec::new(),
            ghosts: BTreeMap::new(),
            errors: Vec::new(),
            dirty: Vec::new(),
            clock,
            phase: Phase::Idle,
            initial_elapsed: 0.0,
            max_duration,
        })
    }

    /// Compile `spec` and append its records.
    ///
    /// Fails only on configuration errors; per-property failures are kept in
    /// [`Timeline::property_errors`].
    #[tracing::instrument(skip(self, spec), fields(targets = %spec.targets))]
    pub fn add(&mut self, spec: &AnimationSpec) -> TweenlineResult<&mut Self> {
        let opts = CompileOptions {
            managed: self.config.managed_state,
            provider: self.hooks.state_provider.as_deref(),
            easing: self.easing,
            delay: self.config.delay,
        };
        let compiled = compile_animation(&self.scene, spec, &opts)?;

        for target in compiled.targets {
            match self.targets.iter_mut().find(|t| t.id == target.target) {
                Some(existing) => {
                    if !existing.selectors.contains(&spec.targets) {
                        existing.selectors.push(spec.targets.clone());
                    }
                }
                None => {
                    self.ghosts.insert(
                        target.target.clone(),
                        Ghost::new(&self.scene, &target.target, target.anchor),
                    );
                    self.targets.push(TrackedTarget {
                        id: target.target,
                        selectors: vec![spec.targets.clone()],
                        snapshot: target.snapshot,
                    });
                }
            }
        }
        for record in &compiled.records {
            if record.kind.resizes() {
                if let Some(ghost) = self.ghosts.get_mut(&record.target) {
                    ghost.resizes = true;
                }
            }
        }
        self.records.extend(compiled.records);
        self.errors.extend(compiled.errors);
        self.recompute_duration();

        if self.config.autoplay && !self.clock.playing {
            self.play(Direction::Forward, false, false);
        }
        Ok(self)
    }

    /// Start advancing in `direction`.
    ///
    /// `restart` (or resuming a completed forward run without `reversing`) first performs a full
    /// reset. Advancing begins once `start_defer_ms` has passed since the next tick.
    pub fn play(&mut self, direction: Direction, restart: bool, reversing: bool) {
        self.pause();
        self.clock.direction = direction;
        if restart || (self.clock.completed && !reversing) {
            self.full_reset();
        }
        tracing::debug!(?direction, restart, reversing, "play");
        self.phase = Phase::Deferred { since: None };
        self.ticker.request_tick();
    }

    /// Stop advancing. Idempotent.
    pub fn pause(&mut self) {
        if self.phase != Phase::Idle {
            tracing::debug!(elapsed = self.clock.elapsed, "pause");
        }
        self.ticker.cancel_tick();
        self.phase = Phase::Idle;
        self.clock.playing = false;
    }

    /// Play backwards from the current position.
    pub fn reverse(&mut self) {
        self.play(Direction::Backward, false, true);
    }

    /// Full reset, then play forward.
    pub fn restart(&mut self) {
        self.play(Direction::Forward, true, false);
    }

    /// Jump to `percent` of the total duration and render that frame.
    pub fn seek(&mut self, percent: f64) {
        self.seek_with(percent, false);
    }

    /// Jump to `ms` and render that frame.
    pub fn time(&mut self, ms: f64) {
        if self.max_duration <= 0.0 {
            self.seek(0.0);
        } else {
            self.seek(ms / self.max_duration * 100.0);
        }
    }

    /// Restore every element added under `selector` (or matching it now) and drop its records.
    pub fn remove(&mut self, selector: &str) -> &mut Self {
        let matched = self.scene.select(selector);
        let (removed, kept): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.targets).into_iter().partition(|t| {
                matched.contains(&t.id) || t.selectors.iter().any(|s| s == selector)
            });
        self.targets = kept;
        for target in &removed {
            target.snapshot.restore(&mut self.scene, &target.id);
            self.ghosts.remove(&target.id);
            self.records.retain(|r| r.target != target.id);
            self.dirty.retain(|(el, _)| *el != target.id);
        }
        tracing::debug!(selector, removed = removed.len(), "removed targets");
        self.recompute_duration();
        self
    }

    /// Answer a tick request at host time `now` (ms). Returns whether another tick is wanted.
    pub fn tick(&mut self, now: f64) -> bool {
        match self.phase {
            Phase::Idle => false,
            Phase::Deferred { since } => {
                let since = since.unwrap_or(now);
                if now - since < self.config.start_defer_ms {
                    self.phase = Phase::Deferred { since: Some(since) };
                    self.ticker.request_tick();
                    return true;
                }
                self.begin(now);
                true
            }
            Phase::Running { origin } => self.advance(now, origin),
        }
    }

    fn begin(&mut self, now: f64) {
        self.clean_dirty();
        self.clock.playing = true;
        self.clock.completed = false;
        let max = self.max_duration;
        match self.clock.direction {
            Direction::Forward if self.clock.elapsed >= max => self.clock.elapsed = 0.0,
            Direction::Backward if self.clock.elapsed <= 0.0 => self.clock.elapsed = max,
            _ => {}
        }
        self.initial_elapsed = self.clock.elapsed;
        self.phase = Phase::Running { origin: now };
        tracing::debug!(elapsed = self.clock.elapsed, "running");
        self.render(true, false);
        self.ticker.request_tick();
    }

    fn advance(&mut self, now: f64, origin: f64) -> bool {
        let elapsed = self.clock.advanced(self.initial_elapsed, now - origin);
        let max = self.max_duration;
        let past_end = match self.clock.direction {
            Direction::Forward => elapsed >= max,
            Direction::Backward => elapsed <= 0.0,
        };
        if !past_end {
            self.clock.elapsed = elapsed;
            self.render(true, false);
            self.ticker.request_tick();
            return true;
        }

        if self.clock.looping && max > 0.0 {
            let wrapped = elapsed.rem_euclid(max);
            tracing::debug!(elapsed, wrapped, "loop wrap");
            self.clock.elapsed = wrapped;
            self.initial_elapsed = wrapped;
            self.phase = Phase::Running { origin: now };
            self.render(true, false);
            self.ticker.request_tick();
            return true;
        }

        let at_end = elapsed >= max;
        self.clock.elapsed = if at_end { max } else { 0.0 };
        self.render(true, false);
        tracing::debug!(elapsed = self.clock.elapsed, "complete");
        if let Some(hook) = self.hooks.on_complete.as_mut() {
            hook();
        }
        self.pause();
        self.clock.completed = at_end;
        if self.clock.direction == Direction::Backward {
            self.full_reset();
        }
        false
    }

    fn seek_with(&mut self, percent: f64, full_reset: bool) {
        self.pause();
        self.clean_dirty();
        let percent = if percent.is_finite() {
            percent.clamp(0.0, 100.0)
        } else {
            0.0
        };
        self.clock.elapsed = percent / 100.0 * self.max_duration;
        self.render(false, full_reset);
    }

    /// Seek to 0 with staggered delays zeroed, restoring every target's starting value.
    fn full_reset(&mut self) {
        tracing::debug!("full reset");
        self.seek_with(0.0, true);
    }

    fn clean_dirty(&mut self) {
        for (el, attr) in self.dirty.drain(..) {
            self.scene.set_attr(&el, &attr, None);
        }
    }

    fn render(&mut self, playing: bool, full_reset: bool) {
        let mut targets = FrameTargets {
            scene: &mut self.scene,
            ghosts: &mut self.ghosts,
            hooks: &mut self.hooks,
            dirty: &mut self.dirty,
        };
        let pass = FramePass {
            elapsed: self.clock.elapsed,
            playing,
            full_reset,
        };
        render_frame(&mut targets, &self.records, pass);
        self.clock.progress = if self.max_duration > 0.0 {
            self.clock.elapsed / self.max_duration * 100.0
        } else {
            0.0
        };
        if let Some(hook) = self.hooks.on_update.as_mut() {
            hook(self.clock.progress);
        }
    }

    fn recompute_duration(&mut self) {
        self.max_duration = self.config.duration.unwrap_or_else(|| {
            self.records
                .iter()
                .map(TweenRecord::end)
                .fold(0.0, f64::max)
        });
    }

    /// The animated scene.
    pub fn scene(&self) -> &S {
        &self.scene
    }

    /// Mutable access to the scene, for host-side edits between frames.
    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }

    /// Playback state.
    pub fn clock(&self) -> &TimelineClock {
        &self.clock
    }

    /// Loop phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Total duration (ms).
    pub fn duration(&self) -> f64 {
        self.max_duration
    }

    /// Elapsed time (ms).
    pub fn elapsed(&self) -> f64 {
        self.clock.elapsed
    }

    /// Progress percentage of the last rendered frame.
    pub fn progress(&self) -> f64 {
        self.clock.progress
    }

    /// Whether the clock is advancing.
    pub fn is_playing(&self) -> bool {
        self.clock.playing
    }

    /// Whether the last run reached the forward end.
    pub fn is_completed(&self) -> bool {
        self.clock.completed
    }

    /// Compiled records in render order.
    pub fn records(&self) -> &[TweenRecord] {
        &self.records
    }

    /// Properties dropped while compiling.
    pub fn property_errors(&self) -> &[PropertyError] {
        &self.errors
    }

    /// Resolved configuration.
    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    /// Consume the timeline, returning the scene in its current state.
    pub fn into_scene(self) -> S {
        self.scene
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/scheduler.rs"]
mod tests;
