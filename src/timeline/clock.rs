use std::cell::Cell;
use std::rc::Rc;

use crate::foundation::core::Direction;

/// Playback state of a timeline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimelineClock {
    /// Elapsed time (ms).
    pub elapsed: f64,
    /// Direction of advance.
    pub direction: Direction,
    /// Speed multiplier.
    pub speed: f64,
    /// Wrap at the ends.
    pub looping: bool,
    /// Reached the forward end without looping.
    pub completed: bool,
    /// Advancing each tick.
    pub playing: bool,
    /// `elapsed` as a percentage of the total duration.
    pub progress: f64,
}

impl TimelineClock {
    /// Stopped clock at 0.
    pub fn new(speed: f64, looping: bool) -> Self {
        Self {
            elapsed: 0.0,
            direction: Direction::Forward,
            speed,
            looping,
            completed: false,
            playing: false,
            progress: 0.0,
        }
    }

    /// Elapsed time `dt` ms of wall time after `from`, in the current direction.
    pub fn advanced(&self, from: f64, dt: f64) -> f64 {
        from + self.direction.sign() * dt * self.speed
    }
}

/// Host primitive that schedules the next frame.
///
/// A requested tick is answered by the host calling [`crate::Timeline::tick`].
pub trait Ticker {
    /// Ask for one more tick.
    fn request_tick(&mut self);

    /// Drop an outstanding request.
    fn cancel_tick(&mut self);
}

#[derive(Debug, Default)]
struct TickState {
    pending: Cell<bool>,
    requests: Cell<u64>,
}

/// Deterministic [`Ticker`]: requests are only recorded, and the host drives time.
///
/// Clones share state, so the host keeps one clone while the timeline owns another.
#[derive(Clone, Debug, Default)]
pub struct ManualTicker {
    state: Rc<TickState>,
}

impl ManualTicker {
    /// Ticker with nothing pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a tick has been requested and not yet cancelled or taken.
    pub fn is_pending(&self) -> bool {
        self.state.pending.get()
    }

    /// Clear and return the pending flag.
    pub fn take(&self) -> bool {
        self.state.pending.replace(false)
    }

    /// Total requests seen.
    pub fn requests(&self) -> u64 {
        self.state.requests.get()
    }
}

impl Ticker for ManualTicker {
    fn request_tick(&mut self) {
        self.state.pending.set(true);
        self.state.requests.set(self.state.requests.get() + 1);
    }

    fn cancel_tick(&mut self) {
        self.state.pending.set(false);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/clock.rs"]
mod tests;
