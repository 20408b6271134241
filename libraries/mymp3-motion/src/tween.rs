//! Interruptible position tween
//!
//! A [`TweenController`] interpolates a [`Point`] from a start to an end
//! value over a duration. It has no clock of its own: the host calls
//! [`advance`](TweenController::advance) once per rendering tick with the
//! time elapsed since the previous tick, which keeps the interpolation
//! deterministic.
//!
//! Starting a new tween while one is running cancels the old one first, and
//! the new one usually begins at [`position`](TweenController::position), so
//! a reversed animation continues from where the panel actually is.

use crate::easing::Easing;
use crate::geometry::Point;
use std::time::Duration;
use tracing::{debug, trace};

/// Result of one [`TweenController::advance`] call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenStep {
    /// Position after this tick
    pub position: Point,

    /// True only on the tick that completed the tween
    pub finished: bool,
}

/// Tween state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TweenState {
    /// Not interpolating; `position` is at rest
    Idle,

    /// Interpolation in progress
    Running,
}

/// Interruptible 2-D tween driven by explicit ticks
#[derive(Debug, Clone)]
pub struct TweenController {
    /// Start of the current segment (position at the last `start()`)
    from: Point,

    /// End of the current segment
    to: Point,

    /// Current interpolated position
    position: Point,

    /// Total duration of the current tween
    duration: Duration,

    /// Time consumed so far
    elapsed: Duration,

    /// Curve of the current tween
    easing: Easing,

    /// Current state
    state: TweenState,

    /// Incremented by every successful `start()`
    generation: u64,
}

impl TweenController {
    /// Create an idle tween resting at `position`
    pub fn new(position: Point) -> Self {
        Self {
            from: position,
            to: position,
            position,
            duration: Duration::ZERO,
            elapsed: Duration::ZERO,
            easing: Easing::default(),
            state: TweenState::Idle,
            generation: 0,
        }
    }

    /// Begin interpolating from `from` to `to`
    ///
    /// A tween already in flight is cancelled first and never reports
    /// completion. A zero `duration` is a no-op returning `false`; the
    /// caller treats that move as an instantaneous jump.
    pub fn start(&mut self, from: Point, to: Point, duration: Duration, easing: Easing) -> bool {
        if duration.is_zero() {
            debug!("Ignoring zero-length tween to ({}, {})", to.x, to.y);
            return false;
        }

        if self.is_running() {
            self.cancel();
        }

        self.from = from;
        self.to = to;
        self.position = from;
        self.duration = duration;
        self.elapsed = Duration::ZERO;
        self.easing = easing;
        self.state = TweenState::Running;
        self.generation += 1;

        trace!(
            generation = self.generation,
            duration_ms = duration.as_millis() as u64,
            "Tween started"
        );
        true
    }

    /// Restart toward a new endpoint from the current position
    pub fn retarget(&mut self, to: Point, duration: Duration, easing: Easing) -> bool {
        self.start(self.position, to, duration, easing)
    }

    /// Advance by `elapsed` and return the new position
    ///
    /// The tick that consumes the remaining time snaps to the end value and
    /// reports `finished`. Later calls report the resting position with
    /// `finished == false`.
    pub fn advance(&mut self, elapsed: Duration) -> TweenStep {
        if self.state != TweenState::Running {
            return TweenStep {
                position: self.position,
                finished: false,
            };
        }

        self.elapsed = (self.elapsed + elapsed).min(self.duration);

        let finished = self.elapsed >= self.duration;
        if finished {
            self.position = self.to;
            self.state = TweenState::Idle;
        } else {
            let eased = self.easing.apply(self.progress());
            self.position = self.from.lerp(self.to, eased);
        }

        TweenStep {
            position: self.position,
            finished,
        }
    }

    /// Stop at the current position
    ///
    /// Idempotent; does nothing when idle.
    pub fn cancel(&mut self) {
        if self.state == TweenState::Running {
            trace!(generation = self.generation, "Tween cancelled");
            self.state = TweenState::Idle;
        }
    }

    /// Stop and place the tween at `position`
    pub fn jump_to(&mut self, position: Point) {
        self.cancel();
        self.from = position;
        self.to = position;
        self.position = position;
    }

    /// Current interpolated position
    pub fn position(&self) -> Point {
        self.position
    }

    /// End value of the current (or last) tween
    pub fn target(&self) -> Point {
        self.to
    }

    /// Start value of the current (or last) tween
    pub fn origin(&self) -> Point {
        self.from
    }

    /// Check if a tween is in flight
    pub fn is_running(&self) -> bool {
        self.state == TweenState::Running
    }

    /// Get current state
    pub fn state(&self) -> TweenState {
        self.state
    }

    /// Linear time progress (0.0 to 1.0)
    pub fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()) as f32
    }

    /// Duration of the current (or last) tween
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Time left in the current tween
    pub fn remaining(&self) -> Duration {
        if self.is_running() {
            self.duration.saturating_sub(self.elapsed)
        } else {
            Duration::ZERO
        }
    }

    /// Number of successful `start()` calls so far
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl Default for TweenController {
    fn default() -> Self {
        Self::new(Point::default())
    }
}

/// Duration for covering `remaining` of a full `extent` traversal
///
/// `max(min, base × min(1, remaining / extent))`. Never longer than a full
/// traversal; a non-positive or non-finite ratio is clamped to `min`.
pub fn scaled_duration(remaining: f32, extent: f32, base: Duration, min: Duration) -> Duration {
    let ratio = f64::from(remaining) / f64::from(extent);

    if !ratio.is_finite() || ratio <= 0.0 {
        debug!(remaining, extent, "Degenerate tween duration, using floor");
        return min;
    }

    base.mul_f64(ratio.min(1.0)).max(min)
}
