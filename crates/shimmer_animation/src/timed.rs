//! Timed animations
//!
//! A [`TimedAnimation`] advances a [`PropertyEaser`] across a fixed duration
//! of externally supplied time. The target is lent to every [`tick`]
//! (no reference is stored), and completion is reported as an explicit
//! [`Tick::Completed`] return value instead of a callback: a caller that
//! wants an indefinite loop calls [`play`] again and re-ticks the reported
//! remaining delta, so no time is lost or double-applied at the cycle
//! boundary.
//!
//! [`tick`]: TimedAnimation::tick
//! [`play`]: TimedAnimation::play

use crate::animatable::Animatable;
use crate::easer::PropertyEaser;

/// Lifecycle state of a [`TimedAnimation`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AnimationState {
    /// Not started, or reset. Ticks are ignored.
    #[default]
    Idle,
    /// Accumulating time; each tick applies eased values to the target.
    Playing,
    /// Ran to the full duration. Ticks are ignored until the next `play`.
    Done,
}

/// Result of a single [`TimedAnimation::tick`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Tick {
    /// The animation was idle or already done; nothing was applied.
    Idle,
    /// Time was consumed and eased values were applied.
    Running,
    /// This tick reached the full duration. Emitted exactly once per play
    /// cycle; `remaining_ms` is the part of the tick's delta the finished
    /// cycle did not consume.
    Completed { remaining_ms: f32 },
}

/// Drives a [`PropertyEaser`] against an [`Animatable`] target over a fixed
/// wall-clock duration.
#[derive(Clone, Debug)]
pub struct TimedAnimation {
    duration_ms: u32,
    elapsed_ms: f32,
    state: AnimationState,
    easer: PropertyEaser,
}

impl TimedAnimation {
    /// Create an animation of `duration_ms` (> 0) milliseconds.
    pub fn new(duration_ms: u32, easer: PropertyEaser) -> Self {
        assert!(duration_ms > 0, "animation duration must be non-zero");
        Self {
            duration_ms,
            elapsed_ms: 0.0,
            state: AnimationState::Idle,
            easer,
        }
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    pub fn elapsed_ms(&self) -> f32 {
        self.elapsed_ms
    }

    /// Normalized progress in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        self.elapsed_ms / self.duration_ms as f32
    }

    pub fn easer(&self) -> &PropertyEaser {
        &self.easer
    }

    pub fn easer_mut(&mut self) -> &mut PropertyEaser {
        &mut self.easer
    }

    /// Start (or restart) the animation from the beginning, from any state.
    pub fn play(&mut self) {
        self.elapsed_ms = 0.0;
        self.state = AnimationState::Playing;
    }

    /// Force the animation back to idle with no completion emitted.
    ///
    /// After a reset no completion from the interrupted cycle can fire.
    pub fn reset(&mut self) {
        self.elapsed_ms = 0.0;
        self.state = AnimationState::Idle;
    }

    /// Consume `dt_ms` of time and apply eased values to `target`.
    ///
    /// While playing, elapsed time saturates at the duration and the easer
    /// is applied at the resulting progress — property-setter side effects
    /// happen inside this call. Crossing the duration transitions to
    /// [`AnimationState::Done`] and yields [`Tick::Completed`] exactly once.
    pub fn tick(&mut self, dt_ms: f32, target: &mut dyn Animatable) -> Tick {
        if self.state != AnimationState::Playing {
            return Tick::Idle;
        }

        let dt_ms = dt_ms.max(0.0);
        let before = self.elapsed_ms;
        let duration = self.duration_ms as f32;
        self.elapsed_ms = (before + dt_ms).min(duration);

        self.easer.apply_to(target, self.elapsed_ms / duration);

        if self.elapsed_ms >= duration {
            self.state = AnimationState::Done;
            tracing::trace!("Animation completed after {} ms", self.duration_ms);
            Tick::Completed {
                remaining_ms: dt_ms - (duration - before),
            }
        } else {
            Tick::Running
        }
    }
}
