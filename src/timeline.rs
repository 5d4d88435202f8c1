//! Explosion timelines: start delay, duration, easing.
//!
//! A [`Timeline`] maps elapsed wall time to the eased progress value that
//! drives all per-particle kinematics. Progress runs from `0` to
//! [`END_VALUE`] over the timeline's duration, shaped by an [`Easing`] curve.
//! Each explosion owns its own timeline; no state is shared between them.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use shatter::{Phase, Timeline, DEFAULT_DURATION, END_VALUE};
//!
//! let timeline = Timeline::new(Duration::from_millis(100), DEFAULT_DURATION);
//!
//! assert_eq!(timeline.phase(Duration::ZERO), Phase::Pending);
//! match timeline.phase(Duration::from_millis(600)) {
//!     Phase::Running(factor) => assert!(factor > 0.0 && factor < END_VALUE),
//!     other => panic!("expected Running, got {other:?}"),
//! }
//! assert_eq!(timeline.phase(Duration::from_secs(10)), Phase::Finished);
//! ```

use std::time::Duration;

/// Final progress value a timeline reaches at the end of its duration.
///
/// Particle trajectory coefficients are derived against this range, so the
/// per-particle evaluation re-expands its active window back to `[0, 1.4]`.
pub const END_VALUE: f32 = 1.4;

/// Default explosion duration (1024 ms).
pub const DEFAULT_DURATION: Duration = Duration::from_millis(0x400);

/// Easing curve applied to the linear elapsed-time fraction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Easing {
    /// Power ease-in: `t.powf(2.0 * factor)`.
    ///
    /// With the default factor of 0.6 the exponent is 1.2, a gentle
    /// acceleration from rest.
    Accelerate {
        /// Acceleration factor; the curve exponent is `2 * factor`.
        factor: f32,
    },
    /// Identity curve.
    Linear,
}

impl Easing {
    /// Map a linear fraction `t` in `[0, 1]` through the curve.
    pub fn apply(&self, t: f32) -> f32 {
        match self {
            Easing::Accelerate { factor } => t.powf(2.0 * factor),
            Easing::Linear => t,
        }
    }
}

impl Default for Easing {
    fn default() -> Self {
        Easing::Accelerate { factor: 0.6 }
    }
}

/// Where a timeline stands at a given elapsed time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Phase {
    /// The start delay has not elapsed yet.
    Pending,
    /// Eased progress in `[0, END_VALUE]`.
    Running(f32),
    /// Strictly past the end of delay + duration.
    Finished,
}

/// Maps elapsed wall time to eased progress.
///
/// The timeline itself holds no clock; callers feed it the elapsed time since
/// the explosion was registered, sampled once per repaint.
#[derive(Clone, Copy, Debug)]
pub struct Timeline {
    delay: Duration,
    duration: Duration,
    easing: Easing,
}

impl Timeline {
    /// Timeline with the default easing curve.
    pub fn new(delay: Duration, duration: Duration) -> Self {
        Self {
            delay,
            duration,
            easing: Easing::default(),
        }
    }

    /// Replace the easing curve.
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Configured start delay.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Configured duration, excluding the start delay.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Phase at `elapsed` time since the timeline was started.
    ///
    /// The end instant itself still reports `Running(END_VALUE)`; the
    /// timeline is `Finished` only strictly after it, so a frame landing
    /// exactly on the end still evaluates (and draws nothing visible, since
    /// every particle has faded by then).
    pub fn phase(&self, elapsed: Duration) -> Phase {
        if elapsed < self.delay {
            return Phase::Pending;
        }
        if elapsed > self.delay + self.duration {
            return Phase::Finished;
        }
        if self.duration.is_zero() {
            return Phase::Running(END_VALUE);
        }
        let t = (elapsed - self.delay).as_secs_f32() / self.duration.as_secs_f32();
        Phase::Running(self.easing.apply(t.min(1.0)) * END_VALUE)
    }
}
