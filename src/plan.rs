use embassy_time::Duration;

use crate::bounds::Bounds;
use crate::error::ConfigError;
use crate::level::Level;
use crate::mode::{Direction, Mode};

/// Trajectory shape requested when starting an actuator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion<T> {
    /// Toggle between `on` and `off`; `times` full cycles or endless
    Blink { on: T, off: T, times: Option<u32> },
    /// Bounce between bounds
    Fade(Bounds<T>),
    /// Step toward `target` once
    Sweep { target: T },
    /// Bounce between bounds
    Oscillate(Bounds<T>),
}

/// A complete trajectory: shape, pacing and start value
///
/// Built with one of the constructors and handed to
/// [`Timeline::configure`](crate::timeline::Timeline::configure).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Plan<T> {
    pub motion: Motion<T>,
    /// Change applied per tick
    pub step: u16,
    /// Minimum time between ticks
    pub interval: Duration,
    /// Value applied when the plan starts
    pub start: T,
}

impl<T: Level> Plan<T> {
    /// Blink between `on` and `off`, starting off
    ///
    /// `half_period` is the time spent in each state.
    pub const fn blink(on: T, off: T, half_period: Duration, times: Option<u32>) -> Self {
        Self {
            motion: Motion::Blink { on, off, times },
            step: 1,
            interval: half_period,
            start: off,
        }
    }

    /// Bounce between bounds, starting at the lower bound
    pub const fn fade(bounds: Bounds<T>, step: u16, interval: Duration) -> Self {
        Self {
            motion: Motion::Fade(bounds),
            step,
            interval,
            start: bounds.low,
        }
    }

    /// Move from `from` to `to` once
    pub const fn sweep(from: T, to: T, step: u16, interval: Duration) -> Self {
        Self {
            motion: Motion::Sweep { target: to },
            step,
            interval,
            start: from,
        }
    }

    /// Bounce between bounds, starting at the lower bound
    pub const fn oscillate(bounds: Bounds<T>, step: u16, interval: Duration) -> Self {
        Self {
            motion: Motion::Oscillate(bounds),
            step,
            interval,
            start: bounds.low,
        }
    }

    /// Override the start value
    #[must_use]
    pub fn with_start(mut self, start: T) -> Self {
        self.start = start;
        self
    }

    /// Set the interval from fractional seconds
    pub fn with_interval_secs(mut self, secs: f32) -> Result<Self, ConfigError> {
        self.interval = interval_from_secs(secs)?;
        Ok(self)
    }

    /// Check the plan without touching any state
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.step == 0 {
            return Err(ConfigError::ZeroStep);
        }
        match self.motion {
            Motion::Blink {
                times: Some(0), ..
            } => Err(ConfigError::ZeroBlinkCount),
            Motion::Fade(bounds) | Motion::Oscillate(bounds) => bounds.validate(),
            Motion::Blink { .. } | Motion::Sweep { .. } => Ok(()),
        }
    }

    /// Start value after clamping into the plan bounds
    pub fn start_value(&self) -> T {
        match self.motion {
            Motion::Fade(bounds) | Motion::Oscillate(bounds) => bounds.clamp(self.start),
            _ => self.start,
        }
    }

    /// Mode state right after the start value was applied
    pub fn initial_mode(&self) -> Mode<T> {
        match self.motion {
            Motion::Blink { on, off, times } => Mode::Blink {
                on,
                off,
                lit: false,
                toggles: 0,
                times,
            },
            Motion::Fade(bounds) => Mode::Fade {
                bounds,
                direction: Direction::Rising,
            },
            Motion::Sweep { target } => {
                if self.start == target {
                    Mode::Idle
                } else {
                    Mode::Sweep { target }
                }
            }
            Motion::Oscillate(bounds) => Mode::Oscillate {
                bounds,
                direction: Direction::Rising,
            },
        }
    }

    /// Extreme values the plan can apply, checked against the output range
    pub(crate) fn endpoints(&self) -> [T; 3] {
        match self.motion {
            Motion::Blink { on, off, .. } => [on, off, self.start],
            Motion::Fade(bounds) | Motion::Oscillate(bounds) => {
                [bounds.low, bounds.high, self.start_value()]
            }
            Motion::Sweep { target } => [self.start, target, self.start],
        }
    }
}

/// Convert fractional seconds into an interval
///
/// Rejects negative and non-finite values.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn interval_from_secs(secs: f32) -> Result<Duration, ConfigError> {
    if !secs.is_finite() || secs < 0.0 {
        return Err(ConfigError::NegativeInterval);
    }
    let millis = libm::roundf(secs * 1000.0);
    Ok(Duration::from_millis(millis as u64))
}
