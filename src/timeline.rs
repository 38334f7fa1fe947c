//! Timed trajectory engine.
//!
//! A [`Timeline`] owns the mode, the current value and the interval gate of
//! one actuator. It never touches hardware: [`Timeline::next_step`] computes
//! what the next tick would apply and [`Timeline::commit`] records it once
//! the caller has written it out. Given the same sequence of `now` values and
//! the same plan, the produced values are always the same.

use embassy_time::{Duration, Instant};

use crate::bounds::Bounds;
use crate::error::ConfigError;
use crate::gate::IntervalGate;
use crate::level::Level;
use crate::mode::{Direction, Mode, ModeKind};
use crate::plan::Plan;

/// Value and mode state produced by one accepted tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step<T> {
    pub value: T,
    pub mode: Mode<T>,
}

/// Trajectory state of one actuator
#[derive(Debug, Clone, Copy)]
pub struct Timeline<T> {
    mode: Mode<T>,
    current: T,
    step: u16,
    gate: IntervalGate,
}

impl<T: Level> Timeline<T> {
    /// Create an idle timeline holding `initial`
    pub const fn new(initial: T) -> Self {
        Self {
            mode: Mode::Idle,
            current: initial,
            step: 1,
            gate: IntervalGate::new(Duration::from_millis(0), Instant::from_millis(0)),
        }
    }

    /// Get the current value
    pub const fn current(&self) -> T {
        self.current
    }

    /// Get the live mode state
    pub const fn mode(&self) -> &Mode<T> {
        &self.mode
    }

    pub const fn kind(&self) -> ModeKind {
        self.mode.kind()
    }

    pub const fn is_idle(&self) -> bool {
        self.mode.is_idle()
    }

    pub const fn step_size(&self) -> u16 {
        self.step
    }

    pub const fn interval(&self) -> Duration {
        self.gate.interval()
    }

    /// Time of the last accepted tick (or of the last reconfiguration)
    pub const fn last_update(&self) -> Instant {
        self.gate.last()
    }

    /// Validate `plan` and restart the timeline with it
    ///
    /// Returns the start value the caller must apply. On error the timeline
    /// is left untouched.
    pub fn configure(&mut self, plan: &Plan<T>, now: Instant) -> Result<T, ConfigError> {
        plan.validate()?;
        self.restart(plan, now);
        Ok(self.current)
    }

    /// Restart with an already validated plan
    pub(crate) fn restart(&mut self, plan: &Plan<T>, now: Instant) {
        self.current = plan.start_value();
        self.mode = plan.initial_mode();
        self.step = plan.step;
        self.gate.reset(plan.interval, now);
    }

    /// Compute the next tick without committing it
    ///
    /// Returns `None` when idle or when less than one interval has elapsed
    /// since the last tick.
    pub fn next_step(&self, now: Instant) -> Option<Step<T>> {
        if self.mode.is_idle() || !self.gate.is_open(now) {
            return None;
        }
        Some(self.advance())
    }

    /// Record a tick produced by [`Timeline::next_step`]
    pub fn commit(&mut self, step: Step<T>, now: Instant) {
        self.current = step.value;
        self.mode = step.mode;
        self.gate.mark(now);
    }

    /// Advance and commit in one call, for use without an output
    pub fn update(&mut self, now: Instant) -> Option<T> {
        let step = self.next_step(now)?;
        self.commit(step, now);
        Some(step.value)
    }

    /// Jump to `value` and go idle
    pub fn set_immediate(&mut self, value: T) {
        self.current = value;
        self.mode = Mode::Idle;
    }

    /// Go idle, holding the current value
    pub fn stop(&mut self) {
        self.mode = Mode::Idle;
    }

    fn advance(&self) -> Step<T> {
        match self.mode {
            Mode::Idle => Step {
                value: self.current,
                mode: Mode::Idle,
            },
            Mode::Blink {
                on,
                off,
                lit,
                toggles,
                times,
            } => {
                let lit = !lit;
                let toggles = toggles.saturating_add(1);
                let finished = times.is_some_and(|times| toggles >= times.saturating_mul(2));
                Step {
                    value: if lit { on } else { off },
                    mode: if finished {
                        Mode::Idle
                    } else {
                        Mode::Blink {
                            on,
                            off,
                            lit,
                            toggles,
                            times,
                        }
                    },
                }
            }
            Mode::Fade { bounds, direction } => {
                let (value, direction) = bounce(self.current, bounds, direction, self.step);
                Step {
                    value,
                    mode: Mode::Fade { bounds, direction },
                }
            }
            Mode::Oscillate { bounds, direction } => {
                let (value, direction) = bounce(self.current, bounds, direction, self.step);
                Step {
                    value,
                    mode: Mode::Oscillate { bounds, direction },
                }
            }
            Mode::Sweep { target } => {
                let value = self.current.approach(target, self.step);
                Step {
                    value,
                    mode: if value == target {
                        Mode::Idle
                    } else {
                        Mode::Sweep { target }
                    },
                }
            }
        }
    }
}

/// One bounded step; the step before a bound is truncated onto it and the
/// direction flips there.
fn bounce<T: Level>(current: T, bounds: Bounds<T>, direction: Direction, step: u16) -> (T, Direction) {
    let toward = match direction {
        Direction::Rising => bounds.high,
        Direction::Falling => bounds.low,
    };
    let next = current.approach(toward, step);
    if next == bounds.high {
        (next, Direction::Falling)
    } else if next == bounds.low {
        (next, Direction::Rising)
    } else {
        (next, direction)
    }
}
