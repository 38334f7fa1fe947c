use embassy_time::Instant;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::OutputDriver;
use crate::error::{ConfigError, Error, HardwareError};
use crate::level::Level;
use crate::mode::{Mode, ModeKind};
use crate::plan::Plan;
use crate::poller::Update;
use crate::timeline::Timeline;

/// One timed trajectory bound to one output
///
/// The actuator exclusively owns its output. Values only reach the hardware
/// through [`OutputDriver::apply`], and the timeline only advances once that
/// write succeeded, so a failed tick is retried on the next `update`.
pub struct Actuator<O, T> {
    output: O,
    timeline: Timeline<T>,
}

impl<O, T> Actuator<O, T>
where
    O: OutputDriver<T>,
    T: Level,
{
    /// Bind a timeline to an output
    ///
    /// `initial` is what the hardware is assumed to show; nothing is written.
    pub const fn new(output: O, initial: T) -> Self {
        Self {
            output,
            timeline: Timeline::new(initial),
        }
    }

    /// Validate `plan`, apply its start value and make it the active trajectory
    ///
    /// On any error the previous trajectory keeps running untouched.
    pub fn configure(&mut self, plan: &Plan<T>, now: Instant) -> Result<(), Error> {
        plan.validate()?;
        for value in plan.endpoints() {
            if self.output.limit(value) != value {
                return Err(ConfigError::OutOfRange.into());
            }
        }

        let start = plan.start_value();
        self.write(start)?;
        self.timeline.restart(plan, now);

        #[cfg(feature = "esp32-log")]
        println!(
            "[Actuator.configure] {} start={:?} step={} interval={}ms",
            self.timeline.kind().as_str(),
            start,
            plan.step,
            plan.interval.as_millis()
        );

        Ok(())
    }

    /// Advance the trajectory if the interval has elapsed
    ///
    /// Returns `Ok(true)` when a step was applied. Never waits.
    pub fn update(&mut self, now: Instant) -> Result<bool, HardwareError> {
        let Some(step) = self.timeline.next_step(now) else {
            return Ok(false);
        };
        self.write(step.value)?;
        self.timeline.commit(step, now);
        Ok(true)
    }

    /// Write `value` (clamped to the output range) now and go idle
    pub fn set_immediate(&mut self, value: T) -> Result<(), HardwareError> {
        let value = self.output.limit(value);
        self.write(value)?;
        self.timeline.set_immediate(value);
        Ok(())
    }

    /// Go idle, holding the last applied value
    pub fn stop(&mut self) {
        self.timeline.stop();
    }

    /// Get the last applied value
    pub const fn current(&self) -> T {
        self.timeline.current()
    }

    pub const fn mode(&self) -> &Mode<T> {
        self.timeline.mode()
    }

    pub const fn kind(&self) -> ModeKind {
        self.timeline.kind()
    }

    pub const fn is_idle(&self) -> bool {
        self.timeline.is_idle()
    }

    pub const fn timeline(&self) -> &Timeline<T> {
        &self.timeline
    }

    pub const fn output(&self) -> &O {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }

    /// Give back the output, dropping the trajectory
    pub fn into_output(self) -> O {
        self.output
    }

    fn write(&mut self, value: T) -> Result<(), HardwareError> {
        let result = self.output.apply(value);
        #[cfg(feature = "esp32-log")]
        if let Err(e) = result {
            println!("[Actuator.write] {:?} failed: {}", value, e);
        }
        result
    }
}

impl<O, T> Update for Actuator<O, T>
where
    O: OutputDriver<T>,
    T: Level,
{
    fn update(&mut self, now: Instant) -> Result<bool, HardwareError> {
        Actuator::update(self, now)
    }
}
