use embassy_time::{Duration, Instant};
use embedded_hal::pwm::SetDutyCycle;

use crate::OutputDriver;
use crate::actuator::Actuator;
use crate::bounds::Bounds;
use crate::error::{ConfigError, Error, HardwareError};
use crate::mode::ModeKind;
use crate::output::{ServoConfig, ServoOutput};
use crate::plan::Plan;
use crate::poller::Update;

/// Step pacing used by the sweep and oscillate demos
pub const DEFAULT_SERVO_INTERVAL: Duration = Duration::from_millis(20);

/// Positional servo with angles in degrees
pub struct Servo<O: OutputDriver<u16>> {
    actuator: Actuator<O, u16>,
}

impl<P: SetDutyCycle> Servo<ServoOutput<P>> {
    /// Servo on a 50 Hz PWM channel
    pub fn pwm(pwm: P, config: ServoConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(ServoOutput::new(pwm, config)?))
    }

    /// Change the pulse calibration; `None` keeps the current value
    pub fn calibrate(&mut self, min_us: Option<u16>, max_us: Option<u16>) -> Result<(), ConfigError> {
        self.actuator.output_mut().calibrate(min_us, max_us)
    }

    /// Stop driving the servo and hand back the PWM channel
    pub fn release(&mut self) -> Result<P, HardwareError> {
        self.actuator.stop();
        self.actuator.output_mut().release()
    }
}

impl<O: OutputDriver<u16>> Servo<O> {
    /// Wrap an output that is assumed to sit at 0°
    pub const fn new(output: O) -> Self {
        Self {
            actuator: Actuator::new(output, 0),
        }
    }

    /// Move to `angle` immediately, cancelling any motion
    pub fn set_angle(&mut self, angle: u16) -> Result<(), HardwareError> {
        self.actuator.set_immediate(angle)
    }

    /// Jump to `start`, then step toward `end` once
    pub fn sweep(
        &mut self,
        start: u16,
        end: u16,
        step: u16,
        interval: Duration,
        now: Instant,
    ) -> Result<(), Error> {
        self.actuator
            .configure(&Plan::sweep(start, end, step, interval), now)
    }

    /// Bounce between `bounds` until stopped, beginning at the lower bound
    pub fn oscillate(
        &mut self,
        bounds: Bounds<u16>,
        step: u16,
        interval: Duration,
        now: Instant,
    ) -> Result<(), Error> {
        self.actuator
            .configure(&Plan::oscillate(bounds, step, interval), now)
    }

    /// Stop moving and hold the current angle
    pub fn stop_oscillation(&mut self) {
        self.actuator.stop();
    }

    pub fn update(&mut self, now: Instant) -> Result<bool, HardwareError> {
        self.actuator.update(now)
    }

    pub const fn angle(&self) -> u16 {
        self.actuator.current()
    }

    pub const fn kind(&self) -> ModeKind {
        self.actuator.kind()
    }

    pub const fn actuator(&self) -> &Actuator<O, u16> {
        &self.actuator
    }

    pub fn actuator_mut(&mut self) -> &mut Actuator<O, u16> {
        &mut self.actuator
    }
}

impl<O: OutputDriver<u16>> Update for Servo<O> {
    fn update(&mut self, now: Instant) -> Result<bool, HardwareError> {
        Servo::update(self, now)
    }
}
