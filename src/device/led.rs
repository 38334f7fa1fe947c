use embassy_time::{Duration, Instant};
use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;

use crate::OutputDriver;
use crate::actuator::Actuator;
use crate::bounds::Bounds;
use crate::error::{Error, HardwareError};
use crate::mode::ModeKind;
use crate::output::{DigitalLed, FULL_BRIGHTNESS, PwmLed};
use crate::plan::Plan;
use crate::poller::Update;

/// Time spent on and off when blinking
pub const DEFAULT_BLINK_HALF_PERIOD: Duration = Duration::from_millis(500);
/// Brightness range of a default fade, in percent
pub const DEFAULT_FADE_BOUNDS: Bounds<u8> = Bounds::new(20, 80);
pub const DEFAULT_FADE_STEP: u16 = 5;
pub const DEFAULT_FADE_INTERVAL: Duration = Duration::from_millis(50);

/// Single LED with brightness in percent
pub struct Led<O: OutputDriver<u8>> {
    actuator: Actuator<O, u8>,
}

impl<P: SetDutyCycle> Led<PwmLed<P>> {
    /// LED on a PWM channel
    pub const fn pwm(pwm: P) -> Self {
        Self::new(PwmLed::new(pwm))
    }
}

impl<P: OutputPin> Led<DigitalLed<P>> {
    /// LED on a digital pin (blink only, brightness is on/off)
    pub const fn digital(pin: P) -> Self {
        Self::new(DigitalLed::new(pin))
    }
}

impl<O: OutputDriver<u8>> Led<O> {
    /// Wrap an output that is assumed to start dark
    pub const fn new(output: O) -> Self {
        Self {
            actuator: Actuator::new(output, 0),
        }
    }

    /// Fully on, cancelling any animation
    pub fn on(&mut self) -> Result<(), HardwareError> {
        self.actuator.set_immediate(FULL_BRIGHTNESS)
    }

    /// Fully off, cancelling any animation
    pub fn off(&mut self) -> Result<(), HardwareError> {
        self.actuator.set_immediate(0)
    }

    /// Set brightness in percent (clamped to 100), cancelling any animation
    pub fn set_brightness(&mut self, percent: u8) -> Result<(), HardwareError> {
        self.actuator.set_immediate(percent)
    }

    /// Start blinking, beginning in the off state
    ///
    /// `times` counts full on/off cycles; `None` blinks until stopped.
    pub fn blink(
        &mut self,
        half_period: Duration,
        times: Option<u32>,
        now: Instant,
    ) -> Result<(), Error> {
        self.actuator.configure(
            &Plan::blink(FULL_BRIGHTNESS, 0, half_period, times),
            now,
        )
    }

    /// Start bouncing brightness between `bounds`, beginning at the lower bound
    pub fn fade(
        &mut self,
        bounds: Bounds<u8>,
        step: u16,
        interval: Duration,
        now: Instant,
    ) -> Result<(), Error> {
        self.actuator
            .configure(&Plan::fade(bounds, step, interval), now)
    }

    /// Stop animating and hold the current brightness
    pub fn stop(&mut self) {
        self.actuator.stop();
    }

    pub fn update(&mut self, now: Instant) -> Result<bool, HardwareError> {
        self.actuator.update(now)
    }

    pub const fn brightness(&self) -> u8 {
        self.actuator.current()
    }

    pub const fn kind(&self) -> ModeKind {
        self.actuator.kind()
    }

    pub const fn actuator(&self) -> &Actuator<O, u8> {
        &self.actuator
    }

    pub fn actuator_mut(&mut self) -> &mut Actuator<O, u8> {
        &mut self.actuator
    }

    pub fn into_output(self) -> O {
        self.actuator.into_output()
    }
}

impl<O: OutputDriver<u8>> Update for Led<O> {
    fn update(&mut self, now: Instant) -> Result<bool, HardwareError> {
        Led::update(self, now)
    }
}
