use embassy_time::{Duration, Instant};
use embedded_hal::digital::InputPin;

use crate::error::HardwareError;
use crate::gate::IntervalGate;
use crate::poller::Update;

/// Minimum time between two accepted presses
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(200);

/// Active-low push button that flips a stored state on each press
pub struct ToggleButton<P> {
    pin: P,
    gate: IntervalGate,
    state: bool,
}

impl<P: InputPin> ToggleButton<P> {
    /// Presses within `debounce` of `now` are ignored
    pub const fn new(pin: P, debounce: Duration, now: Instant) -> Self {
        Self {
            pin,
            gate: IntervalGate::new(debounce, now),
            state: false,
        }
    }

    /// Sample the pin; returns `Ok(true)` when a press toggled the state
    pub fn update(&mut self, now: Instant) -> Result<bool, HardwareError> {
        let pressed = self.pin.is_low().map_err(|_| HardwareError::GpioRead)?;
        if !pressed || !self.gate.try_pass(now) {
            return Ok(false);
        }
        self.state = !self.state;
        Ok(true)
    }

    pub const fn state(&self) -> bool {
        self.state
    }

    pub fn release(self) -> P {
        self.pin
    }
}

impl<P: InputPin> Update for ToggleButton<P> {
    fn update(&mut self, now: Instant) -> Result<bool, HardwareError> {
        ToggleButton::update(self, now)
    }
}
