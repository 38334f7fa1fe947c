//! Three-channel RGB LED.
//!
//! Channels are driven either as PWM duty fractions (smooth) or as plain
//! on/off pins (discrete). Common-anode wiring inverts every channel.

use embedded_hal::digital::{OutputPin, PinState};
use embedded_hal::pwm::SetDutyCycle;

use super::Held;
use crate::OutputDriver;
use crate::color::{BLACK, Rgb};
use crate::error::HardwareError;

/// How the LED package is wired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Polarity {
    /// Channel lights when driven high
    #[default]
    CommonCathode,
    /// Channel lights when driven low
    CommonAnode,
}

impl Polarity {
    /// Duty (0-255) to write for a channel value
    pub const fn duty(self, value: u8) -> u8 {
        match self {
            Self::CommonCathode => value,
            Self::CommonAnode => u8::MAX - value,
        }
    }

    /// Pin state to write for a channel value
    pub const fn pin_state(self, value: u8) -> PinState {
        let lit = value != 0;
        let high = match self {
            Self::CommonCathode => lit,
            Self::CommonAnode => !lit,
        };
        if high { PinState::High } else { PinState::Low }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RgbConfig {
    pub polarity: Polarity,
}

/// RGB LED on three PWM channels
pub struct PwmRgb<R: SetDutyCycle, G: SetDutyCycle, B: SetDutyCycle> {
    channels: Held<(R, G, B)>,
    polarity: Polarity,
}

impl<R: SetDutyCycle, G: SetDutyCycle, B: SetDutyCycle> PwmRgb<R, G, B> {
    pub const fn new(red: R, green: G, blue: B, config: RgbConfig) -> Self {
        Self {
            channels: Held::new((red, green, blue)),
            polarity: config.polarity,
        }
    }

    /// Turn every channel off and hand the channels back
    pub fn release(&mut self) -> Result<(R, G, B), HardwareError> {
        self.apply(BLACK)?;
        self.channels.take().ok_or(HardwareError::ChannelReleased)
    }

    pub const fn polarity(&self) -> Polarity {
        self.polarity
    }
}

fn write_duty<P: SetDutyCycle>(pwm: &mut P, duty: u8) -> Result<(), HardwareError> {
    pwm.set_duty_cycle_fraction(u16::from(duty), u16::from(u8::MAX))
        .map_err(|_| HardwareError::PwmWrite)
}

impl<R: SetDutyCycle, G: SetDutyCycle, B: SetDutyCycle> OutputDriver<Rgb> for PwmRgb<R, G, B> {
    fn apply(&mut self, colour: Rgb) -> Result<(), HardwareError> {
        let polarity = self.polarity;
        let (red, green, blue) = self.channels.get()?;
        write_duty(red, polarity.duty(colour.r))?;
        write_duty(green, polarity.duty(colour.g))?;
        write_duty(blue, polarity.duty(colour.b))
    }
}

impl<R: SetDutyCycle, G: SetDutyCycle, B: SetDutyCycle> Drop for PwmRgb<R, G, B> {
    fn drop(&mut self) {
        if self.channels.is_held() {
            let _ = self.apply(BLACK);
        }
    }
}

/// RGB LED on three digital pins; any non-zero channel value lights it
pub struct DigitalRgb<R: OutputPin, G: OutputPin, B: OutputPin> {
    pins: Held<(R, G, B)>,
    polarity: Polarity,
}

impl<R: OutputPin, G: OutputPin, B: OutputPin> DigitalRgb<R, G, B> {
    pub const fn new(red: R, green: G, blue: B, config: RgbConfig) -> Self {
        Self {
            pins: Held::new((red, green, blue)),
            polarity: config.polarity,
        }
    }

    /// Turn every channel off and hand the pins back
    pub fn release(&mut self) -> Result<(R, G, B), HardwareError> {
        self.apply(BLACK)?;
        self.pins.take().ok_or(HardwareError::ChannelReleased)
    }
}

impl<R: OutputPin, G: OutputPin, B: OutputPin> OutputDriver<Rgb> for DigitalRgb<R, G, B> {
    fn apply(&mut self, colour: Rgb) -> Result<(), HardwareError> {
        let polarity = self.polarity;
        let (red, green, blue) = self.pins.get()?;
        red.set_state(polarity.pin_state(colour.r))
            .map_err(|_| HardwareError::GpioWrite)?;
        green
            .set_state(polarity.pin_state(colour.g))
            .map_err(|_| HardwareError::GpioWrite)?;
        blue.set_state(polarity.pin_state(colour.b))
            .map_err(|_| HardwareError::GpioWrite)
    }
}

impl<R: OutputPin, G: OutputPin, B: OutputPin> Drop for DigitalRgb<R, G, B> {
    fn drop(&mut self) {
        if self.pins.is_held() {
            let _ = self.apply(BLACK);
        }
    }
}
