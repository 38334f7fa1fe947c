use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use super::Held;
use crate::OutputDriver;
use crate::error::HardwareError;

/// Highest brightness, in percent
pub const FULL_BRIGHTNESS: u8 = 100;

/// LED on a PWM channel; brightness in percent of the native duty range
pub struct PwmLed<P: SetDutyCycle> {
    channel: Held<P>,
}

impl<P: SetDutyCycle> PwmLed<P> {
    pub const fn new(pwm: P) -> Self {
        Self {
            channel: Held::new(pwm),
        }
    }

    /// Turn the LED off and hand back the PWM channel
    pub fn release(&mut self) -> Result<P, HardwareError> {
        self.channel
            .get()?
            .set_duty_cycle_fully_off()
            .map_err(|_| HardwareError::PwmWrite)?;
        #[cfg(feature = "esp32-log")]
        println!("[PwmLed.release] channel released");
        self.channel.take().ok_or(HardwareError::ChannelReleased)
    }

    pub const fn is_held(&self) -> bool {
        self.channel.is_held()
    }
}

impl<P: SetDutyCycle> OutputDriver<u8> for PwmLed<P> {
    fn apply(&mut self, percent: u8) -> Result<(), HardwareError> {
        self.channel
            .get()?
            .set_duty_cycle_percent(percent.min(FULL_BRIGHTNESS))
            .map_err(|_| HardwareError::PwmWrite)
    }

    fn limit(&self, percent: u8) -> u8 {
        percent.min(FULL_BRIGHTNESS)
    }
}

impl<P: SetDutyCycle> Drop for PwmLed<P> {
    fn drop(&mut self) {
        if let Ok(pwm) = self.channel.get() {
            let _ = pwm.set_duty_cycle_fully_off();
        }
    }
}

/// LED on a plain digital pin; any non-zero brightness drives it high
pub struct DigitalLed<P: OutputPin> {
    pin: Held<P>,
}

impl<P: OutputPin> DigitalLed<P> {
    pub const fn new(pin: P) -> Self {
        Self { pin: Held::new(pin) }
    }

    /// Drive the pin low and hand it back
    pub fn release(&mut self) -> Result<P, HardwareError> {
        self.pin
            .get()?
            .set_low()
            .map_err(|_| HardwareError::GpioWrite)?;
        self.pin.take().ok_or(HardwareError::ChannelReleased)
    }

    pub const fn is_held(&self) -> bool {
        self.pin.is_held()
    }
}

impl<P: OutputPin> OutputDriver<u8> for DigitalLed<P> {
    fn apply(&mut self, percent: u8) -> Result<(), HardwareError> {
        let pin = self.pin.get()?;
        let result = if percent > 0 {
            pin.set_high()
        } else {
            pin.set_low()
        };
        result.map_err(|_| HardwareError::GpioWrite)
    }

    fn limit(&self, percent: u8) -> u8 {
        percent.min(FULL_BRIGHTNESS)
    }
}

impl<P: OutputPin> Drop for DigitalLed<P> {
    fn drop(&mut self) {
        if let Ok(pin) = self.pin.get() {
            let _ = pin.set_low();
        }
    }
}
