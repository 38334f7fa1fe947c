//! Hobby servo on a 50 Hz PWM channel.
//!
//! The angle maps linearly onto a calibrated pulse width, and the pulse width
//! is written as a fraction of the 20 ms carrier period. The PWM channel must
//! already run at [`SERVO_FREQ_HZ`].

use embedded_hal::pwm::SetDutyCycle;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use super::Held;
use crate::OutputDriver;
use crate::error::{ConfigError, HardwareError};

/// Carrier frequency expected by standard hobby servos
pub const SERVO_FREQ_HZ: u32 = 50;

/// Carrier period at [`SERVO_FREQ_HZ`]
pub const SERVO_PERIOD_US: u16 = 20_000;

/// Pulse calibration and angular range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServoConfig {
    /// Pulse width at 0°
    pub min_us: u16,
    /// Pulse width at `max_angle`
    pub max_us: u16,
    /// Largest reachable angle, in degrees
    pub max_angle: u16,
}

impl Default for ServoConfig {
    fn default() -> Self {
        Self {
            min_us: 500,
            max_us: 2500,
            max_angle: 180,
        }
    }
}

impl ServoConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_us >= self.max_us || self.max_us > SERVO_PERIOD_US || self.max_angle == 0 {
            return Err(ConfigError::InvalidCalibration);
        }
        Ok(())
    }

    /// Pulse width for `angle`, clamped to the angular range
    #[allow(clippy::cast_possible_truncation)]
    pub fn pulse_us(&self, angle: u16) -> u16 {
        let angle = u32::from(angle.min(self.max_angle));
        let span = u32::from(self.max_us - self.min_us);
        let offset = span * angle / u32::from(self.max_angle);
        self.min_us + offset as u16
    }
}

/// Servo adapter; values are angles in degrees
pub struct ServoOutput<P: SetDutyCycle> {
    channel: Held<P>,
    config: ServoConfig,
}

impl<P: SetDutyCycle> ServoOutput<P> {
    pub fn new(pwm: P, config: ServoConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            channel: Held::new(pwm),
            config,
        })
    }

    pub const fn config(&self) -> &ServoConfig {
        &self.config
    }

    /// Replace the pulse calibration; `None` keeps the current value
    ///
    /// Takes effect on the next write.
    pub fn calibrate(&mut self, min_us: Option<u16>, max_us: Option<u16>) -> Result<(), ConfigError> {
        let config = ServoConfig {
            min_us: min_us.unwrap_or(self.config.min_us),
            max_us: max_us.unwrap_or(self.config.max_us),
            ..self.config
        };
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Stop the pulse train so the servo relaxes, and hand back the channel
    pub fn release(&mut self) -> Result<P, HardwareError> {
        self.channel
            .get()?
            .set_duty_cycle_fully_off()
            .map_err(|_| HardwareError::PwmWrite)?;
        #[cfg(feature = "esp32-log")]
        println!("[ServoOutput.release] pulse stopped");
        self.channel.take().ok_or(HardwareError::ChannelReleased)
    }

    pub const fn is_held(&self) -> bool {
        self.channel.is_held()
    }
}

impl<P: SetDutyCycle> OutputDriver<u16> for ServoOutput<P> {
    fn apply(&mut self, angle: u16) -> Result<(), HardwareError> {
        let pulse = self.config.pulse_us(angle);
        self.channel
            .get()?
            .set_duty_cycle_fraction(pulse, SERVO_PERIOD_US)
            .map_err(|_| HardwareError::PwmWrite)
    }

    fn limit(&self, angle: u16) -> u16 {
        angle.min(self.config.max_angle)
    }
}

impl<P: SetDutyCycle> Drop for ServoOutput<P> {
    fn drop(&mut self) {
        if let Ok(pwm) = self.channel.get() {
            let _ = pwm.set_duty_cycle_fully_off();
        }
    }
}
