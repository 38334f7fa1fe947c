//! HC-SR04 style ultrasonic rangefinder.
//!
//! [`Rangefinder`] refreshes a cached distance at a fixed interval. The
//! actual trigger/echo exchange is delegated to an [`EchoSensor`], which is
//! the only place that waits, and only up to a bounded echo timeout.

use embassy_time::{Duration, Instant};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::error::HardwareError;
use crate::gate::IntervalGate;
use crate::poller::Update;

/// Speed of sound, in centimetres per microsecond
const SOUND_CM_PER_US: f32 = 0.0343;

/// Trigger a ping and time the echo
pub trait EchoSensor {
    /// Echo pulse width in microseconds, or `None` if nothing came back
    /// within `timeout_us`
    fn echo_us(&mut self, timeout_us: u32) -> Result<Option<u32>, HardwareError>;
}

/// Round-trip time for an object at `max_cm`
#[allow(clippy::cast_lossless)]
pub const fn echo_timeout_us(max_cm: u16) -> u32 {
    // 2 * max_cm / 0.0343 cm/us
    (max_cm as u32) * 20_000 / 343
}

/// Echo timing on a trigger pin, an echo pin and a microsecond delay
///
/// Pulse width is counted in 1 µs delay steps, so its resolution is bounded
/// by the delay provider.
pub struct HcSr04<T, E, D> {
    trigger: T,
    echo: E,
    delay: D,
}

impl<T: OutputPin, E: InputPin, D: DelayNs> HcSr04<T, E, D> {
    pub const fn new(trigger: T, echo: E, delay: D) -> Self {
        Self {
            trigger,
            echo,
            delay,
        }
    }

    pub fn release(self) -> (T, E, D) {
        (self.trigger, self.echo, self.delay)
    }

    fn pulse(&mut self) -> Result<(), HardwareError> {
        self.trigger.set_low().map_err(|_| HardwareError::GpioWrite)?;
        self.delay.delay_us(2);
        self.trigger.set_high().map_err(|_| HardwareError::GpioWrite)?;
        self.delay.delay_us(10);
        self.trigger.set_low().map_err(|_| HardwareError::GpioWrite)
    }

    fn echo_high(&mut self) -> Result<bool, HardwareError> {
        self.echo.is_high().map_err(|_| HardwareError::GpioRead)
    }
}

impl<T: OutputPin, E: InputPin, D: DelayNs> EchoSensor for HcSr04<T, E, D> {
    fn echo_us(&mut self, timeout_us: u32) -> Result<Option<u32>, HardwareError> {
        self.pulse()?;

        let mut waited = 0;
        while !self.echo_high()? {
            if waited >= timeout_us {
                return Ok(None);
            }
            self.delay.delay_us(1);
            waited += 1;
        }

        let mut width = 0;
        while self.echo_high()? {
            if width >= timeout_us {
                return Ok(None);
            }
            self.delay.delay_us(1);
            width += 1;
        }
        Ok(Some(width))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangefinderConfig {
    /// Farthest distance worth waiting for
    pub max_cm: u16,
    /// Time between measurements
    pub interval: Duration,
}

impl Default for RangefinderConfig {
    fn default() -> Self {
        Self {
            max_cm: 400,
            interval: Duration::from_millis(100),
        }
    }
}

/// Periodically refreshed distance reading
pub struct Rangefinder<S> {
    sensor: S,
    gate: IntervalGate,
    timeout_us: u32,
    distance_cm: f32,
}

impl<S: EchoSensor> Rangefinder<S> {
    /// The first measurement happens one interval after `now`
    pub fn new(sensor: S, config: RangefinderConfig, now: Instant) -> Self {
        Self {
            sensor,
            gate: IntervalGate::new(config.interval, now),
            timeout_us: echo_timeout_us(config.max_cm),
            distance_cm: 0.0,
        }
    }

    /// Measure if the interval elapsed
    ///
    /// Returns `Ok(true)` when the cached distance was refreshed. A missing
    /// echo keeps the previous distance.
    pub fn update(&mut self, now: Instant) -> Result<bool, HardwareError> {
        if !self.gate.is_open(now) {
            return Ok(false);
        }
        let reading = self.measure()?;
        self.gate.mark(now);
        match reading {
            Some(cm) => {
                self.distance_cm = cm;
                Ok(true)
            }
            None => {
                #[cfg(feature = "esp32-log")]
                println!("[Rangefinder.update] no echo, keeping {}cm", self.distance_cm);
                Ok(false)
            }
        }
    }

    /// One measurement right now, bypassing the interval
    #[allow(clippy::cast_precision_loss)]
    pub fn measure(&mut self) -> Result<Option<f32>, HardwareError> {
        let echo = self.sensor.echo_us(self.timeout_us)?;
        Ok(echo
            .filter(|us| *us > 0)
            .map(|us| us as f32 * SOUND_CM_PER_US / 2.0))
    }

    /// Average of `count` measurements spaced by `gap`, ignoring lost echoes
    ///
    /// Blocking; meant for calibration, not for the polling loop.
    #[allow(clippy::cast_precision_loss)]
    pub fn average<D: DelayNs>(
        &mut self,
        count: u8,
        gap: Duration,
        delay: &mut D,
    ) -> Result<Option<f32>, HardwareError> {
        let mut sum = 0.0;
        let mut valid = 0u8;
        for _ in 0..count {
            if let Some(cm) = self.measure()? {
                sum += cm;
                valid += 1;
            }
            delay.delay_ms(u32::try_from(gap.as_millis()).unwrap_or(u32::MAX));
        }
        Ok((valid > 0).then(|| sum / f32::from(valid)))
    }

    /// Last good distance in centimetres (0 before the first echo)
    pub const fn distance_cm(&self) -> f32 {
        self.distance_cm
    }

    pub fn distance_mm(&self) -> f32 {
        self.distance_cm * 10.0
    }

    /// Returns `true` if an object was seen within `threshold_cm`
    pub fn near(&self, threshold_cm: f32) -> bool {
        self.distance_cm > 0.0 && self.distance_cm <= threshold_cm
    }

    /// Change the refresh interval, counting from `now`
    pub fn set_interval(&mut self, interval: Duration, now: Instant) {
        self.gate.reset(interval, now);
    }

    pub const fn interval(&self) -> Duration {
        self.gate.interval()
    }

    pub const fn timeout_us(&self) -> u32 {
        self.timeout_us
    }
}

impl<S: EchoSensor> Update for Rangefinder<S> {
    fn update(&mut self, now: Instant) -> Result<bool, HardwareError> {
        Rangefinder::update(self, now)
    }
}
