use embassy_time::{Duration, Instant};

use crate::OutputDriver;
use crate::actuator::Actuator;
use crate::bounds::Bounds;
use crate::color::{BLACK, Rgb, named_colour, parse_hex};
use crate::error::{Error, HardwareError};
use crate::mode::ModeKind;
use crate::plan::Plan;
use crate::poller::Update;

/// Pacing of colour fades (about 50 Hz)
pub const RGB_FADE_INTERVAL: Duration = Duration::from_millis(20);

/// RGB LED with colour fades
pub struct RgbLed<O: OutputDriver<Rgb>> {
    actuator: Actuator<O, Rgb>,
}

impl<O: OutputDriver<Rgb>> RgbLed<O> {
    /// Wrap an output that is assumed to start dark
    pub const fn new(output: O) -> Self {
        Self {
            actuator: Actuator::new(output, BLACK),
        }
    }

    /// Show `colour` immediately, cancelling any fade
    pub fn set_colour(&mut self, colour: Rgb) -> Result<(), HardwareError> {
        self.actuator.set_immediate(colour)
    }

    /// Show a `#RRGGBB` colour immediately
    pub fn set_hex(&mut self, code: &str) -> Result<(), Error> {
        let colour = parse_hex(code)?;
        Ok(self.set_colour(colour)?)
    }

    /// Show a named colour immediately
    pub fn set_named_colour(&mut self, name: &str) -> Result<(), Error> {
        let colour = named_colour(name)?;
        Ok(self.set_colour(colour)?)
    }

    /// Fade every channel toward `colour`, `speed` units per tick (at least 1)
    pub fn fade_to(&mut self, colour: Rgb, speed: u8, now: Instant) -> Result<(), Error> {
        let current = self.actuator.current();
        let plan = Plan::sweep(current, colour, u16::from(speed.max(1)), RGB_FADE_INTERVAL);
        self.actuator.configure(&plan, now)
    }

    /// Pulse back and forth between two colours, beginning at `from`
    pub fn pulse_between(
        &mut self,
        from: Rgb,
        to: Rgb,
        step: u16,
        interval: Duration,
        now: Instant,
    ) -> Result<(), Error> {
        self.actuator
            .configure(&Plan::fade(Bounds::new(from, to), step, interval), now)
    }

    pub fn off(&mut self) -> Result<(), HardwareError> {
        self.set_colour(BLACK)
    }

    pub fn update(&mut self, now: Instant) -> Result<bool, HardwareError> {
        self.actuator.update(now)
    }

    pub const fn colour(&self) -> Rgb {
        self.actuator.current()
    }

    pub const fn kind(&self) -> ModeKind {
        self.actuator.kind()
    }

    pub const fn actuator(&self) -> &Actuator<O, Rgb> {
        &self.actuator
    }

    pub fn actuator_mut(&mut self) -> &mut Actuator<O, Rgb> {
        &mut self.actuator
    }
}

impl<O: OutputDriver<Rgb>> Update for RgbLed<O> {
    fn update(&mut self, now: Instant) -> Result<bool, HardwareError> {
        RgbLed::update(self, now)
    }
}
