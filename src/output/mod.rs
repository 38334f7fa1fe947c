//! Output adapters.
//!
//! Each adapter translates an abstract value (percent, degrees, colour) into
//! an `embedded-hal` write. Adapters hold no trajectory state. They own
//! their hardware channel exclusively: `release()` silences and returns it,
//! and dropping an adapter that still holds its channel silences it too.

mod led;
mod rgb;
mod servo;

pub use led::{DigitalLed, FULL_BRIGHTNESS, PwmLed};
pub use rgb::{DigitalRgb, Polarity, PwmRgb, RgbConfig};
pub use servo::{SERVO_FREQ_HZ, SERVO_PERIOD_US, ServoConfig, ServoOutput};

use crate::error::HardwareError;

/// Slot for an owned hardware channel that can be handed back
#[derive(Debug)]
pub(crate) struct Held<P>(Option<P>);

impl<P> Held<P> {
    pub(crate) const fn new(channel: P) -> Self {
        Self(Some(channel))
    }

    /// Borrow the channel, failing once it was released
    pub(crate) fn get(&mut self) -> Result<&mut P, HardwareError> {
        self.0.as_mut().ok_or(HardwareError::ChannelReleased)
    }

    pub(crate) fn take(&mut self) -> Option<P> {
        self.0.take()
    }

    pub(crate) const fn is_held(&self) -> bool {
        self.0.is_some()
    }
}
