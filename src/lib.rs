#![no_std]

pub mod actuator;
pub mod bounds;
pub mod cancel;
pub mod color;
pub mod command;
pub mod device;
pub mod error;
pub mod gate;
pub mod input;
pub mod level;
pub mod mode;
pub mod output;
pub mod plan;
pub mod poller;
pub mod timeline;

pub use actuator::Actuator;
pub use bounds::Bounds;
pub use cancel::CancelToken;
pub use command::{Command, CommandQueue};
pub use device::{Led, RgbLed, Servo};
pub use error::{ConfigError, Error, HardwareError, Result};
pub use gate::IntervalGate;
pub use level::Level;
pub use mode::{Direction, Mode, ModeKind};
pub use plan::{Motion, Plan};
pub use poller::{PollError, Poller, RunReport, Update};
pub use timeline::{Step, Timeline};

pub use color::Rgb;
pub use embassy_time::{Duration, Instant};

/// Abstract output driver trait
///
/// Implement this trait to drive a new kind of hardware channel.
/// Actuators are generic over this trait.
pub trait OutputDriver<T> {
    /// Write a value to the hardware
    fn apply(&mut self, value: T) -> core::result::Result<(), HardwareError>;

    /// Clamp a value into the range this output can represent
    fn limit(&self, value: T) -> T {
        value
    }
}
