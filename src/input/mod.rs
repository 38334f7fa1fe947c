//! Polling inputs.
//!
//! Sensors and buttons that follow the same contract as the actuators: call
//! `update(now)` as often as you like and they only do work once their
//! interval has elapsed.

mod button;
mod sound;
mod ultrasonic;

pub use button::{DEFAULT_DEBOUNCE, ToggleButton};
pub use sound::{DEFAULT_SOUND_INTERVAL, LevelSource, SoundTrigger};
pub use ultrasonic::{EchoSensor, HcSr04, Rangefinder, RangefinderConfig, echo_timeout_us};
