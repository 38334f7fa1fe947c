//! Device-level surfaces over [`Actuator`](crate::Actuator).
//!
//! These wrappers name the operations a sketch actually wants (`blink`,
//! `sweep`, `fade_to`, ...) and pick sensible pacing defaults. Everything
//! still runs through one actuator and its `update()`.

mod led;
mod rgb;
mod servo;

pub use led::{
    DEFAULT_BLINK_HALF_PERIOD, DEFAULT_FADE_BOUNDS, DEFAULT_FADE_INTERVAL, DEFAULT_FADE_STEP, Led,
};
pub use rgb::{RGB_FADE_INTERVAL, RgbLed};
pub use servo::{DEFAULT_SERVO_INTERVAL, Servo};
