//! Error types shared by the engine, the output adapters and the polling inputs.
//!
//! Configuration problems are detected synchronously when a trajectory is
//! started. Hardware problems come from an adapter write and never corrupt
//! engine state.

use core::fmt;

/// Every fallible public operation returns this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Parameters passed to a `start_*`/`configure` call were rejected.
    InvalidConfiguration(ConfigError),
    /// The underlying hardware write or read failed.
    Hardware(HardwareError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfiguration(e) => write!(f, "invalid configuration: {e}"),
            Self::Hardware(e) => write!(f, "hardware: {e}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Step size must be strictly positive.
    ZeroStep,
    /// Interval between steps cannot be negative.
    NegativeInterval,
    /// Lower bound is greater than the upper bound.
    InvertedBounds,
    /// A bounded blink must repeat at least once.
    ZeroBlinkCount,
    /// A trajectory endpoint lies outside the hardware range of the output.
    OutOfRange,
    /// Servo pulse calibration is not `min < max <= period`.
    InvalidCalibration,
    /// Colour name is not in the named colour table.
    UnknownColour,
    /// Colour string is not `#RRGGBB`.
    MalformedHex,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroStep => write!(f, "step size must be positive"),
            Self::NegativeInterval => write!(f, "interval must not be negative"),
            Self::InvertedBounds => write!(f, "lower bound exceeds upper bound"),
            Self::ZeroBlinkCount => write!(f, "blink count must be at least one"),
            Self::OutOfRange => write!(f, "value outside hardware range"),
            Self::InvalidCalibration => write!(f, "invalid pulse calibration"),
            Self::UnknownColour => write!(f, "unknown colour name"),
            Self::MalformedHex => write!(f, "malformed hex colour"),
        }
    }
}

impl core::error::Error for ConfigError {}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::InvalidConfiguration(e)
    }
}

// ---------------------------------------------------------------------------
// Hardware errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HardwareError {
    /// PWM duty-cycle write failed.
    PwmWrite,
    /// Digital pin write failed.
    GpioWrite,
    /// Digital pin read failed.
    GpioRead,
    /// Analogue sample could not be taken.
    AdcRead,
    /// The channel was released and can no longer be driven.
    ChannelReleased,
}

impl fmt::Display for HardwareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PwmWrite => write!(f, "PWM write failed"),
            Self::GpioWrite => write!(f, "GPIO write failed"),
            Self::GpioRead => write!(f, "GPIO read failed"),
            Self::AdcRead => write!(f, "ADC read failed"),
            Self::ChannelReleased => write!(f, "channel released"),
        }
    }
}

impl core::error::Error for HardwareError {}

impl From<HardwareError> for Error {
    fn from(e: HardwareError) -> Self {
        Self::Hardware(e)
    }
}

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
