use crate::error::ConfigError;
use crate::level::Level;

/// Endpoints of a bounded trajectory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds<T> {
    pub low: T,
    pub high: T,
}

impl<T: Level> Bounds<T> {
    /// Create bounds without validation
    pub const fn new(low: T, high: T) -> Self {
        Self { low, high }
    }

    /// Create bounds, rejecting `low > high`
    pub fn checked(low: T, high: T) -> Result<Self, ConfigError> {
        let bounds = Self::new(low, high);
        bounds.validate()?;
        Ok(bounds)
    }

    pub(crate) fn validate(self) -> Result<(), ConfigError> {
        if T::ordered(self.low, self.high) {
            Ok(())
        } else {
            Err(ConfigError::InvertedBounds)
        }
    }

    /// Clamp a value into the bounds
    pub fn clamp(self, value: T) -> T {
        value.clamp_between(self.low, self.high)
    }

    /// Returns `true` if the value lies within the bounds
    pub fn contains(self, value: T) -> bool {
        self.clamp(value) == value
    }
}
