//! Step arithmetic for the values an actuator can drive.
//!
//! A [`Level`] knows how to move toward a target by a bounded amount and how
//! to stay between two endpoints. Every step lands exactly on the target
//! instead of overshooting it.

use core::fmt::Debug;

use crate::color::Rgb;

/// A value that can be stepped along a trajectory.
pub trait Level: Copy + PartialEq + Debug {
    /// Move toward `target` by at most `step`, landing exactly on it.
    fn approach(self, target: Self, step: u16) -> Self;

    /// Returns `true` if `low..=high` is a usable pair of bounds.
    fn ordered(low: Self, high: Self) -> bool;

    /// Clamp `self` into the range spanned by `low` and `high`.
    fn clamp_between(self, low: Self, high: Self) -> Self;
}

macro_rules! impl_scalar_level {
    ($($ty:ty),*) => {
        $(
            impl Level for $ty {
                #[inline]
                fn approach(self, target: Self, step: u16) -> Self {
                    let step = <$ty>::try_from(step).unwrap_or(<$ty>::MAX);
                    if self < target {
                        self.saturating_add(step).min(target)
                    } else if self > target {
                        self.saturating_sub(step).max(target)
                    } else {
                        self
                    }
                }

                #[inline]
                fn ordered(low: Self, high: Self) -> bool {
                    low <= high
                }

                #[inline]
                fn clamp_between(self, low: Self, high: Self) -> Self {
                    self.clamp(low, high)
                }
            }
        )*
    };
}

impl_scalar_level!(u8, u16, i32);

/// Colours step every channel independently toward the matching target
/// channel. Endpoints are not ordered: a fade from red to blue is as valid as
/// one from blue to red.
impl Level for Rgb {
    fn approach(self, target: Self, step: u16) -> Self {
        Rgb {
            r: self.r.approach(target.r, step),
            g: self.g.approach(target.g, step),
            b: self.b.approach(target.b, step),
        }
    }

    fn ordered(_low: Self, _high: Self) -> bool {
        true
    }

    fn clamp_between(self, low: Self, high: Self) -> Self {
        Rgb {
            r: clamp_channel(self.r, low.r, high.r),
            g: clamp_channel(self.g, low.g, high.g),
            b: clamp_channel(self.b, low.b, high.b),
        }
    }
}

#[inline]
fn clamp_channel(value: u8, a: u8, b: u8) -> u8 {
    value.clamp(a.min(b), a.max(b))
}
