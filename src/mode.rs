//! Actuator modes with compile-time known variants
//!
//! Each variant carries only the state it needs, so a blinking actuator
//! cannot hold a stale bounce direction and an idle one holds nothing.

use crate::bounds::Bounds;

const MODE_NAME_IDLE: &str = "idle";
const MODE_NAME_BLINK: &str = "blink";
const MODE_NAME_FADE: &str = "fade";
const MODE_NAME_SWEEP: &str = "sweep";
const MODE_NAME_OSCILLATE: &str = "oscillate";

const MODE_ID_IDLE: u8 = 0;
const MODE_ID_BLINK: u8 = 1;
const MODE_ID_FADE: u8 = 2;
const MODE_ID_SWEEP: u8 = 3;
const MODE_ID_OSCILLATE: u8 = 4;

/// Travel direction of a bouncing mode
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Direction {
    /// Moving toward the upper bound (+1)
    #[default]
    Rising,
    /// Moving toward the lower bound (-1)
    Falling,
}

impl Direction {
    /// Sign of the direction
    pub const fn sign(self) -> i8 {
        match self {
            Self::Rising => 1,
            Self::Falling => -1,
        }
    }
}

/// Live mode state of an actuator
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode<T> {
    /// No scheduled transition
    Idle,
    /// Toggle between two values every interval
    Blink {
        on: T,
        off: T,
        /// Whether the last applied value was `on`
        lit: bool,
        /// Half-periods completed so far
        toggles: u32,
        /// Stop after this many full on/off cycles
        times: Option<u32>,
    },
    /// Bounce between bounds (LED brightness, colour pulse)
    Fade {
        bounds: Bounds<T>,
        direction: Direction,
    },
    /// Step once toward `target`, then go idle
    Sweep { target: T },
    /// Bounce between bounds (servo angle)
    Oscillate {
        bounds: Bounds<T>,
        direction: Direction,
    },
}

/// Mode identifier for external observation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum ModeKind {
    Idle = MODE_ID_IDLE,
    Blink = MODE_ID_BLINK,
    Fade = MODE_ID_FADE,
    Sweep = MODE_ID_SWEEP,
    Oscillate = MODE_ID_OSCILLATE,
}

impl ModeKind {
    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            MODE_ID_IDLE => Self::Idle,
            MODE_ID_BLINK => Self::Blink,
            MODE_ID_FADE => Self::Fade,
            MODE_ID_SWEEP => Self::Sweep,
            MODE_ID_OSCILLATE => Self::Oscillate,
            _ => return None,
        })
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => MODE_NAME_IDLE,
            Self::Blink => MODE_NAME_BLINK,
            Self::Fade => MODE_NAME_FADE,
            Self::Sweep => MODE_NAME_SWEEP,
            Self::Oscillate => MODE_NAME_OSCILLATE,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            MODE_NAME_IDLE => Some(Self::Idle),
            MODE_NAME_BLINK => Some(Self::Blink),
            MODE_NAME_FADE => Some(Self::Fade),
            MODE_NAME_SWEEP => Some(Self::Sweep),
            MODE_NAME_OSCILLATE => Some(Self::Oscillate),
            _ => None,
        }
    }
}

impl<T> Mode<T> {
    /// Get the mode identifier
    pub const fn kind(&self) -> ModeKind {
        match self {
            Self::Idle => ModeKind::Idle,
            Self::Blink { .. } => ModeKind::Blink,
            Self::Fade { .. } => ModeKind::Fade,
            Self::Sweep { .. } => ModeKind::Sweep,
            Self::Oscillate { .. } => ModeKind::Oscillate,
        }
    }

    pub const fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Bounds of the active bouncing mode, if any
    pub const fn bounds(&self) -> Option<&Bounds<T>> {
        match self {
            Self::Fade { bounds, .. } | Self::Oscillate { bounds, .. } => Some(bounds),
            _ => None,
        }
    }

    /// Direction of the active bouncing mode, if any
    pub const fn direction(&self) -> Option<Direction> {
        match self {
            Self::Fade { direction, .. } | Self::Oscillate { direction, .. } => Some(*direction),
            _ => None,
        }
    }
}
