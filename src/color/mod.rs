mod named;

pub use named::{NAMED_COLOURS, named_colour, parse_hex, rgb_from_u32};
use smart_leds::RGB8;

pub type Rgb = RGB8;

/// All channels off
pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
