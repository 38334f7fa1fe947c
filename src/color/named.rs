use crate::color::Rgb;
use crate::error::ConfigError;

/// Colours that can be requested by name (lowercase)
pub const NAMED_COLOURS: [(&str, Rgb); 11] = [
    ("red", rgb_from_u32(0xFF_00_00)),
    ("green", rgb_from_u32(0x00_FF_00)),
    ("blue", rgb_from_u32(0x00_00_FF)),
    ("white", rgb_from_u32(0xFF_FF_FF)),
    ("black", rgb_from_u32(0x00_00_00)),
    ("yellow", rgb_from_u32(0xFF_FF_00)),
    ("cyan", rgb_from_u32(0x00_FF_FF)),
    ("magenta", rgb_from_u32(0xFF_00_FF)),
    ("orange", rgb_from_u32(0xFF_A5_00)),
    ("purple", rgb_from_u32(0x80_00_80)),
    ("pink", rgb_from_u32(0xFF_C0_CB)),
];

/// Create an RGB color from a u32 value (0xRRGGBB format)
#[allow(clippy::cast_possible_truncation)]
pub const fn rgb_from_u32(color: u32) -> Rgb {
    Rgb {
        r: ((color >> 16) & 0xFF) as u8,
        g: ((color >> 8) & 0xFF) as u8,
        b: (color & 0xFF) as u8,
    }
}

/// Look up a colour by name, ignoring ASCII case
pub fn named_colour(name: &str) -> Result<Rgb, ConfigError> {
    NAMED_COLOURS
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(name))
        .map(|(_, colour)| *colour)
        .ok_or(ConfigError::UnknownColour)
}

/// Parse `#RRGGBB` (the leading `#` is optional)
pub fn parse_hex(code: &str) -> Result<Rgb, ConfigError> {
    let digits = code.trim_start_matches('#');
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ConfigError::MalformedHex);
    }
    u32::from_str_radix(digits, 16)
        .map(rgb_from_u32)
        .map_err(|_| ConfigError::MalformedHex)
}
