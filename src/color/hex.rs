//! Conversion between colors and `#rrggbb` strings

use super::Color;
use crate::io::error::{Result, invalid_parameter};

/// Render a color as `#rrggbb` using lowercase hex digits
pub fn color_to_hex(color: Color) -> String {
    let [r, g, b] = color;
    format!("#{r:02x}{g:02x}{b:02x}")
}

/// Parse a `#rrggbb` or `rrggbb` string in either letter case
///
/// # Errors
///
/// Returns an error if the string is not exactly six hex digits after the
/// optional leading `#`
pub fn hex_to_color(hex: &str) -> Result<Color> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid_parameter(
            "hex",
            &hex,
            &"expected six hex digits in the form #rrggbb",
        ));
    }

    let mut color = [0u8; 3];
    for (channel, value) in color.iter_mut().enumerate() {
        let start = channel * 2;
        let pair = digits
            .get(start..start + 2)
            .ok_or_else(|| invalid_parameter("hex", &hex, &"truncated channel"))?;
        *value = u8::from_str_radix(pair, 16)
            .map_err(|e| invalid_parameter("hex", &hex, &e))?;
    }
    Ok(color)
}
