//! Color parsing, formatting and channel math for ARGB light colors.
//!
//! Colors use the light API format `0xAARRGGBB`. Alpha is a dimmer applied
//! to the RGB components, not a compositing factor.

/// Maximum value of a single color component.
pub const MAX_BRIGHTNESS: u32 = 255;

/// Parse a color string into `0xAARRGGBB`.
///
/// Accepts:
/// - Hex with alpha: `"#80FF0000"`, `"0x80FF0000"`, `"80ff0000"`
/// - Hex without alpha (alpha = `FF`): `"#FF0000"`, `"FF0000"`
/// - Named: `"red"`, `"green"`, `"blue"`, `"white"`, `"orange"`, `"yellow"`, `"purple"`, `"cyan"`, `"off"`
pub fn parse_color(s: &str) -> crate::error::Result<u32> {
    let s = s.trim();

    match s.to_lowercase().as_str() {
        "red" => return Ok(0xFFFF_0000),
        "green" => return Ok(0xFF00_FF00),
        "blue" => return Ok(0xFF00_00FF),
        "white" => return Ok(0xFFFF_FFFF),
        "orange" => return Ok(0xFFFF_8000),
        "yellow" => return Ok(0xFFFF_FF00),
        "purple" => return Ok(0xFF80_00FF),
        "cyan" => return Ok(0xFF00_FFFF),
        "off" | "black" => return Ok(0x0000_0000),
        _ => {}
    }

    let hex = s
        .strip_prefix('#')
        .or_else(|| s.strip_prefix("0x"))
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(crate::LightError::Color(format!("Invalid hex color: {s}")));
    }
    let val = u32::from_str_radix(hex, 16)
        .map_err(|_| crate::LightError::Color(format!("Invalid hex color: {s}")))?;
    match hex.len() {
        6 => Ok(0xFF00_0000 | val),
        8 => Ok(val),
        _ => Err(crate::LightError::Color(format!(
            "Invalid color: {s} (use #RRGGBB, #AARRGGBB or a color name)"
        ))),
    }
}

/// Format a color as `#AARRGGBB`.
pub fn format_color(color: u32) -> String {
    format!("#{color:08X}")
}

/// The four 8-bit components of an ARGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Argb {
    pub alpha: u8,
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Argb {
    pub fn from_color(color: u32) -> Self {
        let [alpha, red, green, blue] = color.to_be_bytes();
        Argb {
            alpha,
            red,
            green,
            blue,
        }
    }

    /// RGB components with alpha applied as a dimmer (`c * alpha / 255`,
    /// truncating). Fully opaque colors pass through unchanged.
    pub fn dimmed(self) -> (u8, u8, u8) {
        if self.alpha == 0xFF {
            return (self.red, self.green, self.blue);
        }
        let alpha = u32::from(self.alpha);
        let scale = |c: u8| (u32::from(c) * alpha / MAX_BRIGHTNESS) as u8;
        (scale(self.red), scale(self.green), scale(self.blue))
    }
}

/// Luma of the RGB part of a color, `(77R + 150G + 29B) >> 8`.
pub fn rgb_to_brightness(color: u32) -> u32 {
    let Argb {
        red, green, blue, ..
    } = Argb::from_color(color);
    (77 * u32::from(red) + 150 * u32::from(green) + 29 * u32::from(blue)) >> 8
}
