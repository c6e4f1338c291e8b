//! Hex color strings used by grid settings.

use serde::{Deserialize, Serialize};

/// An 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a CSS hex color: `#rgb`, `#rrggbb` or `#rrggbbaa`.
    pub fn parse_hex(s: &str) -> Option<Self> {
        let hex = s.trim().strip_prefix('#')?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
        match hex.len() {
            3 => {
                let short = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok().map(|v| v * 17);
                Some(Self::new(short(0)?, short(1)?, short(2)?, 255))
            }
            6 => Some(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?, 255)),
            8 => Some(Self::new(
                channel(0..2)?,
                channel(2..4)?,
                channel(4..6)?,
                channel(6..8)?,
            )),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_long_form() {
        assert_eq!(Rgba8::parse_hex("#e0e0e0"), Some(Rgba8::new(224, 224, 224, 255)));
        assert_eq!(Rgba8::parse_hex(" #FF000080 "), Some(Rgba8::new(255, 0, 0, 128)));
    }

    #[test]
    fn test_parse_short_form() {
        assert_eq!(Rgba8::parse_hex("#fff"), Some(Rgba8::new(255, 255, 255, 255)));
    }

    #[test]
    fn test_rejects_garbage() {
        assert_eq!(Rgba8::parse_hex("e0e0e0"), None);
        assert_eq!(Rgba8::parse_hex("#e0e0e"), None);
        assert_eq!(Rgba8::parse_hex("#ggg"), None);
        assert_eq!(Rgba8::parse_hex("#éé"), None);
    }
}
