//! ARGB colors stored as `#AARRGGBB` hex strings in theme files

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 8-bit per channel ARGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Error returned when a color string is not valid hex
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid color '{0}': expected #RRGGBB or #AARRGGBB")]
pub struct InvalidColor(pub String);

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { a: 0xFF, r, g, b }
    }

    pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    pub const fn from_argb32(argb: u32) -> Self {
        Self {
            a: (argb >> 24) as u8,
            r: (argb >> 16) as u8,
            g: (argb >> 8) as u8,
            b: argb as u8,
        }
    }

    pub const fn argb32(self) -> u32 {
        (self.a as u32) << 24 | (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    /// Parse a hex color
    ///
    /// Supports both 6-digit (RRGGBB) and 8-digit (AARRGGBB) formats.
    /// 6-digit colors get full opacity. The leading '#' is optional.
    pub fn parse(hex: &str) -> Option<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let value = u32::from_str_radix(digits, 16).ok()?;
        match digits.len() {
            6 => Some(Self::from_argb32(0xFF00_0000 | value)),
            8 => Some(Self::from_argb32(value)),
            _ => None,
        }
    }

    /// Normalized RGBA components for renderers that work in floats
    pub fn to_rgba_f32(self) -> [f32; 4] {
        [
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
            f32::from(self.a) / 255.0,
        ]
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08X}", self.argb32())
    }
}

impl FromStr for Color {
    type Err = InvalidColor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| InvalidColor(s.to_string()))
    }
}

impl TryFrom<String> for Color {
    type Error = InvalidColor;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_six_digit_is_opaque() {
        assert_eq!(Color::parse("#FF0000"), Some(Color::argb(0xFF, 0xFF, 0, 0)));
        assert_eq!(Color::parse("00ff00"), Some(Color::rgb(0, 0xFF, 0)));
    }

    #[test]
    fn test_parse_eight_digit_keeps_alpha() {
        let color = Color::parse("#7F112233").unwrap();
        assert_eq!(color, Color::argb(0x7F, 0x11, 0x22, 0x33));
        assert_eq!(color.to_string(), "#7F112233");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(Color::parse(""), None);
        assert_eq!(Color::parse("#12345"), None);
        assert_eq!(Color::parse("#GGGGGG"), None);
        assert_eq!(Color::parse("#+1234567"), None);
    }

    #[test]
    fn test_serde_uses_hex_string() {
        let json = serde_json::to_value(Color::from_argb32(0x80FFFFFF)).unwrap();
        assert_eq!(json, serde_json::json!("#80FFFFFF"));

        let back: Color = serde_json::from_value(json).unwrap();
        assert_eq!(back.argb32(), 0x80FFFFFF);
        assert!(serde_json::from_value::<Color>(serde_json::json!(42)).is_err());
    }

    #[test]
    fn test_to_rgba_f32() {
        assert_eq!(Color::rgb(255, 0, 0).to_rgba_f32(), [1.0, 0.0, 0.0, 1.0]);
    }
}
