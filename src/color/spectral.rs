use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Packed `0xRRGGBB` display colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(pub u32);

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid hex colour {0:?}")]
pub struct ColorParseError(pub String);

impl Color {
    pub const WHITE: Color = Color(0xffffff);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    pub fn components(self) -> (u8, u8, u8) {
        ((self.0 >> 16) as u8, (self.0 >> 8) as u8, self.0 as u8)
    }

    pub fn to_hex(self) -> String {
        let (r, g, b) = self.components();
        format!("#{:02X}{:02X}{:02X}", r, g, b)
    }

    pub fn from_hex(s: &str) -> Result<Self, ColorParseError> {
        let digits = s.trim().trim_start_matches('#').trim_start_matches("0x");
        if digits.len() != 6 {
            return Err(ColorParseError(s.to_string()));
        }
        u32::from_str_radix(digits, 16)
            .map(Color)
            .map_err(|_| ColorParseError(s.to_string()))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

/// Harvard spectral classes the viewer knows how to colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpectralClass {
    O,
    B,
    A,
    F,
    G,
    K,
    M,
    L,
    T,
    Y,
}

impl SpectralClass {
    /// Classifies a code such as `G2V` by its first letter, ignoring case.
    pub fn from_code(code: &str) -> Option<Self> {
        let first = code.trim_start().chars().next()?.to_ascii_uppercase();
        let class = match first {
            'O' => SpectralClass::O,
            'B' => SpectralClass::B,
            'A' => SpectralClass::A,
            'F' => SpectralClass::F,
            'G' => SpectralClass::G,
            'K' => SpectralClass::K,
            'M' => SpectralClass::M,
            'L' => SpectralClass::L,
            'T' => SpectralClass::T,
            'Y' => SpectralClass::Y,
            _ => return None,
        };
        Some(class)
    }

    pub fn color(self) -> Color {
        match self {
            SpectralClass::O => Color(0x9bb0ff),
            SpectralClass::B => Color(0xaabfff),
            SpectralClass::A => Color(0xcad7ff),
            SpectralClass::F => Color(0xf8f7ff),
            SpectralClass::G => Color(0xfff4ea),
            SpectralClass::K => Color(0xffd2a1),
            SpectralClass::M => Color(0xffcc6f),
            SpectralClass::L => Color(0xff8c42),
            SpectralClass::T => Color(0xd2691e),
            SpectralClass::Y => Color(0x8b4513),
        }
    }
}

impl fmt::Display for SpectralClass {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Display colour for a spectral type; unknown or missing types are white.
pub fn spectral_color(spectral_type: Option<&str>) -> Color {
    spectral_type
        .and_then(SpectralClass::from_code)
        .map(SpectralClass::color)
        .unwrap_or(Color::WHITE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_letter_decides() {
        assert_eq!(spectral_color(Some("G2V")), SpectralClass::G.color());
        assert_eq!(spectral_color(Some("M5.5Ve")), SpectralClass::M.color());
    }

    #[test]
    fn case_insensitive() {
        assert_eq!(spectral_color(Some("g2v")), spectral_color(Some("G2V")));
    }

    #[test]
    fn empty_or_unknown_is_white() {
        assert_eq!(spectral_color(None), Color::WHITE);
        assert_eq!(spectral_color(Some("")), Color::WHITE);
        assert_eq!(spectral_color(Some("DA2")), Color::WHITE);
    }

    #[test]
    fn hex_roundtrip() {
        let c = Color::rgb(0x44, 0x55, 0x77);
        assert_eq!(c, Color(0x445577));
        assert_eq!(c.to_hex(), "#445577");
        assert_eq!(Color::from_hex("#445577").unwrap(), c);
        assert_eq!(Color::from_hex("0x445577").unwrap(), c);
        assert!(Color::from_hex("#4455").is_err());
    }
}
