use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// An 8-bit-per-channel RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_hex(self) -> ColorHex {
        to_hex(self.r, self.g, self.b)
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

/// Canonical `#rrggbb` form of a color: lowercase, always seven characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ColorHex(String);

impl ColorHex {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn to_rgb(&self) -> Rgb {
        // Construction guarantees "#" followed by six hex digits.
        let channel = |at: usize| u8::from_str_radix(&self.0[at..at + 2], 16).unwrap_or_default();
        Rgb::new(channel(1), channel(3), channel(5))
    }
}

/// Encodes a color as `#rrggbb`, each channel as two zero-padded lowercase hex digits.
pub fn to_hex(r: u8, g: u8, b: u8) -> ColorHex {
    ColorHex(format!("#{r:02x}{g:02x}{b:02x}"))
}

impl fmt::Display for ColorHex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ColorHex {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<Rgb> for ColorHex {
    fn from(rgb: Rgb) -> Self {
        rgb.to_hex()
    }
}

impl From<ColorHex> for String {
    fn from(hex: ColorHex) -> Self {
        hex.0
    }
}

impl FromStr for ColorHex {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix('#')
            .ok_or_else(|| AppError::InvalidInput(format!("color {s:?} must start with '#'")))?;
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(AppError::InvalidInput(format!(
                "color {s:?} must be '#' followed by six hex digits"
            )));
        }
        Ok(ColorHex(format!("#{}", digits.to_ascii_lowercase())))
    }
}

impl TryFrom<String> for ColorHex {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
