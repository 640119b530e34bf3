use std::fmt;

use serde::{Deserialize, Serialize};

use crate::foundation::error::{XenftError, XenftResult};

pub use kurbo::Point;

/// Logical drawing surface size in user units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Canvas {
    /// Width in logical units.
    pub width: u32,
    /// Height in logical units.
    pub height: u32,
}

impl Canvas {
    /// The fixed 400x400 canvas every token image is laid out on.
    pub const TOKEN: Canvas = Canvas {
        width: 400,
        height: 400,
    };

    /// Canvas center point.
    pub fn center(self) -> Point {
        Point::new(f64::from(self.width) / 2.0, f64::from(self.height) / 2.0)
    }
}

/// Opaque sRGB color. Serialized as a `#rrggbb` hex string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// Apex rarity color.
    pub const GOLD: Color = Color::rgb(0xFF, 0xD7, 0x00);
    /// Limited rarity color.
    pub const SILVER: Color = Color::rgb(0xC0, 0xC0, 0xC0);
    /// Common rarity color.
    pub const BRONZE: Color = Color::rgb(0xCD, 0x7F, 0x32);
    /// Color used when classification fails.
    pub const NEUTRAL_GRAY: Color = Color::rgb(0x80, 0x80, 0x80);
    /// Plain white.
    pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);
    /// Title color of the error image.
    pub const ERROR_RED: Color = Color::rgb(0xFF, 0x44, 0x44);
    /// Background of the error image.
    pub const ERROR_BACKGROUND: Color = Color::rgb(0x1A, 0x1A, 0x1A);

    /// Build a color from its channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB`, `RRGGBB` or the short `#RGB` form (case-insensitive).
    pub fn from_hex(s: &str) -> XenftResult<Self> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);

        fn hex_byte(pair: &str) -> XenftResult<u8> {
            u8::from_str_radix(pair, 16)
                .map_err(|_| XenftError::validation(format!("invalid hex byte \"{pair}\"")))
        }

        if !s.is_ascii() {
            return Err(XenftError::validation("hex color must be ASCII"));
        }

        match s.len() {
            6 => Ok(Self::rgb(
                hex_byte(&s[0..2])?,
                hex_byte(&s[2..4])?,
                hex_byte(&s[4..6])?,
            )),
            3 => {
                let r = hex_byte(&s[0..1])?;
                let g = hex_byte(&s[1..2])?;
                let b = hex_byte(&s[2..3])?;
                Ok(Self::rgb(r * 17, g * 17, b * 17))
            }
            _ => Err(XenftError::validation(
                "hex color must be #RRGGBB or #RGB (case-insensitive)",
            )),
        }
    }

    /// Lowercase `#rrggbb` form, as written into SVG fills.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Hex(String),
            RgbObj { r: u8, g: u8, b: u8 },
            Arr([u8; 3]),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Hex(s) => Self::from_hex(&s).map_err(serde::de::Error::custom),
            Repr::RgbObj { r, g, b } => Ok(Self::rgb(r, g, b)),
            Repr::Arr([r, g, b]) => Ok(Self::rgb(r, g, b)),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
