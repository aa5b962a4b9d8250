//! Colors and the palette cycling used for multi-category charts.

use crate::error::ChartError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An sRGB color with optional alpha, written as `#RRGGBB` or `#RRGGBBAA`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: Option<u8>,
}

impl Color {
    /// Opaque color from a `0xRRGGBB` literal.
    #[must_use]
    pub const fn hex(rgb: u32) -> Self {
        Self {
            r: (rgb >> 16) as u8,
            g: (rgb >> 8) as u8,
            b: rgb as u8,
            a: None,
        }
    }

    /// Same color with the given alpha channel.
    #[must_use]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a: Some(a), ..self }
    }

    /// Same color without an alpha channel.
    #[must_use]
    pub const fn opaque(self) -> Self {
        Self { a: None, ..self }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)?;
        if let Some(a) = self.a {
            write!(f, "{a:02X}")?;
        }
        Ok(())
    }
}

impl FromStr for Color {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ChartError::InvalidColor(s.to_string());
        let digits = s.strip_prefix('#').ok_or_else(invalid)?;
        if !matches!(digits.len(), 6 | 8) || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());
        Ok(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
            a: if digits.len() == 8 { Some(channel(6)?) } else { None },
        })
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl TryFrom<String> for Color {
    type Error = ChartError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Base colors cycled through for per-category charts.
pub const PALETTE: [Color; 10] = [
    Color::hex(0x3B82F6),
    Color::hex(0x8B5CF6),
    Color::hex(0x10B981),
    Color::hex(0xF59E0B),
    Color::hex(0xEF4444),
    Color::hex(0x06B6D4),
    Color::hex(0x84CC16),
    Color::hex(0xF97316),
    Color::hex(0xEC4899),
    Color::hex(0x6366F1),
];

/// Alpha applied to palette colors for fills (~50% opacity).
pub const FILL_ALPHA: u8 = 0x80;

/// Single-series accent used by line and scatter charts.
pub const ACCENT: Color = Color::hex(0x3B82F6);

/// Darker accent used for scatter point borders.
pub const ACCENT_DARK: Color = Color::hex(0x1D4ED8);

/// Fill and border colors, one pair per category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorSet {
    pub background: Vec<Color>,
    pub border: Vec<Color>,
}

/// Assign `n` colors by cycling [`PALETTE`].
///
/// `border[i]` is `PALETTE[i % 10]`; `background[i]` is the same color with
/// [`FILL_ALPHA`]. Deterministic for a given `n`.
#[must_use]
pub fn colors_for(n: usize) -> ColorSet {
    let border: Vec<Color> = PALETTE.iter().copied().cycle().take(n).collect();
    let background = border.iter().map(|c| c.with_alpha(FILL_ALPHA)).collect();
    ColorSet { background, border }
}
