use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::foundation::{core::Color, time};

/// Length of one palette cycle in days.
pub const CYCLE_DAYS: u64 = 30;
/// Number of palettes in the rotation.
pub const CYCLE_COUNT: usize = 12;

/// Four fixed colors making up one palette.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    /// Display name.
    pub name: &'static str,
    /// Circle fill.
    pub primary: Color,
    /// Ring outline.
    pub secondary: Color,
    /// Decoration lines.
    pub tertiary: Color,
    /// Canvas background.
    pub background: Color,
}

const fn palette(
    name: &'static str,
    primary: Color,
    secondary: Color,
    tertiary: Color,
    background: Color,
) -> Palette {
    Palette {
        name,
        primary,
        secondary,
        tertiary,
        background,
    }
}

/// The rotation, indexed by cycle.
pub const PALETTES: [Palette; CYCLE_COUNT] = [
    palette(
        "Genesis",
        Color::rgb(0xFF, 0x6B, 0x35),
        Color::rgb(0xF7, 0xC5, 0x9F),
        Color::rgb(0xEF, 0xEF, 0xD0),
        Color::rgb(0x00, 0x4E, 0x89),
    ),
    palette(
        "Nebula",
        Color::rgb(0x9B, 0x5D, 0xE5),
        Color::rgb(0xF1, 0x5B, 0xB5),
        Color::rgb(0xFE, 0xE4, 0x40),
        Color::rgb(0x1B, 0x0F, 0x2E),
    ),
    palette(
        "Tidal",
        Color::rgb(0x00, 0xB4, 0xD8),
        Color::rgb(0x90, 0xE0, 0xEF),
        Color::rgb(0xCA, 0xF0, 0xF8),
        Color::rgb(0x03, 0x04, 0x5E),
    ),
    palette(
        "Verdant",
        Color::rgb(0x2D, 0xC6, 0x53),
        Color::rgb(0xB7, 0xE4, 0xC7),
        Color::rgb(0xD8, 0xF3, 0xDC),
        Color::rgb(0x08, 0x1C, 0x15),
    ),
    palette(
        "Ember",
        Color::rgb(0xE6, 0x39, 0x46),
        Color::rgb(0xF4, 0xA2, 0x61),
        Color::rgb(0xE9, 0xC4, 0x6A),
        Color::rgb(0x26, 0x0A, 0x0A),
    ),
    palette(
        "Glacier",
        Color::rgb(0xA8, 0xDA, 0xDC),
        Color::rgb(0x45, 0x7B, 0x9D),
        Color::rgb(0xF1, 0xFA, 0xEE),
        Color::rgb(0x1D, 0x35, 0x57),
    ),
    palette(
        "Solstice",
        Color::rgb(0xFF, 0xB7, 0x03),
        Color::rgb(0xFB, 0x85, 0x00),
        Color::rgb(0x8E, 0xCA, 0xE6),
        Color::rgb(0x02, 0x30, 0x47),
    ),
    palette(
        "Orchid",
        Color::rgb(0xC7, 0x7D, 0xFF),
        Color::rgb(0xE0, 0xAA, 0xFF),
        Color::rgb(0xFF, 0xD6, 0xFF),
        Color::rgb(0x24, 0x00, 0x46),
    ),
    palette(
        "Obsidian",
        Color::rgb(0x6C, 0x75, 0x7D),
        Color::rgb(0xAD, 0xB5, 0xBD),
        Color::rgb(0xDE, 0xE2, 0xE6),
        Color::rgb(0x10, 0x10, 0x14),
    ),
    palette(
        "Aurora",
        Color::rgb(0x06, 0xD6, 0xA0),
        Color::rgb(0x11, 0x8A, 0xB2),
        Color::rgb(0xFF, 0xD1, 0x66),
        Color::rgb(0x07, 0x3B, 0x4C),
    ),
    palette(
        "Crimson",
        Color::rgb(0xD0, 0x00, 0x00),
        Color::rgb(0xFF, 0xBA, 0x08),
        Color::rgb(0xFA, 0xA3, 0x07),
        Color::rgb(0x37, 0x06, 0x17),
    ),
    palette(
        "Zenith",
        Color::rgb(0x48, 0x95, 0xEF),
        Color::rgb(0x4C, 0xC9, 0xF0),
        Color::rgb(0xF7, 0x25, 0x85),
        Color::rgb(0x0B, 0x0C, 0x2A),
    ),
];

/// Palette in effect at one instant plus its position in the rotation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorScheme {
    /// Circle fill.
    pub primary: Color,
    /// Ring outline.
    pub secondary: Color,
    /// Decoration lines.
    pub tertiary: Color,
    /// Canvas background.
    pub background: Color,
    /// Index into [`PALETTES`], in `0..12`.
    pub cycle_index: usize,
    /// Days left in the current cycle, in `1..=30`.
    pub days_until_next_cycle: u64,
}

impl ColorScheme {
    /// Display name of the active palette.
    pub fn palette_name(&self) -> &'static str {
        PALETTES[self.cycle_index].name
    }

    /// Human-facing cycle number, starting at 1.
    pub fn cycle_number(&self) -> usize {
        self.cycle_index + 1
    }
}

/// Scheme in effect at `now`.
///
/// When the day count is an exact multiple of the cycle length the countdown reads 30, never 0.
pub fn current_scheme(now: DateTime<Utc>) -> ColorScheme {
    let days = time::days_since_epoch(now);
    let cycle_index = ((days / CYCLE_DAYS) % CYCLE_COUNT as u64) as usize;
    let days_until_next_cycle = CYCLE_DAYS - (days % CYCLE_DAYS);
    let p = PALETTES[cycle_index];

    tracing::debug!(days, cycle_index, days_until_next_cycle, palette = p.name, "color scheme");

    ColorScheme {
        primary: p.primary,
        secondary: p.secondary,
        tertiary: p.tertiary,
        background: p.background,
        cycle_index,
        days_until_next_cycle,
    }
}

/// [`current_scheme`] at the wall-clock time.
pub fn current_scheme_now() -> ColorScheme {
    current_scheme(Utc::now())
}

#[cfg(test)]
#[path = "../../tests/unit/theme/cycle.rs"]
mod tests;
