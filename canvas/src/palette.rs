//! Named color palette and per-shape color with tint.
//!
//! Diagram text names colors (`color = red!50`); the palette maps those names
//! to the RGB values the renderer draws with. Entry 0 is the default color.

#[cfg(test)]
#[path = "palette_test.rs"]
mod palette_test;

use serde::Serialize;

/// One fixed palette entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaletteEntry {
    /// Lowercase name as written in diagram text.
    pub name: &'static str,
    pub rgb: [u8; 3],
}

/// The fixed palette, in menu order. Index 0 is the default.
pub const PALETTE: [PaletteEntry; 9] = [
    PaletteEntry { name: "black", rgb: [0x00, 0x00, 0x00] },
    PaletteEntry { name: "gray", rgb: [0x80, 0x80, 0x80] },
    PaletteEntry { name: "red", rgb: [0xd9, 0x31, 0x22] },
    PaletteEntry { name: "blue", rgb: [0x37, 0x16, 0xf5] },
    PaletteEntry { name: "green", rgb: [0x8d, 0xfb, 0x4a] },
    PaletteEntry { name: "orange", rgb: [0xe1, 0x86, 0x31] },
    PaletteEntry { name: "yellow", rgb: [0xf6, 0xeb, 0x5f] },
    PaletteEntry { name: "cyan", rgb: [0x70, 0xb7, 0xed] },
    PaletteEntry { name: "magenta", rgb: [0xfc, 0x2f, 0x99] },
];

/// Look up a palette entry by name, ignoring ASCII case.
#[must_use]
pub fn lookup(name: &str) -> Option<&'static PaletteEntry> {
    PALETTE.iter().find(|e| e.name.eq_ignore_ascii_case(name.trim()))
}

/// A palette color plus a tint in `[0, 1]`.
///
/// Tint 1.0 is the full color; lower values blend toward the background.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Color {
    pub entry: PaletteEntry,
    pub tint: f64,
}

impl Default for Color {
    fn default() -> Self {
        Self { entry: PALETTE[0], tint: 1.0 }
    }
}

impl Color {
    #[must_use]
    pub fn new(entry: PaletteEntry, tint: f64) -> Self {
        Self { entry, tint: tint.clamp(0.0, 1.0) }
    }

    /// Palette entry at `index`, full tint. Out-of-range indices give the default.
    #[must_use]
    pub fn from_index(index: usize) -> Self {
        Self { entry: PALETTE.get(index).copied().unwrap_or(PALETTE[0]), tint: 1.0 }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.entry.name
    }

    /// Whether this is the default black at full tint (no modifier needed on export).
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.entry.name == PALETTE[0].name && self.tint >= 1.0
    }

    /// Black at 50% tint, which exports as the literal `gray`.
    #[must_use]
    pub fn is_gray_alias(&self) -> bool {
        self.entry.name == PALETTE[0].name && (self.tint - 0.5).abs() < f64::EPSILON
    }

    /// RGB in `[0, 1]` as drawn over the given background.
    ///
    /// Pure black components are lifted to white on a dark background so
    /// default strokes stay visible.
    #[must_use]
    pub fn display_rgb(&self, light_background: bool) -> [f32; 3] {
        let background = if light_background { 1.0 } else { 0.0 };
        let tint = self.tint;
        self.entry.rgb.map(|c| {
            let base = if c != 0 || light_background { f64::from(c) / 255.0 } else { 1.0 };
            #[allow(clippy::cast_possible_truncation)]
            let blended = (base * tint + background * (1.0 - tint)) as f32;
            blended
        })
    }
}
