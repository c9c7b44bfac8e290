//! Color palette
//!
//! Sixteen RGB entries addressed by the nibbles of a cell attribute.

use serde::{Deserialize, Serialize};

use super::cell::Attribute;

/// Number of palette entries
pub const PALETTE_SIZE: usize = 16;

/// A 24-bit color
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
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self { r, g, b }
    }
}

/// The 16-entry console palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette(pub [Rgb; PALETTE_SIZE]);

/// Standard 16-color ANSI palette (VGA text mode values)
pub const ANSI_PALETTE: Palette = Palette([
    // normal
    Rgb::new(0x00, 0x00, 0x00), // 0: Black
    Rgb::new(0x00, 0x00, 0xAA), // 1: Blue
    Rgb::new(0x00, 0xAA, 0x00), // 2: Green
    Rgb::new(0x00, 0xAA, 0xAA), // 3: Cyan
    Rgb::new(0xAA, 0x00, 0x00), // 4: Red
    Rgb::new(0xAA, 0x00, 0xAA), // 5: Magenta
    Rgb::new(0xAA, 0x55, 0x00), // 6: Brown
    Rgb::new(0xAA, 0xAA, 0xAA), // 7: Light Gray
    // bright
    Rgb::new(0x55, 0x55, 0x55), // 8: Gray
    Rgb::new(0x55, 0x55, 0xFF), // 9: Light Blue
    Rgb::new(0x55, 0xFF, 0x55), // 10: Light Green
    Rgb::new(0x55, 0xFF, 0xFF), // 11: Light Cyan
    Rgb::new(0xFF, 0x55, 0x55), // 12: Light Red
    Rgb::new(0xFF, 0x55, 0xFF), // 13: Light Magenta
    Rgb::new(0xFF, 0xFF, 0x55), // 14: Yellow
    Rgb::new(0xFF, 0xFF, 0xFF), // 15: White
]);

impl Default for Palette {
    fn default() -> Self {
        ANSI_PALETTE
    }
}

impl Palette {
    /// Color for a palette index; only the low nibble is used
    pub fn get(&self, index: u8) -> Rgb {
        self.0[(index & 0x0F) as usize]
    }

    /// Foreground and background colors for an attribute
    pub fn colors(&self, attr: Attribute) -> (Rgb, Rgb) {
        (self.get(attr.fg()), self.get(attr.bg()))
    }

    pub fn entries(&self) -> &[Rgb; PALETTE_SIZE] {
        &self.0
    }
}

impl From<[Rgb; PALETTE_SIZE]> for Palette {
    fn from(entries: [Rgb; PALETTE_SIZE]) -> Self {
        Palette(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_palette() {
        let palette = Palette::default();
        assert_eq!(palette.get(0), Rgb::new(0, 0, 0));
        assert_eq!(palette.get(6), Rgb::new(0xAA, 0x55, 0x00));
        assert_eq!(palette.get(15), Rgb::new(0xFF, 0xFF, 0xFF));
    }

    #[test]
    fn test_attribute_colors() {
        let palette = Palette::default();
        let (fg, bg) = palette.colors(Attribute::new(14, 1));
        assert_eq!(fg, Rgb::new(0xFF, 0xFF, 0x55));
        assert_eq!(bg, Rgb::new(0x00, 0x00, 0xAA));
    }

    #[test]
    fn test_palette_serde() {
        let json = serde_json::to_string(&ANSI_PALETTE).unwrap();
        assert!(json.starts_with("[{\"r\":0,\"g\":0,\"b\":0}"));
        let back: Palette = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ANSI_PALETTE);
    }
}
