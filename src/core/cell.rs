//! Console Cell
//!
//! A single character position in the console grid: one byte of character
//! code plus one attribute byte selecting palette colors.

use serde::{Deserialize, Serialize};

/// Attribute byte: high nibble is the background palette index,
/// low nibble is the foreground palette index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attribute(pub u8);

impl Attribute {
    /// White on black
    pub const DEFAULT: Attribute = Attribute(0x0F);

    /// Build an attribute from foreground and background palette indices.
    /// Only the low nibble of each index is used.
    pub const fn new(fg: u8, bg: u8) -> Self {
        Attribute(((bg & 0x0F) << 4) | (fg & 0x0F))
    }

    /// Foreground palette index (0-15)
    pub const fn fg(self) -> u8 {
        self.0 & 0x0F
    }

    /// Background palette index (0-15)
    pub const fn bg(self) -> u8 {
        (self.0 & 0xF0) >> 4
    }

    pub const fn bits(self) -> u8 {
        self.0
    }
}

impl Default for Attribute {
    fn default() -> Self {
        Attribute::DEFAULT
    }
}

impl From<u8> for Attribute {
    fn from(value: u8) -> Self {
        Attribute(value)
    }
}

impl From<Attribute> for u8 {
    fn from(attr: Attribute) -> Self {
        attr.0
    }
}

/// A single cell in the console grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    /// Character code (0 renders as blank)
    pub character: u8,
    /// Color attribute
    pub attribute: Attribute,
}

impl Default for Cell {
    fn default() -> Self {
        Self::blank(Attribute::DEFAULT)
    }
}

impl Cell {
    /// Value returned for reads outside the grid
    pub const ZERO: Cell = Cell {
        character: 0,
        attribute: Attribute(0),
    };

    pub const fn new(character: u8, attribute: Attribute) -> Self {
        Self {
            character,
            attribute,
        }
    }

    /// An empty cell painted with the given attribute
    pub const fn blank(attribute: Attribute) -> Self {
        Self::new(0, attribute)
    }

    /// Check if this cell holds no character
    pub fn is_empty(&self) -> bool {
        self.character == 0
    }

    /// Pack into a 16-bit unit: character in the low byte, attribute in the high byte
    pub const fn to_raw(self) -> u16 {
        ((self.attribute.0 as u16) << 8) | self.character as u16
    }

    /// Unpack from a 16-bit unit produced by [`Cell::to_raw`]
    pub const fn from_raw(raw: u16) -> Self {
        Self {
            character: (raw & 0xFF) as u8,
            attribute: Attribute((raw >> 8) as u8),
        }
    }
}
