//! Built-in bitmap fonts
//!
//! Every font carries 256 monochrome glyphs packed MSB-first: each glyph row
//! takes `ceil(char_width / 8)` bytes, rows are stored top to bottom, and
//! glyphs follow one another in character-code order.
//!
//! The larger fonts are derived from the 8x8 set at compile time by
//! doubling scanlines (8x16) and then pixels in both directions (16x32).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Number of glyphs in every font
pub const GLYPH_COUNT: usize = 256;

/// Identifier of a built-in font
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontId {
    /// 8x8 cells
    Vga8x8,
    /// 8x16 cells
    #[default]
    Vga8x16,
    /// 16x32 cells
    Vga16x32,
}

impl FontId {
    pub const ALL: [FontId; 3] = [FontId::Vga8x8, FontId::Vga8x16, FontId::Vga16x32];

    /// Look up the font in the static table
    pub fn font(self) -> &'static Font {
        match self {
            FontId::Vga8x8 => &FONTS[0],
            FontId::Vga8x16 => &FONTS[1],
            FontId::Vga16x32 => &FONTS[2],
        }
    }

    pub fn name(self) -> &'static str {
        self.font().name
    }
}

impl fmt::Display for FontId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Font lookup error
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FontError {
    #[error("unknown font: {0}")]
    Unknown(String),
}

impl FromStr for FontId {
    type Err = FontError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        let name = name.strip_prefix("vga").unwrap_or(&name);
        match name {
            "8x8" => Ok(FontId::Vga8x8),
            "8x16" => Ok(FontId::Vga8x16),
            "16x32" => Ok(FontId::Vga16x32),
            _ => Err(FontError::Unknown(s.to_string())),
        }
    }
}

/// Glyph metrics and bitmap of one font
#[derive(Debug)]
pub struct Font {
    pub id: FontId,
    pub name: &'static str,
    /// Cell width in pixels
    pub char_width: usize,
    /// Cell height in pixels
    pub char_height: usize,
    /// Packed glyph bitmaps for all 256 codes
    pub bitmap: &'static [u8],
}

impl Font {
    pub fn bytes_per_row(&self) -> usize {
        self.char_width.div_ceil(8)
    }

    pub fn bytes_per_glyph(&self) -> usize {
        self.bytes_per_row() * self.char_height
    }

    /// Byte offset of glyph `c` within [`Font::bitmap`]
    pub fn glyph_offset(&self, c: u8) -> usize {
        c as usize * self.bytes_per_glyph()
    }

    /// Packed bitmap of a single glyph
    pub fn glyph(&self, c: u8) -> &'static [u8] {
        let start = self.glyph_offset(c);
        &self.bitmap[start..start + self.bytes_per_glyph()]
    }

    /// Whether pixel `(px, py)` of glyph `c` is set
    pub fn pixel(&self, c: u8, px: usize, py: usize) -> bool {
        if px >= self.char_width || py >= self.char_height {
            return false;
        }
        let row = &self.glyph(c)[py * self.bytes_per_row()..];
        row[px / 8] & (0x80 >> (px % 8)) != 0
    }
}

static FONTS: [Font; 3] = [
    Font {
        id: FontId::Vga8x8,
        name: "vga8x8",
        char_width: 8,
        char_height: 8,
        bitmap: &BITMAP_8X8,
    },
    Font {
        id: FontId::Vga8x16,
        name: "vga8x16",
        char_width: 8,
        char_height: 16,
        bitmap: &BITMAP_8X16,
    },
    Font {
        id: FontId::Vga16x32,
        name: "vga16x32",
        char_width: 16,
        char_height: 32,
        bitmap: &BITMAP_16X32,
    },
];

static BITMAP_8X8: [u8; GLYPH_COUNT * 8] = GLYPHS_8X8;
static BITMAP_8X16: [u8; GLYPH_COUNT * 16] = GLYPHS_8X16;
static BITMAP_16X32: [u8; GLYPH_COUNT * 64] = GLYPHS_16X32;

const GLYPHS_8X8: [u8; GLYPH_COUNT * 8] = build_8x8();
const GLYPHS_8X16: [u8; GLYPH_COUNT * 16] = double_rows(&GLYPHS_8X8);
const GLYPHS_16X32: [u8; GLYPH_COUNT * 64] = double_pixels(&GLYPHS_8X16);

const fn build_8x8() -> [u8; GLYPH_COUNT * 8] {
    let mut out = [0u8; GLYPH_COUNT * 8];

    // Printable ASCII; source rows are stored LSB-leftmost
    let mut c = 0;
    while c < ASCII_8X8.len() {
        let mut row = 0;
        while row < 8 {
            out[(0x20 + c) * 8 + row] = ASCII_8X8[c][row].reverse_bits();
            row += 1;
        }
        c += 1;
    }

    // Shades and blocks of code page 437
    let mut row = 0;
    while row < 8 {
        let even = row % 2 == 0;
        out[0xB0 * 8 + row] = if even { 0x88 } else { 0x22 };
        out[0xB1 * 8 + row] = if even { 0xAA } else { 0x55 };
        out[0xB2 * 8 + row] = if even { 0xEE } else { 0xBB };
        out[0xDB * 8 + row] = 0xFF;
        out[0xDC * 8 + row] = if row >= 4 { 0xFF } else { 0x00 };
        out[0xDF * 8 + row] = if row < 4 { 0xFF } else { 0x00 };
        row += 1;
    }

    out
}

/// 8x8 -> 8x16 by repeating each scanline
const fn double_rows(src: &[u8; GLYPH_COUNT * 8]) -> [u8; GLYPH_COUNT * 16] {
    let mut out = [0u8; GLYPH_COUNT * 16];
    let mut i = 0;
    while i < src.len() {
        out[i * 2] = src[i];
        out[i * 2 + 1] = src[i];
        i += 1;
    }
    out
}

/// 8x16 -> 16x32 by doubling every pixel in both directions
const fn double_pixels(src: &[u8; GLYPH_COUNT * 16]) -> [u8; GLYPH_COUNT * 64] {
    let mut out = [0u8; GLYPH_COUNT * 64];
    let mut i = 0;
    while i < src.len() {
        let wide = widen(src[i]);
        let hi = (wide >> 8) as u8;
        let lo = (wide & 0xFF) as u8;
        // Source row i becomes two rows of two bytes each
        out[i * 4] = hi;
        out[i * 4 + 1] = lo;
        out[i * 4 + 2] = hi;
        out[i * 4 + 3] = lo;
        i += 1;
    }
    out
}

const fn widen(byte: u8) -> u16 {
    let mut out = 0u16;
    let mut bit = 0;
    while bit < 8 {
        if byte & (0x80 >> bit) != 0 {
            out |= 0xC000 >> (bit * 2);
        }
        bit += 1;
    }
    out
}

/// Public-domain 8x8 glyphs for 0x20..=0x7F, LSB is the leftmost pixel
const ASCII_8X8: [[u8; 8]; 96] = [
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00], // ' '
    [0x18, 0x3C, 0x3C, 0x18, 0x18, 0x00, 0x18, 0x00], // '!'
    [0x36, 0x36, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00], // '"'
    [0x36, 0x36, 0x7F, 0x36, 0x7F, 0x36, 0x36, 0x00], // '#'
    [0x0C, 0x3E, 0x03, 0x1E, 0x30, 0x1F, 0x0C, 0x00], // '$'
    [0x00, 0x63, 0x33, 0x18, 0x0C, 0x66, 0x63, 0x00], // '%'
    [0x1C, 0x36, 0x1C, 0x6E, 0x3B, 0x33, 0x6E, 0x00], // '&'
    [0x06, 0x06, 0x03, 0x00, 0x00, 0x00, 0x00, 0x00], // '''
    [0x18, 0x0C, 0x06, 0x06, 0x06, 0x0C, 0x18, 0x00], // '('
    [0x06, 0x0C, 0x18, 0x18, 0x18, 0x0C, 0x06, 0x00], // ')'
    [0x00, 0x66, 0x3C, 0xFF, 0x3C, 0x66, 0x00, 0x00], // '*'
    [0x00, 0x0C, 0x0C, 0x3F, 0x0C, 0x0C, 0x00, 0x00], // '+'
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C, 0x06], // ','
    [0x00, 0x00, 0x00, 0x3F, 0x00, 0x00, 0x00, 0x00], // '-'
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C, 0x00], // '.'
    [0x60, 0x30, 0x18, 0x0C, 0x06, 0x03, 0x01, 0x00], // '/'
    [0x3E, 0x63, 0x73, 0x7B, 0x6F, 0x67, 0x3E, 0x00], // '0'
    [0x0C, 0x0E, 0x0C, 0x0C, 0x0C, 0x0C, 0x3F, 0x00], // '1'
    [0x1E, 0x33, 0x30, 0x1C, 0x06, 0x33, 0x3F, 0x00], // '2'
    [0x1E, 0x33, 0x30, 0x1C, 0x30, 0x33, 0x1E, 0x00], // '3'
    [0x38, 0x3C, 0x36, 0x33, 0x7F, 0x30, 0x78, 0x00], // '4'
    [0x3F, 0x03, 0x1F, 0x30, 0x30, 0x33, 0x1E, 0x00], // '5'
    [0x1C, 0x06, 0x03, 0x1F, 0x33, 0x33, 0x1E, 0x00], // '6'
    [0x3F, 0x33, 0x30, 0x18, 0x0C, 0x0C, 0x0C, 0x00], // '7'
    [0x1E, 0x33, 0x33, 0x1E, 0x33, 0x33, 0x1E, 0x00], // '8'
    [0x1E, 0x33, 0x33, 0x3E, 0x30, 0x18, 0x0E, 0x00], // '9'
    [0x00, 0x0C, 0x0C, 0x00, 0x00, 0x0C, 0x0C, 0x00], // ':'
    [0x00, 0x0C, 0x0C, 0x00, 0x00, 0x0C, 0x0C, 0x06], // ';'
    [0x18, 0x0C, 0x06, 0x03, 0x06, 0x0C, 0x18, 0x00], // '<'
    [0x00, 0x00, 0x3F, 0x00, 0x00, 0x3F, 0x00, 0x00], // '='
    [0x06, 0x0C, 0x18, 0x30, 0x18, 0x0C, 0x06, 0x00], // '>'
    [0x1E, 0x33, 0x30, 0x18, 0x0C, 0x00, 0x0C, 0x00], // '?'
    [0x3E, 0x63, 0x7B, 0x7B, 0x7B, 0x03, 0x1E, 0x00], // '@'
    [0x0C, 0x1E, 0x33, 0x33, 0x3F, 0x33, 0x33, 0x00], // 'A'
    [0x3F, 0x66, 0x66, 0x3E, 0x66, 0x66, 0x3F, 0x00], // 'B'
    [0x3C, 0x66, 0x03, 0x03, 0x03, 0x66, 0x3C, 0x00], // 'C'
    [0x1F, 0x36, 0x66, 0x66, 0x66, 0x36, 0x1F, 0x00], // 'D'
    [0x7F, 0x46, 0x16, 0x1E, 0x16, 0x46, 0x7F, 0x00], // 'E'
    [0x7F, 0x46, 0x16, 0x1E, 0x16, 0x06, 0x0F, 0x00], // 'F'
    [0x3C, 0x66, 0x03, 0x03, 0x73, 0x66, 0x7C, 0x00], // 'G'
    [0x33, 0x33, 0x33, 0x3F, 0x33, 0x33, 0x33, 0x00], // 'H'
    [0x1E, 0x0C, 0x0C, 0x0C, 0x0C, 0x0C, 0x1E, 0x00], // 'I'
    [0x78, 0x30, 0x30, 0x30, 0x33, 0x33, 0x1E, 0x00], // 'J'
    [0x67, 0x66, 0x36, 0x1E, 0x36, 0x66, 0x67, 0x00], // 'K'
    [0x0F, 0x06, 0x06, 0x06, 0x46, 0x66, 0x7F, 0x00], // 'L'
    [0x63, 0x77, 0x7F, 0x7F, 0x6B, 0x63, 0x63, 0x00], // 'M'
    [0x63, 0x67, 0x6F, 0x7B, 0x73, 0x63, 0x63, 0x00], // 'N'
    [0x1C, 0x36, 0x63, 0x63, 0x63, 0x36, 0x1C, 0x00], // 'O'
    [0x3F, 0x66, 0x66, 0x3E, 0x06, 0x06, 0x0F, 0x00], // 'P'
    [0x1E, 0x33, 0x33, 0x33, 0x3B, 0x1E, 0x38, 0x00], // 'Q'
    [0x3F, 0x66, 0x66, 0x3E, 0x36, 0x66, 0x67, 0x00], // 'R'
    [0x1E, 0x33, 0x07, 0x0E, 0x38, 0x33, 0x1E, 0x00], // 'S'
    [0x3F, 0x2D, 0x0C, 0x0C, 0x0C, 0x0C, 0x1E, 0x00], // 'T'
    [0x33, 0x33, 0x33, 0x33, 0x33, 0x33, 0x3F, 0x00], // 'U'
    [0x33, 0x33, 0x33, 0x33, 0x33, 0x1E, 0x0C, 0x00], // 'V'
    [0x63, 0x63, 0x63, 0x6B, 0x7F, 0x77, 0x63, 0x00], // 'W'
    [0x63, 0x63, 0x36, 0x1C, 0x1C, 0x36, 0x63, 0x00], // 'X'
    [0x33, 0x33, 0x33, 0x1E, 0x0C, 0x0C, 0x1E, 0x00], // 'Y'
    [0x7F, 0x63, 0x31, 0x18, 0x4C, 0x66, 0x7F, 0x00], // 'Z'
    [0x1E, 0x06, 0x06, 0x06, 0x06, 0x06, 0x1E, 0x00], // '['
    [0x03, 0x06, 0x0C, 0x18, 0x30, 0x60, 0x40, 0x00], // '\'
    [0x1E, 0x18, 0x18, 0x18, 0x18, 0x18, 0x1E, 0x00], // ']'
    [0x08, 0x1C, 0x36, 0x63, 0x00, 0x00, 0x00, 0x00], // '^'
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xFF], // '_'
    [0x0C, 0x0C, 0x18, 0x00, 0x00, 0x00, 0x00, 0x00], // '`'
    [0x00, 0x00, 0x1E, 0x30, 0x3E, 0x33, 0x6E, 0x00], // 'a'
    [0x07, 0x06, 0x06, 0x3E, 0x66, 0x66, 0x3B, 0x00], // 'b'
    [0x00, 0x00, 0x1E, 0x33, 0x03, 0x33, 0x1E, 0x00], // 'c'
    [0x38, 0x30, 0x30, 0x3E, 0x33, 0x33, 0x6E, 0x00], // 'd'
    [0x00, 0x00, 0x1E, 0x33, 0x3F, 0x03, 0x1E, 0x00], // 'e'
    [0x1C, 0x36, 0x06, 0x0F, 0x06, 0x06, 0x0F, 0x00], // 'f'
    [0x00, 0x00, 0x6E, 0x33, 0x33, 0x3E, 0x30, 0x1F], // 'g'
    [0x07, 0x06, 0x36, 0x6E, 0x66, 0x66, 0x67, 0x00], // 'h'
    [0x0C, 0x00, 0x0E, 0x0C, 0x0C, 0x0C, 0x1E, 0x00], // 'i'
    [0x30, 0x00, 0x30, 0x30, 0x30, 0x33, 0x33, 0x1E], // 'j'
    [0x07, 0x06, 0x66, 0x36, 0x1E, 0x36, 0x67, 0x00], // 'k'
    [0x0E, 0x0C, 0x0C, 0x0C, 0x0C, 0x0C, 0x1E, 0x00], // 'l'
    [0x00, 0x00, 0x33, 0x7F, 0x7F, 0x6B, 0x63, 0x00], // 'm'
    [0x00, 0x00, 0x1F, 0x33, 0x33, 0x33, 0x33, 0x00], // 'n'
    [0x00, 0x00, 0x1E, 0x33, 0x33, 0x33, 0x1E, 0x00], // 'o'
    [0x00, 0x00, 0x3B, 0x66, 0x66, 0x3E, 0x06, 0x0F], // 'p'
    [0x00, 0x00, 0x6E, 0x33, 0x33, 0x3E, 0x30, 0x78], // 'q'
    [0x00, 0x00, 0x3B, 0x6E, 0x66, 0x06, 0x0F, 0x00], // 'r'
    [0x00, 0x00, 0x3E, 0x03, 0x1E, 0x30, 0x1F, 0x00], // 's'
    [0x08, 0x0C, 0x3E, 0x0C, 0x0C, 0x2C, 0x18, 0x00], // 't'
    [0x00, 0x00, 0x33, 0x33, 0x33, 0x33, 0x6E, 0x00], // 'u'
    [0x00, 0x00, 0x33, 0x33, 0x33, 0x1E, 0x0C, 0x00], // 'v'
    [0x00, 0x00, 0x63, 0x6B, 0x7F, 0x7F, 0x36, 0x00], // 'w'
    [0x00, 0x00, 0x63, 0x36, 0x1C, 0x36, 0x63, 0x00], // 'x'
    [0x00, 0x00, 0x33, 0x33, 0x33, 0x3E, 0x30, 0x1F], // 'y'
    [0x00, 0x00, 0x3F, 0x19, 0x0C, 0x26, 0x3F, 0x00], // 'z'
    [0x38, 0x0C, 0x0C, 0x07, 0x0C, 0x0C, 0x38, 0x00], // '{'
    [0x18, 0x18, 0x18, 0x00, 0x18, 0x18, 0x18, 0x00], // '|'
    [0x07, 0x0C, 0x0C, 0x38, 0x0C, 0x0C, 0x07, 0x00], // '}'
    [0x6E, 0x3B, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00], // '~'
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00], // DEL
];
