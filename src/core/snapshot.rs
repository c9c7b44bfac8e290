//! Deterministic snapshot generation
//!
//! Snapshots capture the visible console state in a serializable format
//! for testing and debugging. Given the same sequence of operations, the
//! console must produce identical snapshots.

use serde::{Deserialize, Serialize};

use super::console::{Console, Mode};
use super::font::FontId;

/// A complete snapshot of the console state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Grid dimensions in cells
    pub width: usize,
    pub height: usize,
    /// Active font
    pub font: FontId,
    pub mode: Mode,
    /// Current drawing attribute
    pub attribute: u8,
    pub cursor: CursorSnapshot,
    /// Character codes, one vector per row
    pub characters: Vec<Vec<u8>>,
    /// Attribute bytes, one vector per row
    pub attributes: Vec<Vec<u8>>,
}

/// Snapshot of cursor state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CursorSnapshot {
    pub x: usize,
    pub y: usize,
    pub visible: bool,
    pub shown: bool,
}

impl Snapshot {
    /// Create a snapshot from the current console state
    pub fn from_console(console: &Console) -> Self {
        let mut characters = Vec::with_capacity(console.height());
        let mut attributes = Vec::with_capacity(console.height());

        for row in console.cells().chunks(console.width().max(1)) {
            characters.push(row.iter().map(|c| c.character).collect());
            attributes.push(row.iter().map(|c| c.attribute.bits()).collect());
        }

        Snapshot {
            width: console.width(),
            height: console.height(),
            font: console.font(),
            mode: console.mode(),
            attribute: console.attribute().bits(),
            cursor: CursorSnapshot {
                x: console.cursor_x(),
                y: console.cursor_y(),
                visible: console.cursor_is_visible(),
                shown: console.cursor_is_shown(),
            },
            characters,
            attributes,
        }
    }

    /// Convert snapshot to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse snapshot from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Text rendering of the grid: code 0 and control codes become spaces,
    /// bytes above ASCII become `?`, and trailing blanks are trimmed
    pub fn to_text(&self) -> String {
        let mut result = String::new();

        for row in &self.characters {
            let line: String = row
                .iter()
                .map(|&c| match c {
                    0x20..=0x7E => c as char,
                    0x00..=0x1F | 0x7F => ' ',
                    _ => '?',
                })
                .collect();
            result.push_str(line.trim_end());
            result.push('\n');
        }

        result
    }
}
