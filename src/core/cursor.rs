//! Cursor state management
//!
//! The cursor tracks position, a single save slot, and the blink state
//! machine. Blinking is driven by the caller sampling a monotonic clock;
//! the cursor itself never reads time.

use serde::{Deserialize, Serialize};

/// Default blink on-phase duration in milliseconds
pub const DEFAULT_BLINK_RATE_MS: u32 = 200;

/// Which half of the blink cycle a timestamp falls in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlinkPhase {
    On,
    Off,
}

impl BlinkPhase {
    /// Phase at `now_ms` for a cycle of `2 * rate_ms`.
    /// A zero rate never blinks.
    pub fn at(now_ms: u64, rate_ms: u32) -> Self {
        let rate = u64::from(rate_ms);
        if rate == 0 || now_ms % (rate * 2) < rate {
            BlinkPhase::On
        } else {
            BlinkPhase::Off
        }
    }
}

/// Cursor position, save slot and visibility
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    /// Column position (0-indexed)
    pub col: usize,
    /// Row position (0-indexed)
    pub row: usize,
    /// Saved position (single slot)
    pub saved: (usize, usize),
    /// Caller-controlled visibility
    visible: bool,
    /// Blink-driven flag, toggled on every phase change
    shown: bool,
    /// On-phase duration in milliseconds
    blink_rate: u32,
}

impl Default for Cursor {
    fn default() -> Self {
        Self {
            col: 0,
            row: 0,
            saved: (0, 0),
            visible: false,
            shown: false,
            blink_rate: DEFAULT_BLINK_RATE_MS,
        }
    }
}

impl Cursor {
    /// Create a hidden cursor at the home position
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> (usize, usize) {
        (self.col, self.row)
    }

    /// Clamp a requested position to a `cols` x `rows` grid
    pub fn clamp(col: usize, row: usize, cols: usize, rows: usize) -> (usize, usize) {
        (col.min(cols.saturating_sub(1)), row.min(rows.saturating_sub(1)))
    }

    /// Move to a position, clamping to bounds. Returns the previous
    /// position if the cursor actually moved.
    pub fn move_to(
        &mut self,
        col: usize,
        row: usize,
        cols: usize,
        rows: usize,
    ) -> Option<(usize, usize)> {
        let (col, row) = Self::clamp(col, row, cols, rows);
        if (col, row) == (self.col, self.row) {
            return None;
        }
        let previous = self.position();
        self.col = col;
        self.row = row;
        Some(previous)
    }

    /// Pull the current and saved positions back inside a resized grid
    pub fn confine(&mut self, cols: usize, rows: usize) {
        (self.col, self.row) = Self::clamp(self.col, self.row, cols, rows);
        self.saved = Self::clamp(self.saved.0, self.saved.1, cols, rows);
    }

    /// Save cursor position
    pub fn save(&mut self) {
        self.saved = self.position();
    }

    /// Restore the saved position
    pub fn restore(&mut self, cols: usize, rows: usize) {
        (self.col, self.row) = Self::clamp(self.saved.0, self.saved.1, cols, rows);
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Visible and in the on-phase of the blink cycle
    pub fn is_shown(&self) -> bool {
        self.visible && self.shown
    }

    pub fn blink_rate(&self) -> u32 {
        self.blink_rate
    }

    pub fn set_blink_rate(&mut self, rate_ms: u32) {
        self.blink_rate = rate_ms;
    }

    /// Make the cursor visible. Returns false if it already was.
    pub fn show(&mut self) -> bool {
        if self.visible {
            return false;
        }
        self.visible = true;
        true
    }

    /// Hide the cursor, clearing the blink flag too. Returns false if it
    /// was already hidden.
    pub fn hide(&mut self) -> bool {
        if !self.visible {
            return false;
        }
        self.visible = false;
        self.shown = false;
        true
    }

    /// Advance the blink state machine to `now_ms`. Returns the new
    /// composite shown state when the phase flipped.
    pub fn blink(&mut self, now_ms: u64) -> Option<bool> {
        if !self.visible {
            return None;
        }
        let on = BlinkPhase::at(now_ms, self.blink_rate) == BlinkPhase::On;
        if on == self.shown {
            return None;
        }
        self.shown = !self.shown;
        Some(self.is_shown())
    }
}
