//! Update notifications
//!
//! Every observable change to a [`Console`](super::Console) is reported to a
//! single registered [`Observer`] as an [`Update`], synchronously and in line
//! with the mutation. A renderer uses these to redraw only what changed.

use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;

use super::cell::Attribute;
use super::font::FontId;
use super::palette::Palette;

/// A change notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Update {
    /// One cell changed
    CharChange {
        x: usize,
        y: usize,
        character: u8,
        attribute: Attribute,
    },
    /// Rectangle `[x1, x2) x [y1, y2)` needs a full redraw
    RowRange {
        x1: usize,
        y1: usize,
        x2: usize,
        y2: usize,
    },
    /// Content moved up. `y2` rows left the top and the `n` rows below them
    /// moved to row `y1`.
    Scroll { y1: usize, y2: usize, n: usize },
    /// Cursor drawn or erased at `(x, y)`
    CursorVisibility { visible: bool, x: usize, y: usize },
    /// Cursor left `(x, y)`; the new position is the console's current one
    CursorPosition { x: usize, y: usize },
    /// Active font changed; layout and glyphs must be refetched
    FontChange {
        font: FontId,
        char_width: usize,
        char_height: usize,
        #[serde(skip)]
        bitmap: &'static [u8],
    },
    /// Palette replaced
    PaletteChange { palette: Palette },
    /// Redraw everything from current state
    Refresh,
}

impl Update {
    /// Short name of the event kind, used for logging
    pub fn kind(&self) -> &'static str {
        match self {
            Update::CharChange { .. } => "char_change",
            Update::RowRange { .. } => "row_range",
            Update::Scroll { .. } => "scroll",
            Update::CursorVisibility { .. } => "cursor_visibility",
            Update::CursorPosition { .. } => "cursor_position",
            Update::FontChange { .. } => "font_change",
            Update::PaletteChange { .. } => "palette_change",
            Update::Refresh => "refresh",
        }
    }
}

/// Receiver of console updates.
///
/// Observers must not call back into the console that notified them.
pub trait Observer {
    fn on_update(&mut self, update: &Update);
}

/// Observer that ignores every update
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl Observer for NullObserver {
    fn on_update(&mut self, _update: &Update) {}
}

impl<F> Observer for F
where
    F: FnMut(&Update),
{
    fn on_update(&mut self, update: &Update) {
        self(update)
    }
}

/// Observer that records every update.
///
/// Clones share the same log, so one handle can be registered with a
/// console while another is kept for inspection.
#[derive(Debug, Clone, Default)]
pub struct UpdateLog {
    updates: Rc<RefCell<Vec<Update>>>,
}

impl UpdateLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of all updates recorded so far
    pub fn updates(&self) -> Vec<Update> {
        self.updates.borrow().clone()
    }

    /// Remove and return all recorded updates
    pub fn drain(&self) -> Vec<Update> {
        std::mem::take(&mut *self.updates.borrow_mut())
    }

    pub fn len(&self) -> usize {
        self.updates.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.updates.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.updates.borrow_mut().clear();
    }
}

impl Observer for UpdateLog {
    fn on_update(&mut self, update: &Update) {
        self.updates.borrow_mut().push(update.clone());
    }
}
