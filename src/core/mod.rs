//! Console Core Module
//!
//! Platform-independent console state. This module contains:
//! - Cell representation with packed color attributes
//! - The cell grid
//! - Cursor position and blink state machine
//! - Built-in bitmap fonts and the 16-color palette
//! - The update notification protocol consumed by renderers
//! - Deterministic snapshot generation
//!
//! The core performs no I/O and reads no clock: given the same sequence of
//! operations it always produces the same state and the same updates.

mod cell;
mod console;
mod cursor;
mod font;
mod grid;
mod palette;
mod snapshot;
mod update;

pub use cell::{Attribute, Cell};
pub use console::{Console, Mode, TAB_WIDTH};
pub use cursor::{BlinkPhase, Cursor, DEFAULT_BLINK_RATE_MS};
pub use font::{Font, FontError, FontId, GLYPH_COUNT};
pub use grid::Grid;
pub use palette::{Palette, Rgb, ANSI_PALETTE, PALETTE_SIZE};
pub use snapshot::{CursorSnapshot, Snapshot};
pub use update::{NullObserver, Observer, Update, UpdateLog};
