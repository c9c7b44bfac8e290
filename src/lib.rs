//! Textcon Console Emulator Library
//!
//! A text-mode console: a fixed grid of character/attribute cells driven by
//! a bitmap font and a 16-color palette, with a cursor that blinks on the
//! caller's clock. Renderers register an observer and redraw only what the
//! reported updates describe.
//!
//! - `core`: cells, grid, cursor, fonts, palette, console controller, updates
//! - `app`: configuration for building a console
//!
//! ```
//! use textcon::core::{Console, FontId, UpdateLog};
//!
//! let mut console = Console::new(640, 480, FontId::Vga8x16);
//! let log = UpdateLog::new();
//! console.set_observer(log.clone());
//!
//! console.print_str("AB\nC");
//! assert_eq!((console.width(), console.height()), (80, 30));
//! assert_eq!(console.character_at(0, 1), b'C');
//! assert!(!log.is_empty());
//! ```

pub mod app;
pub mod core;

pub use crate::app::{ConfigError, ConsoleConfig};
pub use crate::core::{Console, FontId, Observer, Snapshot, Update};
