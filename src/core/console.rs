//! Console controller
//!
//! The console owns the cell grid, cursor, palette and font binding, and is
//! the only way to mutate them. Each mutation that changes something a
//! renderer can see is reported to the registered [`Observer`].
//!
//! Nothing here fails: coordinates are clamped or ignored, and re-applying
//! an unchanged setting does nothing.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::cell::{Attribute, Cell};
use super::cursor::{Cursor, DEFAULT_BLINK_RATE_MS};
use super::font::{Font, FontId};
use super::grid::Grid;
use super::palette::Palette;
use super::update::{NullObserver, Observer, Update};

/// Effective tab width; requests for other widths are ignored
pub const TAB_WIDTH: usize = 4;

/// Character interpretation mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Bytes are placed verbatim; only newline and tab are interpreted
    #[default]
    Raw,
    /// Reserved for escape sequence handling. Printing is a no-op.
    Ansi,
}

/// A text-mode console bound to a pixel viewport
pub struct Console {
    /// Viewport width in pixels
    view_width: usize,
    /// Viewport height in pixels
    view_height: usize,
    /// Active font
    font: FontId,
    /// Cell buffer, sized from the viewport and font
    grid: Grid,
    cursor: Cursor,
    /// Attribute for subsequently printed characters
    attribute: Attribute,
    mode: Mode,
    tab_width: usize,
    palette: Palette,
    observer: Box<dyn Observer>,
}

impl fmt::Debug for Console {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Console")
            .field("view_width", &self.view_width)
            .field("view_height", &self.view_height)
            .field("font", &self.font)
            .field("width", &self.grid.cols())
            .field("height", &self.grid.rows())
            .field("cursor", &self.cursor)
            .field("attribute", &self.attribute)
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

impl Console {
    /// Create a console for a `view_width` x `view_height` pixel viewport.
    ///
    /// The grid is sized from the font's cell metrics, the palette is the
    /// standard ANSI table, and the screen starts cleared with a visible
    /// cursor at the home position.
    pub fn new(view_width: usize, view_height: usize, font: FontId) -> Self {
        let mut console = Self {
            view_width,
            view_height,
            font,
            grid: Grid::new(0, 0),
            cursor: Cursor::new(),
            attribute: Attribute::DEFAULT,
            mode: Mode::Raw,
            tab_width: TAB_WIDTH,
            palette: Palette::default(),
            observer: Box::new(NullObserver),
        };
        console.apply_font(font);
        console.cursor.set_blink_rate(DEFAULT_BLINK_RATE_MS);
        console.show_cursor();
        console.clear();
        console
    }

    fn notify(&mut self, update: Update) {
        self.observer.on_update(&update);
    }

    // ------------------------------------------------------------------
    // Observer
    // ------------------------------------------------------------------

    /// Register the observer, replacing any previous one
    pub fn set_observer<O: Observer + 'static>(&mut self, observer: O) {
        self.observer = Box::new(observer);
    }

    /// Go back to discarding updates
    pub fn clear_observer(&mut self) {
        self.observer = Box::new(NullObserver);
    }

    // ------------------------------------------------------------------
    // Configuration
    // ------------------------------------------------------------------

    pub fn palette(&self) -> Palette {
        self.palette
    }

    /// Replace all 16 palette entries
    pub fn set_palette(&mut self, palette: impl Into<Palette>) {
        let palette = palette.into();
        if palette == self.palette {
            return;
        }
        self.palette = palette;
        tracing::debug!("palette replaced");
        self.notify(Update::PaletteChange { palette });
    }

    pub fn tab_width(&self) -> usize {
        self.tab_width
    }

    /// Request a tab width. The effective width stays at [`TAB_WIDTH`].
    pub fn set_tab_width(&mut self, width: usize) {
        if width != TAB_WIDTH {
            tracing::debug!(requested = width, "tab width is fixed at {}", TAB_WIDTH);
        }
        self.tab_width = TAB_WIDTH;
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    pub fn attribute(&self) -> Attribute {
        self.attribute
    }

    /// Set the attribute used by subsequent prints
    pub fn set_attribute(&mut self, attribute: impl Into<Attribute>) {
        self.attribute = attribute.into();
    }

    /// Foreground palette index of the current attribute
    pub fn foreground_color(&self) -> u8 {
        self.attribute.fg()
    }

    /// Background palette index of the current attribute
    pub fn background_color(&self) -> u8 {
        self.attribute.bg()
    }

    // ------------------------------------------------------------------
    // Geometry and font
    // ------------------------------------------------------------------

    /// Grid width in cells
    pub fn width(&self) -> usize {
        self.grid.cols()
    }

    /// Grid height in cells
    pub fn height(&self) -> usize {
        self.grid.rows()
    }

    pub fn view_width(&self) -> usize {
        self.view_width
    }

    pub fn view_height(&self) -> usize {
        self.view_height
    }

    pub fn font(&self) -> FontId {
        self.font
    }

    /// Glyph cell width in pixels
    pub fn char_width(&self) -> usize {
        self.font.font().char_width
    }

    /// Glyph cell height in pixels
    pub fn char_height(&self) -> usize {
        self.font.font().char_height
    }

    /// Switch fonts. The grid is resized and its content discarded; callers
    /// wanting a clean screen must [`clear`](Self::clear) afterwards.
    pub fn set_font(&mut self, font: FontId) {
        if font == self.font {
            return;
        }
        self.apply_font(font);
    }

    fn apply_font(&mut self, id: FontId) {
        let font: &'static Font = id.font();
        self.font = id;

        let width = self.view_width / font.char_width;
        let height = self.view_height / font.char_height;
        self.grid.resize(width, height);
        self.cursor.confine(width, height);

        tracing::debug!(font = %id, width, height, "font applied");

        self.notify(Update::FontChange {
            font: id,
            char_width: font.char_width,
            char_height: font.char_height,
            bitmap: font.bitmap,
        });
    }

    /// Byte offset of glyph `c` inside the active font's bitmap
    pub fn char_bitmap_offset(&self, c: u8) -> usize {
        self.font.font().glyph_offset(c)
    }

    /// Packed bitmap of glyph `c` in the active font
    pub fn char_bitmap(&self, c: u8) -> &'static [u8] {
        self.font.font().glyph(c)
    }

    // ------------------------------------------------------------------
    // Reading cells
    // ------------------------------------------------------------------

    pub fn cell_at(&self, x: usize, y: usize) -> Cell {
        self.grid.cell(x, y)
    }

    pub fn character_at(&self, x: usize, y: usize) -> u8 {
        self.grid.cell(x, y).character
    }

    pub fn attribute_at(&self, x: usize, y: usize) -> Attribute {
        self.grid.cell(x, y).attribute
    }

    pub fn character_at_offset(&self, offset: usize) -> u8 {
        self.grid.cell_at_offset(offset).character
    }

    pub fn attribute_at_offset(&self, offset: usize) -> Attribute {
        self.grid.cell_at_offset(offset).attribute
    }

    /// Up to `len` characters starting at `(x, y)`, stopping at the end of
    /// the row
    pub fn string_at(&self, x: usize, y: usize, len: usize) -> Vec<u8> {
        match self.grid.row(y) {
            Some(row) if x < row.len() => row[x..]
                .iter()
                .take(len)
                .map(|cell| cell.character)
                .collect(),
            _ => Vec::new(),
        }
    }

    /// All cells, row-major
    pub fn cells(&self) -> &[Cell] {
        self.grid.cells()
    }

    // ------------------------------------------------------------------
    // Writing
    // ------------------------------------------------------------------

    /// Reset the screen: cursor home, default attribute, every cell blank
    pub fn clear(&mut self) {
        self.goto_xy(0, 0);
        self.attribute = Attribute::DEFAULT;
        self.grid.fill(Cell::blank(Attribute::DEFAULT));
        self.notify(Update::RowRange {
            x1: 0,
            y1: 0,
            x2: self.width(),
            y2: self.height(),
        });
    }

    /// Print one character at the cursor
    pub fn print_char(&mut self, c: u8) {
        match c {
            b'\n' => self.newline(),
            b'\t' => {
                for _ in 0..self.tab_width {
                    self.print_char(b' ');
                }
            },
            _ => {
                if self.mode != Mode::Raw {
                    return;
                }
                if let Some(offset) = self.grid.offset_of(self.cursor.col, self.cursor.row) {
                    self.write_cell(offset, Cell::new(c, self.attribute));
                }
                self.advance_cursor();
            },
        }
    }

    pub fn print_bytes(&mut self, bytes: &[u8]) {
        for &c in bytes {
            self.print_char(c);
        }
    }

    /// Print the bytes of a string
    pub fn print_str(&mut self, s: &str) {
        self.print_bytes(s.as_bytes());
    }

    /// Write a cell directly, without moving the cursor or interpreting
    /// control characters
    pub fn set_character_and_attribute_at(
        &mut self,
        x: usize,
        y: usize,
        c: u8,
        attribute: impl Into<Attribute>,
    ) {
        if let Some(offset) = self.grid.offset_of(x, y) {
            self.write_cell(offset, Cell::new(c, attribute.into()));
        }
    }

    pub fn set_character_and_attribute_at_offset(
        &mut self,
        offset: usize,
        c: u8,
        attribute: impl Into<Attribute>,
    ) {
        self.write_cell(offset, Cell::new(c, attribute.into()));
    }

    /// Store `cell` and report it if the content changed
    fn write_cell(&mut self, offset: usize, cell: Cell) {
        let Some(previous) = self.grid.replace_at_offset(offset, cell) else {
            return;
        };
        if previous == cell {
            return;
        }
        if let Some((x, y)) = self.grid.position_of(offset) {
            self.notify(Update::CharChange {
                x,
                y,
                character: cell.character,
                attribute: cell.attribute,
            });
        }
    }

    fn newline(&mut self) {
        let mut y = self.cursor.row + 1;
        if y >= self.height() {
            y = self.height().saturating_sub(1);
            self.scroll_lines(1);
        }
        self.goto_xy(0, y);
    }

    fn advance_cursor(&mut self) {
        let mut x = self.cursor.col + 1;
        let mut y = self.cursor.row;
        if x >= self.width() {
            x = 0;
            y += 1;
            if y >= self.height() {
                y = self.height().saturating_sub(1);
                self.scroll_lines(1);
            }
        }
        self.goto_xy(x, y);
    }

    /// Scroll the whole grid up by `n` lines. Revealed rows take the
    /// current attribute.
    pub fn scroll_lines(&mut self, n: usize) {
        if n == 0 {
            return;
        }
        let (x, y) = self.cursor.position();
        let height = self.height();
        let shifted = n.min(height);

        tracing::trace!(n, height, "scrolling");

        self.notify(Update::CursorVisibility {
            visible: false,
            x,
            y,
        });
        self.notify(Update::Scroll {
            y1: 0,
            y2: shifted,
            n: height - shifted,
        });

        self.grid.scroll_up(n, Cell::blank(self.attribute));

        let visible = self.cursor.is_shown();
        self.notify(Update::CursorVisibility { visible, x, y });
    }

    /// Ask the renderer to redraw everything
    pub fn refresh(&mut self) {
        self.notify(Update::Refresh);
    }

    // ------------------------------------------------------------------
    // Cursor
    // ------------------------------------------------------------------

    pub fn cursor_x(&self) -> usize {
        self.cursor.col
    }

    pub fn cursor_y(&self) -> usize {
        self.cursor.row
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    /// Move the cursor, clamping to the grid. The update carries the
    /// position the cursor left.
    pub fn goto_xy(&mut self, x: usize, y: usize) {
        let (cols, rows) = (self.width(), self.height());
        if let Some((px, py)) = self.cursor.move_to(x, y, cols, rows) {
            self.notify(Update::CursorPosition { x: px, y: py });
        }
    }

    pub fn save_position(&mut self) {
        self.cursor.save();
    }

    pub fn restore_position(&mut self) {
        let (cols, rows) = (self.width(), self.height());
        self.cursor.restore(cols, rows);
    }

    pub fn cursor_is_visible(&self) -> bool {
        self.cursor.is_visible()
    }

    pub fn cursor_is_shown(&self) -> bool {
        self.cursor.is_shown()
    }

    pub fn show_cursor(&mut self) {
        if self.cursor.show() {
            let (x, y) = self.cursor.position();
            self.notify(Update::CursorVisibility { visible: true, x, y });
        }
    }

    pub fn hide_cursor(&mut self) {
        if self.cursor.hide() {
            let (x, y) = self.cursor.position();
            self.notify(Update::CursorVisibility {
                visible: false,
                x,
                y,
            });
        }
    }

    /// Blink on-phase duration in milliseconds
    pub fn blink_rate(&self) -> u32 {
        self.cursor.blink_rate()
    }

    pub fn set_blink_rate(&mut self, rate_ms: u32) {
        self.cursor.set_blink_rate(rate_ms);
    }

    /// Drive the blink state machine. `now_ms` is any monotonic clock in
    /// milliseconds; call it once per frame.
    pub fn blink(&mut self, now_ms: u64) {
        if let Some(visible) = self.cursor.blink(now_ms) {
            let (x, y) = self.cursor.position();
            self.notify(Update::CursorVisibility { visible, x, y });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::palette::{Rgb, ANSI_PALETTE};
    use crate::core::update::UpdateLog;

    fn observed(view_width: usize, view_height: usize, font: FontId) -> (Console, UpdateLog) {
        let mut console = Console::new(view_width, view_height, font);
        let log = UpdateLog::new();
        console.set_observer(log.clone());
        (console, log)
    }

    fn row_text(console: &Console, y: usize) -> Vec<u8> {
        console.string_at(0, y, console.width())
    }

    #[test]
    fn test_new_console_geometry() {
        let console = Console::new(640, 480, FontId::Vga8x16);
        assert_eq!(console.width(), 80);
        assert_eq!(console.height(), 30);
        assert_eq!(console.char_width(), 8);
        assert_eq!(console.char_height(), 16);
        assert_eq!(console.mode(), Mode::Raw);
        assert_eq!(console.tab_width(), 4);
        assert_eq!(console.blink_rate(), 200);
        assert_eq!(console.palette(), ANSI_PALETTE);
        assert!(console.cursor_is_visible());
        assert!(!console.cursor_is_shown());
        assert_eq!((console.cursor_x(), console.cursor_y()), (0, 0));
    }

    #[test]
    fn test_pixel_remainder_is_margin() {
        let console = Console::new(1024, 600, FontId::Vga8x16);
        assert_eq!(console.width(), 128);
        assert_eq!(console.height(), 37);
    }

    #[test]
    fn test_clear_resets_cells_and_attribute() {
        let (mut console, log) = observed(80, 32, FontId::Vga8x8);
        console.set_attribute(Attribute(0x1E));
        console.print_str("hello");
        log.clear();

        console.clear();
        assert_eq!(console.attribute(), Attribute::DEFAULT);
        assert!(console
            .cells()
            .iter()
            .all(|c| c.character == 0 && c.attribute == Attribute(0x0F)));
        assert_eq!(
            log.updates(),
            vec![
                Update::CursorPosition { x: 5, y: 0 },
                Update::RowRange {
                    x1: 0,
                    y1: 0,
                    x2: 10,
                    y2: 4
                },
            ]
        );
    }

    #[test]
    fn test_print_emits_char_change_then_moves() {
        let (mut console, log) = observed(640, 480, FontId::Vga8x16);
        console.print_char(b'A');
        assert_eq!(
            log.drain(),
            vec![
                Update::CharChange {
                    x: 0,
                    y: 0,
                    character: b'A',
                    attribute: Attribute::DEFAULT
                },
                Update::CursorPosition { x: 0, y: 0 },
            ]
        );
    }

    #[test]
    fn test_print_same_content_skips_char_change() {
        let (mut console, log) = observed(640, 480, FontId::Vga8x16);
        console.set_character_and_attribute_at(0, 0, b'A', Attribute::DEFAULT);
        log.clear();

        console.print_char(b'A');
        assert_eq!(log.drain(), vec![Update::CursorPosition { x: 0, y: 0 }]);
        assert_eq!(console.cursor_x(), 1);
    }

    #[test]
    fn test_print_scenario() {
        let mut console = Console::new(640, 480, FontId::Vga8x16);
        console.print_str("AB\nC");
        assert_eq!(console.character_at(0, 0), b'A');
        assert_eq!(console.character_at(1, 0), b'B');
        assert_eq!(console.character_at(0, 1), b'C');
        assert_eq!((console.cursor_x(), console.cursor_y()), (1, 1));
    }

    #[test]
    fn test_tab_expands_to_four_spaces() {
        let (mut console, log) = observed(640, 480, FontId::Vga8x16);
        console.print_char(b'\t');
        assert_eq!(console.cursor_x(), 4);
        assert_eq!(row_text(&console, 0)[..5], [b' ', b' ', b' ', b' ', 0]);
        let changes = log
            .updates()
            .iter()
            .filter(|u| matches!(u, Update::CharChange { .. }))
            .count();
        assert_eq!(changes, 4);
    }

    #[test]
    fn test_tab_width_is_fixed() {
        let mut console = Console::new(640, 480, FontId::Vga8x16);
        console.set_tab_width(8);
        assert_eq!(console.tab_width(), 4);
        console.print_char(b'\t');
        assert_eq!(console.cursor_x(), 4);
    }

    #[test]
    fn test_non_raw_mode_print_is_noop() {
        let (mut console, log) = observed(640, 480, FontId::Vga8x16);
        console.set_mode(Mode::Ansi);
        assert_eq!(console.mode(), Mode::Ansi);
        console.print_char(b'X');
        assert!(log.is_empty());
        assert_eq!(console.character_at(0, 0), 0);
        assert_eq!(console.cursor_x(), 0);

        // Newline is still interpreted
        console.print_char(b'\n');
        assert_eq!(console.cursor_y(), 1);
    }

    #[test]
    fn test_wrap_at_end_of_row() {
        let mut console = Console::new(32, 16, FontId::Vga8x8);
        assert_eq!((console.width(), console.height()), (4, 2));
        console.print_str("abcde");
        assert_eq!(row_text(&console, 0), b"abcd");
        assert_eq!(console.character_at(0, 1), b'e');
        assert_eq!((console.cursor_x(), console.cursor_y()), (1, 1));
    }

    #[test]
    fn test_wrap_on_last_row_scrolls() {
        let (mut console, log) = observed(32, 16, FontId::Vga8x8);
        console.print_str("abcd");
        console.set_attribute(Attribute(0x40));
        console.print_str("efg");
        log.clear();

        // Filling the last cell scrolls before the cursor wraps
        console.print_char(b'h');
        console.print_char(b'i');
        assert_eq!(row_text(&console, 0), b"efgh");
        assert_eq!(row_text(&console, 1), [b'i', 0, 0, 0]);
        assert_eq!(console.attribute_at(3, 1), Attribute(0x40));
        assert_eq!((console.cursor_x(), console.cursor_y()), (1, 1));

        assert_eq!(
            log.updates(),
            vec![
                Update::CharChange {
                    x: 3,
                    y: 1,
                    character: b'h',
                    attribute: Attribute(0x40)
                },
                Update::CursorVisibility {
                    visible: false,
                    x: 3,
                    y: 1
                },
                Update::Scroll { y1: 0, y2: 1, n: 1 },
                Update::CursorVisibility {
                    visible: false,
                    x: 3,
                    y: 1
                },
                Update::CursorPosition { x: 3, y: 1 },
                Update::CharChange {
                    x: 0,
                    y: 1,
                    character: b'i',
                    attribute: Attribute(0x40)
                },
                Update::CursorPosition { x: 0, y: 1 },
            ]
        );
    }

    #[test]
    fn test_newline_on_last_row_scrolls() {
        let mut console = Console::new(32, 16, FontId::Vga8x8);
        console.print_str("ab\ncd\nef");
        assert_eq!(row_text(&console, 0), [b'c', b'd', 0, 0]);
        assert_eq!(row_text(&console, 1), [b'e', b'f', 0, 0]);
        assert_eq!((console.cursor_x(), console.cursor_y()), (2, 1));
    }

    #[test]
    fn test_set_at_out_of_range_is_ignored() {
        let (mut console, log) = observed(640, 480, FontId::Vga8x16);
        let before = console.cells().to_vec();
        console.set_character_and_attribute_at(80, 0, b'X', Attribute(0x1F));
        console.set_character_and_attribute_at(0, 30, b'X', Attribute(0x1F));
        console.set_character_and_attribute_at_offset(2400, b'X', Attribute(0x1F));
        assert!(log.is_empty());
        assert_eq!(console.cells(), &before[..]);
        assert_eq!(console.character_at(80, 0), 0);
        assert_eq!(console.attribute_at(0, 30), Attribute(0));
        assert_eq!(console.character_at_offset(2400), 0);
        assert_eq!(console.attribute_at_offset(2400), Attribute(0));
    }

    #[test]
    fn test_set_at_offset_reports_coordinates() {
        let (mut console, log) = observed(640, 480, FontId::Vga8x16);
        console.set_character_and_attribute_at_offset(162, b'Z', Attribute(0x2A));
        assert_eq!(console.character_at(2, 2), b'Z');
        assert_eq!(console.attribute_at_offset(162), Attribute(0x2A));
        assert_eq!(
            log.drain(),
            vec![Update::CharChange {
                x: 2,
                y: 2,
                character: b'Z',
                attribute: Attribute(0x2A)
            }]
        );

        // Same content again is silent
        console.set_character_and_attribute_at(2, 2, b'Z', Attribute(0x2A));
        assert!(log.is_empty());
        assert_eq!((console.cursor_x(), console.cursor_y()), (0, 0));
    }

    #[test]
    fn test_goto_reports_previous_position() {
        let (mut console, log) = observed(640, 480, FontId::Vga8x16);
        console.goto_xy(10, 5);
        console.goto_xy(10, 5);
        console.goto_xy(1000, 1000);
        assert_eq!((console.cursor_x(), console.cursor_y()), (79, 29));
        assert_eq!(
            log.drain(),
            vec![
                Update::CursorPosition { x: 0, y: 0 },
                Update::CursorPosition { x: 10, y: 5 },
            ]
        );
    }

    #[test]
    fn test_save_restore_position() {
        let (mut console, log) = observed(640, 480, FontId::Vga8x16);
        console.goto_xy(7, 3);
        console.save_position();
        console.goto_xy(0, 0);
        log.clear();
        console.restore_position();
        assert_eq!((console.cursor_x(), console.cursor_y()), (7, 3));
        assert!(log.is_empty());
    }

    #[test]
    fn test_scroll_zero_is_noop() {
        let (mut console, log) = observed(640, 480, FontId::Vga8x16);
        console.scroll_lines(0);
        assert!(log.is_empty());
    }

    #[test]
    fn test_scroll_event_encoding() {
        let (mut console, log) = observed(32, 32, FontId::Vga8x8);
        console.scroll_lines(3);
        console.scroll_lines(10);
        let scrolls: Vec<_> = log
            .updates()
            .into_iter()
            .filter(|u| matches!(u, Update::Scroll { .. }))
            .collect();
        assert_eq!(
            scrolls,
            vec![
                Update::Scroll { y1: 0, y2: 3, n: 1 },
                Update::Scroll { y1: 0, y2: 4, n: 0 },
            ]
        );
    }

    #[test]
    fn test_scroll_restores_shown_state() {
        let (mut console, log) = observed(32, 32, FontId::Vga8x8);
        console.blink(0);
        assert!(console.cursor_is_shown());
        log.clear();

        console.scroll_lines(1);
        let updates = log.updates();
        assert_eq!(
            updates.first(),
            Some(&Update::CursorVisibility {
                visible: false,
                x: 0,
                y: 0
            })
        );
        assert_eq!(
            updates.last(),
            Some(&Update::CursorVisibility {
                visible: true,
                x: 0,
                y: 0
            })
        );
    }

    #[test]
    fn test_show_hide_cursor() {
        let (mut console, log) = observed(640, 480, FontId::Vga8x16);
        console.goto_xy(3, 4);
        log.clear();

        console.show_cursor();
        assert!(log.is_empty());

        console.hide_cursor();
        console.hide_cursor();
        assert!(!console.cursor_is_visible());
        console.show_cursor();
        assert_eq!(
            log.drain(),
            vec![
                Update::CursorVisibility {
                    visible: false,
                    x: 3,
                    y: 4
                },
                Update::CursorVisibility {
                    visible: true,
                    x: 3,
                    y: 4
                },
            ]
        );
    }

    #[test]
    fn test_blink_cycle() {
        let (mut console, log) = observed(640, 480, FontId::Vga8x16);
        console.set_blink_rate(100);

        console.blink(0);
        let at_zero = console.cursor_is_shown();
        console.blink(100);
        let at_rate = console.cursor_is_shown();
        console.blink(200);
        let at_cycle = console.cursor_is_shown();

        assert_ne!(at_zero, at_rate);
        assert_eq!(at_zero, at_cycle);
        assert_eq!(log.len(), 3);

        // No phase change, no event
        console.blink(250);
        assert_eq!(log.len(), 3);

        // Hidden cursors do not blink
        console.hide_cursor();
        log.clear();
        console.blink(300);
        console.blink(400);
        assert!(log.is_empty());
    }

    #[test]
    fn test_set_font_resizes_and_notifies() {
        let (mut console, log) = observed(640, 480, FontId::Vga8x16);
        console.goto_xy(79, 29);
        log.clear();

        console.set_font(FontId::Vga16x32);
        assert_eq!((console.width(), console.height()), (40, 15));
        assert_eq!(console.cells().len(), 600);
        assert_eq!((console.cursor_x(), console.cursor_y()), (39, 14));

        let updates = log.drain();
        assert_eq!(updates.len(), 1);
        match &updates[0] {
            Update::FontChange {
                font,
                char_width,
                char_height,
                bitmap,
            } => {
                assert_eq!(*font, FontId::Vga16x32);
                assert_eq!((*char_width, *char_height), (16, 32));
                assert_eq!(bitmap.len(), 256 * 64);
            },
            other => panic!("unexpected update: {:?}", other.kind()),
        }

        console.set_font(FontId::Vga16x32);
        assert!(log.is_empty());
    }

    #[test]
    fn test_char_bitmap_offset() {
        let mut console = Console::new(640, 480, FontId::Vga8x16);
        assert_eq!(console.char_bitmap_offset(b'A'), 65 * 16);
        assert_eq!(console.char_bitmap(b'A').len(), 16);

        console.set_font(FontId::Vga16x32);
        assert_eq!(console.char_bitmap_offset(b'A'), 65 * 64);
        assert_eq!(console.char_bitmap(b'A').len(), 64);
    }

    #[test]
    fn test_palette_roundtrip_and_event() {
        let (mut console, log) = observed(640, 480, FontId::Vga8x16);
        let mut entries = *ANSI_PALETTE.entries();
        entries[1] = Rgb::new(1, 2, 3);

        console.set_palette(entries);
        assert_eq!(console.palette().get(1), Rgb::new(1, 2, 3));
        assert_eq!(
            log.drain(),
            vec![Update::PaletteChange {
                palette: Palette(entries)
            }]
        );

        console.set_palette(entries);
        assert!(log.is_empty());
    }

    #[test]
    fn test_attribute_nibbles() {
        let mut console = Console::new(640, 480, FontId::Vga8x16);
        console.set_attribute(Attribute(0x4E));
        assert_eq!(console.foreground_color(), 0x0E);
        assert_eq!(console.background_color(), 0x04);
    }

    #[test]
    fn test_string_at() {
        let mut console = Console::new(640, 480, FontId::Vga8x16);
        console.print_str("Hello World");
        assert_eq!(console.string_at(6, 0, 5), b"World");
        assert_eq!(console.string_at(78, 0, 10).len(), 2);
        assert!(console.string_at(80, 0, 5).is_empty());
        assert!(console.string_at(0, 30, 5).is_empty());
    }

    #[test]
    fn test_refresh_and_observer_replacement() {
        let mut console = Console::new(640, 480, FontId::Vga8x16);
        let first = UpdateLog::new();
        let second = UpdateLog::new();

        console.set_observer(first.clone());
        console.refresh();
        console.set_observer(second.clone());
        console.refresh();
        console.clear_observer();
        console.refresh();

        assert_eq!(first.updates(), vec![Update::Refresh]);
        assert_eq!(second.updates(), vec![Update::Refresh]);
    }

    #[test]
    fn test_tiny_viewport_has_no_cells() {
        let mut console = Console::new(4, 4, FontId::Vga8x16);
        assert_eq!((console.width(), console.height()), (0, 0));
        console.print_str("abc\n\tdef");
        console.scroll_lines(2);
        console.goto_xy(5, 5);
        assert!(console.cells().is_empty());
        assert_eq!(console.character_at(0, 0), 0);
    }
}
