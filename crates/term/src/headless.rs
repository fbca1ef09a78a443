//! Headless driver: an in-memory screen for tests and tooling.

use anyhow::Result;

use crate::driver::TerminalDriver;
use crate::glyph::Glyph;
use crate::types::{CELLS_PER_TILE, SCREEN_COLS, SCREEN_ROWS};

/// Character-cell width of the screen
pub const HEADLESS_WIDTH: usize = SCREEN_COLS * CELLS_PER_TILE;

/// Records everything written to it
#[derive(Debug, Clone)]
pub struct HeadlessDriver {
    cells: Vec<Option<(u8, u8)>>,
    row: u16,
    col: u16,
    cursor_visible: bool,
    glyph_writes: usize,
    unflushed_writes: usize,
    flushes: usize,
    bells: usize,
    resets: usize,
}

impl HeadlessDriver {
    pub fn new() -> Self {
        Self {
            cells: vec![None; SCREEN_ROWS * HEADLESS_WIDTH],
            row: 0,
            col: 0,
            cursor_visible: true,
            glyph_writes: 0,
            unflushed_writes: 0,
            flushes: 0,
            bells: 0,
            resets: 0,
        }
    }

    /// `(code, attribute)` last written at a character cell
    pub fn cell(&self, row: usize, col: usize) -> Option<(u8, u8)> {
        if row >= SCREEN_ROWS || col >= HEADLESS_WIDTH {
            return None;
        }
        self.cells[row * HEADLESS_WIDTH + col]
    }

    /// True if the character cell shows exactly `glyph`
    pub fn shows(&self, row: usize, col: usize, glyph: Glyph) -> bool {
        self.cell(row, col) == Some((glyph.code, glyph.attribute()))
    }

    pub fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    /// Total glyphs written since creation
    pub fn glyph_writes(&self) -> usize {
        self.glyph_writes
    }

    /// Glyphs written since the last flush
    pub fn unflushed_writes(&self) -> usize {
        self.unflushed_writes
    }

    pub fn flushes(&self) -> usize {
        self.flushes
    }

    pub fn bells(&self) -> usize {
        self.bells
    }

    pub fn resets(&self) -> usize {
        self.resets
    }
}

impl Default for HeadlessDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalDriver for HeadlessDriver {
    fn clear_screen(&mut self) -> Result<()> {
        self.cells.fill(None);
        self.row = 0;
        self.col = 0;
        Ok(())
    }

    fn hide_cursor(&mut self) -> Result<()> {
        self.cursor_visible = false;
        Ok(())
    }

    fn show_cursor(&mut self) -> Result<()> {
        self.cursor_visible = true;
        Ok(())
    }

    fn reset_terminal(&mut self) -> Result<()> {
        self.cursor_visible = true;
        self.resets += 1;
        Ok(())
    }

    fn set_cursor(&mut self, row: u16, col: u16) -> Result<()> {
        self.row = row;
        self.col = col;
        Ok(())
    }

    fn write_glyph(&mut self, code: u8, attribute: u8) -> Result<()> {
        let (row, col) = (self.row as usize, self.col as usize);
        if row < SCREEN_ROWS && col < HEADLESS_WIDTH {
            self.cells[row * HEADLESS_WIDTH + col] = Some((code, attribute));
        }
        self.col = self.col.saturating_add(1);
        self.glyph_writes += 1;
        self.unflushed_writes += 1;
        Ok(())
    }

    fn ring_bell(&mut self) -> Result<()> {
        self.bells += 1;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.flushes += 1;
        self.unflushed_writes = 0;
        Ok(())
    }
}
