//! Renderer: draws board tiles through a [`TerminalDriver`].
//!
//! Nothing here diffs whole frames. The engine knows what changed and asks for
//! exactly that: the whole screen once at startup, the playfield after a line
//! clear, four piece cells per move, one row per blink phase. Draw calls only
//! queue output; call [`Renderer::flush`] at the end of a batch.

use anyhow::Result;

use crate::core::{cells, Board};
use crate::driver::TerminalDriver;
use crate::glyph::tile_glyphs;
use crate::types::{
    DrawMode, PieceKind, Position, Rotation, Tile, CELLS_PER_TILE, PLAYFIELD_COLS,
    PLAYFIELD_ROWS, PLAYFIELD_X, PLAYFIELD_Y, SCREEN_COLS, SCREEN_ROWS,
};

pub struct Renderer<D> {
    driver: D,
}

impl<D: TerminalDriver> Renderer<D> {
    pub fn new(driver: D) -> Self {
        Self { driver }
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Clear the screen, hide the cursor and paint the whole board
    pub fn start(&mut self, board: &Board) -> Result<()> {
        self.driver.clear_screen()?;
        self.driver.hide_cursor()?;
        self.draw_full_background(board)?;
        self.flush()
    }

    /// Hand the terminal back in its original state
    pub fn shutdown(&mut self) -> Result<()> {
        self.driver.reset_terminal()
    }

    /// Paint every tile of the screen grid
    pub fn draw_full_background(&mut self, board: &Board) -> Result<()> {
        for row in 0..SCREEN_ROWS {
            self.driver.set_cursor(row as u16, 0)?;
            for col in 0..SCREEN_COLS {
                self.write_tile(board.tile_at(row, col))?;
            }
        }
        Ok(())
    }

    /// Repaint the playfield only
    pub fn draw_playfield(&mut self, board: &Board) -> Result<()> {
        for row in 0..PLAYFIELD_ROWS {
            self.move_to_playfield(row as i32, 0)?;
            for col in 0..PLAYFIELD_COLS {
                self.write_tile(board.playfield_tile(row, col))?;
            }
        }
        Ok(())
    }

    /// Write the four cells of a piece, either as the piece or as empty playfield
    ///
    /// Cells above the playfield are skipped.
    pub fn draw_piece(
        &mut self,
        kind: PieceKind,
        pos: Position,
        rotation: Rotation,
        mode: DrawMode,
    ) -> Result<()> {
        let tile = match mode {
            DrawMode::Erase => Tile::Playfield,
            DrawMode::Draw => Tile::Piece(kind),
        };
        for cell in cells(kind, rotation, pos) {
            if cell.row < 0 {
                continue;
            }
            self.move_to_playfield(cell.row, cell.col)?;
            self.write_tile(tile)?;
        }
        Ok(())
    }

    /// Repaint one playfield row with its real contents, or blanked out
    pub fn draw_row(&mut self, board: &Board, row: usize, visible: bool) -> Result<()> {
        self.move_to_playfield(row as i32, 0)?;
        for col in 0..PLAYFIELD_COLS {
            let tile = if visible {
                board.playfield_tile(row, col)
            } else {
                Tile::Playfield
            };
            self.write_tile(tile)?;
        }
        Ok(())
    }

    pub fn ring_bell(&mut self) -> Result<()> {
        self.driver.ring_bell()
    }

    pub fn flush(&mut self) -> Result<()> {
        self.driver.flush()
    }

    fn move_to_playfield(&mut self, row: i32, col: i32) -> Result<()> {
        let screen_row = PLAYFIELD_Y as i32 + row;
        let screen_col = (PLAYFIELD_X as i32 + col) * CELLS_PER_TILE as i32;
        self.driver.set_cursor(screen_row as u16, screen_col as u16)
    }

    fn write_tile(&mut self, tile: Tile) -> Result<()> {
        for glyph in tile_glyphs(tile) {
            self.driver.write_glyph(glyph.code, glyph.attribute())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::HeadlessDriver;

    fn tile_shown(driver: &HeadlessDriver, row: usize, col: usize, tile: Tile) -> bool {
        let [left, right] = tile_glyphs(tile);
        driver.shows(row, col * CELLS_PER_TILE, left)
            && driver.shows(row, col * CELLS_PER_TILE + 1, right)
    }

    #[test]
    fn start_paints_every_cell_and_flushes() {
        let board = Board::new();
        let mut renderer = Renderer::new(HeadlessDriver::new());
        renderer.start(&board).unwrap();

        let driver = renderer.driver();
        assert!(!driver.cursor_visible());
        assert_eq!(driver.glyph_writes(), SCREEN_ROWS * SCREEN_COLS * CELLS_PER_TILE);
        assert_eq!(driver.unflushed_writes(), 0);
        for row in 0..SCREEN_ROWS {
            for col in 0..SCREEN_COLS {
                assert!(tile_shown(driver, row, col, board.tile_at(row, col)));
            }
        }
    }

    #[test]
    fn draw_piece_touches_only_four_cells() {
        let mut renderer = Renderer::new(HeadlessDriver::new());
        let pos = Position::new(4, 3);
        renderer
            .draw_piece(PieceKind::O, pos, Rotation::North, DrawMode::Draw)
            .unwrap();

        let driver = renderer.driver();
        assert_eq!(driver.glyph_writes(), 4 * CELLS_PER_TILE);
        let tile = Tile::Piece(PieceKind::O);
        // O cells: box columns 1..=2, rows 0..=1
        assert!(tile_shown(driver, 4, PLAYFIELD_X + 4, tile));
        assert!(tile_shown(driver, 4, PLAYFIELD_X + 5, tile));
        assert!(tile_shown(driver, 5, PLAYFIELD_X + 4, tile));
        assert!(tile_shown(driver, 5, PLAYFIELD_X + 5, tile));
    }

    #[test]
    fn draw_piece_skips_rows_above_screen() {
        let mut renderer = Renderer::new(HeadlessDriver::new());
        // Vertical I with three cells above the playfield.
        renderer
            .draw_piece(
                PieceKind::I,
                Position::new(-3, 0),
                Rotation::East,
                DrawMode::Erase,
            )
            .unwrap();
        assert_eq!(renderer.driver().glyph_writes(), CELLS_PER_TILE);
        assert!(tile_shown(renderer.driver(), 0, PLAYFIELD_X + 2, Tile::Playfield));
    }

    #[test]
    fn draw_row_blanks_when_hidden() {
        let mut board = Board::new();
        for col in 0..PLAYFIELD_COLS {
            board.set_tile(9, col, Tile::Piece(PieceKind::J));
        }
        let mut renderer = Renderer::new(HeadlessDriver::new());

        renderer.draw_row(&board, 9, true).unwrap();
        assert!(tile_shown(renderer.driver(), 9, PLAYFIELD_X, Tile::Piece(PieceKind::J)));

        renderer.draw_row(&board, 9, false).unwrap();
        for col in 0..PLAYFIELD_COLS {
            assert!(tile_shown(renderer.driver(), 9, PLAYFIELD_X + col, Tile::Playfield));
        }
    }

    #[test]
    fn shutdown_resets_terminal() {
        let mut renderer = Renderer::new(HeadlessDriver::new());
        renderer.shutdown().unwrap();
        assert_eq!(renderer.driver().resets(), 1);
        assert!(renderer.driver().cursor_visible());
    }
}
