//! Board module - the fixed tile grid covering the whole screen
//!
//! The board is a 20x20 grid of [`Tile`]s. It holds the playfield (18 rows x
//! 10 columns, offset by `PLAYFIELD_X`/`PLAYFIELD_Y`), the well walls and floor,
//! and the black background around them. Uses a flat array for cache locality
//! and zero allocation.
//!
//! Two coordinate systems are used:
//! - screen coordinates `(row, col)` address any tile of the grid
//! - playfield coordinates `(row, col)` address the well only and are what the
//!   piece logic works in
//!
//! Only playfield cells ever change after [`Board::new`]. Out-of-bounds access
//! through the `usize` accessors is a programming error and panics.

use crate::types::{
    Tile, PLAYFIELD_COLS, PLAYFIELD_ROWS, PLAYFIELD_X, PLAYFIELD_Y, SCREEN_COLS, SCREEN_ROWS,
};

/// Total number of tiles on the board
const BOARD_SIZE: usize = SCREEN_ROWS * SCREEN_COLS;

/// The tile grid, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    tiles: [Tile; BOARD_SIZE],
}

impl Board {
    /// Create a freshly initialised board: empty well, walls, floor and background
    pub fn new() -> Self {
        let mut tiles = [Tile::Black; BOARD_SIZE];
        for row in 0..SCREEN_ROWS {
            for col in 0..SCREEN_COLS {
                tiles[row * SCREEN_COLS + col] = Self::initial_tile(row, col);
            }
        }
        Self { tiles }
    }

    /// Tile a screen cell holds right after initialisation
    fn initial_tile(row: usize, col: usize) -> Tile {
        let left_wall = PLAYFIELD_X - 1;
        let right_wall = PLAYFIELD_X + PLAYFIELD_COLS;
        let floor = PLAYFIELD_Y + PLAYFIELD_ROWS;

        if row > floor || row < PLAYFIELD_Y || col < left_wall || col > right_wall {
            Tile::Black
        } else if row == floor || col == left_wall || col == right_wall {
            Tile::Separator
        } else {
            Tile::Playfield
        }
    }

    #[inline(always)]
    fn index(row: usize, col: usize) -> usize {
        assert!(
            row < SCREEN_ROWS && col < SCREEN_COLS,
            "screen cell ({row}, {col}) out of bounds"
        );
        row * SCREEN_COLS + col
    }

    #[inline(always)]
    fn playfield_index(row: usize, col: usize) -> usize {
        assert!(
            row < PLAYFIELD_ROWS && col < PLAYFIELD_COLS,
            "playfield cell ({row}, {col}) out of bounds"
        );
        Self::index(row + PLAYFIELD_Y, col + PLAYFIELD_X)
    }

    /// Get the tile at screen position `(row, col)`
    pub fn tile_at(&self, row: usize, col: usize) -> Tile {
        self.tiles[Self::index(row, col)]
    }

    /// Get the tile at playfield position `(row, col)`
    pub fn playfield_tile(&self, row: usize, col: usize) -> Tile {
        self.tiles[Self::playfield_index(row, col)]
    }

    /// Set the tile at playfield position `(row, col)`
    ///
    /// Only piece tiles and the empty playfield tile belong in the well.
    pub fn set_tile(&mut self, row: usize, col: usize, tile: Tile) {
        debug_assert!(
            matches!(tile, Tile::Playfield | Tile::Piece(_)),
            "{tile:?} does not belong inside the playfield"
        );
        self.tiles[Self::playfield_index(row, col)] = tile;
    }

    /// Tile at a signed playfield position, or `None` when it falls off the grid
    ///
    /// Positions just outside the well resolve to wall, floor or background
    /// tiles, so callers can treat "not empty" as blocked.
    pub fn probe(&self, row: i32, col: i32) -> Option<Tile> {
        let row = row.checked_add(PLAYFIELD_Y as i32)?;
        let col = col.checked_add(PLAYFIELD_X as i32)?;
        if row < 0 || col < 0 || row >= SCREEN_ROWS as i32 || col >= SCREEN_COLS as i32 {
            return None;
        }
        Some(self.tiles[(row as usize) * SCREEN_COLS + col as usize])
    }

    /// One playfield row (playfield width only)
    pub fn playfield_row(&self, row: usize) -> &[Tile] {
        let start = Self::playfield_index(row, 0);
        &self.tiles[start..start + PLAYFIELD_COLS]
    }

    /// True if no cell across the playfield width of `row` is empty
    pub fn is_row_complete(&self, row: usize) -> bool {
        self.playfield_row(row).iter().all(|tile| !tile.is_empty())
    }

    /// Copy the playfield part of row `src` over row `dst`
    pub fn copy_row(&mut self, src: usize, dst: usize) {
        if src == dst {
            return;
        }
        let src_start = Self::playfield_index(src, 0);
        let dst_start = Self::playfield_index(dst, 0);
        // copy_within handles overlapping ranges safely
        self.tiles
            .copy_within(src_start..src_start + PLAYFIELD_COLS, dst_start);
    }

    /// Reset the playfield part of `row` to empty tiles
    pub fn clear_row(&mut self, row: usize) {
        let start = Self::playfield_index(row, 0);
        self.tiles[start..start + PLAYFIELD_COLS].fill(Tile::Playfield);
    }

    /// Number of non-empty playfield cells
    pub fn filled_cells(&self) -> usize {
        (0..PLAYFIELD_ROWS)
            .map(|row| {
                self.playfield_row(row)
                    .iter()
                    .filter(|tile| !tile.is_empty())
                    .count()
            })
            .sum()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
