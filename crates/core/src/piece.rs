//! Piece and collision engine
//!
//! The falling piece keeps two placements:
//! - `current`: what is on screen right now
//! - `pending`: where the game logic has moved it since the last redraw
//!
//! Moves and rotations only ever touch `pending`, and only after a collision
//! test passed. The engine commits `pending` into `current` on its next redraw.

use log::debug;

use crate::board::Board;
use crate::lines::CompletedLines;
use crate::pieces::{cells, spawn_position};
use crate::types::{PieceKind, Position, Rotation, Tile};

/// Position and rotation of a piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Placement {
    pub pos: Position,
    pub rotation: Rotation,
}

impl Placement {
    pub const fn new(pos: Position, rotation: Rotation) -> Self {
        Self { pos, rotation }
    }
}

/// Collision test of a piece against the board
///
/// Cells above the visible playfield (negative rows) never collide. Any other
/// cell collides unless it holds the empty playfield tile; walls, floor and
/// everything off the grid are never empty.
pub fn collision(board: &Board, kind: PieceKind, rotation: Rotation, pos: Position) -> bool {
    cells(kind, rotation, pos)
        .iter()
        .filter(|cell| cell.row >= 0)
        .any(|cell| !matches!(board.probe(cell.row, cell.col), Some(Tile::Playfield)))
}

/// The piece currently falling through the playfield
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivePiece {
    kind: PieceKind,
    current: Placement,
    pending: Placement,
    drawn: bool,
}

impl ActivePiece {
    /// New piece at its kind's spawn offset, rotation 0
    ///
    /// No collision test happens here: a piece may start on top of locked tiles.
    pub fn spawn(kind: PieceKind) -> Self {
        let placement = Placement::new(spawn_position(kind), Rotation::North);
        Self {
            kind,
            current: placement,
            pending: placement,
            drawn: false,
        }
    }

    /// Piece at an explicit placement (not yet drawn)
    pub fn at(kind: PieceKind, placement: Placement) -> Self {
        Self {
            kind,
            current: placement,
            pending: placement,
            drawn: false,
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Placement last drawn (or the spawn placement before the first draw)
    pub fn current(&self) -> Placement {
        self.current
    }

    /// Placement the logic has accepted but not drawn yet
    pub fn pending(&self) -> Placement {
        self.pending
    }

    /// True once the piece has been drawn at `current`
    pub fn is_drawn(&self) -> bool {
        self.drawn
    }

    /// True if the screen lags behind the logic
    pub fn needs_redraw(&self) -> bool {
        !self.drawn || self.current != self.pending
    }

    /// Mark `pending` as drawn
    pub fn commit(&mut self) {
        self.current = self.pending;
        self.drawn = true;
    }

    fn try_place(&mut self, board: &Board, candidate: Placement) -> bool {
        if collision(board, self.kind, candidate.rotation, candidate.pos) {
            return false;
        }
        self.pending = candidate;
        true
    }

    /// Shift the pending placement; returns false (and changes nothing) on collision
    pub fn try_move(&mut self, board: &Board, delta_row: i32, delta_col: i32) -> bool {
        let candidate = Placement::new(
            self.pending.pos.offset(delta_row, delta_col),
            self.pending.rotation,
        );
        self.try_place(board, candidate)
    }

    /// Rotate the pending placement clockwise in place (no wall kicks)
    pub fn try_rotate_cw(&mut self, board: &Board) -> bool {
        let candidate = Placement::new(self.pending.pos, self.pending.rotation.rotate_cw());
        self.try_place(board, candidate)
    }

    /// True if the pending placement can't move one row down
    pub fn is_grounded(&self, board: &Board) -> bool {
        collision(
            board,
            self.kind,
            self.pending.rotation,
            self.pending.pos.offset(1, 0),
        )
    }
}

/// Write a piece into the board and record the rows it completed
///
/// Cells above the playfield are dropped. Each distinct row the piece touched
/// is checked once; complete rows are appended to `lines`.
pub fn lock(board: &mut Board, kind: PieceKind, placement: Placement, lines: &mut CompletedLines) {
    let cells = cells(kind, placement.rotation, placement.pos);

    for cell in cells.iter().filter(|cell| cell.row >= 0) {
        board.set_tile(cell.row as usize, cell.col as usize, Tile::Piece(kind));
    }

    let mut checked: [Option<i32>; 4] = [None; 4];
    for (i, cell) in cells.iter().enumerate() {
        if cell.row < 0 || checked.contains(&Some(cell.row)) {
            continue;
        }
        checked[i] = Some(cell.row);
        if board.is_row_complete(cell.row as usize) {
            lines.push(cell.row as usize);
        }
    }

    debug!(
        "locked {} at ({}, {}) {}; {} completed row(s)",
        kind.as_str(),
        placement.pos.row,
        placement.pos.col,
        placement.rotation.as_str(),
        lines.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PLAYFIELD_COLS, PLAYFIELD_ROWS};

    #[test]
    fn test_no_collision_on_empty_board() {
        let board = Board::new();
        assert!(!collision(&board, PieceKind::T, Rotation::North, Position::new(5, 3)));
    }

    #[test]
    fn test_collision_with_walls_and_floor() {
        let board = Board::new();
        // O occupies box columns 1..=2, so origin -2 puts a cell in the left wall.
        assert!(collision(&board, PieceKind::O, Rotation::North, Position::new(5, -2)));
        assert!(!collision(&board, PieceKind::O, Rotation::North, Position::new(5, -1)));
        assert!(collision(
            &board,
            PieceKind::O,
            Rotation::North,
            Position::new(5, PLAYFIELD_COLS as i32 - 2)
        ));
        assert!(collision(
            &board,
            PieceKind::O,
            Rotation::North,
            Position::new(PLAYFIELD_ROWS as i32 - 1, 3)
        ));
    }

    #[test]
    fn test_cells_above_board_never_collide() {
        let board = Board::new();
        // Vertical I with its top three cells above row 0.
        assert!(!collision(&board, PieceKind::I, Rotation::East, Position::new(-3, 0)));
    }

    #[test]
    fn test_collision_with_locked_tile() {
        let mut board = Board::new();
        board.set_tile(6, 4, Tile::Piece(PieceKind::Z));
        // T north at (5, 3) covers (6, 4).
        assert!(collision(&board, PieceKind::T, Rotation::North, Position::new(5, 3)));
    }

    #[test]
    fn test_failed_rotation_keeps_state() {
        let board = Board::new();
        // Vertical I hugging the right wall: rotating to south spills over it.
        let mut piece = ActivePiece::at(
            PieceKind::I,
            Placement::new(Position::new(5, PLAYFIELD_COLS as i32 - 3), Rotation::East),
        );
        let before = piece;
        assert!(!piece.try_rotate_cw(&board));
        assert_eq!(piece, before);
    }

    #[test]
    fn test_move_updates_pending_only() {
        let board = Board::new();
        let mut piece = ActivePiece::spawn(PieceKind::T);
        let spawn = piece.current();

        assert!(piece.try_move(&board, 0, -1));
        assert_eq!(piece.current(), spawn);
        assert_eq!(piece.pending().pos, spawn.pos.offset(0, -1));
        assert!(piece.needs_redraw());

        piece.commit();
        assert!(!piece.needs_redraw());
        assert_eq!(piece.current().pos, spawn.pos.offset(0, -1));
    }

    #[test]
    fn test_grounded_on_floor_and_stack() {
        let mut board = Board::new();
        let resting = ActivePiece::at(
            PieceKind::O,
            Placement::new(Position::new(PLAYFIELD_ROWS as i32 - 2, 3), Rotation::North),
        );
        assert!(resting.is_grounded(&board));

        let floating = ActivePiece::at(
            PieceKind::O,
            Placement::new(Position::new(10, 3), Rotation::North),
        );
        assert!(!floating.is_grounded(&board));
        board.set_tile(12, 4, Tile::Piece(PieceKind::J));
        assert!(floating.is_grounded(&board));
    }

    #[test]
    fn test_lock_detects_completed_row() {
        let mut board = Board::new();
        for col in 0..PLAYFIELD_COLS {
            if col != 4 {
                board.set_tile(17, col, Tile::Piece(PieceKind::L));
            }
        }

        // Vertical I (west, box column 1) dropping into the gap at column 4.
        let mut lines = CompletedLines::new();
        lock(
            &mut board,
            PieceKind::I,
            Placement::new(Position::new(14, 3), Rotation::West),
            &mut lines,
        );

        assert_eq!(lines.rows(), &[17]);
        for row in 14..18 {
            assert_eq!(board.playfield_tile(row, 4), Tile::Piece(PieceKind::I));
        }
    }

    #[test]
    fn test_lock_skips_rows_above_board() {
        let mut board = Board::new();
        let mut lines = CompletedLines::new();
        lock(
            &mut board,
            PieceKind::I,
            Placement::new(Position::new(-2, 0), Rotation::West),
            &mut lines,
        );
        assert_eq!(board.filled_cells(), 2);
        assert!(lines.is_empty());
    }
}
