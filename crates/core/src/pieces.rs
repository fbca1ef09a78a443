//! Pieces module - static tetromino geometry
//!
//! Every piece kind has four rotation states, each made of exactly four cells.
//! A cell is stored as one byte: the low nibble is the column delta and the
//! high nibble the row delta from the piece origin, inside a 4x4 box.
//! Per kind there is also a fixed spawn offset: the spawn row and a column bias
//! relative to the playfield's centre column.

use crate::types::{PieceKind, Position, Rotation, PLAYFIELD_COLS};

/// Pack a `(col, row)` delta into one byte
pub const fn blk(col: u8, row: u8) -> u8 {
    (col & 0xf) | ((row & 0xf) << 4)
}

/// Column delta of a packed cell
pub const fn blk_col(cell: u8) -> u8 {
    cell & 0xf
}

/// Row delta of a packed cell
pub const fn blk_row(cell: u8) -> u8 {
    cell >> 4
}

/// Packed shape of a piece in one rotation state
pub type PackedShape = [u8; 4];

/// Geometry table indexed by `[PieceKind::index()][Rotation::index()]`
pub const PIECES: [[PackedShape; 4]; PieceKind::COUNT] = [
    // I
    [
        [blk(0, 1), blk(1, 1), blk(2, 1), blk(3, 1)],
        [blk(2, 0), blk(2, 1), blk(2, 2), blk(2, 3)],
        [blk(0, 2), blk(1, 2), blk(2, 2), blk(3, 2)],
        [blk(1, 0), blk(1, 1), blk(1, 2), blk(1, 3)],
    ],
    // O
    [
        [blk(1, 0), blk(2, 0), blk(1, 1), blk(2, 1)],
        [blk(1, 0), blk(2, 0), blk(1, 1), blk(2, 1)],
        [blk(1, 0), blk(2, 0), blk(1, 1), blk(2, 1)],
        [blk(1, 0), blk(2, 0), blk(1, 1), blk(2, 1)],
    ],
    // J
    [
        [blk(0, 0), blk(0, 1), blk(1, 1), blk(2, 1)],
        [blk(1, 0), blk(2, 0), blk(1, 1), blk(1, 2)],
        [blk(0, 1), blk(1, 1), blk(2, 1), blk(2, 2)],
        [blk(1, 0), blk(1, 1), blk(0, 2), blk(1, 2)],
    ],
    // L
    [
        [blk(2, 0), blk(0, 1), blk(1, 1), blk(2, 1)],
        [blk(1, 0), blk(1, 1), blk(1, 2), blk(2, 2)],
        [blk(0, 1), blk(1, 1), blk(2, 1), blk(0, 2)],
        [blk(0, 0), blk(1, 0), blk(1, 1), blk(1, 2)],
    ],
    // S
    [
        [blk(1, 0), blk(2, 0), blk(0, 1), blk(1, 1)],
        [blk(1, 0), blk(1, 1), blk(2, 1), blk(2, 2)],
        [blk(1, 1), blk(2, 1), blk(0, 2), blk(1, 2)],
        [blk(0, 0), blk(0, 1), blk(1, 1), blk(1, 2)],
    ],
    // T
    [
        [blk(1, 0), blk(0, 1), blk(1, 1), blk(2, 1)],
        [blk(1, 0), blk(1, 1), blk(2, 1), blk(1, 2)],
        [blk(0, 1), blk(1, 1), blk(2, 1), blk(1, 2)],
        [blk(1, 0), blk(0, 1), blk(1, 1), blk(1, 2)],
    ],
    // Z
    [
        [blk(0, 0), blk(1, 0), blk(1, 1), blk(2, 1)],
        [blk(2, 0), blk(1, 1), blk(2, 1), blk(1, 2)],
        [blk(0, 1), blk(1, 1), blk(1, 2), blk(2, 2)],
        [blk(1, 0), blk(0, 1), blk(1, 1), blk(0, 2)],
    ],
];

/// Spawn `(row, column bias)` per kind, same order as [`PIECES`]
pub const SPAWN_OFFSETS: [(i32, i32); PieceKind::COUNT] = [
    (-1, -2), // I: lying flat on row 0
    (0, -2),
    (0, -2),
    (0, -2),
    (0, -2),
    (0, -2),
    (0, -2),
];

/// Get the packed shape for a piece kind and rotation
pub fn packed_shape(kind: PieceKind, rotation: Rotation) -> &'static PackedShape {
    &PIECES[kind.index()][rotation.index()]
}

/// Absolute playfield positions of the four cells of a piece
pub fn cells(kind: PieceKind, rotation: Rotation, origin: Position) -> [Position; 4] {
    let shape = *packed_shape(kind, rotation);
    shape.map(|cell| origin.offset(blk_row(cell) as i32, blk_col(cell) as i32))
}

/// Spawn origin for a new piece: fixed row, column centred in the playfield
pub fn spawn_position(kind: PieceKind) -> Position {
    let (row, col_bias) = SPAWN_OFFSETS[kind.index()];
    Position::new(row, PLAYFIELD_COLS as i32 / 2 + col_bias)
}
