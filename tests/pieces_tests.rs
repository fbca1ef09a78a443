//! Geometry and collision tests

use proptest::prelude::*;

use termtris::core::{cells, collision, spawn_position, ActivePiece, Board, Placement};
use termtris::types::{PieceKind, Position, Rotation, Tile, PLAYFIELD_COLS, PLAYFIELD_ROWS};

fn rotation(index: usize) -> Rotation {
    let mut rot = Rotation::North;
    for _ in 0..index {
        rot = rot.rotate_cw();
    }
    rot
}

fn board_from(filled: &[bool]) -> Board {
    let mut board = Board::new();
    for (i, &f) in filled.iter().enumerate() {
        if f {
            board.set_tile(i / PLAYFIELD_COLS, i % PLAYFIELD_COLS, Tile::Piece(PieceKind::S));
        }
    }
    board
}

// ============== Shape Tests ==============

#[test]
fn test_o_piece_is_rotation_invariant() {
    let origin = Position::new(3, 3);
    let north = cells(PieceKind::O, Rotation::North, origin);
    for r in 1..4 {
        assert_eq!(cells(PieceKind::O, rotation(r), origin), north);
    }
}

#[test]
fn test_four_rotations_return_to_start() {
    for kind in PieceKind::ALL {
        let origin = Position::new(4, 4);
        assert_eq!(
            cells(kind, rotation(4), origin),
            cells(kind, Rotation::North, origin)
        );
    }
}

#[test]
fn test_spawn_positions_are_free_on_empty_board() {
    let board = Board::new();
    for kind in PieceKind::ALL {
        assert!(!collision(&board, kind, Rotation::North, spawn_position(kind)));
    }
}

// ============== Movement Tests ==============

#[test]
fn test_shift_stops_at_walls() {
    let board = Board::new();
    for kind in PieceKind::ALL {
        let mut piece = ActivePiece::spawn(kind);
        while piece.try_move(&board, 0, -1) {}
        let leftmost = cells(kind, Rotation::North, piece.pending().pos)
            .iter()
            .map(|c| c.col)
            .min()
            .unwrap();
        assert_eq!(leftmost, 0, "{kind:?}");

        while piece.try_move(&board, 0, 1) {}
        let rightmost = cells(kind, Rotation::North, piece.pending().pos)
            .iter()
            .map(|c| c.col)
            .max()
            .unwrap();
        assert_eq!(rightmost, PLAYFIELD_COLS as i32 - 1, "{kind:?}");
    }
}

#[test]
fn test_soft_drop_stops_at_floor() {
    let board = Board::new();
    let mut piece = ActivePiece::spawn(PieceKind::T);
    while piece.try_move(&board, 1, 0) {}

    let bottom = cells(PieceKind::T, Rotation::North, piece.pending().pos)
        .iter()
        .map(|c| c.row)
        .max()
        .unwrap();
    assert_eq!(bottom, PLAYFIELD_ROWS as i32 - 1);
}

#[test]
fn test_rotation_blocked_by_stack() {
    let mut board = Board::new();
    // T pointing up at (10, 3); rotating east needs (12, 4).
    board.set_tile(12, 4, Tile::Piece(PieceKind::I));
    let mut piece = ActivePiece::at(
        PieceKind::T,
        Placement::new(Position::new(10, 3), Rotation::North),
    );
    assert!(!piece.try_rotate_cw(&board));
    assert_eq!(piece.pending().rotation, Rotation::North);
}

// ============== Properties ==============

proptest! {
    #[test]
    fn prop_collision_matches_cellwise_rule(
        filled in prop::collection::vec(any::<bool>(), PLAYFIELD_ROWS * PLAYFIELD_COLS),
        kind in 0..PieceKind::COUNT,
        rot in 0..4usize,
        row in -5i32..22,
        col in -5i32..14,
    ) {
        let board = board_from(&filled);
        let kind = PieceKind::from_index(kind);
        let rot = rotation(rot);
        let pos = Position::new(row, col);

        let expected = cells(kind, rot, pos).iter().any(|c| {
            if c.row < 0 {
                return false;
            }
            let outside = c.col < 0
                || c.col >= PLAYFIELD_COLS as i32
                || c.row >= PLAYFIELD_ROWS as i32;
            outside || filled[c.row as usize * PLAYFIELD_COLS + c.col as usize]
        });

        prop_assert_eq!(collision(&board, kind, rot, pos), expected);
    }

    #[test]
    fn prop_failed_rotation_leaves_state_untouched(
        filled in prop::collection::vec(prop::bool::weighted(0.1), PLAYFIELD_ROWS * PLAYFIELD_COLS),
        kind in 0..PieceKind::COUNT,
        rot in 0..4usize,
        row in -2i32..PLAYFIELD_ROWS as i32,
        col in -1i32..PLAYFIELD_COLS as i32,
    ) {
        let board = board_from(&filled);
        let kind = PieceKind::from_index(kind);
        let start = Placement::new(Position::new(row, col), rotation(rot));
        prop_assume!(!collision(&board, kind, start.rotation, start.pos));

        let mut piece = ActivePiece::at(kind, start);
        let rotated = piece.try_rotate_cw(&board);
        if rotated {
            prop_assert_eq!(piece.pending().rotation, start.rotation.rotate_cw());
            prop_assert_eq!(piece.pending().pos, start.pos);
        } else {
            prop_assert_eq!(piece.pending(), start);
        }
    }

    #[test]
    fn prop_shifts_stay_inside_playfield(
        kind in 0..PieceKind::COUNT,
        moves in prop::collection::vec(0..3u8, 0..60),
    ) {
        let board = Board::new();
        let kind = PieceKind::from_index(kind);
        let mut piece = ActivePiece::spawn(kind);

        for m in moves {
            match m {
                0 => piece.try_move(&board, 0, -1),
                1 => piece.try_move(&board, 0, 1),
                _ => piece.try_rotate_cw(&board),
            };
            let p = piece.pending();
            for c in cells(kind, p.rotation, p.pos) {
                prop_assert!(c.col >= 0 && c.col < PLAYFIELD_COLS as i32);
            }
        }
    }
}
