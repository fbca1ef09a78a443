//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data with no external dependencies, so they can be used
//! by the game logic, the input decoder and the renderer alike.
//!
//! # Screen Layout
//!
//! The whole screen is a fixed grid of tiles. The playfield (the well pieces
//! fall into) is a sub-rectangle of it, framed by separator tiles:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `SCREEN_ROWS` | 20 | Rows of the tile grid |
//! | `SCREEN_COLS` | 20 | Columns of the tile grid |
//! | `PLAYFIELD_ROWS` | 18 | Rows of the playfield |
//! | `PLAYFIELD_COLS` | 10 | Columns of the playfield |
//! | `PLAYFIELD_X` | 2 | Screen column of playfield column 0 |
//! | `PLAYFIELD_Y` | 0 | Screen row of playfield row 0 |
//!
//! Each tile is drawn as two terminal character cells to correct for the
//! aspect ratio of a character cell.
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_TICK_MS` | 1000 | Gravity interval |
//! | `BLINK_PHASE_MS` | 256 | Length of one blink phase after a line clear |
//! | `BLINK_LAST_PHASE` | 6 | Last blink phase before compaction |
//! | `BLINK_POLL_MS` | 100 | Poll delay suggested while blinking |
//!
//! # Examples
//!
//! ```
//! use termtris_types::{PieceKind, Position, Rotation, Tile};
//!
//! assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
//! assert_eq!(PieceKind::from_index(2), PieceKind::J);
//! assert!(Tile::Piece(PieceKind::T).is_piece());
//! assert_eq!(Position::new(5, 3).offset(1, -1), Position::new(6, 2));
//! ```

/// Rows of the full tile grid
pub const SCREEN_ROWS: usize = 20;

/// Columns of the full tile grid
pub const SCREEN_COLS: usize = 20;

/// Rows of the playfield
pub const PLAYFIELD_ROWS: usize = 18;

/// Columns of the playfield
pub const PLAYFIELD_COLS: usize = 10;

/// Screen column of playfield column 0
pub const PLAYFIELD_X: usize = 2;

/// Screen row of playfield row 0
pub const PLAYFIELD_Y: usize = 0;

/// Terminal character cells per tile
pub const CELLS_PER_TILE: usize = 2;

/// Default gravity interval (one row per second)
pub const DEFAULT_TICK_MS: u64 = 1000;

/// Duration of a single blink phase while completed lines flash
pub const BLINK_PHASE_MS: u64 = 256;

/// Phases above this value end the blink animation
pub const BLINK_LAST_PHASE: u64 = 6;

/// Poll delay returned while the blink animation runs
pub const BLINK_POLL_MS: u64 = 100;

/// Most rows a single piece can complete
pub const MAX_COMPLETED_LINES: usize = 4;

/// Capacity of the escape-sequence buffer
pub const ESCAPE_BUFFER_LEN: usize = 64;

/// The seven tetromino piece kinds, in geometry-table order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    J,
    L,
    S,
    T,
    Z,
}

impl PieceKind {
    /// Every kind, indexed the same way as the geometry table
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::J,
        PieceKind::L,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Number of piece kinds
    pub const COUNT: usize = 7;

    /// Index into the geometry table
    pub fn index(self) -> usize {
        self as usize
    }

    /// Inverse of [`PieceKind::index`]
    ///
    /// Panics if `index >= PieceKind::COUNT`.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index]
    }

    /// Lowercase single-letter name
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::S => "s",
            PieceKind::T => "t",
            PieceKind::Z => "z",
        }
    }
}

/// Rotation states (North = spawn orientation)
///
/// The rotation cycle goes: North → East → South → West → North
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    #[default]
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise (90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use termtris_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::East.rotate_cw(), Rotation::South);
    /// assert_eq!(Rotation::South.rotate_cw(), Rotation::West);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Rotation state as 0..=3
    pub fn index(self) -> usize {
        self as usize
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Rotation::North => "north",
            Rotation::East => "east",
            Rotation::South => "south",
            Rotation::West => "west",
        }
    }
}

/// Identifier of one board cell
///
/// Game logic only ever reasons about tiles; how a tile looks on screen is
/// decided by the renderer's glyph table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tile {
    /// Screen background outside the well
    Black,
    /// Empty playfield cell
    Playfield,
    /// Well wall and floor
    Separator,
    /// Locked (or falling) piece cell
    Piece(PieceKind),
}

impl Tile {
    /// True for the empty playfield tile
    pub fn is_empty(self) -> bool {
        self == Tile::Playfield
    }

    pub fn is_piece(self) -> bool {
        matches!(self, Tile::Piece(_))
    }
}

/// Row/column pair in playfield coordinates
///
/// Rows may be negative: cells above the visible playfield are allowed for a
/// falling piece and are never drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Position shifted by the given deltas
    pub fn offset(self, delta_row: i32, delta_col: i32) -> Self {
        Self {
            row: self.row + delta_row,
            col: self.col + delta_col,
        }
    }
}

/// Discrete game commands produced by the input decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Stop the game loop
    Quit,
    /// Shift the piece one column left
    MoveLeft,
    /// Shift the piece one column right
    MoveRight,
    /// Rotate the piece 90° clockwise
    RotateCw,
    /// Move the piece one row down
    SoftDrop,
}

impl Command {
    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Quit => "quit",
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::RotateCw => "rotateCw",
            Command::SoftDrop => "softDrop",
        }
    }
}

/// How [`Tile`]s of a piece are written by an incremental redraw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawMode {
    /// Overwrite the piece cells with the empty playfield tile
    Erase,
    /// Draw the piece with its own tile
    Draw,
}
