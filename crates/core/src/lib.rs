//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the board, the piece geometry, the collision rules and
//! line clearing. It has **no dependencies** on the terminal, timing or I/O:
//!
//! - **Deterministic**: the same seed produces the same piece sequence
//! - **Testable**: every rule is a plain function over a [`Board`]
//! - **Fast**: fixed-size storage, no allocation on the hot paths
//!
//! # Module Structure
//!
//! - [`board`]: the 20x20 tile grid with the embedded 18x10 playfield
//! - [`pieces`]: packed tetromino geometry and spawn offsets
//! - [`piece`]: the falling piece, collision test, moves, rotation and lock
//! - [`lines`]: completed-row bookkeeping and compaction
//! - [`rng`]: uniform random piece selection
//!
//! # Example
//!
//! ```
//! use termtris_core::{collision, Board, ActivePiece};
//! use termtris_core::types::PieceKind;
//!
//! let board = Board::new();
//! let mut piece = ActivePiece::spawn(PieceKind::T);
//!
//! // Shift left until the wall stops us.
//! while piece.try_move(&board, 0, -1) {}
//!
//! let p = piece.pending();
//! assert!(collision(&board, PieceKind::T, p.rotation, p.pos.offset(0, -1)));
//! ```

pub mod board;
pub mod lines;
pub mod piece;
pub mod pieces;
pub mod rng;

pub use termtris_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use lines::{compact, CompletedLines};
pub use piece::{collision, lock, ActivePiece, Placement};
pub use pieces::{cells, spawn_position};
pub use rng::SimpleRng;
