//! Terminal rendering module.
//!
//! A small, game-oriented output layer. Board tiles map to pairs of CP437
//! glyphs (2 chars wide per cell for a squarer look) and are written through a
//! minimal [`TerminalDriver`] trait, so the same renderer can target a real
//! terminal ([`CrosstermDriver`]) or an in-memory screen ([`HeadlessDriver`]).

pub mod driver;
pub mod glyph;
pub mod headless;
pub mod renderer;

pub use termtris_core as core;
pub use termtris_types as types;

pub use driver::{CrosstermDriver, TerminalDriver};
pub use glyph::{cp437_to_char, tile_glyphs, Color, Glyph};
pub use headless::HeadlessDriver;
pub use renderer::Renderer;
