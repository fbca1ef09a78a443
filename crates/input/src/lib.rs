//! Terminal input module (engine-facing).
//!
//! This crate is independent of any terminal library. It decodes the raw byte
//! stream a terminal in raw mode produces, including CSI/SS3 escape sequences
//! for the cursor keys, into [`crate::types::Command`]s.

pub mod decoder;

pub use termtris_types as types;

pub use decoder::{command_for_key, Decoded, DecoderState, InputDecoder};
