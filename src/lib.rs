//! termtris (workspace facade crate).
//!
//! Re-exports the workspace crates under one roof so binaries, integration
//! tests and benches can use `termtris::{core,engine,input,term,types}`.

pub use termtris_core as core;
pub use termtris_engine as engine;
pub use termtris_input as input;
pub use termtris_term as term;
pub use termtris_types as types;
