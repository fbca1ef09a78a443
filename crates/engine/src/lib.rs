//! Game engine module - clock, input dispatch and rendering glue
//!
//! [`Game`] owns every piece of game state (board, falling piece, completed
//! lines, clock, input decoder, renderer) and exposes the two non-blocking
//! entry points a terminal front end needs: feed a byte, step the clock.
//!
//! # Timing
//!
//! - **Gravity**: one row per tick (`TERMTRIS_TICK_MS`, 1000ms by default)
//! - **Line clear**: completed rows flash in 256ms phases; once phase 6 is
//!   over they are removed and the rows above drop down
//! - **Poll delay**: [`Game::step`] returns how long the caller may wait
//!   before the next call; polling earlier is always fine
//!
//! # Example
//!
//! ```
//! use termtris_engine::{Game, GameConfig};
//! use termtris_engine::term::HeadlessDriver;
//!
//! let config = GameConfig { seed: Some(7), ..GameConfig::default() };
//! let mut game = Game::new(&config, HeadlessDriver::new());
//! game.start().unwrap();
//!
//! // First tick spawns a piece.
//! let delay = game.step(1000).unwrap();
//! assert!(game.active().is_some());
//! assert_eq!(delay, 1000);
//!
//! game.feed(b'q');
//! assert!(game.should_quit());
//! ```

pub mod clock;
pub mod config;
pub mod game;

pub use termtris_core as core;
pub use termtris_input as input;
pub use termtris_term as term;
pub use termtris_types as types;

pub use clock::{Clock, ClockMode};
pub use config::{ConfigError, GameConfig};
pub use game::Game;
