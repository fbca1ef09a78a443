//! Game engine - owns the whole game and drives it from two entry points
//!
//! The caller runs the loop:
//! - every received input byte goes to [`Game::feed`]
//! - [`Game::step`] is polled with the milliseconds elapsed since the game
//!   started and answers with how long the caller may wait before polling again
//! - after either call the caller checks [`Game::should_quit`]
//!
//! Neither call blocks. Input only updates the falling piece's pending
//! placement; the screen catches up on the next step.

use anyhow::Result;
use log::{debug, trace, warn};

use crate::clock::{Clock, ClockMode};
use crate::config::GameConfig;
use crate::core::{compact, lock, ActivePiece, Board, CompletedLines, SimpleRng};
use crate::input::{Decoded, InputDecoder};
use crate::term::{Renderer, TerminalDriver};
use crate::types::{Command, DrawMode, BLINK_LAST_PHASE, BLINK_POLL_MS};

pub struct Game<D> {
    board: Board,
    piece: Option<ActivePiece>,
    lines: CompletedLines,
    clock: Clock,
    decoder: InputDecoder,
    renderer: Renderer<D>,
    rng: SimpleRng,
    bell: bool,
    quit: bool,
}

impl<D: TerminalDriver> Game<D> {
    pub fn new(config: &GameConfig, driver: D) -> Self {
        Self {
            board: Board::new(),
            piece: None,
            lines: CompletedLines::new(),
            clock: Clock::new(config.tick_interval_ms),
            decoder: InputDecoder::new(),
            renderer: Renderer::new(driver),
            rng: SimpleRng::new(config.resolved_seed()),
            bell: config.bell,
            quit: false,
        }
    }

    /// Take over the screen and draw the initial board
    pub fn start(&mut self) -> Result<()> {
        self.renderer.start(&self.board)
    }

    /// Restore the terminal
    pub fn shutdown(&mut self) -> Result<()> {
        self.renderer.shutdown()
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable board access (tests, scripted setups)
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.piece
    }

    /// Replace the falling piece (tests, scripted setups)
    pub fn set_active(&mut self, piece: Option<ActivePiece>) {
        self.piece = piece;
    }

    pub fn completed_lines(&self) -> &CompletedLines {
        &self.lines
    }

    pub fn mode(&self) -> ClockMode {
        self.clock.mode()
    }

    pub fn tick_interval(&self) -> u64 {
        self.clock.tick_interval()
    }

    pub fn set_tick_interval(&mut self, ms: u64) {
        self.clock.set_tick_interval(ms);
    }

    pub fn renderer(&self) -> &Renderer<D> {
        &self.renderer
    }

    pub fn driver(&self) -> &D {
        self.renderer.driver()
    }

    /// Feed one byte of terminal input
    pub fn feed(&mut self, byte: u8) {
        match self.decoder.feed(byte) {
            Decoded::Command(command) => self.apply(command),
            Decoded::Unhandled(byte) => warn!("unhandled input: {byte:#04x}"),
            Decoded::Nothing => {}
        }
    }

    /// Apply a decoded command
    ///
    /// Moves that would collide are silently dropped. Without a falling piece
    /// (between pieces, or while lines blink) only `Quit` has an effect.
    pub fn apply(&mut self, command: Command) {
        if command == Command::Quit {
            debug!("quit requested");
            self.quit = true;
            return;
        }

        let Some(piece) = self.piece.as_mut() else {
            return;
        };
        let board = &self.board;
        let accepted = match command {
            Command::MoveLeft => piece.try_move(board, 0, -1),
            Command::MoveRight => piece.try_move(board, 0, 1),
            Command::RotateCw => piece.try_rotate_cw(board),
            Command::SoftDrop => piece.try_move(board, 1, 0),
            Command::Quit => false,
        };
        trace!("{} accepted={accepted}", command.as_str());
    }

    /// Advance the game to `now_ms` and return the suggested delay before the
    /// next call
    pub fn step(&mut self, now_ms: u64) -> Result<u64> {
        match self.clock.mode() {
            ClockMode::LinesBlinking => self.step_blinking(now_ms),
            ClockMode::Falling => self.step_falling(now_ms),
        }
    }

    fn step_blinking(&mut self, now_ms: u64) -> Result<u64> {
        let phase = self.clock.blink_phase(now_ms);

        if phase > BLINK_LAST_PHASE {
            let removed = compact(&mut self.board, &mut self.lines);
            debug!("removed {removed} line(s)");
            self.lines.clear();
            self.clock.finish_blink();
            self.renderer.draw_playfield(&self.board)?;
            self.renderer.flush()?;
            return Ok(0);
        }

        let visible = phase % 2 == 1;
        for &row in self.lines.rows() {
            self.renderer.draw_row(&self.board, row, visible)?;
        }
        self.renderer.flush()?;
        Ok(BLINK_POLL_MS)
    }

    fn step_falling(&mut self, now_ms: u64) -> Result<u64> {
        let tick = self.clock.tick_interval();

        while self.clock.since_tick(now_ms) >= tick {
            match self.piece {
                Some(mut piece) => {
                    if !piece.try_move(&self.board, 1, 0) {
                        self.lock_piece(piece, now_ms)?;
                        return Ok(0);
                    }
                    self.piece = Some(piece);
                }
                None => {
                    let kind = self.rng.next_piece();
                    debug!("spawned {}", kind.as_str());
                    self.piece = Some(ActivePiece::spawn(kind));
                }
            }
            self.clock.advance_tick();
        }

        if self.redraw_piece()? {
            self.renderer.flush()?;
        }

        Ok(tick - self.clock.since_tick(now_ms))
    }

    /// Bring the on-screen piece up to date; returns true if anything was drawn
    fn redraw_piece(&mut self) -> Result<bool> {
        let Some(piece) = self.piece.as_mut() else {
            return Ok(false);
        };
        if !piece.needs_redraw() {
            return Ok(false);
        }

        let kind = piece.kind();
        let (old, new) = (piece.current(), piece.pending());
        if piece.is_drawn() {
            self.renderer
                .draw_piece(kind, old.pos, old.rotation, DrawMode::Erase)?;
        }
        self.renderer
            .draw_piece(kind, new.pos, new.rotation, DrawMode::Draw)?;
        piece.commit();
        Ok(true)
    }

    /// Write the piece into the board at its pending placement
    ///
    /// Pending, not the drawn placement: moves accepted since the last redraw
    /// already count, the same placement `try_move` works from.
    fn lock_piece(&mut self, piece: ActivePiece, now_ms: u64) -> Result<()> {
        let kind = piece.kind();
        let placement = piece.pending();
        lock(&mut self.board, kind, placement, &mut self.lines);
        self.piece = None;

        // The screen may still show the piece somewhere else.
        if piece.is_drawn() && piece.current() != placement {
            let old = piece.current();
            self.renderer
                .draw_piece(kind, old.pos, old.rotation, DrawMode::Erase)?;
        }
        self.renderer
            .draw_piece(kind, placement.pos, placement.rotation, DrawMode::Draw)?;

        if self.bell {
            self.renderer.ring_bell()?;
        }
        if !self.lines.is_empty() {
            debug!("completed rows {:?}", self.lines.rows());
            self.clock.start_blink(now_ms);
        }
        self.renderer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Placement;
    use crate::term::HeadlessDriver;
    use crate::types::{PieceKind, Position, Rotation, Tile, PLAYFIELD_COLS};

    fn game() -> Game<HeadlessDriver> {
        let config = GameConfig {
            seed: Some(1),
            ..GameConfig::default()
        };
        Game::new(&config, HeadlessDriver::new())
    }

    fn place(game: &mut Game<HeadlessDriver>, kind: PieceKind, row: i32, col: i32) {
        game.set_active(Some(ActivePiece::at(
            kind,
            Placement::new(Position::new(row, col), Rotation::North),
        )));
    }

    #[test]
    fn first_tick_spawns_a_piece() {
        let mut game = game();
        assert_eq!(game.step(0).unwrap(), 1000);
        assert!(game.active().is_none());

        assert_eq!(game.step(1000).unwrap(), 1000);
        let piece = game.active().expect("piece spawned");
        assert!(piece.is_drawn());
        assert_eq!(piece.current().rotation, Rotation::North);
    }

    #[test]
    fn suggested_delay_counts_down_to_next_tick() {
        let mut game = game();
        assert_eq!(game.step(300).unwrap(), 700);
        assert_eq!(game.step(999).unwrap(), 1);
    }

    #[test]
    fn input_is_drawn_on_next_step() {
        let mut game = game();
        place(&mut game, PieceKind::O, 5, 3);
        game.step(0).unwrap();
        let flushes = game.driver().flushes();

        game.feed(b'a');
        let piece = game.active().unwrap();
        assert_eq!(piece.pending().pos, Position::new(5, 2));
        assert_eq!(piece.current().pos, Position::new(5, 3));
        assert_eq!(game.driver().flushes(), flushes);

        game.step(10).unwrap();
        assert_eq!(game.active().unwrap().current().pos, Position::new(5, 2));
        assert_eq!(game.driver().flushes(), flushes + 1);
    }

    #[test]
    fn idle_step_does_not_flush() {
        let mut game = game();
        game.step(0).unwrap();
        let flushes = game.driver().flushes();
        game.step(10).unwrap();
        assert_eq!(game.driver().flushes(), flushes);
    }

    #[test]
    fn landing_locks_and_returns_zero() {
        let mut game = game();
        // O resting on the floor: cells on rows 16 and 17.
        place(&mut game, PieceKind::O, 16, 3);
        assert_eq!(game.step(1000).unwrap(), 0);

        assert!(game.active().is_none());
        assert_eq!(game.board().playfield_tile(17, 4), Tile::Piece(PieceKind::O));
        assert_eq!(game.mode(), ClockMode::Falling);
    }

    #[test]
    fn lock_uses_moves_not_yet_drawn() {
        let mut game = game();
        place(&mut game, PieceKind::O, 16, 3);
        game.step(0).unwrap();

        game.feed(b'a');
        assert_eq!(game.step(1000).unwrap(), 0);

        let board = game.board();
        // Box columns 1..=2 of origin column 2.
        assert_eq!(board.playfield_tile(17, 3), Tile::Piece(PieceKind::O));
        assert_eq!(board.playfield_tile(17, 4), Tile::Piece(PieceKind::O));
        assert_eq!(board.playfield_tile(17, 5), Tile::Playfield);
        assert_eq!(board.filled_cells(), 4);
    }

    #[test]
    fn bell_rings_on_lock_when_enabled() {
        let config = GameConfig {
            bell: true,
            seed: Some(3),
            ..GameConfig::default()
        };
        let mut game = Game::new(&config, HeadlessDriver::new());
        place(&mut game, PieceKind::O, 16, 3);
        game.step(1000).unwrap();
        assert_eq!(game.driver().bells(), 1);
    }

    #[test]
    fn commands_without_piece_are_ignored() {
        let mut game = game();
        let before = game.board().clone();
        for byte in b"adws " {
            game.feed(*byte);
        }
        assert_eq!(game.board(), &before);
        assert!(!game.should_quit());
    }

    #[test]
    fn quit_key_sets_flag() {
        let mut game = game();
        game.feed(b'q');
        assert!(game.should_quit());
    }

    #[test]
    fn completed_row_blinks_then_compacts() {
        let mut game = game();
        for col in 0..PLAYFIELD_COLS {
            if col != 0 {
                game.board_mut().set_tile(17, col, Tile::Piece(PieceKind::Z));
            }
        }
        // Vertical I (west, box column 1) at column 0, resting on the floor.
        game.set_active(Some(ActivePiece::at(
            PieceKind::I,
            Placement::new(Position::new(14, -1), Rotation::West),
        )));

        assert_eq!(game.step(1000).unwrap(), 0);
        assert_eq!(game.mode(), ClockMode::LinesBlinking);
        assert_eq!(game.completed_lines().rows(), &[17]);

        for k in 1..=6 {
            assert_eq!(game.step(1000 + k * 256).unwrap(), BLINK_POLL_MS);
        }
        assert_eq!(game.step(1000 + 7 * 256).unwrap(), 0);

        assert_eq!(game.mode(), ClockMode::Falling);
        assert!(game.completed_lines().is_empty());
        // The three I cells above the cleared row moved down by one.
        assert_eq!(game.board().filled_cells(), 3);
        for row in 15..18 {
            assert_eq!(game.board().playfield_tile(row, 0), Tile::Piece(PieceKind::I));
        }
        assert_eq!(game.board().playfield_tile(14, 0), Tile::Playfield);
    }
}
