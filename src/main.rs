//! Terminal runner (default binary).
//!
//! This is the external driver around [`Game`]: it owns the terminal, reads
//! raw input bytes on a helper thread and runs the cooperative loop. Each turn
//! steps the clock, then waits for input for at most the delay the step asked
//! for.

use std::io::{self, ErrorKind, Read};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use log::info;

use termtris::engine::{Game, GameConfig};
use termtris::term::CrosstermDriver;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("error")).init();

    let config = GameConfig::from_env().context("invalid configuration")?;
    info!("starting with {config:?}");

    let mut driver = CrosstermDriver::new();
    driver.enter()?;
    let mut game = Game::new(&config, driver);

    let result = run(&mut game);

    // Always try to restore terminal state.
    let _ = game.shutdown();
    result
}

fn run(game: &mut Game<CrosstermDriver>) -> Result<()> {
    game.start()?;

    let input = spawn_input_reader();
    let started = Instant::now();

    loop {
        let delay = game.step(started.elapsed().as_millis() as u64)?;
        if game.should_quit() {
            return Ok(());
        }

        match input.recv_timeout(Duration::from_millis(delay)) {
            Ok(bytes) => {
                for byte in bytes {
                    game.feed(byte);
                    if game.should_quit() {
                        return Ok(());
                    }
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                info!("input closed");
                return Ok(());
            }
        }
    }
}

/// Forward raw stdin chunks over a channel so the main loop can wait with a timeout
fn spawn_input_reader() -> Receiver<Vec<u8>> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut stdin = io::stdin().lock();
        let mut buf = [0u8; 64];
        loop {
            match stdin.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => {
                    if tx.send(buf[..n].to_vec()).is_err() {
                        break;
                    }
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(_) => break,
            }
        }
    });
    rx
}
