//! Input probe: shows what the decoder makes of each key press.
//!
//! Handy for checking which byte sequences a terminal sends for the cursor
//! keys. Press `q` (or ESC twice) to exit.

use std::io::{self, Read, Write};

use anyhow::Result;
use crossterm::terminal;

use termtris::input::{Decoded, InputDecoder};
use termtris::types::Command;

fn main() -> Result<()> {
    terminal::enable_raw_mode()?;
    let result = run();
    // Always try to restore terminal state.
    let _ = terminal::disable_raw_mode();
    result
}

fn run() -> Result<()> {
    let mut stdout = io::stdout();
    write!(stdout, "press keys, q or ESC ESC to quit\r\n")?;
    stdout.flush()?;

    let mut decoder = InputDecoder::new();
    let mut byte = [0u8; 1];
    while io::stdin().read(&mut byte)? == 1 {
        let decoded = decoder.feed(byte[0]);
        write!(
            stdout,
            "{:#04x} {:?} -> {}\r\n",
            byte[0],
            decoder.state(),
            describe(decoded)
        )?;
        stdout.flush()?;

        if decoded == Decoded::Command(Command::Quit) {
            break;
        }
    }
    Ok(())
}

fn describe(decoded: Decoded) -> String {
    match decoded {
        Decoded::Command(command) => command.as_str().to_string(),
        Decoded::Unhandled(_) => "unhandled".to_string(),
        Decoded::Nothing => "-".to_string(),
    }
}
