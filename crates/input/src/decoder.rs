//! Byte-stream input decoder
//!
//! Turns raw terminal input into [`Command`]s, one byte at a time. Plain keys
//! map directly; arrow keys arrive as escape sequences and are collected first.
//!
//! States:
//! - Normal: plain key bytes
//! - EscapeSeen: after ESC, waiting for `[`, `O` or a second ESC
//! - CsiCollecting: after `ESC [` or the single-byte C1 introducer 0x9B
//! - Ss3Collecting: after `ESC O`
//!
//! Malformed or oversized sequences are dropped silently and the decoder goes
//! back to Normal.

use arrayvec::ArrayVec;

use crate::types::{Command, ESCAPE_BUFFER_LEN};

const ESC: u8 = 0x1b;
/// Single-byte (C1) form of `ESC [`
const C1_CSI: u8 = 0x9b;

/// Parse mode of the decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecoderState {
    #[default]
    Normal,
    EscapeSeen,
    CsiCollecting,
    Ss3Collecting,
}

/// Result of feeding one byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoded {
    /// A complete command
    Command(Command),
    /// A plain byte with no meaning
    Unhandled(u8),
    /// Nothing to act on yet (mid-sequence, or a dropped sequence)
    Nothing,
}

/// Map a plain key byte to its command
pub fn command_for_key(byte: u8) -> Option<Command> {
    match byte {
        b'q' => Some(Command::Quit),
        b'a' => Some(Command::MoveLeft),
        b'd' => Some(Command::MoveRight),
        b'w' | b' ' => Some(Command::RotateCw),
        b's' => Some(Command::SoftDrop),
        _ => None,
    }
}

/// Map a parameterless CSI final byte (cursor keys) to its command
fn command_for_csi(final_byte: u8) -> Option<Command> {
    match final_byte {
        b'A' => Some(Command::RotateCw),
        b'B' => Some(Command::SoftDrop),
        b'C' => Some(Command::MoveRight),
        b'D' => Some(Command::MoveLeft),
        _ => None,
    }
}

/// The decoder state machine
#[derive(Debug, Clone, Default)]
pub struct InputDecoder {
    state: DecoderState,
    buf: ArrayVec<u8, ESCAPE_BUFFER_LEN>,
}

impl InputDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DecoderState {
        self.state
    }

    /// Bytes collected for the sequence in progress
    pub fn pending(&self) -> &[u8] {
        &self.buf
    }

    /// Drop any partial sequence
    pub fn reset(&mut self) {
        self.state = DecoderState::Normal;
        self.buf.clear();
    }

    /// Feed a chunk of bytes, collecting the commands it produced
    pub fn feed_all(&mut self, data: &[u8]) -> Vec<Decoded> {
        data.iter()
            .map(|&byte| self.feed(byte))
            .filter(|decoded| *decoded != Decoded::Nothing)
            .collect()
    }

    /// Process a single byte
    pub fn feed(&mut self, byte: u8) -> Decoded {
        match self.state {
            DecoderState::Normal => self.process_normal(byte),
            DecoderState::EscapeSeen => self.process_escape(byte),
            DecoderState::CsiCollecting | DecoderState::Ss3Collecting => self.process_collect(byte),
        }
    }

    fn process_normal(&mut self, byte: u8) -> Decoded {
        match byte {
            ESC => {
                self.state = DecoderState::EscapeSeen;
                Decoded::Nothing
            }
            C1_CSI => {
                self.buf.clear();
                self.state = DecoderState::CsiCollecting;
                Decoded::Nothing
            }
            _ => match command_for_key(byte) {
                Some(command) => Decoded::Command(command),
                None => Decoded::Unhandled(byte),
            },
        }
    }

    fn process_escape(&mut self, byte: u8) -> Decoded {
        self.buf.clear();
        match byte {
            ESC => {
                self.state = DecoderState::Normal;
                Decoded::Command(Command::Quit)
            }
            b'[' => {
                self.state = DecoderState::CsiCollecting;
                Decoded::Nothing
            }
            b'O' => {
                self.state = DecoderState::Ss3Collecting;
                Decoded::Nothing
            }
            _ => {
                self.state = DecoderState::Normal;
                Decoded::Nothing
            }
        }
    }

    fn process_collect(&mut self, byte: u8) -> Decoded {
        // Control bytes and 8-bit bytes can't appear inside a sequence.
        if !(0x20..0x80).contains(&byte) {
            self.reset();
            return Decoded::Nothing;
        }

        if self.buf.try_push(byte).is_err() {
            self.reset();
            return Decoded::Nothing;
        }

        if byte < 0x40 {
            // Parameter or intermediate byte
            return Decoded::Nothing;
        }

        let is_csi = self.state == DecoderState::CsiCollecting;
        let command = if is_csi && self.buf.len() == 1 {
            command_for_csi(byte)
        } else {
            None
        };
        self.reset();

        match command {
            Some(command) => Decoded::Command(command),
            None => Decoded::Nothing,
        }
    }
}
