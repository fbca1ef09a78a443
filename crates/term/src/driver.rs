//! Terminal output drivers.
//!
//! [`TerminalDriver`] is the primitive output surface the renderer draws
//! through: cursor positioning, one glyph at a time, and a flush at the end of
//! a batch. [`CrosstermDriver`] talks to a real terminal; the headless driver
//! in [`crate::headless`] records output for tests.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{
        Attribute, Color as TermColor, Print, ResetColor, SetAttribute, SetBackgroundColor,
        SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::glyph::{cp437_to_char, Color, Glyph};

/// Primitive terminal output
///
/// Rows and columns are terminal character cells, zero-based.
pub trait TerminalDriver {
    fn clear_screen(&mut self) -> Result<()>;
    fn hide_cursor(&mut self) -> Result<()>;
    fn show_cursor(&mut self) -> Result<()>;
    /// Restore colours, cursor and screen mode to what they were before the game
    fn reset_terminal(&mut self) -> Result<()>;
    fn set_cursor(&mut self, row: u16, col: u16) -> Result<()>;
    /// Write one character code with a packed attribute (fg high nibble, bg low)
    /// and advance the cursor by one cell
    fn write_glyph(&mut self, code: u8, attribute: u8) -> Result<()>;
    /// Audible signal
    fn ring_bell(&mut self) -> Result<()>;
    /// Push everything written so far to the terminal
    fn flush(&mut self) -> Result<()>;
}

/// Driver writing crossterm commands to stdout
///
/// Output is queued into an internal buffer and written in one go on
/// [`TerminalDriver::flush`].
pub struct CrosstermDriver {
    stdout: io::Stdout,
    buf: Vec<u8>,
    attribute: Option<u8>,
    raw: bool,
}

impl CrosstermDriver {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            buf: Vec::with_capacity(16 * 1024),
            attribute: None,
            raw: false,
        }
    }

    /// Switch the terminal into raw mode on the alternate screen
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.raw = true;
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()
    }

    /// Replace pending output with the restore sequence
    fn queue_reset(&mut self) -> Result<()> {
        // Drop game output that was never flushed.
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.attribute = None;
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        self.buf.clear();
        Ok(())
    }
}

impl Default for CrosstermDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalDriver for CrosstermDriver {
    fn clear_screen(&mut self) -> Result<()> {
        self.buf.queue(terminal::Clear(terminal::ClearType::All))?;
        self.buf.queue(cursor::MoveTo(0, 0))?;
        Ok(())
    }

    fn hide_cursor(&mut self) -> Result<()> {
        self.buf.queue(cursor::Hide)?;
        Ok(())
    }

    fn show_cursor(&mut self) -> Result<()> {
        self.buf.queue(cursor::Show)?;
        Ok(())
    }

    fn reset_terminal(&mut self) -> Result<()> {
        self.queue_reset()?;
        self.flush_buf()?;
        if self.raw {
            terminal::disable_raw_mode()?;
            self.raw = false;
        }
        Ok(())
    }

    fn set_cursor(&mut self, row: u16, col: u16) -> Result<()> {
        self.buf.queue(cursor::MoveTo(col, row))?;
        Ok(())
    }

    fn write_glyph(&mut self, code: u8, attribute: u8) -> Result<()> {
        if self.attribute != Some(attribute) {
            let (fg, bg) = Glyph::split_attribute(attribute);
            self.buf.queue(SetForegroundColor(term_color(fg)))?;
            self.buf.queue(SetBackgroundColor(term_color(bg)))?;
            self.attribute = Some(attribute);
        }
        self.buf.queue(Print(cp437_to_char(code)))?;
        Ok(())
    }

    fn ring_bell(&mut self) -> Result<()> {
        self.buf.queue(Print('\x07'))?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.flush_buf()
    }
}

fn term_color(color: Color) -> TermColor {
    match color {
        Color::Black => TermColor::Black,
        Color::Blue => TermColor::DarkBlue,
        Color::Green => TermColor::DarkGreen,
        Color::Cyan => TermColor::DarkCyan,
        Color::Red => TermColor::DarkRed,
        Color::Magenta => TermColor::DarkMagenta,
        Color::Yellow => TermColor::DarkYellow,
        Color::White => TermColor::Grey,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_colors_map_to_ansi_palette() {
        assert_eq!(term_color(Color::Black), TermColor::Black);
        assert_eq!(term_color(Color::Red), TermColor::DarkRed);
        assert_eq!(term_color(Color::White), TermColor::Grey);
    }

    #[test]
    fn write_glyph_skips_repeated_attributes() {
        let mut driver = CrosstermDriver::new();
        driver.write_glyph(b' ', 0x77).unwrap();
        let after_first = driver.buf.len();
        driver.write_glyph(b' ', 0x77).unwrap();
        let second = driver.buf.len() - after_first;

        // Second write is just the character.
        assert_eq!(second, 1);
    }

    #[test]
    fn reset_discards_unflushed_output() {
        let mut driver = CrosstermDriver::new();
        driver.set_cursor(4, 4).unwrap();
        driver.write_glyph(b'Z', 0x47).unwrap();
        driver.queue_reset().unwrap();

        assert!(!driver.buf.contains(&b'Z'));
        assert!(!driver.buf.is_empty());
        assert_eq!(driver.attribute, None);
    }
}
