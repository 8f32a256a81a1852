//! `AnsiConsole`: stdout console driven by raw ANSI sequences.

use super::Console;
use crate::color::Color;
use crossterm::{execute, terminal};
use std::io::{self, Stdout, Write};

/// Pre-allocated buffer for building ANSI escape sequences.
///
/// All output is accumulated here, then flushed in a single `write()`
/// syscall to prevent terminal flickering mid-paint.
pub struct OutputBuffer {
    data: Vec<u8>,
}

impl OutputBuffer {
    /// Create a new output buffer with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Create a buffer sized for a typical dashboard paint (4KB).
    pub fn new() -> Self {
        Self::with_capacity(4096)
    }

    /// Clear the buffer for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Get the buffer contents.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Get the buffer length.
    #[inline]
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if buffer is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Write a string.
    #[inline]
    pub fn write_str(&mut self, s: &str) {
        self.data.extend_from_slice(s.as_bytes());
    }

    /// Move cursor to (x, y) position (1-indexed for ANSI).
    #[inline]
    pub fn cursor_move(&mut self, x: u16, y: u16) {
        // CSI row ; col H
        write!(self.data, "\x1b[{};{}H", y + 1, x + 1).unwrap();
    }

    /// Set the foreground to a palette color.
    #[inline]
    pub fn set_fg(&mut self, color: Color) {
        write!(self.data, "\x1b[{}m", color.ansi_fg_code()).unwrap();
    }

    /// Reset all attributes.
    #[inline]
    pub fn reset_attrs(&mut self) {
        self.data.extend_from_slice(b"\x1b[0m");
    }

    /// Flush to a writer in a single syscall.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    pub fn flush_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(&self.data)?;
        writer.flush()
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Console implementation that writes ANSI escape sequences to stdout.
///
/// The active foreground color is tracked locally so reads never query the
/// device, and redundant SGR sequences are elided. Physical resizing goes
/// through crossterm.
pub struct AnsiConsole {
    stdout: Stdout,
    buf: OutputBuffer,
    fg: Color,
}

impl AnsiConsole {
    /// Create a console over the process stdout.
    ///
    /// The device is assumed to start with the default foreground (grey).
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            buf: OutputBuffer::new(),
            fg: Color::default(),
        }
    }
}

impl Default for AnsiConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for AnsiConsole {
    fn set_size(&mut self, width: u16, height: u16) -> io::Result<()> {
        // Keep ordering with anything already buffered.
        self.flush()?;
        execute!(self.stdout, terminal::SetSize(width, height))
    }

    fn set_cursor(&mut self, x: u16, y: u16) -> io::Result<()> {
        self.buf.cursor_move(x, y);
        Ok(())
    }

    fn foreground(&self) -> Color {
        self.fg
    }

    fn set_foreground(&mut self, color: Color) -> io::Result<()> {
        if color != self.fg {
            self.buf.set_fg(color);
            self.fg = color;
        }
        Ok(())
    }

    fn put(&mut self, glyph: &str) -> io::Result<()> {
        self.buf.write_str(glyph);
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.buf.is_empty() {
            return Ok(());
        }
        self.buf.flush_to(&mut self.stdout)?;
        self.buf.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_move_is_one_indexed() {
        let mut buf = OutputBuffer::new();
        buf.cursor_move(0, 1);
        assert_eq!(buf.as_bytes(), b"\x1b[2;1H");
    }

    #[test]
    fn test_set_fg_writes_sgr_code() {
        let mut buf = OutputBuffer::new();
        buf.set_fg(Color::Cyan);
        assert_eq!(buf.as_bytes(), b"\x1b[96m");
    }

    #[test]
    fn test_buffer_reuse() {
        let mut buf = OutputBuffer::new();
        buf.write_str("hello");
        assert_eq!(buf.len(), 5);
        buf.clear();
        assert!(buf.is_empty());
    }

    #[test]
    fn test_console_elides_redundant_color_switches() {
        let mut console = AnsiConsole::new();
        console.set_foreground(Color::Green).unwrap();
        let after_first = console.buf.len();
        console.set_foreground(Color::Green).unwrap();
        assert_eq!(console.buf.len(), after_first);
        assert_eq!(console.foreground(), Color::Green);
    }
}
