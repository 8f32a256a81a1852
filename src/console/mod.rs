//! Console module: The boundary between region painting and the device.
//!
//! The core paints through the [`Console`] trait and never talks to a
//! terminal directly. Two implementations ship with the crate:
//!
//! - [`AnsiConsole`]: stdout-backed, builds raw ANSI escape sequences in a
//!   pre-allocated buffer and flushes them in a single `write` syscall.
//! - [`GridConsole`]: an in-memory character grid for headless use and
//!   tests.

mod ansi;
mod grid;

pub use ansi::{AnsiConsole, OutputBuffer};
pub use grid::{GridCell, GridConsole};

use crate::color::Color;
use std::io;

/// A fixed-width character-grid output device.
///
/// The grid has its origin at `(0, 0)`, columns increasing left-to-right
/// and rows top-to-bottom. Writes land at the cursor and advance it one
/// column; there is no automatic line wrap at the device level (the paint
/// layer does its own wrapping).
pub trait Console: Send + 'static {
    /// Change the physical console size.
    fn set_size(&mut self, width: u16, height: u16) -> io::Result<()>;

    /// Move the cursor to `(x, y)`.
    fn set_cursor(&mut self, x: u16, y: u16) -> io::Result<()>;

    /// The currently active foreground color.
    fn foreground(&self) -> Color;

    /// Switch the active foreground color.
    fn set_foreground(&mut self, color: Color) -> io::Result<()>;

    /// Write one grapheme cluster at the cursor and advance one column.
    fn put(&mut self, glyph: &str) -> io::Result<()>;

    /// Push any buffered output to the device.
    fn flush(&mut self) -> io::Result<()>;
}
