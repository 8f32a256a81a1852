//! `GridConsole`: In-memory character grid for headless use and tests.

use super::Console;
use crate::color::Color;
use std::io;

/// A single grid cell: one glyph and its foreground color.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridCell {
    /// The grapheme cluster occupying this cell.
    pub glyph: String,
    /// Foreground color the glyph was written in.
    pub fg: Color,
}

impl Default for GridCell {
    fn default() -> Self {
        Self {
            glyph: " ".to_string(),
            fg: Color::default(),
        }
    }
}

/// Console implementation backed by an in-memory grid.
///
/// Cells are stored in row-major order. Writes outside the grid are
/// clipped silently; the cursor still advances so a paint that hangs off
/// the right edge simply loses its tail. Resizing preserves overlapping
/// content.
pub struct GridConsole {
    cells: Vec<GridCell>,
    width: u16,
    height: u16,
    cursor_x: u16,
    cursor_y: u16,
    fg: Color,
}

impl GridConsole {
    /// Create a new grid with the given dimensions.
    ///
    /// All cells start blank with the default foreground.
    ///
    /// # Panics
    /// Panics if width or height is 0.
    pub fn new(width: u16, height: u16) -> Self {
        assert!(width > 0 && height > 0, "Grid dimensions must be non-zero");
        let size = (width as usize) * (height as usize);
        Self {
            cells: vec![GridCell::default(); size],
            width,
            height,
            cursor_x: 0,
            cursor_y: 0,
            fg: Color::default(),
        }
    }

    /// Get the grid width.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Get the grid height.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Convert (x, y) coordinates to a linear index.
    ///
    /// Returns `None` if coordinates are out of bounds.
    #[inline]
    fn index_of(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some((y as usize) * (self.width as usize) + (x as usize))
        } else {
            None
        }
    }

    /// Get the glyph at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    pub fn glyph_at(&self, x: u16, y: u16) -> Option<&str> {
        self.index_of(x, y).map(|i| self.cells[i].glyph.as_str())
    }

    /// Get the foreground color at (x, y).
    pub fn fg_at(&self, x: u16, y: u16) -> Option<Color> {
        self.index_of(x, y).map(|i| self.cells[i].fg)
    }

    /// Render a full row as a string.
    ///
    /// Returns an empty string for an out-of-bounds row.
    pub fn row_text(&self, y: u16) -> String {
        let mut row = String::with_capacity(self.width as usize);
        for x in 0..self.width {
            if let Some(glyph) = self.glyph_at(x, y) {
                row.push_str(glyph);
            }
        }
        row
    }

    /// Count the non-blank cells in the whole grid.
    pub fn non_blank_count(&self) -> usize {
        self.cells.iter().filter(|c| c.glyph != " ").count()
    }
}

impl Console for GridConsole {
    fn set_size(&mut self, width: u16, height: u16) -> io::Result<()> {
        if width == self.width && height == self.height {
            return Ok(());
        }

        let new_size = (width as usize) * (height as usize);
        let mut new_cells = vec![GridCell::default(); new_size];

        // Copy the overlapping content.
        let copy_width = self.width.min(width) as usize;
        let copy_height = self.height.min(height) as usize;

        for y in 0..copy_height {
            let old_start = y * (self.width as usize);
            let new_start = y * (width as usize);
            new_cells[new_start..new_start + copy_width]
                .clone_from_slice(&self.cells[old_start..old_start + copy_width]);
        }

        self.cells = new_cells;
        self.width = width;
        self.height = height;
        Ok(())
    }

    fn set_cursor(&mut self, x: u16, y: u16) -> io::Result<()> {
        // Out-of-bounds positions are kept; writes there clip.
        self.cursor_x = x;
        self.cursor_y = y;
        Ok(())
    }

    fn foreground(&self) -> Color {
        self.fg
    }

    fn set_foreground(&mut self, color: Color) -> io::Result<()> {
        self.fg = color;
        Ok(())
    }

    fn put(&mut self, glyph: &str) -> io::Result<()> {
        if let Some(idx) = self.index_of(self.cursor_x, self.cursor_y) {
            self.cells[idx].glyph.clear();
            self.cells[idx].glyph.push_str(glyph);
            self.cells[idx].fg = self.fg;
        }
        self.cursor_x = self.cursor_x.saturating_add(1);
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_new() {
        let grid = GridConsole::new(80, 24);
        assert_eq!(grid.width(), 80);
        assert_eq!(grid.height(), 24);
        assert_eq!(grid.glyph_at(79, 23), Some(" "));
        assert_eq!(grid.glyph_at(80, 23), None);
    }

    #[test]
    #[should_panic]
    fn test_grid_zero_width() {
        GridConsole::new(0, 24);
    }

    #[test]
    fn test_put_advances_cursor() {
        let mut grid = GridConsole::new(10, 2);
        grid.set_cursor(3, 1).unwrap();
        grid.put("a").unwrap();
        grid.put("b").unwrap();
        assert_eq!(grid.glyph_at(3, 1), Some("a"));
        assert_eq!(grid.glyph_at(4, 1), Some("b"));
    }

    #[test]
    fn test_put_clips_past_right_edge() {
        let mut grid = GridConsole::new(3, 1);
        grid.set_cursor(2, 0).unwrap();
        grid.put("x").unwrap();
        grid.put("y").unwrap(); // off the edge, discarded
        assert_eq!(grid.glyph_at(2, 0), Some("x"));
        assert_eq!(grid.non_blank_count(), 1);
    }

    #[test]
    fn test_put_records_foreground() {
        let mut grid = GridConsole::new(5, 1);
        grid.set_foreground(Color::Red).unwrap();
        grid.set_cursor(0, 0).unwrap();
        grid.put("!").unwrap();
        assert_eq!(grid.fg_at(0, 0), Some(Color::Red));
        assert_eq!(grid.fg_at(1, 0), Some(Color::default()));
    }

    #[test]
    fn test_resize_preserves_overlap() {
        let mut grid = GridConsole::new(10, 5);
        grid.set_cursor(2, 2).unwrap();
        grid.put("z").unwrap();

        grid.set_size(20, 10).unwrap();
        assert_eq!(grid.glyph_at(2, 2), Some("z"));

        grid.set_size(3, 3).unwrap();
        assert_eq!(grid.glyph_at(2, 2), Some("z"));
        assert_eq!(grid.glyph_at(3, 2), None);
    }

    #[test]
    fn test_row_text() {
        let mut grid = GridConsole::new(5, 1);
        grid.set_cursor(1, 0).unwrap();
        grid.put("h").unwrap();
        grid.put("i").unwrap();
        assert_eq!(grid.row_text(0), " hi  ");
        assert_eq!(grid.row_text(1), "");
    }
}
