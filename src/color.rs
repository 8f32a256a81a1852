//! Color: The 16-entry console foreground palette.
//!
//! Regions are painted in named palette colors rather than true color.
//! The palette maps onto the standard + bright ANSI SGR foreground codes,
//! which every console this crate targets understands.

/// A named console foreground color.
///
/// `Grey` is the default foreground: it is what a region is painted in when
/// no color is given, and what the console is assumed to start with.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum Color {
    /// Black (SGR 30)
    Black,
    /// Dark blue (SGR 34)
    DarkBlue,
    /// Dark green (SGR 32)
    DarkGreen,
    /// Dark cyan (SGR 36)
    DarkCyan,
    /// Dark red (SGR 31)
    DarkRed,
    /// Dark magenta (SGR 35)
    DarkMagenta,
    /// Dark yellow (SGR 33)
    DarkYellow,
    /// Grey (SGR 37) - the default foreground
    #[default]
    Grey,
    /// Dark grey / bright black (SGR 90)
    DarkGrey,
    /// Bright blue (SGR 94)
    Blue,
    /// Bright green (SGR 92)
    Green,
    /// Bright cyan (SGR 96)
    Cyan,
    /// Bright red (SGR 91)
    Red,
    /// Bright magenta (SGR 95)
    Magenta,
    /// Bright yellow (SGR 93)
    Yellow,
    /// White (SGR 97)
    White,
}

impl Color {
    /// The ANSI SGR foreground code for this color.
    #[inline]
    pub const fn ansi_fg_code(self) -> u8 {
        match self {
            Self::Black => 30,
            Self::DarkRed => 31,
            Self::DarkGreen => 32,
            Self::DarkYellow => 33,
            Self::DarkBlue => 34,
            Self::DarkMagenta => 35,
            Self::DarkCyan => 36,
            Self::Grey => 37,
            Self::DarkGrey => 90,
            Self::Red => 91,
            Self::Green => 92,
            Self::Yellow => 93,
            Self::Blue => 94,
            Self::Magenta => 95,
            Self::Cyan => 96,
            Self::White => 97,
        }
    }
}

impl From<Color> for crossterm::style::Color {
    fn from(color: Color) -> Self {
        match color {
            Color::Black => Self::Black,
            Color::DarkBlue => Self::DarkBlue,
            Color::DarkGreen => Self::DarkGreen,
            Color::DarkCyan => Self::DarkCyan,
            Color::DarkRed => Self::DarkRed,
            Color::DarkMagenta => Self::DarkMagenta,
            Color::DarkYellow => Self::DarkYellow,
            Color::Grey => Self::Grey,
            Color::DarkGrey => Self::DarkGrey,
            Color::Blue => Self::Blue,
            Color::Green => Self::Green,
            Color::Cyan => Self::Cyan,
            Color::Red => Self::Red,
            Color::Magenta => Self::Magenta,
            Color::Yellow => Self::Yellow,
            Color::White => Self::White,
        }
    }
}
