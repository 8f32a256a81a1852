//! Layout module: The named-region data model.
//!
//! Regions are fixed rectangles defined once by the caller. There is no
//! layout engine and no reflow - painting walks a flat map of regions.

mod rect;
mod region;

pub use rect::Rect;
pub use region::{ColorChange, Region};
