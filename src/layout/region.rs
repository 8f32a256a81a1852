//! Region and ColorChange: Per-region render state.

use super::rect::Rect;
use crate::color::Color;
use std::time::{Duration, Instant};

/// A scheduled future recoloring of a region's rendered text.
///
/// Immutable value: a region's pending change is replaced wholesale, never
/// mutated in place.
#[derive(Clone, Copy, Debug)]
pub struct ColorChange {
    /// Color to repaint the region in once the change fires.
    pub color: Color,
    /// Absolute instant after which the change is due.
    pub expires_at: Instant,
}

impl ColorChange {
    /// Create a change with an explicit expiry instant.
    #[inline]
    pub const fn new(color: Color, expires_at: Instant) -> Self {
        Self { color, expires_at }
    }

    /// Create a change that expires `timeout` from now.
    #[inline]
    pub fn after(color: Color, timeout: Duration) -> Self {
        Self::new(color, Instant::now() + timeout)
    }

    /// Whether the change is due at `now`.
    #[inline]
    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// A named region's state: a fixed rectangle, the text last painted into
/// it, and an optional pending timed color change.
#[derive(Clone, Debug)]
pub struct Region {
    /// Position and size. Immutable after creation.
    pub rect: Rect,
    /// Current logical text content (last value passed to a paint call).
    pub text: String,
    /// Pending timed color change, if one is scheduled.
    pub pending: Option<ColorChange>,
}

impl Region {
    /// Create a new, empty region covering `rect`.
    pub const fn new(rect: Rect) -> Self {
        Self {
            rect,
            text: String::new(),
            pending: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_expiry() {
        let now = Instant::now();
        let change = ColorChange::new(Color::Green, now + Duration::from_millis(50));
        assert!(!change.is_expired(now));
        assert!(change.is_expired(now + Duration::from_millis(50)));
        assert!(change.is_expired(now + Duration::from_millis(51)));
    }

    #[test]
    fn test_region_starts_blank() {
        let region = Region::new(Rect::new(0, 1, 80, 1));
        assert_eq!(region.text, "");
        assert!(region.pending.is_none());
    }
}
