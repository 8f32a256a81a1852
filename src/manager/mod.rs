//! Manager module: The region manager core.
//!
//! [`RegionManager`] owns the region store and the console behind one
//! mutex, exposes the region definition and painting operations, and runs
//! the background sweeper that fires expired timed color changes.

mod sweeper;

use crate::color::Color;
use crate::console::{AnsiConsole, Console};
use crate::layout::{ColorChange, Rect, Region};
use sweeper::Sweeper;

use std::collections::HashMap;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use unicode_segmentation::UnicodeSegmentation;

/// Configuration for the region manager.
#[derive(Debug, Clone)]
pub struct ManagerConfig {
    /// Interval between sweeper ticks.
    pub sweep_interval: Duration,
    /// Foreground used by [`RegionManager::print_to_region`].
    pub default_foreground: Color,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            sweep_interval: Duration::from_millis(50),
            default_foreground: Color::default(),
        }
    }
}

/// Everything the manager mutates, guarded by one mutex.
///
/// The single lock covers the store and the console together: a paint's
/// clear-then-write is atomic with respect to other painters, and one
/// caller's foreground switch can never bleed into another's write.
pub(crate) struct ManagerState<C: Console> {
    console: C,
    width: u16,
    height: u16,
    regions: HashMap<String, Region>,
}

impl<C: Console> ManagerState<C> {
    /// Store `text` on the region and repaint it in `color`, restoring the
    /// previously active foreground afterwards. Unknown names are ignored.
    fn print(&mut self, name: &str, text: &str, color: Color) -> io::Result<()> {
        let Some(region) = self.regions.get_mut(name) else {
            return Ok(());
        };
        region.text.clear();
        region.text.push_str(text);

        let saved = self.console.foreground();
        self.console.set_foreground(color)?;
        paint_region(&mut self.console, region)?;
        self.console.set_foreground(saved)?;
        self.console.flush()
    }

    /// One sweep tick: repaint every region whose pending change is due at
    /// `now` in its target color, clearing the pending state.
    ///
    /// Iteration order over regions is unspecified.
    pub(crate) fn sweep_expired(&mut self, now: Instant) -> io::Result<()> {
        let mut painted = false;
        for region in self.regions.values_mut() {
            let Some(change) = region.pending.take_if(|c| c.is_expired(now)) else {
                continue;
            };
            let saved = self.console.foreground();
            self.console.set_foreground(change.color)?;
            paint_region(&mut self.console, region)?;
            self.console.set_foreground(saved)?;
            painted = true;
        }
        if painted {
            self.console.flush()?;
        }
        Ok(())
    }
}

/// Clear a region's cell area, then write its text back, wrapped.
fn paint_region<C: Console>(console: &mut C, region: &Region) -> io::Result<()> {
    clear_rect(console, region.rect)?;
    write_wrapped(console, region.rect, &region.text)
}

/// Overwrite every cell of `rect` with blanks, row-major from the top-left.
fn clear_rect<C: Console>(console: &mut C, rect: Rect) -> io::Result<()> {
    for row in rect.y..rect.bottom() {
        console.set_cursor(rect.x, row)?;
        for _ in 0..rect.width {
            console.put(" ")?;
        }
    }
    Ok(())
}

/// Write `text` into `rect` one grapheme cluster per cell, wrapping at the
/// region's right edge and silently truncating past its bottom edge.
///
/// Display width is not consulted; a wide cluster still occupies one
/// logical cell.
fn write_wrapped<C: Console>(console: &mut C, rect: Rect, text: &str) -> io::Result<()> {
    if rect.is_empty() {
        return Ok(());
    }

    let mut x = rect.x;
    let mut y = rect.y;
    console.set_cursor(x, y)?;

    for glyph in text.graphemes(true) {
        if x >= rect.right() {
            x = rect.x;
            y += 1;
            if y >= rect.bottom() {
                // Out of rows: silent truncation.
                return Ok(());
            }
            console.set_cursor(x, y)?;
        }
        console.put(glyph)?;
        x += 1;
    }
    Ok(())
}

/// The region manager: named rectangular regions on a fixed-size console,
/// with text painting and timed, self-reverting color highlights.
///
/// All operations are safe to call from any thread. Incorrect calls
/// degrade to no-ops or truncated rendering, never to errors: unknown
/// region names are ignored, duplicate definitions keep the first, and
/// oversize text is clipped. The only failures surfaced are the console's
/// own I/O errors.
///
/// # Example
///
/// ```rust,ignore
/// use dashpane::{Color, RegionManager};
/// use std::time::Duration;
///
/// let manager = RegionManager::stdout(80, 24)?;
/// manager.define_region("status", 0, 0, 80, 1);
/// manager.print_to_region("status", "ready")?;
/// manager.register_region_color_change("status", Color::Green, Duration::from_millis(500))?;
/// ```
pub struct RegionManager<C: Console> {
    /// Shared mutable state; the sweeper holds a clone.
    state: Arc<Mutex<ManagerState<C>>>,
    /// Sweeper handle. `None` while dormant or after shutdown.
    sweeper: Mutex<Option<Sweeper>>,
    /// Set once by `shutdown`; blocks sweeper restarts afterwards.
    stopped: AtomicBool,
    config: ManagerConfig,
}

impl RegionManager<AnsiConsole> {
    /// Create a manager over the process stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if applying the initial console size fails.
    pub fn stdout(width: u16, height: u16) -> io::Result<Self> {
        Self::new(AnsiConsole::new(), width, height)
    }
}

impl<C: Console> RegionManager<C> {
    /// Create a manager over the given console with default configuration.
    ///
    /// Applies `width`/`height` to the console. The region store starts
    /// empty and the sweeper is dormant until the first timed-color
    /// registration.
    ///
    /// # Errors
    ///
    /// Returns an error if applying the initial console size fails.
    pub fn new(console: C, width: u16, height: u16) -> io::Result<Self> {
        Self::with_config(console, width, height, ManagerConfig::default())
    }

    /// Create a manager with custom configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if applying the initial console size fails.
    pub fn with_config(
        mut console: C,
        width: u16,
        height: u16,
        config: ManagerConfig,
    ) -> io::Result<Self> {
        console.set_size(width, height)?;
        console.flush()?;

        Ok(Self {
            state: Arc::new(Mutex::new(ManagerState {
                console,
                width,
                height,
                regions: HashMap::new(),
            })),
            sweeper: Mutex::new(None),
            stopped: AtomicBool::new(false),
            config,
        })
    }

    fn lock(&self) -> MutexGuard<'_, ManagerState<C>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The stored console width.
    pub fn width(&self) -> u16 {
        self.lock().width
    }

    /// The stored console height.
    pub fn height(&self) -> u16 {
        self.lock().height
    }

    /// Change the console size.
    ///
    /// Updates the stored dimensions and resizes the physical console.
    /// Existing regions are neither validated nor moved: a region may end
    /// up partly or fully outside the visible area, and painting it then
    /// clips. That is accepted behavior, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the console rejects the new size.
    pub fn resize(&self, width: u16, height: u16) -> io::Result<()> {
        let mut state = self.lock();
        state.console.set_size(width, height)?;
        state.console.flush()?;
        state.width = width;
        state.height = height;
        Ok(())
    }

    /// Define a named region at `(x, y)` spanning `width`x`height` cells.
    ///
    /// The first definition under a name wins; defining an existing name
    /// is a silent no-op and later coordinates are ignored. Placement is
    /// not checked against the console dimensions.
    pub fn define_region(&self, name: &str, x: u16, y: u16, width: u16, height: u16) {
        let mut state = self.lock();
        if state.regions.contains_key(name) {
            return;
        }
        state
            .regions
            .insert(name.to_string(), Region::new(Rect::new(x, y, width, height)));
    }

    /// Whether a region with this name has been defined.
    pub fn contains_region(&self, name: &str) -> bool {
        self.lock().regions.contains_key(name)
    }

    /// The region's current logical text, if the region exists.
    pub fn region_text(&self, name: &str) -> Option<String> {
        self.lock().regions.get(name).map(|r| r.text.clone())
    }

    /// Whether the region exists and has a pending timed color change.
    pub fn has_pending_change(&self, name: &str) -> bool {
        self.lock()
            .regions
            .get(name)
            .is_some_and(|r| r.pending.is_some())
    }

    /// Paint `text` into the region in the default foreground.
    ///
    /// See [`Self::print_to_region_with`].
    ///
    /// # Errors
    ///
    /// Returns an error if the console write fails.
    pub fn print_to_region(&self, name: &str, text: &str) -> io::Result<()> {
        self.print_to_region_with(name, text, self.config.default_foreground)
    }

    /// Paint `text` into the region in `color`.
    ///
    /// Unknown names are a silent no-op, so callers can fire-and-forget
    /// updates to regions that may not exist yet. Otherwise the region's
    /// cell area is cleared and the text written back wrapped, truncating
    /// once the area is full; the previously active foreground is restored
    /// afterwards. The console cursor position is not preserved.
    ///
    /// A pending timed color change on the region is NOT canceled by a
    /// plain repaint; it will still fire and recolor the new text.
    ///
    /// # Errors
    ///
    /// Returns an error if the console write fails.
    pub fn print_to_region_with(&self, name: &str, text: &str, color: Color) -> io::Result<()> {
        self.lock().print(name, text, color)
    }

    /// Schedule the region to be repainted in `color` once `timeout` has
    /// elapsed.
    ///
    /// Unknown names are a silent no-op. A previously pending change on
    /// the same region is discarded without firing: the last registration
    /// wins. This only schedules; no paint happens until the sweeper finds
    /// the change expired. Starts the sweeper if it is still dormant.
    ///
    /// # Errors
    ///
    /// Currently infallible, but kept fallible to match the other painting
    /// operations.
    pub fn register_region_color_change(
        &self,
        name: &str,
        color: Color,
        timeout: Duration,
    ) -> io::Result<()> {
        {
            let mut state = self.lock();
            let Some(region) = state.regions.get_mut(name) else {
                return Ok(());
            };
            region.pending = Some(ColorChange::after(color, timeout));
        }
        self.ensure_sweeper();
        Ok(())
    }

    /// Start the sweeper if it is dormant and the manager is not shut down.
    fn ensure_sweeper(&self) {
        let mut sweeper = self.sweeper.lock().unwrap_or_else(PoisonError::into_inner);
        if sweeper.is_none() && !self.stopped.load(Ordering::Relaxed) {
            *sweeper = Some(Sweeper::spawn(
                Arc::clone(&self.state),
                self.config.sweep_interval,
            ));
        }
    }

    /// Stop the sweeper and wait for it to finish.
    ///
    /// Idempotent. After shutdown, timed-color registrations still record
    /// pending changes but the sweeper is not restarted, so they never
    /// fire. Called automatically on drop.
    pub fn shutdown(&self) {
        self.stopped.store(true, Ordering::Relaxed);
        let sweeper = self
            .sweeper
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(sweeper) = sweeper {
            sweeper.join();
        }
    }
}

impl<C: Console> Drop for RegionManager<C> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::GridConsole;
    use std::thread;

    fn manager(width: u16, height: u16) -> RegionManager<GridConsole> {
        RegionManager::new(GridConsole::new(width, height), width, height).unwrap()
    }

    /// Manager with a 10ms sweep for timing tests.
    fn fast_manager(width: u16, height: u16) -> RegionManager<GridConsole> {
        let config = ManagerConfig {
            sweep_interval: Duration::from_millis(10),
            ..ManagerConfig::default()
        };
        RegionManager::with_config(GridConsole::new(width, height), width, height, config)
            .unwrap()
    }

    fn grid<R>(manager: &RegionManager<GridConsole>, f: impl FnOnce(&GridConsole) -> R) -> R {
        f(&manager.lock().console)
    }

    #[test]
    fn test_title_scenario() {
        let manager = manager(80, 24);
        manager.define_region("Title", 0, 1, 80, 1);
        manager.print_to_region("Title", "Hello").unwrap();
        manager.print_to_region("Title", "Hi").unwrap();

        let row = grid(&manager, |g| g.row_text(1));
        assert_eq!(row, format!("Hi{}", " ".repeat(78)));
        assert_eq!(manager.region_text("Title").as_deref(), Some("Hi"));
    }

    #[test]
    fn test_print_unknown_region_is_noop() {
        let manager = manager(10, 5);
        manager.print_to_region("nope", "x").unwrap();
        assert!(!manager.contains_region("nope"));
        assert_eq!(grid(&manager, GridConsole::non_blank_count), 0);
    }

    #[test]
    fn test_register_unknown_region_is_noop() {
        let manager = manager(10, 5);
        manager
            .register_region_color_change("nope", Color::Red, Duration::from_millis(10))
            .unwrap();
        assert!(!manager.contains_region("nope"));
        assert!(!manager.has_pending_change("nope"));
    }

    #[test]
    fn test_define_region_first_wins() {
        let manager = manager(10, 10);
        manager.define_region("A", 0, 0, 3, 1);
        manager.define_region("A", 5, 5, 3, 1);
        manager.print_to_region("A", "zz").unwrap();

        assert_eq!(grid(&manager, |g| g.glyph_at(0, 0).map(str::to_owned)), Some("z".into()));
        assert_eq!(grid(&manager, |g| g.glyph_at(5, 5).map(str::to_owned)), Some(" ".into()));
    }

    #[test]
    fn test_paint_wraps_at_region_edge() {
        let manager = manager(10, 3);
        manager.define_region("box", 2, 0, 3, 2);
        manager.print_to_region("box", "abcdef").unwrap();

        grid(&manager, |g| {
            assert_eq!(&g.row_text(0)[2..5], "abc");
            assert_eq!(&g.row_text(1)[2..5], "def");
            // Nothing bleeds past the right edge.
            assert_eq!(g.glyph_at(5, 0), Some(" "));
            assert_eq!(g.glyph_at(5, 1), Some(" "));
        });
    }

    #[test]
    fn test_paint_truncates_past_bottom_edge() {
        let manager = manager(5, 5);
        manager.define_region("tiny", 0, 0, 2, 2);
        manager.print_to_region("tiny", "abcdef").unwrap();

        grid(&manager, |g| {
            assert_eq!(g.glyph_at(1, 1), Some("d"));
            assert_eq!(g.non_blank_count(), 4);
        });
        // Logical text keeps the full value even though rendering clipped.
        assert_eq!(manager.region_text("tiny").as_deref(), Some("abcdef"));
    }

    #[test]
    fn test_visible_glyphs_bounded_by_area() {
        let manager = manager(20, 10);
        manager.define_region("R", 1, 1, 4, 3);
        manager.print_to_region("R", &"x".repeat(30)).unwrap();
        assert_eq!(grid(&manager, GridConsole::non_blank_count), 12);

        manager.print_to_region("R", "xy").unwrap();
        assert_eq!(grid(&manager, GridConsole::non_blank_count), 2);
    }

    #[test]
    fn test_repaint_clears_leftovers() {
        let manager = manager(10, 2);
        manager.define_region("R", 0, 0, 6, 1);
        manager.print_to_region("R", "abcdef").unwrap();
        manager.print_to_region("R", "g").unwrap();

        grid(&manager, |g| {
            assert_eq!(g.row_text(0), "g".to_owned() + &" ".repeat(9));
            assert_eq!(g.non_blank_count(), 1);
        });
    }

    #[test]
    fn test_print_restores_previous_foreground() {
        let manager = manager(10, 2);
        manager.define_region("R", 0, 0, 4, 1);
        manager
            .print_to_region_with("R", "hot", Color::Red)
            .unwrap();

        grid(&manager, |g| {
            assert_eq!(g.fg_at(0, 0), Some(Color::Red));
            assert_eq!(g.fg_at(2, 0), Some(Color::Red));
            // The console's active color is back to what it was before.
            assert_eq!(g.foreground(), Color::default());
        });
    }

    #[test]
    fn test_timed_revert_fires_and_clears() {
        let manager = fast_manager(10, 2);
        manager.define_region("Status", 0, 0, 5, 1);
        manager.print_to_region("Status", "OK").unwrap();
        manager
            .register_region_color_change("Status", Color::Green, Duration::from_millis(30))
            .unwrap();
        assert!(manager.has_pending_change("Status"));

        thread::sleep(Duration::from_millis(200));

        grid(&manager, |g| {
            assert_eq!(g.glyph_at(0, 0), Some("O"));
            assert_eq!(g.glyph_at(1, 0), Some("K"));
            assert_eq!(g.fg_at(0, 0), Some(Color::Green));
        });
        assert!(!manager.has_pending_change("Status"));
        assert_eq!(manager.region_text("Status").as_deref(), Some("OK"));
    }

    #[test]
    fn test_second_registration_cancels_first() {
        let manager = fast_manager(10, 2);
        manager.define_region("R", 0, 0, 5, 1);
        manager.print_to_region("R", "hi").unwrap();
        manager
            .register_region_color_change("R", Color::Red, Duration::from_millis(20))
            .unwrap();
        manager
            .register_region_color_change("R", Color::Green, Duration::from_millis(250))
            .unwrap();

        // Past the first timeout: the red change was discarded without
        // firing, the green one is still pending.
        thread::sleep(Duration::from_millis(100));
        grid(&manager, |g| assert_eq!(g.fg_at(0, 0), Some(Color::default())));
        assert!(manager.has_pending_change("R"));

        thread::sleep(Duration::from_millis(400));
        grid(&manager, |g| assert_eq!(g.fg_at(0, 0), Some(Color::Green)));
        assert!(!manager.has_pending_change("R"));
    }

    #[test]
    fn test_plain_repaint_keeps_pending_change() {
        let manager = fast_manager(10, 2);
        manager.define_region("R", 0, 0, 5, 1);
        manager.print_to_region("R", "old").unwrap();
        manager
            .register_region_color_change("R", Color::Green, Duration::from_millis(60))
            .unwrap();

        manager.print_to_region("R", "new").unwrap();
        assert!(manager.has_pending_change("R"));

        thread::sleep(Duration::from_millis(250));

        // The change fired against the newer text.
        grid(&manager, |g| {
            assert_eq!(g.fg_at(0, 0), Some(Color::Green));
            assert_eq!(g.glyph_at(0, 0), Some("n"));
        });
        assert!(!manager.has_pending_change("R"));
    }

    #[test]
    fn test_resize_keeps_regions_unvalidated() {
        let manager = manager(10, 5);
        manager.define_region("low", 0, 4, 4, 1);
        manager.print_to_region("low", "deep").unwrap();

        manager.resize(6, 3).unwrap();
        assert_eq!(manager.width(), 6);
        assert_eq!(manager.height(), 3);
        assert!(manager.contains_region("low"));

        // Painting a region that now lies off-screen clips silently.
        manager.print_to_region("low", "gone").unwrap();
        assert_eq!(manager.region_text("low").as_deref(), Some("gone"));
        assert_eq!(grid(&manager, GridConsole::non_blank_count), 0);
    }

    #[test]
    fn test_concurrent_prints_stay_isolated() {
        let manager = manager(80, 10);
        let names: Vec<String> = (0..8).map(|i| format!("r{i}")).collect();
        for (i, name) in names.iter().enumerate() {
            manager.define_region(name, 0, u16::try_from(i).unwrap(), 16, 1);
        }

        thread::scope(|scope| {
            for name in &names {
                let manager = &manager;
                scope.spawn(move || {
                    for iter in 0..20 {
                        manager
                            .print_to_region(name, &format!("{name}-{iter}"))
                            .unwrap();
                    }
                    manager.print_to_region(name, &format!("{name}-final")).unwrap();
                });
            }
        });

        for (i, name) in names.iter().enumerate() {
            let row = grid(&manager, |g| g.row_text(u16::try_from(i).unwrap()));
            assert_eq!(
                row.trim_end(),
                format!("{name}-final"),
                "region {name} shows {row:?}"
            );
        }
    }

    #[test]
    fn test_shutdown_stops_sweeper_for_good() {
        let manager = fast_manager(10, 2);
        manager.define_region("R", 0, 0, 5, 1);
        manager
            .register_region_color_change("R", Color::Red, Duration::from_millis(500))
            .unwrap();
        manager.shutdown();
        manager.shutdown(); // idempotent

        manager
            .register_region_color_change("R", Color::Green, Duration::from_millis(10))
            .unwrap();
        thread::sleep(Duration::from_millis(100));

        // No sweeper is running, so the change never fires.
        assert!(manager.has_pending_change("R"));
        grid(&manager, |g| assert_eq!(g.fg_at(0, 0), Some(Color::default())));
    }
}
