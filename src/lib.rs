//! # Dashpane
//!
//! Named-region console rendering with timed color highlights.
//!
//! Dashpane renders text into fixed, named rectangular regions of a
//! fixed-size console - status panels, spinners, counters - without
//! pulling in a full terminal-UI framework. A region can additionally be
//! given a timed foreground highlight that a background sweeper reverts
//! once it expires.
//!
//! ## Core Concepts
//!
//! - **Regions**: named rectangles defined once; painting clears the
//!   region and writes wrapped, clipped text into it
//! - **Lenient contract**: unknown names, duplicate definitions and
//!   oversize text degrade to no-ops or truncation, never to errors
//! - **Timed color changes**: a background sweeper repaints a region in a
//!   registered color once its timeout elapses, then clears the schedule
//! - **Console boundary**: painting goes through the [`Console`] trait;
//!   stdout (ANSI) and in-memory grid backends are provided
//!
//! ## Example
//!
//! ```rust,ignore
//! use dashpane::{Color, RegionManager};
//! use std::time::Duration;
//!
//! let manager = RegionManager::stdout(80, 18)?;
//! manager.define_region("title", 0, 1, 80, 1);
//! manager.print_to_region_with("title", "Build Status", Color::Cyan)?;
//! manager.register_region_color_change("title", Color::Green, Duration::from_millis(500))?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod color;
pub mod console;
pub mod layout;
pub mod manager;

// Re-exports for convenience
pub use color::Color;
pub use console::{AnsiConsole, Console, GridConsole, OutputBuffer};
pub use layout::{ColorChange, Rect, Region};
pub use manager::{ManagerConfig, RegionManager};
