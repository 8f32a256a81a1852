//! Dashboard demo: title banner, runtime counters, a bouncing marquee and
//! two spinners, with timed color flashes when the marquee hits a wall.
//!
//! Pure sample usage of the public region operations - everything here
//! drives the manager through `define_region` / `print_to_region` /
//! `register_region_color_change`.

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyModifiers},
    execute, terminal,
};
use dashpane::{Color, RegionManager};
use std::io;
use std::time::{Duration, Instant};

const WIDTH: u16 = 80;
const HEIGHT: u16 = 18;

const TITLE: &str = "Title";
const TIME_STARTED: &str = "TimeStarted";
const CURRENT_RUNTIME: &str = "CurrentRuntime";
const BOUNCE: &str = "BounceAnimation";
const SPINNER_LEFT: &str = "SpinnerLeft";
const SPINNER_RIGHT: &str = "SpinnerRight";

const TICK: Duration = Duration::from_millis(250);
const MARQUEE: &str = "Bounce Example";
const BOUNCE_WIDTH: u16 = 75;

/// A spinner glyph sequence that can rotate either way.
struct Spinner {
    glyphs: Vec<char>,
    index: usize,
    reversed: bool,
}

impl Spinner {
    fn new(glyphs: &str) -> Self {
        Self {
            glyphs: glyphs.chars().collect(),
            index: 0,
            reversed: false,
        }
    }

    fn current(&self) -> String {
        self.glyphs[self.index].to_string()
    }

    fn advance(&mut self) {
        let len = self.glyphs.len();
        self.index = if self.reversed {
            (self.index + len - 1) % len
        } else {
            (self.index + 1) % len
        };
    }

    fn reverse(&mut self) {
        self.reversed = !self.reversed;
    }
}

/// The marquee walks between the walls of its region, flipping direction
/// at each end.
struct Marquee {
    offset: u16,
    moving_right: bool,
}

impl Marquee {
    const fn max_offset() -> u16 {
        BOUNCE_WIDTH - MARQUEE.len() as u16
    }

    /// Advance one step. Returns true when a wall was hit this step.
    fn advance(&mut self) -> bool {
        if self.moving_right {
            self.offset += 1;
            if self.offset >= Self::max_offset() {
                self.moving_right = false;
                return true;
            }
        } else {
            self.offset -= 1;
            if self.offset == 0 {
                self.moving_right = true;
                return true;
            }
        }
        false
    }

    fn render(&self) -> String {
        format!("{}{}", " ".repeat(self.offset as usize), MARQUEE)
    }
}

fn format_runtime(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    format!("{}:{:02}:{:02}", total / 3600, (total / 60) % 60, total % 60)
}

fn main() -> io::Result<()> {
    terminal::enable_raw_mode()?;
    execute!(
        io::stdout(),
        terminal::Clear(terminal::ClearType::All),
        cursor::Hide
    )?;

    let result = run();

    execute!(io::stdout(), cursor::Show, cursor::MoveTo(0, HEIGHT))?;
    terminal::disable_raw_mode()?;
    result
}

fn run() -> io::Result<()> {
    let manager = RegionManager::stdout(WIDTH, HEIGHT)?;

    // Full-row regions.
    manager.define_region(TITLE, 0, 1, WIDTH, 1);
    manager.define_region(TIME_STARTED, 0, 3, WIDTH, 1);
    manager.define_region(CURRENT_RUNTIME, 0, 4, WIDTH, 1);

    // Manually placed regions.
    manager.define_region(SPINNER_LEFT, 1, 16, 1, 1);
    manager.define_region(BOUNCE, 2, 16, BOUNCE_WIDTH, 1);
    manager.define_region(SPINNER_RIGHT, 78, 15, 1, 1);

    manager.print_to_region_with(
        TITLE,
        &format!("{:^width$}", "Dashpane Example Program", width = WIDTH as usize),
        Color::Cyan,
    )?;

    let start = Instant::now();
    manager.print_to_region(TIME_STARTED, " Press q or Esc to exit")?;

    let mut left_spinner = Spinner::new("\\-/|");
    let mut right_spinner = Spinner::new("|/-\\");
    let mut marquee = Marquee {
        offset: 0,
        moving_right: true,
    };

    let mut next_tick = Instant::now() + TICK;
    loop {
        let timeout = next_tick.saturating_duration_since(Instant::now());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                let ctrl_c = key.code == KeyCode::Char('c')
                    && key.modifiers.contains(KeyModifiers::CONTROL);
                if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) || ctrl_c {
                    break;
                }
            }
            continue;
        }
        next_tick += TICK;

        manager.print_to_region_with(
            CURRENT_RUNTIME,
            &format!(" Current runtime: {}", format_runtime(start.elapsed())),
            Color::White,
        )?;

        manager.print_to_region_with(SPINNER_LEFT, &left_spinner.current(), Color::Cyan)?;
        manager.print_to_region_with(SPINNER_RIGHT, &right_spinner.current(), Color::Cyan)?;
        left_spinner.advance();
        right_spinner.advance();

        let hit_wall = marquee.advance();
        manager.print_to_region_with(BOUNCE, &marquee.render(), Color::Magenta)?;
        if hit_wall {
            // Reverse the spinner on the side that was hit and flash the
            // marquee; the sweeper reverts the color shortly after.
            if marquee.moving_right {
                left_spinner.reverse();
            } else {
                right_spinner.reverse();
            }
            manager.register_region_color_change(BOUNCE, Color::Yellow, Duration::from_millis(750))?;
        }
    }

    manager.shutdown();
    Ok(())
}
