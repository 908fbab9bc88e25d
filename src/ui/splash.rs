//! # Splash Screen
//!
//! ASCII art with a tagline under its right edge, a progress bar that sweeps
//! across the screen, and a centered copyright line:
//!
//! ```text
//!   [ top padding ]
//!        SPLASH ART SPLASH ART SPLASH ART
//!        SPLASH ART SPLASH ART SPLASH ART
//!                        TAGLINE, RIGHT ALIGNED
//!   [ bottom padding ]
//! ████████████████████ progress ░░░░░░░░░░░░░░░░
//!                 COPYRIGHT (centered)
//! ```
//!
//! The sweep always takes roughly the configured budget: each column waits
//! `budget / columns`, plus a little jitter so the bar does not move with a
//! mechanical cadence.

use crate::error::{Error, ErrorKind, Result, ResultExt};
use crate::ui::surface::{Emphasis, Surface};
use rand::Rng;
use ratatui::layout::Position;
use std::time::Duration;

/// Largest splash art file accepted, in bytes.
pub const SPLASH_CAPACITY: usize = 1024;

/// Default duration of the whole progress sweep.
pub const DEFAULT_BUDGET: Duration = Duration::from_secs(5);

/// Jitter added to each tick, in milliseconds: `[-JITTER_MS, JITTER_MS)`.
const JITTER_MS: i64 = 10;

/// Rows besides the art: tagline, progress bar, copyright.
const EXTRA_ROWS: u16 = 3;

/// Everything the splash screen shows.
#[derive(Debug, Clone, PartialEq)]
pub struct SplashParams {
    pub art: String,
    pub tagline: String,
    pub copyright: String,
    pub budget: Duration,
}

/// Placement of the splash elements on a particular terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplashLayout {
    pub rows: u16,
    pub cols: u16,
    pub art_lines: u16,
    pub art_width: u16,
    /// Blank rows above the art.
    pub top: u16,
    /// Blank rows between the tagline and the progress bar.
    pub bottom: u16,
    pub art_column: u16,
    pub tagline_column: u16,
    pub copyright_column: u16,
}

impl SplashLayout {
    pub fn compute(params: &SplashParams, rows: u16, cols: u16) -> Result<Self> {
        let art_lines = saturating_u16(params.art.lines().count());
        let art_width = saturating_u16(art_width(&params.art));

        let required = art_lines.saturating_add(EXTRA_ROWS);
        if required > rows {
            return Err(Error::new(ErrorKind::TerminalTooShort {
                required,
                actual: rows,
            }));
        }
        if art_width > cols {
            return Err(Error::new(ErrorKind::TerminalTooNarrow {
                required: art_width,
                actual: cols,
            }));
        }

        let spare = rows - required;
        let bottom = spare / 2;
        let top = spare - bottom;

        let art_column = (cols - art_width) / 2;
        let art_end = art_column + art_width;
        let tagline_width = saturating_u16(params.tagline.chars().count());
        let tagline_column = art_end.checked_sub(tagline_width).ok_or_else(|| {
            Error::new(ErrorKind::TextTooWide {
                width: usize::from(art_end),
            })
        })?;

        let copyright_width = saturating_u16(params.copyright.chars().count());
        if copyright_width > cols {
            return Err(Error::new(ErrorKind::TextTooWide {
                width: usize::from(cols),
            }));
        }
        let copyright_column = (cols - copyright_width) / 2;

        Ok(Self {
            rows,
            cols,
            art_lines,
            art_width,
            top,
            bottom,
            art_column,
            tagline_column,
            copyright_column,
        })
    }

    pub fn tagline_row(&self) -> u16 {
        self.top + self.art_lines
    }

    pub fn progress_row(&self) -> u16 {
        self.tagline_row() + 1 + self.bottom
    }

    pub fn copyright_row(&self) -> u16 {
        self.progress_row() + 1
    }
}

fn art_width(art: &str) -> usize {
    art.lines().map(|line| line.chars().count()).max().unwrap_or(0)
}

fn saturating_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

/// Something that can pause the sequencer between frames.
pub trait Sleeper {
    fn sleep(&mut self, duration: Duration);
}

/// [`Sleeper`] that blocks the current thread.
#[derive(Debug, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Delay before drawing one more column of the progress bar.
pub fn tick_delay(budget: Duration, cols: u16, jitter_ms: i64) -> Duration {
    let base = budget / u32::from(cols.max(1));
    let jitter = Duration::from_millis(jitter_ms.unsigned_abs());
    if jitter_ms < 0 {
        base.saturating_sub(jitter)
    } else {
        base + jitter
    }
}

/// Drives the splash screen: draw once, then animate the progress bar.
pub struct Splash<'a> {
    params: &'a SplashParams,
    layout: SplashLayout,
}

impl<'a> Splash<'a> {
    /// Lay out the splash for the surface's current size.
    pub fn new<S: Surface + ?Sized>(params: &'a SplashParams, surface: &S) -> Result<Self> {
        let size = surface.size();
        let layout = SplashLayout::compute(params, size.height, size.width)
            .mark("laying out splash screen")?;
        tracing::debug!(?layout, "computed splash layout");
        Ok(Self { params, layout })
    }

    pub fn layout(&self) -> &SplashLayout {
        &self.layout
    }

    pub fn run<S, Z, R>(&self, surface: &mut S, sleeper: &mut Z, rng: &mut R) -> Result<()>
    where
        S: Surface + ?Sized,
        Z: Sleeper + ?Sized,
        R: Rng + ?Sized,
    {
        self.draw(surface);
        surface.flush().mark("showing splash screen")?;

        let layout = &self.layout;
        let row = layout.progress_row();
        let mut tick = || {
            let jitter = rng.gen_range(-JITTER_MS..JITTER_MS);
            tick_delay(self.params.budget, layout.cols, jitter)
        };

        surface.set_emphasis(Emphasis::Reverse);
        for x in 0..layout.cols {
            sleeper.sleep(tick());
            surface.draw_text(Position::new(x, row), " ", 1);
            surface.flush().mark("advancing splash progress bar")?;
        }
        surface.set_emphasis(Emphasis::Normal);
        sleeper.sleep(tick());

        tracing::info!("splash screen complete");
        Ok(())
    }

    fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        let layout = &self.layout;
        surface.clear(ratatui::layout::Rect::new(0, 0, layout.cols, layout.rows));
        surface.set_emphasis(Emphasis::Normal);

        for (row, line) in (layout.top..).zip(self.params.art.lines()) {
            surface.draw_text(Position::new(layout.art_column, row), line, layout.art_width);
        }
        surface.draw_text(
            Position::new(layout.tagline_column, layout.tagline_row()),
            &self.params.tagline,
            layout.cols,
        );
        surface.draw_text(
            Position::new(layout.copyright_column, layout.copyright_row()),
            &self.params.copyright,
            layout.cols,
        );
    }
}
