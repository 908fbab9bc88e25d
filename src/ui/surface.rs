//! # Drawing Surface
//!
//! The narrow set of drawing primitives the screens need. Drawing is staged:
//! nothing reaches the terminal until [`Surface::flush`], which pushes the
//! whole composed frame at once.
//!
//! [`TerminalSurface`] is the production implementation. It keeps its own
//! off-screen [`Buffer`] that survives across flushes, so a pane that is not
//! redrawn keeps its previous contents, and hands that buffer to a ratatui
//! [`Terminal`] on flush. ratatui then writes only the cells that changed.
//! Any ratatui backend works, including `TestBackend` for headless tests.

use crate::error::{Error, Result};
use ratatui::backend::Backend;
use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect, Size};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Clear, Widget};
use ratatui::{Terminal, TerminalOptions, Viewport};

/// Text attribute applied to subsequent draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Emphasis {
    #[default]
    Normal,
    Bold,
    Dim,
    Reverse,
}

impl Emphasis {
    pub fn style(self) -> Style {
        match self {
            Emphasis::Normal => Style::default(),
            Emphasis::Bold => Style::default().add_modifier(Modifier::BOLD),
            Emphasis::Dim => Style::default().add_modifier(Modifier::DIM),
            Emphasis::Reverse => Style::default().add_modifier(Modifier::REVERSED),
        }
    }
}

/// Drawing primitives used by the splash and personal terminal screens.
pub trait Surface {
    /// Current size of the drawing area.
    fn size(&self) -> Size;

    /// Blank every cell of `area`.
    fn clear(&mut self, area: Rect);

    /// Write `text` starting at `at`, using at most `limit` columns and never
    /// past the right edge of the surface.
    fn draw_text(&mut self, at: Position, text: &str, limit: u16);

    /// Draw a single-line border around `area`. The interior is untouched.
    fn draw_box(&mut self, area: Rect);

    /// Set the emphasis used by later `draw_text` and `draw_box` calls.
    fn set_emphasis(&mut self, emphasis: Emphasis);

    /// Push everything staged so far to the screen.
    fn flush(&mut self) -> Result<()>;
}

/// [`Surface`] backed by a ratatui [`Terminal`].
pub struct TerminalSurface<B: Backend> {
    terminal: Terminal<B>,
    staged: Buffer,
    emphasis: Emphasis,
}

impl<B: Backend> TerminalSurface<B> {
    /// Wrap `backend`, fixing the drawing area at its current size.
    pub fn new(backend: B) -> Result<Self> {
        let size = backend
            .size()
            .map_err(|err| Error::terminal(format!("Failed to query terminal size: {err}")))?;
        let area = Rect::new(0, 0, size.width, size.height);
        let terminal = Terminal::with_options(
            backend,
            TerminalOptions {
                viewport: Viewport::Fixed(area),
            },
        )
        .map_err(|err| Error::terminal(format!("Failed to create terminal: {err}")))?;

        Ok(Self {
            terminal,
            staged: Buffer::empty(area),
            emphasis: Emphasis::Normal,
        })
    }

    pub fn backend(&self) -> &B {
        self.terminal.backend()
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<B> {
        &mut self.terminal
    }

    /// The staged frame, including anything not yet flushed.
    pub fn staged(&self) -> &Buffer {
        &self.staged
    }
}

impl<B: Backend> Surface for TerminalSurface<B> {
    fn size(&self) -> Size {
        self.staged.area.as_size()
    }

    fn clear(&mut self, area: Rect) {
        let area = area.intersection(self.staged.area);
        Clear.render(area, &mut self.staged);
    }

    fn draw_text(&mut self, at: Position, text: &str, limit: u16) {
        if !self.staged.area.contains(at) {
            return;
        }
        self.staged
            .set_stringn(at.x, at.y, text, usize::from(limit), self.emphasis.style());
    }

    fn draw_box(&mut self, area: Rect) {
        let area = area.intersection(self.staged.area);
        Block::bordered()
            .border_style(self.emphasis.style())
            .render(area, &mut self.staged);
    }

    fn set_emphasis(&mut self, emphasis: Emphasis) {
        self.emphasis = emphasis;
    }

    fn flush(&mut self) -> Result<()> {
        let staged = &self.staged;
        self.terminal
            .draw(|frame| frame.buffer_mut().merge(staged))
            .map_err(|err| Error::terminal(format!("Failed to draw frame: {err}")))?;
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;

    fn surface(width: u16, height: u16) -> TerminalSurface<TestBackend> {
        TerminalSurface::new(TestBackend::new(width, height)).expect("test surface")
    }

    fn row(buffer: &Buffer, y: u16) -> String {
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_size_matches_backend() {
        let surface = surface(30, 8);
        assert_eq!(surface.size(), Size::new(30, 8));
    }

    #[test]
    fn test_nothing_reaches_backend_before_flush() {
        let mut surface = surface(10, 2);
        surface.draw_text(Position::new(0, 0), "hello", 10);
        assert_eq!(row(surface.backend().buffer(), 0), " ".repeat(10));
        surface.flush().expect("flush");
        assert_eq!(row(surface.backend().buffer(), 0), "hello     ");
    }

    #[test]
    fn test_staged_frame_survives_flush() {
        let mut surface = surface(10, 2);
        surface.draw_text(Position::new(0, 0), "top", 10);
        surface.flush().expect("flush");
        surface.draw_text(Position::new(0, 1), "bottom", 10);
        surface.flush().expect("flush");
        let buffer = surface.backend().buffer();
        assert_eq!(row(buffer, 0), "top       ");
        assert_eq!(row(buffer, 1), "bottom    ");
    }

    #[test]
    fn test_draw_text_is_clipped() {
        let mut surface = surface(6, 1);
        surface.draw_text(Position::new(2, 0), "abcdef", 10);
        surface.draw_text(Position::new(0, 5), "off screen", 10);
        assert_eq!(row(surface.staged(), 0), "  abcd");

        let mut surface = self::surface(6, 1);
        surface.draw_text(Position::new(0, 0), "abcdef", 3);
        assert_eq!(row(surface.staged(), 0), "abc   ");
    }

    #[test]
    fn test_draw_box_and_clear() {
        let mut surface = surface(4, 3);
        surface.draw_box(Rect::new(0, 0, 4, 3));
        assert_eq!(row(surface.staged(), 0), "┌──┐");
        assert_eq!(row(surface.staged(), 1), "│  │");
        assert_eq!(row(surface.staged(), 2), "└──┘");
        surface.clear(Rect::new(0, 0, 4, 3));
        assert_eq!(row(surface.staged(), 0), "    ");
    }

    #[test]
    fn test_emphasis_applies_to_draws() {
        let mut surface = surface(4, 1);
        surface.set_emphasis(Emphasis::Reverse);
        surface.draw_text(Position::new(0, 0), "ab", 4);
        surface.set_emphasis(Emphasis::Normal);
        surface.draw_text(Position::new(2, 0), "cd", 4);
        let staged = surface.staged();
        assert!(staged[(0, 0)].modifier.contains(Modifier::REVERSED));
        assert!(!staged[(2, 0)].modifier.contains(Modifier::REVERSED));
    }
}
