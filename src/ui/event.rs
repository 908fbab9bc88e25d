//! # Event Loop
//!
//! Single-threaded driver for the personal terminal. Each iteration blocks on
//! one key, applies the matching [`ScreenState`] transition and redraws only
//! the panes that transition reported. A key that changes nothing costs no
//! flush.
//!
//! Keys arrive through the [`KeyReader`] trait so the loop can be driven by a
//! script in tests instead of a real keyboard.

use crate::error::{Error, Result, ResultExt};
use crate::ui::layout::Layout;
use crate::ui::render;
use crate::ui::state::{FolderEntry, Redraw, ScreenState};
use crate::ui::surface::Surface;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Logical keys the personal terminal reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Quit,
    Other,
}

/// Source of key presses (allows dependency injection for testing)
pub trait KeyReader {
    /// Block until the next key arrives.
    fn read_key(&mut self) -> Result<Key>;
}

/// Production key reader: blocking crossterm reads, no timeout.
#[derive(Debug, Default)]
pub struct CrosstermKeyReader;

impl KeyReader for CrosstermKeyReader {
    fn read_key(&mut self) -> Result<Key> {
        let event = event::read()
            .map_err(|err| Error::terminal(format!("Failed to read keyboard event: {err}")))?;
        tracing::trace!(?event, "terminal event");
        Ok(key_from_event(&event))
    }
}

/// Map a raw terminal event to a [`Key`].
///
/// Only key presses count; releases, repeats, mouse and resize events are
/// [`Key::Other`]. Ctrl+C quits because raw mode swallows SIGINT.
pub fn key_from_event(event: &Event) -> Key {
    let Event::Key(key) = event else {
        return Key::Other;
    };
    if key.kind != KeyEventKind::Press {
        return Key::Other;
    }
    key_from_press(key)
}

fn key_from_press(key: &KeyEvent) -> Key {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Key::Quit,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Key::Quit,
        KeyCode::Up | KeyCode::Char('k') => Key::Up,
        KeyCode::Down | KeyCode::Char('j') => Key::Down,
        KeyCode::Left | KeyCode::Char('h') => Key::Left,
        KeyCode::Right | KeyCode::Char('l') => Key::Right,
        _ => Key::Other,
    }
}

/// The interactive folder/content screen.
#[derive(Debug)]
pub struct PersonalTerminal {
    layout: Layout,
    state: ScreenState,
}

impl PersonalTerminal {
    /// Lay out the screen for the surface's size and wrap every entry to fit.
    pub fn new<S: Surface + ?Sized>(entries: Vec<FolderEntry>, surface: &S) -> Result<Self> {
        let size = surface.size();
        let layout = Layout::compute(size.height, size.width).mark("computing pane layout")?;
        let state = ScreenState::new(entries, layout.text_width(), layout.visible_height())
            .mark("preparing folder entries")?;
        Ok(Self { layout, state })
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn state(&self) -> &ScreenState {
        &self.state
    }

    /// Apply the transition for `key`. Quit is left to the caller.
    pub fn handle(&mut self, key: Key) -> Redraw {
        match key {
            Key::Up => self.state.select_previous(),
            Key::Down => self.state.select_next(),
            Key::Left => self.state.scroll_up(),
            Key::Right => self.state.scroll_down(),
            Key::Quit | Key::Other => Redraw::None,
        }
    }

    /// Draw the full screen, then process keys until one of them is quit.
    pub fn run<S, K>(&mut self, surface: &mut S, keys: &mut K) -> Result<()>
    where
        S: Surface + ?Sized,
        K: KeyReader + ?Sized,
    {
        render::render(surface, &self.layout, &self.state);
        surface.flush().mark("drawing personal terminal")?;
        tracing::info!(
            entries = self.state.entries().len(),
            "personal terminal ready"
        );

        loop {
            let key = keys.read_key().mark("waiting for a key")?;
            if key == Key::Quit {
                tracing::info!("quit requested");
                return Ok(());
            }

            let redraw = self.handle(key);
            tracing::debug!(?key, ?redraw, "handled key");
            if redraw != Redraw::None {
                render::apply(surface, &self.layout, &self.state, redraw);
                surface.flush().mark("redrawing after key press")?;
            }
        }
    }
}
