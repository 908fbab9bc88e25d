//! # UI Module
//!
//! This module provides the two screens of alien-console.
//!
//! ## Components
//!
//! - [`mod@splash`] - Splash art with a timed progress sweep
//! - [`PersonalTerminal`] - Folder list and content viewer, driven by keys
//! - [`mod@layout`] - Pane geometry for the personal terminal
//! - [`mod@state`] - Selection and scroll state
//! - [`mod@render`] - Pane drawing and minimal redraws
//! - [`Surface`] - Drawing primitives, staged and flushed to a terminal
//!
//! ## Layout
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                    Banner                        │
//! ├─────────────────────┬──┬────────────────────────┤
//! │                     │  │     Content Title       │
//! │   Folder 1..4       │el├────────────────────────┤
//! │   (selectable)      │bo│                        │
//! │                     │w │     Content Text       │
//! │                     │  │   (wrapped, scrolls)   │
//! ├─────────────────────┴──┴────────────────────────┤
//! │                  Status / key help               │
//! └─────────────────────────────────────────────────┘
//! ```

pub mod event;
pub mod layout;
pub mod render;
pub mod splash;
pub mod state;
pub mod surface;

pub use event::{CrosstermKeyReader, Key, KeyReader, PersonalTerminal};
pub use layout::Layout;
pub use render::render;
pub use splash::{Splash, SplashParams, ThreadSleeper};
pub use state::{FolderEntry, Redraw, ScreenState};
pub use surface::{Emphasis, Surface, TerminalSurface};
