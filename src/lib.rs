//! alien-console - a personal terminal in the style of a ship's computer
//!
//! This library provides the pieces behind the `alien-console` binary: a
//! timed splash screen, a four-folder content browser with word-wrapped,
//! scrollable text, and the configuration that feeds both.

pub mod config;
pub mod error;
pub mod logging;
pub mod ui;
pub mod wrap;

pub use error::{Error, ErrorKind, Result, ResultExt};
