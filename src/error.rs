//! # Error Handling
//!
//! Every fallible operation in the library returns [`Result`], whose error
//! carries two things:
//!
//! - an [`ErrorKind`] saying *what* went wrong, and
//! - a [`Trace`] saying *where*: a short call chain of source locations, each
//!   with a line of context, recorded as the error travels outward.
//!
//! The frame where an error is created is captured automatically through
//! `#[track_caller]`. Each layer that passes an error along adds its own frame
//! with [`ResultExt::mark`]:
//!
//! ```ignore
//! let layout = Layout::compute(rows, cols).mark("computing pane layout")?;
//! ```
//!
//! Nothing here is printed by the library. The binary restores the terminal
//! first and then writes [`Error::report`] to stderr.

use std::borrow::Cow;
use std::fmt;
use std::panic::Location;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Maximum number of frames kept in a [`Trace`].
pub const MAX_TRACE_DEPTH: usize = 32;

/// What went wrong.
#[derive(Debug, Error)]
pub enum ErrorKind {
    // ─────────────────────────────────────────────────────────────
    // Geometry
    // ─────────────────────────────────────────────────────────────
    #[error("Terminal is not tall enough (need {required} rows, have {actual})")]
    TerminalTooShort { required: u16, actual: u16 },

    #[error("Terminal is not wide enough (need {required} columns, have {actual})")]
    TerminalTooNarrow { required: u16, actual: u16 },

    #[error("The user-provided text does not fit in {width} columns")]
    TextTooWide { width: usize },

    // ─────────────────────────────────────────────────────────────
    // Content
    // ─────────────────────────────────────────────────────────────
    #[error("{} exceeds the {limit} byte content limit", path.display())]
    ContentTooLarge { path: PathBuf, limit: usize },

    // ─────────────────────────────────────────────────────────────
    // Configuration
    // ─────────────────────────────────────────────────────────────
    #[error("No configuration file found (searched: {})", display_paths(searched))]
    ConfigNotFound { searched: Vec<PathBuf> },

    #[error("Configuration read error for {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Configuration parse error in {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid configuration: {message}")]
    ConfigInvalid { message: String },

    #[error("Too many elements in the folder entry list ({count}, at most {max})")]
    TooManyEntries { count: usize, max: usize },

    // ─────────────────────────────────────────────────────────────
    // Terminal driver
    // ─────────────────────────────────────────────────────────────
    #[error("Terminal error: {message}")]
    Terminal { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// One step of the call chain an error travelled through.
#[derive(Debug, Clone)]
pub struct Frame {
    pub location: &'static Location<'static>,
    pub context: Cow<'static, str>,
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}: in {}",
            self.location.file(),
            self.location.line(),
            self.context
        )
    }
}

/// Bounded call chain, innermost frame first.
#[derive(Debug, Clone, Default)]
pub struct Trace {
    frames: Vec<Frame>,
    overflowed: bool,
}

impl Trace {
    /// Push a frame, or record the overflow once [`MAX_TRACE_DEPTH`] is reached.
    pub fn push(&mut self, frame: Frame) {
        if self.frames.len() == MAX_TRACE_DEPTH {
            self.overflowed = true;
            return;
        }
        self.frames.push(frame);
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn overflowed(&self) -> bool {
        self.overflowed
    }
}

/// Library error: a kind plus the trace of where it has been.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    kind: ErrorKind,
    trace: Trace,
}

impl Error {
    /// Create an error, recording the caller as the first frame.
    #[track_caller]
    pub fn new(kind: ErrorKind) -> Self {
        Self::with_context(kind, "raised")
    }

    /// Create an error with a description of the failing step.
    #[track_caller]
    pub fn with_context(kind: ErrorKind, context: impl Into<Cow<'static, str>>) -> Self {
        let mut trace = Trace::default();
        trace.push(Frame {
            location: Location::caller(),
            context: context.into(),
        });
        Self { kind, trace }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    /// Printable traceback, outermost frame first.
    pub fn report(&self) -> Report<'_> {
        Report(self)
    }

    #[track_caller]
    pub fn terminal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Terminal {
            message: message.into(),
        })
    }

    #[track_caller]
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ConfigInvalid {
            message: message.into(),
        })
    }
}

impl From<ErrorKind> for Error {
    #[track_caller]
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

impl From<std::io::Error> for Error {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Self::new(ErrorKind::Io(err))
    }
}

/// Traceback rendering of an [`Error`].
pub struct Report<'a>(&'a Error);

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let trace = &self.0.trace;
        writeln!(f, "Traceback (most recent call last)")?;
        if trace.overflowed {
            writeln!(f, "  (recent stack frames overflowed)")?;
        }
        for frame in trace.frames.iter().rev() {
            writeln!(f, "  {frame}")?;
        }
        writeln!(f, "Error: {}", self.0.kind)
    }
}

/// Adds a frame to the error trace as a result passes through a layer.
pub trait ResultExt<T> {
    fn mark(self, context: impl Into<Cow<'static, str>>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    #[track_caller]
    fn mark(self, context: impl Into<Cow<'static, str>>) -> Result<T> {
        match self {
            Ok(value) => Ok(value),
            Err(mut err) => {
                err.trace.push(Frame {
                    location: Location::caller(),
                    context: context.into(),
                });
                Err(err)
            }
        }
    }
}
