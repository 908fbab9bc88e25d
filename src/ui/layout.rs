//! # Pane Geometry
//!
//! Fixed-position layout of the personal terminal:
//!
//! ```text
//! PERSONAL TERMINAL                                             (row 0)
//!
//!                         ┌─┌──────────────────────────────────┐
//!                         │ ┤ CONTENT TITLE                    │
//!  FOLDERS                │ └──────────────────────────────────┘
//! ┌──────────────────────┐│
//! │ FOLDER 1             ├┘ ┌──────────────────────────────────┐
//! └──────────────────────┘  │ CONTENT TEXT                     │
//! ┌──────────────────────┐  │                                  │
//! │ FOLDER 2             │  │                                  │
//! └──────────────────────┘  │                                  │
//!   ...                     └──────────────────────────────────┘
//! UP, DOWN: select folder | LEFT, RIGHT: scroll | q: exit       (last row)
//! ```
//!
//! Only the content panes stretch with the terminal; everything left of them
//! is a fixed size.

use crate::error::{Error, ErrorKind, Result};
use ratatui::layout::{Position, Rect};

/// Number of folder panes in the stack.
pub const FOLDER_COUNT: u16 = 4;
/// Height of one folder pane, borders included.
pub const FOLDER_HEIGHT: u16 = 4;
/// Width of one folder pane, borders included.
pub const FOLDER_WIDTH: u16 = 24;
/// Width of the elbow connector pane.
pub const ELBOW_WIDTH: u16 = 3;
/// Narrowest acceptable content pane.
pub const CONTENT_MIN_WIDTH: u16 = 40;

const BANNER_ROW: u16 = 0;
const FOLDERS_LABEL: Position = Position { x: 1, y: 4 };
const FOLDER_STACK_ROW: u16 = 5;
const ELBOW_ROW: u16 = 2;
const ELBOW_HEIGHT: u16 = FOLDER_COUNT * FOLDER_HEIGHT + 3;
const CONTENT_COLUMN: u16 = FOLDER_WIDTH + ELBOW_WIDTH;
const CONTENT_TITLE_ROW: u16 = 2;
const CONTENT_TITLE_HEIGHT: u16 = 3;
const CONTENT_TEXT_ROW: u16 = 6;
const STATUS_HEIGHT: u16 = 1;

/// Rows needed: the folder stack plus the status line.
pub const MIN_HEIGHT: u16 = FOLDER_STACK_ROW + FOLDER_COUNT * FOLDER_HEIGHT + STATUS_HEIGHT;
/// Columns needed: everything left of the content panes plus the content minimum.
pub const MIN_WIDTH: u16 = CONTENT_COLUMN + CONTENT_MIN_WIDTH;

/// Where every pane of the personal terminal lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub screen: Rect,
    pub banner: Rect,
    pub folders_label: Position,
    pub folders: [Rect; FOLDER_COUNT as usize],
    pub elbow: Rect,
    pub content_title: Rect,
    pub content_text: Rect,
    pub status: Rect,
}

impl Layout {
    /// Compute the layout for a `rows` x `cols` terminal.
    ///
    /// Size checks run before anything is sized, so a terminal that is too
    /// small never yields partial geometry.
    pub fn compute(rows: u16, cols: u16) -> Result<Self> {
        if rows < MIN_HEIGHT {
            return Err(Error::new(ErrorKind::TerminalTooShort {
                required: MIN_HEIGHT,
                actual: rows,
            }));
        }
        if cols < MIN_WIDTH {
            return Err(Error::new(ErrorKind::TerminalTooNarrow {
                required: MIN_WIDTH,
                actual: cols,
            }));
        }

        let content_width = cols - CONTENT_COLUMN;
        let status_row = rows - STATUS_HEIGHT;
        let folders = std::array::from_fn(|i| {
            Rect::new(
                0,
                FOLDER_STACK_ROW + i as u16 * FOLDER_HEIGHT,
                FOLDER_WIDTH,
                FOLDER_HEIGHT,
            )
        });

        let layout = Self {
            screen: Rect::new(0, 0, cols, rows),
            banner: Rect::new(0, BANNER_ROW, cols, 1),
            folders_label: FOLDERS_LABEL,
            folders,
            elbow: Rect::new(FOLDER_WIDTH, ELBOW_ROW, ELBOW_WIDTH, ELBOW_HEIGHT),
            content_title: Rect::new(
                CONTENT_COLUMN,
                CONTENT_TITLE_ROW,
                content_width,
                CONTENT_TITLE_HEIGHT,
            ),
            content_text: Rect::new(
                CONTENT_COLUMN,
                CONTENT_TEXT_ROW,
                content_width,
                status_row - CONTENT_TEXT_ROW,
            ),
            status: Rect::new(0, status_row, cols, STATUS_HEIGHT),
        };
        tracing::debug!(rows, cols, ?layout, "computed pane layout");
        Ok(layout)
    }

    /// Columns available for text inside the content pane border.
    ///
    /// Wrapped lines stay strictly below this width, so the longest word that
    /// fits is `text_width() - 1` characters.
    pub fn text_width(&self) -> usize {
        usize::from(self.content_text.width.saturating_sub(2))
    }

    /// Lines of text visible inside the content pane border.
    pub fn visible_height(&self) -> usize {
        usize::from(self.content_text.height.saturating_sub(2))
    }

    /// Elbow-relative row where the connector turns toward folder `selected`:
    /// the middle row of that folder pane.
    pub fn connector_row(&self, selected: usize) -> u16 {
        let offset = FOLDER_STACK_ROW - ELBOW_ROW;
        offset + selected as u16 * FOLDER_HEIGHT + 1
    }

    /// All pane rectangles, for bounds checks.
    pub fn panes(&self) -> Vec<Rect> {
        let mut panes = vec![
            self.banner,
            self.elbow,
            self.content_title,
            self.content_text,
            self.status,
        ];
        panes.extend(self.folders);
        panes
    }
}
