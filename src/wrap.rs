//! # Text Reflow
//!
//! Greedy word wrapping that edits a buffer in place: a space at a wrap point
//! is turned into a newline, nothing is inserted or removed. Line lengths are
//! counted in characters.

use crate::error::{Error, ErrorKind, Result};

/// Reflow `text` so that every line stays below `width` characters and return
/// the resulting line count.
///
/// A line is broken as soon as it reaches `width`, at the most recent space
/// on that line. Existing newlines are kept. A run of `width` characters with
/// no space to break at fails with [`ErrorKind::TextTooWide`]; in that case
/// the buffer is left exactly as it was.
pub fn wrap(text: &mut String, width: usize) -> Result<usize> {
    let breaks = find_breaks(text, width)?;
    for at in breaks {
        // Same-length replacement, so the buffer is never reallocated.
        text.replace_range(at..at + 1, "\n");
    }
    Ok(count_lines(text))
}

/// Byte offsets of the spaces that must become newlines.
fn find_breaks(text: &str, width: usize) -> Result<Vec<usize>> {
    let mut breaks = Vec::new();
    // (char position, byte offset) of the last space since the last break
    let mut last_space: Option<(usize, usize)> = None;
    let mut line_length = 0usize;

    for (pos, (offset, ch)) in text.char_indices().enumerate() {
        match ch {
            '\n' => {
                line_length = 0;
                last_space = None;
                continue;
            }
            ' ' => {
                line_length += 1;
                last_space = Some((pos, offset));
            }
            _ => line_length += 1,
        }

        if line_length >= width {
            let Some((space_pos, space_offset)) = last_space else {
                return Err(Error::new(ErrorKind::TextTooWide { width }));
            };
            breaks.push(space_offset);
            line_length = pos - space_pos;
            last_space = None;
        }
    }

    Ok(breaks)
}

/// Number of lines in `text`: newlines plus one.
pub fn count_lines(text: &str) -> usize {
    text.bytes().filter(|&b| b == b'\n').count() + 1
}

/// Width in characters of the longest newline-delimited line.
pub fn max_line_width(text: &str) -> usize {
    text.split('\n')
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0)
}
