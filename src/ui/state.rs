//! # Selection and Scroll State
//!
//! [`ScreenState`] holds the folder entries and the `(selected, scroll)` pair.
//! Every transition is a plain method that returns a [`Redraw`] naming the
//! panes whose contents changed, so the caller can redraw exactly those.

use crate::error::{Error, ErrorKind, Result, ResultExt};
use crate::ui::layout::FOLDER_COUNT;
use crate::wrap;

/// Most entries a screen can show.
pub const MAX_ENTRIES: usize = FOLDER_COUNT as usize;

/// One selectable folder: label, title, and body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderEntry {
    pub folder: String,
    pub title: String,
    text: String,
    line_count: usize,
}

impl FolderEntry {
    pub fn new(folder: impl Into<String>, title: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        let line_count = wrap::count_lines(&text);
        Self {
            folder: folder.into(),
            title: title.into(),
            text,
            line_count,
        }
    }

    /// Reflow the body text to `width` columns in place.
    pub fn wrap(&mut self, width: usize) -> Result<()> {
        self.line_count = wrap::wrap(&mut self.text, width)?;
        Ok(())
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn line_count(&self) -> usize {
        self.line_count
    }
}

/// Panes that need redrawing after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redraw {
    /// Nothing changed.
    None,
    /// Only the content text pane.
    ContentText,
    /// The selection moved away from folder `previous`: connector, content
    /// title, content text and both affected folder outlines.
    Selection { previous: usize },
}

/// Entries plus the current selection and scroll offset.
#[derive(Debug)]
pub struct ScreenState {
    entries: Vec<FolderEntry>,
    selected: usize,
    scroll: usize,
    visible_height: usize,
}

impl ScreenState {
    /// Wrap every entry to `text_width` and start at the first entry, unscrolled.
    pub fn new(
        mut entries: Vec<FolderEntry>,
        text_width: usize,
        visible_height: usize,
    ) -> Result<Self> {
        if entries.is_empty() {
            return Err(Error::config_invalid("at least one folder entry is required"));
        }
        if entries.len() > MAX_ENTRIES {
            return Err(Error::new(ErrorKind::TooManyEntries {
                count: entries.len(),
                max: MAX_ENTRIES,
            }));
        }
        for entry in &mut entries {
            entry
                .wrap(text_width)
                .mark(format!("wrapping text of folder {:?}", entry.folder))?;
        }
        tracing::debug!(
            entries = entries.len(),
            text_width,
            visible_height,
            "screen state ready"
        );

        Ok(Self {
            entries,
            selected: 0,
            scroll: 0,
            visible_height,
        })
    }

    pub fn entries(&self) -> &[FolderEntry] {
        &self.entries
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn visible_height(&self) -> usize {
        self.visible_height
    }

    pub fn selected_entry(&self) -> &FolderEntry {
        &self.entries[self.selected]
    }

    /// Select entry `index`. Out of range is a no-op.
    pub fn select(&mut self, index: usize) -> Redraw {
        if index >= self.entries.len() {
            return Redraw::None;
        }
        let previous = self.selected;
        self.selected = index;
        self.scroll = 0;
        tracing::debug!(previous, selected = index, "selection changed");
        Redraw::Selection { previous }
    }

    pub fn select_previous(&mut self) -> Redraw {
        match self.selected.checked_sub(1) {
            Some(index) => self.select(index),
            None => Redraw::None,
        }
    }

    pub fn select_next(&mut self) -> Redraw {
        self.select(self.selected + 1)
    }

    pub fn scroll_up(&mut self) -> Redraw {
        if self.scroll == 0 {
            return Redraw::None;
        }
        self.scroll -= 1;
        Redraw::ContentText
    }

    /// Scroll one line down unless the last line is already visible.
    pub fn scroll_down(&mut self) -> Redraw {
        if self.scroll + self.visible_height >= self.selected_entry().line_count() {
            return Redraw::None;
        }
        self.scroll += 1;
        Redraw::ContentText
    }

    /// Lines of the selected entry currently in view, top to bottom.
    pub fn viewport(&self) -> impl Iterator<Item = &str> {
        self.selected_entry()
            .text()
            .split('\n')
            .skip(self.scroll)
            .take(self.visible_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(folder: &str, text: &str) -> FolderEntry {
        FolderEntry::new(folder, format!("{folder} title"), text)
    }

    fn numbered_lines(count: usize) -> String {
        (1..=count)
            .map(|n| format!("line {n}"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn state_with(texts: &[&str], visible_height: usize) -> ScreenState {
        let entries = texts
            .iter()
            .enumerate()
            .map(|(i, text)| entry(&format!("F{i}"), text))
            .collect();
        ScreenState::new(entries, 40, visible_height).expect("valid state")
    }

    #[test]
    fn test_new_wraps_entries() {
        let state = state_with(&["a b c d e f g"], 3);
        assert_eq!(state.entries()[0].line_count(), 1);

        let entries = vec![entry("F", "a b c d e f g")];
        let state = ScreenState::new(entries, 5, 3).expect("valid state");
        assert_eq!(state.selected_entry().text(), "a b\nc d\ne f\ng");
        assert_eq!(state.selected_entry().line_count(), 4);
    }

    #[test]
    fn test_new_rejects_bad_entry_counts() {
        let err = ScreenState::new(Vec::new(), 40, 5).expect_err("empty");
        assert!(matches!(err.kind(), ErrorKind::ConfigInvalid { .. }));

        let entries = (0..5).map(|i| entry(&i.to_string(), "")).collect();
        let err = ScreenState::new(entries, 40, 5).expect_err("too many");
        assert!(matches!(
            err.kind(),
            ErrorKind::TooManyEntries { count: 5, max: 4 }
        ));
    }

    #[test]
    fn test_new_reports_unwrappable_entry() {
        let entries = vec![entry("ok", "fine"), entry("bad", &"x".repeat(50))];
        let err = ScreenState::new(entries, 40, 5).expect_err("too wide");
        assert!(matches!(err.kind(), ErrorKind::TextTooWide { width: 40 }));
        assert!(err.trace().frames().len() >= 2);
    }

    #[test]
    fn test_down_three_times_then_stops() {
        let mut state = state_with(&["a", "b", "c", "d"], 5);
        for expected in 1..=3 {
            assert_eq!(
                state.select_next(),
                Redraw::Selection {
                    previous: expected - 1
                }
            );
            assert_eq!(state.selected(), expected);
        }
        assert_eq!(state.select_next(), Redraw::None);
        assert_eq!(state.selected(), 3);
    }

    #[test]
    fn test_up_at_top_is_noop() {
        let mut state = state_with(&["a", "b"], 5);
        assert_eq!(state.select_previous(), Redraw::None);
        assert_eq!(state.selected(), 0);
    }

    #[test]
    fn test_select_out_of_range_keeps_state() {
        let lines = numbered_lines(20);
        let mut state = state_with(&[lines.as_str(), "b"], 5);
        state.scroll_down();
        state.scroll_down();
        assert_eq!(state.select(2), Redraw::None);
        assert_eq!(state.select(usize::MAX), Redraw::None);
        assert_eq!((state.selected(), state.scroll()), (0, 2));
    }

    #[test]
    fn test_select_resets_scroll() {
        let lines = numbered_lines(20);
        let mut state = state_with(&[lines.as_str(), lines.as_str()], 5);
        state.scroll_down();
        assert_eq!(state.scroll(), 1);
        assert_eq!(state.select(1), Redraw::Selection { previous: 0 });
        assert_eq!(state.scroll(), 0);
    }

    #[test]
    fn test_scroll_up_at_zero_is_noop() {
        let mut state = state_with(&[numbered_lines(20).as_str()], 5);
        assert_eq!(state.scroll_up(), Redraw::None);
        state.scroll_down();
        assert_eq!(state.scroll_up(), Redraw::ContentText);
        assert_eq!(state.scroll(), 0);
    }

    #[test]
    fn test_scroll_down_clamps_at_last_page() {
        let mut state = state_with(&[numbered_lines(8).as_str()], 5);
        for _ in 0..3 {
            assert_eq!(state.scroll_down(), Redraw::ContentText);
        }
        assert_eq!(state.scroll(), 3);
        for _ in 0..4 {
            assert_eq!(state.scroll_down(), Redraw::None);
        }
        assert_eq!(state.scroll(), 3);
        assert_eq!(state.viewport().last(), Some("line 8"));
    }

    #[test]
    fn test_scroll_down_noop_when_content_fits() {
        let mut state = state_with(&["short"], 5);
        assert_eq!(state.scroll_down(), Redraw::None);
        assert_eq!(state.scroll(), 0);
    }

    #[test]
    fn test_viewport_window() {
        let mut state = state_with(&[numbered_lines(8).as_str()], 3);
        assert_eq!(
            state.viewport().collect::<Vec<_>>(),
            vec!["line 1", "line 2", "line 3"]
        );
        state.scroll_down();
        state.scroll_down();
        assert_eq!(
            state.viewport().collect::<Vec<_>>(),
            vec!["line 3", "line 4", "line 5"]
        );
    }

    #[test]
    fn test_viewport_includes_unterminated_tail() {
        let state = state_with(&["one\ntwo\nthree"], 10);
        assert_eq!(
            state.viewport().collect::<Vec<_>>(),
            vec!["one", "two", "three"]
        );
    }

    #[test]
    fn test_viewport_empty_when_scrolled_past_content() {
        let mut state = state_with(&["one\ntwo"], 1);
        state.scroll = 5;
        assert_eq!(state.viewport().count(), 0);
    }
}
