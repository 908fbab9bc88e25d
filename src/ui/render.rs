use crate::ui::layout::Layout;
use crate::ui::state::{Redraw, ScreenState};
use crate::ui::surface::{Emphasis, Surface};
use ratatui::layout::{Position, Rect};
use ratatui::symbols::line;

const BANNER: &str = "PERSONAL TERMINAL";
const FOLDERS_LABEL: &str = "FOLDERS";
const STATUS_HELP: &str = "UP, DOWN: select folder | LEFT, RIGHT: scroll | q: exit";

/// Draw the whole personal terminal from scratch.
pub fn render<S: Surface + ?Sized>(surface: &mut S, layout: &Layout, state: &ScreenState) {
    surface.clear(layout.screen);
    render_static(surface, layout);

    for (i, entry) in state.entries().iter().enumerate() {
        let area = layout.folders[i];
        surface.set_emphasis(Emphasis::Normal);
        surface.draw_text(at(area, 1, 1), &entry.folder, inner_width(area));
        render_folder_outline(surface, layout, state, i);
    }

    render_elbow(surface, layout, state);
    render_content_title(surface, layout, state);
    render_content_text(surface, layout, state);
}

/// Redraw only the panes a transition touched.
pub fn apply<S: Surface + ?Sized>(
    surface: &mut S,
    layout: &Layout,
    state: &ScreenState,
    redraw: Redraw,
) {
    match redraw {
        Redraw::None => {}
        Redraw::ContentText => render_content_text(surface, layout, state),
        Redraw::Selection { previous } => {
            render_elbow(surface, layout, state);
            render_content_text(surface, layout, state);
            render_content_title(surface, layout, state);
            render_folder_outline(surface, layout, state, previous);
            render_folder_outline(surface, layout, state, state.selected());
        }
    }
}

/// Banner, folder heading and key help. Drawn once, never cleared.
fn render_static<S: Surface + ?Sized>(surface: &mut S, layout: &Layout) {
    let banner = layout.banner;
    surface.set_emphasis(Emphasis::Reverse);
    let filled = format!("{:<width$}", BANNER, width = usize::from(banner.width));
    surface.draw_text(banner.as_position(), &filled, banner.width);

    surface.set_emphasis(Emphasis::Normal);
    surface.draw_text(layout.folders_label, FOLDERS_LABEL, layout.screen.width);

    surface.set_emphasis(Emphasis::Dim);
    surface.draw_text(layout.status.as_position(), STATUS_HELP, layout.status.width);
    surface.set_emphasis(Emphasis::Normal);
}

/// Folder border only; the label inside is left alone. The selected folder
/// is bold and carries the tee the connector attaches to.
fn render_folder_outline<S: Surface + ?Sized>(
    surface: &mut S,
    layout: &Layout,
    state: &ScreenState,
    index: usize,
) {
    let area = layout.folders[index];
    let selected = index == state.selected();
    surface.set_emphasis(if selected {
        Emphasis::Bold
    } else {
        Emphasis::Dim
    });
    surface.draw_box(area);
    if selected {
        surface.draw_text(at(area, area.width - 1, 1), line::VERTICAL_RIGHT, 1);
    }
    surface.set_emphasis(Emphasis::Normal);
}

/// The connector from the content title down to the selected folder.
fn render_elbow<S: Surface + ?Sized>(surface: &mut S, layout: &Layout, state: &ScreenState) {
    let area = layout.elbow;
    surface.clear(area);
    surface.set_emphasis(Emphasis::Bold);
    surface.draw_text(at(area, 2, 1), line::HORIZONTAL, 1);
    surface.draw_text(at(area, 1, 1), line::TOP_LEFT, 1);

    let turn = layout.connector_row(state.selected());
    for row in 2..turn {
        surface.draw_text(at(area, 1, row), line::VERTICAL, 1);
    }
    surface.draw_text(at(area, 1, turn), line::BOTTOM_RIGHT, 1);
    surface.draw_text(at(area, 0, turn), line::HORIZONTAL, 1);
    surface.set_emphasis(Emphasis::Normal);
}

fn render_content_title<S: Surface + ?Sized>(
    surface: &mut S,
    layout: &Layout,
    state: &ScreenState,
) {
    let area = layout.content_title;
    surface.clear(area);
    surface.draw_box(area);
    surface.draw_text(at(area, 0, 1), line::VERTICAL_LEFT, 1);
    surface.draw_text(
        at(area, 1, 1),
        &state.selected_entry().title,
        inner_width(area),
    );
}

fn render_content_text<S: Surface + ?Sized>(
    surface: &mut S,
    layout: &Layout,
    state: &ScreenState,
) {
    let area = layout.content_text;
    surface.clear(area);
    surface.draw_box(area);
    for (row, text) in (1..).zip(state.viewport()) {
        surface.draw_text(at(area, 1, row), text, inner_width(area));
    }
}

fn at(area: Rect, x: u16, y: u16) -> Position {
    Position::new(area.x + x, area.y + y)
}

fn inner_width(area: Rect) -> u16 {
    area.width.saturating_sub(2)
}
