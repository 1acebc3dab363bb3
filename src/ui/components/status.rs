//! Status line component renderer.

use crate::ui::helpers::position_cursor;
use crate::ui::layout::{truncate, SEARCH_BOX_MARGIN};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::StatusInfo;

/// Renders the status text aligned with the search box and returns the next row.
pub fn render_status(row: usize, status: &StatusInfo, theme: &Theme, cols: usize) -> usize {
    let width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let text = truncate(&status.text, width);

    position_cursor(row, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN + 1));
    print!("{}", Theme::fg(theme.colors.status(status.tone)));
    print!("{text}");
    print!("{}", " ".repeat(cols.saturating_sub(SEARCH_BOX_MARGIN + 1 + text.chars().count())));
    print!("{}", Theme::reset());
    row + 1
}
