//! Footer component renderer.
//!
//! Keybinding hints sit on the left, backend statistics from the last search
//! on the right. Hints are dropped first when the pane is too narrow for both.

use crate::ui::helpers::position_cursor;
use crate::ui::layout::truncate;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

/// Renders the footer at `row` and returns the next row.
pub fn render_footer(row: usize, footer: &FooterInfo, theme: &Theme, cols: usize) -> usize {
    let stats = footer
        .stats
        .as_deref()
        .map(|stats| truncate(stats, cols.saturating_sub(2)))
        .unwrap_or_default();
    let stats_len = stats.chars().count();

    let hints_width = cols.saturating_sub(stats_len + 3);
    let hints = truncate(&footer.keybindings, hints_width);
    let hints_len = hints.chars().count();

    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!(" {hints}");
    print!("{}", " ".repeat(cols.saturating_sub(hints_len + stats_len + 2)));
    print!("{stats} ");
    print!("{}", Theme::reset());
    row + 1
}
