//! Search bar component renderer.
//!
//! ```text
//! [margin] ┌──────────────────────────────────┐ [margin]
//! [margin] │ Search: cats▏         [ Search ] │ [margin]
//! [margin] └──────────────────────────────────┘ [margin]
//! ```
//!
//! Button placement comes from [`layout::search_button_columns`] so clicks
//! and rendering agree. When the pane is too narrow for the button, only the
//! query is drawn.

use crate::ui::helpers::position_cursor;
use crate::ui::layout::{self, SEARCH_BOX_MARGIN};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

const PROMPT: &str = " Search: ";
const CURSOR: char = '▏';

/// Renders the three-line search box at `row` and returns the next row.
pub fn render_search_bar(row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let button = layout::search_button_columns(cols);
    let button_width = button.map_or(0, |(start, end)| end - start + 2);

    position_cursor(row, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(&theme.colors.search_bar_border));
    print!("┌{}┐", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    let query_width = inner_width.saturating_sub(PROMPT.len() + button_width + 1);
    let query = visible_tail(&search.query, query_width);
    let text_len = PROMPT.len() + query.chars().count() + 1;

    position_cursor(row + 1, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(&theme.colors.search_bar_border));
    print!("│");
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print!("{PROMPT}{query}{CURSOR}");
    print!("{}", " ".repeat(inner_width.saturating_sub(text_len + button_width)));
    if button.is_some() {
        print!("{}", Theme::bold());
        print!("{}", Theme::fg(&theme.colors.button_fg));
        print!("{}", Theme::bg(&theme.colors.button_bg));
        print!("{}", search.button_label);
        print!("{}", Theme::reset());
        print!(" ");
    }
    print!("{}", Theme::fg(&theme.colors.search_bar_border));
    print!("│");
    print!("{}", Theme::reset());

    position_cursor(row + 2, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(&theme.colors.search_bar_border));
    print!("└{}┘", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    row + layout::SEARCH_BAR_HEIGHT
}

/// Last `width` characters of `text`, so the end of a long query stays visible.
fn visible_tail(text: &str, width: usize) -> &str {
    let count = text.chars().count();
    if count <= width {
        return text;
    }
    let skip = count - width;
    text.char_indices().nth(skip).map_or("", |(index, _)| &text[index..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tail_keeps_end_of_query() {
        assert_eq!(visible_tail("short", 10), "short");
        assert_eq!(visible_tail("a long query", 5), "query");
        assert_eq!(visible_tail("café", 2), "fé");
        assert_eq!(visible_tail("abc", 0), "");
    }
}
