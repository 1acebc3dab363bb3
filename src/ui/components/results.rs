//! Results list renderer.
//!
//! Each video takes [`ITEM_HEIGHT`] rows, in the same order as the rendered
//! node: thumbnail, then the title link, then the metadata line.
//!
//! ```text
//!   ▣ https://img.example/1.jpg
//!   Video title                       (OSC 8 link to the video URL)
//!   Site: s1 | Duration: 1:00 | Views: 5
//! ```

use crate::ui::helpers::{hyperlink, position_cursor};
use crate::ui::layout::{truncate, ITEM_HEIGHT, RESULT_INDENT};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{DisplayItem, ResultsWindow};

/// Marker printed before the thumbnail source.
const THUMBNAIL_MARKER: &str = "▣";

/// Renders the visible items starting at `row` and returns the next free row.
pub fn render_results(row: usize, window: &ResultsWindow, theme: &Theme, cols: usize) -> usize {
    window
        .items
        .iter()
        .fold(row, |current_row, item| render_item(current_row, item, theme, cols))
}

/// `first-last of total` label for the bottom border.
#[must_use]
pub fn position_label(window: &ResultsWindow) -> String {
    if window.items.len() >= window.total {
        return format!("{} videos", window.total);
    }
    format!(
        "{}-{} of {}",
        window.first_index + 1,
        window.first_index + window.items.len(),
        window.total
    )
}

/// The thumbnail source as given, empty included.
fn thumbnail_line(item: &DisplayItem, width: usize) -> String {
    format!("{THUMBNAIL_MARKER} {}", truncate(&item.thumbnail, width))
}

fn render_item(row: usize, item: &DisplayItem, theme: &Theme, cols: usize) -> usize {
    let indent = " ".repeat(RESULT_INDENT);
    let width = cols.saturating_sub(RESULT_INDENT + 2);

    position_cursor(row, 1);
    print!("{indent}");
    print!("{}", Theme::dim());
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", thumbnail_line(item, width));
    print!("{}", Theme::reset());

    position_cursor(row + 1, 1);
    print!("{indent}");
    print!("{}", Theme::bold());
    print!("{}", Theme::underline());
    print!("{}", Theme::fg(&theme.colors.link_fg));
    print!("{}", hyperlink(&item.href, &item.title));
    print!("{}", Theme::reset());

    position_cursor(row + 2, 1);
    print!("{indent}");
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", item.meta);
    print!("{}", Theme::reset());

    row + ITEM_HEIGHT
}
