//! Composable UI component renderers.
//!
//! # Components
//!
//! - [`header`]: Title bar
//! - [`search`]: Search input box with its button
//! - [`status`]: Status line under the search box
//! - [`results`]: Video list
//! - [`empty`]: Plain message in place of results
//! - [`footer`]: Keybinding hints and backend statistics
//!
//! [`render_layout`] stacks them as described in [`crate::ui::layout`].

mod empty;
mod footer;
mod header;
mod results;
mod search;
mod status;

use crate::ui::helpers::position_cursor;
use crate::ui::layout;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ResultsView, UIViewModel};

use empty::render_empty_state;
use footer::render_footer;
use header::render_header;
use results::{position_label, render_results};
use search::render_search_bar;
use status::render_status;

/// Renders a horizontal border line and returns the next row.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    render_labeled_border(row, color, cols, None)
}

/// Border with an optional right-aligned label, e.g. `──── 4-6 of 10 ──`.
fn render_labeled_border(row: usize, color: &str, cols: usize, label: Option<&str>) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    match label {
        Some(label) if label.chars().count() + 6 <= cols => {
            let label_len = label.chars().count() + 2;
            print!("{}", "─".repeat(cols - label_len - 2));
            print!(" {label} ");
            print!("──");
        }
        _ => print!("{}", "─".repeat(cols)),
    }
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the full pane.
///
/// ```text
/// [blank line]
/// [Header]
/// [Border]
/// [Search Bar - 3 lines]
/// [Status]
/// [Border]
/// [Results or message]
/// [Border with position]
/// [Footer]
/// ```
pub fn render_layout(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = layout::HEADER_ROW;

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    current_row = render_search_bar(current_row, &vm.search_bar, theme, cols);
    current_row = render_status(current_row, &vm.status, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);

    let label = match &vm.results {
        ResultsView::Blank => None,
        ResultsView::Message(empty) => {
            render_empty_state(current_row, empty, theme, cols);
            None
        }
        ResultsView::Items(window) => {
            render_results(current_row, window, theme, cols);
            Some(position_label(window))
        }
    };

    let footer_row = layout::footer_row(rows);
    let border_row = footer_row.saturating_sub(1);

    render_labeled_border(border_row, &theme.colors.border, cols, label.as_deref());
    render_footer(footer_row, &vm.footer, theme, cols);
}
