//! Pane geometry shared by the renderer and click hit-testing.
//!
//! Rows and columns are 1-indexed, matching ANSI cursor addressing.
//!
//! ```text
//! row 1            (blank)
//! row 2            header
//! row 3            border
//! rows 4-6         search box with [ Search ] button
//! row 7            status line
//! row 8            border
//! rows 9..=n-3     results, ITEM_HEIGHT rows per video
//! row n-2          border
//! row n-1          footer
//! ```

/// Row of the header title.
pub const HEADER_ROW: usize = 2;

/// First row of the three-line search box.
pub const SEARCH_BAR_ROW: usize = 4;

pub const SEARCH_BAR_HEIGHT: usize = 3;

pub const STATUS_ROW: usize = 7;

/// First row available to results.
pub const RESULTS_START_ROW: usize = 9;

/// Rows used per rendered video: thumbnail, title, metadata, spacer.
pub const ITEM_HEIGHT: usize = 4;

/// Left indent of result lines.
pub const RESULT_INDENT: usize = 2;

/// Horizontal margin of the search box on each side.
pub const SEARCH_BOX_MARGIN: usize = 5;

pub const SEARCH_BUTTON_LABEL: &str = "[ Search ]";

/// Row of the footer for a pane `rows` tall.
#[must_use]
pub const fn footer_row(rows: usize) -> usize {
    rows.saturating_sub(1)
}

/// Number of rows between the top border and the bottom border.
#[must_use]
pub const fn results_rows(rows: usize) -> usize {
    footer_row(rows).saturating_sub(1).saturating_sub(RESULTS_START_ROW)
}

/// How many result items fit, never less than one.
#[must_use]
pub fn visible_items(rows: usize) -> usize {
    (results_rows(rows) / ITEM_HEIGHT).max(1)
}

/// Inclusive column range of the search button, or `None` if the pane is too narrow.
///
/// The button sits inside the box's right border with one space of padding.
#[must_use]
pub fn search_button_columns(cols: usize) -> Option<(usize, usize)> {
    let inner_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2).saturating_sub(2);
    let label_width = SEARCH_BUTTON_LABEL.chars().count();

    if inner_width < label_width + 2 {
        return None;
    }

    let end = SEARCH_BOX_MARGIN + inner_width;
    Some((end + 1 - label_width, end))
}

/// Whether a 0-based click position from the host lands on the search button.
#[must_use]
pub fn hits_search_button(line: isize, col: usize, cols: usize) -> bool {
    let Ok(line) = usize::try_from(line) else {
        return false;
    };

    let row = line + 1;
    if !(SEARCH_BAR_ROW..SEARCH_BAR_ROW + SEARCH_BAR_HEIGHT).contains(&row) {
        return false;
    }

    search_button_columns(cols).is_some_and(|(start, end)| (start..=end).contains(&(col + 1)))
}

/// Cuts `text` to at most `width` characters, marking the cut with `…`.
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut cut: String = text.chars().take(width - 1).collect();
    cut.push('…');
    cut
}

/// Removes control characters (C0, DEL and C1) from text that reaches the
/// terminal.
///
/// Backend strings are shown as plain text. An `ESC` left in a title would
/// start a cursor or erase sequence, and an `ESC \` in a URL would end the
/// surrounding OSC 8 link.
///
/// # Example
///
/// ```
/// use metastream::ui::layout::strip_controls;
///
/// assert_eq!(strip_controls("evil\u{1b}[2Jtitle"), "evil[2Jtitle");
/// assert_eq!(strip_controls("tab\there"), "tabhere");
/// ```
#[must_use]
pub fn strip_controls(text: &str) -> String {
    text.chars().filter(|c| !c.is_control()).collect()
}
