//! Shared rendering utilities.

/// Positions the cursor at a 1-indexed row and column.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Wraps `text` in an OSC 8 hyperlink to `url`.
///
/// Terminals without OSC 8 support print `text` alone. An empty `url` yields
/// plain text, since an empty target would end the link immediately.
///
/// # Example
///
/// ```
/// use metastream::ui::helpers::hyperlink;
///
/// assert_eq!(hyperlink("", "title"), "title");
/// assert!(hyperlink("http://x/a", "A").starts_with("\u{1b}]8;;http://x/a"));
/// ```
#[must_use]
pub fn hyperlink(url: &str, text: &str) -> String {
    if url.is_empty() {
        return text.to_string();
    }
    format!("\u{1b}]8;;{url}\u{1b}\\{text}\u{1b}]8;;\u{1b}\\")
}

/// Prints `text` centered in `cols` columns, padding both sides.
pub fn print_centered(text: &str, cols: usize) {
    let text_len = text.chars().count().min(cols);
    let padding = cols.saturating_sub(text_len) / 2;

    print!("{}", " ".repeat(padding));
    print!("{text}");
    print!("{}", " ".repeat(cols.saturating_sub(padding + text_len)));
}
