//! View model types representing renderable UI state.
//!
//! View models are created via `AppState::compute_viewmodel()` and consumed by
//! the renderer. They contain no business logic, only display-ready data:
//! text is already truncated to the pane width.

/// Complete UI view model for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    pub header: HeaderInfo,
    pub search_bar: SearchBarInfo,
    pub status: StatusInfo,
    pub results: ResultsView,
    pub footer: FooterInfo,
}

/// Header display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
}

/// Search box contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    /// Current query text, untrimmed.
    pub query: String,
    pub button_label: &'static str,
}

/// How the status line should be coloured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Neutral,
    Busy,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusInfo {
    pub text: String,
    pub tone: StatusTone,
}

/// What the results area shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultsView {
    /// Nothing, before the first search or while searching.
    Blank,
    /// Plain text in place of results.
    Message(EmptyState),
    Items(ResultsWindow),
}

/// Plain text shown in the results area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
}

/// The slice of results that fits in the pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsWindow {
    pub items: Vec<DisplayItem>,
    /// Index of `items[0]` among all results.
    pub first_index: usize,
    pub total: usize,
}

/// Display strings for one video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    /// Link text (the video title).
    pub title: String,
    /// Link target, never truncated.
    pub href: String,
    /// `Site: … | Duration: … | Views: …`
    pub meta: String,
    /// Thumbnail source, possibly empty.
    pub thumbnail: String,
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Keybinding help text.
    pub keybindings: String,
    /// Backend statistics from the last successful search.
    pub stats: Option<String>,
}
