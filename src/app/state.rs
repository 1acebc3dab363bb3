//! Application state management and view model computation.
//!
//! [`AppState`] is the single owner of everything the pane shows: the page
//! regions the search controller writes, the search lifecycle bookkeeping and
//! the scroll position over rendered results. View models are computed on
//! demand from a state snapshot and the terminal dimensions.
//!
//! # Example
//!
//! ```
//! use metastream::app::AppState;
//! use metastream::ui::Theme;
//!
//! let state = AppState::new("http://127.0.0.1:8080".to_string(), Theme::default(), false);
//! let viewmodel = state.compute_viewmodel(24, 80);
//! assert_eq!(viewmodel.search_bar.query, "");
//! ```

use super::page::{PageState, ResultsRegion, VideoNode};
use super::phase::SearchPhase;
use crate::domain::SearchResult;
use crate::ui::layout;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    DisplayItem, EmptyState, FooterInfo, HeaderInfo, ResultsView, ResultsWindow, SearchBarInfo, StatusInfo,
    StatusTone, UIViewModel,
};

/// Backend statistics from the last successful search, shown in the footer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub failed_sites: Vec<String>,
    pub search_time_ms: Option<u64>,
}

impl From<&SearchResult> for SearchStats {
    fn from(result: &SearchResult) -> Self {
        Self {
            failed_sites: result.failed_sites.clone(),
            search_time_ms: result.search_time_ms,
        }
    }
}

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Query input, status line and results container.
    pub page: PageState,

    /// Lifecycle of the most recent search, for presentation only.
    pub phase: SearchPhase,

    pub theme: Theme,

    /// Backend base URL without trailing slash.
    pub endpoint: String,

    /// Drop responses older than the most recently issued request.
    ///
    /// Off by default: overlapping searches then resolve last-response-wins.
    pub ignore_stale_responses: bool,

    /// Outcome of the web access permission request, `None` until answered.
    pub web_access: Option<bool>,

    /// Generation of the most recently issued request (0 before the first).
    pub last_generation: u64,

    /// Requests issued whose response has not arrived yet.
    pub in_flight: usize,

    /// Index of the first result item shown.
    pub scroll_offset: usize,

    pub last_stats: Option<SearchStats>,

    /// Last known pane size as `(rows, cols)`, used for hit-testing clicks.
    pub viewport: (usize, usize),
}

impl AppState {
    /// Creates a new application state with an empty page.
    #[must_use]
    pub fn new(endpoint: String, theme: Theme, ignore_stale_responses: bool) -> Self {
        Self {
            page: PageState::default(),
            phase: SearchPhase::Idle,
            theme,
            endpoint,
            ignore_stale_responses,
            web_access: None,
            last_generation: 0,
            in_flight: 0,
            scroll_offset: 0,
            last_stats: None,
            viewport: (0, 0),
        }
    }

    /// Whether a response for `generation` has been overtaken by a newer request.
    #[must_use]
    pub const fn is_stale(&self, generation: u64) -> bool {
        generation < self.last_generation
    }

    /// Number of result items that fit in the current viewport.
    #[must_use]
    pub fn page_size(&self) -> usize {
        layout::visible_items(self.viewport.0)
    }

    /// Scrolls towards later results, clamped to the last full page.
    pub fn scroll_down(&mut self, by: usize) {
        let max_offset = self.page.results.item_count().saturating_sub(self.page_size());
        self.scroll_offset = self.scroll_offset.saturating_add(by).min(max_offset);
    }

    /// Scrolls towards the first result.
    pub fn scroll_up(&mut self, by: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(by);
    }

    /// Computes a renderable UI view model from current state and terminal dimensions.
    ///
    /// Windowing keeps `scroll_offset` as the first visible item, pulled back
    /// if the viewport grew so that the last page stays full.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let _span = tracing::trace_span!("compute_viewmodel", rows = rows, cols = cols).entered();

        UIViewModel {
            header: Self::compute_header(),
            search_bar: self.compute_search_bar(),
            status: self.compute_status(),
            results: self.compute_results(rows, cols),
            footer: self.compute_footer(),
        }
    }

    fn compute_header() -> HeaderInfo {
        HeaderInfo {
            title: " MetaStream Video Search ".to_string(),
        }
    }

    fn compute_search_bar(&self) -> SearchBarInfo {
        SearchBarInfo {
            query: layout::strip_controls(self.page.query.text()),
            button_label: layout::SEARCH_BUTTON_LABEL,
        }
    }

    fn compute_status(&self) -> StatusInfo {
        let tone = match self.phase {
            SearchPhase::Idle => StatusTone::Neutral,
            SearchPhase::Searching => StatusTone::Busy,
            SearchPhase::Succeeded => StatusTone::Success,
            SearchPhase::Failed => StatusTone::Error,
        };

        StatusInfo {
            text: layout::strip_controls(&self.page.status),
            tone,
        }
    }

    fn compute_results(&self, rows: usize, cols: usize) -> ResultsView {
        match &self.page.results {
            ResultsRegion::Empty => ResultsView::Blank,
            ResultsRegion::Text(message) => ResultsView::Message(EmptyState {
                message: message.clone(),
            }),
            ResultsRegion::Items(nodes) => {
                let capacity = layout::visible_items(rows);
                let first = self.scroll_offset.min(nodes.len().saturating_sub(capacity));
                let last = (first + capacity).min(nodes.len());
                let width = cols.saturating_sub(layout::RESULT_INDENT);

                let items = nodes[first..last]
                    .iter()
                    .map(|node| Self::compute_display_item(node, width))
                    .collect();

                ResultsView::Items(ResultsWindow {
                    items,
                    first_index: first,
                    total: nodes.len(),
                })
            }
        }
    }

    /// Flattens a result node into display strings fitted to `width` columns.
    ///
    /// Every field comes from the backend, so control characters are removed
    /// before truncation.
    fn compute_display_item(node: &VideoNode, width: usize) -> DisplayItem {
        let fit = |text: &str| layout::truncate(&layout::strip_controls(text), width);

        DisplayItem {
            title: fit(&node.details.link.text),
            href: layout::strip_controls(&node.details.link.href),
            meta: fit(&node.details.meta.text),
            thumbnail: fit(&node.thumbnail.src),
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let stats = self.last_stats.as_ref().and_then(|stats| {
            let mut parts = Vec::new();
            if !stats.failed_sites.is_empty() {
                let failed = layout::strip_controls(&stats.failed_sites.join(", "));
                parts.push(format!("failed: {failed}"));
            }
            if let Some(ms) = stats.search_time_ms {
                parts.push(format!("{ms} ms"));
            }
            (!parts.is_empty()).then(|| parts.join("  "))
        });

        FooterInfo {
            keybindings: "Enter: search  Ctrl+u: clear  Up/Down PgUp/PgDn: scroll  Esc: close".to_string(),
            stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::page::{render_video, Page};
    use crate::domain::VideoItem;

    fn state_with_items(count: usize) -> AppState {
        let mut state = AppState::new("http://x".to_string(), Theme::default(), false);
        for i in 0..count {
            let video = VideoItem::new(format!("video {i}"), format!("http://x/{i}"), "s", "1:00", 1_u64);
            state.page.append_result(render_video(&video));
        }
        state
    }

    #[test]
    fn scroll_is_clamped_to_last_page() {
        let mut state = state_with_items(10);
        state.viewport = (24, 80);
        let page = state.page_size();
        assert!(page < 10);

        state.scroll_down(100);
        assert_eq!(state.scroll_offset, 10 - page);

        state.scroll_up(100);
        assert_eq!(state.scroll_offset, 0);
    }

    #[test]
    fn scroll_with_few_items_stays_at_top() {
        let mut state = state_with_items(1);
        state.viewport = (60, 80);
        state.scroll_down(3);
        assert_eq!(state.scroll_offset, 0);
    }

    #[test]
    fn viewmodel_windows_items_in_order() {
        let mut state = state_with_items(10);
        state.viewport = (24, 80);
        state.scroll_down(2);

        let ResultsView::Items(window) = state.compute_viewmodel(24, 80).results else {
            panic!("expected items");
        };
        assert_eq!(window.first_index, 2);
        assert_eq!(window.total, 10);
        assert_eq!(window.items[0].title, "video 2");
        assert_eq!(window.items[0].href, "http://x/2");
        assert_eq!(window.items[0].meta, "Site: s | Duration: 1:00 | Views: 1");
    }

    #[test]
    fn viewmodel_shows_results_text() {
        let mut state = state_with_items(0);
        state.page.show_results_text("No results found.");

        let ResultsView::Message(empty) = state.compute_viewmodel(24, 80).results else {
            panic!("expected message");
        };
        assert_eq!(empty.message, "No results found.");
    }

    #[test]
    fn footer_lists_backend_stats() {
        let mut state = state_with_items(0);
        assert!(state.compute_viewmodel(24, 80).footer.stats.is_none());

        state.last_stats = Some(SearchStats {
            failed_sites: vec!["a".to_string(), "b".to_string()],
            search_time_ms: Some(42),
        });
        assert_eq!(
            state.compute_viewmodel(24, 80).footer.stats.as_deref(),
            Some("failed: a, b  42 ms")
        );
    }

    #[test]
    fn backend_control_sequences_never_reach_the_terminal() {
        use crate::app::controller::complete_search;
        use crate::client::interpret_response;
        use crate::ui::helpers::hyperlink;

        let body = br#"{"total_results":1,"scraped_sites":1,"videos":[
            {"title":"evil\u001b[2J\u001b[Hpwn","url":"http://x/a\u001b\\",
             "thumbnail":"http://img\u0007","site":"s\u009b1","duration":"1:00","views":"5"}]}"#;
        let mut state = state_with_items(0);
        complete_search(&mut state.page, interpret_response(200, body));

        let ResultsView::Items(window) = state.compute_viewmodel(24, 80).results else {
            panic!("expected items");
        };
        let item = &window.items[0];
        assert_eq!(item.title, "evil[2J[Hpwn");
        assert_eq!(item.href, "http://x/a\\");
        assert_eq!(item.thumbnail, "http://img");
        assert_eq!(item.meta, "Site: s1 | Duration: 1:00 | Views: 5");

        let link = hyperlink(&item.href, &item.title);
        assert_eq!(link, "\u{1b}]8;;http://x/a\\\u{1b}\\evil[2J[Hpwn\u{1b}]8;;\u{1b}\\");
        assert_eq!(link.matches('\u{1b}').count(), 4);
    }

    #[test]
    fn status_text_is_stripped_of_controls() {
        let mut state = state_with_items(0);
        state.page.set_status("Error during search: bad \u{1b}[31mvalue");
        assert_eq!(state.compute_viewmodel(24, 80).status.text, "Error during search: bad [31mvalue");
    }

    #[test]
    fn status_tone_follows_phase() {
        let mut state = state_with_items(0);
        state.page.set_status("Searching...");
        state.phase = SearchPhase::Searching;

        let status = state.compute_viewmodel(24, 80).status;
        assert_eq!(status.text, "Searching...");
        assert_eq!(status.tone, StatusTone::Busy);
    }

    #[test]
    fn stale_generations() {
        let mut state = state_with_items(0);
        state.last_generation = 3;
        assert!(state.is_stale(2));
        assert!(!state.is_stale(3));
    }
}
