//! Event handling and state transition logic.
//!
//! The handler turns input and host events into state changes plus a list of
//! [`Action`]s for the plugin runtime to execute. It never talks to Zellij.
//!
//! # Event Types
//!
//! - **Input**: `Char`, `Backspace`, `ClearQuery`, `Submit`, `Click`
//! - **Scrolling**: `ScrollUp`, `ScrollDown`, `PageUp`, `PageDown`
//! - **Host**: `SearchResponse`, `PermissionsResult`, `CloseFocus`
//!
//! # Example
//!
//! ```
//! use metastream::app::{handle_event, Action, AppState, Event};
//! use metastream::ui::Theme;
//!
//! let mut state = AppState::new("http://127.0.0.1:8080".to_string(), Theme::default(), false);
//! for c in "cats".chars() {
//!     handle_event(&mut state, &Event::Char(c))?;
//! }
//! let (_, actions) = handle_event(&mut state, &Event::Submit)?;
//! assert!(matches!(actions.as_slice(), [Action::SendRequest(_)]));
//! # Ok::<(), metastream::domain::MetaStreamError>(())
//! ```

use super::controller;
use super::phase::SearchPhase;
use super::state::SearchStats;
use crate::app::{Action, AppState};
use crate::client;
use crate::domain::error::Result;
use crate::domain::SearchError;
use crate::ui::layout;

/// Events triggered by user input or delivered by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Appends a character to the query input.
    Char(char),
    /// Removes the last character from the query input.
    Backspace,
    /// Empties the query input.
    ClearQuery,
    /// Runs a search with the current query (Enter).
    Submit,
    /// Left click at a 0-based pane position.
    Click { line: isize, col: usize },

    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,

    /// Hides the plugin pane.
    CloseFocus,

    /// Response to an earlier [`Action::SendRequest`].
    ///
    /// `status` and `body` are passed through untouched. `generation` is
    /// recovered from the request context the host echoes back.
    SearchResponse {
        status: u16,
        body: Vec<u8>,
        generation: u64,
    },

    /// Answer to the web access permission request.
    PermissionsResult {
        granted: bool,
    },
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// # Parameters
///
/// * `state` - Application state, updated in place
/// * `event` - Input or host event mapped by the plugin shim
///
/// # Returns
///
/// `(should_render, actions)`. `should_render` is `true` when the pane needs a
/// re-render. `actions` are side effects for the shim to run in order, at most
/// one [`Action::SendRequest`] per event.
///
/// # Search Responses
///
/// A [`Event::SearchResponse`] always releases one in-flight request. With
/// `ignore_stale_responses` set, a response whose generation is older than the
/// latest submit is dropped without touching the page. Otherwise every
/// response is applied in arrival order.
///
/// # Example
///
/// ```
/// use metastream::app::{handle_event, AppState, Event};
/// use metastream::ui::Theme;
///
/// let mut state = AppState::new("http://127.0.0.1:8080".to_string(), Theme::default(), false);
/// let (render, actions) = handle_event(&mut state, &Event::Submit)?;
///
/// assert!(render);
/// assert!(actions.is_empty());
/// assert_eq!(state.page.status, "Please enter a search term.");
/// # Ok::<(), metastream::domain::MetaStreamError>(())
/// ```
///
/// # Errors
///
/// Currently infallible; the `Result` leaves room for handlers that touch
/// fallible state.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::Char(c) => {
            state.page.query.push(*c);
            tracing::trace!(query = %state.page.query.text(), char = %c, "query updated");
            Ok((true, vec![]))
        }
        Event::Backspace => {
            state.page.query.pop();
            Ok((true, vec![]))
        }
        Event::ClearQuery => {
            state.page.query.clear();
            Ok((true, vec![]))
        }
        Event::Submit => Ok(submit(state)),
        Event::Click { line, col } => {
            if layout::hits_search_button(*line, *col, state.viewport.1) {
                tracing::debug!(line = line, col = col, "search button clicked");
                Ok(submit(state))
            } else {
                Ok((false, vec![]))
            }
        }
        Event::ScrollUp => {
            state.scroll_up(1);
            Ok((true, vec![]))
        }
        Event::ScrollDown => {
            state.scroll_down(1);
            Ok((true, vec![]))
        }
        Event::PageUp => {
            state.scroll_up(state.page_size());
            Ok((true, vec![]))
        }
        Event::PageDown => {
            state.scroll_down(state.page_size());
            Ok((true, vec![]))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::SearchResponse {
            status,
            body,
            generation,
        } => {
            state.in_flight = state.in_flight.saturating_sub(1);

            if state.ignore_stale_responses && state.is_stale(*generation) {
                tracing::debug!(
                    generation = generation,
                    latest = state.last_generation,
                    "discarding stale search response"
                );
                return Ok((false, vec![]));
            }

            let outcome = client::interpret_response(*status, body);
            match &outcome {
                Ok(result) => {
                    tracing::info!(
                        generation = generation,
                        total_results = result.total_results,
                        scraped_sites = result.scraped_sites,
                        videos = result.videos.len(),
                        "search completed"
                    );
                    state.phase = SearchPhase::Succeeded;
                    state.last_stats = Some(SearchStats::from(result));
                    state.scroll_offset = 0;
                }
                Err(error) => {
                    tracing::warn!(generation = generation, status = status, error = %error, "search failed");
                    state.phase = SearchPhase::Failed;
                }
            }

            controller::complete_search(&mut state.page, outcome);
            Ok((true, vec![]))
        }
        Event::PermissionsResult { granted } => {
            tracing::debug!(granted = granted, "web access permission answered");
            state.web_access = Some(*granted);
            Ok((false, vec![]))
        }
    }
}

/// Starts a search from the query input, issuing a request unless blocked.
fn submit(state: &mut AppState) -> (bool, Vec<Action>) {
    let generation = state.last_generation + 1;

    let Some(request) = controller::perform_search(&mut state.page, &state.endpoint, generation) else {
        state.phase = SearchPhase::Idle;
        return (true, vec![]);
    };

    state.scroll_offset = 0;
    state.last_stats = None;

    if state.web_access == Some(false) {
        controller::report_failure(&mut state.page, &SearchError::PermissionDenied);
        state.phase = SearchPhase::Failed;
        return (true, vec![]);
    }

    state.last_generation = generation;
    state.in_flight += 1;
    state.phase = SearchPhase::Searching;

    tracing::info!(url = %request.url, generation = generation, in_flight = state.in_flight, "search issued");
    (true, vec![Action::SendRequest(request)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::page::ResultsRegion;
    use crate::ui::Theme;

    fn state() -> AppState {
        let mut state = AppState::new("http://backend".to_string(), Theme::default(), false);
        state.viewport = (24, 80);
        state
    }

    fn type_query(state: &mut AppState, query: &str) {
        for c in query.chars() {
            handle_event(state, &Event::Char(c)).unwrap();
        }
    }

    fn submit_request(state: &mut AppState) -> client::SearchRequest {
        let (_, actions) = handle_event(state, &Event::Submit).unwrap();
        match actions.as_slice() {
            [Action::SendRequest(request)] => request.clone(),
            other => panic!("expected one request, got {other:?}"),
        }
    }

    fn respond(state: &mut AppState, generation: u64, status: u16, body: &str) {
        handle_event(
            state,
            &Event::SearchResponse {
                status,
                body: body.as_bytes().to_vec(),
                generation,
            },
        )
        .unwrap();
    }

    const ONE_VIDEO: &str = r#"{"total_results":1,"scraped_sites":1,"videos":[
        {"title":"first","url":"u1","site":"s","duration":"d","views":1}]}"#;
    const OTHER_VIDEO: &str = r#"{"total_results":1,"scraped_sites":2,"videos":[
        {"title":"second","url":"u2","site":"s","duration":"d","views":2}]}"#;

    #[test]
    fn typing_edits_query() {
        let mut state = state();
        type_query(&mut state, "cat");
        handle_event(&mut state, &Event::Backspace).unwrap();
        assert_eq!(state.page.query.text(), "ca");

        handle_event(&mut state, &Event::ClearQuery).unwrap();
        assert_eq!(state.page.query.text(), "");
    }

    #[test]
    fn empty_submit_issues_nothing() {
        let mut state = state();
        type_query(&mut state, "   ");
        let (render, actions) = handle_event(&mut state, &Event::Submit).unwrap();

        assert!(render);
        assert!(actions.is_empty());
        assert_eq!(state.page.status, "Please enter a search term.");
        assert_eq!(state.in_flight, 0);
    }

    #[test]
    fn submit_encodes_query_and_tracks_request() {
        let mut state = state();
        type_query(&mut state, " a&b ");
        let request = submit_request(&mut state);

        assert_eq!(request.url, "http://backend/api/search?query=a%26b");
        assert_eq!(request.generation(), 1);
        assert_eq!(state.in_flight, 1);
        assert_eq!(state.phase, SearchPhase::Searching);
        assert_eq!(state.page.status, "Searching...");
    }

    #[test]
    fn response_renders_results() {
        let mut state = state();
        type_query(&mut state, "cats");
        let request = submit_request(&mut state);

        respond(&mut state, request.generation(), 200, ONE_VIDEO);

        assert_eq!(state.page.results.item_count(), 1);
        assert_eq!(state.page.status, "Found 1 videos from 1 sites.");
        assert_eq!(state.phase, SearchPhase::Succeeded);
        assert_eq!(state.in_flight, 0);
    }

    #[test]
    fn http_error_sets_status_only() {
        let mut state = state();
        type_query(&mut state, "cats");
        let request = submit_request(&mut state);

        respond(&mut state, request.generation(), 500, "");

        assert_eq!(state.page.status, "Error during search: Network response was not ok");
        assert_eq!(state.page.results, ResultsRegion::Empty);
        assert_eq!(state.phase, SearchPhase::Failed);
    }

    #[test]
    fn last_response_to_arrive_wins_by_default() {
        let mut state = state();
        type_query(&mut state, "a");
        let first = submit_request(&mut state);
        let second = submit_request(&mut state);

        respond(&mut state, second.generation(), 200, OTHER_VIDEO);
        respond(&mut state, first.generation(), 200, ONE_VIDEO);

        let ResultsRegion::Items(items) = &state.page.results else {
            panic!("expected items");
        };
        // Both responses append; the earlier one arrived last.
        assert_eq!(items.len(), 2);
        assert_eq!(state.page.status, "Found 1 videos from 1 sites.");
    }

    #[test]
    fn stale_responses_dropped_when_enabled() {
        let mut state = state();
        state.ignore_stale_responses = true;
        type_query(&mut state, "a");
        let first = submit_request(&mut state);
        let second = submit_request(&mut state);

        respond(&mut state, second.generation(), 200, OTHER_VIDEO);
        respond(&mut state, first.generation(), 200, ONE_VIDEO);

        let ResultsRegion::Items(items) = &state.page.results else {
            panic!("expected items");
        };
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].details.link.text, "second");
        assert_eq!(state.page.status, "Found 1 videos from 2 sites.");
        assert_eq!(state.in_flight, 0);
    }

    #[test]
    fn denied_permission_fails_without_request() {
        let mut state = state();
        handle_event(&mut state, &Event::PermissionsResult { granted: false }).unwrap();
        type_query(&mut state, "cats");

        let (_, actions) = handle_event(&mut state, &Event::Submit).unwrap();

        assert!(actions.is_empty());
        assert_eq!(
            state.page.status,
            "Error during search: web access permission not granted"
        );
        assert_eq!(state.phase, SearchPhase::Failed);
    }

    #[test]
    fn click_on_button_submits() {
        let mut state = state();
        type_query(&mut state, "cats");
        let (start, _) = layout::search_button_columns(80).unwrap();

        let line = isize::try_from(layout::SEARCH_BAR_ROW).unwrap();
        let (_, actions) = handle_event(&mut state, &Event::Click { line, col: start - 1 }).unwrap();
        assert_eq!(actions.len(), 1);

        let (render, actions) = handle_event(&mut state, &Event::Click { line: 0, col: 0 }).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
    }

    #[test]
    fn success_records_stats_and_resets_scroll() {
        let mut state = state();
        state.scroll_offset = 5;
        type_query(&mut state, "cats");
        let request = submit_request(&mut state);

        let body = r#"{"total_results":0,"scraped_sites":2,"videos":[],
            "failed_sites":["x"],"search_time_ms":120}"#;
        respond(&mut state, request.generation(), 200, body);

        assert_eq!(state.scroll_offset, 0);
        assert_eq!(
            state.last_stats,
            Some(SearchStats {
                failed_sites: vec!["x".to_string()],
                search_time_ms: Some(120),
            })
        );
    }

    #[test]
    fn close_focus_emits_action() {
        let mut state = state();
        let (_, actions) = handle_event(&mut state, &Event::CloseFocus).unwrap();
        assert_eq!(actions, vec![Action::CloseFocus]);
    }
}
