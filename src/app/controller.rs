//! The search interaction: validate, issue, render.
//!
//! A search is split at its only suspension point. [`perform_search`] runs
//! when the user submits and produces the request to send; [`complete_search`]
//! runs when the host delivers the response. Nothing ties the two together
//! besides the request's generation, so overlapping searches resolve in
//! whatever order their responses arrive.

use super::page::{render_video, Page};
use crate::client::SearchRequest;
use crate::domain::{SearchError, SearchQuery, SearchResult};

/// Status shown when the trimmed query is empty.
pub const PROMPT_STATUS: &str = "Please enter a search term.";

/// Status shown while a request is outstanding.
pub const SEARCHING_STATUS: &str = "Searching...";

/// Results text for a successful search without videos.
pub const NO_RESULTS_TEXT: &str = "No results found.";

/// Prefix of every failure status.
pub const ERROR_STATUS_PREFIX: &str = "Error during search: ";

/// Starts a search from the current query input.
///
/// Returns `None` without touching the results when the trimmed query is
/// empty. Otherwise marks the page as searching, clears prior results and
/// returns the request to issue.
pub fn perform_search<P: Page>(page: &mut P, endpoint: &str, generation: u64) -> Option<SearchRequest> {
    let Some(query) = SearchQuery::parse(page.query_text()) else {
        tracing::debug!("empty query, prompting for a search term");
        page.set_status(PROMPT_STATUS);
        return None;
    };

    let _span = tracing::debug_span!("perform_search", query = %query, generation = generation).entered();

    page.set_status(SEARCHING_STATUS);
    page.clear_results();

    let request = SearchRequest::new(endpoint, &query, generation);
    tracing::debug!(url = %request.url, "search request built");
    Some(request)
}

/// Applies the outcome of a search to the page.
///
/// On success the videos are appended in server order, or the no-results
/// text is shown, and the status reports the backend's own counts. On failure
/// only the status changes.
pub fn complete_search<P: Page>(page: &mut P, outcome: Result<SearchResult, SearchError>) {
    match outcome {
        Ok(result) => {
            if result.videos.is_empty() {
                page.show_results_text(NO_RESULTS_TEXT);
            } else {
                for video in &result.videos {
                    page.append_result(render_video(video));
                }
            }
            page.set_status(&summary(&result));
        }
        Err(error) => report_failure(page, &error),
    }
}

/// Writes a failure to the status line, leaving results as they are.
pub fn report_failure<P: Page>(page: &mut P, error: &SearchError) {
    tracing::debug!(error = ?error, "search failed");
    page.set_status(&format!("{ERROR_STATUS_PREFIX}{error}"));
}

/// `Found {total_results} videos from {scraped_sites} sites.`
#[must_use]
pub fn summary(result: &SearchResult) -> String {
    format!(
        "Found {} videos from {} sites.",
        result.total_results, result.scraped_sites
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::page::{PageState, ResultsRegion};
    use crate::client::interpret_response;

    const ENDPOINT: &str = "http://backend";

    fn page_with_query(query: &str) -> PageState {
        let mut page = PageState::default();
        page.query.set(query);
        page
    }

    #[test]
    fn blank_query_prompts_without_request() {
        for input in ["", "   ", "\t\n "] {
            let mut page = page_with_query(input);
            page.show_results_text("previous");

            assert!(perform_search(&mut page, ENDPOINT, 1).is_none());
            assert_eq!(page.status, PROMPT_STATUS);
            assert_eq!(page.results, ResultsRegion::Text("previous".to_string()));
        }
    }

    #[test]
    fn valid_query_clears_and_marks_searching() {
        let mut page = page_with_query(" cats ");
        page.show_results_text("previous");

        let request = perform_search(&mut page, ENDPOINT, 4).unwrap();

        assert_eq!(request.url, "http://backend/api/search?query=cats");
        assert_eq!(request.generation(), 4);
        assert_eq!(page.status, SEARCHING_STATUS);
        assert_eq!(page.results, ResultsRegion::Empty);
    }

    #[test]
    fn example_scenario_renders_in_order() {
        let mut page = page_with_query("cats");
        perform_search(&mut page, ENDPOINT, 1).unwrap();

        let body = br#"{"total_results":2,"scraped_sites":1,"videos":[
            {"title":"A","url":"http://x/a","site":"s1","duration":"1:00","views":5},
            {"title":"B","url":"http://x/b","site":"s1","duration":"2:00","views":9}]}"#;
        complete_search(&mut page, interpret_response(200, body));

        let ResultsRegion::Items(items) = &page.results else {
            panic!("expected items, got {:?}", page.results);
        };
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].details.link.text, "A");
        assert_eq!(items[0].details.link.href, "http://x/a");
        assert_eq!(items[1].details.link.text, "B");
        assert_eq!(items[1].details.link.href, "http://x/b");
        assert_eq!(items[1].details.meta.text, "Site: s1 | Duration: 2:00 | Views: 9");
        assert_eq!(items[0].thumbnail.src, "");
        assert_eq!(page.status, "Found 2 videos from 1 sites.");
    }

    #[test]
    fn empty_result_shows_literal_text_and_response_counts() {
        let mut page = page_with_query("nothing");
        perform_search(&mut page, ENDPOINT, 1).unwrap();

        let body = br#"{"total_results":0,"scraped_sites":3,"videos":[]}"#;
        complete_search(&mut page, interpret_response(200, body));

        assert_eq!(page.results, ResultsRegion::Text("No results found.".to_string()));
        assert_eq!(page.status, "Found 0 videos from 3 sites.");
    }

    #[test]
    fn status_uses_reported_totals_not_rendered_count() {
        let mut page = page_with_query("cats");
        perform_search(&mut page, ENDPOINT, 1).unwrap();

        let body = br#"{"total_results":40,"scraped_sites":5,"videos":[
            {"title":"only","url":"u","site":"s","duration":"d","views":"1"}]}"#;
        complete_search(&mut page, interpret_response(200, body));

        assert_eq!(page.results.item_count(), 1);
        assert_eq!(page.status, "Found 40 videos from 5 sites.");
    }

    #[test]
    fn failing_status_leaves_results_empty() {
        let mut page = page_with_query("cats");
        perform_search(&mut page, ENDPOINT, 1).unwrap();

        complete_search(&mut page, interpret_response(503, b"unavailable"));

        assert_eq!(page.results, ResultsRegion::Empty);
        assert_eq!(page.status, "Error during search: Network response was not ok");
    }

    #[test]
    fn parse_failure_reports_parser_message() {
        let mut page = page_with_query("cats");
        perform_search(&mut page, ENDPOINT, 1).unwrap();

        let outcome = interpret_response(200, b"not json");
        let message = outcome.as_ref().unwrap_err().to_string();
        complete_search(&mut page, outcome);

        assert_eq!(page.status, format!("Error during search: {message}"));
        assert_eq!(page.results, ResultsRegion::Empty);
    }

    #[test]
    fn failure_does_not_touch_existing_results() {
        let mut page = PageState::default();
        page.show_results_text("kept");

        complete_search(&mut page, Err(SearchError::Status(502)));

        assert_eq!(page.results, ResultsRegion::Text("kept".to_string()));
        assert_eq!(page.status, "Error during search: Network response was not ok");
    }
}
