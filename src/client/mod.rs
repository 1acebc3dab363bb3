//! HTTP contract with the search backend.
//!
//! The plugin never performs I/O itself: it describes a request as a
//! [`SearchRequest`], the plugin shim hands it to the host's `web_request`,
//! and the host's answer comes back as a status code and body that
//! [`interpret_response`] turns into a search outcome.
//!
//! ```text
//! SearchQuery ──► SearchRequest ──► web_request ──► WebRequestResult
//!                                                        │
//!                      Result<SearchResult, SearchError> ◄┘
//! ```
//!
//! - `context`: generation and trace metadata round-tripped by the host

pub mod context;

pub use context::{RequestContext, TraceContext};

use crate::domain::{SearchError, SearchQuery, SearchResult};

/// Path of the search endpoint, relative to the configured base URL.
pub const SEARCH_PATH: &str = "/api/search";

/// A fully described `GET` request for one search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Absolute URL including the encoded `query` parameter.
    pub url: String,

    pub context: RequestContext,
}

impl SearchRequest {
    /// Builds the request for `query` against `endpoint`.
    ///
    /// `endpoint` is the backend base URL without a trailing slash, for
    /// example `http://127.0.0.1:8080`.
    ///
    /// # Examples
    ///
    /// ```
    /// use metastream::client::SearchRequest;
    /// use metastream::domain::SearchQuery;
    ///
    /// let query = SearchQuery::parse("cats").unwrap();
    /// let request = SearchRequest::new("http://localhost:8080", &query, 1);
    /// assert_eq!(request.url, "http://localhost:8080/api/search?query=cats");
    /// ```
    #[must_use]
    pub fn new(endpoint: &str, query: &SearchQuery, generation: u64) -> Self {
        Self {
            url: format!("{endpoint}{SEARCH_PATH}?query={}", query.encoded()),
            context: RequestContext::new(generation),
        }
    }

    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.context.generation
    }
}

/// Interprets the host's answer to a search request.
///
/// Any status outside `200..=299` is a failure regardless of the body. A
/// success status with a body that is not a valid search envelope is a parse
/// failure.
///
/// # Errors
///
/// Returns [`SearchError::Status`] for non-success statuses and
/// [`SearchError::Parse`] when the body cannot be decoded.
pub fn interpret_response(status: u16, body: &[u8]) -> Result<SearchResult, SearchError> {
    if !(200..=299).contains(&status) {
        tracing::debug!(status = status, body_len = body.len(), "search backend returned failure status");
        return Err(SearchError::Status(status));
    }

    let result: SearchResult = serde_json::from_slice(body)?;

    tracing::debug!(
        total_results = result.total_results,
        scraped_sites = result.scraped_sites,
        video_count = result.videos.len(),
        "search response parsed"
    );

    Ok(result)
}
