//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler returns a `Vec<Action>` after each event. Actions are the
//! boundary between pure state transitions and host calls: the library never
//! calls Zellij directly, the plugin shim in `main.rs` does.
//!
//! # Example
//!
//! ```
//! use metastream::app::Action;
//! use metastream::client::SearchRequest;
//! use metastream::domain::SearchQuery;
//!
//! let query = SearchQuery::parse("cats").unwrap();
//! let actions = vec![Action::SendRequest(SearchRequest::new("http://localhost:8080", &query, 1))];
//! assert_eq!(actions.len(), 1);
//! ```

use crate::client::SearchRequest;

/// Commands to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Issues an HTTP `GET` through the host's `web_request`.
    ///
    /// The response arrives later as an `Event::SearchResponse` carrying the
    /// same generation.
    SendRequest(SearchRequest),
}
