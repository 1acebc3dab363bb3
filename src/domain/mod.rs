//! Domain layer for the MetaStream plugin.
//!
//! Core types independent of Zellij APIs: the validated query, the response
//! models and the error taxonomy.
//!
//! - [`error`]: Error types and result aliases
//! - [`query`]: Trimmed, non-empty search term and its URL encoding
//! - [`video`]: Search response envelope and video records

pub mod error;
pub mod query;
pub mod video;

pub use error::{MetaStreamError, Result, SearchError};
pub use query::SearchQuery;
pub use video::{SearchResult, VideoItem, Views};
