//! Error types for the MetaStream plugin.
//!
//! Two families live here. [`MetaStreamError`] covers plugin-level failures
//! (configuration, themes, I/O) and is carried by the crate-wide [`Result`]
//! alias. [`SearchError`] is the single failure kind of a search round trip;
//! every variant reaches the user through the same status line prefix, so the
//! `Display` text of each variant is what the user reads.

use thiserror::Error;

/// The main error type for MetaStream plugin operations.
///
/// # Examples
///
/// ```
/// use metastream::domain::MetaStreamError;
///
/// fn validate_endpoint(endpoint: &str) -> Result<(), MetaStreamError> {
///     if endpoint.is_empty() {
///         return Err(MetaStreamError::Config("endpoint must not be empty".to_string()));
///     }
///     Ok(())
/// }
///
/// assert!(validate_endpoint("").is_err());
/// ```
#[derive(Debug, Error)]
pub enum MetaStreamError {
    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing or application failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A value could not be serialized for the host.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A failed search round trip.
///
/// The host reports transport failures as an error status, so they arrive
/// as [`SearchError::Status`]. Statuses and unparseable bodies are not told
/// apart in the UI: the status line always reads
/// `Error during search: {self}`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The backend answered with a status outside `200..=299`.
    ///
    /// The code is kept for logging only; the message is fixed.
    #[error("Network response was not ok")]
    Status(u16),

    /// The body was not valid JSON or did not match the response shape.
    #[error("{0}")]
    Parse(String),

    /// The plugin was not granted web access by the user.
    #[error("web access permission not granted")]
    PermissionDenied,
}

impl From<serde_json::Error> for SearchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

/// A specialized `Result` type for MetaStream operations.
pub type Result<T> = std::result::Result<T, MetaStreamError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_message_is_fixed() {
        assert_eq!(SearchError::Status(500).to_string(), "Network response was not ok");
        assert_eq!(SearchError::Status(404).to_string(), "Network response was not ok");
    }

    #[test]
    fn parse_error_keeps_serde_message() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let expected = err.to_string();
        assert_eq!(SearchError::from(err).to_string(), expected);
    }
}
