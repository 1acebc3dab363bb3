//! MetaStream: a Zellij plugin front end for a multi-site video search backend.
//!
//! The pane offers a query input, a search button, a status line and a
//! results list. Submitting a query issues `GET {endpoint}/api/search?query=…`
//! through the host and renders the returned videos in server order.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - Event handling and actions                       │
//! │  - Search controller over the Page regions          │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                                     │
//! ┌───────────────┐                   ┌───────────────────┐
//! │ UI Layer      │                   │ Client (client/)  │
//! │ (ui/)         │                   │ - Request URL     │
//! │ - Rendering   │                   │ - Response status │
//! │ - Theming     │                   │ - Request context │
//! └───────────────┘                   └───────────────────┘
//!         │                                     │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain & Infrastructure                            │
//! │  - Query, response models, errors (domain/)         │
//! │  - Sandbox paths (infrastructure/)                  │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - OpenTelemetry tracing to a local OTLP/JSON file  │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/metastream.wasm" {
//!         endpoint "http://127.0.0.1:8080"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!         ignore_stale_responses "false"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```
//! use metastream::{handle_event, initialize, Action, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! for c in "cats".chars() {
//!     handle_event(&mut state, &Event::Char(c))?;
//! }
//!
//! let (_, actions) = handle_event(&mut state, &Event::Submit)?;
//! let Some(Action::SendRequest(request)) = actions.first() else {
//!     panic!("expected a request");
//! };
//! assert_eq!(request.url, "http://127.0.0.1:8080/api/search?query=cats");
//! # Ok::<(), metastream::MetaStreamError>(())
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod client;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod ui;

pub use app::{handle_event, Action, AppState, Event, SearchPhase};
pub use domain::{MetaStreamError, Result, SearchError, SearchResult, VideoItem};
pub use ui::Theme;

use std::collections::BTreeMap;

/// Backend used when no `endpoint` is configured.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8080";

/// Plugin configuration parsed from Zellij's configuration map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the search backend, without trailing slash.
    pub endpoint: String,

    /// Built-in theme name. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file. `~` maps to the host home mount.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for tracing. Default: `"info"`
    pub trace_level: String,

    /// Discard responses that arrive after a newer search was issued.
    pub ignore_stale_responses: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            theme_name: None,
            theme_file: None,
            trace_level: "info".to_string(),
            ignore_stale_responses: false,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Unknown keys are ignored and unparseable values fall back to defaults.
    /// An endpoint must be an `http://` or `https://` URL.
    ///
    /// # Example
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use metastream::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("endpoint".to_string(), "http://search.local:9000/".to_string());
    /// map.insert("ignore_stale_responses".to_string(), "true".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.endpoint, "http://search.local:9000");
    /// assert!(config.ignore_stale_responses);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();

        let endpoint = match config.get("endpoint").map(|s| parse_endpoint(s)) {
            Some(Ok(endpoint)) => endpoint,
            Some(Err(e)) => {
                tracing::warn!(error = %e, "using default endpoint");
                defaults.endpoint
            }
            None => defaults.endpoint,
        };

        let trace_level = config
            .get("trace_level")
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map_or(defaults.trace_level, String::from);

        let ignore_stale_responses = config
            .get("ignore_stale_responses")
            .and_then(|s| s.trim().parse::<bool>().ok())
            .unwrap_or(defaults.ignore_stale_responses);

        Self {
            endpoint,
            theme_name: config.get("theme").cloned(),
            theme_file: config.get("theme_file").cloned(),
            trace_level,
            ignore_stale_responses,
        }
    }

    /// Resolves the theme: file first, then built-in name, then the default.
    ///
    /// Failures are logged and fall through to the next source.
    #[must_use]
    pub fn load_theme(&self) -> Theme {
        if let Some(theme_file) = &self.theme_file {
            match Theme::from_file(infrastructure::expand_tilde(theme_file)) {
                Ok(theme) => return theme,
                Err(e) => tracing::warn!(theme_file = %theme_file, error = %e, "failed to load theme file"),
            }
        }

        if let Some(theme_name) = &self.theme_name {
            match Theme::from_name(theme_name) {
                Some(theme) => return theme,
                None => tracing::warn!(theme_name = %theme_name, "unknown theme, using default"),
            }
        }

        Theme::default()
    }
}

/// Normalizes a configured backend URL: trims it and drops trailing slashes.
fn parse_endpoint(raw: &str) -> Result<String> {
    let endpoint = raw.trim().trim_end_matches('/');
    if endpoint.is_empty() {
        return Err(MetaStreamError::Config("endpoint is empty".to_string()));
    }
    if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
        return Err(MetaStreamError::Config(format!(
            "endpoint {endpoint:?} must start with http:// or https://"
        )));
    }
    Ok(endpoint.to_string())
}

/// Builds the initial application state from configuration.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(endpoint = %config.endpoint, "initializing metastream plugin");

    AppState::new(
        config.endpoint.clone(),
        config.load_theme(),
        config.ignore_stale_responses,
    )
}
