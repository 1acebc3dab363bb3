//! Search response models.
//!
//! These types mirror the JSON envelope returned by `GET /api/search`. Only
//! `total_results`, `scraped_sites` and `videos` are required; everything else
//! the backend may add (timings, failed sites, uploader metadata) is optional
//! so that older and newer backends both parse.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder shown for optional metadata the backend did not send.
const NOT_AVAILABLE: &str = "N/A";

fn not_available() -> String {
    NOT_AVAILABLE.to_string()
}

fn views_not_available() -> Views {
    Views::Text(not_available())
}

/// The parsed body of a successful search.
///
/// `total_results` and `scraped_sites` are reported to the user verbatim;
/// they are not recomputed from `videos`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Number of videos the backend found.
    pub total_results: u64,

    /// Number of sites the backend queried.
    pub scraped_sites: u64,

    /// Results in server order. Rendering preserves this order.
    pub videos: Vec<VideoItem>,

    /// Search term echoed back by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,

    /// Sites whose scraper failed during this search.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failed_sites: Vec<String>,

    /// Backend-side search duration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_time_ms: Option<u64>,
}

/// One video in a search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoItem {
    #[serde(default)]
    pub title: String,

    /// Link target of the rendered title.
    #[serde(default)]
    pub url: String,

    /// Thumbnail URL. `None` and `Some("")` render identically.
    #[serde(default)]
    pub thumbnail: Option<String>,

    /// Source site name. Some scrapers call this `source`.
    #[serde(default, alias = "source")]
    pub site: String,

    /// Preformatted duration such as `12:34`.
    #[serde(default = "not_available")]
    pub duration: String,

    #[serde(default = "views_not_available")]
    pub views: Views,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploader: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// When the backend scraped this entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scraped_at: Option<DateTime<Utc>>,
}

impl VideoItem {
    /// Creates an item with the fields the UI displays and no extra metadata.
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        site: impl Into<String>,
        duration: impl Into<String>,
        views: impl Into<Views>,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            thumbnail: None,
            site: site.into(),
            duration: duration.into(),
            views: views.into(),
            upload_date: None,
            uploader: None,
            description: None,
            scraped_at: None,
        }
    }

    /// Thumbnail source, empty when the backend sent none.
    #[must_use]
    pub fn thumbnail_src(&self) -> &str {
        self.thumbnail.as_deref().unwrap_or("")
    }
}

/// View count as sent by the backend: either a JSON number or a preformatted
/// string such as `"1.2M"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Views {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for Views {
    #[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(number) => {
                if number.is_f64() {
                    if let Some(value) = number.as_f64() {
                        // Integral floats print like integers: 5.0 -> 5
                        if value.is_finite() && value.fract() == 0.0 && value.abs() < 9.0e15 {
                            return write!(f, "{}", value as i64);
                        }
                    }
                }
                write!(f, "{number}")
            }
        }
    }
}

impl From<u64> for Views {
    fn from(value: u64) -> Self {
        Self::Number(value.into())
    }
}

impl From<&str> for Views {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Views {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_envelope() {
        let body = r#"{"total_results":2,"scraped_sites":1,"videos":[
            {"title":"A","url":"http://x/a","site":"s1","duration":"1:00","views":5},
            {"title":"B","url":"http://x/b","site":"s1","duration":"2:00","views":9}]}"#;
        let result: SearchResult = serde_json::from_str(body).unwrap();

        assert_eq!(result.total_results, 2);
        assert_eq!(result.scraped_sites, 1);
        let titles: Vec<&str> = result.videos.iter().map(|v| v.title.as_str()).collect();
        assert_eq!(titles, ["A", "B"]);
        assert_eq!(result.videos[0].thumbnail_src(), "");
        assert!(result.failed_sites.is_empty());
    }

    #[test]
    fn parses_backend_extras() {
        let body = r#"{"query":"cats","total_results":1,"scraped_sites":3,
            "failed_sites":["dinotube"],"search_time_ms":412,
            "videos":[{"site":"s","title":"T","url":"u","thumbnail":"http://t/1.jpg",
            "duration":"3:10","views":"1.2M","uploader":"me",
            "scraped_at":"2024-05-01T10:00:00Z"}]}"#;
        let result: SearchResult = serde_json::from_str(body).unwrap();

        assert_eq!(result.query.as_deref(), Some("cats"));
        assert_eq!(result.failed_sites, vec!["dinotube".to_string()]);
        assert_eq!(result.search_time_ms, Some(412));
        let video = &result.videos[0];
        assert_eq!(video.thumbnail_src(), "http://t/1.jpg");
        assert_eq!(video.views.to_string(), "1.2M");
        assert_eq!(video.uploader.as_deref(), Some("me"));
        assert!(video.scraped_at.is_some());
    }

    #[test]
    fn source_is_accepted_for_site() {
        let video: VideoItem =
            serde_json::from_str(r#"{"title":"t","url":"u","thumbnail":"","source":"Site A"}"#).unwrap();
        assert_eq!(video.site, "Site A");
        assert_eq!(video.duration, "N/A");
        assert_eq!(video.views.to_string(), "N/A");
    }

    #[test]
    fn null_thumbnail_is_empty_source() {
        let video: VideoItem = serde_json::from_str(r#"{"title":"t","url":"u","thumbnail":null}"#).unwrap();
        assert_eq!(video.thumbnail_src(), "");
    }

    #[test]
    fn missing_videos_is_an_error() {
        assert!(serde_json::from_str::<SearchResult>(r#"{"total_results":0,"scraped_sites":0}"#).is_err());
    }

    #[test]
    fn views_display() {
        let parse = |s: &str| serde_json::from_str::<Views>(s).unwrap().to_string();
        assert_eq!(parse("5"), "5");
        assert_eq!(parse("5.0"), "5");
        assert_eq!(parse("1.5"), "1.5");
        assert_eq!(parse("-3"), "-3");
        assert_eq!(parse(r#""12,345""#), "12,345");
    }
}
