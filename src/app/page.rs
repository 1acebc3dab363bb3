//! The three page regions the search controller reads and writes.
//!
//! The controller is generic over [`Page`], so the regions are handed to it
//! explicitly instead of being looked up from global state. [`PageState`] is
//! the in-pane implementation that the UI layer renders; tests drive it
//! directly.
//!
//! Rendered results are described as [`VideoNode`] trees. Each node carries
//! fixed class identifiers so styling stays outside the controller.

use crate::domain::VideoItem;

/// Class of the container grouping one result.
pub const VIDEO_ITEM_CLASS: &str = "video-item";
/// Class of the thumbnail image.
pub const THUMBNAIL_CLASS: &str = "thumbnail";
/// Class of the block holding the link and the metadata line.
pub const DETAILS_CLASS: &str = "details";
/// Class of the title hyperlink.
pub const TITLE_CLASS: &str = "title";
/// Class of the `Site: ... | Duration: ... | Views: ...` line.
pub const SITE_CLASS: &str = "site";
/// Link target that opens a new browsing context.
pub const NEW_CONTEXT_TARGET: &str = "_blank";

/// Read/write access to the query input, status line and results container.
pub trait Page {
    /// Current raw contents of the query input.
    fn query_text(&self) -> &str;

    /// Replaces the status line.
    fn set_status(&mut self, text: &str);

    /// Removes everything from the results container.
    fn clear_results(&mut self);

    /// Replaces the results container's contents with plain text.
    fn show_results_text(&mut self, text: &str);

    /// Appends one rendered result to the results container.
    fn append_result(&mut self, node: VideoNode);
}

/// Renderable representation of one [`VideoItem`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoNode {
    pub class: &'static str,
    pub thumbnail: Thumbnail,
    pub details: Details,
}

/// Image element. Always present; `src` may be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
    pub class: &'static str,
    pub src: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Details {
    pub class: &'static str,
    pub link: Link,
    pub meta: MetaLine,
}

/// Hyperlink whose visible text is the video title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub class: &'static str,
    pub href: String,
    pub target: &'static str,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaLine {
    pub class: &'static str,
    pub text: String,
}

/// Builds the renderable node for one video.
///
/// Pure: the same item always yields the same node. A missing thumbnail
/// yields an image with an empty source rather than a placeholder.
///
/// # Examples
///
/// ```
/// use metastream::app::page::render_video;
/// use metastream::domain::VideoItem;
///
/// let node = render_video(&VideoItem::new("A", "http://x/a", "s1", "1:00", 5_u64));
/// assert_eq!(node.details.link.text, "A");
/// assert_eq!(node.details.meta.text, "Site: s1 | Duration: 1:00 | Views: 5");
/// assert_eq!(node.thumbnail.src, "");
/// ```
#[must_use]
pub fn render_video(video: &VideoItem) -> VideoNode {
    VideoNode {
        class: VIDEO_ITEM_CLASS,
        thumbnail: Thumbnail {
            class: THUMBNAIL_CLASS,
            src: video.thumbnail_src().to_string(),
        },
        details: Details {
            class: DETAILS_CLASS,
            link: Link {
                class: TITLE_CLASS,
                href: video.url.clone(),
                target: NEW_CONTEXT_TARGET,
                text: video.title.clone(),
            },
            meta: MetaLine {
                class: SITE_CLASS,
                text: format!(
                    "Site: {} | Duration: {} | Views: {}",
                    video.site, video.duration, video.views
                ),
            },
        },
    }
}

/// Editable single-line text input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryInput {
    text: String,
}

impl QueryInput {
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn push(&mut self, c: char) {
        self.text.push(c);
    }

    pub fn pop(&mut self) {
        self.text.pop();
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    pub fn set(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}

/// Contents of the results container.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ResultsRegion {
    #[default]
    Empty,
    /// Plain text in place of a list.
    Text(String),
    Items(Vec<VideoNode>),
}

impl ResultsRegion {
    /// Number of rendered result items (plain text counts as none).
    #[must_use]
    pub fn item_count(&self) -> usize {
        match self {
            Self::Items(items) => items.len(),
            Self::Empty | Self::Text(_) => 0,
        }
    }
}

/// The plugin pane's page regions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageState {
    pub query: QueryInput,
    pub status: String,
    pub results: ResultsRegion,
}

impl Page for PageState {
    fn query_text(&self) -> &str {
        self.query.text()
    }

    fn set_status(&mut self, text: &str) {
        text.clone_into(&mut self.status);
    }

    fn clear_results(&mut self) {
        self.results = ResultsRegion::Empty;
    }

    fn show_results_text(&mut self, text: &str) {
        self.results = ResultsRegion::Text(text.to_string());
    }

    fn append_result(&mut self, node: VideoNode) {
        match &mut self.results {
            ResultsRegion::Items(items) => items.push(node),
            // The pane shows either a message or a list, never both.
            ResultsRegion::Empty | ResultsRegion::Text(_) => {
                self.results = ResultsRegion::Items(vec![node]);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_uses_fixed_classes() {
        let node = render_video(&VideoItem::new("t", "u", "s", "d", "v"));
        assert_eq!(node.class, "video-item");
        assert_eq!(node.thumbnail.class, "thumbnail");
        assert_eq!(node.details.class, "details");
        assert_eq!(node.details.link.class, "title");
        assert_eq!(node.details.link.target, "_blank");
        assert_eq!(node.details.meta.class, "site");
    }

    #[test]
    fn render_keeps_thumbnail_source() {
        let mut video = VideoItem::new("t", "u", "s", "d", 1_u64);
        video.thumbnail = Some("http://img/1.jpg".to_string());
        assert_eq!(render_video(&video).thumbnail.src, "http://img/1.jpg");

        video.thumbnail = Some(String::new());
        assert_eq!(render_video(&video).thumbnail.src, "");
    }

    #[test]
    fn append_after_text_replaces_it() {
        let mut page = PageState::default();
        page.show_results_text("No results found.");
        page.append_result(render_video(&VideoItem::new("t", "u", "s", "d", 1_u64)));
        assert_eq!(page.results.item_count(), 1);
        assert!(matches!(page.results, ResultsRegion::Items(_)));
    }

    #[test]
    fn query_input_editing() {
        let mut input = QueryInput::default();
        input.push('c');
        input.push('a');
        input.pop();
        assert_eq!(input.text(), "c");
        input.clear();
        assert_eq!(input.text(), "");
    }
}
