//! User interface rendering layer.
//!
//! Transforms view models into ANSI-styled output through small component
//! renderers.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI Output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Component renderers
//! - [`layout`]: Pane geometry and click hit-testing
//! - [`helpers`]: Cursor positioning and hyperlinks
//! - [`theme`]: Color schemes and ANSI escape sequences

pub mod components;
pub mod helpers;
pub mod layout;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{
    DisplayItem, EmptyState, FooterInfo, HeaderInfo, ResultsView, ResultsWindow, SearchBarInfo, StatusInfo,
    StatusTone, UIViewModel,
};
