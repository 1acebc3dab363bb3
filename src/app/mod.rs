//! Application layer coordinating state, events, and actions.
//!
//! Sits between the plugin runtime (`main.rs`) and the domain and client
//! layers.
//!
//! ```text
//! User Input → Events → Event Handler → State Mutations → Actions → web_request
//!                           ↑                                           ↓
//!                           └──────────── SearchResponse ───────────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`controller`]: The search interaction itself, generic over [`Page`]
//! - [`handler`]: Event processing and state transitions
//! - [`page`]: Page regions and result rendering
//! - [`phase`]: Search lifecycle for presentation
//! - [`state`]: Central application state container and view model computation

pub mod actions;
pub mod controller;
pub mod handler;
pub mod page;
pub mod phase;
pub mod state;

pub use actions::Action;
pub use controller::{complete_search, perform_search};
pub use handler::{handle_event, Event};
pub use page::{Page, PageState, ResultsRegion, VideoNode};
pub use phase::SearchPhase;
pub use state::{AppState, SearchStats};
