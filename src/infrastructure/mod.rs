//! Sandbox filesystem helpers.
//!
//! Zellij mounts the host filesystem under `/host` inside the plugin sandbox.

pub mod paths;

pub use paths::{expand_tilde, get_data_dir};
