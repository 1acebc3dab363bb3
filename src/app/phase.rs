//! Search lifecycle phase.
//!
//! ```text
//! Idle ──submit──► Searching ──response──► Succeeded | Failed
//!                      ▲                         │
//!                      └──────────submit─────────┘
//! ```
//!
//! The phase only drives presentation (status colour, footer hints). It does
//! not gate anything: a submit while `Searching` starts another request.

/// Where the most recent search stands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchPhase {
    /// Nothing submitted yet, or the last submit was rejected as empty.
    #[default]
    Idle,

    /// At least one request is outstanding.
    Searching,

    /// The most recently applied response was a success.
    Succeeded,

    /// The most recently applied response was a failure.
    Failed,
}
