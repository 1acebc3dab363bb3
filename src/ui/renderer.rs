//! Top-level rendering coordinator.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render_layout → ANSI Output
//! ```

use crate::app::AppState;
use crate::ui::components;

/// Renders the plugin UI to stdout for a pane of `rows` by `cols`.
///
/// Does not clear the screen; the host clears the pane before each render.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);

    components::render_layout(&viewmodel, &state.theme, cols, rows);
}
