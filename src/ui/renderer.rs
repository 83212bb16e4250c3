//! Top-level rendering entry point.

use crate::app::AppState;
use crate::ui::components;

/// Computes the view model for the pane size and draws it to stdout.
///
/// Output is ANSI-styled text with absolute cursor positioning; Zellij clears
/// the pane before each render.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let _span = tracing::trace_span!("render", rows, cols).entered();
    let viewmodel = state.compute_viewmodel(rows, cols);
    components::render_frame(&viewmodel, &state.theme, rows, cols);
}
