//! Top-level rendering coordinator.
//!
//! Rendering is a two-step process:
//!
//! 1. **View Model Computation**: Transform `AppState` into `UIViewModel`
//! 2. **Component Rendering**: Delegate to the layout for the current screen

use crate::app::AppState;
use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

/// Renders the plugin UI to stdout.
///
/// Prints ANSI-styled output with explicit cursor positioning. Does not clear
/// the screen; Zellij hands the plugin a fresh frame on every render.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);

    render_viewmodel(&viewmodel, &state.theme, rows, cols);
}

/// Chooses the layout from what the view model carries.
fn render_viewmodel(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    if let Some(form) = &vm.form {
        components::render_form_screen(vm, form, theme, cols, rows);
    } else if let Some(detail) = &vm.detail {
        components::render_detail_screen(vm, detail, theme, cols, rows);
    } else {
        components::render_list_screen(vm, theme, cols, rows);
    }
}
