//! Composable UI component renderers.
//!
//! Each component renders one part of the interface at a given row and
//! returns the next free row, so layouts read top to bottom.
//!
//! # Components
//!
//! - [`header`]: Title bar with the book count
//! - [`footer`]: Help text and keybinding hints
//! - [`search`]: Search input box
//! - [`table`]: Book list with TITLE and AUTHOR columns
//! - [`empty`]: Message shown when there is nothing to list
//! - [`detail`]: Read-only page for one book
//! - [`form`]: Add form fields
//!
//! # Layouts
//!
//! - [`render_list_screen`]: Header + optional search bar + table + footer
//! - [`render_detail_screen`]: Header + detail page + footer
//! - [`render_form_screen`]: Header + form + footer

mod detail;
mod empty;
mod footer;
mod form;
mod header;
mod search;
mod table;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{DetailInfo, FormInfo, UIViewModel};

use detail::render_detail;
use empty::render_empty_state;
use footer::render_footer;
use form::render_form;
use header::render_header;
use search::render_search_bar;
use table::{render_table_headers, render_table_rows};

/// Renders a horizontal border line at `row`. Returns the next row.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the top chrome shared by every screen: a blank line, the header
/// and a border. Returns the first free row.
fn render_top(vm: &UIViewModel, theme: &Theme, cols: usize) -> usize {
    let current_row = render_header(2, &vm.header, theme, cols);
    render_border(current_row, &theme.colors.border, cols)
}

/// Renders the bottom border and footer on the last two rows.
fn render_bottom(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let footer_start = rows.saturating_sub(1);
    let border_row = footer_start.saturating_sub(1);

    render_border(border_row, &theme.colors.border, cols);
    render_footer(footer_start, &vm.footer, theme, cols);
}

/// Renders the list screen.
///
/// ```text
/// [blank line]
/// [Header]
/// [Border]
/// [Search Bar - 3 lines, search mode only]
/// [Table Headers]
/// [Table Rows | Empty state]
/// [Border]
/// [Footer]
/// ```
///
/// Reserves 6 lines for chrome, 9 with the search bar.
pub fn render_list_screen(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = render_top(vm, theme, cols);

    if let Some(search) = &vm.search_bar {
        current_row = render_search_bar(current_row, search, theme, cols);
    }

    if let Some(empty) = &vm.empty_state {
        render_empty_state(current_row + 2, empty, theme, cols);
    } else {
        current_row = render_table_headers(current_row, theme);
        render_table_rows(current_row, &vm.display_items, theme, cols);
    }

    render_bottom(vm, theme, cols, rows);
}

/// Renders the detail screen for one book.
pub fn render_detail_screen(vm: &UIViewModel, detail: &DetailInfo, theme: &Theme, cols: usize, rows: usize) {
    let current_row = render_top(vm, theme, cols);
    render_detail(current_row + 1, detail, theme, cols, rows.saturating_sub(2));
    render_bottom(vm, theme, cols, rows);
}

/// Renders the add form screen.
pub fn render_form_screen(vm: &UIViewModel, form: &FormInfo, theme: &Theme, cols: usize, rows: usize) {
    let current_row = render_top(vm, theme, cols);
    render_form(current_row + 1, form, theme, cols);
    render_bottom(vm, theme, cols, rows);
}
