//! Table component renderer.
//!
//! Renders the book list as a two-column table with TITLE and AUTHOR columns,
//! selection highlighting, deletion marks and search match highlighting.

use crate::app::state::TITLE_COLUMN_WIDTH;
use crate::ui::helpers::{self, position_cursor, visual_len};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DisplayItem;

/// Renders the TITLE and AUTHOR column headers at `row`.
pub fn render_table_headers(row: usize, theme: &Theme) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!("  {:<width$}{}", "TITLE", "AUTHOR", width = TITLE_COLUMN_WIDTH - 2);
    print!("{}", Theme::reset());
    row + 1
}

/// Renders every display item, one per row, starting at `row`.
pub fn render_table_rows(row: usize, items: &[DisplayItem], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for item in items {
        current_row = render_table_row(current_row, item, theme, cols);
    }
    current_row
}

/// Renders one book row.
///
/// ```text
/// [mark] TITLE (fixed width) AUTHOR (variable) [padding to fill line]
/// ```
///
/// Styling precedence is selection background, then match highlights, then
/// normal text color. The row is padded to the full width so the selection
/// background covers it.
fn render_table_row(row: usize, item: &DisplayItem, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    let base_fg = if item.is_selected {
        &theme.colors.selection_fg
    } else {
        &theme.colors.text_normal
    };
    print!("{}", Theme::fg(base_fg));
    if item.is_selected {
        print!("{}", Theme::bg(&theme.colors.selection_bg));
    }

    if item.is_marked {
        print!("{}", Theme::fg(&theme.colors.marked_fg));
        print!("● ");
        print!("{}", Theme::fg(base_fg));
    } else {
        print!("  ");
    }

    helpers::render_highlighted_text(&item.title, &item.title_highlights, theme, item.is_selected);
    print!("{}", " ".repeat((TITLE_COLUMN_WIDTH - 2).saturating_sub(visual_len(&item.title))));

    helpers::render_highlighted_text(&item.author, &item.author_highlights, theme, item.is_selected);

    let line_len = TITLE_COLUMN_WIDTH + visual_len(&item.author);
    print!("{}", " ".repeat(cols.saturating_sub(line_len)));

    print!("{}", Theme::reset());
    row + 1
}
