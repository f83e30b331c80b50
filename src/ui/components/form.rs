//! Add form component renderer.

use crate::ui::helpers::{position_cursor, visual_len};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{FormFieldInfo, FormInfo};

const FORM_MARGIN: usize = 5;

/// Renders the add form starting at `row`.
///
/// Each field is a labelled single-line box; the focused one uses the search
/// border color and shows a cursor. A Save hint is drawn below the fields,
/// dimmed while Save is disabled. Returns the next available row.
pub fn render_form(row: usize, form: &FormInfo, theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for field in &form.fields {
        current_row = render_form_field(current_row, field, theme, cols);
    }

    position_cursor(current_row, FORM_MARGIN + 1);
    if form.can_save {
        print!("{}{}[ Save ]{}", Theme::bold(), Theme::fg(&theme.colors.search_bar_border), Theme::reset());
    } else {
        print!(
            "{}{}[ Save ]  title required{}",
            Theme::dim(),
            Theme::fg(&theme.colors.text_dim),
            Theme::reset()
        );
    }
    current_row + 1
}

fn render_form_field(row: usize, field: &FormFieldInfo, theme: &Theme, cols: usize) -> usize {
    let inner_width = cols.saturating_sub(FORM_MARGIN * 2 + 2);
    let border_color = if field.is_focused {
        &theme.colors.search_bar_border
    } else {
        &theme.colors.border
    };

    position_cursor(row, FORM_MARGIN + 1);
    print!("{}", Theme::fg(border_color));
    let label = format!(" {} ", field.label);
    print!("┌{label}{}┐", "─".repeat(inner_width.saturating_sub(visual_len(&label))));

    let cursor = if field.is_focused { "█" } else { "" };
    // Long values scroll so the tail (and cursor) stays visible.
    let text = format!(" {}{cursor}", field.value);
    let overflow = visual_len(&text).saturating_sub(inner_width);
    let shown: String = text.chars().skip(overflow).collect();

    position_cursor(row + 1, FORM_MARGIN + 1);
    print!("│{}{shown}", Theme::fg(&theme.colors.text_normal));
    print!("{}", " ".repeat(inner_width.saturating_sub(visual_len(&shown))));
    print!("{}│", Theme::fg(border_color));

    position_cursor(row + 2, FORM_MARGIN + 1);
    print!("└{}┘", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    row + 3
}
