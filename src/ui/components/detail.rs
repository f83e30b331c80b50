//! Detail page component renderer.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DetailInfo;

/// Left margin of the detail page.
const DETAIL_MARGIN: usize = 2;

/// Renders the read-only details of one book starting at `row`.
///
/// ```text
///   Title   Dune
///   Author  Frank Herbert
///           added 3d ago
///
///   Summary
///   A desert planet, a spice, a prophecy...
/// ```
///
/// The summary is word-wrapped to the terminal width and stops before
/// `last_row`. Returns the next available row.
pub fn render_detail(row: usize, detail: &DetailInfo, theme: &Theme, cols: usize, last_row: usize) -> usize {
    let mut current_row = row;

    current_row = render_field(current_row, "Title", &detail.title, &theme.colors.header_fg, theme);
    current_row = render_field(current_row, "Author", &detail.author, &theme.colors.text_normal, theme);
    current_row = render_field(current_row, "", &detail.added, &theme.colors.text_dim, theme);
    current_row += 1;

    position_cursor(current_row, DETAIL_MARGIN + 1);
    print!("{}{}Summary{}", Theme::bold(), Theme::fg(&theme.colors.text_dim), Theme::reset());
    current_row += 1;

    let width = cols.saturating_sub(DETAIL_MARGIN * 2).max(1);
    for line in wrap(&detail.summary, width) {
        if current_row >= last_row {
            break;
        }
        position_cursor(current_row, DETAIL_MARGIN + 1);
        print!("{}{line}{}", Theme::fg(&theme.colors.text_normal), Theme::reset());
        current_row += 1;
    }

    current_row
}

fn render_field(row: usize, label: &str, value: &str, color: &str, theme: &Theme) -> usize {
    position_cursor(row, DETAIL_MARGIN + 1);
    print!("{}{label:<8}{}", Theme::fg(&theme.colors.text_dim), Theme::reset());
    print!("{}{value}{}", Theme::fg(color), Theme::reset());
    row + 1
}

/// Greedy word wrap on character counts. Words longer than `width` are split.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            lines.push(word.drain(..width).collect());
        }
        if word.is_empty() {
            continue;
        }

        let line_len = line.chars().count();
        if line_len > 0 && line_len + 1 + word.len() > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.extend(word);
    }

    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::wrap;

    #[test]
    fn wraps_on_word_boundaries() {
        assert_eq!(wrap("a desert planet and a spice", 12), ["a desert", "planet and a", "spice"]);
    }

    #[test]
    fn splits_overlong_words() {
        assert_eq!(wrap("abcdefgh ij", 3), ["abc", "def", "gh", "ij"]);
    }

    #[test]
    fn empty_text_has_no_lines() {
        assert!(wrap("   ", 10).is_empty());
    }
}
