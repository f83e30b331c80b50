//! Shared rendering utilities and helpers.
//!
//! Low-level pieces used by several components: cursor positioning, search
//! match highlighting and width arithmetic. Everything here works on character
//! counts, never byte lengths, so titles like "Les Misérables" line up.

use crate::ui::theme::Theme;

/// Positions the cursor at a specific row and column (1-indexed).
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Number of characters in `text`.
#[must_use]
pub fn visual_len(text: &str) -> usize {
    text.chars().count()
}

/// Left padding that centers text of `len` characters in `cols`.
#[must_use]
pub const fn center_padding(len: usize, cols: usize) -> usize {
    cols.saturating_sub(len) / 2
}

/// Splits `text` into runs, flagging the runs covered by `ranges`.
///
/// Ranges are `(start, end)` character indices with an exclusive end. Ranges
/// that reach past the text are clipped, and ranges that overlap an earlier one
/// or are empty are skipped.
#[must_use]
pub fn split_highlights(text: &str, ranges: &[(usize, usize)]) -> Vec<(String, bool)> {
    let chars: Vec<char> = text.chars().collect();
    let mut segments = Vec::new();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let end = end.min(chars.len());
        if start < current_pos || start >= end {
            continue;
        }

        if start > current_pos {
            segments.push((chars[current_pos..start].iter().collect(), false));
        }
        segments.push((chars[start..end].iter().collect(), true));
        current_pos = end;
    }

    if current_pos < chars.len() {
        segments.push((chars[current_pos..].iter().collect(), false));
    }
    segments
}

/// Prints `text` with match highlighting on the given character ranges.
///
/// Selected rows print plain so the selection background stays intact. After
/// each highlighted run the row's base color is restored.
pub fn render_highlighted_text(text: &str, ranges: &[(usize, usize)], theme: &Theme, is_selected: bool) {
    if ranges.is_empty() || is_selected {
        print!("{text}");
        return;
    }

    for (segment, highlighted) in split_highlights(text, ranges) {
        if highlighted {
            print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
            print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
            print!("{segment}");
            print!("{}", Theme::reset());
            print!("{}", Theme::fg(&theme.colors.text_normal));
        } else {
            print!("{segment}");
        }
    }
}
