//! View model types representing renderable UI state.
//!
//! View models are computed from [`AppState`](crate::app::AppState) by
//! `compute_viewmodel` and consumed by the renderer. They carry display-ready
//! text only: truncation, highlight ranges and selection flags are resolved
//! before rendering starts.

use crate::domain::Book;

/// Complete UI view model for one frame.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    /// Rows of the book table that fit on screen.
    pub display_items: Vec<DisplayItem>,

    /// Index of the selected row within `display_items`.
    pub selected_index: usize,

    pub header: HeaderInfo,

    pub footer: FooterInfo,

    /// Message shown instead of the table when there is nothing to list.
    pub empty_state: Option<EmptyState>,

    /// Present while search mode is active.
    pub search_bar: Option<SearchBarInfo>,

    /// Present while the detail screen is showing.
    pub detail: Option<DetailInfo>,

    /// Present while the add form is open.
    pub form: Option<FormInfo>,
}

/// One row of the book table.
#[derive(Debug, Clone)]
pub struct DisplayItem {
    /// Title, truncated to the title column.
    pub title: String,

    /// Author, truncated to the remaining width.
    pub author: String,

    pub is_selected: bool,

    /// Whether the row is marked for deletion.
    pub is_marked: bool,

    /// Character ranges of `title` matching the search query.
    pub title_highlights: Vec<(usize, usize)>,

    /// Character ranges of `author` matching the search query.
    pub author_highlights: Vec<(usize, usize)>,
}

/// Header display information.
#[derive(Debug, Clone)]
pub struct HeaderInfo {
    pub title: String,
}

/// Footer display information.
#[derive(Debug, Clone)]
pub struct FooterInfo {
    /// Keybinding help text for the current screen.
    pub keybindings: String,
}

/// Empty state message display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    /// Primary message (e.g., "No books yet").
    pub message: String,

    /// Secondary explanatory text.
    pub subtitle: String,
}

/// Search bar display information.
#[derive(Debug, Clone)]
pub struct SearchBarInfo {
    pub query: String,

    /// Whether the cursor is in the search box (as opposed to the results).
    pub is_typing: bool,
}

/// Read-only projection of one book for the detail screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailInfo {
    pub title: String,
    pub author: String,
    pub summary: String,
    /// Human-readable age, e.g. "added 5m ago".
    pub added: String,
}

impl DetailInfo {
    /// Projects a book into detail text. Empty author or summary get a placeholder.
    #[must_use]
    pub fn from_book(book: &Book) -> Self {
        let or_placeholder = |text: &str, placeholder: &str| {
            if text.is_empty() {
                placeholder.to_string()
            } else {
                text.to_string()
            }
        };

        Self {
            title: book.title.clone(),
            author: or_placeholder(&book.author, "Unknown author"),
            summary: or_placeholder(&book.summary, "No summary"),
            added: format!("added {}", book.added_ago()),
        }
    }
}

/// Add form display information.
#[derive(Debug, Clone)]
pub struct FormInfo {
    pub fields: Vec<FormFieldInfo>,

    /// Whether the Save action is enabled.
    pub can_save: bool,
}

/// One labelled input of the add form.
#[derive(Debug, Clone)]
pub struct FormFieldInfo {
    pub label: &'static str,
    pub value: String,
    pub is_focused: bool,
}
