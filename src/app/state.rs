//! Application state management and view model computation.
//!
//! [`AppState`] is the list screen controller. It owns the authoritative
//! [`Library`], the search query and the [`FilteredView`] derived from them, and
//! it is the single place where add and delete intents are applied.
//!
//! # State Components
//!
//! - **Library**: the authoritative book collection
//! - **Query / View**: the search text and the ids it currently selects
//! - **Selection / Marks**: cursor and marked rows, both positions in the view
//! - **Input Mode / Screen**: what keystrokes mean and what is on display
//!
//! Positions only ever index into `view`. Any mutation of the library first
//! resolves positions to [`BookId`]s through the view that was on screen.
//!
//! # Example
//!
//! ```rust
//! use bookshelf::app::AppState;
//! use bookshelf::library::Library;
//! use bookshelf::ui::Theme;
//!
//! let mut state = AppState::new(Library::seeded(), Theme::default());
//! state.set_query("the");
//! assert_eq!(state.view.len(), 1);
//!
//! state.delete_positions([0]);
//! assert_eq!(state.library.len(), 2);
//! ```

use super::form::{BookForm, FormField};
use super::modes::{InputMode, Screen, SearchFocus};
use crate::domain::error::Result;
use crate::domain::{Book, BookId};
use crate::library::{match_range, FilteredView, Library};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    DetailInfo, DisplayItem, EmptyState, FooterInfo, FormFieldInfo, FormInfo, HeaderInfo,
    SearchBarInfo, UIViewModel,
};
use std::collections::BTreeSet;

/// Width of the TITLE column, including the two-character mark gutter.
pub const TITLE_COLUMN_WIDTH: usize = 42;

/// Gutter in front of each title for the mark indicator.
const MARK_GUTTER: usize = 2;

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The authoritative collection.
    pub library: Library,

    /// Ids of the books matching `query`, in library order.
    ///
    /// Recomputed by `apply_search_filter()` after every query or library change.
    pub view: FilteredView,

    /// Zero-based index of the selected row within `view`.
    pub selected_index: usize,

    /// Rows of `view` marked for deletion.
    ///
    /// Cleared whenever the view is re-derived, since positions are only
    /// meaningful against the view they were taken from.
    pub marked: BTreeSet<usize>,

    /// Current search query, as typed.
    pub query: String,

    pub input_mode: InputMode,

    pub screen: Screen,

    pub theme: Theme,
}

impl AppState {
    /// Creates a new application state over `library`.
    ///
    /// The view starts unfiltered, in normal mode, on the list screen.
    #[must_use]
    pub fn new(library: Library, theme: Theme) -> Self {
        let view = FilteredView::compute(&library, "");
        Self {
            library,
            view,
            selected_index: 0,
            marked: BTreeSet::new(),
            query: String::new(),
            input_mode: InputMode::Normal,
            screen: Screen::List,
            theme,
        }
    }

    /// Moves selection cursor down by one position, wrapping to top if at end.
    pub fn move_selection_down(&mut self) {
        if self.view.is_empty() {
            return;
        }
        self.selected_index = (self.selected_index + 1) % self.view.len();
    }

    /// Moves selection cursor up by one position, wrapping to bottom if at start.
    pub fn move_selection_up(&mut self) {
        if self.view.is_empty() {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = self.view.len() - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    /// Id of the selected book, if any row is shown.
    #[must_use]
    pub fn selected_id(&self) -> Option<BookId> {
        self.view.get(self.selected_index)
    }

    /// The selected book, if any row is shown.
    #[must_use]
    pub fn selected_book(&self) -> Option<&Book> {
        self.selected_id().and_then(|id| self.library.get(id))
    }

    /// Books currently shown, in display order.
    #[must_use]
    pub fn visible_books(&self) -> Vec<&Book> {
        self.view
            .ids()
            .iter()
            .filter_map(|id| self.library.get(*id))
            .collect()
    }

    /// Replaces the search query and re-derives the view.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.apply_search_filter();
    }

    /// Re-derives the filtered view from the library and query.
    ///
    /// Keeps the cursor on the same book when it is still visible, otherwise
    /// clamps it to the new bounds. Marks are dropped.
    pub fn apply_search_filter(&mut self) {
        let _span = tracing::debug_span!(
            "apply_search_filter",
            total_books = self.library.len(),
            query_len = self.query.len()
        )
        .entered();

        let previously_selected = self.selected_id();
        self.view = FilteredView::compute(&self.library, &self.query);
        self.marked.clear();

        if let Some(position) = previously_selected.and_then(|id| self.view.position_of(id)) {
            self.selected_index = position;
        } else if self.view.is_empty() {
            self.selected_index = 0;
        } else {
            self.selected_index = self.selected_index.min(self.view.len() - 1);
        }

        tracing::debug!(shown = self.view.len(), selected_index = self.selected_index, "search filter applied");
    }

    /// Toggles the deletion mark on the selected row.
    pub fn toggle_mark(&mut self) {
        if self.view.is_empty() {
            return;
        }
        if !self.marked.remove(&self.selected_index) {
            self.marked.insert(self.selected_index);
        }
        tracing::trace!(marked = ?self.marked, "mark toggled");
    }

    /// Deletes the books at `positions` of the current view.
    ///
    /// Positions are resolved to ids against the view on screen; positions past
    /// the end are ignored. Books that are not shown are never touched. Returns
    /// the number of books removed.
    pub fn delete_positions<I>(&mut self, positions: I) -> usize
    where
        I: IntoIterator<Item = usize>,
    {
        let ids = self.view.resolve_positions(positions);
        if ids.is_empty() {
            tracing::debug!("nothing to delete");
            return 0;
        }

        let removed = self.library.remove_ids(&ids);
        self.apply_search_filter();
        removed
    }

    /// Deletes the marked rows, or the selected row when nothing is marked.
    pub fn delete_marked_or_selected(&mut self) -> usize {
        let positions: Vec<usize> = if self.marked.is_empty() {
            vec![self.selected_index]
        } else {
            self.marked.iter().copied().collect()
        };
        self.delete_positions(positions)
    }

    /// Opens the add form with empty fields.
    pub fn open_form(&mut self) {
        self.screen = Screen::Form(BookForm::default());
    }

    /// The form being edited, if the add form is open.
    pub fn form_mut(&mut self) -> Option<&mut BookForm> {
        match &mut self.screen {
            Screen::Form(form) => Some(form),
            _ => None,
        }
    }

    /// Confirms the add form.
    ///
    /// When Save is enabled the new book is appended to the library, the form
    /// closes and the cursor moves to the new book if the current query shows
    /// it. Returns `Ok(false)` and changes nothing while Save is disabled.
    ///
    /// # Errors
    ///
    /// Propagates [`Library::append`] failures.
    pub fn save_form(&mut self) -> Result<bool> {
        let Screen::Form(form) = &self.screen else {
            return Ok(false);
        };

        let mut appended = Ok(None);
        let submitted = form.submit(|book| appended = self.library.append(book).map(Some));
        if !submitted {
            return Ok(false);
        }

        let new_id = appended?;
        self.screen = Screen::List;
        self.apply_search_filter();
        if let Some(position) = new_id.and_then(|id| self.view.position_of(id)) {
            self.selected_index = position;
        }
        Ok(true)
    }

    /// Opens the detail screen for the selected book.
    pub fn open_detail(&mut self) -> bool {
        match self.selected_id() {
            Some(id) => {
                self.screen = Screen::Detail(id);
                true
            }
            None => false,
        }
    }

    /// Returns to the list screen.
    pub fn back_to_list(&mut self) {
        self.screen = Screen::List;
    }

    /// Computes a renderable UI view model from current state and terminal dimensions.
    ///
    /// # Windowing Algorithm
    ///
    /// 1. Calculate available rows after subtracting UI chrome (header, footer, search)
    /// 2. Center window around selected index
    /// 3. Adjust window if near start/end to maximize visible items
    /// 4. Compute relative selection index within visible window
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let mut vm = UIViewModel {
            display_items: vec![],
            selected_index: 0,
            header: self.compute_header(),
            footer: self.compute_footer(),
            empty_state: None,
            search_bar: self.compute_search_bar(),
            detail: None,
            form: None,
        };

        match &self.screen {
            Screen::Detail(id) => {
                vm.detail = self.library.get(*id).map(DetailInfo::from_book);
                return vm;
            }
            Screen::Form(form) => {
                vm.form = Some(Self::compute_form(form));
                return vm;
            }
            Screen::List => {}
        }

        if self.view.is_empty() {
            vm.empty_state = Some(self.compute_empty_state());
            return vm;
        }

        let available_rows = self.calculate_available_rows(rows).max(1);

        let mut visible_start = self.selected_index.saturating_sub(available_rows / 2);
        let visible_end = (visible_start + available_rows).min(self.view.len());

        let actual_count = visible_end - visible_start;
        if actual_count < available_rows && self.view.len() >= available_rows {
            visible_start = visible_end.saturating_sub(available_rows);
        }

        let author_width = cols.saturating_sub(TITLE_COLUMN_WIDTH + 1);

        vm.display_items = self.view.ids()[visible_start..visible_end]
            .iter()
            .enumerate()
            .filter_map(|(relative_idx, id)| {
                let book = self.library.get(*id)?;
                Some(self.compute_display_item(book, visible_start + relative_idx, author_width))
            })
            .collect();
        vm.selected_index = self.selected_index.saturating_sub(visible_start);
        vm
    }

    fn compute_display_item(&self, book: &Book, absolute_idx: usize, author_width: usize) -> DisplayItem {
        let title_width = TITLE_COLUMN_WIDTH - MARK_GUTTER - 1;
        let title = truncate(&book.title, title_width);
        let author = truncate(&book.author, author_width);

        DisplayItem {
            title_highlights: self.highlight(&book.title, &title),
            author_highlights: self.highlight(&book.author, &author),
            title,
            author,
            is_selected: absolute_idx == self.selected_index,
            is_marked: self.marked.contains(&absolute_idx),
        }
    }

    /// Match range of the query in `full`, clipped to the `shown` prefix.
    fn highlight(&self, full: &str, shown: &str) -> Vec<(usize, usize)> {
        let shown_len = shown.chars().count();
        match_range(full, &self.query)
            .filter(|(start, _)| *start < shown_len)
            .map(|(start, end)| vec![(start, end.min(shown_len))])
            .unwrap_or_default()
    }

    fn compute_header(&self) -> HeaderInfo {
        let title = match &self.screen {
            Screen::List => format!(" Books ({}/{}) ", self.view.len(), self.library.len()),
            Screen::Detail(_) => " Book Details ".to_string(),
            Screen::Form(_) => " Add Book ".to_string(),
        };
        HeaderInfo { title }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match (&self.screen, self.input_mode) {
            (Screen::Form(form), _) if form.can_save() => {
                "Tab/↓: next field  Shift+Tab/↑: previous  Enter: save  ESC: cancel"
            }
            (Screen::Form(_), _) => {
                "Tab/↓: next field  Shift+Tab/↑: previous  Enter: save (title required)  ESC: cancel"
            }
            (Screen::Detail(_), _) => "ESC/Enter/q: back to list",
            (Screen::List, InputMode::Search(SearchFocus::Typing)) => {
                "ESC: exit search  Enter: results  Ctrl+n/p: navigate  Type to filter"
            }
            (Screen::List, InputMode::Search(SearchFocus::Navigating)) => {
                "ESC: exit search  /: edit query  j/k: navigate  space: mark  d: delete  Enter: details"
            }
            (Screen::List, InputMode::Normal) => {
                "j/k: navigate  /: search  a: add  space: mark  d: delete  Enter: details  q: quit"
            }
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }

    fn compute_search_bar(&self) -> Option<SearchBarInfo> {
        match (&self.screen, self.input_mode) {
            (Screen::List, InputMode::Search(focus)) => Some(SearchBarInfo {
                query: self.query.clone(),
                is_typing: focus == SearchFocus::Typing,
            }),
            _ => None,
        }
    }

    fn compute_empty_state(&self) -> EmptyState {
        if self.library.is_empty() {
            EmptyState {
                message: "No books yet".to_string(),
                subtitle: "Press 'a' to add one".to_string(),
            }
        } else {
            EmptyState {
                message: "No matches".to_string(),
                subtitle: format!("Nothing matches \"{}\"", self.query),
            }
        }
    }

    fn compute_form(form: &BookForm) -> FormInfo {
        FormInfo {
            fields: FormField::ALL
                .iter()
                .map(|field| FormFieldInfo {
                    label: field.label(),
                    value: form.value(*field).to_string(),
                    is_focused: form.focus == *field,
                })
                .collect(),
            can_save: form.can_save(),
        }
    }

    /// Calculates available rows for the table after subtracting UI chrome.
    ///
    /// Accounts for the blank top line, header, border, column headers, bottom
    /// border and footer, plus 3 rows for the search bar when it is shown.
    const fn calculate_available_rows(&self, total_rows: usize) -> usize {
        match self.input_mode {
            InputMode::Normal => total_rows.saturating_sub(6),
            InputMode::Search(_) => total_rows.saturating_sub(9),
        }
    }
}

/// Truncates `text` to `max` characters, ending with "..." when cut.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let keep = max.saturating_sub(3);
    let mut out: String = text.chars().take(keep).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> AppState {
        AppState::new(Library::seeded(), Theme::default())
    }

    fn titles(state: &AppState) -> Vec<String> {
        state.library.books().iter().map(|b| b.title.clone()).collect()
    }

    #[test]
    fn selection_wraps_both_ways() {
        let mut state = seeded();
        state.move_selection_up();
        assert_eq!(state.selected_index, 2);
        state.move_selection_down();
        assert_eq!(state.selected_index, 0);
    }

    #[test]
    fn selection_on_empty_view_is_noop() {
        let mut state = AppState::new(Library::new(), Theme::default());
        state.move_selection_down();
        state.move_selection_up();
        assert_eq!(state.selected_index, 0);
        assert!(state.selected_book().is_none());
    }

    #[test]
    fn filter_keeps_cursor_on_same_book() {
        let mut state = seeded();
        state.selected_index = 1;
        state.set_query("tolkien");
        assert_eq!(state.selected_index, 0);
        assert_eq!(state.selected_book().map(|b| b.title.as_str()), Some("The Lord of the Rings"));

        state.set_query("");
        assert_eq!(state.selected_index, 1);
    }

    #[test]
    fn delete_under_filter_uses_identity() {
        let mut state = seeded();
        state.set_query("the");
        assert_eq!(state.delete_positions([0]), 1);
        assert_eq!(titles(&state), ["1984", "Dune"]);
    }

    #[test]
    fn delete_ignores_positions_outside_view() {
        let mut state = seeded();
        state.set_query("dune");
        assert_eq!(state.delete_positions([1, 2]), 0);
        assert_eq!(state.library.len(), 3);
    }

    #[test]
    fn marks_delete_together_and_reset_on_filter() {
        let mut state = seeded();
        state.toggle_mark();
        state.move_selection_down();
        state.move_selection_down();
        state.toggle_mark();
        assert_eq!(state.marked, BTreeSet::from([0, 2]));

        assert_eq!(state.delete_marked_or_selected(), 2);
        assert_eq!(titles(&state), ["The Lord of the Rings"]);
        assert!(state.marked.is_empty());
    }

    #[test]
    fn toggle_mark_twice_unmarks() {
        let mut state = seeded();
        state.toggle_mark();
        state.toggle_mark();
        assert!(state.marked.is_empty());
    }

    #[test]
    fn delete_without_marks_removes_selected() {
        let mut state = seeded();
        state.move_selection_down();
        assert_eq!(state.delete_marked_or_selected(), 1);
        assert_eq!(titles(&state), ["1984", "Dune"]);
        assert_eq!(state.selected_index, 1);
    }

    #[test]
    fn save_form_appends_and_selects_new_book() {
        let mut state = seeded();
        state.open_form();
        let form = state.form_mut().unwrap();
        form.title = " Foundation ".to_string();
        form.author = "Isaac Asimov".to_string();

        assert!(state.save_form().unwrap());
        assert!(state.screen.is_list());
        assert_eq!(titles(&state), ["1984", "The Lord of the Rings", "Dune", "Foundation"]);
        assert_eq!(state.selected_index, 3);
    }

    #[test]
    fn save_form_with_blank_title_changes_nothing() {
        let mut state = seeded();
        state.open_form();
        state.form_mut().unwrap().author = "Nobody".to_string();

        assert!(!state.save_form().unwrap());
        assert!(matches!(state.screen, Screen::Form(_)));
        assert_eq!(state.library.len(), 3);
    }

    #[test]
    fn detail_opens_for_selected_book() {
        let mut state = seeded();
        state.move_selection_up();
        assert!(state.open_detail());

        let vm = state.compute_viewmodel(24, 80);
        let detail = vm.detail.expect("detail screen");
        assert_eq!(detail.title, "Dune");
        assert_eq!(detail.author, "Frank Herbert");
    }

    #[test]
    fn viewmodel_reports_counts_and_highlights() {
        let mut state = seeded();
        state.input_mode = InputMode::Search(SearchFocus::Typing);
        state.set_query("the");

        let vm = state.compute_viewmodel(24, 100);
        assert_eq!(vm.header.title, " Books (1/3) ");
        assert_eq!(vm.display_items.len(), 1);
        assert_eq!(vm.display_items[0].title_highlights, vec![(0, 3)]);
        assert!(vm.display_items[0].author_highlights.is_empty());
        assert_eq!(vm.search_bar.map(|s| s.query), Some("the".to_string()));
    }

    #[test]
    fn viewmodel_windows_long_lists() {
        let mut library = Library::new();
        for n in 0..40 {
            library.append(Book::new(format!("Book {n}"), "", "")).unwrap();
        }
        let mut state = AppState::new(library, Theme::default());
        state.selected_index = 39;

        let vm = state.compute_viewmodel(16, 80);
        assert_eq!(vm.display_items.len(), 10);
        assert_eq!(vm.display_items.last().map(|i| i.title.as_str()), Some("Book 39"));
        assert!(vm.display_items[vm.selected_index].is_selected);
    }

    #[test]
    fn empty_states_distinguish_empty_library_from_no_match() {
        let empty = AppState::new(Library::new(), Theme::default());
        assert_eq!(
            empty.compute_viewmodel(24, 80).empty_state.map(|e| e.message),
            Some("No books yet".to_string())
        );

        let mut state = seeded();
        state.set_query("zzz");
        assert_eq!(
            state.compute_viewmodel(24, 80).empty_state.map(|e| e.message),
            Some("No matches".to_string())
        );
    }

    #[test]
    fn truncate_counts_chars() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("Les Misérables", 8), "Les M...");
    }
}
