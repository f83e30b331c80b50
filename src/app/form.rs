//! Add form editing state.
//!
//! [`BookForm`] collects three raw text fields while the user types. It knows
//! nothing about the library: on confirmation it builds a [`Book`] with a fresh
//! identity and hands it to whatever callback the caller supplies.
//!
//! # Example
//!
//! ```rust
//! use bookshelf::app::BookForm;
//!
//! let mut form = BookForm::default();
//! assert!(!form.can_save());
//!
//! for c in "Foundation".chars() {
//!     form.push_char(c);
//! }
//! assert!(form.can_save());
//!
//! let mut saved = Vec::new();
//! assert!(form.submit(|book| saved.push(book)));
//! assert_eq!(saved[0].title, "Foundation");
//! ```

use crate::domain::{Book, BookDraft};

/// The three input fields of the add form, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Title,
    Author,
    Summary,
}

impl FormField {
    /// All fields in display order.
    pub const ALL: [Self; 3] = [Self::Title, Self::Author, Self::Summary];

    /// Next field, wrapping from Summary to Title.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Title => Self::Author,
            Self::Author => Self::Summary,
            Self::Summary => Self::Title,
        }
    }

    /// Previous field, wrapping from Title to Summary.
    #[must_use]
    pub const fn prev(self) -> Self {
        match self {
            Self::Title => Self::Summary,
            Self::Author => Self::Title,
            Self::Summary => Self::Author,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Author => "Author",
            Self::Summary => "Summary",
        }
    }
}

/// Raw text typed into the add form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BookForm {
    pub title: String,
    pub author: String,
    pub summary: String,
    pub focus: FormField,
}

impl BookForm {
    /// Text of `field` exactly as typed.
    #[must_use]
    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Title => &self.title,
            FormField::Author => &self.author,
            FormField::Summary => &self.summary,
        }
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            FormField::Title => &mut self.title,
            FormField::Author => &mut self.author,
            FormField::Summary => &mut self.summary,
        }
    }

    /// Appends a character to the focused field.
    pub fn push_char(&mut self, c: char) {
        self.focused_mut().push(c);
    }

    /// Removes the last character of the focused field.
    pub fn backspace(&mut self) {
        self.focused_mut().pop();
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Whether Save is enabled: the trimmed title must be non-empty.
    #[must_use]
    pub fn can_save(&self) -> bool {
        !self.title.trim().is_empty()
    }

    /// Trimmed, validated contents of the form.
    #[must_use]
    pub fn draft(&self) -> Option<BookDraft> {
        BookDraft::new(&self.title, &self.author, &self.summary)
    }

    /// Builds the new book and delivers it to `on_save`.
    ///
    /// Returns `false` without calling `on_save` while Save is disabled.
    pub fn submit<F>(&self, on_save: F) -> bool
    where
        F: FnOnce(Book),
    {
        let Some(draft) = self.draft() else {
            tracing::debug!("save ignored, title is blank");
            return false;
        };

        let book = draft.into_book();
        tracing::debug!(book_id = %book.id, title = %book.title, "form submitted");
        on_save(book);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_into(form: &mut BookForm, text: &str) {
        for c in text.chars() {
            form.push_char(c);
        }
    }

    #[test]
    fn typing_goes_to_focused_field() {
        let mut form = BookForm::default();
        type_into(&mut form, "Dune");
        form.focus_next();
        type_into(&mut form, "Herbert");
        form.focus_next();
        type_into(&mut form, "Spice");

        assert_eq!(form.title, "Dune");
        assert_eq!(form.author, "Herbert");
        assert_eq!(form.summary, "Spice");
    }

    #[test]
    fn focus_wraps_both_ways() {
        let mut form = BookForm::default();
        form.focus_prev();
        assert_eq!(form.focus, FormField::Summary);
        form.focus_next();
        assert_eq!(form.focus, FormField::Title);
    }

    #[test]
    fn backspace_on_empty_field_is_harmless() {
        let mut form = BookForm::default();
        form.backspace();
        assert_eq!(form.title, "");
        type_into(&mut form, "ab");
        form.backspace();
        assert_eq!(form.title, "a");
    }

    #[test]
    fn whitespace_title_disables_save() {
        let mut form = BookForm::default();
        type_into(&mut form, "   ");
        form.focus_next();
        type_into(&mut form, "Someone");
        assert!(!form.can_save());

        let mut called = false;
        assert!(!form.submit(|_| called = true));
        assert!(!called);
    }

    #[test]
    fn submit_trims_values_and_mints_fresh_ids() {
        let mut form = BookForm::default();
        type_into(&mut form, "  Foundation ");
        form.focus_next();
        type_into(&mut form, " Asimov ");

        let mut books = Vec::new();
        assert!(form.submit(|book| books.push(book)));
        assert!(form.submit(|book| books.push(book)));

        assert_eq!(books[0].title, "Foundation");
        assert_eq!(books[0].author, "Asimov");
        assert_eq!(books[0].summary, "");
        assert_ne!(books[0].id, books[1].id);
    }
}
