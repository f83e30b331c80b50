//! The authoritative in-memory book collection.
//!
//! [`Library`] is the only mutable store of books. Every derived view (the
//! filtered list, the detail screen) is recomputed from it. It is owned by the
//! application state and lives exactly as long as the plugin pane.
//!
//! # Invariants
//!
//! - No two books share a [`BookId`].
//! - Insertion order is preserved and is the default display order.

use crate::domain::error::{BookshelfError, Result};
use crate::domain::{Book, BookId};
use std::collections::HashSet;

/// Ordered, id-unique collection of books.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Library {
    books: Vec<Book>,
}

impl Library {
    /// Creates an empty library.
    #[must_use]
    pub const fn new() -> Self {
        Self { books: Vec::new() }
    }

    /// Creates a library holding the fixed sample books.
    ///
    /// # Examples
    ///
    /// ```
    /// use bookshelf::library::Library;
    ///
    /// let library = Library::seeded();
    /// assert_eq!(library.len(), 3);
    /// assert_eq!(library.books()[0].title, "1984");
    /// ```
    #[must_use]
    pub fn seeded() -> Self {
        Self {
            books: super::seed::sample_books(),
        }
    }

    /// All books in insertion order.
    #[must_use]
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.books.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Looks up a book by identity.
    #[must_use]
    pub fn get(&self, id: BookId) -> Option<&Book> {
        self.books.iter().find(|book| book.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: BookId) -> bool {
        self.get(id).is_some()
    }

    /// Iterates over the ids of all books in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = BookId> + '_ {
        self.books.iter().map(|book| book.id)
    }

    /// Appends a book at the end of the collection.
    ///
    /// New books are never inserted at an arbitrary position. Two books with
    /// identical text are allowed as long as their ids differ.
    ///
    /// # Errors
    ///
    /// Returns [`BookshelfError::DuplicateId`] if a book with the same id is
    /// already present. The library is left untouched in that case.
    pub fn append(&mut self, book: Book) -> Result<BookId> {
        if self.contains(book.id) {
            tracing::debug!(book_id = %book.id, "refusing to append duplicate id");
            return Err(BookshelfError::DuplicateId(book.id));
        }

        let id = book.id;
        tracing::debug!(book_id = %id, title = %book.title, "appending book");
        self.books.push(book);
        Ok(id)
    }

    /// Removes every book whose id is in `ids`, wherever it sits.
    ///
    /// Survivors keep their relative order. Ids that are not in the library are
    /// ignored. Returns the number of books removed.
    pub fn remove_ids(&mut self, ids: &HashSet<BookId>) -> usize {
        if ids.is_empty() {
            return 0;
        }

        let before = self.books.len();
        self.books.retain(|book| !ids.contains(&book.id));
        let removed = before - self.books.len();

        tracing::debug!(requested = ids.len(), removed, remaining = self.books.len(), "books removed");
        removed
    }
}
