//! Search filtering and the filtered view.
//!
//! The filtered view is a derived, non-owning subsequence of the [`Library`],
//! recomputed every time the query or the library changes. It stores only
//! [`BookId`]s, so positions the user sees on screen can always be resolved back
//! to identities before anything in the library is mutated.
//!
//! # Matching Rules
//!
//! - A blank query (empty or whitespace only) selects every book, in library
//!   order.
//! - Otherwise a book is selected when its title or author contains the query
//!   as a case-insensitive substring. The query is used exactly as typed.
//! - Relative library order is always preserved.
//!
//! # Example
//!
//! ```rust
//! use bookshelf::library::{filter_books, Library};
//!
//! let library = Library::seeded();
//! let hits = filter_books(library.books(), "the");
//! assert_eq!(hits.len(), 1);
//! assert_eq!(hits[0].title, "The Lord of the Rings");
//! ```

use crate::domain::{Book, BookId};
use crate::library::Library;
use std::collections::HashSet;

/// Returns `true` when the query selects everything.
#[must_use]
pub fn is_blank_query(query: &str) -> bool {
    query.trim().is_empty()
}

/// Selects the books whose title or author contains `query`, ignoring case.
///
/// Pure and idempotent. A query that matches nothing yields an empty vector.
#[must_use]
pub fn filter_books<'a>(books: &'a [Book], query: &str) -> Vec<&'a Book> {
    if is_blank_query(query) {
        return books.iter().collect();
    }

    let needle = query.to_lowercase();
    books.iter().filter(|book| book.matches(&needle)).collect()
}

/// Character-index range of the first case-insensitive occurrence of `query`.
///
/// Returns `(start, end)` with an exclusive end, in `char` positions so it can
/// be fed straight to the highlighter. `None` for blank queries or no match.
#[must_use]
pub fn match_range(text: &str, query: &str) -> Option<(usize, usize)> {
    if is_blank_query(query) {
        return None;
    }

    let hay: Vec<char> = text.chars().collect();
    let needle: Vec<char> = query.chars().collect();
    if needle.len() > hay.len() {
        return None;
    }

    (0..=hay.len() - needle.len())
        .find(|&start| {
            needle
                .iter()
                .zip(&hay[start..])
                .all(|(&n, &h)| n == h || n.to_lowercase().eq(h.to_lowercase()))
        })
        .map(|start| (start, start + needle.len()))
}

/// The list of book ids currently on screen, in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilteredView {
    ids: Vec<BookId>,
}

impl FilteredView {
    /// Derives the view of `library` for `query`.
    #[must_use]
    pub fn compute(library: &Library, query: &str) -> Self {
        let _span = tracing::debug_span!(
            "filtered_view_compute",
            total_books = library.len(),
            query_len = query.len()
        )
        .entered();

        let ids: Vec<BookId> = filter_books(library.books(), query)
            .into_iter()
            .map(|book| book.id)
            .collect();

        tracing::debug!(shown = ids.len(), "filtered view computed");
        Self { ids }
    }

    #[must_use]
    pub fn ids(&self) -> &[BookId] {
        &self.ids
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Id of the book at `position` in the view.
    #[must_use]
    pub fn get(&self, position: usize) -> Option<BookId> {
        self.ids.get(position).copied()
    }

    /// Position of `id` in the view, if it is shown.
    #[must_use]
    pub fn position_of(&self, id: BookId) -> Option<usize> {
        self.ids.iter().position(|shown| *shown == id)
    }

    /// Resolves view positions to book identities.
    ///
    /// Positions with no corresponding element are skipped. The result is what
    /// [`Library::remove_ids`] expects, so deleting rows of a filtered list never
    /// touches books that are not on screen.
    ///
    /// # Example
    ///
    /// ```rust
    /// use bookshelf::library::{FilteredView, Library};
    ///
    /// let mut library = Library::seeded();
    /// let view = FilteredView::compute(&library, "the");
    /// let ids = view.resolve_positions([0, 7]);
    /// library.remove_ids(&ids);
    ///
    /// let titles: Vec<_> = library.books().iter().map(|b| b.title.as_str()).collect();
    /// assert_eq!(titles, ["1984", "Dune"]);
    /// ```
    #[must_use]
    pub fn resolve_positions<I>(&self, positions: I) -> HashSet<BookId>
    where
        I: IntoIterator<Item = usize>,
    {
        positions
            .into_iter()
            .filter_map(|position| {
                let id = self.get(position);
                if id.is_none() {
                    tracing::trace!(position, shown = self.len(), "ignoring out of range position");
                }
                id
            })
            .collect()
    }
}
