//! Book domain model.
//!
//! A [`Book`] is one entry in the user's list. Its [`BookId`] is assigned once at
//! creation and is the only thing that identifies the record; title, author and
//! summary are plain display text. New books enter the system through a
//! [`BookDraft`], which owns the trimming and non-empty title rule applied by the
//! add form.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Number of seconds in one minute.
const SECONDS_PER_MINUTE: i64 = 60;

/// Number of seconds in one hour.
const SECONDS_PER_HOUR: i64 = 3600;

/// Number of seconds in one day.
const SECONDS_PER_DAY: i64 = 86400;

/// Next identity handed out by [`BookId::fresh`]. Starts at 1 and only grows.
static NEXT_BOOK_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque, permanent identity of a book.
///
/// Ids are minted from a process-wide monotonic counter, so an id is never
/// handed out twice, even across separate [`Library`](crate::library::Library)
/// instances. Mutations that cross a filtered view are always expressed in
/// terms of ids, never positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BookId(u64);

impl BookId {
    /// Mints a new identity that has never been returned before.
    ///
    /// # Examples
    ///
    /// ```
    /// use bookshelf::domain::BookId;
    ///
    /// let a = BookId::fresh();
    /// let b = BookId::fresh();
    /// assert_ne!(a, b);
    /// ```
    #[must_use]
    pub fn fresh() -> Self {
        Self(NEXT_BOOK_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One entry in the book list.
///
/// The record itself places no constraint on its text fields. The non-empty
/// title rule lives in [`BookDraft`], which is the only way the add form builds
/// books.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub summary: String,
    /// Unix timestamp of when the book was added.
    pub added_at: i64,
}

impl Book {
    /// Creates a book with a fresh id, stamped with the current time.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        summary: impl Into<String>,
    ) -> Self {
        Self {
            id: BookId::fresh(),
            title: title.into(),
            author: author.into(),
            summary: summary.into(),
            added_at: chrono::Utc::now().timestamp(),
        }
    }

    /// Returns `true` if the title or author contains `needle_lower`.
    ///
    /// `needle_lower` must already be lowercased; the fields are lowercased here
    /// so that the comparison is case-insensitive on both sides.
    ///
    /// # Examples
    ///
    /// ```
    /// use bookshelf::domain::Book;
    ///
    /// let book = Book::new("Dune", "Frank Herbert", "");
    /// assert!(book.matches("herb"));
    /// assert!(book.matches("dun"));
    /// assert!(!book.matches("tolkien"));
    /// ```
    #[must_use]
    pub fn matches(&self, needle_lower: &str) -> bool {
        self.title.to_lowercase().contains(needle_lower)
            || self.author.to_lowercase().contains(needle_lower)
    }

    /// Returns a human-readable string describing how long ago the book was added.
    ///
    /// - Less than 1 minute: "just now"
    /// - Less than 1 hour: "Xm ago"
    /// - Less than 1 day: "Xh ago"
    /// - Otherwise: "Xd ago"
    #[must_use]
    pub fn added_ago(&self) -> String {
        Self::format_age(chrono::Utc::now().timestamp() - self.added_at)
    }

    fn format_age(diff: i64) -> String {
        if diff < SECONDS_PER_MINUTE {
            "just now".to_string()
        } else if diff < SECONDS_PER_HOUR {
            format!("{}m ago", diff / SECONDS_PER_MINUTE)
        } else if diff < SECONDS_PER_DAY {
            format!("{}h ago", diff / SECONDS_PER_HOUR)
        } else {
            format!("{}d ago", diff / SECONDS_PER_DAY)
        }
    }
}

/// Validated input for a new book.
///
/// All three fields are trimmed of leading and trailing whitespace. A draft
/// only exists when the trimmed title is non-empty; author and summary may be
/// empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookDraft {
    title: String,
    author: String,
    summary: String,
}

impl BookDraft {
    /// Trims the raw inputs and returns a draft, or `None` if the title is blank.
    ///
    /// # Examples
    ///
    /// ```
    /// use bookshelf::domain::BookDraft;
    ///
    /// let draft = BookDraft::new("  Foundation ", " Asimov", "").unwrap();
    /// assert_eq!(draft.title(), "Foundation");
    /// assert_eq!(draft.author(), "Asimov");
    ///
    /// assert!(BookDraft::new("   ", "Someone", "Something").is_none());
    /// ```
    #[must_use]
    pub fn new(title: &str, author: &str, summary: &str) -> Option<Self> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }
        Some(Self {
            title: title.to_string(),
            author: author.trim().to_string(),
            summary: summary.trim().to_string(),
        })
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }

    #[must_use]
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Consumes the draft and builds a book with a fresh identity.
    #[must_use]
    pub fn into_book(self) -> Book {
        Book::new(self.title, self.author, self.summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_ids_are_strictly_increasing() {
        let ids: Vec<BookId> = (0..50).map(|_| BookId::fresh()).collect();
        assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn books_with_same_text_have_distinct_ids() {
        let a = Book::new("Dune", "Frank Herbert", "");
        let b = Book::new("Dune", "Frank Herbert", "");
        assert_ne!(a.id, b.id);
        assert_ne!(a, b);
    }

    #[test]
    fn matches_is_case_insensitive_on_title_and_author() {
        let book = Book::new("The Lord of the Rings", "J.R.R. Tolkien", "Hobbits");
        assert!(book.matches("the"));
        assert!(book.matches("tolk"));
        assert!(book.matches("lord of"));
        assert!(!book.matches("hobbits"), "summary is not searched");
    }

    #[test]
    fn draft_trims_every_field() {
        let draft = BookDraft::new("\tNeuromancer\n", "  William Gibson ", "  cyberpunk  ")
            .expect("title is not blank");
        assert_eq!(draft.title(), "Neuromancer");
        assert_eq!(draft.author(), "William Gibson");
        assert_eq!(draft.summary(), "cyberpunk");

        let book = draft.into_book();
        assert_eq!(book.title, "Neuromancer");
        assert_eq!(book.summary, "cyberpunk");
    }

    #[test]
    fn draft_rejects_blank_title_regardless_of_other_fields() {
        assert!(BookDraft::new("", "", "").is_none());
        assert!(BookDraft::new(" \t ", "Author", "Summary").is_none());
    }

    #[test]
    fn draft_allows_empty_author_and_summary() {
        let draft = BookDraft::new("Solaris", "   ", "").expect("title is not blank");
        assert_eq!(draft.author(), "");
        assert_eq!(draft.summary(), "");
    }

    #[test]
    fn format_age_buckets() {
        assert_eq!(Book::format_age(5), "just now");
        assert_eq!(Book::format_age(300), "5m ago");
        assert_eq!(Book::format_age(7200), "2h ago");
        assert_eq!(Book::format_age(3 * 86400), "3d ago");
    }
}
