//! Domain layer for the Bookshelf plugin.
//!
//! Core types independent of Zellij APIs and rendering concerns.
//!
//! # Organization
//!
//! - [`book`]: Book record, identity and validated draft
//! - [`error`]: Error types and result aliases
//!
//! # Examples
//!
//! ```
//! use bookshelf::domain::{BookDraft, Book};
//!
//! let book: Book = BookDraft::new("Foundation", "Isaac Asimov", "")
//!     .map(BookDraft::into_book)
//!     .expect("title is not blank");
//! assert_eq!(book.author, "Isaac Asimov");
//! ```

pub mod book;
pub mod error;

pub use book::{Book, BookDraft, BookId};
pub use error::{BookshelfError, Result};
