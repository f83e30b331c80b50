//! Error types for the Bookshelf plugin.
//!
//! This module defines the centralized error type [`BookshelfError`] and a type alias
//! [`Result`] used throughout the crate. Errors are derived with `thiserror`.
//!
//! Most of the plugin is infallible by construction: filtering never fails and
//! deleting an unknown position is a no-op. The variants here cover the ambient
//! failure points (theme files, configuration, trace output) plus the one
//! collection invariant a caller can violate.

use crate::domain::book::BookId;
use thiserror::Error;

/// The main error type for Bookshelf operations.
///
/// # Examples
///
/// ```
/// use bookshelf::domain::BookshelfError;
///
/// fn load_theme() -> Result<(), BookshelfError> {
///     Err(BookshelfError::Theme("unknown theme".to_string()))
/// }
/// assert!(load_theme().is_err());
/// ```
#[derive(Debug, Error)]
pub enum BookshelfError {
    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme file could not be read or parsed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration value is invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A book with this identity is already in the library.
    ///
    /// The library never holds two records with the same id. Books built by the
    /// add form always carry a freshly minted id, so this only surfaces when a
    /// caller re-appends a book it already inserted.
    #[error("Book {0} is already in the library")]
    DuplicateId(BookId),
}

/// A specialized `Result` type for Bookshelf operations.
pub type Result<T> = std::result::Result<T, BookshelfError>;
