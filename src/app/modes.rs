//! Screen and input mode state types.
//!
//! The plugin shows one of three screens at a time:
//! - **List**: the book list, with an optional live search bar
//! - **Detail**: a read-only page for one book
//! - **Form**: the modal add form
//!
//! While the list is showing, [`InputMode`] decides whether keystrokes drive
//! navigation or type into the search query.
//!
//! # Example
//!
//! ```rust
//! use bookshelf::app::{InputMode, Screen, SearchFocus};
//!
//! let input_mode = InputMode::Search(SearchFocus::Typing);
//! let screen = Screen::List;
//! assert!(screen.is_list());
//! ```

use super::form::BookForm;
use crate::domain::BookId;

/// Focus state within search mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFocus {
    /// User is typing in the search input field.
    Typing,

    /// User is moving through the filtered results.
    ///
    /// j/k move, d deletes, enter opens details, / returns to Typing.
    Navigating,
}

/// Current input handling mode on the list screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Default navigation and command mode.
    ///
    /// Available keybindings: j/k (navigate), / (search), a (add), d (delete),
    /// space (mark), enter (details), q (quit).
    Normal,

    /// Active search mode with focus state.
    Search(SearchFocus),
}

/// Which screen is currently on display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// The book list.
    List,

    /// Read-only details of one book.
    Detail(BookId),

    /// The add form, holding the text typed so far.
    Form(BookForm),
}

impl Screen {
    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self, Self::List)
    }
}
