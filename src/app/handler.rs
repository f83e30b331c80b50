//! Event handling and state transition logic.
//!
//! This module implements the event handler that turns user intents into state
//! changes and action sequences. It is the only place where screens change.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Key presses are mapped to [`Event`]s by the plugin runtime
//! 2. [`handle_event`] pattern-matches the event against the current screen
//! 3. State mutations occur via `AppState` methods
//! 4. Actions are collected and returned for execution
//!
//! # Event Types
//!
//! - **Navigation**: `KeyDown`, `KeyUp`
//! - **Input**: `Char`, `Backspace`, `Escape`
//! - **Search**: `SearchMode`, `FocusSearchBar`, `FocusResults`, `ExitSearch`
//! - **Deletion**: `ToggleMark`, `DeleteSelection`, `DeletePositions`
//! - **Screens**: `OpenDetail`, `CloseDetail`, `OpenForm`, `FormSave`, `FormCancel`
//!
//! # Example
//!
//! ```rust
//! use bookshelf::app::{handle_event, AppState, Event};
//! use bookshelf::library::Library;
//! use bookshelf::ui::Theme;
//!
//! let mut state = AppState::new(Library::seeded(), Theme::default());
//! let (should_render, actions) = handle_event(&mut state, &Event::KeyDown)?;
//! assert!(should_render);
//! assert!(actions.is_empty());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use super::modes::{InputMode, Screen, SearchFocus};
use crate::app::{Action, AppState};
use crate::domain::error::Result;

/// Events triggered by user input.
///
/// Events that make no sense on the current screen are ignored and report
/// that nothing needs re-rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Moves selection cursor down by one position (wraps to top).
    ///
    /// On the add form, moves focus to the next field instead.
    KeyDown,
    /// Moves selection cursor up by one position (wraps to bottom).
    ///
    /// On the add form, moves focus to the previous field instead.
    KeyUp,
    /// Closes the floating pane and hides the plugin UI.
    CloseFocus,
    /// Enters search mode with typing focus and an empty query.
    SearchMode,
    /// Focuses the search input field (from navigating mode).
    FocusSearchBar,
    /// Focuses the search results list (from typing mode).
    FocusResults,
    /// Exits search mode and clears the query.
    ExitSearch,
    /// Types a character into the search query or the focused form field.
    Char(char),
    /// Removes the last character from the search query or focused form field.
    Backspace,
    /// Backs out of whatever is open: form, detail page or search.
    Escape,

    /// Toggles the deletion mark on the selected row.
    ToggleMark,
    /// Deletes the marked rows, or the selected row when nothing is marked.
    DeleteSelection,
    /// Deletes the books at these positions of the visible list.
    DeletePositions(Vec<usize>),

    /// Shows the detail page for the selected book.
    OpenDetail,
    /// Returns from the detail page to the list.
    CloseDetail,

    /// Opens the add form.
    OpenForm,
    FormNextField,
    FormPrevField,
    /// Confirms the add form. Ignored while the title is blank.
    FormSave,
    /// Discards the add form without touching the library.
    FormCancel,
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// Returns whether the UI needs re-rendering, together with the actions to
/// execute in sequence.
///
/// # Errors
///
/// Returns errors from state mutation methods, such as a rejected append.
///
/// # Tracing
///
/// Each call creates a debug-level span with the event type.
#[allow(clippy::cognitive_complexity, clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::KeyDown => {
            if let Some(form) = state.form_mut() {
                form.focus_next();
                return Ok((true, vec![]));
            }
            if !state.screen.is_list() {
                return Ok((false, vec![]));
            }
            state.move_selection_down();
            Ok((true, vec![]))
        }
        Event::KeyUp => {
            if let Some(form) = state.form_mut() {
                form.focus_prev();
                return Ok((true, vec![]));
            }
            if !state.screen.is_list() {
                return Ok((false, vec![]));
            }
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::SearchMode => {
            if !state.screen.is_list() {
                return Ok((false, vec![]));
            }
            tracing::debug!("entering search mode");
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            state.set_query(String::new());
            Ok((true, vec![]))
        }
        Event::FocusSearchBar => {
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            Ok((true, vec![]))
        }
        Event::FocusResults => {
            if state.query.is_empty() {
                state.input_mode = InputMode::Normal;
                state.apply_search_filter();
                return Ok((true, vec![]));
            }

            state.input_mode = InputMode::Search(SearchFocus::Navigating);
            Ok((true, vec![]))
        }
        Event::ExitSearch => {
            tracing::debug!(query = %state.query, "exiting search mode");
            state.input_mode = InputMode::Normal;
            state.set_query(String::new());
            Ok((true, vec![]))
        }
        Event::Char(c) => {
            if let Some(form) = state.form_mut() {
                form.push_char(*c);
                return Ok((true, vec![]));
            }

            if !state.screen.is_list() || state.input_mode != InputMode::Search(SearchFocus::Typing) {
                return Ok((false, vec![]));
            }

            state.query.push(*c);
            tracing::trace!(query = %state.query, char = %c, "search query updated");
            state.apply_search_filter();

            Ok((true, vec![]))
        }
        Event::Backspace => {
            if let Some(form) = state.form_mut() {
                form.backspace();
                return Ok((true, vec![]));
            }

            if !state.screen.is_list() || !matches!(state.input_mode, InputMode::Search(_)) {
                return Ok((false, vec![]));
            }

            state.query.pop();
            state.apply_search_filter();

            Ok((true, vec![]))
        }
        Event::Escape => match state.screen {
            Screen::Form(_) => handle_event(state, &Event::FormCancel),
            Screen::Detail(_) => handle_event(state, &Event::CloseDetail),
            Screen::List if matches!(state.input_mode, InputMode::Search(_)) => {
                handle_event(state, &Event::ExitSearch)
            }
            Screen::List if state.query.is_empty() => Ok((false, vec![])),
            Screen::List => {
                state.set_query(String::new());
                Ok((true, vec![]))
            }
        },
        Event::ToggleMark => {
            if !state.screen.is_list() {
                return Ok((false, vec![]));
            }
            state.toggle_mark();
            Ok((true, vec![]))
        }
        Event::DeleteSelection => {
            if !state.screen.is_list() {
                return Ok((false, vec![]));
            }
            let removed = state.delete_marked_or_selected();
            tracing::debug!(removed, "delete requested");
            Ok((removed > 0, vec![]))
        }
        Event::DeletePositions(positions) => {
            if !state.screen.is_list() {
                return Ok((false, vec![]));
            }
            let removed = state.delete_positions(positions.iter().copied());
            tracing::debug!(positions = ?positions, removed, "delete requested");
            Ok((removed > 0, vec![]))
        }
        Event::OpenDetail => {
            if !state.screen.is_list() {
                return Ok((false, vec![]));
            }
            let opened = state.open_detail();
            if !opened {
                tracing::debug!("no book selected");
            }
            Ok((opened, vec![]))
        }
        Event::CloseDetail => {
            if !matches!(state.screen, Screen::Detail(_)) {
                return Ok((false, vec![]));
            }
            state.back_to_list();
            Ok((true, vec![]))
        }
        Event::OpenForm => {
            if !state.screen.is_list() {
                return Ok((false, vec![]));
            }
            tracing::debug!("opening add form");
            state.open_form();
            Ok((true, vec![]))
        }
        Event::FormNextField => match state.form_mut() {
            Some(form) => {
                form.focus_next();
                Ok((true, vec![]))
            }
            None => Ok((false, vec![])),
        },
        Event::FormPrevField => match state.form_mut() {
            Some(form) => {
                form.focus_prev();
                Ok((true, vec![]))
            }
            None => Ok((false, vec![])),
        },
        Event::FormSave => {
            let saved = state.save_form()?;
            if saved {
                tracing::debug!(total_books = state.library.len(), "book added");
            }
            Ok((saved, vec![]))
        }
        Event::FormCancel => {
            if !matches!(state.screen, Screen::Form(_)) {
                return Ok((false, vec![]));
            }
            tracing::debug!("add form cancelled");
            state.back_to_list();
            Ok((true, vec![]))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::Library;
    use crate::ui::theme::Theme;

    fn seeded() -> AppState {
        AppState::new(Library::seeded(), Theme::default())
    }

    fn send(state: &mut AppState, events: &[Event]) {
        for event in events {
            handle_event(state, event).unwrap();
        }
    }

    fn type_text(state: &mut AppState, text: &str) {
        for c in text.chars() {
            handle_event(state, &Event::Char(c)).unwrap();
        }
    }

    #[test]
    fn close_focus_emits_action() {
        let mut state = seeded();
        let (render, actions) = handle_event(&mut state, &Event::CloseFocus).unwrap();
        assert!(!render);
        assert_eq!(actions, vec![Action::CloseFocus]);
    }

    #[test]
    fn chars_outside_search_are_ignored() {
        let mut state = seeded();
        let (render, _) = handle_event(&mut state, &Event::Char('x')).unwrap();
        assert!(!render);
        assert!(state.query.is_empty());
    }

    #[test]
    fn typing_filters_live() {
        let mut state = seeded();
        send(&mut state, &[Event::SearchMode]);
        type_text(&mut state, "RING");
        assert_eq!(state.view.len(), 1);

        send(&mut state, &[Event::Backspace, Event::Backspace, Event::Backspace, Event::Backspace]);
        assert_eq!(state.view.len(), 3);
    }

    #[test]
    fn focus_results_with_empty_query_leaves_search() {
        let mut state = seeded();
        send(&mut state, &[Event::SearchMode, Event::FocusResults]);
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn escape_clears_search() {
        let mut state = seeded();
        send(&mut state, &[Event::SearchMode]);
        type_text(&mut state, "dune");
        send(&mut state, &[Event::Escape]);
        assert_eq!(state.input_mode, InputMode::Normal);
        assert!(state.query.is_empty());
        assert_eq!(state.view.len(), 3);
    }

    #[test]
    fn delete_in_search_results_removes_only_that_book() {
        let mut state = seeded();
        send(&mut state, &[Event::SearchMode]);
        type_text(&mut state, "herbert");
        send(&mut state, &[Event::FocusResults, Event::DeleteSelection]);

        let titles: Vec<_> = state.library.books().iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, ["1984", "The Lord of the Rings"]);
        assert!(state.view.is_empty());
    }

    #[test]
    fn delete_positions_out_of_range_does_not_render() {
        let mut state = seeded();
        let (render, _) = handle_event(&mut state, &Event::DeletePositions(vec![7])).unwrap();
        assert!(!render);
        assert_eq!(state.library.len(), 3);
    }

    #[test]
    fn form_flow_adds_book() {
        let mut state = seeded();
        send(&mut state, &[Event::OpenForm]);
        type_text(&mut state, "Neuromancer");
        send(&mut state, &[Event::FormNextField]);
        type_text(&mut state, "William Gibson");

        let (render, _) = handle_event(&mut state, &Event::FormSave).unwrap();
        assert!(render);
        assert!(state.screen.is_list());
        assert_eq!(state.library.books()[3].author, "William Gibson");
    }

    #[test]
    fn form_keys_do_not_touch_list() {
        let mut state = seeded();
        send(&mut state, &[Event::OpenForm, Event::KeyDown, Event::DeleteSelection]);
        assert_eq!(state.selected_index, 0);
        assert_eq!(state.library.len(), 3);
        match &state.screen {
            Screen::Form(form) => assert_eq!(form.focus, crate::app::FormField::Author),
            other => panic!("expected form, got {other:?}"),
        }
    }

    #[test]
    fn blank_title_keeps_form_open() {
        let mut state = seeded();
        send(&mut state, &[Event::OpenForm]);
        type_text(&mut state, "  ");
        let (render, _) = handle_event(&mut state, &Event::FormSave).unwrap();
        assert!(!render);
        assert!(matches!(state.screen, Screen::Form(_)));
    }

    #[test]
    fn cancel_discards_form() {
        let mut state = seeded();
        send(&mut state, &[Event::OpenForm]);
        type_text(&mut state, "Draft");
        send(&mut state, &[Event::Escape]);
        assert!(state.screen.is_list());
        assert_eq!(state.library.len(), 3);
    }

    #[test]
    fn detail_round_trip() {
        let mut state = seeded();
        send(&mut state, &[Event::KeyDown, Event::OpenDetail]);
        let id = state.library.books()[1].id;
        assert_eq!(state.screen, Screen::Detail(id));

        send(&mut state, &[Event::CloseDetail]);
        assert!(state.screen.is_list());
        assert_eq!(state.selected_index, 1);
    }

    #[test]
    fn detail_on_empty_list_does_nothing() {
        let mut state = AppState::new(Library::new(), Theme::default());
        let (render, _) = handle_event(&mut state, &Event::OpenDetail).unwrap();
        assert!(!render);
        assert!(state.screen.is_list());
    }
}
