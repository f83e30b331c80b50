//! Zellij plugin wrapper and entry point.
//!
//! This is the thin integration layer between the bookshelf library and the
//! Zellij plugin system. It maps Zellij key events onto library events,
//! executes the resulting actions and delegates rendering.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Subscribe**: Register for `Key` events
//! 3. **Update**: Map keys to events, delegate to `handle_event`
//! 4. **Render**: Call the library render function
//!
//! # Keybindings
//!
//! Global:
//! - `Ctrl+n` / `Ctrl+p`: Move down / up
//!
//! Book list:
//! - `j`/`Down`, `k`/`Up`: Move selection
//! - `/`: Search
//! - `a`: Add a book
//! - `Space`: Mark or unmark the selected book
//! - `d`/`Delete`: Delete marked books, or the selected one
//! - `Enter`: Show details
//! - `q`: Close plugin
//!
//! Search (typing): characters edit the query, `Enter`/`Tab` move to the results,
//! `Esc` leaves search. Search (results): list keys apply, `/` edits the query.
//!
//! Add form: `Tab`/`Down` next field, `Shift+Tab`/`Up` previous field,
//! `Enter` save, `Esc` cancel.
//!
//! Details: `Esc`, `Enter`, `q` or `Backspace` go back.

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;

use bookshelf::{handle_event, Action, Config, Event, InputMode, Screen, SearchFocus};

register_plugin!(State);

/// Plugin state wrapper around the library's `AppState`.
struct State {
    app: bookshelf::AppState,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: bookshelf::initialize(&Config::default()),
        }
    }
}

impl ZellijPlugin for State {
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        bookshelf::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(config = ?config, "parsed configuration");
        self.app = bookshelf::initialize(&config);
        tracing::debug!(books = self.app.library.len(), theme = %self.app.theme.name, "app state initialized");

        subscribe(&[EventType::Key]);
    }

    /// Returns `true` if the plugin UI should re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span_name = format!("plugin_update::{event_name}");
        let span = tracing::debug_span!("plugin_update_event", otel.name = %span_name, event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled successfully"
                );
                for a in actions {
                    Self::execute_action(&a);
                }
                should_render
            }
            Err(e) => {
                tracing::error!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        bookshelf::ui::render(&self.app, rows, cols);
    }
}

impl State {
    /// Gets a string name for a Zellij event for logging purposes.
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events for the current screen.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::debug!(bare_key = ?key.bare_key, "key event");

        if key.has_modifiers(&[KeyModifier::Ctrl]) {
            return match key.bare_key {
                BareKey::Char('n') => Some(Event::KeyDown),
                BareKey::Char('p') => Some(Event::KeyUp),
                _ => None,
            };
        }

        match &self.app.screen {
            Screen::Form(_) => Self::map_form_key(key),
            Screen::Detail(_) => Self::map_detail_key(key),
            Screen::List => match self.app.input_mode {
                InputMode::Normal => Self::map_list_key(key),
                InputMode::Search(SearchFocus::Typing) => Self::map_search_typing_key(key),
                InputMode::Search(SearchFocus::Navigating) => Self::map_search_results_key(key),
            },
        }
    }

    fn map_list_key(key: &KeyWithModifier) -> Option<Event> {
        Some(match key.bare_key {
            BareKey::Down | BareKey::Char('j') => Event::KeyDown,
            BareKey::Up | BareKey::Char('k') => Event::KeyUp,
            BareKey::Char('/') => Event::SearchMode,
            BareKey::Char('a') => Event::OpenForm,
            BareKey::Char(' ') => Event::ToggleMark,
            BareKey::Char('d') | BareKey::Delete => Event::DeleteSelection,
            BareKey::Enter => Event::OpenDetail,
            BareKey::Char('q') => Event::CloseFocus,
            BareKey::Esc => Event::Escape,
            _ => return None,
        })
    }

    fn map_search_typing_key(key: &KeyWithModifier) -> Option<Event> {
        Some(match key.bare_key {
            BareKey::Down => Event::KeyDown,
            BareKey::Up => Event::KeyUp,
            BareKey::Esc => Event::ExitSearch,
            BareKey::Enter | BareKey::Tab => Event::FocusResults,
            BareKey::Backspace => Event::Backspace,
            BareKey::Char(c) => Event::Char(c),
            _ => return None,
        })
    }

    fn map_search_results_key(key: &KeyWithModifier) -> Option<Event> {
        Some(match key.bare_key {
            BareKey::Down | BareKey::Char('j') => Event::KeyDown,
            BareKey::Up | BareKey::Char('k') => Event::KeyUp,
            BareKey::Char('/') => Event::FocusSearchBar,
            BareKey::Char(' ') => Event::ToggleMark,
            BareKey::Char('d') | BareKey::Delete => Event::DeleteSelection,
            BareKey::Enter => Event::OpenDetail,
            BareKey::Backspace => Event::Backspace,
            BareKey::Esc => Event::ExitSearch,
            _ => return None,
        })
    }

    fn map_form_key(key: &KeyWithModifier) -> Option<Event> {
        Some(match key.bare_key {
            BareKey::Tab if key.has_modifiers(&[KeyModifier::Shift]) => Event::FormPrevField,
            BareKey::Tab | BareKey::Down => Event::FormNextField,
            BareKey::Up => Event::FormPrevField,
            BareKey::Enter => Event::FormSave,
            BareKey::Esc => Event::FormCancel,
            BareKey::Backspace => Event::Backspace,
            BareKey::Char(c) => Event::Char(c),
            _ => return None,
        })
    }

    fn map_detail_key(key: &KeyWithModifier) -> Option<Event> {
        match key.bare_key {
            BareKey::Esc | BareKey::Enter | BareKey::Backspace | BareKey::Char('q') => {
                Some(Event::CloseDetail)
            }
            _ => None,
        }
    }

    /// Translates library actions to Zellij API calls.
    #[tracing::instrument(level = "debug")]
    fn execute_action(action: &Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
        }
    }
}
