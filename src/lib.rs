//! Bookshelf: a Zellij plugin for keeping a personal list of books.
//!
//! Bookshelf shows a single scrollable list of books and lets the user:
//! - Narrow the list live with a case-insensitive search over title and author
//! - Add a book through a small modal form (title required)
//! - Delete one or several books, even while a search is active
//! - Open a read-only detail page for any book
//!
//! The collection lives in memory for the lifetime of the plugin. It starts
//! with a few sample books and is gone when the plugin unloads.

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling, add form                         │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                                    │
//! ┌───────────────┐                   ┌───────────────────┐
//! │ UI Layer      │                   │ Library Layer     │
//! │ (ui/)         │                   │ (library/)        │
//! │ - Rendering   │                   │ - Book collection │
//! │ - Theming     │                   │ - Search filter   │
//! └───────────────┘                   └───────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain, Infrastructure & Observability             │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use bookshelf::{handle_event, initialize, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! handle_event(&mut state, &Event::SearchMode)?;
//! for c in "dune".chars() {
//!     handle_event(&mut state, &Event::Char(c))?;
//! }
//! assert_eq!(state.view.len(), 1);
//! # Ok::<(), bookshelf::BookshelfError>(())
//! ```

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod library;
pub mod observability;
pub mod ui;

pub use app::{handle_event, Action, AppState, Event, InputMode, Screen, SearchFocus};
pub use domain::{Book, BookId, BookshelfError, Result};
pub use library::Library;
pub use ui::Theme;

use std::collections::BTreeMap;

/// What the library contains when the plugin loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeedMode {
    /// The three built-in sample books.
    #[default]
    Samples,
    /// No books at all.
    Empty,
}

impl std::str::FromStr for SeedMode {
    type Err = BookshelfError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "samples" | "sample" => Ok(Self::Samples),
            "empty" | "none" => Ok(Self::Empty),
            other => Err(BookshelfError::Config(format!(
                "unknown seed mode {other:?}, expected \"samples\" or \"empty\""
            ))),
        }
    }
}

impl SeedMode {
    /// Builds the starting library for this mode.
    #[must_use]
    pub fn library(self) -> Library {
        match self {
            Self::Samples => Library::seeded(),
            Self::Empty => Library::new(),
        }
    }
}

/// Plugin configuration parsed from Zellij's configuration system.
///
/// # Example
///
/// ```kdl
/// plugin location="file:/path/to/bookshelf.wasm" {
///     theme "catppuccin-latte"
///     theme_file "~/.config/zellij/bookshelf-theme.toml"
///     seed "empty"
///     trace_level "debug"
///     trace_max_bytes "1048576"
///     trace_backups "1"
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Built-in theme name. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file. `~` maps to the sandbox host mount.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for exported spans. Default: `"info"`
    pub trace_level: Option<String>,

    pub seed: SeedMode,

    /// Trace file size that triggers rotation.
    pub trace_max_bytes: u64,

    /// Rotated trace files to keep.
    pub trace_backups: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme_name: None,
            theme_file: None,
            trace_level: None,
            seed: SeedMode::default(),
            trace_max_bytes: observability::DEFAULT_MAX_BYTES,
            trace_backups: observability::DEFAULT_MAX_BACKUPS,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Unknown keys are ignored. Values that fail to parse fall back to their
    /// defaults.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use bookshelf::{Config, SeedMode};
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("seed".to_string(), "empty".to_string());
    /// map.insert("trace_backups".to_string(), "many".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.seed, SeedMode::Empty);
    /// assert_eq!(config.trace_backups, 3);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();

        let seed = config.get("seed").map_or(defaults.seed, |value| {
            value.parse().unwrap_or_else(|e: BookshelfError| {
                tracing::debug!(error = %e, "using sample books");
                defaults.seed
            })
        });

        Self {
            theme_name: non_empty(config.get("theme")),
            theme_file: non_empty(config.get("theme_file")),
            trace_level: non_empty(config.get("trace_level")),
            seed,
            trace_max_bytes: parse_or(config, "trace_max_bytes", defaults.trace_max_bytes),
            trace_backups: parse_or(config, "trace_backups", defaults.trace_backups),
        }
    }
}

fn non_empty(value: Option<&String>) -> Option<String> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty()).map(String::from)
}

fn parse_or<T>(config: &BTreeMap<String, String>, key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    config.get(key).map_or(default, |value| {
        value.trim().parse().unwrap_or_else(|_| {
            tracing::debug!(key, value = %value, "invalid config value, using default");
            default
        })
    })
}

/// Resolves the theme: `theme_file`, then `theme_name`, then the default.
///
/// Failures are logged and fall through to the next source.
#[must_use]
pub fn load_theme(config: &Config) -> Theme {
    if let Some(theme_file) = &config.theme_file {
        match Theme::from_file(infrastructure::expand_tilde(theme_file)) {
            Ok(theme) => return theme,
            Err(e) => {
                tracing::debug!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
            }
        }
    }

    config.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
        Theme::from_name(theme_name).unwrap_or_else(|| {
            tracing::debug!(theme_name = %theme_name, "unknown theme, using default");
            Theme::default()
        })
    })
}

/// Builds the initial application state from configuration.
///
/// Does not install tracing; the plugin shim does that first so this call is
/// already traced.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(seed = ?config.seed, "initializing bookshelf plugin");

    AppState::new(config.seed.library(), load_theme(config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
    }

    #[test]
    fn defaults_when_nothing_is_configured() {
        let config = Config::from_zellij(&BTreeMap::new());
        assert_eq!(config.seed, SeedMode::Samples);
        assert!(config.theme_name.is_none());
        assert_eq!(config.trace_max_bytes, observability::DEFAULT_MAX_BYTES);
    }

    #[test]
    fn parses_every_key() {
        let config = Config::from_zellij(&map(&[
            ("theme", "catppuccin-latte"),
            ("theme_file", " "),
            ("trace_level", "debug"),
            ("seed", "Empty"),
            ("trace_max_bytes", "2048"),
            ("trace_backups", "1"),
        ]));
        assert_eq!(config.theme_name.as_deref(), Some("catppuccin-latte"));
        assert!(config.theme_file.is_none());
        assert_eq!(config.trace_level.as_deref(), Some("debug"));
        assert_eq!(config.seed, SeedMode::Empty);
        assert_eq!(config.trace_max_bytes, 2048);
        assert_eq!(config.trace_backups, 1);
    }

    #[test]
    fn unknown_seed_falls_back_to_samples() {
        let config = Config::from_zellij(&map(&[("seed", "everything")]));
        assert_eq!(config.seed, SeedMode::Samples);
        assert!(matches!("everything".parse::<SeedMode>(), Err(BookshelfError::Config(_))));
        assert_eq!(" NONE ".parse::<SeedMode>().unwrap(), SeedMode::Empty);
    }

    #[test]
    fn initialize_respects_seed() {
        assert_eq!(initialize(&Config::default()).library.len(), 3);

        let empty = Config {
            seed: SeedMode::Empty,
            ..Config::default()
        };
        assert!(initialize(&empty).library.is_empty());
    }

    #[test]
    fn theme_resolution_order() {
        let named = Config {
            theme_name: Some("catppuccin-latte".to_string()),
            ..Config::default()
        };
        assert_eq!(load_theme(&named).name, "catppuccin-latte");

        let unknown = Config {
            theme_name: Some("neon".to_string()),
            ..Config::default()
        };
        assert_eq!(load_theme(&unknown).name, "catppuccin-mocha");

        let mut file = tempfile::NamedTempFile::new().unwrap();
        let mut custom = Theme::default();
        custom.name = "paper".to_string();
        write!(file, "{}", toml::to_string(&custom).unwrap()).unwrap();

        let from_file = Config {
            theme_file: Some(file.path().display().to_string()),
            ..named
        };
        assert_eq!(load_theme(&from_file).name, "paper");

        let missing_file = Config {
            theme_file: Some("/nowhere/theme.toml".to_string()),
            ..Config::default()
        };
        assert_eq!(load_theme(&missing_file).name, "catppuccin-mocha");
    }
}
