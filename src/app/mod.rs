//! Application layer coordinating state, events, and actions.
//!
//! This module sits between the plugin runtime (main.rs) and the domain and
//! library layers. It implements the event-driven architecture that powers the
//! interactive UI.
//!
//! # Architecture
//!
//! ```text
//! User Input → Events → Event Handler → State Mutations → Actions → Side Effects
//!                                             ↓
//!                                     View Model → Render
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`form`]: Add form editing state
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`modes`]: Screen and input mode state machine types
//! - [`state`]: Central application state container and view model computation

pub mod actions;
pub mod form;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use form::{BookForm, FormField};
pub use handler::{handle_event, Event};
pub use modes::{InputMode, Screen, SearchFocus};
pub use state::AppState;
