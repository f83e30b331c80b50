//! In-memory book collection and the views derived from it.
//!
//! # Modules
//!
//! - `store`: The authoritative [`Library`]
//! - `filter`: Case-insensitive search and the id-based [`FilteredView`]
//! - `seed`: The fixed sample books a new session starts with

pub mod filter;
pub mod seed;
pub mod store;

pub use filter::{filter_books, is_blank_query, match_range, FilteredView};
pub use seed::sample_books;
pub use store::Library;
