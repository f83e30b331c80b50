//! Infrastructure layer for the Zellij sandbox environment.

pub mod paths;

pub use paths::{expand_tilde, get_data_dir};
