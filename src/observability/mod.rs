//! OpenTelemetry-based observability with file-based trace export.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → OpenTelemetry SDK → FileSpanExporter → JSON lines
//! ```
//!
//! # Features
//!
//! - **File-Based Export**: Traces written to `~/.local/share/zellij/bookshelf/bookshelf-otlp.json`
//! - **Rotation**: Size-based, with numbered backups (10MB and 3 backups by default)
//! - **OTLP Format**: Standard OpenTelemetry Protocol JSON, one batch per line
//!
//! # Configuration
//!
//! - `trace_level`: `EnvFilter` directive, default `"info"`
//! - `trace_max_bytes`, `trace_backups`: rotation policy
//!
//! # Usage
//!
//! ```rust,no_run
//! use bookshelf::observability::init_tracing;
//! use bookshelf::Config;
//!
//! init_tracing(&Config::default());
//! tracing::debug!("plugin initialized");
//! ```
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - [`tracer`]: Tracer provider with the file exporter
//! - [`span_formatter`]: OTLP JSON span serialization
//! - [`file_writer`]: Rotating file writer

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use file_writer::{RotationPolicy, DEFAULT_MAX_BACKUPS, DEFAULT_MAX_BYTES};
pub use init::{init_tracing, TRACE_FILE_NAME};
