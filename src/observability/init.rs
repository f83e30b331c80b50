//! Tracing initialization and subscriber setup.

use super::file_writer::RotationPolicy;
use super::tracer;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// File name of the trace log inside the data directory.
pub const TRACE_FILE_NAME: &str = "bookshelf-otlp.json";

const SERVICE_NAME: &str = "Bookshelf";
const DEFAULT_LEVEL: &str = "info";

/// Builds the `EnvFilter` for `level`, falling back to `info` for directives
/// that do not parse.
fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
}

/// Installs the global tracing subscriber with file-based OTLP export.
///
/// Spans are filtered by `config.trace_level` (default `info`) and written to
/// `/host/.local/share/zellij/bookshelf/bookshelf-otlp.json`, rotating per the
/// configured size and backup count.
///
/// Observability is best effort: if the data directory cannot be created the
/// plugin runs without tracing. Only the first call installs a subscriber.
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or(DEFAULT_LEVEL);

    let data_dir = crate::infrastructure::paths::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![
        opentelemetry::KeyValue::new("service.name", SERVICE_NAME),
        opentelemetry::KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);

    let policy = RotationPolicy {
        max_bytes: config.trace_max_bytes,
        max_backups: config.trace_backups,
    };
    let provider = tracer::create_tracer_provider(
        data_dir.join(TRACE_FILE_NAME),
        policy,
        resource,
        env!("CARGO_PKG_NAME"),
    );

    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    let _ = tracing_subscriber::registry()
        .with(env_filter(level))
        .with(otel_layer)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn invalid_level_falls_back_to_info() {
        assert_eq!(env_filter("bookshelf=loud").max_level_hint(), Some(LevelFilter::INFO));
        assert_eq!(env_filter("debug").max_level_hint(), Some(LevelFilter::DEBUG));
    }
}
