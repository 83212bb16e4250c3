//! Subscriber setup.

use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use super::span_formatter::SCOPE_NAME;
use super::tracer;
use crate::Config;

/// Trace file name inside the plugin data directory.
pub const TRACE_FILE_NAME: &str = "marquee-otlp.json";

const DEFAULT_LEVEL: &str = "info";

/// Installs the global subscriber: an [`EnvFilter`] built from
/// `config.trace_level` (default `info`) feeding an OpenTelemetry layer that
/// exports to `<data dir>/marquee-otlp.json`.
///
/// Tracing is best effort. If the data directory cannot be created, or a
/// subscriber is already installed, this returns without doing anything.
pub fn init_tracing(config: &Config) {
    let directive = config.trace_level.as_deref().unwrap_or(DEFAULT_LEVEL);
    let filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL));

    let data_dir = crate::infrastructure::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![KeyValue::new("service.name", SCOPE_NAME)]);
    let provider = tracer::create_tracer_provider(data_dir.join(TRACE_FILE_NAME), resource);
    let layer = OpenTelemetryLayer::new(provider.tracer(SCOPE_NAME));

    let _ = tracing_subscriber::registry().with(filter).with(layer).try_init();
}
