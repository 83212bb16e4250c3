//! Tracing export for the plugin and its worker.
//!
//! Spans from `tracing` macros go through `tracing-opentelemetry` into a
//! file exporter that writes OTLP/JSON, one batch per line:
//!
//! ```text
//! tracing → OpenTelemetryLayer → FileSpanExporter → marquee-otlp.json
//! ```
//!
//! The file lives in the plugin data directory and rotates at 10 MB, keeping
//! three numbered backups. Verbosity comes from the `trace_level` plugin
//! option (an `EnvFilter` directive, default `info`).

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::{init_tracing, TRACE_FILE_NAME};
