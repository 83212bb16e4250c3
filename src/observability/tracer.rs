//! Tracer provider whose exporter appends OTLP/JSON lines to a local file.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use futures_util::future::BoxFuture;
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;

use super::file_writer::FileWriter;
use super::span_formatter::SpanFormatter;

/// Writes each exported batch as one line of the trace file.
#[derive(Debug)]
struct FileSpanExporter {
    writer: FileWriter,
    formatter: SpanFormatter,
    stopped: AtomicBool,
}

impl FileSpanExporter {
    const fn new(path: PathBuf, resource: Resource) -> Self {
        Self {
            writer: FileWriter::new(path),
            formatter: SpanFormatter::new(resource),
            stopped: AtomicBool::new(false),
        }
    }

    fn write_batch(&self, batch: &[SpanData]) -> ExportResult {
        if self.stopped.load(Ordering::SeqCst) {
            return Err(TraceError::from("trace exporter stopped"));
        }
        let line = self.formatter.format_batch(batch).to_string();
        self.writer
            .write_line(&line)
            .map_err(|e| TraceError::from(format!("trace file write failed: {e}")))
    }
}

impl SpanExporter for FileSpanExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        let result = self.write_batch(&batch);
        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    // Resource is fixed at construction.
    fn set_resource(&mut self, _resource: &Resource) {}
}

/// Provider that exports every finished span synchronously to `path`.
///
/// Plugins run single-threaded under WASI, so the simple exporter is used
/// rather than a batching one that needs a background runtime.
pub fn create_tracer_provider(path: PathBuf, resource: Resource) -> TracerProvider {
    let exporter = FileSpanExporter::new(path, resource.clone());
    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use opentelemetry::KeyValue;

    #[test]
    fn test_stopped_exporter_rejects_batches() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.json");
        let mut exporter = FileSpanExporter::new(path.clone(), Resource::new(vec![KeyValue::new("service.name", "Marquee")]));

        assert!(exporter.write_batch(&[]).is_ok());
        exporter.shutdown();
        assert!(exporter.write_batch(&[]).is_err());

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 1);
        assert!(contents.contains("\"Marquee\""));
    }
}
