//! Tracer provider exporting spans to a local JSON lines file.
//!
//! Plugins run sandboxed without a collector to talk to, so finished spans
//! are encoded by [`SpanFormatter`] and appended through [`FileWriter`].

use super::file_writer::{FileWriter, RotationPolicy};
use super::span_formatter::SpanFormatter;
use futures_util::future::BoxFuture;
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use std::path::PathBuf;

/// Writes each exported batch as one OTLP/JSON line.
#[derive(Debug)]
struct FileSpanExporter {
    writer: FileWriter,
    formatter: SpanFormatter,
    is_shutdown: bool,
}

impl FileSpanExporter {
    fn new(file_path: PathBuf, resource: &Resource, scope: &'static str) -> Self {
        Self {
            writer: FileWriter::new(file_path, RotationPolicy::default()),
            formatter: SpanFormatter::new(resource, scope),
            is_shutdown: false,
        }
    }

    fn write_batch(&self, batch: &[SpanData]) -> ExportResult {
        if self.is_shutdown {
            return Err(TraceError::from("exporter is shut down"));
        }

        let document = self.formatter.format_batch(batch);
        self.writer
            .write_record(&document)
            .map_err(|e| TraceError::from(e.to_string()))
    }
}

impl SpanExporter for FileSpanExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        let result = self.write_batch(&batch);
        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.is_shutdown = true;
    }

    /// The resource is fixed at construction.
    fn set_resource(&mut self, _resource: &Resource) {}
}

/// Creates a provider that exports every span synchronously to `file_path`.
///
/// Spans are exported on the thread that closed them. The plugin has no async
/// runtime to drive a batch processor.
///
/// # Parameters
///
/// * `file_path` - Live trace file, rotated per [`RotationPolicy::default`]
/// * `resource` - Attributes attached to every exported batch
/// * `scope` - Instrumentation scope name in the OTLP output
pub fn create_tracer_provider(file_path: PathBuf, resource: Resource, scope: &'static str) -> TracerProvider {
    let exporter = FileSpanExporter::new(file_path, &resource, scope);

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}
