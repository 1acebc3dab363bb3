//! OpenTelemetry tracing with file-based export.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → opentelemetry_sdk → FileSpanExporter → JSON lines
//! ```
//!
//! Spans land in `~/.local/share/zellij/metastream/metastream-otlp.json`
//! (seen from the sandbox under `/host`), one OTLP/JSON document per line,
//! rotated at 10 MB with three backups kept. The filter comes from the
//! `trace_level` plugin option and defaults to `info`.
//!
//! - [`init`]: subscriber setup
//! - `tracer`: provider and span exporter
//! - `span_formatter`: OTLP/JSON encoding
//! - `file_writer`: rotating JSON lines writer

mod file_writer;
pub mod init;
mod span_formatter;
mod tracer;

pub use init::init_tracing;
