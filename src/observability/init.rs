//! Tracing subscriber setup.

use super::tracer;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Service and instrumentation scope name attached to every span.
pub const SERVICE_NAME: &str = "MetaStream";

/// File inside the data directory that receives exported spans.
pub const TRACE_FILE_NAME: &str = "metastream-otlp.json";

/// Installs the global subscriber: an `EnvFilter` built from
/// `config.trace_level` feeding an OpenTelemetry layer that exports to
/// [`TRACE_FILE_NAME`] in the plugin data directory.
///
/// Tracing is best effort. If the data directory cannot be created nothing is
/// installed, and calls after the first successful one are ignored.
///
/// # Parameters
///
/// * `config` - Supplies `trace_level`, an `EnvFilter` directive such as
///   `"debug"` or `"metastream=trace"`. An invalid directive falls back to
///   `"info"`.
///
/// # Example
///
/// ```no_run
/// use metastream::observability::init_tracing;
/// use metastream::Config;
///
/// let config = Config {
///     trace_level: "debug".to_string(),
///     ..Config::default()
/// };
/// init_tracing(&config);
/// tracing::debug!("written to metastream-otlp.json");
/// ```
pub fn init_tracing(config: &Config) {
    let data_dir = crate::infrastructure::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let filter = EnvFilter::try_new(&config.trace_level).unwrap_or_else(|_| EnvFilter::new("info"));

    let resource = Resource::new(vec![
        KeyValue::new("service.name", SERVICE_NAME),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);

    let provider = tracer::create_tracer_provider(data_dir.join(TRACE_FILE_NAME), resource, SERVICE_NAME);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    let _ = tracing_subscriber::registry().with(filter).with(otel_layer).try_init();
}
