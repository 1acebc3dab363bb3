//! OTLP/JSON encoding of finished spans.
//!
//! Each exported batch becomes one `resourceSpans` document:
//!
//! ```json
//! {"resourceSpans":[{
//!   "resource":{"attributes":[{"key":"service.name","value":{"stringValue":"MetaStream"}}]},
//!   "scopeSpans":[{"scope":{"name":"MetaStream"},"spans":[...]}]
//! }]}
//! ```
//!
//! IDs are lowercase hex, timestamps are decimal strings of nanoseconds since
//! the Unix epoch, as the OTLP JSON mapping requires for 64-bit integers.

use opentelemetry::trace::{Event, Link, SpanId, SpanKind, Status};
use opentelemetry::{KeyValue, Value};
use opentelemetry_sdk::export::trace::SpanData;
use opentelemetry_sdk::resource::Resource;
use serde_json::{json, Value as JsonValue};
use std::time::{SystemTime, UNIX_EPOCH};

/// Encodes span batches under a fixed resource and instrumentation scope.
pub struct SpanFormatter {
    resource_attributes: Vec<JsonValue>,
    scope: &'static str,
}

impl SpanFormatter {
    /// Captures the resource attributes once, since every batch repeats them.
    ///
    /// # Parameters
    ///
    /// * `resource` - Process-wide attributes such as `service.name`
    /// * `scope` - Instrumentation scope name written for every batch
    pub fn new(resource: &Resource, scope: &'static str) -> Self {
        let resource_attributes = resource
            .iter()
            .map(|(key, value)| attribute(key.as_str(), value))
            .collect();

        Self {
            resource_attributes,
            scope,
        }
    }

    /// Builds the OTLP document for one batch.
    ///
    /// An empty batch still yields a document with the resource and an empty
    /// `spans` array.
    pub fn format_batch(&self, batch: &[SpanData]) -> JsonValue {
        let spans: Vec<JsonValue> = batch.iter().map(format_span).collect();

        json!({
            "resourceSpans": [{
                "resource": { "attributes": self.resource_attributes },
                "scopeSpans": [{
                    "scope": { "name": self.scope },
                    "spans": spans,
                }],
            }],
        })
    }
}

fn format_span(span: &SpanData) -> JsonValue {
    let parent_span_id = if span.parent_span_id == SpanId::INVALID {
        String::new()
    } else {
        span.parent_span_id.to_string()
    };
    let (code, message) = status(&span.status);

    json!({
        "traceId": span.span_context.trace_id().to_string(),
        "spanId": span.span_context.span_id().to_string(),
        "parentSpanId": parent_span_id,
        "name": span.name,
        "kind": kind_code(&span.span_kind),
        "startTimeUnixNano": unix_nanos(span.start_time),
        "endTimeUnixNano": unix_nanos(span.end_time),
        "attributes": attributes(&span.attributes),
        "events": span.events.iter().map(event).collect::<Vec<_>>(),
        "links": span.links.iter().map(link).collect::<Vec<_>>(),
        "status": { "code": code, "message": message },
    })
}

fn event(event: &Event) -> JsonValue {
    json!({
        "timeUnixNano": unix_nanos(event.timestamp),
        "name": event.name,
        "attributes": attributes(&event.attributes),
    })
}

fn link(link: &Link) -> JsonValue {
    json!({
        "traceId": link.span_context.trace_id().to_string(),
        "spanId": link.span_context.span_id().to_string(),
        "attributes": attributes(&link.attributes),
    })
}

fn attributes(pairs: &[KeyValue]) -> Vec<JsonValue> {
    pairs.iter().map(|kv| attribute(kv.key.as_str(), &kv.value)).collect()
}

fn attribute(key: &str, value: &Value) -> JsonValue {
    json!({ "key": key, "value": any_value(value) })
}

/// OTLP `AnyValue`. Arrays are flattened to their string form.
fn any_value(value: &Value) -> JsonValue {
    match value {
        Value::Bool(b) => json!({ "boolValue": b }),
        Value::I64(i) => json!({ "intValue": i.to_string() }),
        Value::F64(f) => json!({ "doubleValue": f }),
        Value::String(_) | Value::Array(_) => json!({ "stringValue": value.as_str() }),
    }
}

/// OTLP `SpanKind` enum value.
const fn kind_code(kind: &SpanKind) -> u8 {
    match kind {
        SpanKind::Internal => 1,
        SpanKind::Server => 2,
        SpanKind::Client => 3,
        SpanKind::Producer => 4,
        SpanKind::Consumer => 5,
    }
}

fn status(status: &Status) -> (u8, String) {
    match status {
        Status::Unset => (0, String::new()),
        Status::Ok => (1, String::new()),
        Status::Error { description } => (2, description.to_string()),
    }
}

/// Nanoseconds since the epoch as a decimal string, `"0"` for earlier times.
fn unix_nanos(time: SystemTime) -> String {
    time.duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_nanos())
        .to_string()
}

impl std::fmt::Debug for SpanFormatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpanFormatter").field("scope", &self.scope).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn attribute_values_follow_otlp_mapping() {
        assert_eq!(any_value(&Value::Bool(true)), json!({"boolValue": true}));
        assert_eq!(any_value(&Value::I64(42)), json!({"intValue": "42"}));
        assert_eq!(any_value(&Value::from("cats")), json!({"stringValue": "cats"}));
    }

    #[test]
    fn timestamps_are_decimal_nanos() {
        assert_eq!(unix_nanos(UNIX_EPOCH + Duration::from_millis(1)), "1000000");
        assert_eq!(unix_nanos(UNIX_EPOCH - Duration::from_secs(1)), "0");
    }

    #[test]
    fn empty_batch_carries_resource_and_scope() {
        let resource = Resource::new(vec![KeyValue::new("service.name", "MetaStream")]);
        let formatter = SpanFormatter::new(&resource, "MetaStream");

        let document = formatter.format_batch(&[]);
        let resource_spans = &document["resourceSpans"][0];

        assert_eq!(resource_spans["scopeSpans"][0]["scope"]["name"], "MetaStream");
        assert_eq!(resource_spans["scopeSpans"][0]["spans"], json!([]));
        assert!(resource_spans["resource"]["attributes"]
            .as_array()
            .unwrap()
            .contains(&json!({"key": "service.name", "value": {"stringValue": "MetaStream"}})));
    }
}
