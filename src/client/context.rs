//! Request context carried through the host's `web_request` round trip.
//!
//! Zellij hands the context map given to `web_request` back unchanged with the
//! matching `WebRequestResult`. We use it to tag each search with its
//! generation and with the trace context of the span that issued it, so the
//! completion can be correlated with the submit that caused it.

use std::collections::BTreeMap;

const GENERATION_KEY: &str = "metastream.generation";
const TRACE_ID_KEY: &str = "metastream.trace_id";
const PARENT_SPAN_ID_KEY: &str = "metastream.parent_span_id";

/// Distributed tracing context for linking a response to its request span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Span ID of the span that issued the request.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the trace context of the current `tracing` span.
    ///
    /// Returns `None` when no OpenTelemetry layer is installed or the span is
    /// not sampled.
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }

    /// Makes this context the remote parent of spans created while the
    /// returned guard is alive.
    #[must_use]
    pub fn attach(&self) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_id = TraceId::from_hex(&self.trace_id).ok()?;
        let span_id = SpanId::from_hex(&self.parent_span_id).ok()?;

        let span_context = SpanContext::new(trace_id, span_id, TraceFlags::SAMPLED, true, TraceState::default());

        Some(
            opentelemetry::Context::current()
                .with_remote_span_context(span_context)
                .attach(),
        )
    }
}

/// Metadata attached to one in-flight search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    /// Monotonic search counter value at submit time.
    pub generation: u64,

    pub trace_context: Option<TraceContext>,
}

impl RequestContext {
    /// Creates a context for `generation` tagged with the current trace.
    #[must_use]
    pub fn new(generation: u64) -> Self {
        Self {
            generation,
            trace_context: TraceContext::from_current(),
        }
    }

    /// Encodes the context as the string map the host round-trips.
    #[must_use]
    pub fn to_map(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        map.insert(GENERATION_KEY.to_string(), self.generation.to_string());
        if let Some(trace) = &self.trace_context {
            map.insert(TRACE_ID_KEY.to_string(), trace.trace_id.clone());
            map.insert(PARENT_SPAN_ID_KEY.to_string(), trace.parent_span_id.clone());
        }
        map
    }

    /// Decodes a context map returned with a `WebRequestResult`.
    ///
    /// Returns `None` if the map was not produced by [`Self::to_map`], which
    /// happens for web requests issued by other code in the same plugin.
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Option<Self> {
        let generation = map.get(GENERATION_KEY)?.parse().ok()?;

        let trace_context = match (map.get(TRACE_ID_KEY), map.get(PARENT_SPAN_ID_KEY)) {
            (Some(trace_id), Some(parent_span_id)) => Some(TraceContext {
                trace_id: trace_id.clone(),
                parent_span_id: parent_span_id.clone(),
            }),
            _ => None,
        };

        Some(Self {
            generation,
            trace_context,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_round_trip_keeps_trace() {
        let context = RequestContext {
            generation: 7,
            trace_context: Some(TraceContext {
                trace_id: "0af7651916cd43dd8448eb211c80319c".to_string(),
                parent_span_id: "b7ad6b7169203331".to_string(),
            }),
        };

        assert_eq!(RequestContext::from_map(&context.to_map()), Some(context));
    }

    #[test]
    fn foreign_map_is_ignored() {
        let mut map = BTreeMap::new();
        map.insert("other".to_string(), "1".to_string());
        assert_eq!(RequestContext::from_map(&map), None);

        map.insert(GENERATION_KEY.to_string(), "not-a-number".to_string());
        assert_eq!(RequestContext::from_map(&map), None);
    }

    #[test]
    fn without_subscriber_there_is_no_trace() {
        let context = RequestContext::new(1);
        assert!(context.trace_context.is_none());
        assert_eq!(context.to_map().len(), 1);
    }
}
