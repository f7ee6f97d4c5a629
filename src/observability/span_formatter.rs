//! Compact JSON records for exported spans, one record per span.
//!
//! ```json
//! {"exportedAt":"2026-01-01T00:00:00.000000Z","service":"hero-roster","traceId":"…","spanId":"…",
//!  "parentSpanId":null,"name":"submit","start":"…","durationMicros":412,
//!  "attributes":{"operation":"creating hero"},"status":"ok"}
//! ```

use chrono::{DateTime, SecondsFormat, Utc};
use opentelemetry::trace::{SpanId, Status};
use opentelemetry::{KeyValue, Value};
use opentelemetry_sdk::export::trace::SpanData;
use serde_json::{json, Map, Value as JsonValue};

/// Turns exported spans into JSON records tagged with a service name.
pub struct SpanFormatter {
    service: String,
}

impl SpanFormatter {
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    /// Formats `batch` as newline-free JSON strings stamped with `exported_at`.
    pub fn format_batch(&self, batch: &[SpanData], exported_at: DateTime<Utc>) -> Vec<String> {
        let stamp = timestamp(exported_at);
        batch
            .iter()
            .map(|span| self.format_span(span, &stamp).to_string())
            .collect()
    }

    fn format_span(&self, span: &SpanData, exported_at: &str) -> JsonValue {
        let parent = (span.parent_span_id != SpanId::INVALID)
            .then(|| format!("{:016x}", span.parent_span_id));
        let duration = span
            .end_time
            .duration_since(span.start_time)
            .unwrap_or_default();

        json!({
            "exportedAt": exported_at,
            "service": self.service,
            "traceId": format!("{:032x}", span.span_context.trace_id()),
            "spanId": format!("{:016x}", span.span_context.span_id()),
            "parentSpanId": parent,
            "name": span.name,
            "start": timestamp(DateTime::<Utc>::from(span.start_time)),
            "durationMicros": u64::try_from(duration.as_micros()).unwrap_or(u64::MAX),
            "attributes": attributes(&span.attributes),
            "status": status(&span.status),
        })
    }
}

impl std::fmt::Debug for SpanFormatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpanFormatter").field("service", &self.service).finish()
    }
}

fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn attributes(attributes: &[KeyValue]) -> JsonValue {
    let map: Map<String, JsonValue> = attributes
        .iter()
        .map(|kv| (kv.key.to_string(), attribute_value(&kv.value)))
        .collect();
    JsonValue::Object(map)
}

fn attribute_value(value: &Value) -> JsonValue {
    match value {
        Value::Bool(b) => json!(b),
        Value::I64(i) => json!(i),
        Value::F64(f) => json!(f),
        other => json!(other.to_string()),
    }
}

fn status(status: &Status) -> JsonValue {
    match status {
        Status::Unset => json!("unset"),
        Status::Ok => json!("ok"),
        Status::Error { description } => json!({ "error": description.to_string() }),
    }
}
