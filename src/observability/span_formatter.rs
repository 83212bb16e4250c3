//! Serializes exported spans as OTLP/JSON, one document per batch.

use std::time::{Duration, SystemTime};

use opentelemetry::trace::{Event, Link, SpanId, SpanKind, Status};
use opentelemetry::{Key, KeyValue, Value};
use opentelemetry_sdk::export::trace::SpanData;
use opentelemetry_sdk::resource::Resource;
use serde_json::{json, Value as JsonValue};

/// Instrumentation scope recorded on every batch.
pub const SCOPE_NAME: &str = "Marquee";

/// Builds `resourceSpans` documents for the trace file.
pub struct SpanFormatter {
    resource: Resource,
}

impl SpanFormatter {
    pub const fn new(resource: Resource) -> Self {
        Self { resource }
    }

    /// One OTLP document holding every span in `batch` under a single
    /// resource and scope.
    pub fn format_batch(&self, batch: &[SpanData]) -> JsonValue {
        let resource: Vec<JsonValue> = self.resource.iter().map(|(k, v)| attribute(k, v)).collect();

        json!({
            "resourceSpans": [{
                "resource": { "attributes": resource },
                "scopeSpans": [{
                    "scope": { "name": SCOPE_NAME },
                    "spans": batch.iter().map(span).collect::<Vec<_>>(),
                }],
            }],
        })
    }
}

fn span(data: &SpanData) -> JsonValue {
    let parent = if data.parent_span_id == SpanId::INVALID {
        String::new()
    } else {
        format!("{:016x}", data.parent_span_id)
    };
    let (code, message) = match &data.status {
        Status::Unset => (0, String::new()),
        Status::Ok => (1, String::new()),
        Status::Error { description } => (2, description.to_string()),
    };

    json!({
        "traceId": format!("{:032x}", data.span_context.trace_id()),
        "spanId": format!("{:016x}", data.span_context.span_id()),
        "parentSpanId": parent,
        "name": data.name,
        "kind": kind_code(&data.span_kind),
        "startTimeUnixNano": unix_nanos(data.start_time),
        "endTimeUnixNano": unix_nanos(data.end_time),
        "attributes": attributes(&data.attributes),
        "events": data.events.iter().map(event).collect::<Vec<_>>(),
        "links": data.links.iter().map(link).collect::<Vec<_>>(),
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
        "traceId": format!("{:032x}", link.span_context.trace_id()),
        "spanId": format!("{:016x}", link.span_context.span_id()),
        "attributes": attributes(&link.attributes),
    })
}

const fn kind_code(kind: &SpanKind) -> u8 {
    match kind {
        SpanKind::Internal => 1,
        SpanKind::Server => 2,
        SpanKind::Client => 3,
        SpanKind::Producer => 4,
        SpanKind::Consumer => 5,
    }
}

fn attributes(pairs: &[KeyValue]) -> Vec<JsonValue> {
    pairs.iter().map(|kv| attribute(&kv.key, &kv.value)).collect()
}

fn attribute(key: &Key, value: &Value) -> JsonValue {
    json!({ "key": key.as_str(), "value": any_value(value) })
}

/// OTLP `AnyValue`. Integers are strings per the JSON mapping; arrays are
/// flattened to their debug text.
fn any_value(value: &Value) -> JsonValue {
    match value {
        Value::Bool(b) => json!({ "boolValue": b }),
        Value::I64(i) => json!({ "intValue": i.to_string() }),
        Value::F64(f) => json!({ "doubleValue": f }),
        Value::String(s) => json!({ "stringValue": s.as_str() }),
        Value::Array(_) => json!({ "stringValue": format!("{value:?}") }),
    }
}

fn unix_nanos(at: SystemTime) -> String {
    at.duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or(Duration::ZERO)
        .as_nanos()
        .to_string()
}

impl std::fmt::Debug for SpanFormatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpanFormatter").field("scope", &SCOPE_NAME).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_batch_carries_resource_and_scope() {
        let formatter = SpanFormatter::new(Resource::new(vec![KeyValue::new("service.name", "Marquee")]));
        let doc = formatter.format_batch(&[]);

        let group = &doc["resourceSpans"][0];
        let attrs = group["resource"]["attributes"].as_array().unwrap();
        assert!(attrs.iter().any(|a| a["key"] == "service.name"
            && a["value"]["stringValue"] == "Marquee"));
        assert_eq!(group["scopeSpans"][0]["scope"]["name"], SCOPE_NAME);
        assert_eq!(group["scopeSpans"][0]["spans"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn test_any_value_mapping() {
        assert_eq!(any_value(&Value::I64(42)), json!({ "intValue": "42" }));
        assert_eq!(any_value(&Value::Bool(true)), json!({ "boolValue": true }));
        assert_eq!(any_value(&Value::from("alien")), json!({ "stringValue": "alien" }));
    }

    #[test]
    fn test_unix_nanos_before_epoch_is_zero() {
        let before = SystemTime::UNIX_EPOCH - Duration::from_secs(1);
        assert_eq!(unix_nanos(before), "0");
        assert_eq!(unix_nanos(SystemTime::UNIX_EPOCH + Duration::from_nanos(7)), "7");
    }
}
