//! OTLP JSON span formatter.
//!
//! Converts OpenTelemetry span data into the OTLP/JSON encoding, one document
//! per exported batch, so trace files can be fed to any OTLP-aware viewer.
//! The document shape is modelled with `serde` structs rather than ad-hoc
//! `json!` values.

use opentelemetry::trace::{SpanId, SpanKind, Status};
use opentelemetry::{KeyValue, Value};
use opentelemetry_sdk::export::trace::SpanData;
use opentelemetry_sdk::resource::Resource;
use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OtlpDocument {
    pub resource_spans: Vec<ResourceSpans>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceSpans {
    pub resource: OtlpResource,
    pub scope_spans: Vec<ScopeSpans>,
}

#[derive(Debug, Serialize)]
pub struct OtlpResource {
    pub attributes: Vec<OtlpKeyValue>,
}

#[derive(Debug, Serialize)]
pub struct ScopeSpans {
    pub scope: Scope,
    pub spans: Vec<OtlpSpan>,
}

#[derive(Debug, Serialize)]
pub struct Scope {
    pub name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OtlpSpan {
    pub trace_id: String,
    pub span_id: String,
    /// Empty for root spans.
    pub parent_span_id: String,
    pub name: String,
    pub kind: u8,
    pub start_time_unix_nano: String,
    pub end_time_unix_nano: String,
    pub attributes: Vec<OtlpKeyValue>,
    pub events: Vec<OtlpEvent>,
    pub links: Vec<OtlpLink>,
    pub status: OtlpStatus,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OtlpEvent {
    pub time_unix_nano: String,
    pub name: String,
    pub attributes: Vec<OtlpKeyValue>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OtlpLink {
    pub trace_id: String,
    pub span_id: String,
    pub attributes: Vec<OtlpKeyValue>,
}

#[derive(Debug, Serialize)]
pub struct OtlpStatus {
    /// 0 unset, 1 ok, 2 error.
    pub code: u8,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct OtlpKeyValue {
    pub key: String,
    pub value: AnyValue,
}

/// OTLP attribute value. Integers are strings, as OTLP/JSON requires for
/// 64-bit numbers.
#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AnyValue {
    BoolValue(bool),
    IntValue(String),
    DoubleValue(f64),
    StringValue(String),
}

impl From<&Value> for AnyValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Bool(b) => Self::BoolValue(*b),
            Value::I64(i) => Self::IntValue(i.to_string()),
            Value::F64(f) => Self::DoubleValue(*f),
            Value::String(s) => Self::StringValue(s.to_string()),
            // Arrays are flattened to their debug form.
            Value::Array(_) => Self::StringValue(format!("{value:?}")),
        }
    }
}

impl From<&KeyValue> for OtlpKeyValue {
    fn from(kv: &KeyValue) -> Self {
        Self {
            key: kv.key.to_string(),
            value: AnyValue::from(&kv.value),
        }
    }
}

impl From<&Status> for OtlpStatus {
    fn from(status: &Status) -> Self {
        let (code, message) = match status {
            Status::Unset => (0, String::new()),
            Status::Ok => (1, String::new()),
            Status::Error { description } => (2, description.to_string()),
        };
        Self { code, message }
    }
}

/// OTLP integer code for a span kind.
#[must_use]
pub const fn span_kind_code(kind: &SpanKind) -> u8 {
    match kind {
        SpanKind::Internal => 1,
        SpanKind::Server => 2,
        SpanKind::Client => 3,
        SpanKind::Producer => 4,
        SpanKind::Consumer => 5,
    }
}

/// Nanoseconds since the Unix epoch as a decimal string. Pre-epoch is 0.
fn unix_nanos(time: SystemTime) -> String {
    time.duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default()
        .to_string()
}

fn attributes<'a>(kvs: impl IntoIterator<Item = &'a KeyValue>) -> Vec<OtlpKeyValue> {
    kvs.into_iter().map(OtlpKeyValue::from).collect()
}

/// Formats batches of spans under one resource and instrumentation scope.
pub struct SpanFormatter {
    resource: Resource,
    scope_name: String,
}

impl SpanFormatter {
    #[must_use]
    pub fn new(resource: Resource, scope_name: impl Into<String>) -> Self {
        Self {
            resource,
            scope_name: scope_name.into(),
        }
    }

    /// Builds the OTLP document for one exported batch.
    #[must_use]
    pub fn format_batch(&self, batch: &[SpanData]) -> OtlpDocument {
        let resource_attributes = self
            .resource
            .iter()
            .map(|(key, value)| OtlpKeyValue {
                key: key.to_string(),
                value: AnyValue::from(value),
            })
            .collect();

        OtlpDocument {
            resource_spans: vec![ResourceSpans {
                resource: OtlpResource {
                    attributes: resource_attributes,
                },
                scope_spans: vec![ScopeSpans {
                    scope: Scope {
                        name: self.scope_name.clone(),
                    },
                    spans: batch.iter().map(Self::format_span).collect(),
                }],
            }],
        }
    }

    /// Serializes one batch to a single JSON line.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if serialization fails.
    pub fn format_line(&self, batch: &[SpanData]) -> serde_json::Result<String> {
        serde_json::to_string(&self.format_batch(batch))
    }

    fn format_span(span: &SpanData) -> OtlpSpan {
        let parent_span_id = if span.parent_span_id == SpanId::INVALID {
            String::new()
        } else {
            format!("{:016x}", span.parent_span_id)
        };

        OtlpSpan {
            trace_id: format!("{:032x}", span.span_context.trace_id()),
            span_id: format!("{:016x}", span.span_context.span_id()),
            parent_span_id,
            name: span.name.to_string(),
            kind: span_kind_code(&span.span_kind),
            start_time_unix_nano: unix_nanos(span.start_time),
            end_time_unix_nano: unix_nanos(span.end_time),
            attributes: attributes(&span.attributes),
            events: span
                .events
                .iter()
                .map(|event| OtlpEvent {
                    time_unix_nano: unix_nanos(event.timestamp),
                    name: event.name.to_string(),
                    attributes: attributes(&event.attributes),
                })
                .collect(),
            links: span
                .links
                .iter()
                .map(|link| OtlpLink {
                    trace_id: format!("{:032x}", link.span_context.trace_id()),
                    span_id: format!("{:016x}", link.span_context.span_id()),
                    attributes: attributes(&link.attributes),
                })
                .collect(),
            status: OtlpStatus::from(&span.status),
        }
    }
}

impl std::fmt::Debug for SpanFormatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpanFormatter")
            .field("scope_name", &self.scope_name)
            .finish_non_exhaustive()
    }
}
