//! Worker thread message types for cross-thread communication.
//!
//! The plugin thread hands raw web-request results to the worker, which decodes
//! them and answers with typed pages. Every message carries the [`PageKey`] of
//! the request so the plugin thread can discard answers for superseded keys.
//! Trace context travels along so worker spans join the plugin's trace.

use crate::domain::{PageKey, ResultPage};
use serde::{Deserialize, Serialize};

/// Distributed tracing context for cross-thread span propagation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking spans across threads.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the trace and span IDs of the current tracing span.
    ///
    /// Returns `None` when no valid OpenTelemetry span is active, for example
    /// when tracing was never initialized.
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
}

/// Messages sent from the plugin thread to the worker thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// Decode the body of a finished catalog request.
    DecodePage {
        /// Key of the request that produced this body.
        key: PageKey,

        /// HTTP status of the response.
        status: u16,

        /// Response body. Catalog responses are UTF-8 JSON.
        body: String,

        /// Trace context for linking spans across threads.
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

impl WorkerMessage {
    /// Creates a `DecodePage` message with the current trace context.
    #[must_use]
    pub fn decode_page(key: PageKey, status: u16, body: String) -> Self {
        Self::DecodePage {
            key,
            status,
            body,
            trace_context: TraceContext::from_current(),
        }
    }

    /// Key of the request this message belongs to.
    #[must_use]
    pub const fn key(&self) -> &PageKey {
        match self {
            Self::DecodePage { key, .. } => key,
        }
    }

    pub(crate) const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::DecodePage { trace_context, .. } => trace_context.as_ref(),
        }
    }
}

/// Responses sent from the worker thread back to the plugin thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WorkerResponse {
    /// The body decoded into a result page.
    PageDecoded {
        key: PageKey,
        page: ResultPage,
    },

    /// The request failed: non-success status or undecodable body.
    PageFailed {
        key: PageKey,
        /// Human-readable error message.
        message: String,
    },

    /// The worker could not process a message at all.
    Error {
        /// Key of the failed request, when it could still be read from the
        /// message. `None` means the plugin thread fails whatever is loading.
        #[serde(default)]
        key: Option<PageKey>,
        /// Human-readable error message.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_without_trace_context_omits_field() {
        let message = WorkerMessage::DecodePage {
            key: PageKey::new("alien", 2),
            status: 200,
            body: "{}".to_string(),
            trace_context: None,
        };
        let json = serde_json::to_string(&message).unwrap();
        assert!(!json.contains("trace_context"));

        let back: WorkerMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(back, message);
    }

    #[test]
    fn test_error_response_without_key_still_parses() {
        let response: WorkerResponse = serde_json::from_str(r#"{"Error":{"message":"boom"}}"#).unwrap();
        assert_eq!(
            response,
            WorkerResponse::Error {
                key: None,
                message: "boom".to_string()
            }
        );
    }

    #[test]
    fn test_builder_without_tracing_has_no_context() {
        let message = WorkerMessage::decode_page(PageKey::new("alien", 1), 200, String::new());
        assert!(message.trace_context().is_none());
    }
}
