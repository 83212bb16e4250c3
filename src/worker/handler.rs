//! Worker thread implementation for decoding catalog responses.
//!
//! Response bodies can run to tens of kilobytes of JSON. Parsing them on the
//! worker keeps the plugin thread free to render while a page is in flight.

use crate::catalog;
use crate::domain::{MarqueeError, PageKey};
use crate::worker::{TraceContext, WorkerMessage, WorkerResponse};
use serde::{Deserialize, Serialize};
use zellij_tile::prelude::{PluginMessage, ZellijWorker};
use zellij_tile::shim::post_message_to_plugin;

/// Worker thread state.
///
/// Decoding is stateless; the counter only feeds diagnostics.
#[derive(Serialize, Deserialize, Default)]
pub struct MarqueeWorker {
    #[serde(skip)]
    decoded: u64,
}

impl MarqueeWorker {
    /// Reattaches the plugin thread's span so worker spans share its trace.
    ///
    /// Returns a guard that must be held while the message is processed.
    fn attach_parent_trace_context(trace_context: &TraceContext) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        Some(opentelemetry::Context::current().with_remote_span_context(span_context).attach())
    }

    /// Processes a worker message and returns the response for the plugin.
    pub fn handle_message(&mut self, message: WorkerMessage) -> WorkerResponse {
        let _context_guard = message
            .trace_context()
            .and_then(Self::attach_parent_trace_context);

        match message {
            WorkerMessage::DecodePage { key, status, body, .. } => {
                let _span = tracing::debug_span!("decode_page", key = %key, status, body_len = body.len()).entered();

                match catalog::decode_page(status, body.as_bytes()) {
                    Ok(page) => {
                        self.decoded += 1;
                        tracing::debug!(
                            results = page.results.len(),
                            total_pages = page.total_pages,
                            decoded_total = self.decoded,
                            "page decoded"
                        );
                        WorkerResponse::PageDecoded { key, page }
                    }
                    Err(e) => {
                        tracing::debug!(error = %e, "page decode failed");
                        WorkerResponse::PageFailed {
                            key,
                            message: e.to_string(),
                        }
                    }
                }
            }
        }
    }
}

/// Best-effort key lookup in a payload that failed to deserialize, so the
/// plugin thread can still fail the right request.
fn recover_key(payload: &str) -> Option<PageKey> {
    let value: serde_json::Value = serde_json::from_str(payload).ok()?;
    let key = value.get("DecodePage")?.get("key")?.clone();
    serde_json::from_value(key).ok()
}

fn init_worker_tracing() {
    crate::observability::init_tracing(&crate::Config::default());
}

static WORKER_TRACING_INITIALIZED: std::sync::atomic::AtomicBool =
    std::sync::atomic::AtomicBool::new(false);

fn reply(name: String, response: &WorkerResponse) {
    match serde_json::to_string(response) {
        Ok(payload) => post_message_to_plugin(PluginMessage {
            name,
            payload,
            worker_name: None,
        }),
        Err(e) => tracing::debug!(error = %e, "failed to serialize worker response"),
    }
}

impl ZellijWorker<'_> for MarqueeWorker {
    /// Decodes one message from the plugin thread and posts the answer back
    /// under the same message name.
    fn on_message(&mut self, message: String, payload: String) {
        if !WORKER_TRACING_INITIALIZED.swap(true, std::sync::atomic::Ordering::Relaxed) {
            init_worker_tracing();
        }

        let response = match serde_json::from_str::<WorkerMessage>(&payload) {
            Ok(worker_message) => self.handle_message(worker_message),
            Err(e) => {
                tracing::debug!(error = %e, "failed to deserialize worker message");
                WorkerResponse::Error {
                    key: recover_key(&payload),
                    message: MarqueeError::Worker(format!("unreadable worker message: {e}")).to_string(),
                }
            }
        };

        reply(message, &response);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(status: u16, body: &str) -> WorkerResponse {
        let mut worker = MarqueeWorker::default();
        worker.handle_message(WorkerMessage::DecodePage {
            key: PageKey::new("alien", 1),
            status,
            body: body.to_string(),
            trace_context: None,
        })
    }

    #[test]
    fn test_successful_body_decodes_into_page() {
        let body = r#"{"page":1,"results":[{"id":348,"title":"Alien"}],"total_pages":3,"total_results":41}"#;
        match decode(200, body) {
            WorkerResponse::PageDecoded { key, page } => {
                assert_eq!(key, PageKey::new("alien", 1));
                assert_eq!(page.results.len(), 1);
                assert_eq!(page.total_pages, 3);
            }
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[test]
    fn test_error_status_becomes_page_failed() {
        let body = r#"{"status_code":7,"status_message":"Invalid API key: You must be granted a valid key."}"#;
        match decode(401, body) {
            WorkerResponse::PageFailed { key, message } => {
                assert_eq!(key.page, 1);
                assert!(message.contains("Invalid API key"));
            }
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[test]
    fn test_garbage_body_becomes_page_failed() {
        assert!(matches!(decode(200, "<html>"), WorkerResponse::PageFailed { .. }));
    }

    #[test]
    fn test_malformed_trace_context_is_ignored() {
        let mut worker = MarqueeWorker::default();
        let response = worker.handle_message(WorkerMessage::DecodePage {
            key: PageKey::new("alien", 1),
            status: 200,
            body: r#"{"results":[],"total_pages":0}"#.to_string(),
            trace_context: Some(TraceContext {
                trace_id: "not-hex".to_string(),
                parent_span_id: "zz".to_string(),
            }),
        });
        assert!(matches!(response, WorkerResponse::PageDecoded { .. }));
    }

    #[test]
    fn test_key_recovered_from_malformed_message() {
        let payload = r#"{"DecodePage":{"key":{"query":"alien","page":2},"status":"two hundred"}}"#;
        assert!(serde_json::from_str::<WorkerMessage>(payload).is_err());
        assert_eq!(recover_key(payload), Some(PageKey::new("alien", 2)));

        assert_eq!(recover_key("not json"), None);
        assert_eq!(recover_key(r#"{"DecodePage":{"status":200}}"#), None);
    }
}
