//! Background worker thread for decoding catalog responses.
//!
//! - `messages`: request/response protocol types with trace context propagation
//! - `handler`: worker implementation and message processing

pub mod handler;
pub mod messages;

pub use handler::MarqueeWorker;
pub use messages::{TraceContext, WorkerMessage, WorkerResponse};
