//! Logging infrastructure: structured status history.
//!
//! Provides [`JsonlStatusLog`], a JSONL file writer that implements
//! the [`StatusSink`](transcrew_application::StatusSink) port.

mod jsonl_status_log;

pub use jsonl_status_log::JsonlStatusLog;
