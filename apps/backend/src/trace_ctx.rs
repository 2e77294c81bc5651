//! Task-local trace id for the request being served.
//!
//! `RequestTrace` opens the scope; anything running inside the handler future
//! (extractors, error rendering, room calls made from a handler) can read it.

use std::cell::RefCell;

use tokio::task_local;

task_local! {
    static TRACE_ID: RefCell<Option<String>>;
}

/// The current trace id, if a request scope is active.
pub fn current() -> Option<String> {
    TRACE_ID.try_with(|cell| cell.borrow().clone()).ok().flatten()
}

/// The current trace id, or "unknown" outside a request.
pub fn trace_id() -> String {
    current().unwrap_or_else(|| "unknown".to_string())
}

/// Runs `future` with `trace_id` as the task-local trace id.
pub async fn with_trace_id<F, R>(trace_id: String, future: F) -> R
where
    F: std::future::Future<Output = R>,
{
    TRACE_ID.scope(RefCell::new(Some(trace_id)), future).await
}
