//! Detached background jobs
//!
//! Fire-and-forget execution for work that outlives the request that
//! scheduled it. The outcome is only logged; nothing reports back to the
//! caller.

use std::fmt::Display;
use std::future::Future;

use tokio::task::JoinHandle;

/// Run `job` on the runtime without awaiting it.
///
/// Success is logged at `info` with the job's summary, failure at `error`.
/// The returned handle exists for tests; request handlers drop it.
pub fn spawn_detached<F, T, E>(name: &'static str, job: F) -> JoinHandle<()>
where
    F: Future<Output = Result<T, E>> + Send + 'static,
    T: Display + Send + 'static,
    E: Display + Send + 'static,
{
    tracing::debug!(task = name, "Background task scheduled");
    tokio::spawn(async move {
        match job.await {
            Ok(summary) => tracing::info!(task = name, %summary, "Background task finished"),
            Err(e) => tracing::error!(task = name, error = %e, "Background task failed"),
        }
    })
}
