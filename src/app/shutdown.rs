//! Graceful shutdown handling.

use tokio_util::sync::CancellationToken;

/// Shuts down background tasks gracefully.
///
/// Signals the progress-logging task to stop and waits for it to exit. The
/// crawl itself has already drained by the time this runs, so there is
/// nothing else to flush.
pub async fn shutdown_gracefully(
    cancel: CancellationToken,
    logging_task: Option<tokio::task::JoinHandle<()>>,
) {
    cancel.cancel();
    if let Some(logging_task) = logging_task {
        let _ = logging_task.await;
    }
}
