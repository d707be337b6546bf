//! Async task lifecycle tracking for spotting slow collaborator calls

use std::future::Future;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Instant;
use tokio::task::JoinHandle;

/// Monotonic id for log correlation
static NEXT_TASK_ID: AtomicU64 = AtomicU64::new(0);

/// Tasks spawned but not yet finished
static ACTIVE_TASKS: AtomicUsize = AtomicUsize::new(0);

/// Warning threshold for long-running tasks
static SLOW_TASK_SECS: AtomicU64 = AtomicU64::new(30);

/// Get current number of active tasks
pub fn active_task_count() -> usize {
    ACTIVE_TASKS.load(Ordering::Relaxed)
}

pub fn set_slow_task_threshold(secs: u64) {
    SLOW_TASK_SECS.store(secs, Ordering::Relaxed);
}

/// Spawn an instrumented async task with lifecycle tracking
///
/// # Example
///
/// ```rust,no_run
/// use maatiputra::debug::spawn_tracked;
///
/// spawn_tracked("news_fetch", async move {
///     // collaborator call
/// });
/// ```
pub fn spawn_tracked<F>(name: &'static str, future: F) -> JoinHandle<F::Output>
where
    F: Future + Send + 'static,
    F::Output: Send + 'static,
{
    let task_id = NEXT_TASK_ID.fetch_add(1, Ordering::Relaxed);
    ACTIVE_TASKS.fetch_add(1, Ordering::Relaxed);
    let start = Instant::now();

    tracing::debug!(task = %name, task_id, "Task spawned");

    tokio::spawn(async move {
        let result = future.await;
        let duration = start.elapsed();

        tracing::debug!(
            task = %name,
            task_id,
            duration_ms = duration.as_millis(),
            "Task completed"
        );

        if duration.as_secs() > SLOW_TASK_SECS.load(Ordering::Relaxed) {
            tracing::warn!(
                task = %name,
                task_id,
                duration_ms = duration.as_millis(),
                "Task took very long"
            );
        }

        ACTIVE_TASKS.fetch_sub(1, Ordering::Relaxed);
        result
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_spawn_tracked_returns_output() {
        let handle = spawn_tracked("unit", async { 21 * 2 });
        assert_eq!(handle.await.unwrap(), 42);
    }
}
