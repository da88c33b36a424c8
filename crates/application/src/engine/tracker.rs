//! Tracks the tasks an engine has spawned so callers can wait for quiescence.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::Notify;

#[derive(Debug, Default)]
struct TrackerState {
    active: AtomicUsize,
    idle: Notify,
}

/// Counts live engine tasks.
#[derive(Debug, Clone, Default)]
pub(crate) struct TaskTracker {
    state: Arc<TrackerState>,
}

/// Held by a task for as long as it runs.
#[derive(Debug)]
pub(crate) struct TaskGuard {
    state: Arc<TrackerState>,
}

impl TaskTracker {
    /// Registers a task. The count drops when the guard does, even on panic.
    pub(crate) fn enter(&self) -> TaskGuard {
        self.state.active.fetch_add(1, Ordering::AcqRel);
        TaskGuard {
            state: Arc::clone(&self.state),
        }
    }

    /// Number of tasks currently running.
    pub(crate) fn active(&self) -> usize {
        self.state.active.load(Ordering::Acquire)
    }

    /// Resolves once no tracked task is running.
    ///
    /// Tasks spawned by tracked tasks are registered before their parent
    /// finishes, so a cascade is awaited as a whole.
    pub(crate) async fn wait_idle(&self) {
        loop {
            let notified = self.state.idle.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();
            if self.active() == 0 {
                return;
            }
            notified.await;
        }
    }
}

impl Drop for TaskGuard {
    fn drop(&mut self) {
        if self.state.active.fetch_sub(1, Ordering::AcqRel) == 1 {
            self.state.idle.notify_waiters();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_idle_without_tasks() {
        let tracker = TaskTracker::default();
        tracker.wait_idle().await;
        assert_eq!(tracker.active(), 0);
    }

    #[tokio::test]
    async fn test_waits_for_guard_drop() {
        let tracker = TaskTracker::default();
        let guard = tracker.enter();
        assert_eq!(tracker.active(), 1);

        let handle = tokio::spawn(async move {
            tokio::task::yield_now().await;
            drop(guard);
        });

        tracker.wait_idle().await;
        assert_eq!(tracker.active(), 0);
        assert!(handle.await.is_ok());
    }
}
