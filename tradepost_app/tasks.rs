use std::{
    future::Future,
    sync::{Arc, Mutex},
};

use tokio::task::JoinSet;
use tracing::{debug, error};

/// Runs fire-and-forget work off the request path.
///
/// Every task runs inside its own tokio task so a panic is caught by the
/// runtime and logged here instead of reaching the caller.
#[derive(Clone, Default)]
pub struct BackgroundTasks {
    running: Arc<Mutex<JoinSet<()>>>,
}

impl BackgroundTasks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawns `fut` detached from the caller. Must be called within a tokio runtime.
    pub fn spawn<F>(&self, name: &'static str, fut: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let mut running = self.running.lock().unwrap_or_else(|e| e.into_inner());
        // reap finished supervisors so the set doesn't grow unbounded
        while running.try_join_next().is_some() {}

        running.spawn(async move {
            debug!(task = name, "Background task started");
            match tokio::spawn(fut).await {
                Ok(()) => debug!(task = name, "Background task finished"),
                Err(e) if e.is_panic() => {
                    let panic = e.into_panic();
                    let message = panic
                        .downcast_ref::<&str>()
                        .map(|s| s.to_string())
                        .or_else(|| panic.downcast_ref::<String>().cloned())
                        .unwrap_or_else(|| "unknown panic".to_string());
                    error!(task = name, panic = %message, "Background task panicked");
                }
                Err(e) => error!(task = name, error = %e, "Background task was cancelled"),
            }
        });
    }

    /// Number of tasks not yet reaped.
    pub fn len(&self) -> usize {
        self.running.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Waits for every task spawned so far, including ones spawned while waiting.
    pub async fn wait_idle(&self) {
        loop {
            let mut set = {
                let mut running = self.running.lock().unwrap_or_else(|e| e.into_inner());
                std::mem::take(&mut *running)
            };
            if set.is_empty() {
                return;
            }
            while set.join_next().await.is_some() {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_spawn_runs_to_completion() {
        let tasks = BackgroundTasks::new();
        let counter = Arc::new(AtomicUsize::new(0));

        for _ in 0..3 {
            let counter = counter.clone();
            tasks.spawn("increment", async move {
                counter.fetch_add(1, Ordering::SeqCst);
            });
        }

        tasks.wait_idle().await;
        assert_eq!(counter.load(Ordering::SeqCst), 3);
        assert!(tasks.is_empty());
    }

    #[tokio::test]
    async fn test_panicking_task_is_contained() {
        let tasks = BackgroundTasks::new();
        let counter = Arc::new(AtomicUsize::new(0));

        tasks.spawn("boom", async {
            panic!("matcher exploded");
        });
        let c = counter.clone();
        tasks.spawn("after", async move {
            c.fetch_add(1, Ordering::SeqCst);
        });

        tasks.wait_idle().await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }
}
