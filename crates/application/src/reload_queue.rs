use std::future::Future;
use std::sync::Arc;

use tokio::sync::{Mutex, Notify};

/// The async reload mailbox named in §4.5: a single pending-request slot
/// plus a notifier, not a bounded channel — `publish` always coalesces to
/// the latest request rather than queuing every one.
pub struct ReloadQueue<T> {
    pending: Mutex<Option<T>>,
    notify: Notify,
}

impl<T: Send + 'static> ReloadQueue<T> {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            pending: Mutex::new(None),
            notify: Notify::new(),
        })
    }

    /// Replaces whatever request is pending (dropping it) and wakes the
    /// worker. Never blocks on the worker actually running.
    pub async fn publish(&self, request: T) {
        let mut slot = self.pending.lock().await;
        *slot = Some(request);
        drop(slot);
        self.notify.notify_one();
    }

    /// Spawns the worker loop. The worker runs for the lifetime of the
    /// process; per §4.1, `Close` does not stop it.
    pub fn start<F, Fut>(self: Arc<Self>, mut handler: F)
    where
        F: FnMut(T) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send,
    {
        tokio::spawn(async move {
            loop {
                self.notify.notified().await;
                let request = self.pending.lock().await.take();
                if let Some(request) = request {
                    handler(request).await;
                }
            }
        });
    }
}
