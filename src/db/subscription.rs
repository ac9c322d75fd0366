use std::future::Future;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// A long-lived feed of full collection snapshots. Each delivery is a
/// complete, consistent view of the query result, so consumers never merge
/// incremental deltas. The background task stops when `unsubscribe` is
/// called or the subscription is dropped, whichever comes first.
pub struct Subscription<T> {
    receiver: mpsc::Receiver<T>,
    handle: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Subscription<T> {
    /// Spawn a polling task that pushes a snapshot per interval. A `fetch`
    /// returning `None` (a failed read) skips that round instead of closing
    /// the feed.
    pub fn spawn<F, Fut>(poll_interval: Duration, fetch: F) -> Self
    where
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = Option<T>> + Send + 'static,
    {
        let (sender, receiver) = mpsc::channel(8);

        let handle = tokio::spawn(async move {
            loop {
                if let Some(snapshot) = fetch().await {
                    if sender.send(snapshot).await.is_err() {
                        break;
                    }
                }
                tokio::time::sleep(poll_interval).await;
            }
        });

        Self {
            receiver,
            handle: Some(handle),
        }
    }

    /// Wait for the next snapshot. Returns `None` once the feed is closed.
    pub async fn next_snapshot(&mut self) -> Option<T> {
        self.receiver.recv().await
    }

    /// Cancel the backing task. Idempotent; also runs on drop so an
    /// abandoned subscription cannot keep firing.
    pub fn unsubscribe(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
        self.receiver.close();
    }

    pub fn is_active(&self) -> bool {
        self.handle.is_some()
    }
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
