use std::sync::Arc;
use std::time::Duration;

use tokio::{sync::Mutex, task::JoinHandle};
use uuid::Uuid;

use crate::models::{Toast, ToastKind};

/// Queue of short-lived UI messages that expire on their own
///
/// Each toast schedules its own expiry task. [`ToastQueue::shutdown`] (or
/// dropping the queue) aborts every outstanding expiry task.
pub struct ToastQueue {
    toasts: Arc<Mutex<Vec<Toast>>>,
    timers: Mutex<Vec<JoinHandle<()>>>,
    ttl: Duration,
}

impl ToastQueue {
    pub fn new(ttl: Duration) -> Self {
        Self {
            toasts: Arc::new(Mutex::new(Vec::new())),
            timers: Mutex::new(Vec::new()),
            ttl,
        }
    }

    /// Appends a toast and schedules its removal; must run inside a Tokio runtime
    pub async fn show(
        &self,
        title: impl Into<String>,
        message: impl Into<String>,
        kind: ToastKind,
    ) -> Uuid {
        let id = Uuid::new_v4();
        self.toasts.lock().await.push(Toast {
            id,
            title: title.into(),
            message: message.into(),
            kind,
        });

        let toasts = Arc::clone(&self.toasts);
        let ttl = self.ttl;
        let timer = tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            toasts.lock().await.retain(|toast| toast.id != id);
            tracing::trace!(toast_id = %id, "Toast expired");
        });

        let mut timers = self.timers.lock().await;
        timers.retain(|handle| !handle.is_finished());
        timers.push(timer);

        id
    }

    /// Toasts currently visible, oldest first
    pub async fn visible(&self) -> Vec<Toast> {
        self.toasts.lock().await.clone()
    }

    /// Number of expiry tasks that have not fired yet
    #[cfg(test)]
    async fn pending_timers(&self) -> usize {
        self.timers
            .lock()
            .await
            .iter()
            .filter(|handle| !handle.is_finished())
            .count()
    }

    /// Cancels every expiry task and empties the queue
    pub async fn shutdown(&self) {
        let mut timers = self.timers.lock().await;
        for timer in timers.drain(..) {
            timer.abort();
        }
        self.toasts.lock().await.clear();
    }
}

impl Drop for ToastQueue {
    fn drop(&mut self) {
        for timer in self.timers.get_mut().drain(..) {
            timer.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_toast_expires_after_ttl() {
        let queue = ToastQueue::new(Duration::from_secs(5));
        let id = queue.show("Saved", "Preferences updated", ToastKind::Success).await;

        let visible = queue.visible().await;
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, id);
        assert_eq!(visible[0].kind, ToastKind::Success);

        tokio::time::sleep(Duration::from_secs(4)).await;
        assert_eq!(queue.visible().await.len(), 1);

        tokio::time::sleep(Duration::from_millis(1001)).await;
        assert!(queue.visible().await.is_empty());
        assert_eq!(queue.pending_timers().await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_toasts_expire_independently() {
        let queue = ToastQueue::new(Duration::from_secs(5));
        queue.show("First", "one", ToastKind::Info).await;
        tokio::time::sleep(Duration::from_secs(3)).await;
        let second = queue.show("Second", "two", ToastKind::Error).await;

        tokio::time::sleep(Duration::from_millis(2001)).await;
        let visible = queue.visible().await;
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, second);
    }

    #[tokio::test]
    async fn test_ids_are_unique() {
        let queue = ToastQueue::new(Duration::from_secs(5));
        let a = queue.show("A", "a", ToastKind::Info).await;
        let b = queue.show("A", "a", ToastKind::Info).await;
        assert_ne!(a, b);
        assert_eq!(queue.visible().await.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_cancels_timers() {
        let queue = ToastQueue::new(Duration::from_secs(5));
        queue.show("A", "a", ToastKind::Info).await;
        queue.show("B", "b", ToastKind::Info).await;
        assert_eq!(queue.pending_timers().await, 2);

        queue.shutdown().await;

        assert_eq!(queue.pending_timers().await, 0);
        assert!(queue.visible().await.is_empty());
    }
}
