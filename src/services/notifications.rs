use std::collections::HashMap;
use std::sync::{Arc, Weak};
use std::time::Duration;

use tokio::{
    sync::{mpsc, Mutex, RwLock},
    task::JoinHandle,
    time::MissedTickBehavior,
};
use uuid::Uuid;

use crate::{
    api::NotificationApi,
    config::Config,
    error::AppResult,
    models::{Notification, NotificationPreferences, Toast, ToastKind},
    services::toasts::ToastQueue,
};

const MIN_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Tunables for [`NotificationStore`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationSettings {
    pub limit: u32,
    pub poll_interval: Duration,
    pub toast_ttl: Duration,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for NotificationSettings {
    fn from(config: &Config) -> Self {
        Self {
            limit: config.notification_limit,
            poll_interval: config.poll_interval(),
            toast_ttl: config.toast_ttl(),
        }
    }
}

#[derive(Debug)]
struct NotificationState {
    notifications: Vec<Notification>,
    preferences: Option<NotificationPreferences>,
    loading: bool,
    /// Ids with an optimistic change awaiting the server, with in-flight count
    pending: HashMap<String, usize>,
}

impl NotificationState {
    fn begin(&mut self, id: &str) {
        *self.pending.entry(id.to_string()).or_insert(0) += 1;
    }

    fn finish(&mut self, id: &str) {
        if let Some(count) = self.pending.get_mut(id) {
            *count -= 1;
            if *count == 0 {
                self.pending.remove(id);
            }
        }
    }
}

/// Notification list, preferences and toasts for the signed-in user
///
/// Read-state changes and deletions are applied locally before the server
/// confirms them and are not rolled back if the server call fails; the next
/// refresh reconciles with the server's view. Preference updates are applied
/// only after the server accepts them.
pub struct NotificationStore {
    api: Arc<dyn NotificationApi>,
    settings: NotificationSettings,
    state: RwLock<NotificationState>,
    toasts: ToastQueue,
    poller: Mutex<Option<NotificationPoller>>,
}

impl NotificationStore {
    pub fn new(api: Arc<dyn NotificationApi>, settings: NotificationSettings) -> Self {
        Self {
            api,
            settings,
            state: RwLock::new(NotificationState {
                notifications: Vec::new(),
                preferences: None,
                loading: true,
                pending: HashMap::new(),
            }),
            toasts: ToastQueue::new(settings.toast_ttl),
            poller: Mutex::new(None),
        }
    }

    /// Replaces notifications and preferences with the server's current view
    ///
    /// Both are fetched concurrently. If either request fails the previous
    /// state is kept. The loading flag is cleared either way.
    pub async fn refresh(&self) {
        let (notifications, preferences) = tokio::join!(
            self.api.list_notifications(self.settings.limit),
            self.api.get_preferences()
        );

        let mut state = self.state.write().await;
        match (notifications, preferences) {
            (Ok(notifications), Ok(preferences)) => {
                tracing::debug!(
                    count = notifications.len(),
                    unread = notifications.iter().filter(|n| !n.read).count(),
                    "Notifications refreshed"
                );
                state.notifications = notifications;
                state.preferences = Some(preferences);
            }
            (Err(e), _) | (_, Err(e)) => {
                tracing::error!(error = %e, "Failed to refresh notifications");
            }
        }
        state.loading = false;
    }

    /// Starts background polling: one refresh now, then one per interval
    ///
    /// Calling `start` while already polling does nothing.
    pub async fn start(self: &Arc<Self>) {
        let mut poller = self.poller.lock().await;
        if poller.is_some() {
            tracing::debug!("Notification poller already running");
            return;
        }

        let period = self.settings.poll_interval.max(MIN_POLL_INTERVAL);
        *poller = Some(NotificationPoller::spawn(Arc::downgrade(self), period));
    }

    pub async fn is_polling(&self) -> bool {
        self.poller.lock().await.is_some()
    }

    /// Stops polling and cancels outstanding toast timers
    pub async fn shutdown(&self) {
        let poller = self.poller.lock().await.take();
        if let Some(poller) = poller {
            poller.shutdown().await;
        }
        self.toasts.shutdown().await;
    }

    pub async fn mark_as_read(&self, notification_id: &str) {
        {
            let mut state = self.state.write().await;
            match state
                .notifications
                .iter_mut()
                .find(|n| n.id == notification_id)
            {
                Some(notification) => notification.read = true,
                None => tracing::debug!(notification_id = %notification_id, "Marking unknown notification as read"),
            }
            state.begin(notification_id);
        }

        if let Err(e) = self.api.mark_as_read(notification_id).await {
            tracing::error!(
                error = %e,
                notification_id = %notification_id,
                "Failed to mark notification as read"
            );
        }

        self.state.write().await.finish(notification_id);
    }

    pub async fn mark_all_as_read(&self) {
        let ids: Vec<String> = {
            let mut state = self.state.write().await;
            for notification in state.notifications.iter_mut() {
                notification.read = true;
            }
            let ids: Vec<String> = state.notifications.iter().map(|n| n.id.clone()).collect();
            for id in &ids {
                state.begin(id);
            }
            ids
        };

        if let Err(e) = self.api.mark_all_as_read().await {
            tracing::error!(error = %e, "Failed to mark all notifications as read");
        }

        let mut state = self.state.write().await;
        for id in &ids {
            state.finish(id);
        }
    }

    pub async fn delete_notification(&self, notification_id: &str) {
        {
            let mut state = self.state.write().await;
            state.notifications.retain(|n| n.id != notification_id);
            state.begin(notification_id);
        }

        if let Err(e) = self.api.delete_notification(notification_id).await {
            tracing::error!(
                error = %e,
                notification_id = %notification_id,
                "Failed to delete notification"
            );
        }

        self.state.write().await.finish(notification_id);
    }

    /// Sends the full preference set; local state changes only on success
    pub async fn update_preferences(&self, preferences: NotificationPreferences) -> AppResult<()> {
        if let Err(e) = self.api.update_preferences(&preferences).await {
            tracing::error!(error = %e, "Failed to update notification preferences");
            return Err(e);
        }

        self.state.write().await.preferences = Some(preferences);
        tracing::info!("Notification preferences updated");
        Ok(())
    }

    pub async fn show_toast(
        &self,
        title: impl Into<String>,
        message: impl Into<String>,
        kind: ToastKind,
    ) -> Uuid {
        self.toasts.show(title, message, kind).await
    }

    pub async fn toasts(&self) -> Vec<Toast> {
        self.toasts.visible().await
    }

    pub async fn notifications(&self) -> Vec<Notification> {
        self.state.read().await.notifications.clone()
    }

    pub async fn preferences(&self) -> Option<NotificationPreferences> {
        self.state.read().await.preferences
    }

    pub async fn unread_count(&self) -> usize {
        self.state
            .read()
            .await
            .notifications
            .iter()
            .filter(|n| !n.read)
            .count()
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.loading
    }

    /// Ids whose optimistic change has not been answered by the server yet
    pub async fn pending_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.state.read().await.pending.keys().cloned().collect();
        ids.sort();
        ids
    }
}

/// Handle to the background refresh task
///
/// The task only holds a weak reference to the store, so dropping the store
/// drops this handle, which aborts the task.
pub struct NotificationPoller {
    shutdown_tx: mpsc::Sender<()>,
    task: Option<JoinHandle<()>>,
}

impl NotificationPoller {
    fn spawn(store: Weak<NotificationStore>, period: Duration) -> Self {
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel(1);

        let task = tokio::spawn(async move {
            tracing::info!(period_secs = period.as_secs(), "Notification poller started");

            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let Some(store) = store.upgrade() else {
                            break;
                        };
                        store.refresh().await;
                    }
                    _ = shutdown_rx.recv() => break,
                }
            }

            tracing::info!("Notification poller stopped");
        });

        Self {
            shutdown_tx,
            task: Some(task),
        }
    }

    /// Signals the task to stop and waits for it to finish
    pub async fn shutdown(mut self) {
        let _ = self.shutdown_tx.send(()).await;
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                tracing::error!(error = %e, "Notification poller task failed");
            }
        }
    }
}

impl Drop for NotificationPoller {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
