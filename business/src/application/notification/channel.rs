use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::domain::notification::model::Notification;
use crate::domain::session::state::SharedState;

/// Shows a notification through [`SharedState`] and clears it once its window elapses.
///
/// Only one clear is ever pending: showing a new notification cancels the
/// previous timer before arming its own, so a stale timer can never wipe a
/// newer message. Expiry therefore resets on every `show`.
pub struct NotificationChannel {
    state: Arc<SharedState>,
    pending_clear: Mutex<Option<JoinHandle<()>>>,
}

impl NotificationChannel {
    pub fn new(state: Arc<SharedState>) -> Self {
        Self {
            state,
            pending_clear: Mutex::new(None),
        }
    }

    /// Makes `notification` visible now and schedules its removal after `duration`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn show(&self, notification: Notification, duration: Duration) {
        let mut pending = self.pending();
        if let Some(previous) = pending.take() {
            previous.abort();
        }

        self.state.set_notification(Some(notification));

        let state = Arc::clone(&self.state);
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            state.set_notification(None);
        }));
    }

    /// Hides the current notification and drops any pending timer.
    pub fn clear(&self) {
        if let Some(previous) = self.pending().take() {
            previous.abort();
        }
        self.state.set_notification(None);
    }

    pub fn current(&self) -> Option<Notification> {
        self.state.notification()
    }

    fn pending(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.pending_clear
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for NotificationChannel {
    fn drop(&mut self) {
        if let Some(pending) = self.pending().take() {
            pending.abort();
        }
    }
}
