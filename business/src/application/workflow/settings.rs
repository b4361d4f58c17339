use std::time::Duration;

/// Timing shared by the search view and the confirmation gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkflowSettings {
    /// How long a notification stays visible.
    pub notification_window: Duration,
    /// Pause between raising the busy flag and issuing the request.
    pub loading_delay: Duration,
}

impl Default for WorkflowSettings {
    fn default() -> Self {
        Self {
            notification_window: Duration::from_secs(3),
            loading_delay: Duration::from_secs(1),
        }
    }
}

impl WorkflowSettings {
    /// Settings with no loading pause, keeping the given window.
    pub fn without_delay(notification_window: Duration) -> Self {
        Self {
            notification_window,
            loading_delay: Duration::ZERO,
        }
    }
}

pub(crate) async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
