use tokio::sync::watch;

use crate::domain::notification::model::Notification;

/// Change token published once per confirmed deletion.
///
/// Carries no meaning beyond "changed since last observed". Every deletion
/// yields a fresh value so two deletions in a row are never mistaken for one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DeleteSignal(u64);

impl DeleteSignal {
    pub fn is_initial(&self) -> bool {
        self.0 == 0
    }

    fn next(self) -> Self {
        Self(self.0.wrapping_add(1).max(1))
    }
}

/// Session-scoped store shared by the search view and the confirmation gate.
///
/// Holds the identifier being typed, the last delete signal and the
/// notification payload. No validation happens here. Each field is a
/// `watch` channel, so subscribers are woken when a value changes instead
/// of polling; setting a field to its current value wakes nobody.
#[derive(Debug)]
pub struct SharedState {
    identifier: watch::Sender<String>,
    delete_signal: watch::Sender<DeleteSignal>,
    notification: watch::Sender<Option<Notification>>,
}

impl Default for SharedState {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedState {
    pub fn new() -> Self {
        let (identifier, _) = watch::channel(String::new());
        let (delete_signal, _) = watch::channel(DeleteSignal::default());
        let (notification, _) = watch::channel(None);

        Self {
            identifier,
            delete_signal,
            notification,
        }
    }

    pub fn identifier(&self) -> String {
        self.identifier.borrow().clone()
    }

    pub fn set_identifier(&self, value: impl Into<String>) {
        replace_if_changed(&self.identifier, value.into());
    }

    pub fn subscribe_identifier(&self) -> watch::Receiver<String> {
        self.identifier.subscribe()
    }

    pub fn delete_signal(&self) -> DeleteSignal {
        *self.delete_signal.borrow()
    }

    /// Publishes a fresh delete signal and returns it. This is the only way
    /// the signal is written, so a value is never reused.
    pub fn publish_deletion(&self) -> DeleteSignal {
        self.delete_signal.send_modify(|signal| *signal = signal.next());
        self.delete_signal()
    }

    pub fn subscribe_delete_signal(&self) -> watch::Receiver<DeleteSignal> {
        self.delete_signal.subscribe()
    }

    pub fn notification(&self) -> Option<Notification> {
        self.notification.borrow().clone()
    }

    pub fn set_notification(&self, notification: Option<Notification>) {
        replace_if_changed(&self.notification, notification);
    }

    pub fn subscribe_notification(&self) -> watch::Receiver<Option<Notification>> {
        self.notification.subscribe()
    }
}

fn replace_if_changed<T: PartialEq>(sender: &watch::Sender<T>, value: T) {
    sender.send_if_modified(|current| {
        if *current == value {
            return false;
        }
        *current = value;
        true
    });
}
