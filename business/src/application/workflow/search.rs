use std::sync::Arc;

use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;

use crate::application::notification::channel::NotificationChannel;
use crate::application::workflow::confirmation::ConfirmationGate;
use crate::application::workflow::settings::{WorkflowSettings, pause};
use crate::domain::logger::Logger;
use crate::domain::notification::model::Notification;
use crate::domain::product::model::Product;
use crate::domain::product::use_cases::delete::DeleteProductUseCase;
use crate::domain::product::use_cases::get_by_id::{GetProductByIdParams, GetProductByIdUseCase};
use crate::domain::product::value_objects::{ProductId, is_numeric_input};
use crate::domain::session::state::{DeleteSignal, SharedState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    /// Waiting for an identifier; nothing displayed.
    Idle,
    /// A lookup is in flight.
    Searching,
    /// A product is displayed.
    Found,
}

/// What the search view renders.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchView {
    pub phase: SearchPhase,
    pub product: Option<Product>,
    /// A confirmation gate is open for the displayed product.
    pub confirming: bool,
}

impl Default for SearchView {
    fn default() -> Self {
        Self {
            phase: SearchPhase::Idle,
            product: None,
            confirming: false,
        }
    }
}

/// Search form, lookup lifecycle and the single displayed product.
///
/// Deletions happen inside a [`ConfirmationGate`]; this workflow only learns
/// about them through the delete signal in [`SharedState`] (see
/// [`SearchWorkflow::next_deletion`]).
pub struct SearchWorkflow {
    state: Arc<SharedState>,
    notifications: Arc<NotificationChannel>,
    get_by_id_use_case: Arc<dyn GetProductByIdUseCase>,
    delete_use_case: Arc<dyn DeleteProductUseCase>,
    logger: Arc<dyn Logger>,
    settings: WorkflowSettings,
    view: Arc<watch::Sender<SearchView>>,
    deletions: Mutex<watch::Receiver<DeleteSignal>>,
}

impl SearchWorkflow {
    pub fn new(
        state: Arc<SharedState>,
        notifications: Arc<NotificationChannel>,
        get_by_id_use_case: Arc<dyn GetProductByIdUseCase>,
        delete_use_case: Arc<dyn DeleteProductUseCase>,
        logger: Arc<dyn Logger>,
        settings: WorkflowSettings,
    ) -> Self {
        let (view, _) = watch::channel(SearchView::default());
        let deletions = Mutex::new(state.subscribe_delete_signal());
        Self {
            state,
            notifications,
            get_by_id_use_case,
            delete_use_case,
            logger,
            settings,
            view: Arc::new(view),
            deletions,
        }
    }

    pub fn view(&self) -> SearchView {
        self.view.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchView> {
        self.view.subscribe()
    }

    pub fn identifier(&self) -> String {
        self.state.identifier()
    }

    pub fn is_searching(&self) -> bool {
        self.view.borrow().phase == SearchPhase::Searching
    }

    /// The submit control is enabled only with an identifier and no lookup in flight.
    pub fn submit_enabled(&self) -> bool {
        !self.state.identifier().is_empty() && !self.is_searching()
    }

    /// Applies an edit of the identifier input.
    ///
    /// Anything but digits is dropped and the previous value kept; returns
    /// whether the edit was accepted. Clearing the input also clears the
    /// displayed product unless a confirmation is open for it.
    pub fn on_identifier_change(&self, raw: &str) -> bool {
        if !is_numeric_input(raw) {
            self.logger
                .debug(&format!("Ignoring non-numeric identifier input: {:?}", raw));
            return false;
        }

        self.state.set_identifier(raw);

        if raw.is_empty() {
            self.view.send_if_modified(|view| {
                if view.confirming || view.phase != SearchPhase::Found {
                    return false;
                }
                view.product = None;
                view.phase = SearchPhase::Idle;
                true
            });
        }
        true
    }

    /// Applies a submitted line of input and tells whether it should be
    /// looked up. A rejected edit is never looked up, even though the
    /// previous identifier is kept.
    pub fn accept_input(&self, raw: &str) -> bool {
        self.on_identifier_change(raw) && self.submit_enabled()
    }

    /// Looks up the current identifier.
    ///
    /// No-op when the identifier is empty, a lookup is already in flight or a
    /// confirmation is open. Failures end up as a timed notification and the
    /// workflow returns to idle.
    pub async fn submit(&self) {
        let identifier = self.state.identifier();
        let Ok(id) = ProductId::parse(&identifier) else {
            self.logger.debug("Ignoring search without identifier");
            return;
        };

        let started = self.view.send_if_modified(|view| {
            if view.phase == SearchPhase::Searching || view.confirming {
                return false;
            }
            view.phase = SearchPhase::Searching;
            view.product = None;
            true
        });
        if !started {
            self.logger
                .debug(&format!("Ignoring search for {} while busy", id));
            return;
        }

        self.notifications.clear();
        pause(self.settings.loading_delay).await;

        match self
            .get_by_id_use_case
            .execute(GetProductByIdParams { id })
            .await
        {
            Ok(product) => {
                self.view.send_modify(|view| {
                    view.phase = SearchPhase::Found;
                    view.product = Some(product);
                });
                self.state.set_identifier("");
            }
            Err(e) => {
                self.notifications.show(
                    Notification::from_error(&e),
                    self.settings.notification_window,
                );
                self.view.send_modify(|view| view.phase = SearchPhase::Idle);
            }
        }
    }

    /// Opens a confirmation gate for the displayed product.
    ///
    /// Returns `None` when nothing is displayed, a lookup is in flight or a
    /// gate is already open.
    pub fn open_confirmation(&self) -> Option<ConfirmationGate> {
        let mut selected = None;
        self.view.send_if_modified(|view| {
            if view.confirming || view.phase != SearchPhase::Found {
                return false;
            }
            selected = view.product.clone();
            view.confirming = selected.is_some();
            view.confirming
        });
        let product = selected?;

        let view = Arc::clone(&self.view);
        Some(ConfirmationGate::new(
            product,
            move || view.send_modify(|view| view.confirming = false),
            Arc::clone(&self.delete_use_case),
            Arc::clone(&self.state),
            Arc::clone(&self.logger),
            self.settings.loading_delay,
        ))
    }

    /// Waits for the next delete signal and reflects it in the view.
    ///
    /// Clears the displayed product and re-shows the payload the gate left in
    /// [`SharedState`] for one notification window. Returns `None` once the
    /// signal can no longer change.
    pub async fn next_deletion(&self) -> Option<DeleteSignal> {
        let signal = {
            let mut deletions = self.deletions.lock().await;
            deletions.changed().await.ok()?;
            *deletions.borrow_and_update()
        };

        if !signal.is_initial() {
            self.apply_deletion();
        }
        Some(signal)
    }

    /// Reacts to every deletion until the shared state goes away.
    pub fn spawn_deletion_observer(self: &Arc<Self>) -> JoinHandle<()> {
        let workflow = Arc::clone(self);
        tokio::spawn(async move { while workflow.next_deletion().await.is_some() {} })
    }

    fn apply_deletion(&self) {
        self.view.send_modify(|view| {
            view.product = None;
            if view.phase == SearchPhase::Found {
                view.phase = SearchPhase::Idle;
            }
        });

        match self.state.notification() {
            Some(notification) => {
                self.logger
                    .info(&format!("Deletion reported: {}", notification.message));
                self.notifications
                    .show(notification, self.settings.notification_window);
            }
            None => self.logger.warn("Deletion signalled without a payload"),
        }
    }
}
