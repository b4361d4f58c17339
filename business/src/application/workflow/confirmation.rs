use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use crate::application::workflow::settings::pause;
use crate::domain::logger::Logger;
use crate::domain::notification::model::{Notification, PRODUCT_DELETED_MESSAGE};
use crate::domain::product::model::Product;
use crate::domain::product::use_cases::delete::{DeleteProductParams, DeleteProductUseCase};
use crate::domain::session::state::SharedState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatePhase {
    Open,
    Deleting,
    Closed,
}

/// Confirmation step in front of the delete request for one product.
///
/// A gate starts `Open`. Confirming moves it to `Deleting` until the request
/// resolves, and while deleting it can be neither dismissed nor confirmed
/// again. Once the request resolves the gate always ends `Closed`, having
/// called its close callback once and published one delete signal. The
/// request itself is never aborted.
pub struct ConfirmationGate {
    product: Product,
    on_close: Box<dyn Fn() + Send + Sync>,
    phase: watch::Sender<GatePhase>,
    delete_use_case: Arc<dyn DeleteProductUseCase>,
    state: Arc<SharedState>,
    logger: Arc<dyn Logger>,
    loading_delay: Duration,
}

impl ConfirmationGate {
    pub fn new(
        product: Product,
        on_close: impl Fn() + Send + Sync + 'static,
        delete_use_case: Arc<dyn DeleteProductUseCase>,
        state: Arc<SharedState>,
        logger: Arc<dyn Logger>,
        loading_delay: Duration,
    ) -> Self {
        let (phase, _) = watch::channel(GatePhase::Open);
        Self {
            product,
            on_close: Box::new(on_close),
            phase,
            delete_use_case,
            state,
            logger,
            loading_delay,
        }
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn phase(&self) -> GatePhase {
        *self.phase.borrow()
    }

    pub fn is_busy(&self) -> bool {
        self.phase() == GatePhase::Deleting
    }

    /// Whether the cancel action is currently enabled.
    pub fn can_cancel(&self) -> bool {
        self.phase() == GatePhase::Open
    }

    /// Dismisses the gate. Returns `false`, doing nothing, while a delete is
    /// in flight or when the gate is already closed.
    pub fn request_close(&self) -> bool {
        if !self.transition(GatePhase::Open, GatePhase::Closed) {
            self.logger.debug(&format!(
                "Ignoring close of confirmation for product {} while {:?}",
                self.product.id,
                self.phase()
            ));
            return false;
        }
        (self.on_close)();
        true
    }

    /// Issues the delete request and reports its outcome.
    ///
    /// If this future is dropped before it resolves, dropping the gate still
    /// closes it and publishes the delete signal, without an outcome payload.
    ///
    /// The outcome is written to [`SharedState`] before the delete signal
    /// changes, so whoever observes the signal reads the matching payload.
    /// Returns `None` without issuing anything unless the gate is `Open`.
    pub async fn confirm_delete(&self) -> Option<Notification> {
        if !self.transition(GatePhase::Open, GatePhase::Deleting) {
            self.logger.debug(&format!(
                "Ignoring delete confirmation for product {} while {:?}",
                self.product.id,
                self.phase()
            ));
            return None;
        }

        pause(self.loading_delay).await;

        let result = self
            .delete_use_case
            .execute(DeleteProductParams {
                id: self.product.id.clone(),
            })
            .await;

        let notification = match result {
            Ok(receipt) => Notification::success(
                receipt
                    .message
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| PRODUCT_DELETED_MESSAGE.to_string()),
            ),
            Err(e) => Notification::from_error(&e),
        };

        self.state.set_notification(Some(notification.clone()));
        self.phase.send_replace(GatePhase::Closed);
        (self.on_close)();
        self.state.publish_deletion();

        Some(notification)
    }

    fn transition(&self, from: GatePhase, to: GatePhase) -> bool {
        self.phase.send_if_modified(|phase| {
            if *phase != from {
                return false;
            }
            *phase = to;
            true
        })
    }
}

impl Drop for ConfirmationGate {
    fn drop(&mut self) {
        // A gate dropped without being closed still releases its owner.
        let phase = self.phase.send_replace(GatePhase::Closed);
        if phase == GatePhase::Closed {
            return;
        }
        (self.on_close)();

        // The delete was issued but its outcome is unknown; observers still
        // get their one signal and drop the product, which may be gone.
        if phase == GatePhase::Deleting {
            self.logger.warn(&format!(
                "Confirmation for product {} dropped while deleting",
                self.product.id
            ));
            self.state.publish_deletion();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::RepositoryError;
    use crate::domain::notification::model::REQUEST_FAILED_MESSAGE;
    use crate::domain::product::errors::ProductError;
    use crate::domain::product::model::DeletionReceipt;
    use crate::domain::product::value_objects::ProductId;
    use async_trait::async_trait;
    use mockall::mock;
    use std::sync::atomic::{AtomicUsize, Ordering};

    mock! {
        pub DeleteUseCase {}

        #[async_trait]
        impl DeleteProductUseCase for DeleteUseCase {
            async fn execute(&self, params: DeleteProductParams) -> Result<DeletionReceipt, ProductError>;
        }
    }

    mock! {
        pub Log {}

        impl Logger for Log {
            fn info(&self, message: &str);
            fn warn(&self, message: &str);
            fn error(&self, message: &str);
            fn debug(&self, message: &str);
        }
    }

    fn mock_logger() -> Arc<dyn Logger> {
        let mut logger = MockLog::new();
        logger.expect_info().returning(|_| ());
        logger.expect_warn().returning(|_| ());
        logger.expect_error().returning(|_| ());
        logger.expect_debug().returning(|_| ());
        Arc::new(logger)
    }

    fn widget() -> Product {
        Product::new(ProductId::parse("7").unwrap(), "Widget")
    }

    fn deleting_with(
        result: Result<DeletionReceipt, ProductError>,
    ) -> Arc<dyn DeleteProductUseCase> {
        let mut use_case = MockDeleteUseCase::new();
        use_case
            .expect_execute()
            .withf(|params| params.id.as_str() == "7")
            .times(1)
            .return_once(move |_| result);
        Arc::new(use_case)
    }

    struct Fixture {
        gate: ConfirmationGate,
        state: Arc<SharedState>,
        closes: Arc<AtomicUsize>,
    }

    fn fixture(use_case: Arc<dyn DeleteProductUseCase>, loading_delay: Duration) -> Fixture {
        let state = Arc::new(SharedState::new());
        let closes = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&closes);
        let gate = ConfirmationGate::new(
            widget(),
            move || {
                counter.fetch_add(1, Ordering::SeqCst);
            },
            use_case,
            Arc::clone(&state),
            mock_logger(),
            loading_delay,
        );
        Fixture {
            gate,
            state,
            closes,
        }
    }

    #[tokio::test]
    async fn should_close_and_signal_once_when_delete_succeeds() {
        let f = fixture(
            deleting_with(Ok(DeletionReceipt {
                message: Some("Eliminado con exito".to_string()),
            })),
            Duration::ZERO,
        );
        let mut signals = f.state.subscribe_delete_signal();

        let notification = f.gate.confirm_delete().await;

        assert_eq!(
            notification,
            Some(Notification::success("Eliminado con exito"))
        );
        assert_eq!(f.closes.load(Ordering::SeqCst), 1);
        assert!(signals.has_changed().unwrap());
        signals.borrow_and_update();
        assert!(!signals.has_changed().unwrap());
        assert_eq!(f.gate.phase(), GatePhase::Closed);
        assert_eq!(
            f.state.notification(),
            Some(Notification::success("Eliminado con exito"))
        );
    }

    #[tokio::test]
    async fn should_fall_back_to_default_message_on_success() {
        let f = fixture(deleting_with(Ok(DeletionReceipt::default())), Duration::ZERO);

        let notification = f.gate.confirm_delete().await;

        assert_eq!(
            notification,
            Some(Notification::success(PRODUCT_DELETED_MESSAGE))
        );
    }

    #[tokio::test]
    async fn should_close_and_signal_once_when_delete_fails() {
        let f = fixture(
            deleting_with(Err(ProductError::Repository(RepositoryError::rejected(
                409,
                Some("tiene ventas asociadas".to_string()),
            )))),
            Duration::ZERO,
        );
        let mut signals = f.state.subscribe_delete_signal();

        let notification = f.gate.confirm_delete().await;

        assert_eq!(
            notification,
            Some(Notification::failure("tiene ventas asociadas"))
        );
        assert_eq!(f.closes.load(Ordering::SeqCst), 1);
        assert!(signals.has_changed().unwrap());
        assert_eq!(f.gate.phase(), GatePhase::Closed);
    }

    #[tokio::test]
    async fn should_report_generic_failure_when_unreachable() {
        let f = fixture(
            deleting_with(Err(ProductError::Repository(RepositoryError::unreachable()))),
            Duration::ZERO,
        );

        let notification = f.gate.confirm_delete().await;

        assert_eq!(notification, Some(Notification::failure(REQUEST_FAILED_MESSAGE)));
    }

    #[tokio::test]
    async fn should_store_outcome_before_publishing_signal() {
        let state = Arc::new(SharedState::new());
        let observed = Arc::clone(&state);
        let checked = Arc::new(AtomicUsize::new(0));
        let checks = Arc::clone(&checked);
        let gate = ConfirmationGate::new(
            widget(),
            move || {
                assert!(observed.notification().is_some());
                assert!(observed.delete_signal().is_initial());
                checks.fetch_add(1, Ordering::SeqCst);
            },
            deleting_with(Ok(DeletionReceipt::default())),
            Arc::clone(&state),
            mock_logger(),
            Duration::ZERO,
        );

        gate.confirm_delete().await;

        assert_eq!(checked.load(Ordering::SeqCst), 1);
        assert!(!state.delete_signal().is_initial());
    }

    #[tokio::test(start_paused = true)]
    async fn should_ignore_dismiss_while_deleting() {
        let f = fixture(
            deleting_with(Ok(DeletionReceipt::default())),
            Duration::from_secs(1),
        );
        let gate = Arc::new(f.gate);

        let in_flight = tokio::spawn({
            let gate = Arc::clone(&gate);
            async move { gate.confirm_delete().await }
        });
        tokio::task::yield_now().await;

        assert!(gate.is_busy());
        assert!(!gate.can_cancel());
        assert!(!gate.request_close());
        assert!(gate.is_busy());
        assert_eq!(f.closes.load(Ordering::SeqCst), 0);

        in_flight.await.unwrap();

        assert_eq!(gate.phase(), GatePhase::Closed);
        assert_eq!(f.closes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn should_issue_single_request_when_confirmed_twice() {
        let f = fixture(
            deleting_with(Ok(DeletionReceipt::default())),
            Duration::from_secs(1),
        );
        let mut signals = f.state.subscribe_delete_signal();

        let (first, second) = tokio::join!(f.gate.confirm_delete(), f.gate.confirm_delete());

        assert!(first.is_some());
        assert!(second.is_none());
        assert_eq!(f.closes.load(Ordering::SeqCst), 1);
        signals.borrow_and_update();
        assert!(!signals.has_changed().unwrap());
    }

    #[tokio::test]
    async fn should_invoke_close_callback_once_when_dismissed_twice() {
        let mut use_case = MockDeleteUseCase::new();
        use_case.expect_execute().never();
        let f = fixture(Arc::new(use_case), Duration::ZERO);

        assert!(f.gate.request_close());
        assert!(!f.gate.request_close());

        assert_eq!(f.closes.load(Ordering::SeqCst), 1);
        assert_eq!(f.gate.phase(), GatePhase::Closed);
        assert!(f.state.delete_signal().is_initial());
    }

    #[tokio::test]
    async fn should_not_delete_after_dismissal() {
        let mut use_case = MockDeleteUseCase::new();
        use_case.expect_execute().never();
        let f = fixture(Arc::new(use_case), Duration::ZERO);

        f.gate.request_close();

        assert_eq!(f.gate.confirm_delete().await, None);
        assert_eq!(f.closes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn should_close_and_signal_once_when_dropped_while_deleting() {
        let mut use_case = MockDeleteUseCase::new();
        use_case.expect_execute().never();
        let f = fixture(Arc::new(use_case), Duration::from_secs(1));
        let mut signals = f.state.subscribe_delete_signal();
        let gate = f.gate;

        let in_flight = tokio::spawn(async move { gate.confirm_delete().await });
        for _ in 0..3 {
            tokio::task::yield_now().await;
        }
        in_flight.abort();
        assert!(in_flight.await.unwrap_err().is_cancelled());

        assert_eq!(f.closes.load(Ordering::SeqCst), 1);
        assert!(signals.has_changed().unwrap());
        signals.borrow_and_update();
        assert!(!signals.has_changed().unwrap());
    }

    #[tokio::test]
    async fn should_release_owner_when_dropped_open() {
        let mut use_case = MockDeleteUseCase::new();
        use_case.expect_execute().never();
        let f = fixture(Arc::new(use_case), Duration::ZERO);
        let closes = Arc::clone(&f.closes);

        drop(f.gate);

        assert_eq!(closes.load(Ordering::SeqCst), 1);
        assert!(f.state.delete_signal().is_initial());
    }
}
