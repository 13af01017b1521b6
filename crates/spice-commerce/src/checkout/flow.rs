//! Checkout dispatcher state machine.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};

use crate::cart::{CartStore, SharedCart};
use crate::catalog::Catalog;
use crate::checkout::{CustomerInfo, DeepLink, DeliveryPolicy, LinkOpener, OrderSummary, ResetTimer};
use crate::config::{CheckoutSettings, StoreProfile, StorefrontConfig};
use crate::error::CommerceError;

/// States of the checkout dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CheckoutState {
    /// Waiting for the customer to submit.
    #[default]
    Idle,
    /// Checking customer details.
    Validating,
    /// Handing the order link to the host.
    Submitting,
    /// Order handed off; reset pending.
    Sent,
}

impl CheckoutState {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutState::Idle => "idle",
            CheckoutState::Validating => "validating",
            CheckoutState::Submitting => "submitting",
            CheckoutState::Sent => "sent",
        }
    }
}

impl std::fmt::Display for CheckoutState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What the caller should do once the reset has run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetSignal {
    /// Close the checkout view; cart and form are already cleared.
    CloseCheckout,
}

/// Result of a successful submission.
#[derive(Debug, Clone)]
pub struct Submission {
    /// The priced order.
    pub summary: OrderSummary,
    /// Rendered message text.
    pub message: String,
    /// Link handed to the host.
    pub link: DeepLink,
}

/// Form contents and state, shared with the reset task.
#[derive(Debug, Default)]
struct Session {
    customer: CustomerInfo,
    state: CheckoutState,
}

fn lock(session: &Mutex<Session>) -> MutexGuard<'_, Session> {
    session.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Drives one checkout view: validate, format, dispatch, then reset.
///
/// After a successful submit the dispatcher schedules a reset task. When the
/// delay passes, that task empties the cart, clears the customer form and
/// moves the state back to `Idle` on its own.
pub struct CheckoutDispatcher {
    opener: Arc<dyn LinkOpener>,
    profile: StoreProfile,
    settings: CheckoutSettings,
    policy: DeliveryPolicy,
    session: Arc<Mutex<Session>>,
    reset: Option<ResetTimer>,
}

impl CheckoutDispatcher {
    /// Create a dispatcher from storefront config.
    pub fn new(opener: Arc<dyn LinkOpener>, config: &StorefrontConfig) -> Self {
        Self {
            opener,
            profile: config.store.clone(),
            settings: config.checkout.clone(),
            policy: config.delivery_policy(),
            session: Arc::default(),
            reset: None,
        }
    }

    /// Current state.
    pub fn state(&self) -> CheckoutState {
        lock(&self.session).state
    }

    /// Check if a submission is in progress (the submit control should be disabled).
    pub fn is_submitting(&self) -> bool {
        matches!(
            self.state(),
            CheckoutState::Validating | CheckoutState::Submitting
        )
    }

    /// Copy of the customer form.
    pub fn customer(&self) -> CustomerInfo {
        lock(&self.session).customer.clone()
    }

    /// Edit the customer form in place.
    pub fn update_customer(&self, edit: impl FnOnce(&mut CustomerInfo)) {
        edit(&mut lock(&self.session).customer);
    }

    /// Replace the customer form.
    pub fn set_customer(&self, customer: CustomerInfo) {
        lock(&self.session).customer = customer;
    }

    /// Delivery policy in effect.
    pub fn policy(&self) -> &DeliveryPolicy {
        &self.policy
    }

    /// Price the cart without submitting (for the summary panel).
    pub fn preview(&self, cart: &SharedCart, catalog: &Catalog) -> Result<OrderSummary, CommerceError> {
        OrderSummary::format(&cart.snapshot(), catalog, &self.customer(), &self.policy)
    }

    /// Submit the order.
    ///
    /// On validation or dispatch failure the dispatcher is back in `Idle`,
    /// the cart is untouched and the error is returned. On success the state
    /// is `Sent` and the reset task is scheduled with a handle to `cart`.
    pub async fn submit(
        &mut self,
        cart: &SharedCart,
        catalog: &Catalog,
    ) -> Result<Submission, CommerceError> {
        let state = self.state();
        if state != CheckoutState::Idle {
            return Err(CommerceError::CheckoutBusy {
                state: state.to_string(),
            });
        }
        // Idle means any earlier timer has fired or been cancelled.
        self.reset = None;

        self.transition(CheckoutState::Validating);
        let result = self.validate_and_dispatch(&cart.snapshot(), catalog).await;
        match &result {
            Ok(submission) => {
                self.transition(CheckoutState::Sent);
                self.reset = Some(self.schedule_reset(cart.clone()));
                tracing::info!(
                    order_number = %submission.summary.order_number,
                    total = %submission.summary.total,
                    items = submission.summary.item_count(),
                    "order sent"
                );
            }
            Err(e) => {
                tracing::warn!(error = %e, "order submission failed");
                self.transition(CheckoutState::Idle);
            }
        }
        result
    }

    async fn validate_and_dispatch(
        &self,
        cart: &CartStore,
        catalog: &Catalog,
    ) -> Result<Submission, CommerceError> {
        let customer = self.customer();
        customer.validate()?;

        let summary = OrderSummary::format(cart, catalog, &customer, &self.policy)?;
        if summary.is_empty() {
            return Err(CommerceError::EmptyCart);
        }

        self.transition(CheckoutState::Submitting);
        let message = summary.render(&self.profile);
        let link = DeepLink::whatsapp(
            &self.settings.whatsapp_number,
            &message,
            self.settings.max_link_length,
        );
        self.opener.open(link.uri()).await?;

        Ok(Submission {
            summary,
            message,
            link,
        })
    }

    fn schedule_reset(&self, cart: SharedCart) -> ResetTimer {
        let session = Arc::clone(&self.session);
        ResetTimer::schedule(self.settings.reset_delay(), move || {
            cart.lock().clear();
            let mut session = lock(&session);
            session.customer.reset();
            let next = CheckoutState::Idle;
            tracing::debug!(from = %session.state, to = %next, "checkout transition");
            session.state = next;
            tracing::info!("checkout reset, cart and form cleared");
        })
    }

    /// Wait until the pending reset has run.
    ///
    /// Returns `None` when no reset is pending. Safe to drop mid-wait: the
    /// reset still runs and a later call picks up the signal.
    pub async fn wait_for_reset(&mut self) -> Option<ResetSignal> {
        let timer = self.reset.as_mut()?;
        let fired = timer.fired().await;
        self.reset = None;
        fired.then_some(ResetSignal::CloseCheckout)
    }

    /// Non-blocking check for a reset that has run since the last call.
    pub fn poll_reset(&mut self) -> Option<ResetSignal> {
        if !self.reset.as_ref().is_some_and(ResetTimer::is_finished) {
            return None;
        }
        self.reset = None;
        Some(ResetSignal::CloseCheckout)
    }

    /// Tear down early: abort a pending reset and return to `Idle`.
    ///
    /// The cart and form are left as they are.
    pub fn cancel_reset(&mut self) {
        if let Some(timer) = self.reset.take() {
            timer.cancel();
            tracing::debug!("pending checkout reset cancelled");
        }
        if self.state() == CheckoutState::Sent {
            self.transition(CheckoutState::Idle);
        }
    }

    fn transition(&self, next: CheckoutState) {
        let mut session = lock(&self.session);
        tracing::debug!(from = %session.state, to = %next, "checkout transition");
        session.state = next;
    }
}

impl Drop for CheckoutDispatcher {
    fn drop(&mut self) {
        if let Some(timer) = self.reset.take() {
            timer.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkout::RecordingOpener;
    use crate::ids::ProductId;
    use std::time::Duration;

    fn dispatcher_with(opener: Arc<RecordingOpener>) -> CheckoutDispatcher {
        let dispatcher = CheckoutDispatcher::new(opener, &StorefrontConfig::default());
        dispatcher.set_customer(CustomerInfo::new("Ama", "0244000000", "Osu, Accra"));
        dispatcher
    }

    fn cart() -> SharedCart {
        let cart = SharedCart::new();
        cart.lock().set_quantity("1", 2);
        cart
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_dispatches_and_enters_sent() {
        let opener = Arc::new(RecordingOpener::new());
        let mut dispatcher = dispatcher_with(opener.clone());
        let cart = cart();

        let submission = dispatcher.submit(&cart, &Catalog::builtin()).await.unwrap();

        assert_eq!(dispatcher.state(), CheckoutState::Sent);
        assert_eq!(opener.opened(), vec![submission.link.uri().to_string()]);
        assert!(submission
            .link
            .uri()
            .starts_with("https://wa.me/233553018172?text="));
        assert!(submission.message.contains("*TOTAL: GHS 65.00*"));
        // The cart survives until the reset fires.
        assert_eq!(cart.total_item_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_name_blocks_submission() {
        let opener = Arc::new(RecordingOpener::new());
        let mut dispatcher = dispatcher_with(opener.clone());
        dispatcher.update_customer(|c| c.name.clear());
        let cart = cart();

        let result = dispatcher.submit(&cart, &Catalog::builtin()).await;

        assert!(matches!(result, Err(CommerceError::MissingCustomerFields(f)) if f == "name"));
        assert_eq!(dispatcher.state(), CheckoutState::Idle);
        assert!(opener.opened().is_empty());
        assert_eq!(cart.lock().quantity(&ProductId::new("1")), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_cart_rejected() {
        let opener = Arc::new(RecordingOpener::new());
        let mut dispatcher = dispatcher_with(opener.clone());
        let cart = SharedCart::new();
        cart.lock().add("ghost");

        let result = dispatcher.submit(&cart, &Catalog::builtin()).await;

        assert!(matches!(result, Err(CommerceError::EmptyCart)));
        assert_eq!(dispatcher.state(), CheckoutState::Idle);
        assert!(opener.opened().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dispatch_failure_returns_to_idle() {
        let opener = Arc::new(RecordingOpener::failing("no handler for wa.me"));
        let mut dispatcher = dispatcher_with(opener);
        let cart = cart();

        let result = dispatcher.submit(&cart, &Catalog::builtin()).await;

        assert!(matches!(result, Err(CommerceError::DispatchFailed(_))));
        assert_eq!(dispatcher.state(), CheckoutState::Idle);
        assert!(dispatcher.wait_for_reset().await.is_none());
        assert_eq!(cart.total_item_count(), 2);
        assert_eq!(dispatcher.customer().name, "Ama");
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_submit_while_sent_is_busy() {
        let opener = Arc::new(RecordingOpener::new());
        let mut dispatcher = dispatcher_with(opener.clone());
        let cart = cart();

        dispatcher.submit(&cart, &Catalog::builtin()).await.unwrap();
        let again = dispatcher.submit(&cart, &Catalog::builtin()).await;

        assert!(matches!(again, Err(CommerceError::CheckoutBusy { state }) if state == "sent"));
        assert_eq!(opener.opened().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_clears_cart_and_form_after_delay() {
        let opener = Arc::new(RecordingOpener::new());
        let mut dispatcher = dispatcher_with(opener);
        let cart = cart();
        dispatcher.update_customer(|c| c.delivery_note = "Gate 2".to_string());

        dispatcher.submit(&cart, &Catalog::builtin()).await.unwrap();
        let started = tokio::time::Instant::now();
        let signal = dispatcher.wait_for_reset().await;

        assert_eq!(signal, Some(ResetSignal::CloseCheckout));
        assert!(started.elapsed() >= Duration::from_secs(3));
        assert!(cart.is_empty());
        assert_eq!(dispatcher.customer(), CustomerInfo::default());
        assert_eq!(dispatcher.state(), CheckoutState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_happens_without_being_awaited() {
        let opener = Arc::new(RecordingOpener::new());
        let mut dispatcher = dispatcher_with(opener.clone());
        let cart = cart();

        dispatcher.submit(&cart, &Catalog::builtin()).await.unwrap();
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(dispatcher.state(), CheckoutState::Sent);
        assert_eq!(cart.total_item_count(), 2);

        tokio::time::sleep(Duration::from_secs(8)).await;
        assert_eq!(dispatcher.state(), CheckoutState::Idle);
        assert!(cart.is_empty());
        assert_eq!(dispatcher.customer(), CustomerInfo::default());

        cart.lock().add("3");
        dispatcher.set_customer(CustomerInfo::new("Kwame", "0209999999", "Tema"));
        let next = dispatcher.submit(&cart, &Catalog::builtin()).await.unwrap();
        assert_eq!(next.summary.total.amount_cents, 3500);
        assert_eq!(opener.opened().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_reset_only_after_timer_fires() {
        let opener = Arc::new(RecordingOpener::new());
        let mut dispatcher = dispatcher_with(opener);
        let cart = cart();

        dispatcher.submit(&cart, &Catalog::builtin()).await.unwrap();
        assert!(dispatcher.poll_reset().is_none());

        tokio::time::sleep(Duration::from_secs(4)).await;
        assert_eq!(dispatcher.poll_reset(), Some(ResetSignal::CloseCheckout));
        assert!(cart.is_empty());
        assert!(dispatcher.poll_reset().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_reset_keeps_cart() {
        let opener = Arc::new(RecordingOpener::new());
        let mut dispatcher = dispatcher_with(opener);
        let cart = cart();

        dispatcher.submit(&cart, &Catalog::builtin()).await.unwrap();
        dispatcher.cancel_reset();
        tokio::time::sleep(Duration::from_secs(5)).await;

        assert_eq!(dispatcher.state(), CheckoutState::Idle);
        assert!(dispatcher.poll_reset().is_none());
        assert_eq!(cart.total_item_count(), 2);
        assert_eq!(dispatcher.customer().name, "Ama");
    }

    #[tokio::test(start_paused = true)]
    async fn test_preview_does_not_change_state() {
        let dispatcher = dispatcher_with(Arc::new(RecordingOpener::new()));
        let summary = dispatcher.preview(&cart(), &Catalog::builtin()).unwrap();
        assert_eq!(summary.total.amount_cents, 6500);
        assert_eq!(dispatcher.state(), CheckoutState::Idle);
        assert!(!dispatcher.is_submitting());
    }
}
