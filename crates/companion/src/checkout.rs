//! Checkout session state machine.
//!
//! ```text
//! Idle --initiate--> Processing --(payment delay)--> Success --(exit delay)--> Home
//!                                                       \--finish()----------> Home
//! ```
//!
//! The total is snapshotted when payment is initiated, so cart changes made
//! while the payment is processing do not change what is charged. Payment
//! always succeeds; there is no failure state.
//!
//! Session state lives in a `watch` channel shared with the timer tasks. Every
//! write goes through `send_if_modified` and checks the `closed` flag under
//! the channel lock, so once [`CheckoutSession::dispose`] returns the state
//! never changes again.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use smartcart_core::{CheckoutStatus, CurrencyCode, PaymentMethod, Price};
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::config::TimingConfig;
use crate::error::{CheckoutAction, CheckoutError};
use crate::navigation::{Navigator, Route};
use crate::pricing::Totals;
use crate::scheduler::Scheduler;

/// Proof of a completed payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub session_id: Uuid,
    pub amount_charged: Decimal,
    pub currency: CurrencyCode,
    pub payment_method: PaymentMethod,
    pub completed_at: DateTime<Utc>,
}

impl Receipt {
    /// The charged amount as a displayable price.
    #[must_use]
    pub const fn charged(&self) -> Price {
        Price::new(self.amount_charged, self.currency)
    }
}

/// Observable state of one checkout attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutState {
    pub status: CheckoutStatus,
    pub payment_method: PaymentMethod,
    /// Total snapshotted at initiation.
    pub amount_owed: Option<Decimal>,
    /// Present once the status is `Success`.
    pub receipt: Option<Receipt>,
    /// Set when the session is disposed or has handed control back home.
    pub closed: bool,
}

impl CheckoutState {
    fn new() -> Self {
        Self {
            status: CheckoutStatus::Idle,
            payment_method: PaymentMethod::default(),
            amount_owed: None,
            receipt: None,
            closed: false,
        }
    }

    /// Amount charged, once payment has succeeded.
    #[must_use]
    pub fn amount_charged(&self) -> Option<Decimal> {
        self.receipt.as_ref().map(|receipt| receipt.amount_charged)
    }

    fn guard(&self, allowed: CheckoutStatus, action: CheckoutAction) -> Result<(), CheckoutError> {
        if self.closed {
            return Err(CheckoutError::Disposed);
        }
        if self.status != allowed {
            return Err(CheckoutError::InvalidTransition {
                from: self.status,
                action,
            });
        }
        Ok(())
    }
}

/// One checkout attempt, from the checkout screen opening until the shopper
/// leaves the success screen.
#[derive(Debug)]
pub struct CheckoutSession {
    id: Uuid,
    state: Arc<watch::Sender<CheckoutState>>,
    scheduler: Scheduler,
    timing: TimingConfig,
    currency: CurrencyCode,
    navigator: Navigator,
}

impl CheckoutSession {
    /// Open a session in `Idle`.
    #[must_use]
    pub fn new(timing: TimingConfig, currency: CurrencyCode, navigator: Navigator) -> Self {
        let (state, _) = watch::channel(CheckoutState::new());
        let id = Uuid::new_v4();
        debug!(session_id = %id, "Opened checkout session");

        Self {
            id,
            state: Arc::new(state),
            scheduler: Scheduler::new(),
            timing,
            currency,
            navigator,
        }
    }

    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> CheckoutState {
        self.state.borrow().clone()
    }

    #[must_use]
    pub fn status(&self) -> CheckoutStatus {
        self.state.borrow().status
    }

    #[must_use]
    pub fn payment_method(&self) -> PaymentMethod {
        self.state.borrow().payment_method
    }

    #[must_use]
    pub fn amount_charged(&self) -> Option<Decimal> {
        self.state.borrow().amount_charged()
    }

    #[must_use]
    pub fn receipt(&self) -> Option<Receipt> {
        self.state.borrow().receipt.clone()
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.state.borrow().closed
    }

    /// Receive every status change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CheckoutState> {
        self.state.subscribe()
    }

    /// Choose how to pay before initiating.
    ///
    /// # Errors
    ///
    /// Rejected unless the session is `Idle`.
    pub fn select_payment_method(&self, method: PaymentMethod) -> Result<(), CheckoutError> {
        self.transition(CheckoutStatus::Idle, CheckoutAction::SelectPaymentMethod, |state| {
            state.payment_method = method;
        })
    }

    /// Start paying `totals.total` with `method`.
    ///
    /// Moves to `Processing` before returning and schedules the move to
    /// `Success` after the payment delay. Must be called within a tokio
    /// runtime.
    ///
    /// # Errors
    ///
    /// Rejected unless the session is `Idle`; the status is left unchanged.
    #[instrument(skip(self, totals), fields(session_id = %self.id, total = %totals.total))]
    pub fn initiate(&self, method: PaymentMethod, totals: &Totals) -> Result<(), CheckoutError> {
        let snapshot = totals.total;
        self.transition(CheckoutStatus::Idle, CheckoutAction::Initiate, |state| {
            state.status = CheckoutStatus::Processing;
            state.payment_method = method;
            state.amount_owed = Some(snapshot);
        })?;
        info!(%method, "Payment processing");

        let state = Arc::clone(&self.state);
        let scheduler = self.scheduler.clone();
        let navigator = self.navigator.clone();
        let exit_delay = self.timing.exit_delay;
        let session_id = self.id;
        let currency = self.currency;

        self.scheduler.schedule(self.timing.payment_delay, move || {
            let completed = state.send_if_modified(|state| {
                if state.closed || state.status != CheckoutStatus::Processing {
                    return false;
                }
                let amount_charged = state.amount_owed.unwrap_or_default();
                state.status = CheckoutStatus::Success;
                state.receipt = Some(Receipt {
                    session_id,
                    amount_charged,
                    currency,
                    payment_method: state.payment_method,
                    completed_at: Utc::now(),
                });
                true
            });
            if !completed {
                return;
            }
            info!(%session_id, "Payment succeeded");

            scheduler.schedule(exit_delay, move || {
                if close(&state) {
                    info!(%session_id, "Leaving checkout");
                    navigator.request_from(Route::Home, session_id);
                }
            });
        });

        Ok(())
    }

    /// Leave the success screen now instead of waiting for the exit delay.
    ///
    /// # Errors
    ///
    /// Rejected unless the session is in `Success`.
    pub fn finish(&self) -> Result<(), CheckoutError> {
        self.state.borrow().guard(CheckoutStatus::Success, CheckoutAction::Finish)?;
        self.scheduler.dispose();
        if close(&self.state) {
            info!(session_id = %self.id, "Checkout finished by shopper");
            self.navigator.request_from(Route::Home, self.id);
        }
        Ok(())
    }

    /// Tear the session down, cancelling any pending transition.
    ///
    /// Idempotent. Also runs on drop.
    pub fn dispose(&self) {
        self.scheduler.dispose();
        if close(&self.state) {
            debug!(session_id = %self.id, status = %self.status(), "Disposed checkout session");
        }
    }

    fn transition<F>(
        &self,
        from: CheckoutStatus,
        action: CheckoutAction,
        apply: F,
    ) -> Result<(), CheckoutError>
    where
        F: FnOnce(&mut CheckoutState),
    {
        let mut outcome = Ok(());
        self.state.send_if_modified(|state| {
            outcome = state.guard(from, action);
            if outcome.is_ok() {
                apply(state);
            }
            outcome.is_ok()
        });
        if let Err(err) = outcome {
            warn!(session_id = %self.id, error = %err, "Rejected checkout action");
        }
        outcome
    }
}

impl Drop for CheckoutSession {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// Mark the session closed. Returns whether this call closed it.
fn close(state: &watch::Sender<CheckoutState>) -> bool {
    state.send_if_modified(|state| {
        if state.closed {
            return false;
        }
        state.closed = true;
        true
    })
}
