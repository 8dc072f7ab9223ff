//! Timed checkout run.
//!
//! Opens the checkout screen on the starter cart, pays with the chosen
//! method and follows the session until it hands control back to the home
//! screen. Runs as long as the configured payment and exit delays.
//!
//! # Usage
//!
//! ```bash
//! smartcart checkout --method qr-code
//! SMARTCART_PAYMENT_DELAY_MS=0 SMARTCART_EXIT_DELAY_MS=0 smartcart checkout
//! ```

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use smartcart_companion::{CompanionApp, CompanionConfig, FixtureCatalog, Receipt, Route, Totals};
use smartcart_core::{CheckoutStatus, CurrencyCode, PaymentMethod};
use tokio::time::Instant;
use tracing::info;

use super::{CommandError, Output, money};

/// One status the session passed through.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TrailEntry {
    pub status: CheckoutStatus,
    pub elapsed_ms: u64,
}

#[derive(Debug, Serialize)]
pub struct CheckoutReport {
    pub method: PaymentMethod,
    pub totals: Totals,
    pub currency: CurrencyCode,
    pub trail: Vec<TrailEntry>,
    pub receipt: Option<Receipt>,
    pub returned_to: Route,
}

impl fmt::Display for CheckoutReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Paying {} with {}",
            money(self.totals.total, self.currency),
            self.method.label()
        )?;
        for entry in &self.trail {
            writeln!(f, "  {:>6} ms  {}", entry.elapsed_ms, entry.status)?;
        }
        if let Some(receipt) = &self.receipt {
            writeln!(f, "Charged {} (session {})", receipt.charged(), receipt.session_id)?;
        }
        write!(f, "Returned to {}", self.returned_to)
    }
}

/// Run one checkout to completion.
///
/// # Errors
///
/// Fails if the session refuses to start.
pub async fn run(
    config: CompanionConfig,
    method: PaymentMethod,
    output: Output,
) -> Result<(), CommandError> {
    let currency = config.pricing.currency;
    let mut app = CompanionApp::new(config, Arc::new(FixtureCatalog::new()));
    let totals = app.cart().compute_totals();

    app.navigate(Route::Checkout);
    let mut states = app.checkout()?.subscribe();
    let started = Instant::now();
    let mut trail = vec![TrailEntry {
        status: states.borrow_and_update().status,
        elapsed_ms: 0,
    }];

    app.pay(method)?;
    info!(%method, total = %totals.total, "Checkout started");

    let mut receipt = None;
    loop {
        let state = states.borrow_and_update().clone();
        if trail.last().map(|entry| entry.status) != Some(state.status) {
            trail.push(TrailEntry {
                status: state.status,
                elapsed_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            });
        }
        if state.receipt.is_some() {
            receipt = state.receipt;
        }
        if state.closed || states.changed().await.is_err() {
            break;
        }
    }

    let returned_to = app.next_navigation().await;

    output.emit(&CheckoutReport {
        method,
        totals,
        currency,
        trail,
        receipt,
        returned_to,
    })
}
