//! Integration tests for the timed checkout.
//!
//! Checkout is driven through `CompanionApp` the way a screen would: open the
//! checkout route, pay, then follow navigation requests back home.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use smartcart_companion::{
    CheckoutAction, CheckoutError, CompanionApp, CompanionConfig, CompanionError, FixtureCatalog,
    Route,
};
use smartcart_core::{CheckoutStatus, ItemId, PaymentMethod};
use tokio::time::Instant;

fn app() -> CompanionApp {
    CompanionApp::new(CompanionConfig::default(), Arc::new(FixtureCatalog::new()))
}

// =============================================================================
// Happy Path
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_status_trail_and_return_home() {
    let mut app = app();
    app.navigate(Route::Checkout);
    let mut states = app.checkout().unwrap().subscribe();
    let started = Instant::now();

    app.pay(PaymentMethod::MobilePay).unwrap();
    assert_eq!(states.borrow_and_update().status, CheckoutStatus::Processing);

    states.changed().await.unwrap();
    let success = states.borrow_and_update().clone();
    assert_eq!(success.status, CheckoutStatus::Success);
    assert_eq!(started.elapsed(), Duration::from_secs(2));

    let receipt = success.receipt.unwrap();
    assert_eq!(receipt.amount_charged, Decimal::new(573, 2));
    assert_eq!(receipt.payment_method, PaymentMethod::MobilePay);

    assert_eq!(app.next_navigation().await, Route::Home);
    assert_eq!(started.elapsed(), Duration::from_secs(5));
    assert!(app.checkout().is_err());
}

#[tokio::test(start_paused = true)]
async fn test_done_button_skips_exit_delay() {
    let mut app = app();
    app.navigate(Route::Checkout);
    let mut states = app.checkout().unwrap().subscribe();

    app.pay(PaymentMethod::Card).unwrap();
    states
        .wait_for(|state| state.status == CheckoutStatus::Success)
        .await
        .unwrap();

    let started = Instant::now();
    app.checkout().unwrap().finish().unwrap();
    assert_eq!(app.pump_navigation(), Some(Route::Home));
    assert_eq!(started.elapsed(), Duration::ZERO);

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(app.pump_navigation(), None);
}

// =============================================================================
// Snapshot Semantics
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_charge_ignores_cart_changes_while_processing() {
    let mut app = app();
    app.navigate(Route::Checkout);
    let mut states = app.checkout().unwrap().subscribe();
    app.pay(PaymentMethod::QrCode).unwrap();

    app.cart_mut().adjust_quantity(ItemId::new(1), 10);
    app.cart_mut().remove_item(ItemId::new(3));
    assert_ne!(app.cart().compute_totals().total, Decimal::new(573, 2));

    states
        .wait_for(|state| state.status == CheckoutStatus::Success)
        .await
        .unwrap();
    assert_eq!(app.checkout().unwrap().amount_charged(), Some(Decimal::new(573, 2)));
}

#[tokio::test(start_paused = true)]
async fn test_empty_cart_charges_zero() {
    let mut app = app();
    for id in [1, 2, 3] {
        app.cart_mut().remove_item(ItemId::new(id));
    }
    app.navigate(Route::Checkout);
    let mut states = app.checkout().unwrap().subscribe();
    app.pay(PaymentMethod::Card).unwrap();

    let state = states
        .wait_for(|state| state.status == CheckoutStatus::Success)
        .await
        .unwrap()
        .clone();
    assert_eq!(state.amount_charged(), Some(Decimal::ZERO));
}

// =============================================================================
// Rejected Transitions
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_second_payment_is_rejected() {
    let mut app = app();
    app.navigate(Route::Checkout);
    app.pay(PaymentMethod::Card).unwrap();

    let err = app.pay(PaymentMethod::QrCode).unwrap_err();
    assert!(matches!(
        err,
        CompanionError::Checkout(CheckoutError::InvalidTransition {
            from: CheckoutStatus::Processing,
            action: CheckoutAction::Initiate,
        })
    ));
    assert_eq!(app.checkout().unwrap().status(), CheckoutStatus::Processing);
    assert_eq!(app.checkout().unwrap().payment_method(), PaymentMethod::Card);
}

// =============================================================================
// Teardown
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_leaving_during_processing_never_completes() {
    let mut app = app();
    app.navigate(Route::Checkout);
    let states = app.checkout().unwrap().subscribe();
    app.pay(PaymentMethod::Card).unwrap();

    tokio::time::sleep(Duration::from_secs(1)).await;
    app.navigate(Route::Cart);
    tokio::time::sleep(Duration::from_secs(30)).await;

    let state = states.borrow().clone();
    assert_eq!(state.status, CheckoutStatus::Processing);
    assert!(state.receipt.is_none());
    assert!(state.closed);
    assert_eq!(app.pump_navigation(), None);
    assert_eq!(app.route(), Route::Cart);
}

#[tokio::test(start_paused = true)]
async fn test_request_from_closed_session_is_ignored() {
    let mut app = app();
    app.navigate(Route::Checkout);
    app.pay(PaymentMethod::Card).unwrap();

    // The first session leaves for home, but the shell has not pumped yet.
    tokio::time::sleep(Duration::from_secs(6)).await;
    app.navigate(Route::Cart);
    app.navigate(Route::Checkout);
    app.pay(PaymentMethod::QrCode).unwrap();
    let second = app.checkout().unwrap().id();

    assert_eq!(app.pump_navigation(), None);
    assert_eq!(app.route(), Route::Checkout);
    let session = app.checkout().unwrap();
    assert_eq!(session.id(), second);
    assert_eq!(session.status(), CheckoutStatus::Processing);

    let started = Instant::now();
    assert_eq!(app.next_navigation().await, Route::Home);
    assert_eq!(started.elapsed(), Duration::from_secs(5));
}

#[tokio::test(start_paused = true)]
async fn test_dropping_app_cancels_checkout() {
    let mut app = app();
    app.navigate(Route::Checkout);
    let states = app.checkout().unwrap().subscribe();
    app.pay(PaymentMethod::Card).unwrap();

    drop(app);
    tokio::time::sleep(Duration::from_secs(30)).await;

    assert_eq!(states.borrow().status, CheckoutStatus::Processing);
}

#[tokio::test(start_paused = true)]
async fn test_state_serializes_for_clients() {
    let mut app = app();
    app.navigate(Route::Checkout);
    app.pay(PaymentMethod::QrCode).unwrap();

    let json = serde_json::to_value(app.checkout().unwrap().state()).unwrap();
    assert_eq!(json["status"], "processing");
    assert_eq!(json["payment_method"], "qr_code");
    assert_eq!(json["amount_owed"], "5.73");
}
