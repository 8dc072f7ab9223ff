//! Application shell.
//!
//! [`CompanionApp`] owns the cart, the active route and one controller per
//! screen. Screens with pending timers (checkout, scanner) only exist while
//! their route is active: entering the route opens a fresh session and
//! leaving it drops the session, which cancels whatever it had scheduled.

use std::sync::Arc;

use smartcart_core::{PaymentMethod, Product};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, info};

use crate::cart::Cart;
use crate::catalog::CatalogProvider;
use crate::checkout::CheckoutSession;
use crate::config::CompanionConfig;
use crate::error::{CompanionError, Result};
use crate::navigation::{NavigationRequest, Navigator, Route};
use crate::screens::{HomeFeed, Profile, ScannerSession, StoreMap, VoiceSearch};

/// A shopping session: the cart plus one controller per screen.
pub struct CompanionApp {
    config: CompanionConfig,
    catalog: Arc<dyn CatalogProvider>,
    cart: Cart,
    route: Route,
    navigator: Navigator,
    requests: UnboundedReceiver<NavigationRequest>,
    checkout: Option<CheckoutSession>,
    scanner: Option<ScannerSession>,
    voice: VoiceSearch,
    store_map: StoreMap,
    profile: Profile,
}

impl std::fmt::Debug for CompanionApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompanionApp")
            .field("route", &self.route)
            .field("cart", &self.cart)
            .field("checkout", &self.checkout)
            .field("scanner", &self.scanner)
            .finish_non_exhaustive()
    }
}

impl CompanionApp {
    /// Start on the home screen with the provider's starter cart.
    #[must_use]
    pub fn new(config: CompanionConfig, catalog: Arc<dyn CatalogProvider>) -> Self {
        let (navigator, requests) = Navigator::channel();
        let cart = Cart::with_items(config.pricing, catalog.starter_cart());
        let store_map = StoreMap::new(catalog.as_ref());
        let voice = VoiceSearch::new(config.timing.voice_delay);

        Self {
            config,
            catalog,
            cart,
            route: Route::Home,
            navigator,
            requests,
            checkout: None,
            scanner: None,
            voice,
            store_map,
            profile: Profile::new(),
        }
    }

    #[must_use]
    pub const fn route(&self) -> Route {
        self.route
    }

    #[must_use]
    pub const fn config(&self) -> &CompanionConfig {
        &self.config
    }

    #[must_use]
    pub fn catalog(&self) -> &dyn CatalogProvider {
        self.catalog.as_ref()
    }

    /// Handle for requesting navigation from outside the shell.
    #[must_use]
    pub fn navigator(&self) -> Navigator {
        self.navigator.clone()
    }

    /// Switch screens. Must be called within a tokio runtime.
    pub fn navigate(&mut self, route: Route) {
        if route == self.route {
            return;
        }
        info!(from = %self.route, to = %route, "Navigating");

        match self.route {
            Route::Checkout => {
                if let Some(session) = self.checkout.take() {
                    debug!(session_id = %session.id(), status = %session.status(), "Closing checkout");
                }
            }
            Route::ArScan => self.scanner = None,
            Route::Shop => self.voice.stop_listening(),
            _ => {}
        }

        match route {
            Route::Checkout => {
                self.checkout = Some(CheckoutSession::new(
                    self.config.timing,
                    self.config.pricing.currency,
                    self.navigator.clone(),
                ));
            }
            Route::ArScan => {
                self.scanner = Some(ScannerSession::new(
                    Arc::clone(&self.catalog),
                    self.config.timing.scan_delay,
                ));
            }
            _ => {}
        }

        self.route = route;
    }

    /// Apply navigation requested by sessions since the last call.
    ///
    /// Returns the route shown afterwards if anything was applied.
    /// Requests from sessions that have since been closed are discarded.
    pub fn pump_navigation(&mut self) -> Option<Route> {
        let mut applied = false;
        while let Ok(request) = self.requests.try_recv() {
            applied |= self.apply(request);
        }
        applied.then_some(self.route)
    }

    /// Wait for the next live navigation request and apply it.
    pub async fn next_navigation(&mut self) -> Route {
        // The shell holds a sender, so the channel never closes.
        while let Some(request) = self.requests.recv().await {
            if self.apply(request) {
                break;
            }
        }
        self.route
    }

    fn apply(&mut self, request: NavigationRequest) -> bool {
        if let Some(origin) = request.origin {
            let open = self.checkout.as_ref().map(CheckoutSession::id);
            if open != Some(origin) {
                debug!(route = %request.route, %origin, "Ignoring navigation from closed session");
                return false;
            }
        }
        self.navigate(request.route);
        true
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    pub const fn cart_mut(&mut self) -> &mut Cart {
        &mut self.cart
    }

    #[must_use]
    pub fn home_feed(&self) -> HomeFeed {
        HomeFeed::load(self.catalog.as_ref())
    }

    /// The open checkout session.
    ///
    /// # Errors
    ///
    /// Returns `WrongScreen` unless the checkout screen is showing.
    pub fn checkout(&self) -> Result<&CheckoutSession> {
        self.checkout
            .as_ref()
            .ok_or(CompanionError::WrongScreen(Route::Checkout))
    }

    /// Pay for the current cart.
    ///
    /// # Errors
    ///
    /// Fails off the checkout screen or when the session refuses to start.
    pub fn pay(&self, method: PaymentMethod) -> Result<()> {
        let totals = self.cart.compute_totals();
        self.checkout()?.initiate(method, &totals)?;
        Ok(())
    }

    /// The open scanner session.
    ///
    /// # Errors
    ///
    /// Returns `WrongScreen` unless the AR scan screen is showing.
    pub fn scanner(&self) -> Result<&ScannerSession> {
        self.scanner
            .as_ref()
            .ok_or(CompanionError::WrongScreen(Route::ArScan))
    }

    /// Put the product on the scanner screen into the cart.
    ///
    /// # Errors
    ///
    /// Fails off the scan screen or when no product is being shown.
    pub fn add_scanned_to_cart(&mut self) -> Result<Product> {
        let scanner = self
            .scanner
            .as_ref()
            .ok_or(CompanionError::WrongScreen(Route::ArScan))?;
        Ok(scanner.add_to_cart(&mut self.cart)?)
    }

    #[must_use]
    pub const fn voice(&self) -> &VoiceSearch {
        &self.voice
    }

    pub const fn voice_mut(&mut self) -> &mut VoiceSearch {
        &mut self.voice
    }

    /// Products matching the shop screen's search box.
    #[must_use]
    pub fn search_results(&self) -> Vec<Product> {
        self.voice.results(self.catalog.as_ref())
    }

    #[must_use]
    pub const fn store_map(&self) -> &StoreMap {
        &self.store_map
    }

    pub const fn store_map_mut(&mut self) -> &mut StoreMap {
        &mut self.store_map
    }

    #[must_use]
    pub const fn profile(&self) -> &Profile {
        &self.profile
    }

    pub const fn profile_mut(&mut self) -> &mut Profile {
        &mut self.profile
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use rust_decimal::Decimal;
    use smartcart_core::CheckoutStatus;

    use super::*;
    use crate::catalog::FixtureCatalog;

    fn app() -> CompanionApp {
        CompanionApp::new(CompanionConfig::default(), Arc::new(FixtureCatalog))
    }

    #[tokio::test(start_paused = true)]
    async fn test_starter_cart_totals() {
        let app = app();
        assert_eq!(app.route(), Route::Home);
        assert_eq!(app.cart().compute_totals().total, Decimal::new(573, 2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_checkout_only_on_checkout_screen() {
        let mut app = app();
        assert!(matches!(
            app.pay(PaymentMethod::Card),
            Err(CompanionError::WrongScreen(Route::Checkout))
        ));

        app.navigate(Route::Checkout);
        app.pay(PaymentMethod::Card).unwrap();
        assert_eq!(app.checkout().unwrap().status(), CheckoutStatus::Processing);
    }

    #[tokio::test(start_paused = true)]
    async fn test_completed_checkout_returns_home() {
        let mut app = app();
        app.navigate(Route::Checkout);
        app.pay(PaymentMethod::QrCode).unwrap();

        assert_eq!(app.next_navigation().await, Route::Home);
        assert!(app.checkout().is_err());
        assert_eq!(app.pump_navigation(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_leaving_checkout_cancels_payment() {
        let mut app = app();
        app.navigate(Route::Checkout);
        app.pay(PaymentMethod::Card).unwrap();
        let mut state = app.checkout().unwrap().subscribe();

        app.navigate(Route::Cart);
        tokio::time::sleep(Duration::from_secs(10)).await;

        let state = state.borrow_and_update().clone();
        assert!(state.closed);
        assert_eq!(state.status, CheckoutStatus::Processing);
        assert_eq!(app.pump_navigation(), None);
        assert_eq!(app.route(), Route::Cart);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reentering_checkout_opens_fresh_session() {
        let mut app = app();
        app.navigate(Route::Checkout);
        let first = app.checkout().unwrap().id();
        app.pay(PaymentMethod::Card).unwrap();

        app.navigate(Route::Cart);
        app.navigate(Route::Checkout);
        let session = app.checkout().unwrap();
        assert_ne!(session.id(), first);
        assert_eq!(session.status(), CheckoutStatus::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_scan_and_add_to_cart() {
        let mut app = app();
        assert!(matches!(
            app.add_scanned_to_cart(),
            Err(CompanionError::WrongScreen(Route::ArScan))
        ));

        app.navigate(Route::ArScan);
        app.scanner().unwrap().start_scan().unwrap();
        let mut rx = app.scanner().unwrap().subscribe();
        rx.wait_for(|state| state.product.is_some()).await.unwrap();

        let product = app.add_scanned_to_cart().unwrap();
        assert_eq!(app.cart().line(product.id).unwrap().quantity, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_leaving_scanner_cancels_scan() {
        let mut app = app();
        app.navigate(Route::ArScan);
        app.scanner().unwrap().start_scan().unwrap();
        let rx = app.scanner().unwrap().subscribe();

        app.navigate(Route::Home);
        tokio::time::sleep(Duration::from_secs(5)).await;

        assert!(rx.borrow().product.is_none());
        assert!(matches!(
            app.scanner().map(ScannerSession::phase),
            Err(CompanionError::WrongScreen(Route::ArScan))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_external_request_is_applied() {
        let mut app = app();
        app.navigator().request(Route::StoreMap);

        assert_eq!(app.pump_navigation(), Some(Route::StoreMap));
        assert_eq!(app.pump_navigation(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_request_from_unknown_session_is_dropped() {
        let mut app = app();
        app.navigate(Route::Checkout);
        app.navigator().request_from(Route::Home, uuid::Uuid::new_v4());

        assert_eq!(app.pump_navigation(), None);
        assert!(app.checkout().is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_leaving_shop_stops_listening() {
        let mut app = app();
        app.navigate(Route::Shop);
        app.voice_mut().toggle();
        app.navigate(Route::Home);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(!app.voice().is_listening());
        assert_eq!(app.voice().query(), "");
    }
}
