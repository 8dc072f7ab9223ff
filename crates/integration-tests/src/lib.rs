//! Integration tests for SmartCart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p smartcart-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_totals` - Pricing across sequences of cart mutations
//! - `checkout_flow` - Timed checkout driven through the app shell
//! - `screens` - Scanner, voice search, store map and profile controllers
//!
//! Timed tests run on a paused tokio clock, so simulated delays cost nothing.
