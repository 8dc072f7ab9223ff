//! SmartCart shopping companion.
//!
//! Headless state for the companion app: the cart and its derived totals, the
//! timed checkout sequence, and the controllers behind the scanner, search,
//! store map and profile screens. Rendering is left to the caller; every
//! controller exposes its state through `watch` channels.
//!
//! Simulated latencies (scan recognition, voice recognition, payment
//! processing) run as cancellable tokio tasks, so all timed operations must be
//! driven from within a tokio runtime.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod app;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod navigation;
pub mod pricing;
pub mod scheduler;
pub mod screens;

pub use app::CompanionApp;
pub use cart::Cart;
pub use catalog::{CatalogProvider, FixtureCatalog};
pub use checkout::{CheckoutSession, CheckoutState, Receipt};
pub use config::{CompanionConfig, ConfigError, PricingConfig, TimingConfig};
pub use error::{CheckoutAction, CheckoutError, CompanionError, MapError, Result, ScanError};
pub use navigation::{NavigationRequest, Navigator, Route};
pub use pricing::Totals;
pub use scheduler::{ScheduledTask, Scheduler, TaskOutcome};
