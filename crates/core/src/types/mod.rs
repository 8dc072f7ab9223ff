//! Core types for SmartCart.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod preference;
pub mod price;
pub mod product;
pub mod status;

pub use id::*;
pub use preference::PreferenceKey;
pub use price::{CurrencyCode, Price, discount_percent, round_to_cents};
pub use product::{LineItem, Product};
pub use status::*;
