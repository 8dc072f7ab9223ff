//! SmartCart Core - Shared types library.
//!
//! This crate provides common types used across all SmartCart components:
//! - `companion` - Screen state controllers (cart, checkout, scanner, map, profile)
//! - `cli` - Command-line driver for headless shopping sessions
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no timers,
//! no async runtime. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, products, and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
