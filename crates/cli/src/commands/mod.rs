//! Subcommand implementations.
//!
//! Each command builds a report that is both `Serialize` and `Display` and
//! hands it to [`Output::emit`].

pub mod cart;
pub mod checkout;
pub mod deals;
pub mod map;
pub mod scan;
pub mod search;

use std::fmt::Display;

use rust_decimal::Decimal;
use serde::Serialize;
use smartcart_companion::{CompanionError, MapError, ScanError};
use smartcart_core::{CurrencyCode, ItemId, Price};
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The catalog has no product with this ID.
    #[error("No product with id {0}")]
    UnknownProduct(ItemId),

    /// The companion refused an action.
    #[error(transparent)]
    Companion(#[from] CompanionError),

    /// A report could not be encoded.
    #[error("JSON encoding error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<ScanError> for CommandError {
    fn from(err: ScanError) -> Self {
        Self::Companion(err.into())
    }
}

impl From<MapError> for CommandError {
    fn from(err: MapError) -> Self {
        Self::Companion(err.into())
    }
}

/// How reports are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    Text,
    Json,
}

impl Output {
    #[allow(clippy::print_stdout)]
    pub fn emit<T>(self, report: &T) -> Result<(), CommandError>
    where
        T: Serialize + Display,
    {
        match self {
            Self::Text => println!("{report}"),
            Self::Json => println!("{}", serde_json::to_string_pretty(report)?),
        }
        Ok(())
    }
}

/// Format an amount with its currency symbol.
fn money(amount: Decimal, currency: CurrencyCode) -> String {
    Price::new(amount, currency).display()
}
