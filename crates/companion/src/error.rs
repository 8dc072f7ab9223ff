//! Unified error handling.
//!
//! Rejected actions are local and never fatal: a screen that receives an
//! error keeps its previous state. Screen controllers return their own
//! error types; [`CompanionError`] collects them for callers that drive
//! several screens.

use smartcart_core::{AisleId, CheckoutStatus};
use thiserror::Error;

use crate::config::ConfigError;
use crate::screens::scanner::ScanPhase;

/// An action the checkout session refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CheckoutError {
    /// The action is not allowed from the current status.
    #[error("cannot {action} while checkout is {from}")]
    InvalidTransition {
        from: CheckoutStatus,
        action: CheckoutAction,
    },

    /// The session was torn down.
    #[error("checkout session has been disposed")]
    Disposed,
}

/// Checkout operations, for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutAction {
    Initiate,
    SelectPaymentMethod,
    Finish,
}

impl std::fmt::Display for CheckoutAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Initiate => write!(f, "initiate payment"),
            Self::SelectPaymentMethod => write!(f, "change payment method"),
            Self::Finish => write!(f, "finish"),
        }
    }
}

/// An action the scanner refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScanError {
    #[error("a scan is already in progress")]
    AlreadyScanning,
    #[error("no product is being shown (scanner is {0})")]
    NothingShown(ScanPhase),
    #[error("scanner has been disposed")]
    Disposed,
}

/// A store map lookup failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MapError {
    #[error("no aisle with id {0}")]
    UnknownAisle(AisleId),
}

/// Application-level error type for the companion.
#[derive(Debug, Error)]
pub enum CompanionError {
    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Checkout refused an action.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Scanner refused an action.
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),

    /// Store map lookup failed.
    #[error("Map error: {0}")]
    Map(#[from] MapError),

    /// A screen-specific action was attempted while another screen is active.
    #[error("Not on the {0} screen")]
    WrongScreen(crate::navigation::Route),
}

/// Result type alias for `CompanionError`.
pub type Result<T> = std::result::Result<T, CompanionError>;
