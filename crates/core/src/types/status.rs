//! Status enums for checkout and scanning.

use serde::{Deserialize, Serialize};

/// Checkout session status.
///
/// A session only ever moves forward: `Idle -> Processing -> Success`.
/// `Success` is terminal; checking out again needs a fresh session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutStatus {
    #[default]
    Idle,
    Processing,
    Success,
}

impl CheckoutStatus {
    /// Whether no further transitions are possible.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Success)
    }
}

impl std::fmt::Display for CheckoutStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Processing => write!(f, "processing"),
            Self::Success => write!(f, "success"),
        }
    }
}

/// How the shopper pays at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Credit card on file.
    #[default]
    Card,
    /// Apple Pay, Google Pay.
    MobilePay,
    /// Scan to pay instantly.
    QrCode,
}

impl PaymentMethod {
    /// All payment methods in display order.
    pub const ALL: [Self; 3] = [Self::Card, Self::MobilePay, Self::QrCode];

    /// Human-readable name.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Card => "Credit Card",
            Self::MobilePay => "Mobile Pay",
            Self::QrCode => "QR Code",
        }
    }

    /// Secondary line shown under the name.
    #[must_use]
    pub const fn subtitle(&self) -> &'static str {
        match self {
            Self::Card => "•••• 4532",
            Self::MobilePay => "Apple Pay, Google Pay",
            Self::QrCode => "Scan to pay instantly",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Card => write!(f, "card"),
            Self::MobilePay => write!(f, "mobile_pay"),
            Self::QrCode => write!(f, "qr_code"),
        }
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "card" => Ok(Self::Card),
            "mobile_pay" | "mobile-pay" | "mobile" => Ok(Self::MobilePay),
            "qr_code" | "qr-code" | "qr" => Ok(Self::QrCode),
            _ => Err(format!("invalid payment method: {s}")),
        }
    }
}

/// Which camera the scanner uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CameraFacing {
    #[default]
    Back,
    Front,
}

impl CameraFacing {
    /// The other camera.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Back => Self::Front,
            Self::Front => Self::Back,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_method_round_trips_through_display() {
        for method in PaymentMethod::ALL {
            assert_eq!(method.to_string().parse::<PaymentMethod>().unwrap(), method);
        }
    }

    #[test]
    fn test_payment_method_accepts_cli_spelling() {
        assert_eq!(
            "mobile-pay".parse::<PaymentMethod>().unwrap(),
            PaymentMethod::MobilePay
        );
        assert!("cash".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn test_checkout_status_serde() {
        let json = serde_json::to_string(&CheckoutStatus::Processing).unwrap();
        assert_eq!(json, "\"processing\"");
    }

    #[test]
    fn test_only_success_is_terminal() {
        assert!(!CheckoutStatus::Idle.is_terminal());
        assert!(!CheckoutStatus::Processing.is_terminal());
        assert!(CheckoutStatus::Success.is_terminal());
    }

    #[test]
    fn test_camera_flip() {
        assert_eq!(CameraFacing::Back.flipped(), CameraFacing::Front);
        assert_eq!(CameraFacing::Back.flipped().flipped(), CameraFacing::Back);
    }
}
