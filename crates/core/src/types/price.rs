//! Type-safe price representation using decimal arithmetic.
//!
//! All money in SmartCart is a [`Decimal`] in the currency's standard unit
//! (dollars, not cents). Rounding to cents happens only where a value is
//! presented or charged, via [`round_to_cents`].

use core::fmt;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a USD price from a number of cents.
    ///
    /// ```
    /// use smartcart_core::Price;
    ///
    /// assert_eq!(Price::usd_cents(498).to_string(), "$4.98");
    /// ```
    #[must_use]
    pub fn usd_cents(cents: i64) -> Self {
        Self::new(Decimal::new(cents, 2), CurrencyCode::USD)
    }

    /// Format for display, rounded to cents (e.g., "$19.99").
    #[must_use]
    pub fn display(&self) -> String {
        format!(
            "{}{:.2}",
            self.currency_code.symbol(),
            round_to_cents(self.amount)
        )
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
}

impl CurrencyCode {
    /// Display symbol for the currency.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::USD | Self::CAD | Self::AUD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }

    /// Three-letter ISO code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
            Self::CAD => "CAD",
            Self::AUD => "AUD",
        }
    }
}

impl std::str::FromStr for CurrencyCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "USD" => Ok(Self::USD),
            "EUR" => Ok(Self::EUR),
            "GBP" => Ok(Self::GBP),
            "CAD" => Ok(Self::CAD),
            "AUD" => Ok(Self::AUD),
            _ => Err(format!("unsupported currency code: {s}")),
        }
    }
}

/// Round an amount to cents, midpoint away from zero.
///
/// ```
/// use rust_decimal::Decimal;
/// use smartcart_core::round_to_cents;
///
/// assert_eq!(round_to_cents(Decimal::new(14839, 4)), Decimal::new(148, 2));
/// assert_eq!(round_to_cents(Decimal::new(1005, 3)), Decimal::new(101, 2));
/// ```
#[must_use]
pub fn round_to_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Whole-number percentage saved relative to an original price.
///
/// Returns `None` when there is no saving to report (original price is zero
/// or not above the current price).
#[must_use]
pub fn discount_percent(price: Decimal, original: Decimal) -> Option<u32> {
    if original <= Decimal::ZERO || original <= price {
        return None;
    }
    let pct = ((original - price) / original * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    pct.to_u32()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_price_display_rounds_to_cents() {
        let price = Price::new(Decimal::new(14839, 4), CurrencyCode::USD);
        assert_eq!(price.display(), "$1.48");
    }

    #[test]
    fn test_price_display_pads_cents() {
        assert_eq!(Price::usd_cents(500).to_string(), "$5.00");
        let gbp = Price::new(Decimal::new(3, 0), CurrencyCode::GBP);
        assert_eq!(gbp.to_string(), "£3.00");
    }

    #[test]
    fn test_round_to_cents_midpoint() {
        assert_eq!(round_to_cents(Decimal::new(5735, 3)), Decimal::new(574, 2));
        assert_eq!(round_to_cents(Decimal::new(-5735, 3)), Decimal::new(-574, 2));
    }

    #[test]
    fn test_discount_percent_matches_deal_labels() {
        // $2.48 down from $2.98 is advertised as 17% off
        assert_eq!(
            discount_percent(Decimal::new(248, 2), Decimal::new(298, 2)),
            Some(17)
        );
        // $3.24 down from $3.98 is advertised as 19% off
        assert_eq!(
            discount_percent(Decimal::new(324, 2), Decimal::new(398, 2)),
            Some(19)
        );
    }

    #[test]
    fn test_discount_percent_none_without_saving() {
        assert_eq!(discount_percent(Decimal::ONE, Decimal::ONE), None);
        assert_eq!(discount_percent(Decimal::ONE, Decimal::ZERO), None);
    }

    #[test]
    fn test_currency_code_parse() {
        assert_eq!("usd".parse::<CurrencyCode>().unwrap(), CurrencyCode::USD);
        assert!("xyz".parse::<CurrencyCode>().is_err());
    }
}
