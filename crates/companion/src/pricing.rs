//! Cart totals.
//!
//! Rounding rule: `subtotal` is exact, `tax` is rounded to cents (midpoint
//! away from zero), and `total = subtotal + tax - savings` using the rounded
//! tax, so the displayed lines always add up. Savings are applied up to the
//! amount owed: when they exceed `subtotal + tax` the reported `savings` is
//! the applied part and `total` is zero.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use smartcart_core::{LineItem, Price, round_to_cents};

use crate::config::PricingConfig;

/// Derived amounts for a set of line items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub savings: Decimal,
    pub total: Decimal,
}

impl Totals {
    /// Totals for an empty cart with no savings.
    pub const ZERO: Self = Self {
        subtotal: Decimal::ZERO,
        tax: Decimal::ZERO,
        savings: Decimal::ZERO,
        total: Decimal::ZERO,
    };

    /// Price the given line items.
    #[must_use]
    pub fn compute<'a, I>(lines: I, pricing: &PricingConfig) -> Self
    where
        I: IntoIterator<Item = &'a LineItem>,
    {
        let subtotal: Decimal = lines.into_iter().map(LineItem::line_total).sum();
        let tax = round_to_cents(subtotal * pricing.tax_rate);
        let savings = pricing.savings.min(subtotal + tax);
        let total = subtotal + tax - savings;

        Self {
            subtotal,
            tax,
            savings,
            total,
        }
    }

    /// The amount owed as a displayable price.
    #[must_use]
    pub fn total_price(&self, pricing: &PricingConfig) -> Price {
        Price::new(self.total, pricing.currency)
    }
}
