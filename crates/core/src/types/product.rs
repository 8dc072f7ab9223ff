//! Catalog products and cart line items.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ItemId;
use super::price::discount_percent;

/// A purchasable catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ItemId,
    pub name: String,
    /// Current unit price, never negative.
    pub price: Decimal,
    /// Pre-discount price when the product is on a deal.
    pub original_price: Option<Decimal>,
    /// Where to find it, e.g. "Produce - Aisle 1".
    pub aisle: String,
    pub in_stock: bool,
}

impl Product {
    /// Create an in-stock product at full price.
    #[must_use]
    pub fn new(id: ItemId, name: impl Into<String>, price: Decimal, aisle: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            original_price: None,
            aisle: aisle.into(),
            in_stock: true,
        }
    }

    /// Mark the product as discounted from `original_price`.
    #[must_use]
    pub const fn with_original_price(mut self, original_price: Decimal) -> Self {
        self.original_price = Some(original_price);
        self
    }

    /// Percentage off the original price, if discounted.
    #[must_use]
    pub fn discount_percent(&self) -> Option<u32> {
        self.original_price
            .and_then(|original| discount_percent(self.price, original))
    }
}

/// One product entry in the cart with its quantity.
///
/// A line item with quantity zero never lives in a cart; the cart removes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: ItemId,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
    pub aisle: String,
    pub in_stock: bool,
}

impl LineItem {
    /// A single unit of `product`.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            unit_price: product.price,
            quantity: 1,
            aisle: product.aisle.clone(),
            in_stock: product.in_stock,
        }
    }

    /// Override the quantity.
    #[must_use]
    pub const fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    /// Unit price times quantity, unrounded.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}
