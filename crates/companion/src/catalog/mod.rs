//! Catalog data provider.
//!
//! Screens never own product data; they ask a [`CatalogProvider`] for it.
//! The shipped implementation is [`FixtureCatalog`], a fixed set of grocery
//! products, deals and aisles for a single store.

mod fixture;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use smartcart_core::{AisleId, CategoryId, DealId, LineItem, Product, SuggestionId};

pub use fixture::FixtureCatalog;

/// Source of catalog and deals content.
pub trait CatalogProvider: Send + Sync {
    /// Every purchasable product.
    fn products(&self) -> Vec<Product>;

    /// Browsing categories on the shop screen.
    fn categories(&self) -> Vec<Category>;

    /// Discounted products featured on the home feed.
    fn featured_deals(&self) -> Vec<Deal>;

    /// Products recommended for this shopper.
    fn suggestions(&self) -> Vec<Suggestion>;

    /// Store layout.
    fn aisles(&self) -> Vec<Aisle>;

    /// What the AR scanner recognises when pointed at a shelf.
    fn scan_result(&self) -> ScannedProduct;

    /// The cart a shopper starts the session with.
    fn starter_cart(&self) -> Vec<LineItem>;

    /// Case-insensitive product name search. An empty query matches nothing.
    fn search(&self, query: &str) -> Vec<Product> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.products()
            .into_iter()
            .filter(|product| product.name.to_lowercase().contains(&needle))
            .collect()
    }
}

/// A shop category tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

/// A featured deal on the home feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deal {
    pub id: DealId,
    pub product: Product,
}

impl Deal {
    /// Percentage off, e.g. `Some(17)` for "17% OFF".
    #[must_use]
    pub fn discount_percent(&self) -> Option<u32> {
        self.product.discount_percent()
    }
}

/// A personalized product suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub id: SuggestionId,
    pub product: Product,
    /// Why it was suggested, e.g. "Frequently bought together".
    pub reason: String,
}

/// One aisle of the store map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aisle {
    pub id: AisleId,
    pub name: String,
    pub items: Vec<String>,
}

impl Aisle {
    /// Whether any stocked item name contains `term` (case-insensitive).
    #[must_use]
    pub fn stocks(&self, term: &str) -> bool {
        let needle = term.trim().to_lowercase();
        !needle.is_empty()
            && (self.name.to_lowercase().contains(&needle)
                || self
                    .items
                    .iter()
                    .any(|item| item.to_lowercase().contains(&needle)))
    }
}

/// Nutrition facts shown on a scanned product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nutrition {
    pub calories: u32,
    pub fiber: String,
    pub vitamin_c: String,
    pub sugar: String,
}

/// A cheaper product the scanner suggests instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alternative {
    pub name: String,
    pub price: Decimal,
}

/// Everything the scanner shows about a recognised product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScannedProduct {
    pub product: Product,
    /// Average star rating out of 5.
    pub rating: Decimal,
    pub reviews: u32,
    /// 0-100.
    pub health_score: u8,
    pub nutrition: Nutrition,
    pub benefits: Vec<String>,
    pub alternatives: Vec<Alternative>,
}

impl ScannedProduct {
    /// How much cheaper `alternative` is than the scanned product.
    #[must_use]
    pub fn savings_with(&self, alternative: &Alternative) -> Decimal {
        (self.product.price - alternative.price).max(Decimal::ZERO)
    }
}
