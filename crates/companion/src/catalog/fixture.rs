//! Built-in catalog for a single supercenter.

use rust_decimal::Decimal;
use smartcart_core::{AisleId, CategoryId, DealId, ItemId, LineItem, Product, SuggestionId};

use super::{
    Aisle, Alternative, CatalogProvider, Category, Deal, Nutrition, ScannedProduct, Suggestion,
};

const APPLES: i32 = 1;
const MILK: i32 = 2;
const BREAD: i32 = 3;
const YOGURT: i32 = 4;
const ALMOND_MILK: i32 = 5;
const BANANAS: i32 = 6;
const ARTISAN_BREAD: i32 = 7;
const LETTUCE: i32 = 8;
const CHEDDAR: i32 = 9;
const GRANOLA: i32 = 10;

/// Static catalog content.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureCatalog;

impl FixtureCatalog {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn product(&self, id: i32) -> Option<Product> {
        self.products()
            .into_iter()
            .find(|product| product.id == ItemId::new(id))
    }
}

fn usd(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

impl CatalogProvider for FixtureCatalog {
    fn products(&self) -> Vec<Product> {
        vec![
            Product::new(
                ItemId::new(APPLES),
                "Organic Honey Crisp Apples",
                usd(498),
                "Produce - Aisle 1",
            )
            .with_original_price(usd(598)),
            Product::new(ItemId::new(MILK), "2% Milk Gallon", usd(378), "Dairy - Aisle 12"),
            Product::new(ItemId::new(BREAD), "Whole Grain Bread", usd(298), "Bakery - Aisle 8"),
            Product::new(ItemId::new(YOGURT), "Greek Yogurt", usd(498), "Dairy - Aisle 12"),
            Product::new(ItemId::new(ALMOND_MILK), "Almond Milk", usd(378), "Dairy - Aisle 12"),
            Product::new(ItemId::new(BANANAS), "Organic Bananas", usd(248), "Produce - Aisle 1")
                .with_original_price(usd(298)),
            Product::new(
                ItemId::new(ARTISAN_BREAD),
                "Artisan Whole Grain Loaf",
                usd(324),
                "Bakery - Aisle 8",
            )
            .with_original_price(usd(398)),
            Product::new(ItemId::new(LETTUCE), "Romaine Lettuce", usd(198), "Produce - Aisle 1"),
            Product::new(ItemId::new(CHEDDAR), "Sharp Cheddar", usd(348), "Dairy - Aisle 12"),
            Product::new(ItemId::new(GRANOLA), "Honey Almond Granola", usd(412), "Cereal - Aisle 9"),
        ]
    }

    fn categories(&self) -> Vec<Category> {
        ["Grocery", "Electronics", "Clothing", "Home", "Health", "Beauty"]
            .into_iter()
            .zip(1..)
            .map(|(name, id)| Category {
                id: CategoryId::new(id),
                name: name.to_string(),
            })
            .collect()
    }

    fn featured_deals(&self) -> Vec<Deal> {
        [BANANAS, ARTISAN_BREAD]
            .into_iter()
            .filter_map(|id| self.product(id))
            .zip(1..)
            .map(|(product, id)| Deal {
                id: DealId::new(id),
                product,
            })
            .collect()
    }

    fn suggestions(&self) -> Vec<Suggestion> {
        [
            (YOGURT, "Based on your diet preferences"),
            (ALMOND_MILK, "Frequently bought together"),
        ]
        .into_iter()
        .filter_map(|(id, reason)| self.product(id).map(|product| (product, reason)))
        .zip(1..)
        .map(|((product, reason), id)| Suggestion {
            id: SuggestionId::new(id),
            product,
            reason: reason.to_string(),
        })
        .collect()
    }

    fn aisles(&self) -> Vec<Aisle> {
        let layout: [(&str, &[&str]); 12] = [
            ("Produce", &["Apples", "Bananas", "Lettuce", "Carrots"]),
            ("Dairy", &["Milk", "Cheese", "Yogurt", "Butter"]),
            ("Meat", &["Chicken", "Beef", "Pork", "Fish"]),
            ("Frozen", &["Ice Cream", "Frozen Meals", "Vegetables"]),
            ("Bakery", &["Bread", "Pastries", "Cakes", "Cookies"]),
            ("Deli", &["Sliced Meats", "Prepared Foods", "Salads"]),
            ("Beverages", &["Soda", "Water", "Juice", "Coffee"]),
            ("Snacks", &["Chips", "Crackers", "Nuts", "Candy"]),
            ("Cereal", &["Breakfast Cereal", "Oatmeal", "Granola"]),
            ("Canned Goods", &["Soup", "Vegetables", "Beans", "Sauce"]),
            ("Personal Care", &["Shampoo", "Toothpaste", "Soap"]),
            ("Pharmacy", &["Medications", "Vitamins", "First Aid"]),
        ];

        layout
            .into_iter()
            .zip(1..)
            .map(|((name, items), id)| Aisle {
                id: AisleId::new(id),
                name: name.to_string(),
                items: items.iter().map(ToString::to_string).collect(),
            })
            .collect()
    }

    fn scan_result(&self) -> ScannedProduct {
        let product = self.product(APPLES).unwrap_or_else(|| {
            Product::new(
                ItemId::new(APPLES),
                "Organic Honey Crisp Apples",
                usd(498),
                "Produce - Aisle 1",
            )
        });

        ScannedProduct {
            product,
            rating: Decimal::new(48, 1),
            reviews: 1247,
            health_score: 95,
            nutrition: Nutrition {
                calories: 95,
                fiber: "4g".to_string(),
                vitamin_c: "14% DV".to_string(),
                sugar: "19g".to_string(),
            },
            benefits: ["Organic", "High in Fiber", "Rich in Antioxidants"]
                .map(String::from)
                .to_vec(),
            alternatives: vec![
                Alternative {
                    name: "Regular Apples".to_string(),
                    price: usd(348),
                },
                Alternative {
                    name: "Gala Apples".to_string(),
                    price: usd(398),
                },
            ],
        }
    }

    fn starter_cart(&self) -> Vec<LineItem> {
        [(APPLES, 2), (MILK, 1), (BREAD, 1)]
            .into_iter()
            .filter_map(|(id, quantity)| {
                self.product(id)
                    .map(|product| LineItem::from_product(&product).with_quantity(quantity))
            })
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_product_ids_are_unique() {
        let products = FixtureCatalog.products();
        let mut ids: Vec<_> = products.iter().map(|p| p.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), products.len());
    }

    #[test]
    fn test_deal_discounts() {
        let deals = FixtureCatalog.featured_deals();
        let percents: Vec<_> = deals.iter().map(Deal::discount_percent).collect();
        assert_eq!(percents, vec![Some(17), Some(19)]);
    }

    #[test]
    fn test_starter_cart_matches_reference() {
        let cart = FixtureCatalog.starter_cart();
        assert_eq!(cart.len(), 3);
        assert_eq!(cart[0].quantity, 2);
        assert_eq!(cart[0].unit_price, usd(498));
        let subtotal: Decimal = cart.iter().map(LineItem::line_total).sum();
        assert_eq!(subtotal, usd(1672));
    }

    #[test]
    fn test_twelve_aisles() {
        let aisles = FixtureCatalog.aisles();
        assert_eq!(aisles.len(), 12);
        assert_eq!(aisles[11].name, "Pharmacy");
        assert_eq!(aisles[0].id, AisleId::new(1));
    }

    #[test]
    fn test_scan_result_alternative_savings() {
        let scanned = FixtureCatalog.scan_result();
        let savings: Vec<_> = scanned
            .alternatives
            .iter()
            .map(|alt| scanned.savings_with(alt))
            .collect();
        assert_eq!(savings, vec![usd(150), usd(100)]);
        assert_eq!(scanned.product.discount_percent(), Some(17));
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let hits = FixtureCatalog.search("ORGANIC");
        assert_eq!(hits.len(), 2);
        assert!(FixtureCatalog.search("   ").is_empty());
        assert!(FixtureCatalog.search("motor oil").is_empty());
    }

    #[test]
    fn test_six_categories() {
        assert_eq!(FixtureCatalog.categories().len(), 6);
    }
}
