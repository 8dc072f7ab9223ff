//! Shopping cart state.
//!
//! The cart is owned by a single screen controller and mutated synchronously.
//! Every effective mutation republishes [`Totals`] to subscribers; calls that
//! change nothing (unknown IDs, removing an absent item) publish nothing.

use rust_decimal::Decimal;
use smartcart_core::{ItemId, LineItem, Product};
use tokio::sync::watch;
use tracing::debug;

use crate::config::PricingConfig;
use crate::pricing::Totals;

/// Line items plus the pricing inputs needed to total them.
#[derive(Debug)]
pub struct Cart {
    lines: Vec<LineItem>,
    pricing: PricingConfig,
    totals_tx: watch::Sender<Totals>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new(pricing: PricingConfig) -> Self {
        Self::with_items(pricing, Vec::new())
    }

    /// Create a cart pre-filled with line items.
    ///
    /// Lines with quantity zero are dropped and repeated IDs are merged.
    #[must_use]
    pub fn with_items(pricing: PricingConfig, items: Vec<LineItem>) -> Self {
        let mut lines: Vec<LineItem> = Vec::with_capacity(items.len());
        for item in items.into_iter().filter(|item| item.quantity > 0) {
            match lines.iter_mut().find(|line| line.id == item.id) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(item.quantity);
                }
                None => lines.push(item),
            }
        }

        let totals = Totals::compute(&lines, &pricing);
        let (totals_tx, _) = watch::channel(totals);
        Self {
            lines,
            pricing,
            totals_tx,
        }
    }

    /// Add one unit of `product`, inserting a new line if needed.
    pub fn add_or_increment(&mut self, product: &Product) {
        match self.line_mut(product.id) {
            Some(line) => {
                line.quantity = line.quantity.saturating_add(1);
                debug!(item_id = %product.id, quantity = line.quantity, "Incremented cart line");
            }
            None => {
                self.lines.push(LineItem::from_product(product));
                debug!(item_id = %product.id, name = %product.name, "Added cart line");
            }
        }
        self.publish();
    }

    /// Change a line's quantity by `delta`, clamping at zero.
    ///
    /// A line that reaches zero is removed. Unknown IDs are ignored.
    pub fn adjust_quantity(&mut self, id: ItemId, delta: i64) {
        let Some(line) = self.line_mut(id) else {
            debug!(item_id = %id, "Ignoring quantity change for unknown item");
            return;
        };

        let adjusted = i64::from(line.quantity).saturating_add(delta).max(0);
        let quantity = u32::try_from(adjusted).unwrap_or(u32::MAX);
        if quantity == line.quantity {
            return;
        }

        if quantity == 0 {
            self.lines.retain(|line| line.id != id);
            debug!(item_id = %id, "Quantity reached zero, removed cart line");
        } else {
            line.quantity = quantity;
            debug!(item_id = %id, quantity, "Adjusted cart line");
        }
        self.publish();
    }

    /// Remove a line if present.
    pub fn remove_item(&mut self, id: ItemId) {
        let before = self.lines.len();
        self.lines.retain(|line| line.id != id);
        if self.lines.len() != before {
            debug!(item_id = %id, "Removed cart line");
            self.publish();
        }
    }

    /// Replace the externally supplied savings amount.
    ///
    /// Negative amounts are treated as zero.
    pub fn set_savings(&mut self, savings: Decimal) {
        let savings = savings.max(Decimal::ZERO);
        if savings != self.pricing.savings {
            self.pricing.savings = savings;
            self.publish();
        }
    }

    /// Current totals. Pure: repeated calls without mutation agree.
    #[must_use]
    pub fn compute_totals(&self) -> Totals {
        Totals::compute(&self.lines, &self.pricing)
    }

    /// Receive a fresh [`Totals`] after every mutation.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Totals> {
        self.totals_tx.subscribe()
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    /// Look up a line by item ID.
    #[must_use]
    pub fn line(&self, id: ItemId) -> Option<&LineItem> {
        self.lines.iter().find(|line| line.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: ItemId) -> bool {
        self.line(id).is_some()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[must_use]
    pub const fn pricing(&self) -> &PricingConfig {
        &self.pricing
    }

    fn line_mut(&mut self, id: ItemId) -> Option<&mut LineItem> {
        self.lines.iter_mut().find(|line| line.id == id)
    }

    fn publish(&self) {
        self.totals_tx.send_replace(self.compute_totals());
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn product(id: i32, cents: i64) -> Product {
        Product::new(
            ItemId::new(id),
            format!("item {id}"),
            Decimal::new(cents, 2),
            "Aisle 1",
        )
    }

    fn reference_cart() -> Cart {
        Cart::with_items(
            PricingConfig::default(),
            vec![
                LineItem::from_product(&product(1, 498)).with_quantity(2),
                LineItem::from_product(&product(2, 378)),
                LineItem::from_product(&product(3, 298)),
            ],
        )
    }

    #[test]
    fn test_add_inserts_then_increments() {
        let mut cart = Cart::new(PricingConfig::default());
        let apples = product(1, 498);

        cart.add_or_increment(&apples);
        assert_eq!(cart.line(apples.id).unwrap().quantity, 1);

        cart.add_or_increment(&apples);
        assert_eq!(cart.line(apples.id).unwrap().quantity, 2);
        assert_eq!(cart.line_count(), 1);
    }

    #[test]
    fn test_adjust_to_zero_removes_line() {
        let mut cart = reference_cart();
        cart.adjust_quantity(ItemId::new(1), -2);

        assert!(!cart.contains(ItemId::new(1)));
        assert_eq!(cart.line_count(), 2);
    }

    #[test]
    fn test_adjust_below_zero_clamps_and_removes() {
        let mut cart = reference_cart();
        cart.adjust_quantity(ItemId::new(2), -10);
        assert!(!cart.contains(ItemId::new(2)));
    }

    #[test]
    fn test_adjust_unknown_id_is_noop() {
        let mut cart = reference_cart();
        let before = cart.compute_totals();
        cart.adjust_quantity(ItemId::new(99), 1);
        assert_eq!(cart.compute_totals(), before);
        assert_eq!(cart.line_count(), 3);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut cart = reference_cart();
        cart.remove_item(ItemId::new(99));
        assert_eq!(cart.line_count(), 3);
        cart.remove_item(ItemId::new(3));
        assert_eq!(cart.line_count(), 2);
    }

    #[test]
    fn test_reference_totals() {
        let totals = reference_cart().compute_totals();
        assert_eq!(
            totals,
            Totals {
                subtotal: Decimal::new(1672, 2),
                tax: Decimal::new(148, 2),
                savings: Decimal::new(1247, 2),
                total: Decimal::new(573, 2),
            }
        );
    }

    #[test]
    fn test_compute_totals_is_idempotent() {
        let cart = reference_cart();
        assert_eq!(cart.compute_totals(), cart.compute_totals());
    }

    #[test]
    fn test_subtotal_tracks_mutations() {
        let mut cart = reference_cart();
        let bread = product(3, 298);

        cart.add_or_increment(&bread);
        cart.adjust_quantity(ItemId::new(1), -1);
        cart.remove_item(ItemId::new(2));
        cart.add_or_increment(&product(4, 1));

        let expected: Decimal = cart.lines().iter().map(LineItem::line_total).sum();
        assert_eq!(cart.compute_totals().subtotal, expected);
        // 4.98 + 2 * 2.98 + 0.01
        assert_eq!(expected, Decimal::new(1095, 2));
    }

    #[test]
    fn test_subscribers_see_new_totals() {
        let mut cart = reference_cart();
        let mut rx = cart.subscribe();
        assert!(!rx.has_changed().unwrap());

        cart.adjust_quantity(ItemId::new(1), 1);

        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().subtotal, Decimal::new(2170, 2));
    }

    #[test]
    fn test_noop_mutation_does_not_notify() {
        let mut cart = reference_cart();
        let rx = cart.subscribe();

        cart.remove_item(ItemId::new(99));
        cart.adjust_quantity(ItemId::new(99), -1);
        cart.adjust_quantity(ItemId::new(1), 0);

        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn test_with_items_merges_and_drops_zero() {
        let cart = Cart::with_items(
            PricingConfig::default(),
            vec![
                LineItem::from_product(&product(1, 100)),
                LineItem::from_product(&product(1, 100)).with_quantity(2),
                LineItem::from_product(&product(2, 100)).with_quantity(0),
            ],
        );
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_set_savings_republishes() {
        let mut cart = reference_cart();
        let rx = cart.subscribe();

        cart.set_savings(Decimal::ZERO);

        assert!(rx.has_changed().unwrap());
        assert_eq!(cart.compute_totals().total, Decimal::new(1820, 2));
    }
}
