//! Cart inspection.
//!
//! # Usage
//!
//! ```bash
//! smartcart cart
//! smartcart cart --add 6 --add 6 --remove 2
//! ```

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use smartcart_companion::{Cart, CompanionApp, CompanionConfig, FixtureCatalog, Totals};
use smartcart_core::{CurrencyCode, ItemId, LineItem};

use super::{CommandError, Output, money};

#[derive(Debug, Serialize)]
pub struct CartReport {
    pub lines: Vec<LineItem>,
    pub item_count: u64,
    pub totals: Totals,
    pub currency: CurrencyCode,
}

impl CartReport {
    pub fn from_cart(cart: &Cart) -> Self {
        Self {
            lines: cart.lines().to_vec(),
            item_count: cart.item_count(),
            totals: cart.compute_totals(),
            currency: cart.pricing().currency,
        }
    }
}

impl fmt::Display for CartReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.lines.is_empty() {
            writeln!(f, "Your cart is empty")?;
        }
        for line in &self.lines {
            writeln!(
                f,
                "{:>3} x {:<28} {:>10}  ({})",
                line.quantity,
                line.name,
                money(line.line_total(), self.currency),
                line.aisle
            )?;
        }
        writeln!(f, "{} items", self.item_count)?;
        writeln!(f, "Subtotal {:>10}", money(self.totals.subtotal, self.currency))?;
        writeln!(f, "Tax      {:>10}", money(self.totals.tax, self.currency))?;
        writeln!(f, "Savings  {:>10}", format!("-{}", money(self.totals.savings, self.currency)))?;
        write!(f, "Total    {:>10}", money(self.totals.total, self.currency))
    }
}

/// Print the starter cart after applying `add` and `remove`.
///
/// # Errors
///
/// Returns `UnknownProduct` if an added ID is not in the catalog.
pub fn show(
    config: CompanionConfig,
    add: &[i32],
    remove: &[i32],
    output: Output,
) -> Result<(), CommandError> {
    let catalog = Arc::new(FixtureCatalog::new());
    let mut app = CompanionApp::new(config, catalog);

    for &id in remove {
        app.cart_mut().remove_item(ItemId::new(id));
    }
    for &id in add {
        let id = ItemId::new(id);
        let product = app
            .catalog()
            .products()
            .into_iter()
            .find(|product| product.id == id)
            .ok_or(CommandError::UnknownProduct(id))?;
        app.cart_mut().add_or_increment(&product);
    }

    output.emit(&CartReport::from_cart(app.cart()))
}
