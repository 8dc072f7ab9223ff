//! Home feed: featured deals and suggestions.

use std::fmt;

use serde::Serialize;
use smartcart_companion::screens::HomeFeed;
use smartcart_companion::{CompanionConfig, FixtureCatalog};
use smartcart_core::CurrencyCode;

use super::{CommandError, Output, money};

#[derive(Debug, Serialize)]
pub struct DealsReport {
    #[serde(flatten)]
    pub feed: HomeFeed,
    pub currency: CurrencyCode,
}

impl fmt::Display for DealsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Today's deals")?;
        for deal in &self.feed.deals {
            let product = &deal.product;
            write!(f, "  {:<28} {:>8}", product.name, money(product.price, self.currency))?;
            if let Some(original) = product.original_price {
                write!(f, "  was {}", money(original, self.currency))?;
            }
            if let Some(percent) = deal.discount_percent() {
                write!(f, "  {percent}% OFF")?;
            }
            writeln!(f)?;
        }
        writeln!(f, "Suggested for you")?;
        for suggestion in &self.feed.suggestions {
            writeln!(
                f,
                "  {:<28} {:>8}  {}",
                suggestion.product.name,
                money(suggestion.product.price, self.currency),
                suggestion.reason
            )?;
        }
        let categories: Vec<_> = self.feed.categories.iter().map(|c| c.name.as_str()).collect();
        write!(f, "Categories: {}", categories.join(", "))
    }
}

/// Print the home feed.
///
/// # Errors
///
/// Fails only if the report cannot be encoded.
pub fn show(config: &CompanionConfig, output: Output) -> Result<(), CommandError> {
    output.emit(&DealsReport {
        feed: HomeFeed::load(&FixtureCatalog::new()),
        currency: config.pricing.currency,
    })
}
