//! Catalog search from the shop screen.
//!
//! # Usage
//!
//! ```bash
//! smartcart search "almond"
//! smartcart search --voice
//! ```

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use smartcart_companion::{CompanionApp, CompanionConfig, FixtureCatalog, Route};
use smartcart_core::{CurrencyCode, Product};

use super::{CommandError, Output, money};

#[derive(Debug, Serialize)]
pub struct SearchReport {
    pub query: String,
    pub by_voice: bool,
    pub results: Vec<Product>,
    pub currency: CurrencyCode,
}

impl fmt::Display for SearchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.by_voice {
            writeln!(f, "Heard: \"{}\"", self.query)?;
        }
        if self.results.is_empty() {
            return write!(f, "No products match \"{}\"", self.query);
        }
        let mut rows = self.results.iter().peekable();
        while let Some(product) = rows.next() {
            write!(
                f,
                "  {:>2}  {:<28} {:>8}  {}",
                product.id,
                product.name,
                money(product.price, self.currency),
                product.aisle
            )?;
            if rows.peek().is_some() {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// Search by typed text, or listen for a spoken query first.
///
/// # Errors
///
/// Fails only if the report cannot be encoded.
pub async fn run(
    config: CompanionConfig,
    query: Option<String>,
    voice: bool,
    output: Output,
) -> Result<(), CommandError> {
    let currency = config.pricing.currency;
    let mut app = CompanionApp::new(config, Arc::new(FixtureCatalog::new()));
    app.navigate(Route::Shop);

    if voice {
        let mut states = app.voice().subscribe();
        app.voice_mut().toggle();
        // A closed channel means the search box was torn down; use whatever it holds.
        let _ = states.wait_for(|state| !state.listening).await;
    } else if let Some(query) = query {
        app.voice().set_query(query);
    }

    output.emit(&SearchReport {
        query: app.voice().query(),
        by_voice: voice,
        results: app.search_results(),
        currency,
    })
}
