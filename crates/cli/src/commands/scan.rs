//! AR scan.
//!
//! # Usage
//!
//! ```bash
//! smartcart scan
//! smartcart scan --add
//! ```

use std::fmt;
use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;
use smartcart_companion::catalog::ScannedProduct;
use smartcart_companion::screens::ScanPhase;
use smartcart_companion::{CompanionApp, CompanionConfig, FixtureCatalog, Route, ScanError};
use smartcart_core::CurrencyCode;

use super::cart::CartReport;
use super::{CommandError, Output, money};

#[derive(Debug, Serialize)]
pub struct ScanReport {
    pub scanned: ScannedProduct,
    pub currency: CurrencyCode,
    /// Cart after adding the product, when requested.
    pub cart: Option<CartReport>,
}

impl fmt::Display for ScanReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scanned = &self.scanned;
        let product = &scanned.product;
        writeln!(f, "{}  {}", product.name, money(product.price, self.currency))?;
        if let Some(percent) = product.discount_percent() {
            writeln!(f, "  {percent}% off")?;
        }
        writeln!(
            f,
            "  Rated {} ({} reviews), health score {}/100",
            scanned.rating, scanned.reviews, scanned.health_score
        )?;
        let nutrition = &scanned.nutrition;
        writeln!(
            f,
            "  {} cal, fiber {}, vitamin C {}, sugar {}",
            nutrition.calories, nutrition.fiber, nutrition.vitamin_c, nutrition.sugar
        )?;
        writeln!(f, "  {}", scanned.benefits.join(" · "))?;
        for alternative in &scanned.alternatives {
            let savings = scanned.savings_with(alternative);
            write!(f, "  Alternative: {} {}", alternative.name, money(alternative.price, self.currency))?;
            if savings > Decimal::ZERO {
                write!(f, " (save {})", money(savings, self.currency))?;
            }
            writeln!(f)?;
        }
        match &self.cart {
            Some(cart) => write!(f, "Added to cart\n{cart}"),
            None => write!(f, "{} is in {}", product.name, product.aisle),
        }
    }
}

/// Scan once, waiting out the scan delay.
///
/// # Errors
///
/// Fails if the scanner refuses the scan or the product cannot be added.
pub async fn run(config: CompanionConfig, add: bool, output: Output) -> Result<(), CommandError> {
    let currency = config.pricing.currency;
    let mut app = CompanionApp::new(config, Arc::new(FixtureCatalog::new()));
    app.navigate(Route::ArScan);

    let scanner = app.scanner()?;
    let mut states = scanner.subscribe();
    scanner.start_scan()?;

    let shown = states
        .wait_for(|state| state.phase == ScanPhase::Showing)
        .await
        .ok()
        .and_then(|state| state.product.clone());
    let scanned = shown.ok_or(ScanError::Disposed)?;

    let cart = if add {
        app.add_scanned_to_cart()?;
        Some(CartReport::from_cart(app.cart()))
    } else {
        None
    };

    output.emit(&ScanReport {
        scanned,
        currency,
        cart,
    })
}
