//! Store map.
//!
//! # Usage
//!
//! ```bash
//! smartcart map
//! smartcart map --aisle 7
//! smartcart map --locate coffee
//! ```

use std::fmt;

use serde::Serialize;
use smartcart_companion::catalog::Aisle;
use smartcart_companion::screens::{FloorPosition, StoreMap};
use smartcart_companion::FixtureCatalog;
use smartcart_core::AisleId;

use super::{CommandError, Output};

#[derive(Debug, Serialize)]
pub struct MapReport {
    pub shopper_location: FloorPosition,
    pub aisles: Vec<Aisle>,
    pub destination: Option<Aisle>,
    /// Present when a lookup term was given.
    pub located: Option<Vec<Aisle>>,
}

impl fmt::Display for MapReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "You are here: {}% across, {}% down",
            self.shopper_location.x, self.shopper_location.y
        )?;
        for aisle in &self.aisles {
            writeln!(f, "  {:>2}  {:<14} {}", aisle.id, aisle.name, aisle.items.join(", "))?;
        }
        if let Some(located) = &self.located {
            if located.is_empty() {
                writeln!(f, "Not stocked in this store")?;
            }
            for aisle in located {
                writeln!(f, "Found in aisle {} ({})", aisle.id, aisle.name)?;
            }
        }
        match &self.destination {
            Some(aisle) => write!(f, "Path to aisle {} - {}", aisle.id, aisle.name),
            None => write!(f, "No destination selected"),
        }
    }
}

/// Print the map, optionally with a destination and a lookup.
///
/// # Errors
///
/// Returns `UnknownAisle` when `aisle` does not exist.
pub fn show(aisle: Option<i32>, locate: Option<&str>, output: Output) -> Result<(), CommandError> {
    let mut map = StoreMap::new(&FixtureCatalog::new());
    if let Some(id) = aisle {
        map.select_aisle(AisleId::new(id))?;
    }

    output.emit(&MapReport {
        shopper_location: map.shopper_location(),
        aisles: map.aisles().to_vec(),
        destination: map.destination().cloned(),
        located: locate.map(|term| map.locate(term).into_iter().cloned().collect()),
    })
}
