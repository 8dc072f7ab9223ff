//! In-store map with aisle selection.
//!
//! There is no pathfinding. The shopper sits at a fixed point on the floor
//! plan and "navigating" means showing the selected aisle as the destination.

use serde::Serialize;
use smartcart_core::AisleId;
use tracing::debug;

use crate::catalog::{Aisle, CatalogProvider};
use crate::error::MapError;

/// Position on the floor plan, in percent of width and height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FloorPosition {
    pub x: u8,
    pub y: u8,
}

/// Where the shopper is shown standing.
pub const SHOPPER_LOCATION: FloorPosition = FloorPosition { x: 50, y: 70 };

#[derive(Debug, Clone)]
pub struct StoreMap {
    aisles: Vec<Aisle>,
    selected: Option<AisleId>,
}

impl StoreMap {
    #[must_use]
    pub fn new(catalog: &dyn CatalogProvider) -> Self {
        Self {
            aisles: catalog.aisles(),
            selected: None,
        }
    }

    #[must_use]
    pub fn aisles(&self) -> &[Aisle] {
        &self.aisles
    }

    #[must_use]
    pub const fn shopper_location(&self) -> FloorPosition {
        SHOPPER_LOCATION
    }

    /// Select `id` as the destination.
    ///
    /// # Errors
    ///
    /// Returns `MapError::UnknownAisle` if the store has no such aisle; the
    /// previous selection is kept.
    pub fn select_aisle(&mut self, id: AisleId) -> Result<&Aisle, MapError> {
        let index = self
            .aisles
            .iter()
            .position(|aisle| aisle.id == id)
            .ok_or(MapError::UnknownAisle(id))?;
        self.selected = Some(id);
        debug!(aisle = %id, "Selected aisle");
        self.aisles.get(index).ok_or(MapError::UnknownAisle(id))
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// The selected aisle, if any.
    #[must_use]
    pub fn destination(&self) -> Option<&Aisle> {
        let id = self.selected?;
        self.aisles.iter().find(|aisle| aisle.id == id)
    }

    /// Aisles that stock something matching `term`.
    #[must_use]
    pub fn locate(&self, term: &str) -> Vec<&Aisle> {
        self.aisles.iter().filter(|aisle| aisle.stocks(term)).collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::FixtureCatalog;

    #[test]
    fn test_select_and_clear() {
        let mut map = StoreMap::new(&FixtureCatalog);
        assert!(map.destination().is_none());

        let aisle = map.select_aisle(AisleId::new(2)).unwrap();
        assert_eq!(aisle.name, "Dairy");
        assert_eq!(map.destination().unwrap().id, AisleId::new(2));

        map.clear_selection();
        assert!(map.destination().is_none());
    }

    #[test]
    fn test_unknown_aisle_keeps_selection() {
        let mut map = StoreMap::new(&FixtureCatalog);
        map.select_aisle(AisleId::new(5)).unwrap();

        assert_eq!(
            map.select_aisle(AisleId::new(99)).unwrap_err(),
            MapError::UnknownAisle(AisleId::new(99))
        );
        assert_eq!(map.destination().unwrap().id, AisleId::new(5));
    }

    #[test]
    fn test_locate_items() {
        let map = StoreMap::new(&FixtureCatalog);
        let vegetables: Vec<_> = map.locate("vegetables").iter().map(|a| a.name.as_str()).collect();
        assert_eq!(vegetables, ["Frozen", "Canned Goods"]);
        assert!(map.locate("motor oil").is_empty());
    }

    #[test]
    fn test_shopper_location() {
        let map = StoreMap::new(&FixtureCatalog);
        assert_eq!(map.shopper_location(), FloorPosition { x: 50, y: 70 });
        assert_eq!(map.aisles().len(), 12);
    }
}
