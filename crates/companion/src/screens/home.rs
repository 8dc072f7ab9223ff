//! Home feed.

use serde::Serialize;

use crate::catalog::{CatalogProvider, Category, Deal, Suggestion};

/// Featured deals and personalized suggestions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HomeFeed {
    pub deals: Vec<Deal>,
    pub suggestions: Vec<Suggestion>,
    pub categories: Vec<Category>,
}

impl HomeFeed {
    #[must_use]
    pub fn load(catalog: &dyn CatalogProvider) -> Self {
        Self {
            deals: catalog.featured_deals(),
            suggestions: catalog.suggestions(),
            categories: catalog.categories(),
        }
    }
}
