//! Catalog snapshot.

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;

use crate::domain::catalog::models::{CatalogItem, FoodId};

/// The most recently fetched list of purchasable items, indexed by name.
///
/// Cart lines are keyed by product name, so resolution goes through the
/// name index. When the backend lists two items with the same name the
/// first occurrence wins, matching the original client's lookup.
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    items: Vec<CatalogItem>,
    by_name: FxHashMap<String, usize>,
}

impl CatalogSnapshot {
    /// Build a snapshot from the items the backend returned, preserving
    /// their order.
    #[must_use]
    pub fn from_items(items: Vec<CatalogItem>) -> Self {
        let mut by_name = FxHashMap::default();

        for (index, item) in items.iter().enumerate() {
            by_name.entry(item.name.clone()).or_insert(index);
        }

        Self { items, by_name }
    }

    /// Resolve a product key (item name) to its catalog entry.
    #[must_use]
    pub fn resolve(&self, product_key: &str) -> Option<&CatalogItem> {
        self.by_name
            .get(product_key)
            .and_then(|index| self.items.get(*index))
    }

    /// All items in backend order.
    #[must_use]
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    /// Number of items in the snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the snapshot holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Overwrite an item's average rating with the server-computed value.
    ///
    /// The client is never in possession of the full rating population, so
    /// this is the only way an average changes locally. Returns `false`
    /// when the item is no longer in the snapshot.
    pub fn set_average_rating(&mut self, food: &FoodId, average: Decimal) -> bool {
        match self.items.iter_mut().find(|item| &item.id == food) {
            Some(item) => {
                item.average_rating = average;
                true
            }
            None => false,
        }
    }
}
