// Store Configuration
//
// Admin credentials and the menu a fresh store is seeded with.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::auth::AdminCredentials;
use crate::catalog::{CatalogStore, FoodId};

/// Configuration loaded from JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub admin: AdminCredentials,
    pub seed: Vec<SeedItem>,
}

/// Menu item inserted when the store is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedItem {
    pub id: FoodId,
    pub name: String,
    pub price: f64,
    pub stock: u32,
    pub category: String,
}

impl SeedItem {
    fn new(id: FoodId, name: &str, price: f64, stock: u32, category: &str) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            stock,
            category: category.into(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::default_config()
    }
}

impl StoreConfig {
    /// Built-in configuration (used if no config is provided).
    pub fn default_config() -> Self {
        Self {
            admin: AdminCredentials::default(),
            seed: vec![
                SeedItem::new(1, "Burger", 5.99, 10, "Fast Food"),
                SeedItem::new(2, "Pizza", 8.99, 8, "Fast Food"),
                SeedItem::new(3, "Pasta", 6.49, 25, "Main Course"),
                SeedItem::new(4, "Ice Cream", 3.99, 30, "Desserts"),
                SeedItem::new(5, "Salad", 4.99, 15, "Healthy"),
            ],
        }
    }

    /// Create a store holding the seed menu.
    ///
    /// Seeding goes through the regular insert path, so every item
    /// appears in the admin log.
    pub fn build_store(&self) -> CatalogStore {
        let mut store = CatalogStore::new();
        for item in &self.seed {
            store.insert(item.id, &item.name, item.price, item.stock, &item.category);
        }
        debug!(items = store.len(), "store seeded");
        store
    }
}
