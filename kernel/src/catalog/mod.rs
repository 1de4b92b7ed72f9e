// Catalog Store
//
// Owns every food item on the menu, the admin log of catalog mutations
// and the order ledger. All operations are synchronous and in-memory.

mod tree;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::log::{AdminAction, AdminLog, AdminLogEntry};
use crate::orders::{OrderLedger, OrderReceipt};
use tree::CatalogTree;

/// Numeric key of a food item.
pub type FoodId = u32;

/// One sellable food item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: FoodId,
    pub name: String,
    pub unit_price: f64,
    pub stock_quantity: u32,
    pub category: String,
    pub total_sold: u64,
}

impl CatalogEntry {
    pub fn new(
        id: FoodId,
        name: impl Into<String>,
        unit_price: f64,
        stock_quantity: u32,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            unit_price,
            stock_quantity,
            category: category.into(),
            total_sold: 0,
        }
    }
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("food item {0} not found")]
    NotFound(FoodId),

    #[error("insufficient stock for item {id}: requested {requested}, available {available}")]
    InsufficientStock {
        id: FoodId,
        requested: u32,
        available: u32,
    },
}

/// Binary-search-tree backed catalog plus its admin log and ledger.
///
/// No balancing is performed; adversarial insertion order degrades
/// lookups to O(n).
#[derive(Debug, Default)]
pub struct CatalogStore {
    tree: CatalogTree,
    log: AdminLog,
    ledger: OrderLedger,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self {
            tree: CatalogTree::new(),
            log: AdminLog::new(),
            ledger: OrderLedger::new(),
        }
    }

    /// Insert a new item.
    ///
    /// A duplicate id leaves the existing entry untouched and returns
    /// `false`. The addition is logged either way.
    pub fn insert(
        &mut self,
        id: FoodId,
        name: &str,
        price: f64,
        stock: u32,
        category: &str,
    ) -> bool {
        let created = self
            .tree
            .insert(CatalogEntry::new(id, name, price, stock, category));

        if created {
            info!(id, item = %name, %category, "catalog item added");
        } else {
            debug!(id, "duplicate insert ignored");
        }

        self.log.append(
            AdminAction::Added,
            format!("Added Food Item: {name} ({category})"),
        );
        created
    }

    pub fn find(&self, id: FoodId) -> Option<&CatalogEntry> {
        self.tree.get(id)
    }

    pub fn contains(&self, id: FoodId) -> bool {
        self.find(id).is_some()
    }

    /// Snapshot of all entries, ascending by id.
    pub fn list_all(&self) -> Vec<&CatalogEntry> {
        self.tree.in_order()
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Overwrite the mutable fields of an existing item.
    ///
    /// `id` and `total_sold` are preserved. Values are stored as given.
    pub fn update(
        &mut self,
        id: FoodId,
        name: &str,
        price: f64,
        stock: u32,
        category: &str,
    ) -> Result<(), CatalogError> {
        let Some(entry) = self.tree.get_mut(id) else {
            warn!(id, "update of unknown item");
            return Err(CatalogError::NotFound(id));
        };

        entry.name = name.to_string();
        entry.unit_price = price;
        entry.stock_quantity = stock;
        entry.category = category.to_string();

        info!(id, item = %name, %category, "catalog item updated");
        self.log.append(
            AdminAction::Updated,
            format!("Updated Food Item: {name} ({category})"),
        );
        Ok(())
    }

    /// Remove an item.
    ///
    /// The log names the node that physically left the tree. For a node
    /// with two children that is its in-order successor, whose fields now
    /// occupy the requested node's position.
    pub fn delete(&mut self, id: FoodId) -> Result<(), CatalogError> {
        let Some(detached) = self.tree.remove(id) else {
            warn!(id, "delete of unknown item");
            return Err(CatalogError::NotFound(id));
        };

        info!(id, detached = detached.id, "catalog item deleted");
        self.log.append(
            AdminAction::Deleted,
            format!("Deleted Food Item: {}", detached.name),
        );
        Ok(())
    }

    /// Sell `quantity` units of an item.
    ///
    /// Nothing changes unless the item exists and has enough stock.
    pub fn fulfill_order(
        &mut self,
        id: FoodId,
        quantity: u32,
    ) -> Result<OrderReceipt, CatalogError> {
        let Some(entry) = self.tree.get_mut(id) else {
            warn!(id, quantity, "order for unknown item");
            return Err(CatalogError::NotFound(id));
        };

        if entry.stock_quantity < quantity {
            warn!(
                id,
                quantity,
                available = entry.stock_quantity,
                "order exceeds stock"
            );
            return Err(CatalogError::InsufficientStock {
                id,
                requested: quantity,
                available: entry.stock_quantity,
            });
        }

        entry.stock_quantity -= quantity;
        entry.total_sold += u64::from(quantity);

        let receipt = OrderReceipt::new(entry, quantity);
        info!(
            id,
            quantity,
            total = receipt.total,
            remaining = entry.stock_quantity,
            "order fulfilled"
        );
        self.ledger.record(receipt.clone());
        Ok(receipt)
    }

    pub fn append_log(&mut self, text: impl Into<String>) {
        self.log.append(AdminAction::Note, text.into());
    }

    /// Admin log entries, most recent first.
    pub fn log(&self) -> impl Iterator<Item = &AdminLogEntry> {
        self.log.iter()
    }

    /// Revenue accrued by fulfilled orders.
    pub fn revenue(&self) -> f64 {
        self.ledger.revenue()
    }

    /// Fulfilled orders, most recent first.
    pub fn orders(&self) -> impl Iterator<Item = &OrderReceipt> {
        self.ledger.receipts()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(ids: &[FoodId]) -> CatalogStore {
        let mut store = CatalogStore::new();
        for &id in ids {
            store.insert(id, &format!("item-{id}"), 2.5, 10, "test");
        }
        store
    }

    fn messages(store: &CatalogStore) -> Vec<String> {
        store.log().map(|e| e.message.clone()).collect()
    }

    #[test]
    fn insert_logs_even_on_duplicate() {
        let mut store = CatalogStore::new();
        assert!(store.insert(1, "Burger", 5.99, 10, "Fast Food"));
        assert!(!store.insert(1, "Shadow", 0.5, 1, "Other"));

        assert_eq!(store.len(), 1);
        assert_eq!(store.find(1).unwrap().name, "Burger");
        assert_eq!(
            messages(&store),
            vec![
                "Added Food Item: Shadow (Other)".to_string(),
                "Added Food Item: Burger (Fast Food)".to_string(),
            ]
        );
    }

    #[test]
    fn update_preserves_id_and_sold() {
        let mut store = store_with(&[3]);
        store.fulfill_order(3, 4).unwrap();

        store.update(3, "Pasta", 6.49, 25, "Main Course").unwrap();

        let entry = store.find(3).unwrap();
        assert_eq!(entry.id, 3);
        assert_eq!(entry.name, "Pasta");
        assert_eq!(entry.unit_price, 6.49);
        assert_eq!(entry.stock_quantity, 25);
        assert_eq!(entry.category, "Main Course");
        assert_eq!(entry.total_sold, 4);
        assert_eq!(
            store.log().next().unwrap().message,
            "Updated Food Item: Pasta (Main Course)"
        );
    }

    #[test]
    fn update_missing_logs_nothing() {
        let mut store = store_with(&[1]);
        let before = store.log().count();

        let err = store.update(9, "x", 1.0, 1, "y").unwrap_err();

        assert_eq!(err, CatalogError::NotFound(9));
        assert_eq!(store.log().count(), before);
    }

    #[test]
    fn update_accepts_unvalidated_values() {
        let mut store = store_with(&[1]);
        store.update(1, "", -3.0, 0, "").unwrap();
        assert_eq!(store.find(1).unwrap().unit_price, -3.0);
    }

    #[test]
    fn delete_two_children_logs_successor() {
        let mut store = store_with(&[5, 2, 8, 1, 3]);

        store.delete(5).unwrap();

        assert!(store.find(5).is_none());
        assert_eq!(store.find(8).unwrap().name, "item-8");
        assert_eq!(
            store.log().next().unwrap().message,
            "Deleted Food Item: item-8"
        );
    }

    #[test]
    fn delete_missing_is_not_found() {
        let mut store = store_with(&[1, 2]);
        let before = store.log().count();

        assert_eq!(store.delete(7), Err(CatalogError::NotFound(7)));
        assert_eq!(store.len(), 2);
        assert_eq!(store.log().count(), before);
    }

    #[test]
    fn order_accrues_revenue() {
        let mut store = CatalogStore::new();
        store.insert(2, "Pizza", 8.0, 8, "Fast Food");

        let receipt = store.fulfill_order(2, 3).unwrap();

        assert_eq!(receipt.total, 24.0);
        assert_eq!(store.revenue(), 24.0);
        assert_eq!(store.orders().count(), 1);
        assert_eq!(store.find(2).unwrap().stock_quantity, 5);
        assert_eq!(store.find(2).unwrap().total_sold, 3);
    }

    #[test]
    fn order_rejections_change_nothing() {
        let mut store = store_with(&[1]);

        assert_eq!(
            store.fulfill_order(1, 11),
            Err(CatalogError::InsufficientStock {
                id: 1,
                requested: 11,
                available: 10
            })
        );
        assert_eq!(store.fulfill_order(4, 1), Err(CatalogError::NotFound(4)));

        let entry = store.find(1).unwrap();
        assert_eq!(entry.stock_quantity, 10);
        assert_eq!(entry.total_sold, 0);
        assert_eq!(store.revenue(), 0.0);
        assert_eq!(store.orders().count(), 0);
    }

    #[test]
    fn zero_quantity_order_records_empty_receipt() {
        let mut store = store_with(&[1]);

        let receipt = store.fulfill_order(1, 0).unwrap();

        assert_eq!(receipt.food_id, 1);
        assert_eq!(receipt.quantity, 0);
        assert_eq!(receipt.total, 0.0);
        let entry = store.find(1).unwrap();
        assert_eq!(entry.stock_quantity, 10);
        assert_eq!(entry.total_sold, 0);
        assert_eq!(store.revenue(), 0.0);
        assert_eq!(store.orders().count(), 1);
    }

    #[test]
    fn notes_are_prepended() {
        let mut store = CatalogStore::new();
        store.append_log("first");
        store.append_log("second");

        let log: Vec<_> = store.log().collect();
        assert_eq!(log[0].message, "second");
        assert_eq!(log[0].action, AdminAction::Note);
        assert_eq!(log[1].message, "first");
    }
}
