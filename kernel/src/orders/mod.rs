// Order Ledger
//
// Running revenue and history of fulfilled orders, owned by the
// catalog store.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use uuid::Uuid;

use crate::catalog::{CatalogEntry, FoodId};

/// Stable identifier for a fulfilled order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(pub Uuid);

/// Record of one fulfilled order, priced at the time of sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderReceipt {
    pub order_id: OrderId,
    pub food_id: FoodId,
    pub name: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub total: f64,
}

impl OrderReceipt {
    pub(crate) fn new(entry: &CatalogEntry, quantity: u32) -> Self {
        Self {
            order_id: OrderId(Uuid::new_v4()),
            food_id: entry.id,
            name: entry.name.clone(),
            quantity,
            unit_price: entry.unit_price,
            total: entry.unit_price * f64::from(quantity),
        }
    }
}

#[derive(Debug, Default)]
pub struct OrderLedger {
    receipts: VecDeque<OrderReceipt>,
    revenue: f64,
}

impl OrderLedger {
    pub fn new() -> Self {
        Self {
            receipts: VecDeque::new(),
            revenue: 0.0,
        }
    }

    pub fn record(&mut self, receipt: OrderReceipt) {
        self.revenue += receipt.total;
        self.receipts.push_front(receipt);
    }

    pub fn revenue(&self) -> f64 {
        self.revenue
    }

    /// Receipts from most recent to oldest.
    pub fn receipts(&self) -> impl Iterator<Item = &OrderReceipt> {
        self.receipts.iter()
    }
}
