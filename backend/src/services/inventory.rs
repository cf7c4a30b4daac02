//! Inventory ledger: the stock collection and every change made to it

use rust_decimal::Decimal;
use shared::{NewStockItem, StockItem};
use uuid::Uuid;

use crate::storage::{Collection, Persistence};

/// Result of adding stock
#[derive(Debug, Clone, PartialEq)]
pub struct StockEntry {
    pub item: StockItem,
    /// `true` when the input replenished an existing item
    pub merged: bool,
}

/// Owns the in-memory stock collection and writes it through on every change
#[derive(Clone)]
pub struct InventoryLedger {
    store: Persistence,
    items: Vec<StockItem>,
}

impl InventoryLedger {
    /// Load the stock collection; unreadable data starts an empty ledger
    pub fn load(store: Persistence) -> Self {
        let items = store.load(Collection::Stock);
        Self { store, items }
    }

    pub fn items(&self) -> &[StockItem] {
        &self.items
    }

    pub fn find(&self, id: Uuid) -> Option<&StockItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Add a product, or replenish the item whose name matches ignoring case.
    ///
    /// A replenishment adds to the quantity and overwrites the unit price;
    /// category, unit, threshold and usage notes of the existing item stay.
    pub fn add_or_merge_stock(&mut self, input: NewStockItem) -> StockEntry {
        let position = self.items.iter().position(|item| item.matches_name(&input.name));
        let entry = match position {
            Some(index) => {
                let existing = &mut self.items[index];
                existing.quantity = existing.quantity.saturating_add(input.quantity);
                existing.price = input.price;
                tracing::info!(
                    item_id = %existing.id,
                    name = %existing.name,
                    added = %input.quantity,
                    quantity = %existing.quantity,
                    "stock replenished"
                );
                StockEntry {
                    item: existing.clone(),
                    merged: true,
                }
            }
            None => {
                let item = StockItem::create(input);
                tracing::info!(item_id = %item.id, name = %item.name, quantity = %item.quantity, "stock item added");
                self.items.push(item.clone());
                StockEntry {
                    item,
                    merged: false,
                }
            }
        };

        self.persist();
        entry
    }

    /// Subtract `amount` from an item and persist. Empty or unknown ids are ignored.
    ///
    /// No lower bound is enforced; the quantity may go negative.
    pub fn decrement_stock(&mut self, item_id: Option<Uuid>, amount: Decimal) -> bool {
        let Some(item_id) = item_id else {
            return false;
        };
        let applied = self.apply_decrement(item_id, amount);
        if applied {
            self.persist();
        }
        applied
    }

    /// In-memory half of a decrement, for callers that batch the write themselves
    pub(crate) fn apply_decrement(&mut self, item_id: Uuid, amount: Decimal) -> bool {
        let Some(item) = self.items.iter_mut().find(|item| item.id == item_id) else {
            tracing::debug!(%item_id, "decrement for unknown stock item ignored");
            return false;
        };

        item.quantity = item.quantity.saturating_sub(amount);
        if item.quantity < Decimal::ZERO {
            tracing::warn!(%item_id, name = %item.name, quantity = %item.quantity, "stock quantity is negative");
        }
        true
    }

    /// Remove an item. Confirmation is the caller's job.
    pub fn delete_stock(&mut self, item_id: Uuid) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != item_id);
        if self.items.len() == before {
            tracing::debug!(%item_id, "delete for unknown stock item ignored");
            return false;
        }

        tracing::info!(%item_id, "stock item deleted");
        self.persist();
        true
    }

    /// Items below their own threshold, in ledger order
    pub fn list_low_stock(&self) -> Vec<&StockItem> {
        self.items.iter().filter(|item| item.is_low_stock()).collect()
    }

    pub fn total_value(&self) -> Decimal {
        self.items
            .iter()
            .map(StockItem::value)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    pub fn total_units(&self) -> Decimal {
        self.items
            .iter()
            .map(|item| item.quantity)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    /// Write the whole collection back. `false` means it stayed in memory only.
    pub fn persist(&self) -> bool {
        self.store.save(Collection::Stock, &self.items)
    }
}
