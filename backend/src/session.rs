//! Application session: the single owner of all in-memory state
//!
//! Lifecycle is construct → load → mutate* → (optional) flush. Every
//! mutation writes through to the store before returning, so `flush` is
//! only needed to retry writes that failed earlier.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use shared::{Customer, Dashboard, NewSale, NewStockItem, Sale, SaleForm, StockForm};
use uuid::Uuid;
use validator::Validate;

use crate::config::{DashboardConfig, StorageBackend, StorageConfig};
use crate::error::{AppError, AppResult};
use crate::services::{analytics, customer, InventoryLedger, SalesLedger, StockEntry};
use crate::storage::{Collection, JsonFileStore, Persistence, RedbStore, StorageError};

pub struct Session {
    store: Persistence,
    inventory: InventoryLedger,
    sales: SalesLedger,
}

impl Session {
    /// Load both collections from `store`
    pub fn open(store: Persistence) -> Self {
        let inventory = InventoryLedger::load(store.clone());
        let sales = SalesLedger::load(store.clone());
        tracing::info!(
            stock_items = inventory.items().len(),
            sales = sales.sales().len(),
            transactional = store.is_transactional(),
            "session opened"
        );
        Self {
            store,
            inventory,
            sales,
        }
    }

    /// Open the configured backend and load from it
    pub fn from_config(config: &StorageConfig) -> AppResult<Self> {
        let store = match config.backend {
            StorageBackend::Memory => Persistence::in_memory(),
            StorageBackend::Json => Persistence::new(JsonFileStore::open(&config.data_dir)?),
            StorageBackend::Redb => {
                std::fs::create_dir_all(&config.data_dir).map_err(StorageError::from)?;
                Persistence::new(RedbStore::open(config.redb_path())?)
            }
        };
        Ok(Self::open(store))
    }

    pub fn inventory(&self) -> &InventoryLedger {
        &self.inventory
    }

    pub fn sales(&self) -> &SalesLedger {
        &self.sales
    }

    pub fn add_or_merge_stock(&mut self, input: impl Into<NewStockItem>) -> StockEntry {
        self.inventory.add_or_merge_stock(input.into())
    }

    pub fn decrement_stock(&mut self, item_id: Option<Uuid>, amount: Decimal) -> bool {
        self.inventory.decrement_stock(item_id, amount)
    }

    pub fn delete_stock(&mut self, item_id: Uuid) -> bool {
        self.inventory.delete_stock(item_id)
    }

    pub fn record_sale(&mut self, input: NewSale) -> Sale {
        self.sales.record_sale(input, &mut self.inventory)
    }

    pub fn record_sale_at(&mut self, input: NewSale, created_at: DateTime<Utc>) -> Sale {
        self.sales.record_sale_at(input, created_at, &mut self.inventory)
    }

    pub fn delete_sale(&mut self, sale_id: Uuid) -> bool {
        self.sales.delete_sale(sale_id)
    }

    /// Customer roster, recomputed from every sale on each call
    pub fn customers(&self) -> Vec<Customer> {
        customer::derive_customers(self.sales.sales())
    }

    pub fn dashboard(&self, reference: NaiveDate, options: &DashboardConfig) -> Dashboard {
        analytics::dashboard(&self.inventory, &self.sales, reference, options)
    }

    /// Advisory check a view runs before recording a sale from stock.
    ///
    /// Free-form sales and unknown ids always pass.
    pub fn ensure_stock_available(&self, item_id: Option<Uuid>, requested: Decimal) -> AppResult<()> {
        let Some(item) = item_id.and_then(|id| self.inventory.find(id)) else {
            return Ok(());
        };

        shared::check_stock_available(requested, item.quantity).map_err(|_| {
            AppError::InsufficientStock {
                product: item.name.clone(),
                available: item.quantity,
                unit: item.unit.clone(),
            }
        })
    }

    /// Validate, coerce and record a submitted sale form
    pub fn submit_sale(&mut self, form: SaleForm, today: NaiveDate) -> AppResult<Sale> {
        form.validate()?;
        let input = form.into_new_sale(today);
        self.ensure_stock_available(input.fertilizer_id, input.quantity)?;
        Ok(self.record_sale(input))
    }

    /// Validate, coerce and apply a submitted stock form
    pub fn submit_stock(&mut self, form: StockForm) -> AppResult<StockEntry> {
        form.validate()?;
        Ok(self.add_or_merge_stock(form))
    }

    /// Re-persist both collections. `false` if either write failed.
    pub fn flush(&self) -> bool {
        self.store.save_pair(
            Collection::Sales,
            self.sales.sales(),
            Collection::Stock,
            self.inventory.items(),
        )
    }
}
