//! Business logic services
//!
//! The two ledgers own the persisted collections. Customers and analytics
//! are pure projections over ledger state.

pub mod analytics;
pub mod customer;
pub mod inventory;
pub mod sales;

pub use inventory::{InventoryLedger, StockEntry};
pub use sales::{SalesHistory, SalesLedger};
