//! Fertilizer Manager - Backend
//!
//! Stock and sales ledgers for a fertilizer retail shop, with customer
//! and analytics views derived from sales history and pluggable storage.

pub mod config;
pub mod error;
pub mod services;
pub mod session;
pub mod storage;

pub use config::{Config, DashboardConfig, StorageBackend, StorageConfig};
pub use error::{AppError, AppResult};
pub use services::{InventoryLedger, SalesLedger, StockEntry};
pub use session::Session;
pub use storage::{Collection, CollectionStore, Persistence, StorageError};
