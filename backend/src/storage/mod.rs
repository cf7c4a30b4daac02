//! Persistence adapter for the two record collections
//!
//! # Collections
//!
//! | Collection | Key | Value |
//! |------------|-----|-------|
//! | stock | `fertilizer_stock` | JSON array of `StockItem` |
//! | sales | `fertilizer_sales` | JSON array of `Sale` |
//!
//! Backends only move bytes. [`Persistence`] sits on top and never lets a
//! failure escape: an unreadable collection loads as empty and a failed
//! write is logged and reported as `false`, leaving the in-memory copy as
//! the only record for the rest of the session.

mod json_file;
mod memory;
mod redb_store;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
pub use redb_store::RedbStore;

use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Storage errors raised by backends
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store lock poisoned")]
    Poisoned,
}

pub type StorageResult<T> = Result<T, StorageError>;

/// The two named collections kept by the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Stock,
    Sales,
}

impl Collection {
    pub fn key(&self) -> &'static str {
        match self {
            Collection::Stock => "fertilizer_stock",
            Collection::Sales => "fertilizer_sales",
        }
    }
}

/// Raw key-value backend
pub trait CollectionStore: Send + Sync {
    /// `Ok(None)` when the key has never been written
    fn read(&self, key: &str) -> StorageResult<Option<Vec<u8>>>;

    fn write(&self, key: &str, value: &[u8]) -> StorageResult<()>;

    /// Write several keys. The default writes them in order, attempting every
    /// entry and reporting the first failure; it is not atomic. Backends with
    /// transactions override this to commit all entries together.
    fn write_batch(&self, entries: &[(&str, Vec<u8>)]) -> StorageResult<()> {
        let mut first_error = None;
        for (key, value) in entries {
            if let Err(e) = self.write(key, value) {
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Whether `write_batch` commits all entries or none
    fn is_transactional(&self) -> bool {
        false
    }
}

/// Cheaply clonable handle every ledger writes through
#[derive(Clone)]
pub struct Persistence {
    store: Arc<dyn CollectionStore>,
}

impl Persistence {
    pub fn new(store: impl CollectionStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Ephemeral store, nothing survives the process
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }

    pub fn is_transactional(&self) -> bool {
        self.store.is_transactional()
    }

    /// Load a collection. Absent, unreadable or malformed data loads as empty.
    pub fn load<T: DeserializeOwned>(&self, collection: Collection) -> Vec<T> {
        let key = collection.key();
        let bytes = match self.store.read(key) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                tracing::debug!(key, "collection not found, starting empty");
                return Vec::new();
            }
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to read collection, starting empty");
                return Vec::new();
            }
        };

        match serde_json::from_slice::<Vec<T>>(&bytes) {
            Ok(records) => {
                tracing::debug!(key, count = records.len(), "collection loaded");
                records
            }
            Err(e) => {
                tracing::warn!(key, error = %e, "malformed collection, starting empty");
                Vec::new()
            }
        }
    }

    /// Persist a whole collection. Returns `false` when the write did not land.
    pub fn save<T: Serialize>(&self, collection: Collection, records: &[T]) -> bool {
        let key = collection.key();
        let result = serde_json::to_vec(records)
            .map_err(StorageError::from)
            .and_then(|bytes| self.store.write(key, &bytes));

        match result {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to persist collection, change kept in memory only");
                false
            }
        }
    }

    /// Persist two collections with one backend batch, `first` written first.
    ///
    /// Atomic only when the backend is transactional; otherwise a failure
    /// part way leaves the collections out of step on disk.
    pub fn save_pair<A: Serialize, B: Serialize>(
        &self,
        first: Collection,
        first_records: &[A],
        second: Collection,
        second_records: &[B],
    ) -> bool {
        let encoded = serde_json::to_vec(first_records).and_then(|a| {
            serde_json::to_vec(second_records).map(|b| vec![(first.key(), a), (second.key(), b)])
        });

        let result = encoded
            .map_err(StorageError::from)
            .and_then(|entries| self.store.write_batch(&entries));

        match result {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(
                    first = first.key(),
                    second = second.key(),
                    transactional = self.store.is_transactional(),
                    error = %e,
                    "failed to persist collections, changes kept in memory only"
                );
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, serde::Serialize, serde::Deserialize, PartialEq)]
    struct Row {
        name: String,
    }

    #[test]
    fn test_collection_keys() {
        assert_eq!(Collection::Stock.key(), "fertilizer_stock");
        assert_eq!(Collection::Sales.key(), "fertilizer_sales");
    }

    #[test]
    fn test_missing_collection_loads_empty() {
        let persistence = Persistence::in_memory();
        let rows: Vec<Row> = persistence.load(Collection::Stock);
        assert!(rows.is_empty());
    }

    #[test]
    fn test_malformed_collection_loads_empty() {
        let store = MemoryStore::new();
        store.write(Collection::Sales.key(), b"{not json").unwrap();
        let persistence = Persistence::new(store);
        let rows: Vec<Row> = persistence.load(Collection::Sales);
        assert!(rows.is_empty());
    }

    #[test]
    fn test_wrong_shape_loads_empty() {
        let store = MemoryStore::new();
        store.write(Collection::Sales.key(), br#"{"name":"single"}"#).unwrap();
        let persistence = Persistence::new(store);
        let rows: Vec<Row> = persistence.load(Collection::Sales);
        assert!(rows.is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let persistence = Persistence::in_memory();
        let rows = vec![
            Row {
                name: "a".to_string(),
            },
            Row {
                name: "b".to_string(),
            },
        ];
        assert!(persistence.save(Collection::Stock, &rows));
        let loaded: Vec<Row> = persistence.load(Collection::Stock);
        assert_eq!(loaded, rows);
    }

    #[test]
    fn test_save_pair_writes_both() {
        let persistence = Persistence::in_memory();
        let sales = vec![Row {
            name: "sale".to_string(),
        }];
        let stock = vec![Row {
            name: "item".to_string(),
        }];
        assert!(persistence.save_pair(Collection::Sales, &sales, Collection::Stock, &stock));
        assert_eq!(persistence.load::<Row>(Collection::Sales), sales);
        assert_eq!(persistence.load::<Row>(Collection::Stock), stock);
    }
}
