//! redb-backed store with transactional batches
//!
//! Every collection is one row of the `collections` table, keyed by the
//! collection name and holding the JSON array as bytes. Batches commit in a
//! single write transaction, so a sale and its stock decrement land together
//! or not at all.

use std::path::Path;

use redb::{Database, ReadableDatabase, TableDefinition};

use super::{CollectionStore, StorageResult};

/// Table of collections: key = collection name, value = JSON array
const COLLECTIONS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("collections");

pub struct RedbStore {
    db: Database,
}

impl RedbStore {
    /// Open or create the database file at `path`
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;
        Self::init(db)
    }

    /// Open a database that lives only in memory
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db)
    }

    fn init(db: Database) -> StorageResult<Self> {
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(COLLECTIONS_TABLE)?;
        }
        write_txn.commit()?;
        Ok(Self { db })
    }
}

impl CollectionStore for RedbStore {
    fn read(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(COLLECTIONS_TABLE)?;
        Ok(table.get(key)?.map(|guard| guard.value().to_vec()))
    }

    fn write(&self, key: &str, value: &[u8]) -> StorageResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(COLLECTIONS_TABLE)?;
            table.insert(key, value)?;
        }
        txn.commit()?;
        Ok(())
    }

    fn write_batch(&self, entries: &[(&str, Vec<u8>)]) -> StorageResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(COLLECTIONS_TABLE)?;
            for (key, value) in entries {
                table.insert(*key, value.as_slice())?;
            }
        }
        txn.commit()?;
        Ok(())
    }

    fn is_transactional(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_missing_key() {
        let store = RedbStore::open_in_memory().unwrap();
        assert!(store.read("fertilizer_stock").unwrap().is_none());
    }

    #[test]
    fn test_batch_writes_every_entry() {
        let store = RedbStore::open_in_memory().unwrap();
        store
            .write_batch(&[
                ("fertilizer_sales", b"[1]".to_vec()),
                ("fertilizer_stock", b"[2]".to_vec()),
            ])
            .unwrap();
        assert_eq!(store.read("fertilizer_sales").unwrap(), Some(b"[1]".to_vec()));
        assert_eq!(store.read("fertilizer_stock").unwrap(), Some(b"[2]".to_vec()));
        assert!(store.is_transactional());
    }

    #[test]
    fn test_reopen_file_keeps_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shop.redb");
        {
            let store = RedbStore::open(&path).unwrap();
            store.write("fertilizer_stock", b"[]").unwrap();
        }
        let store = RedbStore::open(&path).unwrap();
        assert_eq!(store.read("fertilizer_stock").unwrap(), Some(b"[]".to_vec()));
    }
}
