//! Factory for opening the database and creating fully-wired [`RecordStore`]s.
//!
//! [`RecordStoreFactory`] is the dependency injection point: it owns the clock
//! and the registered mutation observers, opens the `redb` database described
//! by a [`StorageConfig`], and hands back a [`RedbRecordStore`] whose table
//! already exists.

use std::sync::Arc;

use guestdesk_core::{ClockSource, SystemClock};
use redb::backends::InMemoryBackend;
use redb::Database;

use crate::storage::config::StorageConfig;
use crate::storage::error::RecordStoreError;
use crate::storage::impls::RedbRecordStore;
use crate::storage::mutation_observer::{CompositeMutationObserver, MutationObserver};
use crate::storage::record_store::RecordStore;

/// Factory for creating fully-wired [`RedbRecordStore`] instances.
pub struct RecordStoreFactory {
    clock: Arc<dyn ClockSource>,
    observers: Vec<Arc<dyn MutationObserver>>,
}

impl RecordStoreFactory {
    #[must_use]
    pub fn new(clock: Arc<dyn ClockSource>, observers: Vec<Arc<dyn MutationObserver>>) -> Self {
        Self { clock, observers }
    }

    /// Opens (or creates) the database described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`RecordStoreError::Storage`] if the file cannot be opened or
    /// is not a valid database.
    pub fn open_database(config: &StorageConfig) -> Result<Database, RecordStoreError> {
        let mut builder = Database::builder();
        builder.set_cache_size(config.cache_size_bytes);

        let db = if config.in_memory {
            builder.create_with_backend(InMemoryBackend::new())?
        } else {
            builder.create(&config.db_path)?
        };

        if config.in_memory {
            tracing::info!(table = %config.table_name, "opened in-memory record database");
        } else {
            tracing::info!(
                path = %config.db_path.display(),
                table = %config.table_name,
                "opened record database"
            );
        }
        Ok(db)
    }

    /// Creates a store over an already-open database without touching it.
    #[must_use]
    pub fn create(&self, db: Arc<Database>, table_name: &str) -> RedbRecordStore {
        let observer = Arc::new(CompositeMutationObserver::new(self.observers.clone()));
        RedbRecordStore::new(db, table_name, Arc::clone(&self.clock), observer)
    }

    /// Opens the configured database and returns an initialized store.
    ///
    /// # Errors
    ///
    /// Fails if the database cannot be opened or the table cannot be created.
    pub fn open(&self, config: &StorageConfig) -> Result<RedbRecordStore, RecordStoreError> {
        let db = Arc::new(Self::open_database(config)?);
        let store = self.create(db, &config.table_name);
        store.initialize()?;
        Ok(store)
    }
}

impl Default for RecordStoreFactory {
    /// System clock and no observers.
    fn default() -> Self {
        Self::new(Arc::new(SystemClock), Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use guestdesk_core::Entry;

    use super::*;
    use crate::storage::mutation_observer::tests::CountingObserver;

    #[test]
    fn open_in_memory_returns_initialized_store() {
        let store = RecordStoreFactory::default()
            .open(&StorageConfig::in_memory())
            .unwrap();

        assert_eq!(store.table_name(), "qa_data");
        assert!(store.list_all().unwrap().is_empty());
    }

    #[test]
    fn open_file_creates_database() {
        let dir = tempfile::tempdir().unwrap();
        let config = StorageConfig {
            db_path: dir.path().join("guests.redb"),
            table_name: "sessions".to_string(),
            ..StorageConfig::default()
        };

        let store = RecordStoreFactory::default().open(&config).unwrap();
        store
            .append_or_create("555-0100", vec![Entry::new("a1", "Wifi?", "Yes")])
            .unwrap();

        assert!(config.db_path.exists());
        assert_eq!(store.table_name(), "sessions");
        assert_eq!(store.list_all().unwrap().len(), 1);
    }

    #[test]
    fn factory_wires_registered_observers() {
        let counter = Arc::new(CountingObserver::default());
        let observers: Vec<Arc<dyn MutationObserver>> = vec![counter.clone()];
        let factory = RecordStoreFactory::new(Arc::new(SystemClock), observers);

        let store = factory.open(&StorageConfig::in_memory()).unwrap();
        store
            .append_or_create("555-0100", vec![Entry::new("a1", "Wifi?", "Yes")])
            .unwrap();

        assert_eq!(counter.create_count.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn stores_over_one_database_share_data_per_table() {
        let factory = RecordStoreFactory::default();
        let db = Arc::new(RecordStoreFactory::open_database(&StorageConfig::in_memory()).unwrap());

        let guests = factory.create(Arc::clone(&db), "guests");
        let staff = factory.create(Arc::clone(&db), "staff");
        guests.initialize().unwrap();
        staff.initialize().unwrap();

        guests
            .append_or_create("555-0100", vec![Entry::new("a1", "Wifi?", "Yes")])
            .unwrap();

        assert_eq!(guests.list_all().unwrap().len(), 1);
        assert!(staff.list_all().unwrap().is_empty(), "tables should be independent");
    }
}
