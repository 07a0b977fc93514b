//! [`RecordStore`] backed by a single `redb` table.
//!
//! [`RedbRecordStore`] maps phone number (`&str`) to the JSON text of its
//! [`Record`]. Every operation is one `redb` transaction: writes are
//! serialized by `redb`'s single-writer discipline, reads see a consistent
//! snapshot. The database handle is injected so tests can hand each store its
//! own in-memory database.

use std::sync::Arc;

use guestdesk_core::{
    decode_record, encode_record, ClockSource, CodecError, Entry, Record, Timestamp,
};
use redb::{Database, ReadableTable, TableDefinition, TableError, TableHandle, WriteTransaction};

use crate::storage::error::RecordStoreError;
use crate::storage::mutation_observer::{CompositeMutationObserver, MutationObserver};
use crate::storage::record_store::{CheckoutOutcome, RecordStore};

/// Default name of the table holding guest records.
pub const DEFAULT_TABLE_NAME: &str = "qa_data";

/// Record store over one `redb` table.
pub struct RedbRecordStore {
    db: Arc<Database>,
    table_name: String,
    clock: Arc<dyn ClockSource>,
    observer: Arc<CompositeMutationObserver>,
}

impl RedbRecordStore {
    /// Creates a store over `table_name` in `db`.
    ///
    /// Does not touch the database; call [`RecordStore::initialize`] to create
    /// the table up front.
    #[must_use]
    pub fn new(
        db: Arc<Database>,
        table_name: impl Into<String>,
        clock: Arc<dyn ClockSource>,
        observer: Arc<CompositeMutationObserver>,
    ) -> Self {
        Self {
            db,
            table_name: table_name.into(),
            clock,
            observer,
        }
    }

    /// Shared handle to the underlying database.
    #[must_use]
    pub fn database(&self) -> &Arc<Database> {
        &self.db
    }

    fn table(&self) -> TableDefinition<'_, &'static str, &'static str> {
        TableDefinition::new(&self.table_name)
    }

    fn missing_table(&self) -> RecordStoreError {
        RecordStoreError::MissingTable {
            table: self.table_name.clone(),
        }
    }

    /// Runs `body` in a write transaction, committing on `Ok` and aborting on `Err`.
    fn update<T>(
        &self,
        body: impl FnOnce(&WriteTransaction) -> Result<T, RecordStoreError>,
    ) -> Result<T, RecordStoreError> {
        let txn = self.db.begin_write()?;
        match body(&txn) {
            Ok(value) => {
                txn.commit()?;
                Ok(value)
            }
            Err(err) => {
                if let Err(abort_err) = txn.abort() {
                    tracing::warn!(
                        table = %self.table_name,
                        error = %abort_err,
                        "failed to abort write transaction"
                    );
                }
                Err(err)
            }
        }
    }

    fn has_table(&self, txn: &WriteTransaction) -> Result<bool, RecordStoreError> {
        Ok(txn
            .list_tables()?
            .any(|handle| handle.name() == self.table_name))
    }
}

fn codec_error(tel_number: &str, source: CodecError) -> RecordStoreError {
    RecordStoreError::Codec {
        tel_number: tel_number.to_string(),
        source,
    }
}

impl RecordStore for RedbRecordStore {
    fn table_name(&self) -> &str {
        &self.table_name
    }

    fn initialize(&self) -> Result<(), RecordStoreError> {
        self.update(|txn| {
            txn.open_table(self.table())?;
            Ok(())
        })
    }

    fn append_or_create(
        &self,
        tel_number: &str,
        entries: Vec<Entry>,
    ) -> Result<Record, RecordStoreError> {
        let appended = entries.len();
        let (record, created) = self.update(|txn| {
            let mut table = txn.open_table(self.table())?;
            let existing = table.get(tel_number)?.map(|guard| guard.value().to_owned());

            let (record, created) = match existing {
                Some(text) => {
                    let mut record =
                        decode_record(&text).map_err(|e| codec_error(tel_number, e))?;
                    record.append(entries);
                    (record, false)
                }
                None => (Record::new(tel_number, entries, self.clock.now()), true),
            };

            let text = encode_record(&record).map_err(|e| codec_error(tel_number, e))?;
            table.insert(tel_number, text.as_str())?;
            Ok((record, created))
        })?;

        if created {
            self.observer.on_create(tel_number, &record);
        } else {
            self.observer.on_append(tel_number, &record, appended);
        }
        Ok(record)
    }

    fn mark_checkout(
        &self,
        tel_number: &str,
        entry_id: &str,
        at: Timestamp,
    ) -> Result<CheckoutOutcome, RecordStoreError> {
        let outcome = self.update(|txn| {
            // Checkout never creates the table.
            if !self.has_table(txn)? {
                return Err(self.missing_table());
            }

            let mut table = txn.open_table(self.table())?;
            let Some(text) = table.get(tel_number)?.map(|guard| guard.value().to_owned()) else {
                return Err(RecordStoreError::NotFound {
                    tel_number: tel_number.to_string(),
                });
            };

            let mut record = decode_record(&text).map_err(|e| codec_error(tel_number, e))?;
            let matched = record.mark_checkout(entry_id, at);

            // Written back even when nothing matched.
            let text = encode_record(&record).map_err(|e| codec_error(tel_number, e))?;
            table.insert(tel_number, text.as_str())?;
            Ok(CheckoutOutcome { matched, record })
        })?;

        if !outcome.matched {
            tracing::warn!(
                table = %self.table_name,
                tel_number = %tel_number,
                entry_id = %entry_id,
                "no entry with this id; checkout time not set"
            );
        }
        self.observer
            .on_checkout(tel_number, &outcome.record, outcome.matched);
        Ok(outcome)
    }

    fn list_all(&self) -> Result<Vec<Record>, RecordStoreError> {
        let txn = self.db.begin_read()?;
        let table = match txn.open_table(self.table()) {
            Ok(table) => table,
            Err(TableError::TableDoesNotExist(_)) => return Err(self.missing_table()),
            Err(err) => return Err(err.into()),
        };

        let records = table
            .iter()?
            .map(|item| {
                let (key, value) = item?;
                decode_record(value.value()).map_err(|e| codec_error(key.value(), e))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    fn get(&self, tel_number: &str) -> Result<Option<Record>, RecordStoreError> {
        let txn = self.db.begin_read()?;
        let table = match txn.open_table(self.table()) {
            Ok(table) => table,
            Err(TableError::TableDoesNotExist(_)) => return Err(self.missing_table()),
            Err(err) => return Err(err.into()),
        };

        let guard = table.get(tel_number)?;
        let record = guard
            .map(|guard| decode_record(guard.value()))
            .transpose()
            .map_err(|e| codec_error(tel_number, e))?;
        Ok(record)
    }
}
