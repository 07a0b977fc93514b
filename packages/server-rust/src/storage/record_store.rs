//! Guest record store trait.
//!
//! Defines [`RecordStore`], the interface the operation pipeline talks to.
//! Each method runs inside exactly one storage transaction: it either commits
//! as a whole or aborts with nothing written.

use guestdesk_core::{Entry, Record, Timestamp};

use super::error::RecordStoreError;

/// Result of a [`RecordStore::mark_checkout`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutOutcome {
    /// Whether an entry with the requested id exists in the record.
    ///
    /// `false` is not an error: the record is re-persisted unchanged and
    /// the call still succeeds.
    pub matched: bool,
    /// The record as persisted by this call.
    pub record: Record,
}

/// Per-phone-number session store.
///
/// Used as `Arc<dyn RecordStore>`. All methods are synchronous and may block
/// on disk I/O; async callers should run them on a blocking pool.
pub trait RecordStore: Send + Sync {
    /// Name of the table backing this store.
    fn table_name(&self) -> &str;

    /// Creates the backing table if it does not exist yet. Idempotent.
    fn initialize(&self) -> Result<(), RecordStoreError>;

    /// Appends `entries` to the record for `tel_number`, creating the record
    /// (check-in now, no checkout) if it does not exist.
    ///
    /// Existing check-in and check-out times are never modified. Returns the
    /// record as persisted.
    fn append_or_create(
        &self,
        tel_number: &str,
        entries: Vec<Entry>,
    ) -> Result<Record, RecordStoreError>;

    /// Sets the record-level checkout time to `at` if the record contains an
    /// entry with id `entry_id`.
    ///
    /// Fails with [`RecordStoreError::NotFound`] if there is no record for
    /// `tel_number`. An unknown `entry_id` is reported through
    /// [`CheckoutOutcome::matched`], not as an error.
    fn mark_checkout(
        &self,
        tel_number: &str,
        entry_id: &str,
        at: Timestamp,
    ) -> Result<CheckoutOutcome, RecordStoreError>;

    /// Returns every record in key order (lexicographic over the phone number
    /// bytes), read from one consistent snapshot.
    ///
    /// All-or-nothing: a single undecodable value fails the whole call.
    fn list_all(&self) -> Result<Vec<Record>, RecordStoreError>;

    /// Reads a single record.
    fn get(&self, tel_number: &str) -> Result<Option<Record>, RecordStoreError>;
}
