//! `RecordStore` implementations.
//!
//! Provides concrete implementations of the
//! [`RecordStore`](super::RecordStore) trait.

mod redb_record_store;

pub use redb_record_store::RedbRecordStore;
pub use redb_record_store::DEFAULT_TABLE_NAME;
