//! Guest record storage.
//!
//! - [`RecordStore`]: the three session operations (plus single-key reads)
//!   over a transactional key-value table
//! - [`RedbRecordStore`]: the `redb` implementation
//! - [`RecordStoreFactory`]: opens the database and wires clock and observers
//!
//! Additionally defines [`MutationObserver`] for reacting to committed
//! mutations and [`CompositeMutationObserver`] for fan-out to multiple observers.

pub mod config;
pub mod error;
pub mod factory;
pub mod impls;
pub mod mutation_observer;
pub mod record_store;

pub use config::StorageConfig;
pub use error::{ErrorKind, RecordStoreError};
pub use factory::RecordStoreFactory;
pub use impls::{RedbRecordStore, DEFAULT_TABLE_NAME};
pub use mutation_observer::*;
pub use record_store::*;
