//! Guestdesk Server: `redb`-backed guest record store and the operation
//! pipeline a transport calls into.

pub mod service;
pub mod storage;
pub mod telemetry;

pub use service::{build_operation_pipeline, Operation, OperationError, OperationResponse, ServerConfig};
pub use storage::{RecordStore, RecordStoreError, RecordStoreFactory, RedbRecordStore, StorageConfig};
pub use telemetry::{init_tracing, LogFormat};
