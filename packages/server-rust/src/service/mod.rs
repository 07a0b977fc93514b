//! Operation pipeline in front of the record store.
//!
//! 1. **Operations** (`operation`): typed requests, responses and errors
//! 2. **Middleware** (`middleware`): Tower layers (metrics, load-shedding)
//! 3. **Domain service** (`record_service`): executes operations on the store

pub mod config;
pub mod middleware;
pub mod operation;
pub mod record_service;

// Re-export key types for convenient access.
pub use config::{ConfigError, ServerConfig};
pub use middleware::build_operation_pipeline;
pub use operation::{
    operation_names, Operation, OperationContext, OperationError, OperationFuture,
    OperationResponse,
};
pub use record_service::RecordService;
