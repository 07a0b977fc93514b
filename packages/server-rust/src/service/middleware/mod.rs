//! Tower middleware layers for the operation pipeline.
//!
//! - [`metrics`]: Operation timing and outcome via `tracing` spans and `metrics`
//! - [`load_shed`]: Semaphore-based concurrency limiting
//! - [`pipeline`]: Composes all layers in front of the record service

pub mod load_shed;
pub mod metrics;
pub mod pipeline;

pub use self::load_shed::LoadShedLayer;
pub use self::metrics::MetricsLayer;
pub use self::pipeline::build_operation_pipeline;
