//! Pipeline composition: the record service behind all middleware layers.

use std::sync::Arc;

use tower::{Service, ServiceBuilder};

use super::load_shed::LoadShedLayer;
use super::metrics::MetricsLayer;
use crate::service::config::ServerConfig;
use crate::service::operation::{Operation, OperationError, OperationFuture, OperationResponse};
use crate::service::record_service::RecordService;
use crate::storage::RecordStore;

/// Build the operation pipeline in front of `store`.
///
/// Layer order (outermost to innermost):
/// 1. `LoadShedLayer` -- reject when too many operations are in flight
/// 2. `MetricsLayer` -- record timing and outcome
/// 3. `RecordService` -- run the operation on the blocking pool
///
/// The returned service is cheap to clone; clones share the load-shed permits.
#[must_use]
pub fn build_operation_pipeline(
    store: Arc<dyn RecordStore>,
    config: &ServerConfig,
) -> impl Service<
    Operation,
    Response = OperationResponse,
    Error = OperationError,
    Future = OperationFuture,
> + Clone
       + Send {
    ServiceBuilder::new()
        .layer(LoadShedLayer::new(config.max_concurrent_operations))
        .layer(MetricsLayer)
        .service(RecordService::new(store))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
