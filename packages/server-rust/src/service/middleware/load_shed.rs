//! Load-shedding middleware for operations.
//!
//! Caps the number of operations in flight. Once the cap is reached, new
//! operations fail fast with `OperationError::Overloaded` instead of queueing
//! behind the store's single writer.

use std::sync::Arc;
use std::task::{Context, Poll};

use tokio::sync::Semaphore;
use tower::{Layer, Service};

use crate::service::operation::{Operation, OperationError, OperationFuture, OperationResponse};

// ---------------------------------------------------------------------------
// LoadShedLayer
// ---------------------------------------------------------------------------

/// Tower layer that limits concurrent operations via a shared semaphore.
///
/// Every service produced by one layer (and every clone of it) draws from
/// the same pool of permits.
#[derive(Debug, Clone)]
pub struct LoadShedLayer {
    permits: Arc<Semaphore>,
}

impl LoadShedLayer {
    #[must_use]
    pub fn new(max_in_flight: u32) -> Self {
        Self {
            permits: Arc::new(Semaphore::new(max_in_flight as usize)),
        }
    }

    /// Permits currently free.
    #[must_use]
    pub fn available(&self) -> usize {
        self.permits.available_permits()
    }
}

impl<S> Layer<S> for LoadShedLayer {
    type Service = LoadShedService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        LoadShedService {
            inner,
            permits: Arc::clone(&self.permits),
        }
    }
}

// ---------------------------------------------------------------------------
// LoadShedService
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct LoadShedService<S> {
    inner: S,
    permits: Arc<Semaphore>,
}

impl<S> Service<Operation> for LoadShedService<S>
where
    S: Service<Operation, Response = OperationResponse, Error = OperationError> + Send,
    S::Future: Send + 'static,
{
    type Response = OperationResponse;
    type Error = OperationError;
    type Future = OperationFuture;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, op: Operation) -> Self::Future {
        let Ok(permit) = Arc::clone(&self.permits).try_acquire_owned() else {
            tracing::warn!(operation = op.name(), call_id = op.ctx().call_id, "shedding operation");
            return Box::pin(async { Err(OperationError::Overloaded) });
        };

        let fut = self.inner.call(op);
        Box::pin(async move {
            let result = fut.await;
            drop(permit);
            result
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
