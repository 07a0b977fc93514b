//! The domain service: executes operations against a [`RecordStore`].
//!
//! [`RecordService`] is the innermost `tower::Service<Operation>` in the
//! pipeline. Store calls block on disk I/O, so each one runs on tokio's
//! blocking pool.

use std::sync::Arc;
use std::task::{Context, Poll};

use tower::Service;

use crate::service::operation::{Operation, OperationError, OperationFuture, OperationResponse};
use crate::storage::RecordStore;

/// Tower service that executes operations against a shared [`RecordStore`].
#[derive(Clone)]
pub struct RecordService {
    store: Arc<dyn RecordStore>,
}

impl RecordService {
    #[must_use]
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }
}

/// Runs one operation synchronously on the calling thread.
///
/// # Errors
///
/// Returns [`OperationError::NotFound`] for a checkout against an unknown
/// phone number and [`OperationError::Internal`] for any storage failure.
pub fn execute(store: &dyn RecordStore, op: Operation) -> Result<OperationResponse, OperationError> {
    match op {
        Operation::AppendOrCreate {
            tel_number,
            entries,
            ..
        } => {
            let record = store.append_or_create(&tel_number, entries)?;
            Ok(OperationResponse::Stored(record))
        }
        Operation::MarkCheckout {
            tel_number,
            entry_id,
            timestamp,
            ..
        } => {
            let outcome = store.mark_checkout(&tel_number, &entry_id, timestamp)?;
            Ok(OperationResponse::CheckedOut {
                checkout: outcome.record.check_out_time,
                matched: outcome.matched,
            })
        }
        Operation::ListAll { .. } => Ok(OperationResponse::Records(store.list_all()?)),
        Operation::Get { tel_number, .. } => Ok(OperationResponse::Record(store.get(&tel_number)?)),
    }
}

impl Service<Operation> for RecordService {
    type Response = OperationResponse;
    type Error = OperationError;
    type Future = OperationFuture;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, op: Operation) -> Self::Future {
        let store = Arc::clone(&self.store);
        Box::pin(async move {
            match tokio::task::spawn_blocking(move || execute(store.as_ref(), op)).await {
                Ok(result) => result,
                Err(join_err) => Err(OperationError::Internal(
                    anyhow::Error::new(join_err).context("record store task failed"),
                )),
            }
        })
    }
}
