//! Metrics middleware for operations.
//!
//! Wraps each operation in a `tracing` span carrying its duration and outcome,
//! and records `guestdesk_operations_total` / `guestdesk_operation_duration_seconds`
//! through the `metrics` facade. Without an installed recorder the metric calls
//! are no-ops.

use std::task::{Context, Poll};
use std::time::Instant;

use tower::{Layer, Service};
use tracing::{info_span, Instrument};

use crate::service::operation::{Operation, OperationError, OperationFuture, OperationResponse};

// ---------------------------------------------------------------------------
// MetricsLayer
// ---------------------------------------------------------------------------

/// Tower layer that instruments operations with timing and outcome.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsLayer;

impl<S> Layer<S> for MetricsLayer {
    type Service = MetricsService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MetricsService { inner }
    }
}

// ---------------------------------------------------------------------------
// MetricsService
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct MetricsService<S> {
    inner: S,
}

impl<S> Service<Operation> for MetricsService<S>
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
        let operation = op.name();
        let call_id = op.ctx().call_id;

        let span = info_span!(
            "operation",
            operation,
            call_id,
            duration_ms = tracing::field::Empty,
            outcome = tracing::field::Empty,
        );

        let fut = self.inner.call(op);

        Box::pin(
            async move {
                let start = Instant::now();
                let result = fut.await;
                let elapsed = start.elapsed();

                let outcome = match &result {
                    Ok(_) => "ok",
                    Err(err) => err.outcome(),
                };

                #[allow(clippy::cast_possible_truncation)]
                let duration_ms = elapsed.as_millis() as u64;
                let span = tracing::Span::current();
                span.record("duration_ms", duration_ms);
                span.record("outcome", outcome);

                ::metrics::counter!(
                    "guestdesk_operations_total",
                    "operation" => operation,
                    "outcome" => outcome
                )
                .increment(1);
                ::metrics::histogram!("guestdesk_operation_duration_seconds", "operation" => operation)
                    .record(elapsed.as_secs_f64());

                match &result {
                    Err(OperationError::Internal(err)) => {
                        tracing::error!(operation, call_id, duration_ms, error = %err, "operation failed");
                    }
                    _ => {
                        tracing::debug!(operation, call_id, duration_ms, outcome, "operation complete");
                    }
                }

                result
            }
            .instrument(span),
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
