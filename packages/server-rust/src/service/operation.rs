//! Operation types carried through the service pipeline.
//!
//! A transport turns each incoming request into an [`Operation`], sends it
//! through the pipeline, and maps the [`OperationResponse`] or
//! [`OperationError`] back onto its own protocol.

use std::future::Future;
use std::pin::Pin;

use chrono::{SubsecRound, Utc};
use guestdesk_core::{parse_timestamp, Entry, EntryDraft, Record, Timestamp};

use crate::storage::RecordStoreError;

/// Stable operation names, used as span fields and metric labels.
pub mod operation_names {
    pub const APPEND_OR_CREATE: &str = "append_or_create";
    pub const MARK_CHECKOUT: &str = "mark_checkout";
    pub const LIST_ALL: &str = "list_all";
    pub const GET: &str = "get";
}

/// Boxed future returned by every service in the pipeline.
pub type OperationFuture =
    Pin<Box<dyn Future<Output = Result<OperationResponse, OperationError>> + Send>>;

/// Context carried with every operation through the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationContext {
    /// Caller-assigned id used to correlate logs for one request.
    pub call_id: u64,
}

impl OperationContext {
    #[must_use]
    pub fn new(call_id: u64) -> Self {
        Self { call_id }
    }
}

/// One call into the record store.
#[derive(Debug)]
pub enum Operation {
    /// Append entries to a phone number's session, creating it if needed.
    AppendOrCreate {
        ctx: OperationContext,
        tel_number: String,
        entries: Vec<Entry>,
    },
    /// Record a checkout time for the session containing `entry_id`.
    MarkCheckout {
        ctx: OperationContext,
        tel_number: String,
        entry_id: String,
        timestamp: Timestamp,
    },
    /// Read every session.
    ListAll { ctx: OperationContext },
    /// Read one session.
    Get {
        ctx: OperationContext,
        tel_number: String,
    },
}

impl Operation {
    /// Builds an `AppendOrCreate` from id-less submissions, assigning each a fresh id.
    #[must_use]
    pub fn submit(ctx: OperationContext, tel_number: impl Into<String>, drafts: Vec<EntryDraft>) -> Self {
        Self::AppendOrCreate {
            ctx,
            tel_number: tel_number.into(),
            entries: drafts.into_iter().map(EntryDraft::into_entry).collect(),
        }
    }

    /// Builds a `MarkCheckout` from an ISO-8601 timestamp string.
    ///
    /// # Errors
    ///
    /// Returns the parse error if `timestamp` is not an RFC 3339 instant.
    pub fn mark_checkout(
        ctx: OperationContext,
        tel_number: impl Into<String>,
        entry_id: impl Into<String>,
        timestamp: &str,
    ) -> Result<Self, chrono::ParseError> {
        Ok(Self::MarkCheckout {
            ctx,
            tel_number: tel_number.into(),
            entry_id: entry_id.into(),
            timestamp: parse_timestamp(timestamp)?,
        })
    }

    /// Builds a `MarkCheckout` stamped with the current time at second precision.
    #[must_use]
    pub fn mark_checkout_now(
        ctx: OperationContext,
        tel_number: impl Into<String>,
        entry_id: impl Into<String>,
    ) -> Self {
        Self::MarkCheckout {
            ctx,
            tel_number: tel_number.into(),
            entry_id: entry_id.into(),
            timestamp: Utc::now().trunc_subsecs(0),
        }
    }

    #[must_use]
    pub fn ctx(&self) -> &OperationContext {
        match self {
            Self::AppendOrCreate { ctx, .. }
            | Self::MarkCheckout { ctx, .. }
            | Self::ListAll { ctx }
            | Self::Get { ctx, .. } => ctx,
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::AppendOrCreate { .. } => operation_names::APPEND_OR_CREATE,
            Self::MarkCheckout { .. } => operation_names::MARK_CHECKOUT,
            Self::ListAll { .. } => operation_names::LIST_ALL,
            Self::Get { .. } => operation_names::GET,
        }
    }
}

/// Successful response from the record service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationResponse {
    /// The session as persisted by an `AppendOrCreate`.
    Stored(Record),
    /// Result of a `MarkCheckout`.
    CheckedOut {
        /// The session's checkout time after the call.
        checkout: Option<Timestamp>,
        /// Whether the entry id was found in the session.
        matched: bool,
    },
    /// Every session, in phone-number order.
    Records(Vec<Record>),
    /// A single session, if present.
    Record(Option<Record>),
}

/// Errors returned by the pipeline.
#[derive(Debug, thiserror::Error)]
pub enum OperationError {
    #[error("record not found: {tel_number}")]
    NotFound { tel_number: String },
    #[error("server overloaded, try again later")]
    Overloaded,
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl OperationError {
    /// Short label for logs and metrics.
    #[must_use]
    pub fn outcome(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::Overloaded => "overloaded",
            Self::Internal(_) => "error",
        }
    }
}

impl From<RecordStoreError> for OperationError {
    fn from(err: RecordStoreError) -> Self {
        match err {
            RecordStoreError::NotFound { tel_number } => Self::NotFound { tel_number },
            other => Self::Internal(anyhow::Error::new(other)),
        }
    }
}
