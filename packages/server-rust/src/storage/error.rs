//! Error type for [`RecordStore`](super::RecordStore) operations.

use guestdesk_core::CodecError;

/// Coarse classification surfaced to callers.
///
/// The store distinguishes only a missing record from everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The record an update targeted does not exist.
    NotFound,
    /// Codec failure, missing table, or any storage/transaction failure.
    Internal,
}

/// Errors returned by record store operations.
///
/// Every variant except [`NotFound`](Self::NotFound) is an internal error;
/// the enclosing transaction has been aborted and nothing was written.
#[derive(Debug, thiserror::Error)]
pub enum RecordStoreError {
    #[error("record not found: {tel_number}")]
    NotFound { tel_number: String },
    #[error("table not found: {table}")]
    MissingTable { table: String },
    #[error("corrupt or unencodable record for {tel_number}: {source}")]
    Codec {
        tel_number: String,
        #[source]
        source: CodecError,
    },
    #[error("storage error: {0}")]
    Storage(#[from] redb::Error),
}

impl RecordStoreError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::MissingTable { .. } | Self::Codec { .. } | Self::Storage(_) => {
                ErrorKind::Internal
            }
        }
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}

/// Lifts each `redb` error type into [`RecordStoreError::Storage`].
macro_rules! storage_error_from {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl From<$ty> for RecordStoreError {
                fn from(err: $ty) -> Self {
                    Self::Storage(err.into())
                }
            }
        )+
    };
}

storage_error_from!(
    redb::DatabaseError,
    redb::TransactionError,
    redb::TableError,
    redb::StorageError,
    redb::CommitError,
);
