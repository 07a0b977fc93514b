//! Textual encoding of [`Record`] values for persistence.
//!
//! Records are stored as compact JSON objects:
//!
//! ```json
//! {"tel_number":"555-0100","questions":[{"uuid":"a1","question":"Wifi?","answer":"Yes"}],
//!  "check_in":"2024-05-01T09:30:00Z","checkout":"2024-05-02T11:00:00Z"}
//! ```
//!
//! The `checkout` field is omitted until a checkout has been recorded.

use crate::types::Record;

/// Failure to convert a [`Record`] to or from its stored text.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("failed to encode record: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("failed to decode record: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Encodes a record into its stored JSON text.
///
/// # Errors
///
/// Returns [`CodecError::Encode`] if serialization fails.
pub fn encode_record(record: &Record) -> Result<String, CodecError> {
    serde_json::to_string(record).map_err(CodecError::Encode)
}

/// Decodes a record from its stored JSON text.
///
/// # Errors
///
/// Returns [`CodecError::Decode`] if `text` is not a valid encoded record.
pub fn decode_record(text: &str) -> Result<Record, CodecError> {
    serde_json::from_str(text).map_err(CodecError::Decode)
}
