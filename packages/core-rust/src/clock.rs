//! Wall-clock abstraction for check-in and check-out instants.
//!
//! The record store reads "now" through [`ClockSource`] so tests can pin or
//! step time. [`SystemClock`] is the production source.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, SecondsFormat, Utc};

use crate::types::Timestamp;

/// Abstraction over the system clock for dependency injection.
pub trait ClockSource: Send + Sync {
    /// Returns the current UTC instant.
    fn now(&self) -> Timestamp;
}

/// Default clock source that reads the real system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl ClockSource for SystemClock {
    fn now(&self) -> Timestamp {
        Utc::now()
    }
}

/// Manually driven clock with millisecond resolution.
///
/// Starts at a fixed instant and only moves when [`advance`](Self::advance)
/// or [`set`](Self::set) is called.
#[derive(Debug)]
pub struct ManualClock {
    millis: AtomicI64,
}

impl ManualClock {
    #[must_use]
    pub fn new(start: Timestamp) -> Self {
        Self {
            millis: AtomicI64::new(start.timestamp_millis()),
        }
    }

    pub fn set(&self, at: Timestamp) {
        self.millis.store(at.timestamp_millis(), Ordering::SeqCst);
    }

    pub fn advance(&self, by: chrono::Duration) {
        self.millis.fetch_add(by.num_milliseconds(), Ordering::SeqCst);
    }
}

impl ClockSource for ManualClock {
    fn now(&self) -> Timestamp {
        DateTime::from_timestamp_millis(self.millis.load(Ordering::SeqCst)).unwrap_or_default()
    }
}

/// Parses an ISO-8601 / RFC 3339 instant (any offset) into UTC.
///
/// # Errors
///
/// Returns the `chrono` parse error for malformed input.
pub fn parse_timestamp(text: &str) -> Result<Timestamp, chrono::ParseError> {
    DateTime::parse_from_rfc3339(text).map(|dt| dt.with_timezone(&Utc))
}

/// Formats an instant as RFC 3339 with second precision and a `Z` suffix.
#[must_use]
pub fn format_timestamp(at: &Timestamp) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}
