//! Guestdesk Core: guest session records, their stored encoding, and the clock.

pub mod clock;
pub mod codec;
pub mod types;

pub use clock::{format_timestamp, parse_timestamp, ClockSource, ManualClock, SystemClock};
pub use codec::{decode_record, encode_record, CodecError};
pub use types::{Entry, EntryDraft, Record, Timestamp};
