//! Guest session data model.
//!
//! A [`Record`] is everything stored for one phone number: the ordered list of
//! question/answer [`Entry`] values submitted so far, plus check-in and
//! check-out instants. One canonical type is shared by every store operation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// UTC instant used for check-in and check-out times.
///
/// Serializes as an RFC 3339 string (e.g. `"2024-05-01T09:30:00Z"`).
pub type Timestamp = DateTime<Utc>;

/// One question/answer pair with a unique identifier.
///
/// Immutable once created: records only ever gain entries, they never edit them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entry {
    /// Opaque unique identifier. Serialized as `uuid`.
    #[serde(rename = "uuid")]
    pub id: String,
    /// The question asked of the guest.
    pub question: String,
    /// The guest's answer.
    pub answer: String,
}

impl Entry {
    /// Creates an entry with a caller-assigned id.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        question: impl Into<String>,
        answer: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// A submitted question/answer pair that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryDraft {
    pub question: String,
    pub answer: String,
}

impl EntryDraft {
    #[must_use]
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }

    /// Assigns a fresh random (v4) UUID and returns the finished [`Entry`].
    #[must_use]
    pub fn into_entry(self) -> Entry {
        Entry {
            id: Uuid::new_v4().to_string(),
            question: self.question,
            answer: self.answer,
        }
    }
}

/// The persisted unit for one phone number.
///
/// Invariants maintained by the store:
/// - `entries` is append-only and keeps insertion order
/// - `check_in_time` is set once, when the record is created
/// - `check_out_time` is absent until a checkout is recorded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Phone number; also the record's key in the store.
    pub tel_number: String,
    /// Q&A entries in submission order. Serialized as `questions`.
    #[serde(rename = "questions")]
    pub entries: Vec<Entry>,
    /// When the first submission for this phone number arrived.
    #[serde(rename = "check_in")]
    pub check_in_time: Timestamp,
    /// Record-level checkout instant. Serialized as `checkout`, omitted when absent.
    #[serde(
        rename = "checkout",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub check_out_time: Option<Timestamp>,
}

impl Record {
    /// Creates a fresh record with no checkout time.
    #[must_use]
    pub fn new(tel_number: impl Into<String>, entries: Vec<Entry>, check_in_time: Timestamp) -> Self {
        Self {
            tel_number: tel_number.into(),
            entries,
            check_in_time,
            check_out_time: None,
        }
    }

    /// Appends entries to the end of the session, preserving their order.
    ///
    /// Check-in and check-out times are left untouched.
    pub fn append(&mut self, entries: impl IntoIterator<Item = Entry>) {
        self.entries.extend(entries);
    }

    /// Sets the record-level checkout time if any entry has id `entry_id`.
    ///
    /// Scanning stops at the first matching entry. Returns whether an entry
    /// matched; when none does the record is left exactly as it was.
    pub fn mark_checkout(&mut self, entry_id: &str, at: Timestamp) -> bool {
        if self.find_entry(entry_id).is_some() {
            self.check_out_time = Some(at);
            true
        } else {
            false
        }
    }

    /// Returns the first entry with the given id.
    #[must_use]
    pub fn find_entry(&self, entry_id: &str) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.id == entry_id)
    }

    /// Whether a checkout has been recorded for this session.
    #[must_use]
    pub fn is_checked_out(&self) -> bool {
        self.check_out_time.is_some()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn at(secs: i64) -> Timestamp {
        Utc.timestamp_opt(secs, 0).single().expect("valid timestamp")
    }

    fn sample() -> Record {
        Record::new(
            "555-0100",
            vec![Entry::new("a1", "Wifi?", "Yes")],
            at(1_700_000_000),
        )
    }

    #[test]
    fn new_record_has_no_checkout() {
        let record = sample();
        assert!(!record.is_checked_out());
        assert_eq!(record.entries.len(), 1);
    }

    #[test]
    fn append_preserves_order_and_check_in() {
        let mut record = sample();
        record.append(vec![
            Entry::new("a2", "Pool hours?", "9-9"),
            Entry::new("a3", "Breakfast?", "7-10"),
        ]);

        let ids: Vec<&str> = record.entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["a1", "a2", "a3"]);
        assert_eq!(record.check_in_time, at(1_700_000_000));
    }

    #[test]
    fn mark_checkout_sets_record_level_time() {
        let mut record = sample();
        assert!(record.mark_checkout("a1", at(1_700_000_100)));
        assert_eq!(record.check_out_time, Some(at(1_700_000_100)));

        // A second checkout overwrites the first.
        assert!(record.mark_checkout("a1", at(1_700_000_200)));
        assert_eq!(record.check_out_time, Some(at(1_700_000_200)));
    }

    #[test]
    fn mark_checkout_with_unknown_id_leaves_record_unchanged() {
        let mut record = sample();
        let before = record.clone();
        assert!(!record.mark_checkout("missing", at(1_700_000_100)));
        assert_eq!(record, before);
    }

    #[test]
    fn mark_checkout_matches_duplicate_ids_once() {
        let mut record = sample();
        record.append(vec![Entry::new("a1", "Late checkout?", "Noon")]);
        assert!(record.mark_checkout("a1", at(1_700_000_300)));
        assert_eq!(record.find_entry("a1").map(|e| e.question.as_str()), Some("Wifi?"));
    }

    #[test]
    fn draft_gets_unique_ids() {
        let a = EntryDraft::new("Q", "A").into_entry();
        let b = EntryDraft::new("Q", "A").into_entry();
        assert_ne!(a.id, b.id);
        assert_eq!(a.question, "Q");
        assert_eq!(a.answer, "A");
    }

    #[test]
    fn entry_serializes_id_as_uuid() {
        let json = serde_json::to_value(Entry::new("a1", "Q", "A")).expect("serialize");
        assert_eq!(json["uuid"], "a1");
        assert!(json.get("id").is_none());
    }
}
