//! Mutation observer trait and composite implementation.
//!
//! Defines [`MutationObserver`] for reacting to committed record mutations
//! within a [`RecordStore`](super::RecordStore), [`CompositeMutationObserver`]
//! which fans out notifications to multiple observers, and
//! [`TracingObserver`] which logs every mutation.

use std::sync::Arc;

use guestdesk_core::Record;

/// Observer for record mutations within a `RecordStore`.
///
/// Called only after the write transaction has committed, so observers never
/// see changes that were rolled back.
///
/// Used as `Arc<dyn MutationObserver>`.
pub trait MutationObserver: Send + Sync {
    /// Called after the first submission for a phone number created its record.
    fn on_create(&self, tel_number: &str, record: &Record);

    /// Called after `appended` entries were added to an existing record.
    fn on_append(&self, tel_number: &str, record: &Record, appended: usize);

    /// Called after a checkout call re-persisted a record.
    ///
    /// `matched` is `false` when no entry had the requested id and the record
    /// was written back unchanged.
    fn on_checkout(&self, tel_number: &str, record: &Record, matched: bool);
}

/// Composite observer that fans out to multiple observers.
#[derive(Default)]
pub struct CompositeMutationObserver {
    observers: Vec<Arc<dyn MutationObserver>>,
}

impl CompositeMutationObserver {
    /// Creates a composite observer with the given list of observers.
    #[must_use]
    pub fn new(observers: Vec<Arc<dyn MutationObserver>>) -> Self {
        Self { observers }
    }

    /// Adds an observer after construction.
    pub fn add(&mut self, observer: Arc<dyn MutationObserver>) {
        self.observers.push(observer);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl MutationObserver for CompositeMutationObserver {
    fn on_create(&self, tel_number: &str, record: &Record) {
        for observer in &self.observers {
            observer.on_create(tel_number, record);
        }
    }

    fn on_append(&self, tel_number: &str, record: &Record, appended: usize) {
        for observer in &self.observers {
            observer.on_append(tel_number, record, appended);
        }
    }

    fn on_checkout(&self, tel_number: &str, record: &Record, matched: bool) {
        for observer in &self.observers {
            observer.on_checkout(tel_number, record, matched);
        }
    }
}

/// Emits a `tracing` event for every committed mutation.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl MutationObserver for TracingObserver {
    fn on_create(&self, tel_number: &str, record: &Record) {
        tracing::debug!(
            tel_number = %tel_number,
            entries = record.entries.len(),
            check_in = %record.check_in_time,
            "record created"
        );
    }

    fn on_append(&self, tel_number: &str, record: &Record, appended: usize) {
        tracing::debug!(
            tel_number = %tel_number,
            appended,
            entries = record.entries.len(),
            "entries appended"
        );
    }

    fn on_checkout(&self, tel_number: &str, record: &Record, matched: bool) {
        tracing::debug!(
            tel_number = %tel_number,
            matched,
            checkout = ?record.check_out_time,
            "checkout recorded"
        );
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chrono::{TimeZone, Utc};
    use guestdesk_core::Entry;

    use super::*;

    /// Test observer that counts how many times each method is called.
    #[derive(Default)]
    #[allow(clippy::struct_field_names)]
    pub(crate) struct CountingObserver {
        pub create_count: AtomicUsize,
        pub append_count: AtomicUsize,
        pub appended_entries: AtomicUsize,
        pub checkout_count: AtomicUsize,
        pub unmatched_checkout_count: AtomicUsize,
    }

    impl MutationObserver for CountingObserver {
        fn on_create(&self, _: &str, _: &Record) {
            self.create_count.fetch_add(1, Ordering::Relaxed);
        }
        fn on_append(&self, _: &str, _: &Record, appended: usize) {
            self.append_count.fetch_add(1, Ordering::Relaxed);
            self.appended_entries.fetch_add(appended, Ordering::Relaxed);
        }
        fn on_checkout(&self, _: &str, _: &Record, matched: bool) {
            self.checkout_count.fetch_add(1, Ordering::Relaxed);
            if !matched {
                self.unmatched_checkout_count.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    fn record() -> Record {
        Record::new(
            "555-0100",
            vec![Entry::new("a1", "Wifi?", "Yes")],
            Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap(),
        )
    }

    #[test]
    fn composite_fans_out_to_all_observers() {
        let a = Arc::new(CountingObserver::default());
        let b = Arc::new(CountingObserver::default());
        let observers: Vec<Arc<dyn MutationObserver>> = vec![a.clone(), b.clone()];
        let composite = CompositeMutationObserver::new(observers);
        let r = record();

        composite.on_create("555-0100", &r);
        composite.on_append("555-0100", &r, 2);
        composite.on_checkout("555-0100", &r, false);

        for observer in [&a, &b] {
            assert_eq!(observer.create_count.load(Ordering::Relaxed), 1);
            assert_eq!(observer.append_count.load(Ordering::Relaxed), 1);
            assert_eq!(observer.appended_entries.load(Ordering::Relaxed), 2);
            assert_eq!(observer.checkout_count.load(Ordering::Relaxed), 1);
            assert_eq!(observer.unmatched_checkout_count.load(Ordering::Relaxed), 1);
        }
    }

    #[test]
    fn add_after_construction() {
        let mut composite = CompositeMutationObserver::default();
        assert!(composite.is_empty());

        let counter = Arc::new(CountingObserver::default());
        composite.add(counter.clone());
        composite.add(Arc::new(TracingObserver));
        assert_eq!(composite.len(), 2);

        composite.on_create("555-0100", &record());
        assert_eq!(counter.create_count.load(Ordering::Relaxed), 1);
    }
}
