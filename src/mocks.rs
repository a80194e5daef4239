//! Test doubles for the store and clock seams.
//!
//! Available in test builds or with the `test-helpers` feature:
//!
//! ```toml
//! [dev-dependencies]
//! ratekey = { version = "*", features = ["test-helpers"] }
//! ```

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use futures::FutureExt;
use parking_lot::Mutex;

use crate::error::StoreError;
use crate::ratelimit::{Clock, CounterStore, IncrementFuture};

/// In-memory store that records every key it is asked to increment.
///
/// The call is recorded when `increment` is invoked, before the returned
/// future is polled, so tests can assert on dispatch without awaiting.
#[derive(Debug, Default)]
pub struct RecordingStore {
    calls: Mutex<Vec<String>>,
    counts: Mutex<HashMap<String, u64>>,
}

impl RecordingStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Keys passed to `increment`, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    /// Number of `increment` calls.
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Current value of a counter, if it has been incremented.
    pub fn count(&self, key: &str) -> Option<u64> {
        self.counts.lock().get(key).copied()
    }
}

impl CounterStore for RecordingStore {
    fn increment(&self, key: &str) -> IncrementFuture<'_> {
        let key = key.to_string();
        self.calls.lock().push(key.clone());

        async move {
            let count = {
                let mut counts = self.counts.lock();
                let count = counts.entry(key).or_insert(0);
                *count += 1;
                *count
            };
            Ok::<_, StoreError>(count)
        }
        .boxed()
    }
}

/// Store whose increments never complete.
#[derive(Debug, Default)]
pub struct PendingStore {
    calls: AtomicUsize,
}

impl PendingStore {
    /// Create a new pending store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `increment` calls.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl CounterStore for PendingStore {
    fn increment(&self, _key: &str) -> IncrementFuture<'_> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        futures::future::pending().boxed()
    }
}

/// Store whose increments always fail with the configured error.
#[derive(Debug)]
pub struct FailingStore {
    error: StoreError,
    calls: AtomicUsize,
}

impl FailingStore {
    /// Create a store that fails every increment with `error`.
    pub fn new(error: StoreError) -> Self {
        Self {
            error,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of `increment` calls.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl CounterStore for FailingStore {
    fn increment(&self, _key: &str) -> IncrementFuture<'_> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        futures::future::ready(Err(self.error.clone())).boxed()
    }
}

/// Mock clock for testing.
///
/// Allows tests to control time progression explicitly and counts how many
/// times the current instant was read. All clones share the same time and
/// read counter.
#[derive(Debug, Clone)]
pub struct MockClock {
    current_time: Arc<Mutex<DateTime<Utc>>>,
    reads: Arc<AtomicUsize>,
}

impl MockClock {
    /// Create a mock clock starting at a specific instant.
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            current_time: Arc::new(Mutex::new(start)),
            reads: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Advance the clock by a duration.
    pub fn advance(&self, duration: Duration) {
        let delta = chrono::Duration::from_std(duration)
            .expect("MockClock advance exceeds the representable range");
        *self.current_time.lock() += delta;
    }

    /// Set the clock to a specific instant.
    pub fn set(&self, instant: DateTime<Utc>) {
        *self.current_time.lock() = instant;
    }

    /// Number of times `now` has been called.
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

impl Clock for MockClock {
    fn now(&self) -> DateTime<Utc> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        *self.current_time.lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_mock_clock() {
        let start = Utc.with_ymd_and_hms(2024, 3, 10, 14, 0, 0).unwrap();
        let clock = MockClock::new(start);

        assert_eq!(clock.now(), start);

        clock.advance(Duration::from_secs(10));
        assert_eq!(clock.now(), start + chrono::Duration::seconds(10));

        let new_time = start + chrono::Duration::seconds(100);
        clock.set(new_time);
        assert_eq!(clock.now(), new_time);
        assert_eq!(clock.reads(), 3);
    }

    #[test]
    fn test_mock_clock_clones_share_time() {
        let start = Utc.with_ymd_and_hms(2024, 3, 10, 14, 0, 0).unwrap();
        let clock = MockClock::new(start);
        let clone = clock.clone();

        clone.advance(Duration::from_secs(5));
        assert_eq!(clock.now(), start + chrono::Duration::seconds(5));
    }

    #[tokio::test]
    async fn test_recording_store_counts_per_key() {
        let store = RecordingStore::new();

        assert_eq!(store.increment("a").await, Ok(1));
        assert_eq!(store.increment("a").await, Ok(2));
        assert_eq!(store.increment("b").await, Ok(1));

        assert_eq!(store.count("a"), Some(2));
        assert_eq!(store.count("c"), None);
        assert_eq!(store.calls(), vec!["a", "a", "b"]);
    }

    #[test]
    fn test_recording_store_records_before_poll() {
        let store = RecordingStore::new();
        let _pending = store.increment("a");

        assert_eq!(store.call_count(), 1);
        assert_eq!(store.count("a"), None);
    }

    #[tokio::test]
    async fn test_failing_store() {
        let store = FailingStore::new(StoreError::Unavailable("down".to_string()));

        assert_eq!(
            store.increment("a").await,
            Err(StoreError::Unavailable("down".to_string()))
        );
        assert_eq!(store.call_count(), 1);
    }
}
