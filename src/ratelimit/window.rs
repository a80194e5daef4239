//! Time windows used to bucket counts.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::clock::Clock;

/// Granularity of a counting window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeWindow {
    /// Per-second windows
    Second,
    /// Per-minute windows
    Minute,
    /// Per-hour windows
    #[default]
    Hour,
    /// Per-day windows
    Day,
}

/// Identifier of one discrete window: whole windows elapsed since the Unix
/// epoch, UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WindowIndex(i64);

impl WindowIndex {
    /// Wrap a raw window number.
    pub fn new(index: i64) -> Self {
        Self(index)
    }

    /// The raw window number.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for WindowIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TimeWindow {
    /// Get the duration of this time window.
    pub fn duration(&self) -> Duration {
        Duration::from_secs(self.seconds() as u64)
    }

    fn seconds(&self) -> i64 {
        match self {
            TimeWindow::Second => 1,
            TimeWindow::Minute => 60,
            TimeWindow::Hour => 3600,
            TimeWindow::Day => 86400,
        }
    }

    /// The window containing `instant`.
    pub fn index_at(&self, instant: DateTime<Utc>) -> WindowIndex {
        WindowIndex(instant.timestamp().div_euclid(self.seconds()))
    }

    /// The window containing the clock's current instant.
    ///
    /// Reads the clock exactly once.
    pub fn current<C: Clock + ?Sized>(&self, clock: &C) -> WindowIndex {
        self.index_at(clock.now())
    }

    /// Time left until the window containing `instant` closes.
    pub fn reset_after(&self, instant: DateTime<Utc>) -> Duration {
        let end_secs = (self.index_at(instant).0 + 1).saturating_mul(self.seconds());
        DateTime::<Utc>::from_timestamp(end_secs, 0)
            .and_then(|end| (end - instant).to_std().ok())
            .unwrap_or(Duration::ZERO)
    }
}
