//! Mock clock for testing.

use crate::application::ports::Clock;
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::sync::{Arc, Mutex};

/// Mock clock for testing.
///
/// Allows tests to pin the emission timestamp, enabling exact assertions on
/// plain-mode output.
///
/// # Examples
///
/// ```
/// use depwarn::infrastructure::mocks::MockClock;
/// use depwarn::application::ports::Clock;
/// use chrono::{TimeZone, Utc};
///
/// let clock = MockClock::at(Utc.with_ymd_and_hms(2014, 7, 1, 14, 22, 28).unwrap());
/// assert_eq!(clock.now_utc().to_rfc2822(), "Tue, 1 Jul 2014 14:22:28 +0000");
/// ```
///
/// # Thread Safety
///
/// `MockClock` is thread-safe and can be cloned to share across threads.
/// All clones share the same underlying time value.
#[derive(Debug, Clone)]
pub struct MockClock {
    current_time: Arc<Mutex<DateTime<Utc>>>,
}

impl MockClock {
    /// Create a mock clock pinned to a specific time.
    pub fn at(time: DateTime<Utc>) -> Self {
        Self {
            current_time: Arc::new(Mutex::new(time)),
        }
    }

    /// Create a mock clock pinned to the Unix epoch.
    pub fn epoch() -> Self {
        Self::at(Utc.timestamp_opt(0, 0).single().unwrap_or_default())
    }

    /// Advance the clock by a duration.
    pub fn advance(&self, duration: Duration) {
        let mut time = self
            .current_time
            .lock()
            .expect("MockClock mutex poisoned - a test thread panicked while holding the lock");
        *time += duration;
    }

    /// Set the clock to a specific time.
    pub fn set(&self, time: DateTime<Utc>) {
        let mut current = self
            .current_time
            .lock()
            .expect("MockClock mutex poisoned - a test thread panicked while holding the lock");
        *current = time;
    }
}

impl Clock for MockClock {
    fn now_utc(&self) -> DateTime<Utc> {
        *self
            .current_time
            .lock()
            .expect("MockClock mutex poisoned - a test thread panicked while holding the lock")
    }
}
