//! Clock abstraction for time-dependent services
//!
//! Services that reason about token age take a `Clock` instead of calling
//! `Utc::now()` directly, so tests can simulate arbitrary elapsed time
//! without real delays.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Utc};

/// Source of the current time
pub trait Clock: Send + Sync {
    /// Current instant
    fn now(&self) -> DateTime<Utc>;

    /// Current instant as Unix seconds
    fn now_unix(&self) -> i64 {
        self.now().timestamp()
    }
}

/// Clock backed by the system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually driven clock for tests
///
/// Holds Unix seconds in an atomic so shared references can advance time
/// from any task.
#[derive(Debug, Default)]
pub struct ManualClock {
    now_unix: AtomicI64,
}

impl ManualClock {
    /// Create a clock frozen at the given Unix timestamp
    pub fn new(start_unix: i64) -> Self {
        Self {
            now_unix: AtomicI64::new(start_unix),
        }
    }

    /// Jump to an absolute Unix timestamp
    pub fn set(&self, unix: i64) {
        self.now_unix.store(unix, Ordering::SeqCst);
    }

    /// Move the clock forward (or backward, with a negative delta)
    pub fn advance_secs(&self, secs: i64) {
        self.now_unix.fetch_add(secs, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(self.now_unix.load(Ordering::SeqCst), 0)
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
    }
}
