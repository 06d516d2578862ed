use std::time::{SystemTime, UNIX_EPOCH};

use crate::{TimeSource, UNIX_EPOCH_MS};

/// A wall-clock time source offset from a user-defined epoch.
///
/// Reads `SystemTime::now()` on every call. The wall clock may jump backward
/// (NTP corrections, manual adjustments); generators fed by this clock detect
/// that and wait rather than emit an earlier timestamp.
///
/// Times before the epoch saturate to `0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SystemClock {
    epoch_ms: u64,
}

impl Default for SystemClock {
    /// Constructs a clock counting from the Unix epoch.
    fn default() -> Self {
        Self::with_epoch(UNIX_EPOCH_MS)
    }
}

impl SystemClock {
    /// Constructs a clock using `epoch_ms` (milliseconds since 1970-01-01 UTC)
    /// as its origin.
    ///
    /// # Example
    ///
    /// ```
    /// use sortid::{SystemClock, TimeSource, TWITTER_EPOCH_MS};
    ///
    /// let unix = SystemClock::default();
    /// let twitter = SystemClock::with_epoch(TWITTER_EPOCH_MS);
    /// assert!(unix.current_millis() > twitter.current_millis());
    /// ```
    pub const fn with_epoch(epoch_ms: u64) -> Self {
        Self { epoch_ms }
    }

    /// The origin of this clock in Unix milliseconds.
    pub const fn epoch_ms(&self) -> u64 {
        self.epoch_ms
    }

    /// Milliseconds since the Unix epoch, or `0` if the system clock is set
    /// before 1970.
    pub fn unix_millis() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
    }
}

impl TimeSource for SystemClock {
    fn current_millis(&self) -> u64 {
        Self::unix_millis().saturating_sub(self.epoch_ms)
    }
}
