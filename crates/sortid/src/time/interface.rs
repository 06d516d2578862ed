use std::sync::Arc;

/// Unix epoch: Thursday, January 1, 1970 00:00:00 UTC
pub const UNIX_EPOCH_MS: u64 = 0;

/// Twitter epoch: Thursday, November 4, 2010 1:42:54.657 UTC
pub const TWITTER_EPOCH_MS: u64 = 1_288_834_974_657;

/// Custom epoch: Wednesday, January 1, 2025 00:00:00 UTC
pub const CUSTOM_EPOCH_MS: u64 = 1_735_689_600_000;

/// KSUID epoch in Unix **seconds**: Tuesday, May 13, 2014 16:53:20 UTC
pub const KSUID_EPOCH_SECS: u64 = 1_400_000_000;

/// A trait for time sources that return a millisecond timestamp.
///
/// This abstraction allows you to plug in the system clock or a mocked time
/// source in tests. Generators never assume the source is monotonic: backward
/// jumps are detected and absorbed by the generators themselves.
///
/// # Example
///
/// ```
/// use sortid::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn current_millis(&self) -> u64 {
///         1234
///     }
/// }
///
/// let time = FixedTime;
/// assert_eq!(time.current_millis(), 1234);
/// ```
pub trait TimeSource {
    /// Returns the current time in milliseconds since the source's epoch.
    fn current_millis(&self) -> u64;
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn current_millis(&self) -> u64 {
        (**self).current_millis()
    }
}

impl<T: TimeSource + ?Sized> TimeSource for Arc<T> {
    fn current_millis(&self) -> u64 {
        (**self).current_millis()
    }
}
