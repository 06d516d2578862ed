use core::time::Duration;

/// Backoff strategies for waiting on the clock.
///
/// A generator waits when the clock moved backward or when every sequence
/// value of the current millisecond is used. Each wait receives the
/// recommended delay in milliseconds.
#[derive(Debug, Clone, Copy)]
pub enum Backoff {
    /// Busy-waits in a tight loop.
    ///
    /// Offers maximum throughput at the cost of high CPU usage.
    Spin,

    /// Yields to the OS scheduler to allow other threads to run.
    ///
    /// More CPU-friendly than spinning, but may still busy-wait if no other
    /// threads are ready.
    Yield,

    /// Sleeps for the requested retry delay in milliseconds.
    ///
    /// Lowest CPU usage, but may oversleep depending on platform-specific
    /// scheduler resolution.
    Sleep,

    /// Calls the given function with the requested delay. Tests use this to
    /// advance a fake clock instead of sleeping.
    With(fn(u64)),
}

impl Backoff {
    /// Waits once according to the strategy.
    pub fn wait(&self, yield_for: u64) {
        match self {
            Self::Spin => core::hint::spin_loop(),
            Self::Yield => std::thread::yield_now(),
            Self::Sleep => std::thread::sleep(Duration::from_millis(yield_for)),
            Self::With(f) => f(yield_for),
        }
    }
}

/// How a blocking generator waits for the clock, and for how long.
///
/// By default waits are unbounded: a generator blocks until the clock
/// advances, however long a backward jump takes to recover. Setting
/// `max_retries` caps the number of waits, after which generation fails with
/// [`Error::ClockStalled`](crate::Error::ClockStalled). A bounded policy
/// trades the blocking guarantee for a latency ceiling.
#[derive(Debug, Clone, Copy)]
pub struct WaitPolicy {
    pub backoff: Backoff,
    pub max_retries: Option<u32>,
}

impl Default for WaitPolicy {
    fn default() -> Self {
        Self::unbounded(Backoff::Sleep)
    }
}

impl WaitPolicy {
    /// Waits forever using `backoff`.
    #[must_use]
    pub const fn unbounded(backoff: Backoff) -> Self {
        Self {
            backoff,
            max_retries: None,
        }
    }

    /// Gives up after `max_retries` waits.
    #[must_use]
    pub const fn bounded(backoff: Backoff, max_retries: u32) -> Self {
        Self {
            backoff,
            max_retries: Some(max_retries),
        }
    }

    pub(crate) fn exhausted(&self, retries: u32) -> bool {
        self.max_retries.is_some_and(|max| retries >= max)
    }
}
