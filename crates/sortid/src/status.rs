/// The result of a single non-blocking generation attempt.
///
/// This type models the outcome of [`ClockSequencer::poll`] and
/// [`SnowflakeGenerator::try_generate`]:
///
/// - [`Poll::Ready`] indicates a new value was produced.
/// - [`Poll::Pending`] means the caller must wait `yield_for` milliseconds
///   before the clock can produce a new value, either because the sequence is
///   exhausted for the current tick or because the clock moved backward.
///
/// This allows non-blocking generation loops and custom backoff strategies.
///
/// # Example
///
/// ```
/// use sortid::{ClockSequencer, Poll};
///
/// let sequencer = ClockSequencer::new();
/// match sequencer.poll(42).unwrap() {
///     Poll::Ready { value } => println!("tick {} / {}", value.time_ms, value.sequence),
///     Poll::Pending { yield_for } => println!("back off for {yield_for} ms"),
/// }
/// ```
///
/// [`ClockSequencer::poll`]: crate::ClockSequencer::poll
/// [`SnowflakeGenerator::try_generate`]: crate::SnowflakeGenerator::try_generate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Poll<T> {
    /// A new value is ready to use.
    Ready {
        /// The produced value.
        value: T,
    },
    /// No value could be produced yet.
    Pending {
        /// Milliseconds to wait before retrying.
        yield_for: u64,
    },
}

impl<T> Poll<T> {
    /// Maps the ready value, leaving `Pending` untouched.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Poll<U> {
        match self {
            Self::Ready { value } => Poll::Ready { value: f(value) },
            Self::Pending { yield_for } => Poll::Pending { yield_for },
        }
    }

    /// Returns `true` if a value is ready.
    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready { .. })
    }
}
