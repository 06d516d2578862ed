/// A result type defaulting to the crate [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All errors that `sortid` can produce.
///
/// Clock waits (backward jumps, sequence exhaustion) are retried internally and
/// only ever show up as latency. The one exception is
/// [`Error::ClockStalled`], which is returned only when the caller opted into
/// a bounded [`WaitPolicy`](crate::WaitPolicy).
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The generator configuration was rejected.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// An alphabet had too few or too many symbols, a non-ASCII symbol, or a
    /// duplicate symbol.
    #[error("invalid alphabet: {reason}")]
    InvalidAlphabet { reason: &'static str },

    /// A symbol outside the alphabet was found while decoding.
    #[error("invalid symbol {byte:#04x} at index {index}")]
    InvalidSymbol { byte: u8, index: usize },

    /// A fixed-width textual identifier had the wrong length.
    #[error("invalid length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// The decoded value does not fit into the target width.
    #[error("decoded value overflows the target width")]
    Overflow,

    /// A decimal Snowflake string could not be parsed.
    #[error("invalid decimal identifier")]
    InvalidDecimal,

    /// The 80-bit monotonic entropy of a ULID wrapped within one millisecond.
    #[error("monotonic entropy exhausted at timestamp {timestamp}")]
    EntropyExhausted { timestamp: u64 },

    /// The elapsed time since the epoch no longer fits the timestamp field.
    #[error("timestamp {timestamp} does not fit the timestamp field")]
    TimestampOverflow { timestamp: u64 },

    /// A restored [`ClockState`](crate::ClockState) carried a sequence wider
    /// than 12 bits.
    #[error("sequence {sequence} is out of range [0, 4095]")]
    SequenceOutOfRange { sequence: u16 },

    /// A bounded backoff gave up waiting for the clock to advance.
    #[error("clock did not advance past {last_ms} (observed {now_ms})")]
    ClockStalled { last_ms: u64, now_ms: u64 },

    /// The operation failed because a lock was poisoned.
    ///
    /// Never produced with the `parking-lot` feature, whose mutexes do not
    /// poison.
    #[error("lock poisoned")]
    LockPoisoned,
}

/// Reasons a [`SnowflakeConfig`](crate::SnowflakeConfig) is rejected.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("worker id {0} is out of range [0, 31]")]
    WorkerIdOutOfRange(u64),

    #[error("datacenter id {0} is out of range [0, 31]")]
    DatacenterIdOutOfRange(u64),

    /// The epoch string could not be parsed, or lies before 1970-01-01.
    #[error("invalid epoch: {0}")]
    InvalidEpoch(String),

    /// The epoch is later than the clock the generator was built with.
    #[error("epoch {epoch_ms} is ahead of the clock ({now_ms})")]
    EpochInFuture { epoch_ms: u64, now_ms: u64 },
}

#[cfg(not(feature = "parking-lot"))]
use crate::mutex::{MutexGuard, PoisonError};

// Convert all poisoned lock errors to a simplified `LockPoisoned`
#[cfg(not(feature = "parking-lot"))]
impl<T> From<PoisonError<MutexGuard<'_, T>>> for Error {
    fn from(_: PoisonError<MutexGuard<'_, T>>) -> Self {
        Self::LockPoisoned
    }
}
