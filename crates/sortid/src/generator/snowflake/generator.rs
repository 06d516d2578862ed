#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    ClockSequencer, ClockState, ConfigError, Error, Poll, Result, SnowflakeConfig, SnowflakeId,
    TimeSource, WaitPolicy, WorkerIdentity,
};

/// A thread-safe Snowflake generator for one worker identity.
///
/// The generator reads a Unix-millisecond [`TimeSource`], subtracts the
/// identity's epoch, and asks its [`ClockSequencer`] for the next
/// `(timestamp, sequence)` pair. IDs from one generator (or from any
/// generators sharing its sequencer) are strictly increasing.
///
/// The generator is `Clone`; clones share the sequencer.
///
/// # Example
///
/// ```
/// use sortid::{SnowflakeConfig, SnowflakeGenerator, SystemClock};
///
/// let config = SnowflakeConfig {
///     epoch: "2025-01-01T00:00:00Z".into(),
///     worker_id: 3,
///     datacenter_id: 1,
/// };
/// let generator = SnowflakeGenerator::from_config(&config, SystemClock::default()).unwrap();
///
/// let a = generator.generate().unwrap();
/// let b = generator.generate().unwrap();
/// assert!(a < b);
/// assert_eq!(b.worker_id(), 3);
/// ```
#[derive(Clone, Debug)]
pub struct SnowflakeGenerator<T> {
    identity: WorkerIdentity,
    clock: T,
    sequencer: ClockSequencer,
    policy: WaitPolicy,
}

impl<T> SnowflakeGenerator<T>
where
    T: TimeSource,
{
    /// Creates a generator with a fresh sequencer and the default
    /// [`WaitPolicy`].
    ///
    /// `clock` must report Unix milliseconds; the identity's epoch is applied
    /// by the generator.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EpochInFuture`] if the identity's epoch is
    /// later than `clock`.
    pub fn new(identity: WorkerIdentity, clock: T) -> Result<Self> {
        Self::with_sequencer(identity, clock, ClockSequencer::new())
    }

    /// Validates `config` and creates a generator from it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the configuration is invalid or its epoch
    /// is later than `clock`.
    pub fn from_config(config: &SnowflakeConfig, clock: T) -> Result<Self> {
        Self::new(config.validate()?, clock)
    }

    /// Creates a generator driven by an existing sequencer.
    ///
    /// Generators sharing a sequencer never emit the same `(timestamp,
    /// sequence)` pair. Share one sequencer per identity; generators with
    /// different identities need no coordination.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EpochInFuture`] if the identity's epoch is
    /// later than `clock`. Every ID would otherwise carry timestamp `0` and
    /// the generator would stall once that millisecond's sequence ran out.
    pub fn with_sequencer(
        identity: WorkerIdentity,
        clock: T,
        sequencer: ClockSequencer,
    ) -> Result<Self> {
        let now_ms = clock.current_millis();
        if identity.epoch_ms() > now_ms {
            return Err(ConfigError::EpochInFuture {
                epoch_ms: identity.epoch_ms(),
                now_ms,
            }
            .into());
        }
        Ok(Self {
            identity,
            clock,
            sequencer,
            policy: WaitPolicy::default(),
        })
    }

    /// Replaces how [`Self::generate`] waits for the clock.
    #[must_use]
    pub fn with_wait_policy(mut self, policy: WaitPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub const fn identity(&self) -> &WorkerIdentity {
        &self.identity
    }

    pub const fn sequencer(&self) -> &ClockSequencer {
        &self.sequencer
    }

    /// Generates the next ID, blocking while the clock is behind or the
    /// current millisecond is exhausted.
    ///
    /// # Errors
    ///
    /// - [`Error::TimestampOverflow`] once the time since the epoch no longer
    ///   fits 41 bits.
    /// - [`Error::ClockStalled`] if the wait policy is bounded and ran out.
    /// - [`Error::LockPoisoned`] if the sequencer lock is poisoned.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn generate(&self) -> Result<SnowflakeId> {
        let clock = SinceEpoch {
            clock: &self.clock,
            epoch_ms: self.identity.epoch_ms(),
        };
        let tick = self.sequencer.next(&clock, &self.policy)?;
        self.pack(tick)
    }

    /// Attempts to generate the next ID without blocking.
    ///
    /// # Returns
    /// - `Ok(Poll::Ready { value })`: a new ID
    /// - `Ok(Poll::Pending { yield_for })`: milliseconds to wait before
    ///   retrying
    ///
    /// # Errors
    ///
    /// Same as [`Self::generate`], minus [`Error::ClockStalled`].
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn try_generate(&self) -> Result<Poll<SnowflakeId>> {
        let now_ms = self
            .clock
            .current_millis()
            .saturating_sub(self.identity.epoch_ms());
        match self.sequencer.poll(now_ms)? {
            Poll::Ready { value } => self.pack(value).map(|value| Poll::Ready { value }),
            Poll::Pending { yield_for } => Ok(Poll::Pending { yield_for }),
        }
    }

    fn pack(&self, tick: ClockState) -> Result<SnowflakeId> {
        if tick.time_ms > SnowflakeId::max_timestamp() {
            return Err(Error::TimestampOverflow {
                timestamp: tick.time_ms,
            });
        }
        Ok(SnowflakeId::from_components(
            tick.time_ms,
            self.identity.datacenter_id(),
            self.identity.worker_id(),
            u64::from(tick.sequence),
        ))
    }
}

/// Views a Unix-millisecond clock relative to an epoch.
struct SinceEpoch<'a, T> {
    clock: &'a T,
    epoch_ms: u64,
}

impl<T: TimeSource> TimeSource for SinceEpoch<'_, T> {
    fn current_millis(&self) -> u64 {
        self.clock.current_millis().saturating_sub(self.epoch_ms)
    }
}
