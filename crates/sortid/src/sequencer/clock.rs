use core::cmp::Ordering;
use std::sync::Arc;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    Error, Poll, Result, TimeSource, WaitPolicy,
    mutex::{Mutex, lock},
};

/// Largest sequence value within one millisecond (12 bits).
pub const MAX_SEQUENCE: u16 = 0x0FFF;

/// The last `(time, sequence)` pair a [`ClockSequencer`] emitted.
///
/// Ordering is lexicographic: time first, then sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockState {
    pub time_ms: u64,
    pub sequence: u16,
}

/// A thread-safe `(time, sequence)` sequencer.
///
/// Given the current time, the sequencer either starts a new millisecond at
/// sequence `0`, hands out the next sequence value of the current millisecond,
/// or asks the caller to wait. It never emits a pair smaller than one it
/// already emitted:
///
/// - **Clock moved backward**: wait until the clock catches up, then continue
///   the current millisecond. Correctness wins over latency here.
/// - **Sequence exhausted** (more than 4096 values in one millisecond): wait
///   until the clock passes the current millisecond.
///
/// The state sits behind a single mutex. Clones share that state, so one
/// sequencer per worker identity can be handed to any number of threads.
/// Waiting never holds the lock; the state is re-read after every wait.
#[derive(Clone, Debug, Default)]
pub struct ClockSequencer {
    state: Arc<Mutex<Option<ClockState>>>,
}

impl ClockSequencer {
    /// Creates a sequencer that has not emitted anything yet. Its first pair
    /// is `(now, 0)` for whatever time it is first polled with.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a sequencer that resumes after `state`.
    ///
    /// Useful for restoring the last emitted pair from persistent storage.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SequenceOutOfRange`] if `state.sequence` exceeds
    /// [`MAX_SEQUENCE`].
    pub fn from_state(state: ClockState) -> Result<Self> {
        if state.sequence > MAX_SEQUENCE {
            return Err(Error::SequenceOutOfRange {
                sequence: state.sequence,
            });
        }
        Ok(Self {
            state: Arc::new(Mutex::new(Some(state))),
        })
    }

    /// Returns a snapshot of the last emitted pair, or `None` before the
    /// first one.
    ///
    /// # Errors
    ///
    /// Returns an error if the lock is poisoned.
    pub fn state(&self) -> Result<Option<ClockState>> {
        let state = lock!(self.state);
        Ok(*state)
    }

    /// Attempts to advance the sequencer to `now_ms` without blocking.
    ///
    /// # Returns
    /// - `Ok(Poll::Ready { value })`: the new pair, already persisted
    /// - `Ok(Poll::Pending { yield_for })`: milliseconds to wait before
    ///   retrying
    ///
    /// # Errors
    /// - Returns an error if the underlying lock has been poisoned.
    ///
    /// # Example
    /// ```
    /// use sortid::{ClockSequencer, ClockState, Poll};
    ///
    /// let sequencer = ClockSequencer::new();
    /// assert_eq!(
    ///     sequencer.poll(7).unwrap(),
    ///     Poll::Ready { value: ClockState { time_ms: 7, sequence: 0 } }
    /// );
    /// assert_eq!(
    ///     sequencer.poll(7).unwrap(),
    ///     Poll::Ready { value: ClockState { time_ms: 7, sequence: 1 } }
    /// );
    /// assert_eq!(sequencer.poll(5).unwrap(), Poll::Pending { yield_for: 2 });
    /// ```
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn poll(&self, now_ms: u64) -> Result<Poll<ClockState>> {
        let mut state = lock!(self.state);

        let next = match *state {
            None => ClockState {
                time_ms: now_ms,
                sequence: 0,
            },
            Some(last) => match now_ms.cmp(&last.time_ms) {
                Ordering::Equal => {
                    if last.sequence >= MAX_SEQUENCE {
                        return Ok(Self::cold_sequence_exhausted(now_ms));
                    }
                    ClockState {
                        time_ms: now_ms,
                        sequence: last.sequence + 1,
                    }
                }
                Ordering::Greater => ClockState {
                    time_ms: now_ms,
                    sequence: 0,
                },
                Ordering::Less => return Ok(Self::cold_clock_behind(now_ms, last.time_ms)),
            },
        };

        *state = Some(next);
        Ok(Poll::Ready { value: next })
    }

    /// Advances the sequencer, blocking until the clock allows it.
    ///
    /// Reads `clock`, polls, and on [`Poll::Pending`] waits according to
    /// `policy` before reading the clock again. The lock is released during
    /// every wait, so concurrent callers are serialized only for the
    /// comparison itself.
    ///
    /// # Errors
    ///
    /// - [`Error::LockPoisoned`] if the lock is poisoned.
    /// - [`Error::ClockStalled`] if `policy` is bounded and ran out of
    ///   retries.
    pub fn next<T>(&self, clock: &T, policy: &WaitPolicy) -> Result<ClockState>
    where
        T: TimeSource + ?Sized,
    {
        let mut retries = 0;
        loop {
            let now_ms = clock.current_millis();
            match self.poll(now_ms)? {
                Poll::Ready { value } => return Ok(value),
                Poll::Pending { yield_for } => {
                    if policy.exhausted(retries) {
                        let last_ms = self.state()?.map_or(now_ms, |last| last.time_ms);
                        return Err(Error::ClockStalled { last_ms, now_ms });
                    }
                    retries += 1;
                    policy.backoff.wait(yield_for);
                }
            }
        }
    }

    #[cold]
    #[inline(never)]
    fn cold_sequence_exhausted(now_ms: u64) -> Poll<ClockState> {
        #[cfg(feature = "tracing")]
        tracing::debug!(now_ms, "sequence exhausted, waiting for next millisecond");
        #[cfg(not(feature = "tracing"))]
        let _ = now_ms;
        Poll::Pending { yield_for: 1 }
    }

    #[cold]
    #[inline(never)]
    fn cold_clock_behind(now_ms: u64, last_ms: u64) -> Poll<ClockState> {
        let yield_for = last_ms - now_ms;
        #[cfg(feature = "tracing")]
        tracing::warn!(now_ms, last_ms, yield_for, "clock moved backward");
        Poll::Pending { yield_for }
    }
}
