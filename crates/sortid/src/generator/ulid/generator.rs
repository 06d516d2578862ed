use std::sync::Arc;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    Error, RandSource, Result, TimeSource, Ulid,
    mutex::{Mutex, lock},
};

/// A thread-safe ULID generator.
///
/// In monotonic mode ([`Self::new`]) the generator remembers the last ID it
/// handed out. Within one millisecond, and while the clock reads earlier than
/// that ID, every new ID keeps the last timestamp and increments the 80-bit
/// random part by one. IDs from one generator therefore sort in generation
/// order, even if the wall clock steps backward.
///
/// In non-monotonic mode ([`Self::non_monotonic`]) every ID gets fresh
/// randomness and no state is kept.
///
/// The generator is `Clone`; clones share the monotonic state.
///
/// # Example
///
/// ```
/// use sortid::{SystemClock, ThreadRandom, UlidGenerator};
///
/// let generator = UlidGenerator::new(SystemClock::default(), ThreadRandom);
/// let a = generator.generate().unwrap();
/// let b = generator.generate().unwrap();
/// assert!(a < b);
/// assert!(a.to_string() < b.to_string());
/// ```
#[derive(Clone, Debug)]
pub struct UlidGenerator<T, R> {
    last: Option<Arc<Mutex<Option<Ulid>>>>,
    clock: T,
    rng: R,
}

impl<T, R> UlidGenerator<T, R>
where
    T: TimeSource,
    R: RandSource,
{
    /// Creates a monotonic generator.
    ///
    /// `clock` must report Unix milliseconds.
    pub fn new(clock: T, rng: R) -> Self {
        Self {
            last: Some(Arc::new(Mutex::new(None))),
            clock,
            rng,
        }
    }

    /// Creates a stateless generator that draws fresh entropy for every ID.
    ///
    /// IDs from the same millisecond are unique with high probability but
    /// their relative order is random.
    pub fn non_monotonic(clock: T, rng: R) -> Self {
        Self {
            last: None,
            clock,
            rng,
        }
    }

    pub const fn is_monotonic(&self) -> bool {
        self.last.is_some()
    }

    /// Generates the next ULID.
    ///
    /// # Errors
    ///
    /// - [`Error::EntropyExhausted`] if all 2^80 values of the current
    ///   millisecond were used. The generator state is left untouched, so a
    ///   later millisecond recovers.
    /// - [`Error::TimestampOverflow`] if the clock is past the 48-bit range.
    /// - [`Error::LockPoisoned`] if the state lock is poisoned.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn generate(&self) -> Result<Ulid> {
        let now_ms = self.clock.current_millis();
        if now_ms > Ulid::max_timestamp() {
            return Err(Error::TimestampOverflow { timestamp: now_ms });
        }

        let Some(last) = &self.last else {
            return Ok(self.fresh(now_ms));
        };

        let mut last = lock!(last);
        let id = match *last {
            Some(prev) if now_ms <= prev.timestamp() => {
                if now_ms < prev.timestamp() {
                    Self::cold_clock_behind(now_ms, prev.timestamp());
                }
                prev.increment()
                    .ok_or_else(|| Self::cold_entropy_exhausted(prev.timestamp()))?
            }
            _ => self.fresh(now_ms),
        };
        *last = Some(id);
        Ok(id)
    }

    /// Generates the next ULID in its 26-symbol text form.
    ///
    /// # Errors
    ///
    /// Same as [`Self::generate`].
    pub fn generate_string(&self) -> Result<String> {
        self.generate().map(|id| id.encode())
    }

    fn fresh(&self, now_ms: u64) -> Ulid {
        Ulid::from_parts(now_ms, self.rng.bytes())
    }

    #[cold]
    #[inline(never)]
    fn cold_clock_behind(now_ms: u64, last_ms: u64) {
        #[cfg(feature = "tracing")]
        tracing::warn!(now_ms, last_ms, "clock moved backward, reusing last timestamp");
        #[cfg(not(feature = "tracing"))]
        let _ = (now_ms, last_ms);
    }

    #[cold]
    #[inline(never)]
    fn cold_entropy_exhausted(timestamp: u64) -> Error {
        #[cfg(feature = "tracing")]
        tracing::warn!(timestamp, "monotonic entropy exhausted");
        Error::EntropyExhausted { timestamp }
    }
}
