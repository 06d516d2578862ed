#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{Ksuid, RandSource, TimeSource};

/// A stateless KSUID generator.
///
/// Each ID combines the current second (relative to the KSUID epoch) with 16
/// fresh random bytes. Ordering within one second is random.
///
/// # Example
///
/// ```
/// use sortid::{KsuidGenerator, SystemClock, ThreadRandom};
///
/// let generator = KsuidGenerator::new(SystemClock::default(), ThreadRandom);
/// let id = generator.generate_string();
/// assert_eq!(id.len(), 27);
/// ```
#[derive(Clone, Debug)]
pub struct KsuidGenerator<T, R> {
    clock: T,
    rng: R,
}

impl<T, R> KsuidGenerator<T, R>
where
    T: TimeSource,
    R: RandSource,
{
    /// `clock` must report Unix milliseconds.
    pub const fn new(clock: T, rng: R) -> Self {
        Self { clock, rng }
    }

    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn generate(&self) -> Ksuid {
        let unix_seconds = self.clock.current_millis() / 1000;
        Ksuid::from_unix_seconds(unix_seconds, self.rng.bytes())
    }

    pub fn generate_string(&self) -> String {
        self.generate().encode()
    }
}
