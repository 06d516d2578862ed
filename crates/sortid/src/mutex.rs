#[cfg(feature = "parking-lot")]
pub use parking_lot::{Mutex, MutexGuard};
#[cfg(not(feature = "parking-lot"))]
pub use std::sync::{Mutex, MutexGuard, PoisonError};

/// Locks `$mutex`, propagating poisoning as [`Error::LockPoisoned`] with the
/// std mutex.
///
/// [`Error::LockPoisoned`]: crate::Error::LockPoisoned
#[cfg(feature = "parking-lot")]
macro_rules! lock {
    ($mutex:expr) => {
        $mutex.lock()
    };
}

#[cfg(not(feature = "parking-lot"))]
macro_rules! lock {
    ($mutex:expr) => {
        $mutex.lock()?
    };
}

pub(crate) use lock;
