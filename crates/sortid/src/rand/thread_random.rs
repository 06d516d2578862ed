use ::rand::{RngCore, rng};

use crate::RandSource;

/// A `RandSource` that uses the thread-local RNG (`rand::rng()`).
///
/// This RNG is fast, cryptographically secure (ChaCha-based), and automatically
/// reseeded periodically.
///
/// ⚠️ NOTE: The underlying `ThreadRng` is not `Send` or `Sync`. This type does
/// not store it; it is a zero-sized handle that reaches the calling thread's
/// generator on each call, so it may be freely shared across threads.
#[derive(Default, Clone, Copy, Debug)]
pub struct ThreadRandom;

impl RandSource for ThreadRandom {
    fn fill_bytes(&self, buf: &mut [u8]) {
        rng().fill_bytes(buf);
    }
}
