use std::sync::Arc;

/// A trait for random sources that fill byte buffers.
///
/// Generators only consume this capability; seeding and reseeding belong to
/// the implementation. Plug in a real CSPRNG in production or a mocked source
/// in tests.
///
/// # Example
/// ```
/// use sortid::RandSource;
///
/// struct ZeroRand;
/// impl RandSource for ZeroRand {
///     fn fill_bytes(&self, buf: &mut [u8]) {
///         buf.fill(0);
///     }
/// }
///
/// let mut buf = [0xFF; 4];
/// ZeroRand.fill_bytes(&mut buf);
/// assert_eq!(buf, [0; 4]);
/// ```
pub trait RandSource {
    /// Fills `buf` entirely with random bytes.
    fn fill_bytes(&self, buf: &mut [u8]);

    /// Returns `N` random bytes.
    fn bytes<const N: usize>(&self) -> [u8; N]
    where
        Self: Sized,
    {
        let mut buf = [0_u8; N];
        self.fill_bytes(&mut buf);
        buf
    }
}

impl<R: RandSource + ?Sized> RandSource for &R {
    fn fill_bytes(&self, buf: &mut [u8]) {
        (**self).fill_bytes(buf);
    }
}

impl<R: RandSource + ?Sized> RandSource for Arc<R> {
    fn fill_bytes(&self, buf: &mut [u8]) {
        (**self).fill_bytes(buf);
    }
}
