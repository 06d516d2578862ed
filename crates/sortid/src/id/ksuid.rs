use core::{fmt, str::FromStr};

use crate::{
    Error, KSUID_EPOCH_SECS, Result,
    radix::{self, BASE62},
};

/// A 160-bit K-sortable identifier.
///
/// ```text
///  Byte Index:  0            3 4              19
///               +-------------+----------------+
///  Field:       | seconds (4) | payload (16)   |
///               +-------------+----------------+
/// ```
///
/// `seconds` counts from [`KSUID_EPOCH_SECS`] (2014-05-13T16:53:20Z) as a
/// big-endian `u32`. The text form is 27 base-62 symbols (`0-9A-Za-z`), left
/// padded with `0`, so text order equals byte order.
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Ksuid([u8; 20]);

impl Ksuid {
    pub const BYTE_LEN: usize = 20;
    pub const PAYLOAD_LEN: usize = 16;
    pub const ENCODED_LEN: usize = 27;

    pub const MIN: Self = Self([0; Self::BYTE_LEN]);
    pub const MAX: Self = Self([0xFF; Self::BYTE_LEN]);

    #[must_use]
    pub const fn from_parts(timestamp: u32, payload: [u8; Self::PAYLOAD_LEN]) -> Self {
        let mut bytes = [0_u8; Self::BYTE_LEN];
        let ts = timestamp.to_be_bytes();
        let mut i = 0;
        while i < ts.len() {
            bytes[i] = ts[i];
            i += 1;
        }
        let mut j = 0;
        while j < payload.len() {
            bytes[4 + j] = payload[j];
            j += 1;
        }
        Self(bytes)
    }

    /// Builds a KSUID from absolute Unix seconds. Times before the KSUID epoch
    /// clamp to `0`, times past the 32-bit range clamp to `u32::MAX`.
    #[must_use]
    pub fn from_unix_seconds(unix_seconds: u64, payload: [u8; Self::PAYLOAD_LEN]) -> Self {
        let offset = unix_seconds.saturating_sub(KSUID_EPOCH_SECS);
        let timestamp = u32::try_from(offset).unwrap_or(u32::MAX);
        Self::from_parts(timestamp, payload)
    }

    #[must_use]
    pub const fn from_bytes(bytes: [u8; Self::BYTE_LEN]) -> Self {
        Self(bytes)
    }

    /// Seconds since the KSUID epoch.
    #[must_use]
    pub const fn timestamp(&self) -> u32 {
        u32::from_be_bytes([self.0[0], self.0[1], self.0[2], self.0[3]])
    }

    /// Absolute Unix seconds.
    #[must_use]
    pub const fn unix_seconds(&self) -> u64 {
        self.timestamp() as u64 + KSUID_EPOCH_SECS
    }

    #[must_use]
    pub fn payload(&self) -> &[u8] {
        &self.0[4..]
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; Self::BYTE_LEN] {
        &self.0
    }

    /// Encodes the KSUID as exactly 27 base-62 symbols.
    ///
    /// ```
    /// use sortid::Ksuid;
    ///
    /// assert_eq!(Ksuid::MIN.encode(), "000000000000000000000000000");
    /// assert_eq!(Ksuid::MAX.encode(), "aWgEPTl1tmebfsQzFP4bxwgy80V");
    /// ```
    #[must_use]
    pub fn encode(&self) -> String {
        radix::encode_padded(&self.0, &BASE62, Self::ENCODED_LEN)
    }

    /// Decodes the 27-symbol text form.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidLength`] unless `s` has 27 symbols.
    /// - [`Error::InvalidSymbol`] for a byte outside `0-9A-Za-z`.
    /// - [`Error::Overflow`] if the value exceeds 160 bits.
    pub fn decode(s: &str) -> Result<Self> {
        if s.len() != Self::ENCODED_LEN {
            return Err(Error::InvalidLength {
                expected: Self::ENCODED_LEN,
                actual: s.len(),
            });
        }
        let mut bytes = [0_u8; Self::BYTE_LEN];
        radix::decode_into(s, &BASE62, &mut bytes)?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for Ksuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl fmt::Debug for Ksuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ksuid")
            .field("id", &format_args!("{self}"))
            .field("timestamp", &self.timestamp())
            .finish_non_exhaustive()
    }
}

impl FromStr for Ksuid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::decode(s)
    }
}

impl From<[u8; Ksuid::BYTE_LEN]> for Ksuid {
    fn from(bytes: [u8; Ksuid::BYTE_LEN]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Ksuid {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
