use core::{fmt, str::FromStr};

use crate::{Error, Result, base32_len, decode_base32, encode_base32};

/// A 64-bit Snowflake identifier.
///
/// ```text
///  Bit Index:  63           63 62            22 21             17 16         12 11             0
///              +--------------+----------------+-----------------+-------------+---------------+
///  Field:      | reserved (1) | timestamp (41) | datacenter (5)  | worker (5)  | sequence (12) |
///              +--------------+----------------+-----------------+-------------+---------------+
///              |<----------- MSB ---------- 64 bits ----------- LSB ------------------------->|
/// ```
///
/// The timestamp counts milliseconds since the generator's epoch. Values from
/// one datacenter/worker pair increase strictly with `(timestamp, sequence)`.
///
/// `Display` prints the decimal value, which stays exact in environments that
/// only have signed 64-bit integers or doubles to hold it.
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct SnowflakeId {
    id: u64,
}

impl SnowflakeId {
    pub const RESERVED_BITS: u64 = 1;
    pub const TIMESTAMP_BITS: u64 = 41;
    pub const DATACENTER_ID_BITS: u64 = 5;
    pub const WORKER_ID_BITS: u64 = 5;
    pub const SEQUENCE_BITS: u64 = 12;

    pub const SEQUENCE_SHIFT: u64 = 0;
    pub const WORKER_ID_SHIFT: u64 = Self::SEQUENCE_SHIFT + Self::SEQUENCE_BITS;
    pub const DATACENTER_ID_SHIFT: u64 = Self::WORKER_ID_SHIFT + Self::WORKER_ID_BITS;
    pub const TIMESTAMP_SHIFT: u64 = Self::DATACENTER_ID_SHIFT + Self::DATACENTER_ID_BITS;
    pub const RESERVED_SHIFT: u64 = Self::TIMESTAMP_SHIFT + Self::TIMESTAMP_BITS;

    pub const TIMESTAMP_MASK: u64 = (1 << Self::TIMESTAMP_BITS) - 1;
    pub const DATACENTER_ID_MASK: u64 = (1 << Self::DATACENTER_ID_BITS) - 1;
    pub const WORKER_ID_MASK: u64 = (1 << Self::WORKER_ID_BITS) - 1;
    pub const SEQUENCE_MASK: u64 = (1 << Self::SEQUENCE_BITS) - 1;

    const BASE32_LEN: usize = base32_len(64);

    const fn valid_mask() -> u64 {
        (Self::TIMESTAMP_MASK << Self::TIMESTAMP_SHIFT)
            | (Self::DATACENTER_ID_MASK << Self::DATACENTER_ID_SHIFT)
            | (Self::WORKER_ID_MASK << Self::WORKER_ID_SHIFT)
            | (Self::SEQUENCE_MASK << Self::SEQUENCE_SHIFT)
    }

    /// Packs the components into an ID. Each component is masked to its
    /// field width.
    ///
    /// # Example
    ///
    /// ```
    /// use sortid::SnowflakeId;
    ///
    /// let id = SnowflakeId::from_components(1, 2, 3, 4);
    /// assert_eq!(id.to_raw(), (1 << 22) | (2 << 17) | (3 << 12) | 4);
    /// assert_eq!(id.to_string(), "4468740");
    /// ```
    #[must_use]
    pub const fn from_components(
        timestamp: u64,
        datacenter_id: u64,
        worker_id: u64,
        sequence: u64,
    ) -> Self {
        let t = (timestamp & Self::TIMESTAMP_MASK) << Self::TIMESTAMP_SHIFT;
        let d = (datacenter_id & Self::DATACENTER_ID_MASK) << Self::DATACENTER_ID_SHIFT;
        let w = (worker_id & Self::WORKER_ID_MASK) << Self::WORKER_ID_SHIFT;
        let s = (sequence & Self::SEQUENCE_MASK) << Self::SEQUENCE_SHIFT;
        Self { id: t | d | w | s }
    }

    /// Extracts the timestamp (milliseconds since the epoch).
    #[must_use]
    pub const fn timestamp(&self) -> u64 {
        (self.id >> Self::TIMESTAMP_SHIFT) & Self::TIMESTAMP_MASK
    }

    /// Extracts the datacenter ID.
    #[must_use]
    pub const fn datacenter_id(&self) -> u64 {
        (self.id >> Self::DATACENTER_ID_SHIFT) & Self::DATACENTER_ID_MASK
    }

    /// Extracts the worker ID.
    #[must_use]
    pub const fn worker_id(&self) -> u64 {
        (self.id >> Self::WORKER_ID_SHIFT) & Self::WORKER_ID_MASK
    }

    /// Extracts the sequence number.
    #[must_use]
    pub const fn sequence(&self) -> u64 {
        (self.id >> Self::SEQUENCE_SHIFT) & Self::SEQUENCE_MASK
    }

    #[must_use]
    pub const fn max_timestamp() -> u64 {
        Self::TIMESTAMP_MASK
    }

    #[must_use]
    pub const fn max_datacenter_id() -> u64 {
        Self::DATACENTER_ID_MASK
    }

    #[must_use]
    pub const fn max_worker_id() -> u64 {
        Self::WORKER_ID_MASK
    }

    #[must_use]
    pub const fn max_sequence() -> u64 {
        Self::SEQUENCE_MASK
    }

    /// Converts this type into its raw type representation
    #[must_use]
    pub const fn to_raw(&self) -> u64 {
        self.id
    }

    /// Converts a raw type into this type
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self { id: raw }
    }

    /// Returns `true` if the reserved bit is clear.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.id & !Self::valid_mask() == 0
    }

    /// Returns the ID with the reserved bit cleared.
    #[must_use]
    pub const fn into_valid(self) -> Self {
        Self {
            id: self.id & Self::valid_mask(),
        }
    }

    /// Absolute Unix milliseconds, given the epoch the ID was generated with.
    #[must_use]
    pub const fn unix_millis(&self, epoch_ms: u64) -> u64 {
        epoch_ms + self.timestamp()
    }

    /// Encodes the ID as 13 Crockford Base32 symbols.
    ///
    /// The short form sorts like the numeric value.
    ///
    /// ```
    /// use sortid::SnowflakeId;
    ///
    /// assert_eq!(SnowflakeId::from_raw(0).encode(), "0000000000000");
    /// assert_eq!(SnowflakeId::from_raw(2_424_242_424_242_424_242).encode(), "23953MG16DJDJ");
    /// ```
    #[must_use]
    pub fn encode(&self) -> String {
        let mut buf = [0_u8; Self::BASE32_LEN];
        encode_base32(&self.id.to_be_bytes(), &mut buf);
        buf.iter().map(|&b| char::from(b)).collect()
    }

    /// Decodes the 13-symbol Base32 short form.
    ///
    /// # Errors
    ///
    /// Returns an error if the length is not 13, a symbol is not Crockford
    /// Base32, or the value sets the reserved bit (or exceeds 64 bits).
    pub fn decode(s: &str) -> Result<Self> {
        let raw = decode_base32(s, 64)?;
        // 13 symbols hold 65 bits; the overflow check rejected the 65th.
        Self::checked(raw as u64)
    }

    /// Wraps `raw`, rejecting a set reserved bit with [`Error::Overflow`].
    pub(crate) fn checked(raw: u64) -> Result<Self> {
        let id = Self::from_raw(raw);
        if id.is_valid() { Ok(id) } else { Err(Error::Overflow) }
    }
}

impl fmt::Display for SnowflakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.id, f)
    }
}

impl fmt::Debug for SnowflakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnowflakeId")
            .field("id", &self.id)
            .field("timestamp", &self.timestamp())
            .field("datacenter_id", &self.datacenter_id())
            .field("worker_id", &self.worker_id())
            .field("sequence", &self.sequence())
            .finish()
    }
}

impl FromStr for SnowflakeId {
    type Err = Error;

    /// Parses the decimal form produced by `Display`.
    ///
    /// Values with the reserved bit set are rejected with
    /// [`Error::Overflow`].
    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidDecimal);
        }
        let raw = s.parse::<u64>().map_err(|_| Error::InvalidDecimal)?;
        Self::checked(raw)
    }
}

impl From<SnowflakeId> for u64 {
    fn from(id: SnowflakeId) -> Self {
        id.to_raw()
    }
}
