use core::{fmt, str::FromStr};

use crate::{Error, Result, base32_len, decode_base32, encode_base32};

/// A 128-bit lexicographically sortable identifier.
///
/// ```text
///  Bit Index:  127            80 79           0
///              +----------------+-------------+
///  Field:      | timestamp (48) | random (80) |
///              +----------------+-------------+
///              |<-- MSB -- 128 bits -- LSB -->|
/// ```
///
/// The timestamp is Unix milliseconds. The canonical text form is 26 Crockford
/// Base32 symbols: 10 for the timestamp, 16 for the random part. Text order
/// equals numeric order equals byte order.
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Ulid {
    id: u128,
}

impl Ulid {
    pub const TIMESTAMP_BITS: u128 = 48;
    pub const RANDOM_BITS: u128 = 80;

    pub const RANDOM_SHIFT: u128 = 0;
    pub const TIMESTAMP_SHIFT: u128 = Self::RANDOM_SHIFT + Self::RANDOM_BITS;

    pub const TIMESTAMP_MASK: u128 = (1 << Self::TIMESTAMP_BITS) - 1;
    pub const RANDOM_MASK: u128 = (1 << Self::RANDOM_BITS) - 1;

    /// Length of the canonical text form.
    pub const ENCODED_LEN: usize = base32_len(128);

    #[must_use]
    pub const fn from_components(timestamp: u64, random: u128) -> Self {
        let t = (timestamp as u128 & Self::TIMESTAMP_MASK) << Self::TIMESTAMP_SHIFT;
        let r = (random & Self::RANDOM_MASK) << Self::RANDOM_SHIFT;
        Self { id: t | r }
    }

    /// Builds a ULID from a timestamp and 10 big-endian entropy bytes.
    #[must_use]
    pub const fn from_parts(timestamp: u64, entropy: [u8; 10]) -> Self {
        let mut random = 0_u128;
        let mut i = 0;
        while i < entropy.len() {
            random = (random << 8) | entropy[i] as u128;
            i += 1;
        }
        Self::from_components(timestamp, random)
    }

    /// Extracts the timestamp (Unix milliseconds).
    #[must_use]
    pub const fn timestamp(&self) -> u64 {
        ((self.id >> Self::TIMESTAMP_SHIFT) & Self::TIMESTAMP_MASK) as u64
    }

    /// Extracts the random part.
    #[must_use]
    pub const fn random(&self) -> u128 {
        (self.id >> Self::RANDOM_SHIFT) & Self::RANDOM_MASK
    }

    /// The random part as 10 big-endian bytes.
    #[must_use]
    pub const fn entropy(&self) -> [u8; 10] {
        let bytes = self.id.to_be_bytes();
        let mut out = [0_u8; 10];
        let mut i = 0;
        while i < out.len() {
            out[i] = bytes[i + 6];
            i += 1;
        }
        out
    }

    #[must_use]
    pub const fn max_timestamp() -> u64 {
        Self::TIMESTAMP_MASK as u64
    }

    #[must_use]
    pub const fn max_random() -> u128 {
        Self::RANDOM_MASK
    }

    /// Converts this type into its raw type representation
    #[must_use]
    pub const fn to_raw(&self) -> u128 {
        self.id
    }

    /// Converts a raw type into this type
    #[must_use]
    pub const fn from_raw(raw: u128) -> Self {
        Self { id: raw }
    }

    /// The 16-byte big-endian binary form.
    #[must_use]
    pub const fn to_bytes(&self) -> [u8; 16] {
        self.id.to_be_bytes()
    }

    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self {
            id: u128::from_be_bytes(bytes),
        }
    }

    /// Returns the same timestamp with the random part incremented by one, or
    /// `None` if all 80 random bits are set.
    #[must_use]
    pub const fn increment(&self) -> Option<Self> {
        if self.random() < Self::max_random() {
            Some(Self::from_components(self.timestamp(), self.random() + 1))
        } else {
            None
        }
    }

    /// Encodes the ULID as 26 Crockford Base32 symbols.
    ///
    /// ```
    /// use sortid::Ulid;
    ///
    /// let id = Ulid::from_components(1_469_922_850_259, 1_012_768_647_078_601_740_696_923);
    /// assert_eq!(id.encode(), "01ARZ3NDEKTSV4RRFFQ69G5FAV");
    /// ```
    #[must_use]
    pub fn encode(&self) -> String {
        let mut buf = [0_u8; Self::ENCODED_LEN];
        encode_base32(&self.to_bytes(), &mut buf);
        buf.iter().map(|&b| char::from(b)).collect()
    }

    /// Decodes the 26-symbol text form. Lower case and the Crockford aliases
    /// are accepted.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidLength`] unless `s` has 26 symbols.
    /// - [`Error::InvalidSymbol`] for a byte outside the alphabet.
    /// - [`Error::Overflow`] if the first symbol is above `7`.
    pub fn decode(s: &str) -> Result<Self> {
        decode_base32(s, 128).map(Self::from_raw)
    }
}

impl fmt::Display for Ulid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl fmt::Debug for Ulid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ulid")
            .field("id", &format_args!("{self}"))
            .field("timestamp", &self.timestamp())
            .field("random", &self.random())
            .finish()
    }
}

impl FromStr for Ulid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::decode(s)
    }
}

impl From<Ulid> for u128 {
    fn from(id: Ulid) -> Self {
        id.to_raw()
    }
}

impl From<u128> for Ulid {
    fn from(raw: u128) -> Self {
        Self::from_raw(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KNOWN: &str = "01ARZ3NDEKTSV4RRFFQ69G5FAV";
    const KNOWN_TS: u64 = 1_469_922_850_259;
    const KNOWN_RANDOM: u128 = 1_012_768_647_078_601_740_696_923;

    #[test]
    fn known_vector() {
        let id = Ulid::from_components(KNOWN_TS, KNOWN_RANDOM);
        assert_eq!(id.encode(), KNOWN);
        assert_eq!(id.to_string(), KNOWN);

        let parsed: Ulid = KNOWN.parse().unwrap();
        assert_eq!(parsed, id);
        assert_eq!(parsed.timestamp(), KNOWN_TS);
        assert_eq!(parsed.random(), KNOWN_RANDOM);
    }

    #[test]
    fn timestamp_prefix_is_positional() {
        // Same timestamp, any entropy: the first 10 symbols match.
        let a = Ulid::from_components(KNOWN_TS, 0);
        let b = Ulid::from_components(KNOWN_TS, Ulid::max_random());
        assert_eq!(&a.encode()[..10], "01ARZ3NDEK");
        assert_eq!(&b.encode()[..10], "01ARZ3NDEK");
        assert_eq!(&a.encode()[10..], "0000000000000000");
        assert_eq!(&b.encode()[10..], "ZZZZZZZZZZZZZZZZ");
    }

    #[test]
    fn extremes() {
        assert_eq!(Ulid::from_raw(0).encode(), "00000000000000000000000000");
        assert_eq!(
            Ulid::from_raw(u128::MAX).encode(),
            "7ZZZZZZZZZZZZZZZZZZZZZZZZZ"
        );
        assert_eq!(
            Ulid::decode("7ZZZZZZZZZZZZZZZZZZZZZZZZZ").unwrap(),
            Ulid::from_raw(u128::MAX)
        );
    }

    #[test]
    fn parts_and_bytes_agree() {
        let entropy = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10];
        let id = Ulid::from_parts(0x0102_0304_0506, entropy);
        assert_eq!(id.entropy(), entropy);
        assert_eq!(id.timestamp(), 0x0102_0304_0506);
        assert_eq!(
            id.to_bytes(),
            [1, 2, 3, 4, 5, 6, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10]
        );
        assert_eq!(Ulid::from_bytes(id.to_bytes()), id);
    }

    #[test]
    fn oversized_timestamp_is_masked() {
        let id = Ulid::from_components(u64::MAX, 0);
        assert_eq!(id.timestamp(), Ulid::max_timestamp());
    }

    #[test]
    fn increment_carries_and_stops_at_max() {
        let id = Ulid::from_parts(5, [0, 0, 0, 0, 0, 0, 0, 0, 0, 0xFF]);
        let next = id.increment().unwrap();
        assert_eq!(next.entropy(), [0, 0, 0, 0, 0, 0, 0, 0, 1, 0]);
        assert_eq!(next.timestamp(), 5);

        let full = Ulid::from_components(5, Ulid::max_random());
        assert_eq!(full.increment(), None);
    }

    #[test]
    fn decode_accepts_lower_case_and_aliases() {
        let lower = KNOWN.to_ascii_lowercase();
        assert_eq!(Ulid::decode(&lower).unwrap(), Ulid::decode(KNOWN).unwrap());
        assert_eq!(
            Ulid::decode("OOOOOOOOOOOOOOOOOOOOOOOOOL").unwrap(),
            Ulid::from_raw(1)
        );
    }

    #[test]
    fn decode_rejects_bad_input() {
        assert!(matches!(
            Ulid::decode("01ARZ3NDEKTSV4RRFFQ69G5FA"),
            Err(Error::InvalidLength {
                expected: 26,
                actual: 25
            })
        ));
        assert!(matches!(
            Ulid::decode("01ARZ3NDEKTSV4RRFFQ69G5FAU"),
            Err(Error::InvalidSymbol {
                byte: b'U',
                index: 25
            })
        ));
        assert_eq!(
            Ulid::decode("80000000000000000000000000"),
            Err(Error::Overflow)
        );
    }

    #[test]
    fn text_order_matches_numeric_order() {
        let ids = [
            Ulid::from_components(1, 0),
            Ulid::from_components(1, 1),
            Ulid::from_components(1, Ulid::max_random()),
            Ulid::from_components(2, 0),
            Ulid::from_components(Ulid::max_timestamp(), 0),
        ];
        for pair in ids.windows(2) {
            assert!(pair[0] < pair[1]);
            assert!(pair[0].encode() < pair[1].encode());
        }
    }
}
