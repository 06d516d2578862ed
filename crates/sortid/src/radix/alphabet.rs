use core::fmt;

use crate::{Error, Result};

const NO_VALUE: u8 = u8::MAX;

/// Digits then upper then lower case: ASCII order equals numeric order.
pub const BASE62: Alphabet = Alphabet::builtin(
    b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz",
);

/// Bitcoin base-58 (no `0`, `O`, `I`, `l`).
pub const BASE58: Alphabet =
    Alphabet::builtin(b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz");

/// Crockford Base32 (no `I`, `L`, `O`, `U`).
pub const CROCKFORD32: Alphabet = Alphabet::builtin(b"0123456789ABCDEFGHJKMNPQRSTVWXYZ");

/// An ordered set of unique ASCII symbols used as the digits of a radix.
///
/// The symbol at index `0` is the zero symbol. It represents leading zero
/// bytes and pads fixed-width output, so sort-preserving schemes must pick an
/// alphabet whose zero symbol is its smallest.
///
/// Lookups in both directions are table driven; an `Alphabet` is `Copy` and
/// cheap to pass around.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Alphabet {
    symbols: [u8; 256],
    len: usize,
    lookup: [u8; 256],
}

impl Alphabet {
    /// Builds an alphabet from `symbols`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAlphabet`] if there are fewer than 2 symbols,
    /// a symbol is not ASCII, or a symbol repeats. Unique ASCII caps the radix
    /// at 128.
    ///
    /// # Example
    ///
    /// ```
    /// use sortid::radix::{self, Alphabet};
    ///
    /// let binary = Alphabet::new("01").unwrap();
    /// assert_eq!(radix::encode(&[0x05], &binary), "101");
    /// assert!(Alphabet::new("0").is_err());
    /// assert!(Alphabet::new("aba").is_err());
    /// ```
    pub fn new(symbols: &str) -> Result<Self> {
        Self::build(symbols.as_bytes()).map_err(|reason| Error::InvalidAlphabet { reason })
    }

    const fn builtin(symbols: &[u8]) -> Self {
        match Self::build(symbols) {
            Ok(alphabet) => alphabet,
            Err(_) => panic!("invalid built-in alphabet"),
        }
    }

    const fn build(symbols: &[u8]) -> core::result::Result<Self, &'static str> {
        let len = symbols.len();
        if len < 2 {
            return Err("an alphabet needs at least 2 symbols");
        }

        let mut table = [0_u8; 256];
        let mut lookup = [NO_VALUE; 256];
        let mut i = 0;
        while i < len {
            let c = symbols[i];
            if !c.is_ascii() {
                return Err("symbols must be ASCII");
            }
            if lookup[c as usize] != NO_VALUE {
                return Err("symbols must be unique");
            }
            table[i] = c;
            lookup[c as usize] = i as u8;
            i += 1;
        }

        Ok(Self {
            symbols: table,
            len,
            lookup,
        })
    }

    /// Number of symbols, i.e. the radix.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Always `false`: an alphabet holds at least two symbols.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The zero symbol.
    #[must_use]
    pub const fn zero(&self) -> u8 {
        self.symbols[0]
    }

    /// The symbol for digit `value`.
    ///
    /// # Panics
    ///
    /// Panics if `value >= self.len()`.
    #[must_use]
    pub const fn symbol(&self, value: usize) -> u8 {
        assert!(value < self.len, "digit out of range for alphabet");
        self.symbols[value]
    }

    /// The digit value of `symbol`, or `None` if it is not in the alphabet.
    #[must_use]
    pub const fn value_of(&self, symbol: u8) -> Option<u8> {
        match self.lookup[symbol as usize] {
            NO_VALUE => None,
            v => Some(v),
        }
    }

    /// The symbols in digit order.
    #[must_use]
    pub fn as_str(&self) -> &str {
        // SAFETY: every symbol was checked to be ASCII on construction.
        unsafe { core::str::from_utf8_unchecked(&self.symbols[..self.len]) }
    }
}

impl fmt::Debug for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Alphabet").field(&self.as_str()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_alphabets_have_expected_radix() {
        assert_eq!(BASE62.len(), 62);
        assert_eq!(BASE58.len(), 58);
        assert_eq!(CROCKFORD32.len(), 32);
        assert_eq!(BASE62.zero(), b'0');
        assert_eq!(BASE58.zero(), b'1');
    }

    #[test]
    fn builtin_alphabets_are_ascii_sorted() {
        for alphabet in [BASE62, BASE58, CROCKFORD32] {
            let s = alphabet.as_str().as_bytes();
            assert!(s.windows(2).all(|w| w[0] < w[1]), "{alphabet:?}");
        }
    }

    #[test]
    fn lookup_is_inverse_of_symbol() {
        for i in 0..BASE62.len() {
            assert_eq!(BASE62.value_of(BASE62.symbol(i)), Some(i as u8));
        }
        assert_eq!(CROCKFORD32.value_of(b'U'), None);
        assert_eq!(CROCKFORD32.value_of(b'0'), Some(0));
    }

    #[test]
    fn rejects_degenerate_alphabets() {
        assert!(matches!(
            Alphabet::new(""),
            Err(Error::InvalidAlphabet { .. })
        ));
        assert!(matches!(
            Alphabet::new("x"),
            Err(Error::InvalidAlphabet { .. })
        ));
        assert!(matches!(
            Alphabet::new("abca"),
            Err(Error::InvalidAlphabet { .. })
        ));
        assert!(matches!(
            Alphabet::new("ab\u{e9}"),
            Err(Error::InvalidAlphabet { .. })
        ));
    }

    #[test]
    fn accepts_custom_alphabet() {
        let hex = Alphabet::new("0123456789abcdef").unwrap();
        assert_eq!(hex.len(), 16);
        assert_eq!(hex.value_of(b'f'), Some(15));
        assert_eq!(hex.value_of(b'F'), None);
    }
}
