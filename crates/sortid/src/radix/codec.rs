use super::{Alphabet, BASE58, BASE62};
use crate::{Error, Result};

/// Encodes big-endian `bytes` as a string over `alphabet`.
///
/// Each leading zero byte becomes one zero symbol; the remaining bytes are
/// converted as a single base-256 integer by repeated long division by the
/// radix. The division runs in place on a copy of the digits and drops leading
/// zero quotient digits as it goes, so each pass is `O(n)` and the whole
/// conversion `O(n²)` in the payload length.
///
/// An empty input encodes to an empty string.
///
/// # Example
///
/// ```
/// use sortid::radix::{self, BASE62};
///
/// assert_eq!(radix::encode(&[], &BASE62), "");
/// assert_eq!(radix::encode(&[0, 0, 0], &BASE62), "000");
/// assert_eq!(radix::encode(&[0xFF; 20], &BASE62), "aWgEPTl1tmebfsQzFP4bxwgy80V");
/// ```
#[must_use]
pub fn encode(bytes: &[u8], alphabet: &Alphabet) -> String {
    let zeros = bytes.iter().take_while(|&&b| b == 0).count();
    let base = alphabet.len() as u32;

    let mut digits = bytes[zeros..].to_vec();
    let mut len = digits.len();
    // Least-significant symbol first.
    let mut reversed = Vec::with_capacity(len * 2);

    while len > 0 {
        let mut remainder = 0_u32;
        let mut quotient_len = 0;
        for i in 0..len {
            let acc = (remainder << 8) | u32::from(digits[i]);
            let q = acc / base;
            remainder = acc % base;
            // `quotient_len <= i`, so writing behind the read cursor is safe.
            if q != 0 || quotient_len != 0 {
                digits[quotient_len] = q as u8;
                quotient_len += 1;
            }
        }
        reversed.push(alphabet.symbol(remainder as usize));
        len = quotient_len;
    }

    let mut out = String::with_capacity(zeros + reversed.len());
    out.extend(core::iter::repeat_n(char::from(alphabet.zero()), zeros));
    out.extend(reversed.iter().rev().map(|&b| char::from(b)));
    out
}

/// Encodes `bytes` and left-pads the result with the zero symbol to `width`.
///
/// Padding with the zero symbol does not change the encoded value, so the
/// output still decodes to the same integer. Output longer than `width` is
/// returned unchanged.
#[must_use]
pub fn encode_padded(bytes: &[u8], alphabet: &Alphabet, width: usize) -> String {
    let encoded = encode(bytes, alphabet);
    if encoded.len() >= width {
        return encoded;
    }
    let mut out = String::with_capacity(width);
    out.extend(core::iter::repeat_n(
        char::from(alphabet.zero()),
        width - encoded.len(),
    ));
    out.push_str(&encoded);
    out
}

/// Decodes a string produced by [`encode`] back into the exact original bytes.
///
/// Each leading zero symbol becomes one zero byte; the remaining symbols are
/// folded into a base-256 digit array by long multiplication.
///
/// # Errors
///
/// Returns [`Error::InvalidSymbol`] for any byte of `text` not in `alphabet`.
///
/// # Example
///
/// ```
/// use sortid::radix::{self, CROCKFORD32};
///
/// let bytes = [0x00, 0x12, 0x34];
/// let text = radix::encode(&bytes, &CROCKFORD32);
/// assert_eq!(radix::decode(&text, &CROCKFORD32).unwrap(), bytes);
/// assert!(radix::decode("0U", &CROCKFORD32).is_err());
/// ```
pub fn decode(text: &str, alphabet: &Alphabet) -> Result<Vec<u8>> {
    let input = text.as_bytes();
    let zero = alphabet.zero();
    let zeros = input.iter().take_while(|&&b| b == zero).count();

    let mut out = vec![0_u8; zeros];
    out.extend(decode_value(input, zeros, alphabet)?);
    Ok(out)
}

/// Decodes a left-padded, fixed-width string into `out`, right-aligned.
///
/// Unlike [`decode`], leading zero symbols carry no width information here:
/// the text is read purely as a number and written into `out` as a big-endian
/// integer of `out.len()` bytes. This is the inverse of [`encode_padded`].
///
/// # Errors
///
/// - [`Error::InvalidSymbol`] for a byte not in `alphabet`.
/// - [`Error::Overflow`] if the value needs more than `out.len()` bytes.
///
/// # Example
///
/// ```
/// use sortid::radix::{self, BASE62};
///
/// let mut out = [0xAA; 4];
/// radix::decode_into("00048", &BASE62, &mut out).unwrap();
/// assert_eq!(out, [0, 0, 1, 0]);
/// ```
pub fn decode_into(text: &str, alphabet: &Alphabet, out: &mut [u8]) -> Result<()> {
    let input = text.as_bytes();
    let zero = alphabet.zero();
    let zeros = input.iter().take_while(|&&b| b == zero).count();

    let value = decode_value(input, zeros, alphabet)?;
    if value.len() > out.len() {
        return Err(Error::Overflow);
    }
    let pad = out.len() - value.len();
    out[..pad].fill(0);
    out[pad..].copy_from_slice(&value);
    Ok(())
}

/// Folds `input[start..]` into big-endian bytes without leading zero bytes.
fn decode_value(input: &[u8], start: usize, alphabet: &Alphabet) -> Result<Vec<u8>> {
    let base = alphabet.len() as u32;
    // Little-endian while accumulating so carries append instead of insert.
    let mut le: Vec<u8> = Vec::with_capacity(input.len());

    for (index, &byte) in input.iter().enumerate().skip(start) {
        let digit = alphabet
            .value_of(byte)
            .ok_or(Error::InvalidSymbol { byte, index })?;
        let mut carry = u32::from(digit);
        for b in &mut le {
            let acc = u32::from(*b) * base + carry;
            *b = (acc & 0xFF) as u8;
            carry = acc >> 8;
        }
        while carry > 0 {
            le.push((carry & 0xFF) as u8);
            carry >>= 8;
        }
    }

    le.reverse();
    Ok(le)
}

/// Base-58 short form of any fixed-layout binary identifier.
#[must_use]
pub fn encode_base58(bytes: &[u8]) -> String {
    encode(bytes, &BASE58)
}

/// Base-62 short form of any fixed-layout binary identifier.
#[must_use]
pub fn encode_base62(bytes: &[u8]) -> String {
    encode(bytes, &BASE62)
}
