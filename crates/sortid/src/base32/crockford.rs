use crate::{Error, Result, radix::CROCKFORD32};

const NO_VALUE: u8 = 255;
const BITS_PER_CHAR: usize = 5;

/// Lookup table for Crockford base32 decoding
const LOOKUP: [u8; 256] = {
    let mut lut = [NO_VALUE; 256];
    let mut i = 0_u8;
    // Main alphabet, allow lower-case
    while i < 32 {
        let c = CROCKFORD32.symbol(i as usize);
        lut[c as usize] = i;
        if c.is_ascii_uppercase() {
            lut[(c + 32) as usize] = i; // lowercase letter
        }
        i += 1;
    }
    // Crockford-specific aliases
    lut[b'O' as usize] = 0;
    lut[b'o' as usize] = 0;
    lut[b'I' as usize] = 1;
    lut[b'i' as usize] = 1;
    lut[b'L' as usize] = 1;
    lut[b'l' as usize] = 1;
    lut
};

/// Number of Base32 symbols needed for `bits` bits.
#[must_use]
pub const fn base32_len(bits: usize) -> usize {
    bits.div_ceil(BITS_PER_CHAR)
}

/// Encodes `input` as fixed-width Crockford Base32 into `out`.
///
/// The output width is `out.len()`. When it holds more bits than the input,
/// the surplus is zero padding at the **front**, which keeps the result a
/// left-zero-padded positional encoding of the input as one big-endian
/// integer, so fixed-width outputs sort like their values.
///
/// # Panics
///
/// Panics if `out` is too short to hold every input bit.
pub fn encode_base32(input: &[u8], out: &mut [u8]) {
    let input_bits = input.len() * 8;
    let total_bits = out.len() * BITS_PER_CHAR;
    assert!(total_bits >= input_bits, "output too short for input");

    let mut bits = total_bits - input_bits;
    let mut acc = 0_u16;
    let mask = 0x1F;

    let mut pos = 0;
    for &b in input {
        acc = (acc << 8) | u16::from(b);
        bits += 8;
        while bits >= BITS_PER_CHAR {
            bits -= BITS_PER_CHAR;
            out[pos] = CROCKFORD32.symbol(usize::from((acc >> bits) & mask));
            pos += 1;
        }
    }
}

/// Decodes a fixed-width Crockford Base32 string that encodes a `bits`-wide
/// integer (at most 128 bits).
///
/// Lower case letters and the Crockford aliases `O`, `I` and `L` are accepted.
///
/// # Errors
///
/// - [`Error::InvalidLength`] unless `encoded` has exactly
///   [`base32_len(bits)`](base32_len) symbols.
/// - [`Error::InvalidSymbol`] for a byte outside the alphabet.
/// - [`Error::Overflow`] if every symbol is valid but the padding bits of
///   the first one are set.
pub fn decode_base32(encoded: &str, bits: usize) -> Result<u128> {
    debug_assert!(bits <= 128);
    let expected = base32_len(bits);
    if encoded.len() != expected {
        return Err(Error::InvalidLength {
            expected,
            actual: encoded.len(),
        });
    }

    let mut acc = 0_u128;
    let mut first = 0_u8;
    for (index, byte) in encoded.bytes().enumerate() {
        let val = LOOKUP[usize::from(byte)];
        if val == NO_VALUE {
            return Err(Error::InvalidSymbol { byte, index });
        }
        if index == 0 {
            first = val;
        }
        acc = (acc << BITS_PER_CHAR) | u128::from(val);
    }

    // Padding bits sit at the top of the first symbol.
    let pad = expected * BITS_PER_CHAR - bits;
    if pad > 0 && (first >> (BITS_PER_CHAR - pad)) != 0 {
        return Err(Error::Overflow);
    }

    Ok(acc)
}
