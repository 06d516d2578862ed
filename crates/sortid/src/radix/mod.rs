//! Arbitrary-precision conversion between big-endian bytes and any alphabet.
//!
//! Byte strings are treated as base-256 big integers and converted with
//! digit-array long division, so payload widths beyond native integers (the
//! 160-bit KSUID payload) need no big-integer type. Leading zero bytes are
//! kept as leading zero symbols, which makes every encoding reversible:
//!
//! ```
//! use sortid::radix::{self, BASE62};
//!
//! let bytes = [0x00, 0x00, 0x01, 0x00];
//! let text = radix::encode(&bytes, &BASE62);
//! assert_eq!(text, "0048");
//! assert_eq!(radix::decode(&text, &BASE62).unwrap(), bytes);
//! ```

mod alphabet;
mod codec;

pub use alphabet::*;
pub use codec::*;
