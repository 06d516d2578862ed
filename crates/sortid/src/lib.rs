#![cfg_attr(docsrs, feature(doc_cfg))]
//! Monotonic, time-ordered identifiers.
//!
//! `sortid` generates three families of identifiers:
//!
//! - [`SnowflakeId`]: 64-bit `timestamp | datacenter | worker | sequence`
//!   values, printed as decimal text.
//! - [`Ulid`]: 128-bit, lexicographically sortable identifiers with
//!   intra-millisecond monotonicity, printed as 26 Crockford Base32 symbols.
//! - [`Ksuid`]: 160-bit identifiers with a second-resolution custom epoch,
//!   printed as 27 base-62 symbols.
//!
//! The [`radix`] module converts arbitrary big-endian byte strings to and from
//! any alphabet without a native big-integer type; it is what turns the
//! 160-bit KSUID payload into text.
//!
//! All mutable sequencing state lives in explicit, shareable objects
//! ([`ClockSequencer`], [`UlidGenerator`]); there are no hidden globals.

mod base32;
mod error;
mod generator;
mod id;
mod mutex;
pub mod radix;
mod rand;
mod sequencer;
#[cfg(feature = "serde")]
mod serde;
mod status;
#[cfg(test)]
mod test_util;
mod time;

pub use crate::base32::*;
pub use crate::error::*;
pub use crate::generator::*;
pub use crate::id::*;
pub use crate::rand::*;
pub use crate::sequencer::*;
#[cfg(feature = "serde")]
pub use crate::serde::*;
pub use crate::status::*;
pub use crate::time::*;
