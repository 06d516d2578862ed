//! Serde support.
//!
//! Every identifier serializes as its canonical text form by default:
//! [`SnowflakeId`](crate::SnowflakeId) as a decimal string,
//! [`Ulid`](crate::Ulid) as 26 Crockford Base32 symbols and
//! [`Ksuid`](crate::Ksuid) as 27 base-62 symbols. The `as_native_*` modules
//! store the raw integer instead, for use with `#[serde(with = "...")]`.

mod ksuid;
mod snowflake;
mod ulid;

pub use snowflake::as_native_snowflake;
pub use ulid::as_native_ulid;
