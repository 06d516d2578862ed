//! Identifier generators.
//!
//! Every generator reads a Unix-millisecond [`TimeSource`](crate::TimeSource).
//! Stateful generators keep their state behind a single lock and can be cloned
//! to share it between threads.

mod ksuid;
mod snowflake;
mod ulid;

pub use ksuid::*;
pub use snowflake::*;
pub use ulid::*;
