mod ksuid;
mod snowflake;
mod ulid;

pub use ksuid::*;
pub use snowflake::*;
pub use ulid::*;
