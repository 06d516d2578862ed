mod backoff;
mod clock;

pub use backoff::*;
pub use clock::*;
