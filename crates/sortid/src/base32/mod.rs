mod crockford;

pub use crockford::*;
