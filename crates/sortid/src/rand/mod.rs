mod interface;
#[cfg(feature = "std")]
mod thread_random;

pub use interface::*;
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
#[cfg(feature = "std")]
pub use thread_random::*;
