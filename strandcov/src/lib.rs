#[cfg(feature = "core")]
#[doc(inline)]
pub use strandcov_core as core;

#[cfg(feature = "io")]
#[doc(inline)]
pub use strandcov_io as io;

#[cfg(feature = "coverage")]
#[doc(inline)]
pub use strandcov_coverage as coverage;
