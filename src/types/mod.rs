mod checksum;
mod depend;
mod version;

pub use checksum::{Checksum, ChecksumValidator};
pub use depend::{parse_depends, DependEntry, Depends, Operator};
pub use version::{EpochSeparators, Version};
