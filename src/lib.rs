//! Read-only access to pacman style repository databases.
//!
//! A repository database is a tar container with one directory per package,
//! each holding `desc`, `depends` and `files` blocks. [`Database`] reads such a
//! container into an immutable index, [`Package`] is a typed view over one
//! entry of it and [`Version`] implements rpm style version comparison.
//!
//! ```no_run
//! use pacdb::{Config, Database};
//!
//! # fn main() -> pacdb::Result<()> {
//! let db = Database::from_path("core", "/var/lib/pacman/sync/core.db", &Config::default())?;
//! if let Some(pkg) = db.get("glibc") {
//!     println!("{} is required by {:?}", pkg, pkg.required_by());
//! }
//! # Ok(())
//! # }
//! ```
pub mod msg;

mod config;
mod db;
mod error;
mod types;
mod utils;

pub use config::Config;
pub use db::{Database, Field, Package, PackageEntry, Relation};
pub use error::{DbError, Result};
pub use types::{
    parse_depends, Checksum, ChecksumValidator, DependEntry, Depends, EpochSeparators, Operator,
    Version,
};
pub use utils::{compression::Compression, pacparse::parse_block};

use std::cmp::Ordering;

/// Compare two version strings using the default epoch separators.
pub fn vercmp(a: &str, b: &str) -> Ordering {
    Version::parse(a).vercmp(&Version::parse(b))
}
