//! Lock file codec for a package restore engine.
//!
//! Reads and writes the lock file that records a restore's resolved
//! dependency closure: which library versions were chosen per target
//! framework, which assets each contributes, and where packages live on disk.
//!
//! # Architecture
//!
//! - [`json`] - Streaming token cursor, limits, and the indented writer
//! - [`convert`] - One converter per entity, driving the cursor and writer
//! - [`model`] - The lock file object model
//! - [`format`] - Whole-file read/write entry points
//! - [`frameworks`] - Indexed view of targets for host integrations
//! - [`process`] - Subprocess harness used by integration tests
//! - [`error`] - Error types
//!
//! # Compatibility
//!
//! Unknown members are skipped at every level so older readers accept files
//! from newer writers. Written output is canonical: the same model always
//! produces the same bytes, which lets callers skip rewriting unchanged
//! files.

// Lock files are untrusted input: library code reports errors instead of
// panicking. Tests are checked separately with `cargo test`.
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(missing_docs)]

pub mod convert;
pub mod error;
pub mod format;
pub mod frameworks;
pub mod json;
pub mod model;
pub mod process;

// Re-export commonly used types
pub use error::{LockError, LockResult};
pub use format::WriteOutcome;
pub use frameworks::{FrameworkKey, TargetFrameworkInfo, TargetFrameworks};
pub use json::Limits;
pub use model::{
    Libraries, Library, LockFile, LockFileItem, PackageDependency, PackageFolder,
    ProjectFileDependencyGroup, Target, TargetLibrary,
};
