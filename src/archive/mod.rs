//! Archive Loader
//!
//! Reads zip archives (stored and deflate entries) and turns them into the
//! in-memory tree the shell runs against.

pub mod error;
pub mod loader;
pub mod zip;

pub use error::ArchiveError;
pub use loader::{build_vfs, load_vfs, LoadedVfs};
pub use zip::{create_archive, parse_archive, ZipEntry};
