//! File System Module
//!
//! The virtual file system the shell navigates: an arena-backed directory
//! tree populated once from an archive and mutated in place by commands.

pub mod types;
pub mod vfs;
pub mod walk;

pub use types::*;
pub use vfs::Vfs;
pub use walk::{Walk, WalkEntry};
