//! vfs-shell - a teaching shell over a zip-backed virtual filesystem
//!
//! This library loads a zip archive into an in-memory tree and provides a
//! small shell (`ls`, `cd`, `pwd`, `tree`, `mv`, `chmod`, `history`) that
//! runs startup scripts or an interactive loop against it. Nothing is ever
//! written back to the host filesystem.

pub mod archive;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod fs;
pub mod logging;
pub mod shell;

pub use archive::{load_vfs, ArchiveError, LoadedVfs};
pub use config::{ErrorPolicy, ShellConfig};
pub use error::ShellError;
pub use fs::{NodeId, Vfs, VfsError};
pub use shell::{read_script, Dispatch, ScriptError, ScriptOutcome, Session, Shell};
