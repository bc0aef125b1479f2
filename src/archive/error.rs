use std::path::PathBuf;
use thiserror::Error;

/// Failures while reading an archive or materializing it into a tree.
/// All of them are fatal at startup.
#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("archive not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("cannot read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("not a valid zip archive: {reason}")]
    Malformed { reason: String },

    #[error("unsupported entry '{entry}': {reason}")]
    Unsupported { entry: String, reason: String },

    #[error("checksum mismatch in '{entry}'")]
    Checksum { entry: String },

    #[error("unsafe entry path '{entry}'")]
    UnsafePath { entry: String },

    #[error("path component is a file: {path}")]
    Conflict { path: String },

    #[error("duplicate entry: {path}")]
    Duplicate { path: String },

    #[error("invalid base64 in '{entry}': {source}")]
    Base64 {
        entry: String,
        #[source]
        source: base64::DecodeError,
    },
}

impl ArchiveError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        ArchiveError::Malformed { reason: reason.into() }
    }
}
