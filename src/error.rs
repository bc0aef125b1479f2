//! Recoverable command errors and the process exit-code contract.

use thiserror::Error;

use crate::fs::VfsError;

/// Clean exit.
pub const EXIT_OK: i32 = 0;
/// A startup-script command failed.
pub const EXIT_FAILURE: i32 = 1;
/// Fatal startup error (archive or script could not be loaded).
pub const EXIT_FATAL: i32 = 2;
/// A startup-script line named an unknown command.
pub const EXIT_UNKNOWN_COMMAND: i32 = 127;

/// Errors a command line can fail with. The REPL reports them and keeps
/// going; the script runner applies its [`ErrorPolicy`](crate::config::ErrorPolicy).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShellError {
    #[error("unknown command: {name}")]
    UnknownCommand { name: String },

    #[error("{command}: no such file or directory: {path}")]
    NotFound { command: String, path: String },

    #[error("{command}: not a directory: {path}")]
    NotADirectory { command: String, path: String },

    #[error("{command}: invalid mode: '{mode}'")]
    InvalidMode { command: String, mode: String },

    #[error("{command}: name already exists: {path}")]
    NameConflict { command: String, path: String },

    #[error("{command}: {reason}")]
    InvalidMove { command: String, reason: String },

    #[error("{command}: {message}")]
    Usage { command: String, message: String },

    #[error("parse error: {message}")]
    Parse { message: String },
}

impl ShellError {
    pub fn usage(command: &str, message: impl Into<String>) -> Self {
        ShellError::Usage { command: command.to_string(), message: message.into() }
    }

    /// Attach the failing command's name to a tree error.
    pub fn from_vfs(command: &str, err: VfsError) -> Self {
        let command = command.to_string();
        match err {
            VfsError::NotFound { path } => ShellError::NotFound { command, path },
            VfsError::NotADirectory { path } => ShellError::NotADirectory { command, path },
            VfsError::NameConflict { path } => ShellError::NameConflict { command, path },
            e @ (VfsError::MoveIntoSelf { .. } | VfsError::MoveRoot) => {
                ShellError::InvalidMove { command, reason: e.to_string() }
            }
        }
    }

    /// Exit status a startup script ends with when halted by this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            ShellError::UnknownCommand { .. } => EXIT_UNKNOWN_COMMAND,
            _ => EXIT_FAILURE,
        }
    }
}

/// Tag tree errors with the command that hit them.
pub trait VfsResultExt<T> {
    fn for_command(self, command: &str) -> Result<T, ShellError>;
}

impl<T> VfsResultExt<T> for Result<T, VfsError> {
    fn for_command(self, command: &str) -> Result<T, ShellError> {
        self.map_err(|e| ShellError::from_vfs(command, e))
    }
}
