//! Shell configuration resolved from the command line.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

/// What the startup script runner does when a line fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Stop at the first failing line and exit with its status.
    #[default]
    Halt,
    /// Report every failure, run to the end, exit with the first failure's status.
    Continue,
}

impl fmt::Display for ErrorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorPolicy::Halt => write!(f, "halt"),
            ErrorPolicy::Continue => write!(f, "continue"),
        }
    }
}

/// Options for creating a shell session.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ShellConfig {
    /// Archive the tree was loaded from.
    pub vfs_zip: PathBuf,
    /// Script run at startup instead of the REPL.
    pub startup: Option<PathBuf>,
    pub on_error: ErrorPolicy,
    /// Enter the REPL after a successful startup script.
    pub interactive: bool,
}
