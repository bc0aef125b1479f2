// src/commands/types.rs
use async_trait::async_trait;

use crate::error::ShellError;
use crate::shell::Session;

/// Command output on success, or the error to report.
pub type CommandResult = Result<String, ShellError>;

/// Command execution context
pub struct CommandContext<'a> {
    pub args: Vec<String>,
    pub session: &'a mut Session,
}

/// Command trait
#[async_trait]
pub trait Command: Send + Sync {
    fn name(&self) -> &'static str;

    /// Text printed for `--help`.
    fn help(&self) -> &'static str;

    async fn execute(&self, ctx: CommandContext<'_>) -> CommandResult;
}
