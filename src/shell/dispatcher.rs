//! Command dispatch: one line in, one result out.

use tracing::debug;

use super::session::Session;
use super::words::split_words;
use crate::commands::{create_default_registry, CommandContext, CommandRegistry};
use crate::error::ShellError;

/// What a dispatched line produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// Blank or comment line; nothing ran and nothing was recorded.
    Skipped,
    /// Command ran; its stdout (possibly empty).
    Output(String),
    /// `exit` was requested.
    Exit,
}

/// Blank lines and `#` comments are not commands.
pub fn is_command_line(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty() && !trimmed.starts_with('#')
}

pub struct Dispatcher {
    registry: CommandRegistry,
}

impl Dispatcher {
    pub fn new(registry: CommandRegistry) -> Self {
        Self { registry }
    }

    /// Tokenize `line`, record it in the session history, and run it.
    ///
    /// The line is recorded before it runs, so `history` lists itself and
    /// unknown commands are recorded too. Lines that fail to tokenize are
    /// not recorded.
    pub async fn execute(&self, line: &str, session: &mut Session) -> Result<Dispatch, ShellError> {
        if !is_command_line(line) {
            return Ok(Dispatch::Skipped);
        }
        let trimmed = line.trim();
        let mut words = split_words(trimmed)?;
        if words.is_empty() {
            return Ok(Dispatch::Skipped);
        }
        session.history.push(trimmed.to_string());

        let verb = words.remove(0);
        let args = words;

        if verb == "exit" {
            if !args.is_empty() {
                return Err(ShellError::usage("exit", "no arguments expected"));
            }
            return Ok(Dispatch::Exit);
        }

        let command = self
            .registry
            .get(&verb)
            .ok_or_else(|| ShellError::UnknownCommand { name: verb.clone() })?;

        if matches!(args.as_slice(), [flag] if flag == "--help") {
            return Ok(Dispatch::Output(format!("{}\n", command.help())));
        }

        debug!(command = %verb, ?args, cwd = %session.cwd_path(), "dispatch");
        let output = command.execute(CommandContext { args, session }).await?;
        Ok(Dispatch::Output(output))
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(create_default_registry())
    }
}
