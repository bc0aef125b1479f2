// src/commands/pwd/mod.rs
use async_trait::async_trait;
use crate::commands::{Command, CommandContext, CommandResult};
use crate::error::ShellError;

pub struct PwdCommand;

const HELP: &str = "Usage: pwd

Print the absolute path of the current directory.";

#[async_trait]
impl Command for PwdCommand {
    fn name(&self) -> &'static str {
        "pwd"
    }

    fn help(&self) -> &'static str {
        HELP
    }

    async fn execute(&self, ctx: CommandContext<'_>) -> CommandResult {
        if !ctx.args.is_empty() {
            return Err(ShellError::usage("pwd", "no arguments expected"));
        }
        Ok(format!("{}\n", ctx.session.cwd_path()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::session::test_support::session_with;

    #[tokio::test]
    async fn test_pwd_root() {
        let mut session = session_with(&["home/user/"]);
        let result = PwdCommand
            .execute(CommandContext { args: Vec::new(), session: &mut session })
            .await;
        assert_eq!(result.unwrap(), "/\n");
    }

    #[tokio::test]
    async fn test_pwd_nested() {
        let mut session = session_with(&["home/user/"]);
        session.cwd = session.vfs.resolve(session.cwd, "/home/user").unwrap();
        let result = PwdCommand
            .execute(CommandContext { args: Vec::new(), session: &mut session })
            .await;
        assert_eq!(result.unwrap(), "/home/user\n");
    }

    #[tokio::test]
    async fn test_pwd_rejects_args() {
        let mut session = session_with(&[]);
        let result = PwdCommand
            .execute(CommandContext { args: vec!["extra".into()], session: &mut session })
            .await;
        assert_eq!(result.unwrap_err().to_string(), "pwd: no arguments expected");
    }
}
