//! cd - Change directory
//!
//! Supports absolute and relative paths, `.` and `..` (which stops at the
//! root).

use async_trait::async_trait;
use crate::commands::{Command, CommandContext, CommandResult};
use crate::error::{ShellError, VfsResultExt};

pub struct CdCommand;

const HELP: &str = "Usage: cd PATH

Change the current directory to PATH.";

#[async_trait]
impl Command for CdCommand {
    fn name(&self) -> &'static str {
        "cd"
    }

    fn help(&self) -> &'static str {
        HELP
    }

    async fn execute(&self, ctx: CommandContext<'_>) -> CommandResult {
        let target = match ctx.args.as_slice() {
            [target] => target,
            _ => return Err(ShellError::usage("cd", "expected exactly one argument")),
        };
        let session = ctx.session;
        session.cwd = session.vfs.resolve_dir(session.cwd, target).for_command("cd")?;
        Ok(String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::pwd::PwdCommand;
    use crate::shell::session::test_support::session_with;
    use crate::shell::Session;

    async fn cd(session: &mut Session, args: &[&str]) -> CommandResult {
        let ctx = CommandContext {
            args: args.iter().map(|s| s.to_string()).collect(),
            session,
        };
        CdCommand.execute(ctx).await
    }

    async fn pwd(session: &mut Session) -> String {
        PwdCommand
            .execute(CommandContext { args: Vec::new(), session })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_cd_then_pwd_roundtrip() {
        let mut session = session_with(&["home/user/projects/", "etc/"]);
        for (path, expected) in [
            ("/home/user", "/home/user\n"),
            ("projects", "/home/user/projects\n"),
            ("..", "/home/user\n"),
            ("./projects/../../user/", "/home/user\n"),
            ("/", "/\n"),
            ("../..", "/\n"),
            ("/etc", "/etc\n"),
        ] {
            cd(&mut session, &[path]).await.unwrap();
            assert_eq!(pwd(&mut session).await, expected, "cd {}", path);
        }
    }

    #[tokio::test]
    async fn test_cd_errors_keep_cwd() {
        let mut session = session_with(&["docs/readme.txt"]);
        cd(&mut session, &["docs"]).await.unwrap();

        let err = cd(&mut session, &["nope"]).await.unwrap_err();
        assert_eq!(err.to_string(), "cd: no such file or directory: nope");

        let err = cd(&mut session, &["readme.txt"]).await.unwrap_err();
        assert_eq!(err.to_string(), "cd: not a directory: readme.txt");

        assert!(matches!(cd(&mut session, &[]).await, Err(ShellError::Usage { .. })));
        assert!(matches!(cd(&mut session, &["a", "b"]).await, Err(ShellError::Usage { .. })));
        assert_eq!(pwd(&mut session).await, "/docs\n");
    }
}
