// src/commands/ls/mod.rs
use async_trait::async_trait;
use crate::commands::{Command, CommandContext, CommandResult};
use crate::error::{ShellError, VfsResultExt};
use crate::fs::{format_mode, NodeId, Vfs};

pub struct LsCommand;

const HELP: &str = "Usage: ls [PATH]

List directory contents in long format, sorted by name.
Each line shows mode, kind (dir, txt, bin), size in bytes and name.";

/// `drwxr-xr-x  dir         -  docs`
fn format_entry(vfs: &Vfs, id: NodeId) -> String {
    let node = vfs.node(id);
    let is_dir = node.is_directory();
    let kind = if is_dir {
        "dir"
    } else if node.is_binary() {
        "bin"
    } else {
        "txt"
    };
    let size = if is_dir { "-".to_string() } else { node.size().to_string() };
    format!("{}  {}  {:>8}  {}", format_mode(node.mode(), is_dir), kind, size, node.name())
}

#[async_trait]
impl Command for LsCommand {
    fn name(&self) -> &'static str {
        "ls"
    }

    fn help(&self) -> &'static str {
        HELP
    }

    async fn execute(&self, ctx: CommandContext<'_>) -> CommandResult {
        if ctx.args.len() > 1 {
            return Err(ShellError::usage("ls", "expected at most one path"));
        }
        let session = ctx.session;
        let path = ctx.args.first().map(String::as_str).unwrap_or(".");
        let target = session.vfs.resolve(session.cwd, path).for_command("ls")?;

        let entries = if session.vfs.node(target).is_directory() {
            session.vfs.list(target).for_command("ls")?
        } else {
            vec![target]
        };

        let mut stdout = String::new();
        for id in entries {
            stdout.push_str(&format_entry(&session.vfs, id));
            stdout.push('\n');
        }
        Ok(stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::session::test_support::session_with;
    use crate::shell::Session;

    async fn ls(session: &mut Session, args: &[&str]) -> CommandResult {
        let ctx = CommandContext {
            args: args.iter().map(|s| s.to_string()).collect(),
            session,
        };
        LsCommand.execute(ctx).await
    }

    #[tokio::test]
    async fn test_ls_cwd_sorted_long_format() {
        let mut session = session_with(&["zeta.txt", "alpha/", "docs/readme.txt"]);
        let out = ls(&mut session, &[]).await.unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "drwxr-xr-x  dir         -  alpha");
        assert_eq!(lines[1], "drwxr-xr-x  dir         -  docs");
        assert_eq!(lines[2], "-rw-r--r--  txt         8  zeta.txt");
    }

    #[tokio::test]
    async fn test_ls_path_argument() {
        let mut session = session_with(&["docs/readme.txt", "docs/guide.md"]);
        let out = ls(&mut session, &["/docs"]).await.unwrap();
        assert!(out.contains("guide.md"));
        assert!(out.contains("readme.txt"));
        assert!(!out.contains("docs"));
    }

    #[tokio::test]
    async fn test_ls_file_lists_itself() {
        let mut session = session_with(&["docs/readme.txt"]);
        let out = ls(&mut session, &["docs/readme.txt"]).await.unwrap();
        assert_eq!(out.lines().count(), 1);
        assert!(out.ends_with("readme.txt\n"));
    }

    #[tokio::test]
    async fn test_ls_binary_kind() {
        let mut session = session_with(&["docs/"]);
        let root = session.vfs.root();
        session.vfs.create_file(root, "logo.png", vec![0x89, 0x50], true).unwrap();
        let out = ls(&mut session, &["logo.png"]).await.unwrap();
        assert!(out.starts_with("-rw-r--r--  bin  "));
    }

    #[tokio::test]
    async fn test_ls_errors() {
        let mut session = session_with(&["docs/readme.txt"]);
        let err = ls(&mut session, &["/missing"]).await.unwrap_err();
        assert_eq!(err.to_string(), "ls: no such file or directory: /missing");

        let err = ls(&mut session, &["docs/readme.txt/x"]).await.unwrap_err();
        assert!(matches!(err, ShellError::NotADirectory { .. }));

        let err = ls(&mut session, &["a", "b"]).await.unwrap_err();
        assert!(matches!(err, ShellError::Usage { .. }));
    }
}
