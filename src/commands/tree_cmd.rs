use async_trait::async_trait;
use crate::commands::{Command, CommandContext, CommandResult};
use crate::error::{ShellError, VfsResultExt};
use crate::fs::{Vfs, WalkEntry};

pub struct TreeCommand;

const HELP: &str = "Usage: tree [PATH]

List the contents of PATH (default: current directory) depth-first in a
tree-like format, followed by directory and file counts.";

/// Indentation for one walk entry: one column per ancestor level, then
/// the connector for the entry itself.
fn line_prefix(entry: &WalkEntry) -> String {
    let mut prefix = String::new();
    if let Some((own, ancestors)) = entry.last.split_last() {
        for &ancestor_last in ancestors {
            prefix.push_str(if ancestor_last { "    " } else { "|   " });
        }
        prefix.push_str(if *own { "`-- " } else { "|-- " });
    }
    prefix
}

fn summary(dirs: usize, files: usize) -> String {
    format!(
        "{} director{}, {} file{}\n",
        dirs,
        if dirs == 1 { "y" } else { "ies" },
        files,
        if files == 1 { "" } else { "s" }
    )
}

fn render(vfs: &Vfs, start: crate::fs::NodeId, label: &str) -> String {
    let mut output = String::new();
    let mut dir_count = 0usize;
    let mut file_count = 0usize;

    for entry in vfs.walk(start) {
        let node = vfs.node(entry.id);
        if entry.depth == 0 {
            output.push_str(label);
            output.push('\n');
            if node.is_file() {
                file_count += 1;
            }
            continue;
        }
        if node.is_directory() {
            dir_count += 1;
        } else {
            file_count += 1;
        }
        output.push_str(&line_prefix(&entry));
        output.push_str(node.name());
        output.push('\n');
    }

    output.push('\n');
    output.push_str(&summary(dir_count, file_count));
    output
}

#[async_trait]
impl Command for TreeCommand {
    fn name(&self) -> &'static str {
        "tree"
    }

    fn help(&self) -> &'static str {
        HELP
    }

    async fn execute(&self, ctx: CommandContext<'_>) -> CommandResult {
        if ctx.args.len() > 1 {
            return Err(ShellError::usage("tree", "expected at most one path"));
        }
        let session = ctx.session;
        let path = ctx.args.first().map(String::as_str).unwrap_or(".");
        let start = session.vfs.resolve(session.cwd, path).for_command("tree")?;
        Ok(render(&session.vfs, start, path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::session::test_support::session_with;
    use crate::shell::Session;

    async fn tree(session: &mut Session, args: &[&str]) -> CommandResult {
        let ctx = CommandContext {
            args: args.iter().map(|s| s.to_string()).collect(),
            session,
        };
        TreeCommand.execute(ctx).await
    }

    #[tokio::test]
    async fn test_tree_layout() {
        let mut session = session_with(&["a/x.txt", "a/sub/y.txt", "b.txt"]);
        let out = tree(&mut session, &[]).await.unwrap();
        let expected = "\
.
|-- a
|   |-- sub
|   |   `-- y.txt
|   `-- x.txt
`-- b.txt

2 directories, 3 files
";
        assert_eq!(out, expected);
    }

    #[tokio::test]
    async fn test_tree_subdirectory_and_depth() {
        let mut session = session_with(&["l1/l2/l3/leaf.txt"]);
        let out = tree(&mut session, &["/l1"]).await.unwrap();
        assert!(out.starts_with("/l1\n"));
        assert!(out.contains("        `-- leaf.txt\n"));
        assert!(out.ends_with("2 directories, 1 file\n"));
    }

    #[tokio::test]
    async fn test_tree_on_file_and_empty_dir() {
        let mut session = session_with(&["empty/", "f.txt"]);
        let out = tree(&mut session, &["f.txt"]).await.unwrap();
        assert_eq!(out, "f.txt\n\n0 directories, 1 file\n");

        let out = tree(&mut session, &["empty"]).await.unwrap();
        assert_eq!(out, "empty\n\n0 directories, 0 files\n");
    }

    #[tokio::test]
    async fn test_tree_regenerated_per_invocation() {
        let mut session = session_with(&["a/one.txt"]);
        let first = tree(&mut session, &[]).await.unwrap();
        let second = tree(&mut session, &[]).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_tree_missing_path() {
        let mut session = session_with(&[]);
        let err = tree(&mut session, &["/missing"]).await.unwrap_err();
        assert_eq!(err.to_string(), "tree: no such file or directory: /missing");
    }
}
