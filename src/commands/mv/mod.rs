// src/commands/mv/mod.rs
use async_trait::async_trait;
use crate::commands::{Command, CommandContext, CommandResult};
use crate::error::{ShellError, VfsResultExt};
use crate::fs::{NodeId, Vfs, VfsError};

pub struct MvCommand;

const HELP: &str = "Usage: mv SOURCE DEST

Rename SOURCE to DEST, or move SOURCE into DEST if DEST is an existing
directory. Fails if the final name is already taken.";

/// Where a node lands: the directory it is attached under and its new name.
fn destination(vfs: &Vfs, cwd: NodeId, src: NodeId, dest: &str) -> Result<(NodeId, String), VfsError> {
    if dest.is_empty() {
        return Err(VfsError::NotFound { path: dest.to_string() });
    }
    if let Ok(existing) = vfs.resolve(cwd, dest) {
        if vfs.node(existing).is_directory() {
            return Ok((existing, vfs.node(src).name().to_string()));
        }
    }

    let trimmed = dest.trim_end_matches('/');
    let (parent, name) = match trimmed.rfind('/') {
        Some(0) => ("/", &trimmed[1..]),
        Some(pos) => (&trimmed[..pos], &trimmed[pos + 1..]),
        None => (".", trimmed),
    };
    if name.is_empty() || name == "." || name == ".." {
        return Err(VfsError::NotFound { path: dest.to_string() });
    }
    let parent = vfs.resolve_dir(cwd, parent)?;
    Ok((parent, name.to_string()))
}

#[async_trait]
impl Command for MvCommand {
    fn name(&self) -> &'static str {
        "mv"
    }

    fn help(&self) -> &'static str {
        HELP
    }

    async fn execute(&self, ctx: CommandContext<'_>) -> CommandResult {
        let (src, dest) = match ctx.args.as_slice() {
            [src, dest] => (src, dest),
            [] | [_] => return Err(ShellError::usage("mv", "missing destination file operand")),
            _ => return Err(ShellError::usage("mv", "expected SOURCE DEST")),
        };
        let session = ctx.session;
        let vfs = &mut session.vfs;

        let src_id = vfs.resolve(session.cwd, src).for_command("mv")?;
        let (dest_dir, name) = destination(vfs, session.cwd, src_id, dest).for_command("mv")?;
        vfs.move_node(src_id, dest_dir, &name).for_command("mv")?;

        Ok(String::new())
    }
}
