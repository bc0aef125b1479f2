//! Per-process shell state.

use crate::archive::LoadedVfs;
use crate::config::ShellConfig;
use crate::fs::{NodeId, Vfs};

/// Mutable state of one running shell: the tree it navigates, the current
/// directory and the command history. Handed to every command explicitly.
#[derive(Debug, Clone)]
pub struct Session {
    pub vfs: Vfs,
    /// Display name of the loaded tree, shown in the prompt.
    pub vfs_name: String,
    pub cwd: NodeId,
    pub history: Vec<String>,
    pub config: ShellConfig,
}

impl Session {
    pub fn new(loaded: LoadedVfs, config: ShellConfig) -> Self {
        Self::from_vfs(loaded.vfs, &loaded.name, config)
    }

    /// Start at the root of `vfs` with an empty history.
    pub fn from_vfs(vfs: Vfs, vfs_name: &str, config: ShellConfig) -> Self {
        let cwd = vfs.root();
        Self {
            vfs,
            vfs_name: vfs_name.to_string(),
            cwd,
            history: Vec::new(),
            config,
        }
    }

    pub fn cwd_path(&self) -> String {
        self.vfs.path_of(self.cwd)
    }

    /// `[vfs_name] /cwd$ `
    pub fn prompt(&self) -> String {
        format!("[{}] {}$ ", self.vfs_name, self.cwd_path())
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::session_with;

    #[test]
    fn test_prompt_tracks_cwd() {
        let mut session = session_with(&["docs/readme.txt"]);
        assert_eq!(session.prompt(), "[test] /$ ");
        session.cwd = session.vfs.resolve(session.cwd, "docs").unwrap();
        assert_eq!(session.prompt(), "[test] /docs$ ");
        assert!(session.history.is_empty());
    }
}
