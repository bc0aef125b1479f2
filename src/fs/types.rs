//! File System Types
//!
//! Core types for the in-memory tree: node handles, node payloads and the
//! errors raised while navigating or mutating the tree.

use indexmap::IndexMap;
use thiserror::Error;

/// Default mode for directories created by the loader.
pub const DEFAULT_DIR_MODE: u32 = 0o755;

/// Default mode for files created by the loader.
pub const DEFAULT_FILE_MODE: u32 = 0o644;

/// Permission bits a node may carry (rwx triads plus setuid/setgid/sticky).
pub const MODE_MASK: u32 = 0o7777;

/// Virtual file system errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VfsError {
    #[error("no such file or directory: {path}")]
    NotFound { path: String },

    #[error("not a directory: {path}")]
    NotADirectory { path: String },

    #[error("name already exists: {path}")]
    NameConflict { path: String },

    #[error("cannot move '{src}' into itself or a subdirectory of itself")]
    MoveIntoSelf { src: String },

    #[error("cannot move the root directory")]
    MoveRoot,
}

/// Handle to a node inside a [`Vfs`](super::Vfs) arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

/// Node payload.
#[derive(Debug, Clone)]
pub enum NodeKind {
    File {
        content: Vec<u8>,
        /// Content was decoded from a `.b64` archive entry.
        binary: bool,
    },
    Directory {
        /// Children in insertion order.
        children: IndexMap<String, NodeId>,
    },
}

/// A file or directory in the tree.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) name: String,
    pub(crate) mode: u32,
    pub(crate) parent: Option<NodeId>,
    pub(crate) kind: NodeKind,
}

impl Node {
    pub(crate) fn directory(name: &str, parent: Option<NodeId>) -> Self {
        Self {
            name: name.to_string(),
            mode: DEFAULT_DIR_MODE,
            parent,
            kind: NodeKind::Directory { children: IndexMap::new() },
        }
    }

    pub(crate) fn file(name: &str, parent: NodeId, content: Vec<u8>, binary: bool) -> Self {
        Self {
            name: name.to_string(),
            mode: DEFAULT_FILE_MODE,
            parent: Some(parent),
            kind: NodeKind::File { content, binary },
        }
    }

    /// Basename; empty for the root.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mode(&self) -> u32 {
        self.mode
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn is_directory(&self) -> bool {
        matches!(self.kind, NodeKind::Directory { .. })
    }

    pub fn is_file(&self) -> bool {
        matches!(self.kind, NodeKind::File { .. })
    }

    pub fn is_binary(&self) -> bool {
        matches!(self.kind, NodeKind::File { binary: true, .. })
    }

    /// Content length in bytes (0 for directories).
    pub fn size(&self) -> u64 {
        match &self.kind {
            NodeKind::File { content, .. } => content.len() as u64,
            NodeKind::Directory { .. } => 0,
        }
    }

    pub fn content(&self) -> Option<&[u8]> {
        match &self.kind {
            NodeKind::File { content, .. } => Some(content),
            NodeKind::Directory { .. } => None,
        }
    }

    pub(crate) fn children(&self) -> Option<&IndexMap<String, NodeId>> {
        match &self.kind {
            NodeKind::Directory { children } => Some(children),
            NodeKind::File { .. } => None,
        }
    }

    pub(crate) fn children_mut(&mut self) -> Option<&mut IndexMap<String, NodeId>> {
        match &mut self.kind {
            NodeKind::Directory { children } => Some(children),
            NodeKind::File { .. } => None,
        }
    }
}

/// Render a mode as `ls -l` does, e.g. `drwxr-xr-x`.
pub fn format_mode(mode: u32, is_dir: bool) -> String {
    let file_type = if is_dir { 'd' } else { '-' };

    let perms = [
        if mode & 0o400 != 0 { 'r' } else { '-' },
        if mode & 0o200 != 0 { 'w' } else { '-' },
        exec_char(mode & 0o100 != 0, mode & 0o4000 != 0, 's'),
        if mode & 0o040 != 0 { 'r' } else { '-' },
        if mode & 0o020 != 0 { 'w' } else { '-' },
        exec_char(mode & 0o010 != 0, mode & 0o2000 != 0, 's'),
        if mode & 0o004 != 0 { 'r' } else { '-' },
        if mode & 0o002 != 0 { 'w' } else { '-' },
        exec_char(mode & 0o001 != 0, mode & 0o1000 != 0, 't'),
    ];

    format!("{}{}", file_type, perms.iter().collect::<String>())
}

fn exec_char(exec: bool, special: bool, marker: char) -> char {
    match (exec, special) {
        (true, true) => marker,
        (false, true) => marker.to_ascii_uppercase(),
        (true, false) => 'x',
        (false, false) => '-',
    }
}
