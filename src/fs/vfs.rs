//! In-Memory File System Implementation
//!
//! Nodes live in an arena owned by [`Vfs`]; parents and children refer to
//! each other by [`NodeId`]. Nodes are never freed: moving only relinks.

use super::types::*;
use super::walk::Walk;

/// In-memory directory tree.
#[derive(Debug, Clone)]
pub struct Vfs {
    nodes: Vec<Node>,
}

impl Vfs {
    /// Create a tree holding only the root directory.
    pub fn new() -> Self {
        Self { nodes: vec![Node::directory("", None)] }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Borrow a node. Ids are only handed out by this tree, so they are
    /// always in bounds.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Absolute path of a node, `/` for the root.
    pub fn path_of(&self, id: NodeId) -> String {
        let mut parts = Vec::new();
        let mut current = id;
        while let Some(parent) = self.node(current).parent {
            parts.push(self.node(current).name.as_str());
            current = parent;
        }
        if parts.is_empty() {
            return "/".to_string();
        }
        parts.reverse();
        format!("/{}", parts.join("/"))
    }

    /// Look up a direct child by name.
    pub fn child(&self, dir: NodeId, name: &str) -> Option<NodeId> {
        self.node(dir).children().and_then(|c| c.get(name).copied())
    }

    /// Children of a directory sorted by name.
    pub fn list(&self, dir: NodeId) -> Result<Vec<NodeId>, VfsError> {
        let children = self.node(dir).children().ok_or_else(|| VfsError::NotADirectory {
            path: self.path_of(dir),
        })?;
        let mut entries: Vec<(&String, NodeId)> = children.iter().map(|(n, id)| (n, *id)).collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        Ok(entries.into_iter().map(|(_, id)| id).collect())
    }

    /// Resolve `path` against `base`.
    ///
    /// Absolute paths start at the root. `.` is skipped and `..` climbs one
    /// level (staying put at the root). Errors carry `path` as given.
    pub fn resolve(&self, base: NodeId, path: &str) -> Result<NodeId, VfsError> {
        let mut current = if path.starts_with('/') { self.root() } else { base };

        for part in path.split('/') {
            match part {
                "" | "." => continue,
                ".." => {
                    if let Some(parent) = self.node(current).parent {
                        current = parent;
                    }
                }
                name => {
                    let children = self.node(current).children().ok_or_else(|| {
                        VfsError::NotADirectory { path: path.to_string() }
                    })?;
                    current = *children.get(name).ok_or_else(|| VfsError::NotFound {
                        path: path.to_string(),
                    })?;
                }
            }
        }

        if path.ends_with('/') && !self.node(current).is_directory() {
            return Err(VfsError::NotADirectory { path: path.to_string() });
        }
        Ok(current)
    }

    /// Resolve `path` and require a directory.
    pub fn resolve_dir(&self, base: NodeId, path: &str) -> Result<NodeId, VfsError> {
        let id = self.resolve(base, path)?;
        if !self.node(id).is_directory() {
            return Err(VfsError::NotADirectory { path: path.to_string() });
        }
        Ok(id)
    }

    /// Create an empty directory under `parent`.
    pub fn create_dir(&mut self, parent: NodeId, name: &str) -> Result<NodeId, VfsError> {
        let node = Node::directory(name, Some(parent));
        self.attach(parent, node)
    }

    /// Create a file under `parent`.
    pub fn create_file(
        &mut self,
        parent: NodeId,
        name: &str,
        content: Vec<u8>,
        binary: bool,
    ) -> Result<NodeId, VfsError> {
        let node = Node::file(name, parent, content, binary);
        self.attach(parent, node)
    }

    fn attach(&mut self, parent: NodeId, node: Node) -> Result<NodeId, VfsError> {
        let name = node.name.clone();
        let parent_path = self.path_of(parent);
        let id = NodeId(self.nodes.len());
        let children = self.nodes[parent.0]
            .children_mut()
            .ok_or_else(|| VfsError::NotADirectory { path: parent_path.clone() })?;
        if children.contains_key(&name) {
            return Err(VfsError::NameConflict { path: join(&parent_path, &name) });
        }
        children.insert(name, id);
        self.nodes.push(node);
        Ok(id)
    }

    /// Overwrite a node's permission bits (masked to [`MODE_MASK`]).
    pub fn set_mode(&mut self, id: NodeId, mode: u32) {
        self.nodes[id.0].mode = mode & MODE_MASK;
    }

    /// True when `ancestor` is `id` or lies on the path from `id` to the root.
    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.node(node).parent;
        }
        false
    }

    /// Detach `src` from its parent and attach it under `dest_dir` as `name`.
    ///
    /// Moving a node onto its own current location is a no-op.
    pub fn move_node(&mut self, src: NodeId, dest_dir: NodeId, name: &str) -> Result<(), VfsError> {
        let old_parent = self.node(src).parent.ok_or(VfsError::MoveRoot)?;

        if !self.node(dest_dir).is_directory() {
            return Err(VfsError::NotADirectory { path: self.path_of(dest_dir) });
        }
        if self.is_ancestor(src, dest_dir) {
            return Err(VfsError::MoveIntoSelf { src: self.path_of(src) });
        }
        match self.child(dest_dir, name) {
            Some(existing) if existing == src => return Ok(()),
            Some(_) => {
                return Err(VfsError::NameConflict {
                    path: join(&self.path_of(dest_dir), name),
                });
            }
            None => {}
        }

        let old_name = self.node(src).name.clone();
        if let Some(children) = self.nodes[old_parent.0].children_mut() {
            children.shift_remove(&old_name);
        }
        if let Some(children) = self.nodes[dest_dir.0].children_mut() {
            children.insert(name.to_string(), src);
        }
        let node = &mut self.nodes[src.0];
        node.name = name.to_string();
        node.parent = Some(dest_dir);
        Ok(())
    }

    /// Lazy pre-order traversal of the subtree rooted at `start`.
    pub fn walk(&self, start: NodeId) -> Walk<'_> {
        Walk::new(self, start)
    }
}

impl Default for Vfs {
    fn default() -> Self {
        Self::new()
    }
}

/// Join a directory path and a child name.
pub(crate) fn join(dir: &str, name: &str) -> String {
    if dir == "/" {
        format!("/{}", name)
    } else {
        format!("{}/{}", dir, name)
    }
}
