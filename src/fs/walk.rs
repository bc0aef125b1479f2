//! Depth-first tree traversal.

use super::types::NodeId;
use super::vfs::Vfs;

/// One step of a [`Walk`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkEntry {
    pub id: NodeId,
    /// 0 for the starting node.
    pub depth: usize,
    /// For each level from 1 to `depth`: whether the node on the path at
    /// that level is the last of its siblings.
    pub last: Vec<bool>,
}

impl WalkEntry {
    /// Whether this node is the last of its siblings (false for the start).
    pub fn is_last(&self) -> bool {
        self.last.last().copied().unwrap_or(false)
    }
}

/// Lazy pre-order iterator over a subtree, children visited in name order.
///
/// A directory's children are only looked up when the directory itself is
/// yielded. Once exhausted it stays exhausted.
pub struct Walk<'a> {
    vfs: &'a Vfs,
    stack: Vec<WalkEntry>,
}

impl<'a> Walk<'a> {
    pub(crate) fn new(vfs: &'a Vfs, start: NodeId) -> Self {
        Self {
            vfs,
            stack: vec![WalkEntry { id: start, depth: 0, last: Vec::new() }],
        }
    }
}

impl Iterator for Walk<'_> {
    type Item = WalkEntry;

    fn next(&mut self) -> Option<WalkEntry> {
        let entry = self.stack.pop()?;
        if let Ok(children) = self.vfs.list(entry.id) {
            let count = children.len();
            for (idx, child) in children.into_iter().enumerate().rev() {
                let mut last = entry.last.clone();
                last.push(idx + 1 == count);
                self.stack.push(WalkEntry { id: child, depth: entry.depth + 1, last });
            }
        }
        Some(entry)
    }
}
