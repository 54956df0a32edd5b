//! Forest construction from flat path descriptors, plus the filter and sort
//! helpers the renderer applies to sibling lists.

mod build;
pub(crate) mod order;

use std::time::SystemTime;

use crate::render::render;
use crate::settings::TreeSettings;

pub use build::build_forest;
pub use order::ExcludeSet;

/// One file as reported by a descriptor source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathDescriptor {
    /// Slash-delimited path relative to the upload root.
    pub relative_path: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Last modification time.
    pub modified_at: SystemTime,
}

impl PathDescriptor {
    pub fn new(relative_path: impl Into<String>, size_bytes: u64, modified_at: SystemTime) -> Self {
        Self {
            relative_path: relative_path.into(),
            size_bytes,
            modified_at,
        }
    }

    /// Descriptor with zero size and an epoch timestamp.
    pub fn from_path(relative_path: impl Into<String>) -> Self {
        Self::new(relative_path, 0, SystemTime::UNIX_EPOCH)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    File,
    Folder,
}

/// A file or folder in the forest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Final path segment.
    pub name: String,
    pub kind: NodeKind,
    /// Full slash-joined path from the forest root.
    pub path: String,
    /// Children in build-time insertion order. Always empty for files.
    pub children: Vec<Node>,
    /// Size in bytes (files only).
    pub size_bytes: Option<u64>,
    /// Last modification time (files only).
    pub modified_at: Option<SystemTime>,
}

impl Node {
    pub fn is_folder(&self) -> bool {
        self.kind == NodeKind::Folder
    }

    pub fn is_file(&self) -> bool {
        self.kind == NodeKind::File
    }
}

/// The immutable result of a build: an ordered list of top-level nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Forest {
    roots: Vec<Node>,
}

// Dropping nested `Vec<Node>`s recurses once per level; unlink them first.
impl Drop for Forest {
    fn drop(&mut self) {
        let mut stack = std::mem::take(&mut self.roots);
        while let Some(mut node) = stack.pop() {
            stack.append(&mut node.children);
        }
    }
}

impl Forest {
    pub(crate) fn from_roots(roots: Vec<Node>) -> Self {
        Self { roots }
    }

    /// Top-level nodes in insertion order.
    pub fn roots(&self) -> &[Node] {
        &self.roots
    }

    /// Number of top-level nodes.
    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Total number of nodes at every level.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack: Vec<&Node> = self.roots.iter().collect();
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.iter());
        }
        count
    }

    /// Look up a node by its full slash-joined path.
    pub fn find(&self, path: &str) -> Option<&Node> {
        let mut level = self.roots.as_slice();
        let mut found = None;
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            let node = level.iter().find(|n| n.name == segment)?;
            level = &node.children;
            found = Some(node);
        }
        found
    }

    /// Render this forest with the given settings.
    pub fn render(&self, settings: &TreeSettings) -> String {
        render(self, settings)
    }
}
