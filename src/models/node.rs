use std::fmt;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use super::{EntryKind, FsEntry};

/// Opaque, process-unique identity of a tree node.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct NodeId(u64);

impl NodeId {
    pub fn next() -> Self {
        static NEXT_ID: AtomicU64 = AtomicU64::new(1);
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// Expansion state of a directory node.
///
/// `children` outlives a collapse so that re-expanding never goes back to
/// storage once `children_loaded` is set.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DirState {
    pub expanded: bool,
    pub children_loaded: bool,
    pub children: Vec<Node>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum NodeKind {
    File,
    Directory(DirState),
}

/// A file or directory as it appears in the flat list.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    /// Slash-joined path relative to the project root.
    pub path: String,
    /// Nesting level; the root's children sit at depth 0.
    pub depth: usize,
    /// Where the storage provider finds this entry.
    pub location: PathBuf,
    pub kind: NodeKind,
}

impl Node {
    /// Builds a node for a listed entry. Entries that are neither files,
    /// directories nor symlinks have no place in the tree.
    pub fn from_entry(entry: FsEntry, parent_path: Option<&str>, depth: usize) -> Option<Self> {
        let kind = match entry.kind {
            EntryKind::Directory => NodeKind::Directory(DirState::default()),
            EntryKind::File | EntryKind::Symlink => NodeKind::File,
            EntryKind::Other => return None,
        };

        let path = match parent_path {
            Some(parent) => format!("{parent}/{}", entry.name),
            None => entry.name.clone(),
        };

        Some(Self {
            id: NodeId::next(),
            name: entry.name,
            path,
            depth,
            location: entry.path,
            kind,
        })
    }

    pub fn is_dir(&self) -> bool {
        matches!(self.kind, NodeKind::Directory(_))
    }

    pub fn is_file(&self) -> bool {
        matches!(self.kind, NodeKind::File)
    }

    pub fn dir_state(&self) -> Option<&DirState> {
        match &self.kind {
            NodeKind::Directory(state) => Some(state),
            NodeKind::File => None,
        }
    }

    pub fn dir_state_mut(&mut self) -> Option<&mut DirState> {
        match &mut self.kind {
            NodeKind::Directory(state) => Some(state),
            NodeKind::File => None,
        }
    }

    pub fn is_expanded(&self) -> bool {
        self.dir_state().is_some_and(|state| state.expanded)
    }

    pub fn children_loaded(&self) -> bool {
        self.dir_state().is_some_and(|state| state.children_loaded)
    }

    /// Children held back for the next expansion.
    ///
    /// Empty while the directory is expanded: its children are then the run
    /// that follows it in the flat list, and collapsing moves them back here.
    pub fn cached_children(&self) -> &[Node] {
        self.dir_state()
            .map(|state| state.children.as_slice())
            .unwrap_or(&[])
    }

    /// True when `self` lies somewhere below `ancestor`.
    pub fn is_descendant_of(&self, ancestor: &Node) -> bool {
        self.depth > ancestor.depth
            && self
                .path
                .strip_prefix(ancestor.path.as_str())
                .is_some_and(|rest| rest.starts_with('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        let a = NodeId::next();
        let b = NodeId::next();
        assert_ne!(a, b);
    }

    #[test]
    fn child_path_is_joined_with_parent() {
        let node = Node::from_entry(FsEntry::file("/p/src/main.rs"), Some("src"), 1).unwrap();
        assert_eq!(node.path, "src/main.rs");
        assert_eq!(node.name, "main.rs");
        assert_eq!(node.depth, 1);
        assert!(node.is_file());
    }

    #[test]
    fn directories_start_collapsed_and_unloaded() {
        let node = Node::from_entry(FsEntry::dir("/p/src"), None, 0).unwrap();
        assert!(node.is_dir());
        assert!(!node.is_expanded());
        assert!(!node.children_loaded());
        assert!(node.cached_children().is_empty());
    }

    #[test]
    fn other_entries_are_dropped() {
        let entry = FsEntry::new("/p/fifo", EntryKind::Other);
        assert!(Node::from_entry(entry, None, 0).is_none());
    }

    #[test]
    fn descendant_check_requires_separator() {
        let src = Node::from_entry(FsEntry::dir("/p/src"), None, 0).unwrap();
        let inside = Node::from_entry(FsEntry::file("/p/src/lib.rs"), Some("src"), 1).unwrap();
        let sibling = Node::from_entry(FsEntry::file("/p/src2/lib.rs"), Some("src2"), 1).unwrap();

        assert!(inside.is_descendant_of(&src));
        assert!(!sibling.is_descendant_of(&src));
        assert!(!src.is_descendant_of(&src));
    }
}
