use std::iter::Peekable;
use std::path::{Path, PathBuf};
use std::vec;

use tracing::{debug, warn};

use super::filter::{DEFAULT_IGNORE, EntryFilter};
use crate::fs::FileSystem;
use crate::models::{Node, NodeId};

/// Options controlling which entries the tree shows.
#[derive(Debug, Clone)]
pub struct TreeOptions {
    /// Pipe-separated names to hide (e.g., "node_modules|dist|*.log")
    pub ignore_pattern: Option<String>,
    /// Whether to show entries whose name starts with '.'
    pub show_hidden: bool,
}

impl Default for TreeOptions {
    fn default() -> Self {
        Self {
            ignore_pattern: Some(DEFAULT_IGNORE.to_owned()),
            show_hidden: false,
        }
    }
}

/// A partially expanded project tree kept as a single pre-order list.
///
/// Only directories the user expanded have their children in the list.
/// While a directory is expanded the list holds its live children; on
/// collapse they are folded back into the directory's cache, nested
/// expansion state included, so the next expansion is served from memory.
pub struct FileTree<F> {
    fs: F,
    filter: EntryFilter,
    root: Option<PathBuf>,
    nodes: Vec<Node>,
}

impl<F: FileSystem> FileTree<F> {
    /// Returns an error if the ignore pattern is invalid.
    pub fn new(fs: F, options: &TreeOptions) -> anyhow::Result<Self> {
        let filter = EntryFilter::new(options.ignore_pattern.as_deref(), options.show_hidden)?;
        Ok(Self::with_filter(fs, filter))
    }

    pub fn with_filter(fs: F, filter: EntryFilter) -> Self {
        Self {
            fs,
            filter,
            root: None,
            nodes: Vec::new(),
        }
    }

    pub fn fs(&self) -> &F {
        &self.fs
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    /// The flat list, in display order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// Looks a visible node up by its relative path and depth.
    pub fn find(&self, path: &str, depth: usize) -> Option<NodeId> {
        self.nodes
            .iter()
            .find(|node| node.depth == depth && node.path == path)
            .map(|node| node.id)
    }

    /// Replaces the tree with the top level of `dir`.
    ///
    /// A listing failure keeps the current list and is only logged.
    pub async fn open_root(&mut self, dir: &Path) -> &[Node] {
        match self.fs.read_dir(dir).await {
            Ok(entries) => {
                self.nodes = self
                    .filter
                    .prepare(entries)
                    .into_iter()
                    .filter_map(|entry| Node::from_entry(entry, None, 0))
                    .collect();
                self.root = Some(dir.to_path_buf());
                debug!(root = %dir.display(), entries = self.nodes.len(), "opened project root");
            }
            Err(err) => {
                warn!(root = %dir.display(), error = %err, "cannot open project root");
            }
        }
        &self.nodes
    }

    /// Expands a collapsed directory or collapses an expanded one.
    ///
    /// Files and ids not in the list leave the tree untouched, as does a
    /// failed directory read.
    pub async fn toggle(&mut self, id: NodeId) -> &[Node] {
        let Some(index) = self.position(id) else {
            debug!(%id, "toggle ignored, node is not visible");
            return &self.nodes;
        };

        let Some(expanded) = self.nodes[index].dir_state().map(|state| state.expanded) else {
            return &self.nodes;
        };

        if expanded {
            self.collapse_at(index);
        } else {
            self.expand_at(index).await;
        }
        &self.nodes
    }

    /// Expands every directory along `path` (e.g. `src/core`) and returns the
    /// node it names. Stops at the first segment that is not visible.
    pub async fn expand_path(&mut self, path: &str) -> Option<NodeId> {
        let mut current = String::new();
        let mut found = None;

        for (depth, segment) in path.split('/').filter(|s| !s.is_empty()).enumerate() {
            if let Some(id) = found
                && !self.get(id).is_some_and(Node::is_expanded)
            {
                self.toggle(id).await;
                if !self.get(id).is_some_and(Node::is_expanded) {
                    return None;
                }
            }

            if !current.is_empty() {
                current.push('/');
            }
            current.push_str(segment);

            match self.find(&current, depth) {
                Some(id) => found = Some(id),
                None => {
                    debug!(path = %current, "no such entry in project tree");
                    return None;
                }
            }
        }

        if let Some(id) = found
            && self.get(id).is_some_and(|node| node.is_dir() && !node.is_expanded())
        {
            self.toggle(id).await;
        }
        found
    }

    fn position(&self, id: NodeId) -> Option<usize> {
        self.nodes.iter().position(|node| node.id == id)
    }

    /// One past the last descendant of the node at `index`.
    fn subtree_end(&self, index: usize) -> usize {
        let parent = &self.nodes[index];
        let descendants = self.nodes[index + 1..]
            .iter()
            .take_while(|node| node.is_descendant_of(parent))
            .count();
        index + 1 + descendants
    }

    fn collapse_at(&mut self, index: usize) {
        let end = self.subtree_end(index);
        let removed: Vec<Node> = self.nodes.drain(index + 1..end).collect();
        let child_depth = self.nodes[index].depth + 1;
        let children = fold_children(&mut removed.into_iter().peekable(), child_depth);

        let node = &mut self.nodes[index];
        debug!(path = %node.path, "collapsed directory");
        if let Some(state) = node.dir_state_mut() {
            state.expanded = false;
            state.children = children;
        }
    }

    async fn expand_at(&mut self, index: usize) {
        let node = &mut self.nodes[index];
        let cached = match node.dir_state_mut() {
            Some(state) if state.children_loaded => Some(std::mem::take(&mut state.children)),
            _ => None,
        };

        let children = match cached {
            Some(children) => {
                debug!(path = %node.path, "expanding directory from cache");
                children
            }
            None => {
                let location = node.location.clone();
                let path = node.path.clone();
                let depth = node.depth + 1;
                match self.load_children(&location, &path, depth).await {
                    Ok(children) => children,
                    Err(err) => {
                        warn!(path = %path, error = %err, "cannot expand directory");
                        return;
                    }
                }
            }
        };

        let visible = flatten(children);
        if let Some(state) = self.nodes[index].dir_state_mut() {
            state.expanded = true;
            state.children_loaded = true;
        }
        self.nodes.splice(index + 1..index + 1, visible);
    }

    async fn load_children(
        &self,
        location: &Path,
        parent_path: &str,
        depth: usize,
    ) -> anyhow::Result<Vec<Node>> {
        let entries = self.fs.read_dir(location).await?;
        Ok(self
            .filter
            .prepare(entries)
            .into_iter()
            .filter_map(|entry| Node::from_entry(entry, Some(parent_path), depth))
            .collect())
    }
}

/// Pre-order expansion of cached children, descending into those that were
/// expanded when their parent collapsed.
fn flatten(children: Vec<Node>) -> Vec<Node> {
    let mut out = Vec::with_capacity(children.len());
    for mut child in children {
        let nested = match child.dir_state_mut() {
            Some(state) if state.expanded => std::mem::take(&mut state.children),
            _ => Vec::new(),
        };
        out.push(child);
        out.extend(flatten(nested));
    }
    out
}

/// Inverse of [`flatten`]: rebuilds the nested cache from a removed run.
fn fold_children(run: &mut Peekable<vec::IntoIter<Node>>, depth: usize) -> Vec<Node> {
    let mut children = Vec::new();
    while let Some(mut node) = run.next_if(|node| node.depth == depth) {
        if node.is_expanded() {
            let nested = fold_children(run, depth + 1);
            if let Some(state) = node.dir_state_mut() {
                state.children = nested;
            }
        }
        children.push(node);
    }
    children
}
