mod entry;
mod node;
mod search;

pub use entry::{EntryKind, FsEntry};
pub use node::{DirState, Node, NodeId, NodeKind};
pub use search::{MatchType, SearchResult};
