pub mod filter;
pub mod render;
pub mod search;
pub mod tree;
pub mod workspace;

pub use filter::{DEFAULT_IGNORE, EntryFilter, IgnorePatterns};
pub use search::{SearchCoordinator, SearchOptions, search};
pub use tree::{FileTree, TreeOptions};
pub use workspace::{OpenedFile, open_file, open_result, save_file};
