mod real;

#[cfg(test)]
mod mock;

pub use real::RealFileSystem;

#[cfg(test)]
pub use mock::MockFileSystem;

use anyhow::Result;
use async_trait::async_trait;
use std::path::Path;

use crate::models::FsEntry;

/// Storage provider behind the tree, search and workspace.
#[async_trait]
pub trait FileSystem: Send + Sync {
    /// Immediate children of `dir`, unfiltered and unsorted.
    async fn read_dir(&self, dir: &Path) -> Result<Vec<FsEntry>>;

    /// Full text of a file. Binary content is an error.
    async fn read_text(&self, file: &Path) -> Result<String>;

    async fn write_text(&self, file: &Path, text: &str) -> Result<()>;
}
