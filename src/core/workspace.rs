use std::path::PathBuf;

use tracing::debug;

use crate::assist::detect_language;
use crate::error::{Error, Result};
use crate::fs::FileSystem;
use crate::models::{Node, SearchResult};

/// A file loaded into the editor.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OpenedFile {
    pub name: String,
    /// Project-relative path.
    pub path: String,
    pub location: PathBuf,
    /// Text as last read from or written to storage.
    pub content: String,
    /// Line to reveal once after opening, 1-based.
    pub jump_to_line: Option<usize>,
}

impl OpenedFile {
    /// Returns the pending jump target and clears it.
    pub fn take_jump(&mut self) -> Option<usize> {
        self.jump_to_line.take()
    }

    pub fn editor_language(&self) -> &'static str {
        detect_language(&self.name)
    }
}

/// Reads a file node. `jump_to_line` of 0 means "no jump".
pub async fn open_file<F: FileSystem>(fs: &F, node: &Node, jump_to_line: usize) -> Result<OpenedFile> {
    if !node.is_file() {
        return Err(Error::NotAFile(node.path.clone()));
    }

    let content = fs.read_text(&node.location).await?;
    debug!(path = %node.path, bytes = content.len(), "opened file");

    Ok(OpenedFile {
        name: node.name.clone(),
        path: node.path.clone(),
        location: node.location.clone(),
        content,
        jump_to_line: (jump_to_line > 0).then_some(jump_to_line),
    })
}

/// Opens the file behind a search hit, positioned on the matching line.
pub async fn open_result<F: FileSystem>(fs: &F, result: &SearchResult) -> Result<OpenedFile> {
    open_file(fs, &result.node, result.jump_to_line).await
}

/// Writes `text` back to storage and records it as the saved content.
pub async fn save_file<F: FileSystem>(fs: &F, file: &mut OpenedFile, text: &str) -> Result<()> {
    fs.write_text(&file.location, text).await?;
    file.content = text.to_owned();
    debug!(path = %file.path, "saved file");
    Ok(())
}
