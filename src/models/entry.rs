use std::path::{Path, PathBuf};

/// What the storage provider reports for a directory entry.
///
/// Symlinks are never followed when listing; the tree shows them as leaves.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EntryKind {
    Directory,
    File,
    Symlink,
    Other,
}

/// One immediate child returned by [`crate::fs::FileSystem::read_dir`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FsEntry {
    /// Storage location of the entry, used for later reads.
    pub path: PathBuf,
    pub name: String,
    pub kind: EntryKind,
}

impl FsEntry {
    pub fn new(path: impl Into<PathBuf>, kind: EntryKind) -> Self {
        let path = path.into();
        let name = entry_name(&path);
        Self { path, name, kind }
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::new(path, EntryKind::File)
    }

    pub fn dir(path: impl Into<PathBuf>) -> Self {
        Self::new(path, EntryKind::Directory)
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    /// Dotfiles and dot-directories.
    pub fn is_hidden(&self) -> bool {
        self.name.starts_with('.')
    }
}

fn entry_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.as_os_str().to_string_lossy().into_owned())
}
