use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::models::FsEntry;

use super::FileSystem;

#[derive(Clone, Debug)]
enum Response<T> {
    Ok(T),
    Err(String),
}

#[derive(Clone, Default)]
pub struct MockFileSystem {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    dirs: HashMap<PathBuf, Response<Vec<FsEntry>>>,
    files: HashMap<PathBuf, Response<String>>,
    delays: HashMap<PathBuf, Duration>,
    calls: Vec<PathBuf>,
    reads: Vec<PathBuf>,
    writes: Vec<(PathBuf, String)>,
}

impl MockFileSystem {
    pub fn set_dir_entries(&self, dir: impl Into<PathBuf>, entries: Vec<FsEntry>) {
        let mut inner = self.inner.lock().expect("mock fs lock");
        inner.dirs.insert(dir.into(), Response::Ok(entries));
    }

    pub fn set_error(&self, dir: impl Into<PathBuf>, message: impl Into<String>) {
        let mut inner = self.inner.lock().expect("mock fs lock");
        inner.dirs.insert(dir.into(), Response::Err(message.into()));
    }

    pub fn set_file(&self, file: impl Into<PathBuf>, text: impl Into<String>) {
        let mut inner = self.inner.lock().expect("mock fs lock");
        inner.files.insert(file.into(), Response::Ok(text.into()));
    }

    pub fn set_file_error(&self, file: impl Into<PathBuf>, message: impl Into<String>) {
        let mut inner = self.inner.lock().expect("mock fs lock");
        inner.files.insert(file.into(), Response::Err(message.into()));
    }

    /// Makes every `read_text` of `file` wait before answering.
    pub fn set_read_delay(&self, file: impl Into<PathBuf>, delay: Duration) {
        let mut inner = self.inner.lock().expect("mock fs lock");
        inner.delays.insert(file.into(), delay);
    }

    /// Directories passed to `read_dir`, in call order.
    pub fn calls(&self) -> Vec<PathBuf> {
        let inner = self.inner.lock().expect("mock fs lock");
        inner.calls.clone()
    }

    /// Files passed to `read_text`, in call order.
    pub fn reads(&self) -> Vec<PathBuf> {
        let inner = self.inner.lock().expect("mock fs lock");
        inner.reads.clone()
    }

    pub fn writes(&self) -> Vec<(PathBuf, String)> {
        let inner = self.inner.lock().expect("mock fs lock");
        inner.writes.clone()
    }
}

#[async_trait]
impl FileSystem for MockFileSystem {
    async fn read_dir(&self, dir: &Path) -> Result<Vec<FsEntry>> {
        let mut inner = self.inner.lock().expect("mock fs lock");
        inner.calls.push(dir.to_path_buf());

        match inner.dirs.get(dir) {
            Some(Response::Ok(entries)) => Ok(entries.clone()),
            Some(Response::Err(message)) => Err(anyhow!("{message}")),
            None => Err(anyhow!("no mock response for {}", dir.display())),
        }
    }

    async fn read_text(&self, file: &Path) -> Result<String> {
        let (delay, response) = {
            let mut inner = self.inner.lock().expect("mock fs lock");
            inner.reads.push(file.to_path_buf());
            (inner.delays.get(file).copied(), inner.files.get(file).cloned())
        };

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        match response {
            Some(Response::Ok(text)) => Ok(text),
            Some(Response::Err(message)) => Err(anyhow!("{message}")),
            None => Err(anyhow!("no mock file {}", file.display())),
        }
    }

    async fn write_text(&self, file: &Path, text: &str) -> Result<()> {
        let mut inner = self.inner.lock().expect("mock fs lock");
        inner.writes.push((file.to_path_buf(), text.to_owned()));
        inner
            .files
            .insert(file.to_path_buf(), Response::Ok(text.to_owned()));
        Ok(())
    }
}
