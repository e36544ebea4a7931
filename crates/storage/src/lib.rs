mod names;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use parking_lot::RwLock;
use tracing::debug;

pub use names::{
    file_stamp, speech_file_name, translation_file_name, CSV_FILE_NAME, ITINERARY_FILE_NAME,
    SUMMARY_FILE_NAME,
};

/// Write-once sink for the files a run produces. Paths are relative to the
/// store root; the returned path is where the artifact ended up.
pub trait ArtifactStore: Send + Sync {
    async fn write_text(&self, rel_path: &Path, contents: &str) -> Result<PathBuf>;
    async fn write_bytes(&self, rel_path: &Path, contents: &[u8]) -> Result<PathBuf>;
    async fn read_text(&self, rel_path: &Path) -> Result<String>;
    fn location(&self, rel_path: &Path) -> PathBuf;
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    artifacts: Arc<RwLock<BTreeMap<PathBuf, Vec<u8>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn paths(&self) -> Vec<PathBuf> {
        self.artifacts.read().keys().cloned().collect()
    }

    pub fn get(&self, rel_path: impl AsRef<Path>) -> Option<Vec<u8>> {
        self.artifacts.read().get(rel_path.as_ref()).cloned()
    }

    pub fn get_text(&self, rel_path: impl AsRef<Path>) -> Option<String> {
        self.get(rel_path)
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
    }

    /// First stored path whose file name starts with `prefix`.
    pub fn find_by_prefix(&self, prefix: &str) -> Option<PathBuf> {
        self.artifacts
            .read()
            .keys()
            .find(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .map(|name| name.starts_with(prefix))
                    .unwrap_or(false)
            })
            .cloned()
    }
}

impl ArtifactStore for MemoryStore {
    async fn write_text(&self, rel_path: &Path, contents: &str) -> Result<PathBuf> {
        self.write_bytes(rel_path, contents.as_bytes()).await
    }

    async fn write_bytes(&self, rel_path: &Path, contents: &[u8]) -> Result<PathBuf> {
        self.artifacts
            .write()
            .insert(rel_path.to_path_buf(), contents.to_vec());
        Ok(self.location(rel_path))
    }

    async fn read_text(&self, rel_path: &Path) -> Result<String> {
        self.get_text(rel_path)
            .with_context(|| format!("no artifact stored at {}", rel_path.display()))
    }

    fn location(&self, rel_path: &Path) -> PathBuf {
        rel_path.to_path_buf()
    }
}

#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ArtifactStore for FsStore {
    async fn write_text(&self, rel_path: &Path, contents: &str) -> Result<PathBuf> {
        self.write_bytes(rel_path, contents.as_bytes()).await
    }

    async fn write_bytes(&self, rel_path: &Path, contents: &[u8]) -> Result<PathBuf> {
        let path = self.location(rel_path);
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("failed creating directory {}", parent.display()))?;
        }

        tokio::fs::write(&path, contents)
            .await
            .with_context(|| format!("failed writing {}", path.display()))?;
        debug!(path = %path.display(), bytes = contents.len(), "artifact written");
        Ok(path)
    }

    async fn read_text(&self, rel_path: &Path) -> Result<String> {
        let path = self.location(rel_path);
        tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("failed reading {}", path.display()))
    }

    fn location(&self, rel_path: &Path) -> PathBuf {
        self.root.join(rel_path)
    }
}

#[derive(Clone)]
pub enum Store {
    Memory(MemoryStore),
    Fs(FsStore),
}

impl Store {
    pub fn memory() -> Self {
        Self::Memory(MemoryStore::new())
    }

    pub fn fs(root: impl Into<PathBuf>) -> Self {
        Self::Fs(FsStore::new(root))
    }
}

impl ArtifactStore for Store {
    async fn write_text(&self, rel_path: &Path, contents: &str) -> Result<PathBuf> {
        match self {
            Store::Memory(store) => store.write_text(rel_path, contents).await,
            Store::Fs(store) => store.write_text(rel_path, contents).await,
        }
    }

    async fn write_bytes(&self, rel_path: &Path, contents: &[u8]) -> Result<PathBuf> {
        match self {
            Store::Memory(store) => store.write_bytes(rel_path, contents).await,
            Store::Fs(store) => store.write_bytes(rel_path, contents).await,
        }
    }

    async fn read_text(&self, rel_path: &Path) -> Result<String> {
        match self {
            Store::Memory(store) => store.read_text(rel_path).await,
            Store::Fs(store) => store.read_text(rel_path).await,
        }
    }

    fn location(&self, rel_path: &Path) -> PathBuf {
        match self {
            Store::Memory(store) => store.location(rel_path),
            Store::Fs(store) => store.location(rel_path),
        }
    }
}
