//! Filesystem collaborator.
//!
//! The Markdown writer and the path guard only touch the disk through
//! [`FileSystem`], so tests can swap in an in-memory implementation.

use std::io;
use std::path::Path;

use async_trait::async_trait;

/// Minimal set of filesystem capabilities the core needs.
#[async_trait]
pub trait FileSystem: Send + Sync {
    /// Create `path` and all missing parents. Succeeds if it already exists.
    async fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Whether anything exists at `path`.
    async fn exists(&self, path: &Path) -> io::Result<bool>;

    /// Replace the contents of `path` with `contents`, creating it if needed.
    async fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()>;
}

/// [`FileSystem`] backed by `tokio::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

#[async_trait]
impl FileSystem for LocalFs {
    async fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        tokio::fs::create_dir_all(path).await
    }

    async fn exists(&self, path: &Path) -> io::Result<bool> {
        tokio::fs::try_exists(path).await
    }

    async fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        tokio::fs::write(path, contents).await
    }
}
