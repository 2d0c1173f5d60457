//! Local directory holding uploaded audio bytes.
//!
//! Files are stored flat under the root, named by their safe name. The upload and
//! delete workflows are the only writers.

use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct AudioStore {
    root: PathBuf,
}

impl AudioStore {
    /// Open the store, creating the root directory if it does not exist.
    pub async fn open(root: impl Into<PathBuf>) -> io::Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Location for a file named `name` directly under the root.
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// True when any filesystem entry exists at `path`.
    pub async fn exists(&self, path: &Path) -> io::Result<bool> {
        fs::try_exists(path).await
    }

    /// True when `path` exists and is a regular file.
    pub async fn is_file(&self, path: &Path) -> bool {
        fs::metadata(path)
            .await
            .map(|meta| meta.is_file())
            .unwrap_or(false)
    }

    /// Write `bytes` to a file that must not exist yet.
    ///
    /// Fails with `io::ErrorKind::AlreadyExists` instead of overwriting. A partially
    /// written file is removed before the error is returned.
    pub async fn write_new(&self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .await?;

        let written = async {
            file.write_all(bytes).await?;
            file.sync_all().await
        }
        .await;

        if let Err(err) = written {
            drop(file);
            discard_partial(path).await;
            return Err(err);
        }

        debug!(path = %path.display(), size = bytes.len(), "Audio file written");
        Ok(())
    }

    pub async fn remove(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path).await
    }
}

async fn discard_partial(path: &Path) {
    match fs::remove_file(path).await {
        Ok(()) => debug!(path = %path.display(), "Removed partially written audio file"),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => warn!(
            path = %path.display(),
            error = %e,
            "Failed to remove partially written audio file"
        ),
    }
}
