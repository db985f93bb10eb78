//! Key-value JSON document storage
//!
//! One JSON file per logical key under a single root directory, mirroring
//! the browser-storage namespace the dashboard persists into. Writes go
//! through a temp file and rename so a crash mid-write leaves the previous
//! document intact.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::error::Result;

/// File-backed key-value store for JSON documents
#[derive(Clone)]
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    /// Create a store rooted at the given directory
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Initialize the store (create the root directory if needed)
    pub async fn initialize(&self) -> Result<()> {
        fs::create_dir_all(&self.root).await?;
        tracing::info!("Local store initialized at: {:?}", self.root);
        Ok(())
    }

    /// Read and deserialize the document under `key`.
    ///
    /// A missing document is `Ok(None)`; a document that fails to parse is
    /// a `Serialization` error, left for the caller's corruption policy.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let path = self.path_for(key);

        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        let value = serde_json::from_str(&content)?;
        Ok(Some(value))
    }

    /// Serialize and write the document under `key`, replacing any
    /// previous document atomically
    pub async fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let path = self.path_for(key);
        let content = serde_json::to_string_pretty(value)?;

        // Write to temp file first (atomic write)
        let temp_path = path.with_extension("json.tmp");
        let mut file = fs::File::create(&temp_path).await?;
        file.write_all(content.as_bytes()).await?;
        file.sync_all().await?;

        fs::rename(temp_path, &path).await?;

        tracing::debug!("Wrote document: {} ({} bytes)", key, content.len());

        Ok(())
    }

    /// Remove the document under `key`, if present
    pub async fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key);

        match fs::remove_file(&path).await {
            Ok(()) => {
                tracing::debug!("Removed document: {}", key);
                Ok(())
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    /// Store root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}
