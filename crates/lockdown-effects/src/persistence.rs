//! Filesystem persistence handler
//!
//! Every value lives in its own file under a base directory. Writes go to a
//! temporary sibling, are synced, then renamed over the target, and the
//! directory is synced, so a `put` that returned survives an immediate kill.

use async_trait::async_trait;
use lockdown_core::effects::PersistenceEffects;
use lockdown_core::StoreError;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

const VALUE_EXTENSION: &str = "dat";
const TEMP_EXTENSION: &str = "dat.tmp";

/// Durable filesystem-backed persistence
#[derive(Debug, Clone)]
pub struct FilesystemPersistenceHandler {
    base_path: PathBuf,
}

impl FilesystemPersistenceHandler {
    /// Store values under `base_path`, created on first write
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn validate_key(key: &str) -> Result<(), StoreError> {
        if key.is_empty() {
            return Err(StoreError::invalid_key("key cannot be empty"));
        }
        if key.len() > 255 {
            return Err(StoreError::invalid_key("key too long (max 255 characters)"));
        }
        if key.contains("..") || key.contains('\0') || key.contains('/') || key.contains('\\') {
            return Err(StoreError::invalid_key("key contains invalid characters"));
        }
        Ok(())
    }

    fn value_path(&self, key: &str) -> PathBuf {
        self.base_path.join(format!("{key}.{VALUE_EXTENSION}"))
    }

    fn temp_path(&self, key: &str) -> PathBuf {
        self.base_path.join(format!("{key}.{TEMP_EXTENSION}"))
    }

    async fn commit(&self, key: &str, temp_path: &Path, value: &[u8]) -> Result<(), StoreError> {
        let mut file = fs::File::create(temp_path)
            .await
            .map_err(|e| StoreError::unavailable(format!("failed to create {key}: {e}")))?;
        file.write_all(value)
            .await
            .map_err(|e| StoreError::unavailable(format!("failed to write {key}: {e}")))?;
        file.sync_all()
            .await
            .map_err(|e| StoreError::unavailable(format!("failed to sync {key}: {e}")))?;
        drop(file);

        fs::rename(temp_path, self.value_path(key))
            .await
            .map_err(|e| StoreError::unavailable(format!("failed to commit {key}: {e}")))
    }

    #[cfg(unix)]
    async fn sync_dir(&self) -> Result<(), StoreError> {
        let dir = fs::File::open(&self.base_path).await?;
        dir.sync_all().await?;
        Ok(())
    }

    #[cfg(not(unix))]
    async fn sync_dir(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[async_trait]
impl PersistenceEffects for FilesystemPersistenceHandler {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Self::validate_key(key)?;
        match fs::read(self.value_path(key)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::unavailable(format!(
                "failed to read {key}: {e}"
            ))),
        }
    }

    async fn put(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        Self::validate_key(key)?;
        fs::create_dir_all(&self.base_path).await.map_err(|e| {
            StoreError::unavailable(format!("failed to create storage directory: {e}"))
        })?;

        let temp_path = self.temp_path(key);
        if let Err(err) = self.commit(key, &temp_path, &value).await {
            // A half-written temp file must not outlive the failed put.
            let _ = fs::remove_file(&temp_path).await;
            return Err(err);
        }
        self.sync_dir().await?;

        debug!(key, bytes = value.len(), "persisted value");
        Ok(())
    }
}
