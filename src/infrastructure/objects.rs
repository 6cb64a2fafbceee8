//! Local object store: one bucket directory of uploaded files

use crate::error::{DaybookError, Result};
use crate::infrastructure::backend::ObjectStore;
use crate::infrastructure::{Config, Workspace};
use std::fs;
use std::path::{Component, Path, PathBuf};

#[derive(Debug, Clone)]
pub struct LocalObjectStore {
    bucket_dir: PathBuf,
    bucket: String,
    public_url_base: Option<String>,
}

impl LocalObjectStore {
    pub fn new(bucket_dir: PathBuf, bucket: String, public_url_base: Option<String>) -> Self {
        LocalObjectStore {
            bucket_dir,
            bucket,
            public_url_base,
        }
    }

    pub fn open(workspace: &Workspace, config: &Config) -> Self {
        Self::new(
            workspace.storage_dir().join(&config.bucket),
            config.bucket.clone(),
            config.public_url_base.clone(),
        )
    }

    /// Path of a stored object; keys must stay inside the bucket
    pub fn object_path(&self, key: &str) -> Result<PathBuf> {
        let relative = Path::new(key);
        let inside = !key.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));

        if !inside {
            return Err(DaybookError::Upload(format!("Invalid object key: '{}'", key)));
        }
        Ok(self.bucket_dir.join(relative))
    }
}

impl ObjectStore for LocalObjectStore {
    fn upload(&self, key: &str, bytes: &[u8]) -> Result<()> {
        let path = self.object_path(key)?;

        if path.exists() {
            return Err(DaybookError::Upload(format!(
                "The resource already exists: {}",
                key
            )));
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| DaybookError::Upload(format!("{}: {}", key, e)))?;
        }
        fs::write(&path, bytes).map_err(|e| DaybookError::Upload(format!("{}: {}", key, e)))?;

        tracing::debug!(key, size = bytes.len(), "Stored object");
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        match &self.public_url_base {
            Some(base) => format!(
                "{}/storage/v1/object/public/{}/{}",
                base.trim_end_matches('/'),
                self.bucket,
                key
            ),
            None => format!("file://{}", self.bucket_dir.join(key).display()),
        }
    }
}
