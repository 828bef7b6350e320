use std::path::PathBuf;

use async_trait::async_trait;
use uuid::Uuid;

use business::domain::scan::errors::StorageError;
use business::domain::scan::model::RawScan;
use business::domain::scan::services::{ScanLocation, ScanStorage};

/// Keeps uploaded scans on local disk while they are processed.
pub struct LocalScanStorage {
    directory: PathBuf,
}

impl LocalScanStorage {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    fn file_name(extension: Option<&str>) -> String {
        let id = Uuid::new_v4();
        match extension.filter(|ext| is_safe_extension(ext)) {
            Some(ext) => format!("{}.{}", id, ext),
            None => id.to_string(),
        }
    }
}

/// Extensions end up in a path, so only short alphanumeric ones are kept.
fn is_safe_extension(extension: &str) -> bool {
    !extension.is_empty()
        && extension.len() <= 8
        && extension.chars().all(|c| c.is_ascii_alphanumeric())
}

#[async_trait]
impl ScanStorage for LocalScanStorage {
    async fn save(&self, scan: &RawScan) -> Result<ScanLocation, StorageError> {
        tokio::fs::create_dir_all(&self.directory)
            .await
            .map_err(StorageError::Save)?;

        let path = self
            .directory
            .join(Self::file_name(scan.extension.as_deref()));
        tokio::fs::write(&path, &scan.bytes)
            .await
            .map_err(StorageError::Save)?;

        Ok(ScanLocation::new(path.to_string_lossy()))
    }

    async fn delete(&self, location: &ScanLocation) -> Result<(), StorageError> {
        tokio::fs::remove_file(location.as_str())
            .await
            .map_err(StorageError::Delete)
    }
}
