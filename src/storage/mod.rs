//! Asset Intake: persists uploaded cover images and PDFs under generated
//! unique names and hands back the public path recorded in the catalog row.

use std::path::{Path, PathBuf};

use uuid::Uuid;

/// Served for entries uploaded without a cover, so `cover` never stores an
/// empty value.
pub const DEFAULT_COVER: &str = "resources/mag-covers/default.jpg";

/// URL prefix the router serves the upload directory under.
pub const UPLOAD_URL_PREFIX: &str = "/uploads";

#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("Failed to create upload directory")]
    CreateDir(#[source] std::io::Error),
    #[error("Failed to write uploaded file")]
    Write(#[source] std::io::Error),
}

#[derive(Debug, Clone)]
pub struct AssetStore {
    upload_dir: PathBuf,
}

impl AssetStore {
    pub fn new(upload_dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let upload_dir = upload_dir.into();
        std::fs::create_dir_all(&upload_dir).map_err(StorageError::CreateDir)?;

        Ok(AssetStore { upload_dir })
    }

    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    /// Writes the upload under a generated name and returns the public path.
    /// The name is unique by construction, so an existing file is never
    /// overwritten.
    #[tracing::instrument(name = "store asset", skip(self, data), fields(original_name, size = data.len()))]
    pub async fn store(&self, original_name: &str, data: &[u8]) -> Result<String, StorageError> {
        let name = unique_name(original_name);

        tokio::fs::write(self.upload_dir.join(&name), data)
            .await
            .map_err(StorageError::Write)?;

        Ok(format!("{}/{}", UPLOAD_URL_PREFIX, name))
    }
}

/// Upload timestamp keeps directory listings chronological, the uuid part
/// carries the uniqueness. Only the original extension survives.
fn unique_name(original_name: &str) -> String {
    let extension = Path::new(original_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
        .unwrap_or_default();

    let stamp = chrono::Utc::now().timestamp_millis();
    let token = Uuid::new_v4().simple().to_string();

    format!("{}-{}{}", stamp, &token[..8], extension)
}
