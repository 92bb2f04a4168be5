use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::config::UploadConfig;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("File exceeds the {limit} byte upload limit")]
    TooLarge { limit: usize },

    #[error("Empty file upload")]
    Empty,

    #[error("Upload storage error: {0}")]
    Io(#[from] std::io::Error),
}

/// Content-addressed attachment storage on the local filesystem
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
    max_file_bytes: usize,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>, max_file_bytes: usize) -> Self {
        Self {
            dir: dir.into(),
            max_file_bytes,
        }
    }

    pub fn from_config(config: &UploadConfig) -> Self {
        Self::new(&config.dir, config.max_file_bytes)
    }

    /// Writes `bytes` as `<sha256>.<ext>` and returns the stored name.
    /// Identical content maps to the same file.
    pub async fn save(&self, original_name: Option<&str>, bytes: &[u8]) -> Result<String, UploadError> {
        if bytes.is_empty() {
            return Err(UploadError::Empty);
        }
        if bytes.len() > self.max_file_bytes {
            return Err(UploadError::TooLarge {
                limit: self.max_file_bytes,
            });
        }

        let name = stored_name(original_name, bytes);
        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(self.dir.join(&name), bytes).await?;

        tracing::info!("Stored attachment {} ({} bytes)", name, bytes.len());
        Ok(name)
    }
}

fn stored_name(original_name: Option<&str>, bytes: &[u8]) -> String {
    let digest = format!("{:x}", Sha256::digest(bytes));
    let extension = original_name
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(str::to_ascii_lowercase);

    match extension {
        Some(ext) => format!("{}.{}", digest, ext),
        None => digest,
    }
}
