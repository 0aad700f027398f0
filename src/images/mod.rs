//! Product image directory store.
//!
//! Images are uploaded out-of-band with names of the form
//! `<user>---<serial>---<tag>.<ext>`; the third `---` segment carries the
//! product tag issued before upload. This store only scans for and
//! removes files; it never writes them.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::config::ImageStoreConfig;

/// Handle on the local image directory.
#[derive(Debug, Clone)]
pub struct ImageStore {
    dir: PathBuf,
}

impl ImageStore {
    pub fn new(config: &ImageStoreConfig) -> Self {
        Self {
            dir: PathBuf::from(&config.directory),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.dir
    }

    /// List files whose tag segment contains `tag`.
    pub async fn scan_for_tag(&self, tag: &str) -> std::io::Result<Vec<String>> {
        let mut entries = tokio::fs::read_dir(&self.dir).await?;
        let mut matches = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };

            let stem = name.rsplit_once('.').map(|(s, _)| s).unwrap_or(name);
            if let Some(file_tag) = stem.split("---").nth(2) {
                if file_tag.contains(tag) {
                    matches.push(name.to_string());
                }
            }
        }

        Ok(matches)
    }

    /// Best-effort removal of the named files. Missing files are logged
    /// and skipped; other failures are logged and do not abort the batch.
    pub async fn remove(&self, names: &[String]) {
        for name in names {
            match tokio::fs::remove_file(self.dir.join(name)).await {
                Ok(()) => {
                    tracing::info!(file = %name, "Removed product image");
                }
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    tracing::info!(file = %name, "File doesn't exist, won't remove it");
                }
                Err(e) => {
                    tracing::error!(file = %name, error = %e, "Failed to remove product image");
                }
            }
        }
    }
}
