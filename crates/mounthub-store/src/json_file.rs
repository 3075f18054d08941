//! JSON-file legacy config store.
//!
//! One document per scope: `mounts.json` for the global scope,
//! `mounts-{uid}.json` for each personal scope. Writes go through a
//! temp file and rename so a crashed write never leaves a truncated
//! document behind.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use mounthub_core::error::{AppError, ErrorKind};
use mounthub_core::result::AppResult;
use mounthub_core::traits::store::{ConfigScope, LegacyConfigStore};
use mounthub_core::types::MountTree;

/// File-backed legacy config store.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    /// Directory holding the per-scope documents.
    directory: PathBuf,
}

impl JsonFileStore {
    /// Create a store rooted at the given directory, creating it if
    /// missing.
    pub async fn new(directory: impl Into<PathBuf>) -> AppResult<Self> {
        let directory = directory.into();
        fs::create_dir_all(&directory).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Persistence,
                format!("Failed to create store directory: {}", directory.display()),
                e,
            )
        })?;
        Ok(Self { directory })
    }

    /// Resolve the document path for a scope.
    fn document_path(&self, scope: &ConfigScope) -> AppResult<PathBuf> {
        let file_name = match scope {
            ConfigScope::Global => "mounts.json".to_string(),
            ConfigScope::Personal(uid) => {
                if uid.is_empty() || uid.contains(['/', '\\']) {
                    return Err(AppError::validation(format!(
                        "Invalid user id for personal scope: {uid:?}"
                    )));
                }
                format!("mounts-{uid}.json")
            }
        };
        Ok(self.directory.join(file_name))
    }
}

#[async_trait]
impl LegacyConfigStore for JsonFileStore {
    async fn read_tree(&self, scope: &ConfigScope) -> AppResult<MountTree> {
        let path = self.document_path(scope)?;
        let data = match fs::read(&path).await {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(MountTree::new());
            }
            Err(e) => {
                return Err(AppError::with_source(
                    ErrorKind::Persistence,
                    format!("Failed to read mount document: {}", path.display()),
                    e,
                ));
            }
        };

        serde_json::from_slice(&data).map_err(|e| {
            AppError::with_source(
                ErrorKind::Persistence,
                format!("Corrupt mount document: {}", path.display()),
                e,
            )
        })
    }

    async fn write_tree(&self, scope: &ConfigScope, tree: &MountTree) -> AppResult<()> {
        let path = self.document_path(scope)?;
        let data = serde_json::to_vec_pretty(tree)?;

        let tmp_path = temp_sibling(&path);
        fs::write(&tmp_path, &data).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Persistence,
                format!("Failed to write mount document: {}", tmp_path.display()),
                e,
            )
        })?;
        fs::rename(&tmp_path, &path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Persistence,
                format!("Failed to replace mount document: {}", path.display()),
                e,
            )
        })?;

        debug!(path = %path.display(), bytes = data.len(), "Wrote mount document");
        Ok(())
    }
}

/// Temp-file path next to the target so the rename stays on one
/// filesystem.
fn temp_sibling(path: &Path) -> PathBuf {
    let mut os = path.as_os_str().to_os_string();
    os.push(".tmp");
    PathBuf::from(os)
}
