//! Legacy config store settings.

use serde::{Deserialize, Serialize};

/// Settings for the file-backed legacy config store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Directory holding the per-scope mount documents.
    #[serde(default = "default_directory")]
    pub directory: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
        }
    }
}

fn default_directory() -> String {
    "./data/mounts".to_string()
}
