//! External-storage mounting policy.

use serde::{Deserialize, Serialize};

/// Controls whether and which backends non-administrative users may
/// mount for themselves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MountingConfig {
    /// Whether personal (self-service) mounting is allowed at all.
    #[serde(default = "default_true")]
    pub allow_user_mounting: bool,
    /// Backend identifiers eligible for personal mounting. A backend
    /// absent from this list never gains personal visibility.
    #[serde(default)]
    pub user_mounting_backends: Vec<String>,
}

impl Default for MountingConfig {
    fn default() -> Self {
        Self {
            allow_user_mounting: default_true(),
            user_mounting_backends: Vec::new(),
        }
    }
}

impl MountingConfig {
    /// Parse the legacy comma-separated representation of the backend
    /// allow-list (`"sftp,smb"`), as stored by older deployments.
    pub fn parse_backend_list(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

fn default_true() -> bool {
    true
}
