//! The external-storage mount configuration entity.

use serde::{Deserialize, Serialize};

use super::mount::BackendOptions;

/// Lifecycle flag stamped on a config after a service operation.
///
/// Never persisted; only a result annotation for the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageStatus {
    /// The operation completed successfully.
    Success,
    /// The operation left the config in an error state.
    Error,
}

/// One external storage mount definition.
///
/// `applicable_users` and `applicable_groups` are meaningful only in the
/// global scope; the personal services clear `applicable_users` on read
/// because the owning user is implicit there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Stable integer id, unique within the scope. `None` before the
    /// first persistence.
    pub id: Option<i64>,
    /// Mount point path relative to the scope's virtual root, normalized
    /// to a single leading slash and no trailing slash.
    pub mount_point: String,
    /// Backend implementation identifier (e.g. an SFTP or S3 driver).
    pub backend_class: String,
    /// Backend options: credentials, endpoint, bucket, and so on.
    /// Always plaintext in memory; encrypted at the persistence boundary.
    #[serde(default)]
    pub backend_options: BackendOptions,
    /// Mount-time behavior switches; omitted from persistence when empty.
    #[serde(default)]
    pub mount_options: BackendOptions,
    /// Mount precedence; higher wins when several configs overlap.
    #[serde(default)]
    pub priority: Option<i32>,
    /// Usernames this global mount applies to. Empty together with
    /// `applicable_groups` means "all users".
    #[serde(default)]
    pub applicable_users: Vec<String>,
    /// Group names this global mount applies to.
    #[serde(default)]
    pub applicable_groups: Vec<String>,
    /// Result annotation set by the owning service; never persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<StorageStatus>,
}

impl StorageConfig {
    /// Create a new, not-yet-persisted config.
    pub fn new(mount_point: impl AsRef<str>, backend_class: impl Into<String>) -> Self {
        Self {
            id: None,
            mount_point: normalize_mount_point(mount_point.as_ref()),
            backend_class: backend_class.into(),
            backend_options: BackendOptions::new(),
            mount_options: BackendOptions::new(),
            priority: None,
            applicable_users: Vec::new(),
            applicable_groups: Vec::new(),
            status: None,
        }
    }

    /// Replace the mount point, normalizing slashes.
    pub fn set_mount_point(&mut self, mount_point: impl AsRef<str>) {
        self.mount_point = normalize_mount_point(mount_point.as_ref());
    }

    /// Add a username to the applicable set, ignoring duplicates.
    pub fn add_applicable_user(&mut self, user: impl Into<String>) {
        let user = user.into();
        if !self.applicable_users.contains(&user) {
            self.applicable_users.push(user);
        }
    }

    /// Add a group name to the applicable set, ignoring duplicates.
    pub fn add_applicable_group(&mut self, group: impl Into<String>) {
        let group = group.into();
        if !self.applicable_groups.contains(&group) {
            self.applicable_groups.push(group);
        }
    }

    /// Whether this config has no explicit applicables and therefore
    /// mounts for everyone via the wildcard principal.
    pub fn is_applicable_to_all(&self) -> bool {
        self.applicable_users.is_empty() && self.applicable_groups.is_empty()
    }
}

/// Normalize a mount point to `/name` form: single leading slash, no
/// trailing slash. The root itself is not a valid mount point and
/// normalizes to `/`.
pub fn normalize_mount_point(raw: &str) -> String {
    let trimmed = raw.trim_matches('/');
    format!("/{trimmed}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_mount_point() {
        assert_eq!(normalize_mount_point("backup"), "/backup");
        assert_eq!(normalize_mount_point("/backup/"), "/backup");
        assert_eq!(normalize_mount_point("//a/b//"), "/a/b");
        assert_eq!(normalize_mount_point(""), "/");
    }

    #[test]
    fn test_applicable_to_all() {
        let mut config = StorageConfig::new("/backup", "sftp");
        assert!(config.is_applicable_to_all());
        config.add_applicable_user("alice");
        assert!(!config.is_applicable_to_all());
    }

    #[test]
    fn test_add_applicable_dedupes() {
        let mut config = StorageConfig::new("/backup", "sftp");
        config.add_applicable_user("alice");
        config.add_applicable_user("alice");
        config.add_applicable_group("staff");
        config.add_applicable_group("staff");
        assert_eq!(config.applicable_users, vec!["alice"]);
        assert_eq!(config.applicable_groups, vec!["staff"]);
    }
}
