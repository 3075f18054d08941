//! Bidirectional mapping between the legacy nested structure and the
//! flat `id → StorageConfig` map.
//!
//! Pure functions, independent of any I/O collaborator: the nested
//! structure is a denormalized fan-out of one config across its
//! applicable principals, and these functions flatten it back to one
//! entity per id (and build the per-principal leaves on the way out).

use std::collections::BTreeMap;

use tracing::warn;

use mounthub_core::types::{
    BackendOptions, MountEntry, MountTree, MountType, PRINCIPAL_ALL, StorageConfig,
};

/// Extract the relative mount point from an absolute root mount path.
///
/// Root paths have the shape `/{principal}/files/{mount point}` (the
/// global scope uses the literal token `$user` as principal). Returns
/// `None` when fewer than three segments remain after trimming slashes;
/// such leaves are data-quality casualties of the legacy format and are
/// skipped by [`flatten`].
pub fn split_root_mount_path(root: &str) -> Option<String> {
    let trimmed = root.trim_matches('/');
    let mut segments = trimmed.splitn(3, '/');
    let _principal = segments.next()?;
    let _files = segments.next()?;
    let relative = segments.next()?;
    if relative.is_empty() {
        return None;
    }
    Some(format!("/{relative}"))
}

/// Build the absolute root mount path for a principal token and a
/// normalized mount point.
pub fn root_mount_path(principal_token: &str, mount_point: &str) -> String {
    format!(
        "/{}/files/{}",
        principal_token.trim_matches('/'),
        mount_point.trim_start_matches('/')
    )
}

/// Flatten a nested tree into `id → StorageConfig`.
///
/// Leaves sharing an id fan in to one config: the first leaf seen
/// supplies mount point, backend class/options, priority, and mount
/// options; every leaf contributes its principal to the applicable
/// sets. The wildcard principal in the `user` bucket is never
/// accumulated — an all-users mount round-trips as empty applicables.
/// Malformed root paths are logged and skipped without aborting the
/// read.
pub fn flatten(tree: &MountTree) -> BTreeMap<i64, StorageConfig> {
    let mut storages: BTreeMap<i64, StorageConfig> = BTreeMap::new();

    for (mount_type, principal, root, entry) in tree.leaves() {
        let Some(mount_point) = split_root_mount_path(root) else {
            warn!(
                root_mount_path = root,
                principal, "Skipping mount entry with malformed root path"
            );
            continue;
        };

        let storage = storages.entry(entry.id).or_insert_with(|| {
            let mut config = StorageConfig::new(&mount_point, entry.class.clone());
            config.id = Some(entry.id);
            config.backend_options = entry.options.clone();
            config.mount_options = entry.mount_options.clone();
            config.priority = entry.priority;
            config
        });

        match mount_type {
            MountType::User if principal != PRINCIPAL_ALL => {
                storage.add_applicable_user(principal);
            }
            MountType::Group => {
                storage.add_applicable_group(principal);
            }
            MountType::User => {}
        }
    }

    storages
}

/// Build the persisted leaf for one config, carrying the given
/// (already encrypted) backend options.
pub fn mount_entry(id: i64, storage: &StorageConfig, options: BackendOptions) -> MountEntry {
    MountEntry {
        id,
        class: storage.backend_class.clone(),
        options,
        priority: storage.priority,
        mount_options: storage.mount_options.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(id: i64, class: &str) -> MountEntry {
        MountEntry {
            id,
            class: class.to_string(),
            options: BTreeMap::from([("host".to_string(), json!("example.org"))]),
            priority: None,
            mount_options: BTreeMap::new(),
        }
    }

    #[test]
    fn test_split_root_mount_path() {
        assert_eq!(
            split_root_mount_path("/$user/files/backup"),
            Some("/backup".to_string())
        );
        assert_eq!(
            split_root_mount_path("/alice/files/projects/2026"),
            Some("/projects/2026".to_string())
        );
        assert_eq!(split_root_mount_path("/alice/files"), None);
        assert_eq!(split_root_mount_path("/files"), None);
        assert_eq!(split_root_mount_path(""), None);
    }

    #[test]
    fn test_root_mount_path() {
        assert_eq!(root_mount_path("$user", "/backup"), "/$user/files/backup");
        assert_eq!(root_mount_path("alice", "/a/b"), "/alice/files/a/b");
    }

    #[test]
    fn test_split_and_root_are_inverse() {
        let root = root_mount_path("$user", "/media/archive");
        assert_eq!(split_root_mount_path(&root), Some("/media/archive".to_string()));
    }

    #[test]
    fn test_flatten_accumulates_applicables() {
        let mut tree = MountTree::new();
        tree.insert(MountType::User, "alice", "/$user/files/docs", entry(1, "sftp"));
        tree.insert(MountType::User, "bob", "/$user/files/docs", entry(1, "sftp"));
        tree.insert(MountType::Group, "staff", "/$user/files/docs", entry(1, "sftp"));

        let storages = flatten(&tree);
        assert_eq!(storages.len(), 1);
        let config = &storages[&1];
        assert_eq!(config.mount_point, "/docs");
        assert_eq!(config.applicable_users, vec!["alice", "bob"]);
        assert_eq!(config.applicable_groups, vec!["staff"]);
    }

    #[test]
    fn test_flatten_skips_wildcard_principal() {
        let mut tree = MountTree::new();
        tree.insert(MountType::User, "all", "/$user/files/shared", entry(2, "s3"));

        let storages = flatten(&tree);
        let config = &storages[&2];
        assert!(config.applicable_users.is_empty());
        assert!(config.is_applicable_to_all());
    }

    #[test]
    fn test_flatten_skips_malformed_leaf() {
        let mut tree = MountTree::new();
        tree.insert(MountType::User, "alice", "/alice/files", entry(1, "sftp"));
        tree.insert(MountType::User, "alice", "/alice/files/ok", entry(2, "sftp"));

        let storages = flatten(&tree);
        assert_eq!(storages.len(), 1);
        assert!(storages.contains_key(&2));
    }

    #[test]
    fn test_flatten_carries_priority_and_mount_options() {
        let mut e = entry(5, "smb");
        e.priority = Some(150);
        e.mount_options.insert("previews".to_string(), json!(false));
        let mut tree = MountTree::new();
        tree.insert(MountType::Group, "admins", "/$user/files/tools", e);

        let storages = flatten(&tree);
        let config = &storages[&5];
        assert_eq!(config.priority, Some(150));
        assert_eq!(config.mount_options["previews"], json!(false));
    }
}
