//! The legacy nested mount-configuration structure.
//!
//! External storage mounts are persisted as a three-level mapping:
//! mount type → applicable principal → root mount path → entry. The
//! shape is kept exactly as the legacy format defines it so that
//! documents written by older deployments parse unchanged.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The wildcard principal: a mount under `user → all` applies to everyone.
pub const PRINCIPAL_ALL: &str = "all";

/// Ordered mapping of backend or mount option keys to values.
pub type BackendOptions = BTreeMap<String, Value>;

/// Whether a mount applies to a user principal or a group principal.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum MountType {
    /// The principal key is a username (or the literal `all`).
    User,
    /// The principal key is a group name.
    Group,
}

impl MountType {
    /// The literal string used as the top-level key in the legacy structure.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Group => "group",
        }
    }
}

impl std::fmt::Display for MountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One leaf of the nested structure: the per-principal mount definition.
///
/// `priority` and `mountOptions` are omitted from the persisted document
/// when unset/empty, matching the legacy format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MountEntry {
    /// Stable integer id, unique within one scope.
    pub id: i64,
    /// Backend implementation identifier.
    pub class: String,
    /// Backend options (credentials, endpoint, …). Password values are
    /// encrypted in the persisted document only.
    pub options: BackendOptions,
    /// Mount precedence; higher wins when several configs overlap.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    /// Mount-time behavior switches (previews, scanning, …).
    #[serde(
        default,
        rename = "mountOptions",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub mount_options: BackendOptions,
}

/// Principal → root mount path → entry.
pub type PrincipalMounts = BTreeMap<String, BTreeMap<String, MountEntry>>;

/// The full three-level legacy structure for one scope (global or one user).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MountTree(pub BTreeMap<MountType, PrincipalMounts>);

impl MountTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the tree contains no mounts at all.
    pub fn is_empty(&self) -> bool {
        self.0
            .values()
            .all(|principals| principals.values().all(|mounts| mounts.is_empty()))
    }

    /// Insert or overwrite one leaf.
    pub fn insert(
        &mut self,
        mount_type: MountType,
        principal: impl Into<String>,
        root_mount_path: impl Into<String>,
        entry: MountEntry,
    ) {
        self.0
            .entry(mount_type)
            .or_default()
            .entry(principal.into())
            .or_default()
            .insert(root_mount_path.into(), entry);
    }

    /// The principal bucket for one mount type, if present.
    pub fn bucket(&self, mount_type: MountType) -> Option<&PrincipalMounts> {
        self.0.get(&mount_type)
    }

    /// Keep only the principals of one mount type accepted by `keep`.
    pub fn retain_principals(&mut self, mount_type: MountType, mut keep: impl FnMut(&str) -> bool) {
        if let Some(principals) = self.0.get_mut(&mount_type) {
            principals.retain(|principal, _| keep(principal));
        }
    }

    /// Iterate every `(mount_type, principal, root_mount_path, entry)` leaf.
    pub fn leaves(&self) -> impl Iterator<Item = (MountType, &str, &str, &MountEntry)> {
        self.0.iter().flat_map(|(mount_type, principals)| {
            principals.iter().flat_map(move |(principal, mounts)| {
                mounts.iter().map(move |(path, entry)| {
                    (*mount_type, principal.as_str(), path.as_str(), entry)
                })
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(id: i64) -> MountEntry {
        MountEntry {
            id,
            class: "sftp".to_string(),
            options: BTreeMap::from([("host".to_string(), json!("example.org"))]),
            priority: None,
            mount_options: BTreeMap::new(),
        }
    }

    #[test]
    fn test_mount_type_literals() {
        assert_eq!(MountType::User.as_str(), "user");
        assert_eq!(MountType::Group.as_str(), "group");
        assert_eq!(
            serde_json::to_string(&MountType::Group).unwrap(),
            "\"group\""
        );
    }

    #[test]
    fn test_optional_fields_omitted() {
        let json = serde_json::to_value(entry(1)).unwrap();
        let obj = json.as_object().unwrap();
        assert!(!obj.contains_key("priority"));
        assert!(!obj.contains_key("mountOptions"));
    }

    #[test]
    fn test_tree_round_trip() {
        let mut tree = MountTree::new();
        let mut e = entry(3);
        e.priority = Some(100);
        e.mount_options
            .insert("previews".to_string(), json!(true));
        tree.insert(MountType::User, "all", "/$user/files/backup", e);
        tree.insert(MountType::Group, "admins", "/$user/files/tools", entry(4));

        let text = serde_json::to_string(&tree).unwrap();
        let parsed: MountTree = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, tree);
    }

    #[test]
    fn test_leaves_iteration() {
        let mut tree = MountTree::new();
        tree.insert(MountType::User, "alice", "/alice/files/docs", entry(1));
        tree.insert(MountType::User, "bob", "/bob/files/docs", entry(1));
        let leaves: Vec<_> = tree.leaves().collect();
        assert_eq!(leaves.len(), 2);
        assert_eq!(leaves[0].1, "alice");
        assert_eq!(leaves[1].1, "bob");
    }
}
