//! Read-only per-user projection of the global mounts.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;

use mounthub_core::error::AppError;
use mounthub_core::events::HookSignal;
use mounthub_core::result::AppResult;
use mounthub_core::traits::cipher::PasswordCipher;
use mounthub_core::traits::groups::GroupMembership;
use mounthub_core::traits::store::{ConfigScope, LegacyConfigStore};
use mounthub_core::types::{MountTree, MountType, PRINCIPAL_ALL, StorageConfig};

use crate::service::StoragesService;

/// Default precedence for configs that carry no explicit priority.
const DEFAULT_PRIORITY: i32 = 100;

/// The subset of global mounts visible to one user: direct username
/// match (case-insensitive), group membership, or the wildcard
/// principal.
///
/// Read-only by contract — every write path fails with
/// `WriteDisallowed`. Mutations go through
/// [`GlobalStoragesService`](crate::GlobalStoragesService) (as an
/// administrator) or
/// [`UserStoragesService`](crate::UserStoragesService).
#[derive(Debug, Clone)]
pub struct UserGlobalStoragesService {
    store: Arc<dyn LegacyConfigStore>,
    cipher: Arc<dyn PasswordCipher>,
    groups: Arc<dyn GroupMembership>,
    user: String,
}

impl UserGlobalStoragesService {
    /// Create the projection for the given user.
    pub fn new(
        store: Arc<dyn LegacyConfigStore>,
        cipher: Arc<dyn PasswordCipher>,
        groups: Arc<dyn GroupMembership>,
        user: impl Into<String>,
    ) -> Self {
        Self {
            store,
            cipher,
            groups,
            user: user.into(),
        }
    }

    /// The user this projection is built for.
    pub fn user(&self) -> &str {
        &self.user
    }

    /// Visible configs deduplicated by mount point: when several
    /// configs would mount at the same path, the highest priority wins
    /// (ties break towards the lowest id).
    pub async fn unique_storages(&self) -> AppResult<Vec<StorageConfig>> {
        let mut storages = self.storages().await?;
        storages.sort_by_key(|s| {
            (
                std::cmp::Reverse(s.priority.unwrap_or(DEFAULT_PRIORITY)),
                s.id,
            )
        });

        let mut seen = HashSet::new();
        storages.retain(|storage| seen.insert(storage.mount_point.clone()));
        Ok(storages)
    }
}

#[async_trait]
impl StoragesService for UserGlobalStoragesService {
    fn cipher(&self) -> &dyn PasswordCipher {
        self.cipher.as_ref()
    }

    /// Read the global tree, keeping only the buckets that apply to
    /// this user.
    async fn read_legacy_config(&self) -> AppResult<MountTree> {
        let mut tree = self.store.read_tree(&ConfigScope::Global).await?;

        tree.retain_principals(MountType::User, |principal| {
            principal == PRINCIPAL_ALL || principal.eq_ignore_ascii_case(&self.user)
        });

        let group_principals: Vec<String> = tree
            .bucket(MountType::Group)
            .map(|principals| principals.keys().cloned().collect())
            .unwrap_or_default();
        let mut member_of = HashSet::new();
        for group in group_principals {
            if self.groups.is_in_group(&self.user, &group).await? {
                member_of.insert(group);
            }
        }
        tree.retain_principals(MountType::Group, |principal| member_of.contains(principal));

        Ok(tree)
    }

    async fn write_storages(&self, _storages: &BTreeMap<i64, StorageConfig>) -> AppResult<()> {
        Err(AppError::write_disallowed(
            "The per-user projection of global storages is read-only",
        ))
    }

    // Writes fail before any state changes, so no hooks can ever fire
    // from this service.
    async fn trigger_hooks(&self, _storage: &StorageConfig, _signal: HookSignal) {}

    async fn trigger_change_hooks(&self, _old: &StorageConfig, _new: &StorageConfig) {}
}
