//! Self-service mounts owned by exactly one user.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;

use mounthub_core::events::{HookSignal, MountHookEvent};
use mounthub_core::result::AppResult;
use mounthub_core::traits::cipher::PasswordCipher;
use mounthub_core::traits::hooks::MountHookBus;
use mounthub_core::traits::store::{ConfigScope, LegacyConfigStore};
use mounthub_core::types::{MountTree, MountType, StorageConfig};

use crate::mapper;
use crate::service::StoragesService;

/// Service for personal mounts, bound to one acting user.
///
/// Reads and writes only that user's personal document. Returned
/// configs never echo the owner back in `applicable_users` — the owner
/// is implicit for personal mounts.
#[derive(Debug, Clone)]
pub struct UserStoragesService {
    store: Arc<dyn LegacyConfigStore>,
    cipher: Arc<dyn PasswordCipher>,
    hooks: Arc<dyn MountHookBus>,
    user: String,
}

impl UserStoragesService {
    /// Create a personal service bound to the given user.
    pub fn new(
        store: Arc<dyn LegacyConfigStore>,
        cipher: Arc<dyn PasswordCipher>,
        hooks: Arc<dyn MountHookBus>,
        user: impl Into<String>,
    ) -> Self {
        Self {
            store,
            cipher,
            hooks,
            user: user.into(),
        }
    }

    /// The acting user this service is bound to.
    pub fn user(&self) -> &str {
        &self.user
    }
}

#[async_trait]
impl StoragesService for UserStoragesService {
    fn cipher(&self) -> &dyn PasswordCipher {
        self.cipher.as_ref()
    }

    async fn read_legacy_config(&self) -> AppResult<MountTree> {
        self.store
            .read_tree(&ConfigScope::personal(&self.user))
            .await
    }

    fn filter_storages(
        &self,
        storages: BTreeMap<i64, StorageConfig>,
    ) -> BTreeMap<i64, StorageConfig> {
        storages
            .into_iter()
            .filter(|(_, storage)| storage.applicable_users.iter().any(|u| u == &self.user))
            .map(|(id, mut storage)| {
                storage.applicable_users.clear();
                (id, storage)
            })
            .collect()
    }

    async fn write_storages(&self, storages: &BTreeMap<i64, StorageConfig>) -> AppResult<()> {
        let mut tree = MountTree::new();

        for (id, storage) in storages {
            let encrypted = self.cipher.encrypt_options(&storage.backend_options)?;
            let entry = mapper::mount_entry(*id, storage, encrypted);
            let root = mapper::root_mount_path(&self.user, &storage.mount_point);
            tree.insert(MountType::User, self.user.clone(), root, entry);
        }

        self.store
            .write_tree(&ConfigScope::personal(&self.user), &tree)
            .await
    }

    async fn trigger_hooks(&self, storage: &StorageConfig, signal: HookSignal) {
        self.hooks
            .emit(MountHookEvent::new(
                signal,
                &storage.mount_point,
                MountType::User,
                &self.user,
            ))
            .await;
    }

    /// Personal configs have a single implicit principal, so only a
    /// mount-point rename produces hooks: delete the old path, create
    /// the new one.
    async fn trigger_change_hooks(&self, old: &StorageConfig, new: &StorageConfig) {
        if old.mount_point != new.mount_point {
            self.trigger_hooks(old, HookSignal::DeleteMount).await;
            self.trigger_hooks(new, HookSignal::CreateMount).await;
        }
    }
}
