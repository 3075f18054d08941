//! Administrator-managed mounts applying to users, groups, or everyone.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;

use mounthub_core::events::{HookSignal, MountHookEvent};
use mounthub_core::result::AppResult;
use mounthub_core::traits::cipher::PasswordCipher;
use mounthub_core::traits::hooks::MountHookBus;
use mounthub_core::traits::store::{ConfigScope, LegacyConfigStore};
use mounthub_core::types::{MountTree, MountType, PRINCIPAL_ALL, StorageConfig};

use crate::mapper;
use crate::service::{StoragesService, emit_applicable_hooks};

/// Placeholder principal token in global root mount paths; resolved to
/// the concrete username by the mount manager, never by this service.
pub const USER_TOKEN: &str = "$user";

/// Service for mounts defined by administrators in the global scope.
#[derive(Debug, Clone)]
pub struct GlobalStoragesService {
    store: Arc<dyn LegacyConfigStore>,
    cipher: Arc<dyn PasswordCipher>,
    hooks: Arc<dyn MountHookBus>,
}

impl GlobalStoragesService {
    /// Create the global service over the given collaborators.
    pub fn new(
        store: Arc<dyn LegacyConfigStore>,
        cipher: Arc<dyn PasswordCipher>,
        hooks: Arc<dyn MountHookBus>,
    ) -> Self {
        Self {
            store,
            cipher,
            hooks,
        }
    }
}

/// Elements of `a` not present in `b`, in `a`'s order.
fn subtract(a: &[String], b: &[String]) -> Vec<String> {
    a.iter().filter(|x| !b.contains(x)).cloned().collect()
}

#[async_trait]
impl StoragesService for GlobalStoragesService {
    fn cipher(&self) -> &dyn PasswordCipher {
        self.cipher.as_ref()
    }

    async fn read_legacy_config(&self) -> AppResult<MountTree> {
        self.store.read_tree(&ConfigScope::Global).await
    }

    async fn write_storages(&self, storages: &BTreeMap<i64, StorageConfig>) -> AppResult<()> {
        let mut tree = MountTree::new();

        for (id, storage) in storages {
            let encrypted = self.cipher.encrypt_options(&storage.backend_options)?;
            let entry = mapper::mount_entry(*id, storage, encrypted);
            let root = mapper::root_mount_path(USER_TOKEN, &storage.mount_point);

            if storage.is_applicable_to_all() {
                tree.insert(MountType::User, PRINCIPAL_ALL, root, entry);
            } else {
                for user in &storage.applicable_users {
                    tree.insert(MountType::User, user.clone(), root.clone(), entry.clone());
                }
                for group in &storage.applicable_groups {
                    tree.insert(MountType::Group, group.clone(), root.clone(), entry.clone());
                }
            }
        }

        self.store.write_tree(&ConfigScope::Global, &tree).await
    }

    async fn trigger_hooks(&self, storage: &StorageConfig, signal: HookSignal) {
        if storage.is_applicable_to_all() {
            self.hooks
                .emit(MountHookEvent::new(
                    signal,
                    &storage.mount_point,
                    MountType::User,
                    PRINCIPAL_ALL,
                ))
                .await;
            return;
        }

        emit_applicable_hooks(
            self.hooks.as_ref(),
            signal,
            &storage.mount_point,
            MountType::User,
            &storage.applicable_users,
        )
        .await;
        emit_applicable_hooks(
            self.hooks.as_ref(),
            signal,
            &storage.mount_point,
            MountType::Group,
            &storage.applicable_groups,
        )
        .await;
    }

    /// Dependent subsystems rely on seeing every removal before any
    /// addition, so all delete hooks fire first, with the implicit
    /// "all" transitions bracketing the explicit diff.
    async fn trigger_change_hooks(&self, old: &StorageConfig, new: &StorageConfig) {
        // A mount-point change is a move: delete everything old, create
        // everything new, no finer diff.
        if old.mount_point != new.mount_point {
            self.trigger_hooks(old, HookSignal::DeleteMount).await;
            self.trigger_hooks(new, HookSignal::CreateMount).await;
            return;
        }

        let user_deletions = subtract(&old.applicable_users, &new.applicable_users);
        let user_additions = subtract(&new.applicable_users, &old.applicable_users);
        let group_deletions = subtract(&old.applicable_groups, &new.applicable_groups);
        let group_additions = subtract(&new.applicable_groups, &old.applicable_groups);

        if old.is_applicable_to_all() {
            self.hooks
                .emit(MountHookEvent::new(
                    HookSignal::DeleteMount,
                    &old.mount_point,
                    MountType::User,
                    PRINCIPAL_ALL,
                ))
                .await;
        }

        emit_applicable_hooks(
            self.hooks.as_ref(),
            HookSignal::DeleteMount,
            &old.mount_point,
            MountType::User,
            &user_deletions,
        )
        .await;
        emit_applicable_hooks(
            self.hooks.as_ref(),
            HookSignal::DeleteMount,
            &old.mount_point,
            MountType::Group,
            &group_deletions,
        )
        .await;

        emit_applicable_hooks(
            self.hooks.as_ref(),
            HookSignal::CreateMount,
            &new.mount_point,
            MountType::User,
            &user_additions,
        )
        .await;
        emit_applicable_hooks(
            self.hooks.as_ref(),
            HookSignal::CreateMount,
            &new.mount_point,
            MountType::Group,
            &group_additions,
        )
        .await;

        if new.is_applicable_to_all() {
            self.hooks
                .emit(MountHookEvent::new(
                    HookSignal::CreateMount,
                    &new.mount_point,
                    MountType::User,
                    PRINCIPAL_ALL,
                ))
                .await;
        }
    }
}
