//! The generic storages service: CRUD over a flat map of configs, with
//! scope-specific persistence and hook dispatch supplied by each
//! concrete service.

use std::collections::BTreeMap;

use async_trait::async_trait;

use mounthub_core::error::AppError;
use mounthub_core::events::{HookSignal, MountHookEvent};
use mounthub_core::result::AppResult;
use mounthub_core::traits::cipher::PasswordCipher;
use mounthub_core::traits::hooks::MountHookBus;
use mounthub_core::types::{MountTree, MountType, StorageConfig, StorageStatus};

/// Next free id: 1 for an empty map, max + 1 otherwise.
///
/// Racy under concurrent writers: two simultaneous adds working from
/// independent snapshots can compute the same id and clobber each
/// other. The legacy persistence format has the same property; a
/// database-backed store should use a durable sequence instead.
pub fn generate_next_id(storages: &BTreeMap<i64, StorageConfig>) -> i64 {
    storages.keys().max().map_or(1, |max| max + 1)
}

/// Emit one hook event per applicable principal.
pub async fn emit_applicable_hooks(
    bus: &dyn MountHookBus,
    signal: HookSignal,
    mount_point: &str,
    mount_type: MountType,
    applicables: &[String],
) {
    for applicable in applicables {
        bus.emit(MountHookEvent::new(
            signal,
            mount_point,
            mount_type,
            applicable,
        ))
        .await;
    }
}

/// CRUD over one scope's mount configurations.
///
/// Provided methods implement the scope-independent logic; concrete
/// services supply the legacy read, the fan-out write, and hook
/// dispatch. Persistence always completes before any hook fires, and
/// every operation re-reads the full configuration — nothing is kept
/// resident between calls (last writer wins, as the legacy format
/// always worked).
#[async_trait]
pub trait StoragesService: Send + Sync {
    /// The cipher applied to backend options at the persistence
    /// boundary.
    fn cipher(&self) -> &dyn PasswordCipher;

    /// Read the raw legacy tree for this service's scope.
    async fn read_legacy_config(&self) -> AppResult<MountTree>;

    /// Expand the flat map into the legacy tree and persist it.
    async fn write_storages(&self, storages: &BTreeMap<i64, StorageConfig>) -> AppResult<()>;

    /// Fire create/delete hooks for every principal a config applies to.
    async fn trigger_hooks(&self, storage: &StorageConfig, signal: HookSignal);

    /// Fire the minimal hook set describing the difference between two
    /// versions of one config.
    async fn trigger_change_hooks(&self, old: &StorageConfig, new: &StorageConfig);

    /// Scope-specific post-read filter; the identity for most scopes.
    fn filter_storages(
        &self,
        storages: BTreeMap<i64, StorageConfig>,
    ) -> BTreeMap<i64, StorageConfig> {
        storages
    }

    /// Read all configs of this scope as a flat map keyed by id, with
    /// backend options decrypted.
    async fn read_config(&self) -> AppResult<BTreeMap<i64, StorageConfig>> {
        let tree = self.read_legacy_config().await?;
        let mut storages = crate::mapper::flatten(&tree);
        for storage in storages.values_mut() {
            storage.backend_options = self.cipher().decrypt_options(&storage.backend_options)?;
        }
        Ok(self.filter_storages(storages))
    }

    /// All configs of this scope, ordered by id.
    async fn storages(&self) -> AppResult<Vec<StorageConfig>> {
        Ok(self.read_config().await?.into_values().collect())
    }

    /// One config by id.
    async fn get_storage(&self, id: i64) -> AppResult<StorageConfig> {
        self.read_config()
            .await?
            .remove(&id)
            .ok_or_else(|| AppError::not_found(format!("Storage with id {id} not found")))
    }

    /// Persist a new config under a freshly assigned id, fire its
    /// create hooks, and return it stamped with the id and a success
    /// status.
    async fn add_storage(&self, new_storage: StorageConfig) -> AppResult<StorageConfig> {
        let mut storages = self.read_config().await?;
        let id = generate_next_id(&storages);

        let mut storage = new_storage;
        storage.id = Some(id);
        storages.insert(id, storage.clone());

        self.write_storages(&storages).await?;
        self.trigger_hooks(&storage, HookSignal::CreateMount).await;

        storage.status = Some(StorageStatus::Success);
        Ok(storage)
    }

    /// Replace an existing config, fire the change diff, and return the
    /// freshly re-read stored version.
    async fn update_storage(&self, updated: StorageConfig) -> AppResult<StorageConfig> {
        let id = updated
            .id
            .ok_or_else(|| AppError::validation("Cannot update a storage without an id"))?;

        let mut storages = self.read_config().await?;
        let old = storages
            .remove(&id)
            .ok_or_else(|| AppError::not_found(format!("Storage with id {id} not found")))?;
        storages.insert(id, updated.clone());

        self.write_storages(&storages).await?;
        self.trigger_change_hooks(&old, &updated).await;

        self.get_storage(id).await
    }

    /// Delete a config and fire its delete hooks.
    async fn remove_storage(&self, id: i64) -> AppResult<()> {
        let mut storages = self.read_config().await?;
        let old = storages
            .remove(&id)
            .ok_or_else(|| AppError::not_found(format!("Storage with id {id} not found")))?;

        self.write_storages(&storages).await?;
        self.trigger_hooks(&old, HookSignal::DeleteMount).await;
        Ok(())
    }
}
