//! Shared fixtures for the storages-service integration tests.

#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use serde_json::{Value, json};

use mounthub_core::result::AppResult;
use mounthub_core::traits::cipher::PasswordCipher;
use mounthub_core::traits::groups::GroupMembership;
use mounthub_core::types::{BackendOptions, MountEntry, StorageConfig};
use mounthub_service::{GlobalStoragesService, UserGlobalStoragesService, UserStoragesService};
use mounthub_store::{MemoryStore, RecordingHookBus};

/// Marker the test cipher prepends to persisted password values.
pub const SECRET_PREFIX: &str = "v1!";

/// Reversible test cipher: tags the `password` value on encrypt and
/// strips the tag on decrypt, so tests can assert what crossed the
/// persistence boundary.
#[derive(Debug, Clone, Default)]
pub struct TaggingCipher;

impl PasswordCipher for TaggingCipher {
    fn encrypt_options(&self, options: &BackendOptions) -> AppResult<BackendOptions> {
        let mut out = options.clone();
        if let Some(Value::String(password)) = options.get("password") {
            out.insert(
                "password".to_string(),
                Value::String(format!("{SECRET_PREFIX}{password}")),
            );
        }
        Ok(out)
    }

    fn decrypt_options(&self, options: &BackendOptions) -> AppResult<BackendOptions> {
        let mut out = options.clone();
        if let Some(Value::String(password)) = options.get("password") {
            let plain = password
                .strip_prefix(SECRET_PREFIX)
                .unwrap_or(password)
                .to_string();
            out.insert("password".to_string(), Value::String(plain));
        }
        Ok(out)
    }
}

/// Fixed user → groups table.
#[derive(Debug, Default)]
pub struct StaticGroups {
    memberships: HashMap<String, Vec<String>>,
}

impl StaticGroups {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_member(mut self, user: &str, group: &str) -> Self {
        self.memberships
            .entry(user.to_string())
            .or_default()
            .push(group.to_string());
        self
    }
}

#[async_trait::async_trait]
impl GroupMembership for StaticGroups {
    async fn is_in_group(&self, uid: &str, gid: &str) -> AppResult<bool> {
        Ok(self
            .memberships
            .get(uid)
            .is_some_and(|groups| groups.iter().any(|g| g == gid)))
    }
}

/// A global service wired to an in-memory store and a recording bus.
pub struct GlobalFixture {
    pub store: Arc<MemoryStore>,
    pub hooks: Arc<RecordingHookBus>,
    pub service: GlobalStoragesService,
}

pub fn global_fixture() -> GlobalFixture {
    let store = Arc::new(MemoryStore::new());
    let hooks = Arc::new(RecordingHookBus::new());
    let service =
        GlobalStoragesService::new(store.clone(), Arc::new(TaggingCipher), hooks.clone());
    GlobalFixture {
        store,
        hooks,
        service,
    }
}

/// A personal service for `user` wired to an in-memory store and a
/// recording bus.
pub struct UserFixture {
    pub store: Arc<MemoryStore>,
    pub hooks: Arc<RecordingHookBus>,
    pub service: UserStoragesService,
}

pub fn user_fixture(user: &str) -> UserFixture {
    let store = Arc::new(MemoryStore::new());
    let hooks = Arc::new(RecordingHookBus::new());
    let service =
        UserStoragesService::new(store.clone(), Arc::new(TaggingCipher), hooks.clone(), user);
    UserFixture {
        store,
        hooks,
        service,
    }
}

/// A read-only per-user projection over a shared in-memory store.
pub fn user_global_service(
    store: Arc<MemoryStore>,
    groups: StaticGroups,
    user: &str,
) -> UserGlobalStoragesService {
    UserGlobalStoragesService::new(store, Arc::new(TaggingCipher), Arc::new(groups), user)
}

/// A config with one plaintext password option.
pub fn sftp_config(mount_point: &str) -> StorageConfig {
    let mut config = StorageConfig::new(mount_point, "sftp");
    config
        .backend_options
        .insert("host".to_string(), json!("example.org"));
    config
        .backend_options
        .insert("password".to_string(), json!("secret"));
    config
}

/// A raw persisted leaf for seeding trees directly.
pub fn leaf(id: i64, class: &str) -> MountEntry {
    MountEntry {
        id,
        class: class.to_string(),
        options: BTreeMap::from([("host".to_string(), json!("example.org"))]),
        priority: None,
        mount_options: BTreeMap::new(),
    }
}
