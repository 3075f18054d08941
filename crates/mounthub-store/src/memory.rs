//! In-memory legacy config store for tests and embedding.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use mounthub_core::result::AppResult;
use mounthub_core::traits::store::{ConfigScope, LegacyConfigStore};
use mounthub_core::types::MountTree;

/// Stores one tree per scope behind an async lock.
#[derive(Debug, Default)]
pub struct MemoryStore {
    trees: RwLock<HashMap<ConfigScope, MountTree>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a scope with a pre-built tree.
    pub async fn seed(&self, scope: ConfigScope, tree: MountTree) {
        let mut trees = self.trees.write().await;
        trees.insert(scope, tree);
    }

    /// Snapshot the current tree of a scope (empty when never written).
    pub async fn snapshot(&self, scope: &ConfigScope) -> MountTree {
        let trees = self.trees.read().await;
        trees.get(scope).cloned().unwrap_or_default()
    }
}

#[async_trait]
impl LegacyConfigStore for MemoryStore {
    async fn read_tree(&self, scope: &ConfigScope) -> AppResult<MountTree> {
        Ok(self.snapshot(scope).await)
    }

    async fn write_tree(&self, scope: &ConfigScope, tree: &MountTree) -> AppResult<()> {
        let mut trees = self.trees.write().await;
        trees.insert(scope.clone(), tree.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mounthub_core::types::{MountEntry, MountType};
    use std::collections::BTreeMap;

    #[tokio::test]
    async fn test_read_back_what_was_written() {
        let store = MemoryStore::new();
        let mut tree = MountTree::new();
        tree.insert(
            MountType::Group,
            "staff",
            "/$user/files/tools",
            MountEntry {
                id: 1,
                class: "smb".to_string(),
                options: BTreeMap::new(),
                priority: Some(50),
                mount_options: BTreeMap::new(),
            },
        );

        store.write_tree(&ConfigScope::Global, &tree).await.unwrap();
        assert_eq!(store.read_tree(&ConfigScope::Global).await.unwrap(), tree);
        assert!(
            store
                .read_tree(&ConfigScope::personal("alice"))
                .await
                .unwrap()
                .is_empty()
        );
    }
}
