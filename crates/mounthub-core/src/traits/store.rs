//! Physical persistence of the legacy nested mount structure.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::MountTree;

/// Which legacy document a read/write addresses.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConfigScope {
    /// The administrator-managed document shared by all users.
    Global,
    /// The personal document of one user.
    Personal(String),
}

impl ConfigScope {
    /// Personal scope for the given user id.
    pub fn personal(uid: impl Into<String>) -> Self {
        Self::Personal(uid.into())
    }
}

/// Trait for the physical storage of the legacy nested structure.
///
/// Implementations exist for a JSON file per scope and an in-memory map.
/// Reads of a scope that was never written return an empty tree; a failed
/// read or write surfaces as a persistence error and aborts the whole
/// operation — no partial state is ever committed.
#[async_trait]
pub trait LegacyConfigStore: Send + Sync + std::fmt::Debug + 'static {
    /// Read the full nested structure for one scope.
    async fn read_tree(&self, scope: &ConfigScope) -> AppResult<MountTree>;

    /// Replace the full nested structure for one scope.
    async fn write_tree(&self, scope: &ConfigScope, tree: &MountTree) -> AppResult<()>;
}
