//! Group membership lookups.

use async_trait::async_trait;

use crate::result::AppResult;

/// Answers whether a user belongs to a group.
///
/// Backed by the user directory (database, LDAP, …) outside this
/// subsystem.
#[async_trait]
pub trait GroupMembership: Send + Sync + std::fmt::Debug + 'static {
    /// Whether `uid` is a member of `gid`.
    async fn is_in_group(&self, uid: &str, gid: &str) -> AppResult<bool>;
}
