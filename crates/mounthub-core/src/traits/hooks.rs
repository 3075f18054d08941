//! The hook bus mount changes are announced on.

use async_trait::async_trait;

use crate::events::MountHookEvent;

/// Fire-and-forget delivery of mount change notifications.
///
/// Dependent subsystems (filesystem mount manager, sharing, encryption)
/// subscribe on the other side of this seam. Emission failures are the
/// bus implementation's concern; the services never consume a result.
#[async_trait]
pub trait MountHookBus: Send + Sync + std::fmt::Debug + 'static {
    /// Deliver one event.
    async fn emit(&self, event: MountHookEvent);
}
