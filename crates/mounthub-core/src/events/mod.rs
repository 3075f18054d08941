//! Domain events emitted by MountHub operations.
//!
//! Mount hook events are dispatched through the injected hook bus and
//! consumed by dependent subsystems (filesystem mount manager, sharing,
//! encryption). Delivery is fire-and-forget; no return value is consumed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::MountType;

/// The signal carried by a mount hook event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HookSignal {
    /// A mount became visible for a principal.
    CreateMount,
    /// A mount stopped being visible for a principal.
    DeleteMount,
}

/// One mount change notification for one applicable principal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MountHookEvent {
    /// Unique event ID.
    pub id: Uuid,
    /// When the event was emitted.
    pub timestamp: DateTime<Utc>,
    /// Created or deleted.
    pub signal: HookSignal,
    /// The mount point the change applies to.
    pub mount_point: String,
    /// Whether `applicable` names a user or a group.
    pub mount_type: MountType,
    /// The affected principal (a username, a group name, or `all`).
    pub applicable: String,
}

impl MountHookEvent {
    /// Create a new mount hook event stamped with a fresh id and timestamp.
    pub fn new(
        signal: HookSignal,
        mount_point: impl Into<String>,
        mount_type: MountType,
        applicable: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            signal,
            mount_point: mount_point.into(),
            mount_type,
            applicable: applicable.into(),
        }
    }
}
