//! Hook bus implementations.

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::info;

use mounthub_core::events::MountHookEvent;
use mounthub_core::traits::hooks::MountHookBus;

/// Logs every hook event; the default bus when no dependent subsystem
/// is wired in.
#[derive(Debug, Clone, Default)]
pub struct TracingHookBus;

impl TracingHookBus {
    /// Create a logging bus.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MountHookBus for TracingHookBus {
    async fn emit(&self, event: MountHookEvent) {
        info!(
            signal = ?event.signal,
            mount_point = %event.mount_point,
            mount_type = %event.mount_type,
            applicable = %event.applicable,
            "Mount hook"
        );
    }
}

/// Captures events in emission order; used by tests asserting hook
/// ordering.
#[derive(Debug, Default)]
pub struct RecordingHookBus {
    events: Mutex<Vec<MountHookEvent>>,
}

impl RecordingHookBus {
    /// Create an empty recording bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// All events emitted so far, oldest first.
    pub async fn recorded(&self) -> Vec<MountHookEvent> {
        self.events.lock().await.clone()
    }

    /// Drain and return all recorded events.
    pub async fn take(&self) -> Vec<MountHookEvent> {
        std::mem::take(&mut *self.events.lock().await)
    }
}

#[async_trait]
impl MountHookBus for RecordingHookBus {
    async fn emit(&self, event: MountHookEvent) {
        self.events.lock().await.push(event);
    }
}
