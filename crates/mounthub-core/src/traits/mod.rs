//! Collaborator traits consumed by the storages-service family.
//!
//! These are the seams to subsystems this crate does not implement:
//! physical persistence, password encryption, the hook bus, and the
//! group-membership oracle.

pub mod cipher;
pub mod groups;
pub mod hooks;
pub mod store;

pub use cipher::PasswordCipher;
pub use groups::GroupMembership;
pub use hooks::MountHookBus;
pub use store::{ConfigScope, LegacyConfigStore};
