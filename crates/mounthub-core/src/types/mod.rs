//! Domain types shared across MountHub crates.

pub mod mount;
pub mod storage_config;

pub use mount::{BackendOptions, MountEntry, MountTree, MountType, PRINCIPAL_ALL};
pub use storage_config::{StorageConfig, StorageStatus};
