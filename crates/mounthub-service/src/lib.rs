//! # mounthub-service
//!
//! The storages-service family: CRUD over external-storage mount
//! configurations backed by the legacy nested structure, with
//! change-hook dispatch for dependent subsystems.
//!
//! - [`GlobalStoragesService`] — administrator-managed mounts applying
//!   to users, groups, or everyone.
//! - [`UserStoragesService`] — self-service mounts owned by one user.
//! - [`UserGlobalStoragesService`] — read-only per-user projection of
//!   the global mounts.

pub mod global;
pub mod mapper;
pub mod service;
pub mod user;
pub mod user_global;

pub use global::GlobalStoragesService;
pub use service::{StoragesService, generate_next_id};
pub use user::UserStoragesService;
pub use user_global::UserGlobalStoragesService;
