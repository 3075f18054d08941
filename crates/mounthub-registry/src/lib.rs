//! # mounthub-registry
//!
//! Catalog of available storage backends and authentication mechanisms,
//! with visibility rules (who may configure what) and dependency
//! availability gating. Populated once at bootstrap and injected into
//! the services that consult it.

pub mod auth;
pub mod backend;
pub mod service;
pub mod visibility;

pub use auth::AuthMechanism;
pub use backend::Backend;
pub use service::BackendService;
pub use visibility::Visibility;
