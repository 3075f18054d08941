//! # mounthub-core
//!
//! Core crate for MountHub. Contains collaborator traits, configuration
//! schemas, the mount-configuration entity types, domain events, and the
//! unified error system.
//!
//! This crate has **no** internal dependencies on other MountHub crates.

pub mod config;
pub mod error;
pub mod events;
pub mod logging;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
