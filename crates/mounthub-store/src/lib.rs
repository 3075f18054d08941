//! # mounthub-store
//!
//! Concrete collaborator implementations for the storages-service
//! family: a JSON-file legacy config store (one document per scope), an
//! in-memory store for tests and embedding, a pass-through password
//! cipher, and hook bus implementations.

pub mod cipher;
pub mod hooks;
pub mod json_file;
pub mod memory;

pub use cipher::PlainPasswordCipher;
pub use hooks::{RecordingHookBus, TracingHookBus};
pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
