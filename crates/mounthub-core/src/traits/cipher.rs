//! Password encryption at the persistence boundary.

use crate::result::AppResult;
use crate::types::BackendOptions;

/// Encrypts and decrypts sensitive backend option values.
///
/// Applied only when crossing the persistence boundary: in-memory
/// [`StorageConfig`](crate::types::StorageConfig) objects always hold
/// plaintext. Which keys count as sensitive is the implementation's
/// decision (typically `password`).
pub trait PasswordCipher: Send + Sync + std::fmt::Debug + 'static {
    /// Return a copy of `options` with sensitive values encrypted.
    fn encrypt_options(&self, options: &BackendOptions) -> AppResult<BackendOptions>;

    /// Return a copy of `options` with sensitive values decrypted.
    fn decrypt_options(&self, options: &BackendOptions) -> AppResult<BackendOptions>;
}
