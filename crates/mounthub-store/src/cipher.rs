//! Password cipher implementations.

use mounthub_core::result::AppResult;
use mounthub_core::traits::cipher::PasswordCipher;
use mounthub_core::types::BackendOptions;

/// Pass-through cipher: options are persisted as-is.
///
/// For deployments where the store medium is itself protected (file
/// permissions, encrypted volume). A real cipher plugs into the same
/// [`PasswordCipher`] seam.
#[derive(Debug, Clone, Default)]
pub struct PlainPasswordCipher;

impl PlainPasswordCipher {
    /// Create a pass-through cipher.
    pub fn new() -> Self {
        Self
    }
}

impl PasswordCipher for PlainPasswordCipher {
    fn encrypt_options(&self, options: &BackendOptions) -> AppResult<BackendOptions> {
        Ok(options.clone())
    }

    fn decrypt_options(&self, options: &BackendOptions) -> AppResult<BackendOptions> {
        Ok(options.clone())
    }
}
