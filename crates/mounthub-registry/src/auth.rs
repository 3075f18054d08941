//! Authentication mechanism descriptors.

use crate::visibility::Visibility;

/// The scheme of mechanisms that need no credentials.
pub const SCHEME_NULL: &str = "null";
/// Username/password credentials.
pub const SCHEME_PASSWORD: &str = "password";
/// OAuth 2.0 token flows.
pub const SCHEME_OAUTH2: &str = "oauth2";
/// SSH public-key credentials.
pub const SCHEME_PUBLIC_KEY: &str = "publickey";

/// Descriptor for one credential-acquisition strategy, usable by any
/// backend that consumes its scheme.
#[derive(Debug, Clone)]
pub struct AuthMechanism {
    /// Canonical identifier, e.g. `"password::password"`.
    identifier: String,
    /// Alternate identifiers older configurations may still carry.
    aliases: Vec<String>,
    /// Human-readable label.
    name: String,
    /// The scheme this mechanism implements.
    scheme: String,
    /// Where this mechanism may currently be configured from.
    visibility: Visibility,
}

impl AuthMechanism {
    /// Create a mechanism descriptor with default visibility.
    pub fn new(
        identifier: impl Into<String>,
        name: impl Into<String>,
        scheme: impl Into<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            aliases: Vec::new(),
            name: name.into(),
            scheme: scheme.into(),
            visibility: Visibility::DEFAULT,
        }
    }

    /// Declare an alternate identifier.
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Set the visibility.
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// The canonical identifier.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Canonical identifier followed by all aliases.
    pub fn identifiers(&self) -> Vec<&str> {
        std::iter::once(self.identifier.as_str())
            .chain(self.aliases.iter().map(String::as_str))
            .collect()
    }

    /// The human-readable label.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The scheme this mechanism implements.
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Current visibility.
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Clear visibility flags.
    pub fn remove_visibility(&mut self, visibility: Visibility) {
        self.visibility = self.visibility.without(visibility);
    }
}
