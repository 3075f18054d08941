//! Storage backend descriptors.

use std::fmt;
use std::sync::Arc;

use crate::visibility::Visibility;

/// Dependency availability probe: returns one message per missing
/// dependency, empty when the backend is usable.
pub type DependencyCheck = Arc<dyn Fn() -> Vec<String> + Send + Sync>;

/// Descriptor for one pluggable storage backend (SFTP, S3, SMB, …).
///
/// Backends are registered once at bootstrap; the registry indexes them
/// under their canonical identifier and every declared alias.
#[derive(Clone)]
pub struct Backend {
    /// Canonical identifier, e.g. `"sftp"`.
    identifier: String,
    /// Alternate identifiers older configurations may still carry.
    aliases: Vec<String>,
    /// Human-readable label.
    name: String,
    /// Auth-mechanism schemes this backend can consume.
    auth_schemes: Vec<String>,
    /// Where this backend may currently be configured from.
    visibility: Visibility,
    /// Upper bound on visibility; expanding past this is never allowed.
    allowed_visibility: Visibility,
    /// Optional dependency probe; `None` means always available.
    dependency_check: Option<DependencyCheck>,
}

impl Backend {
    /// Create a backend descriptor with default (personal + admin)
    /// visibility and no dependency check.
    pub fn new(identifier: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            aliases: Vec::new(),
            name: name.into(),
            auth_schemes: Vec::new(),
            visibility: Visibility::DEFAULT,
            allowed_visibility: Visibility::DEFAULT,
            dependency_check: None,
        }
    }

    /// Declare an alternate identifier.
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Declare a consumable auth scheme.
    pub fn with_auth_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.auth_schemes.push(scheme.into());
        self
    }

    /// Set both the current and the allowed visibility.
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self.allowed_visibility = visibility;
        self
    }

    /// Attach a dependency availability probe.
    pub fn with_dependency_check(
        mut self,
        check: impl Fn() -> Vec<String> + Send + Sync + 'static,
    ) -> Self {
        self.dependency_check = Some(Arc::new(check));
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

    /// Auth schemes this backend can consume.
    pub fn auth_schemes(&self) -> &[String] {
        &self.auth_schemes
    }

    /// Current visibility.
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Clear visibility flags, e.g. stripping PERSONAL for backends not
    /// on the personal allow-list.
    pub fn remove_visibility(&mut self, visibility: Visibility) {
        self.visibility = self.visibility.without(visibility);
    }

    /// Add visibility flags, capped by the allowed visibility.
    pub fn add_visibility(&mut self, visibility: Visibility) {
        self.visibility = self
            .visibility
            .with(visibility.intersect(self.allowed_visibility));
    }

    /// Run the dependency probe. Empty result means available.
    pub fn check_dependencies(&self) -> Vec<String> {
        match &self.dependency_check {
            Some(check) => check(),
            None => Vec::new(),
        }
    }

    /// Whether the dependency probe reports no missing dependencies.
    pub fn is_available(&self) -> bool {
        self.check_dependencies().is_empty()
    }
}

impl fmt::Debug for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Backend")
            .field("identifier", &self.identifier)
            .field("aliases", &self.aliases)
            .field("name", &self.name)
            .field("auth_schemes", &self.auth_schemes)
            .field("visibility", &self.visibility)
            .field("allowed_visibility", &self.allowed_visibility)
            .field("has_dependency_check", &self.dependency_check.is_some())
            .finish()
    }
}
