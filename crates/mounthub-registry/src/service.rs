//! Backend service — registration and personal-visibility gating.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::info;

use mounthub_core::config::mounting::MountingConfig;

use crate::auth::AuthMechanism;
use crate::backend::Backend;
use crate::visibility::Visibility;

/// Registry of available backends and auth mechanisms.
///
/// Built once at bootstrap from the mounting policy and injected into
/// every service that lists configurable backends. Registration strips
/// the PERSONAL visibility flag from anything the policy keeps out of
/// the personal-mount UI; consumers never re-check the policy.
#[derive(Debug)]
pub struct BackendService {
    /// Whether personal mounting is allowed at all.
    user_mounting_allowed: bool,
    /// Backend identifiers eligible for personal mounting.
    user_mounting_backends: HashSet<String>,
    /// Identifier (canonical or alias) → backend.
    backends: HashMap<String, Arc<Backend>>,
    /// Identifier (canonical or alias) → auth mechanism.
    auth_mechanisms: HashMap<String, Arc<AuthMechanism>>,
}

impl BackendService {
    /// Build an empty registry applying the given mounting policy.
    pub fn from_config(config: &MountingConfig) -> Self {
        Self {
            user_mounting_allowed: config.allow_user_mounting,
            user_mounting_backends: config.user_mounting_backends.iter().cloned().collect(),
            backends: HashMap::new(),
            auth_mechanisms: HashMap::new(),
        }
    }

    /// Whether personal mounting is allowed at all.
    pub fn user_mounting_allowed(&self) -> bool {
        self.user_mounting_allowed
    }

    /// Register a backend, indexing it under its canonical identifier
    /// and every alias. Personal visibility is stripped when the policy
    /// disallows it.
    pub fn register_backend(&mut self, mut backend: Backend) {
        if !self.is_allowed_user_backend(&backend) {
            backend.remove_visibility(Visibility::PERSONAL);
        }

        info!(
            identifier = backend.identifier(),
            personal = backend.visibility().is_personal_visible(),
            "Registering storage backend"
        );

        let backend = Arc::new(backend);
        for identifier in backend.identifiers() {
            self.backends.insert(identifier.to_string(), backend.clone());
        }
    }

    /// Register an auth mechanism, indexing it under its canonical
    /// identifier and every alias.
    pub fn register_auth_mechanism(&mut self, mut mechanism: AuthMechanism) {
        if !self.is_allowed_auth_mechanism(&mechanism) {
            mechanism.remove_visibility(Visibility::PERSONAL);
        }

        info!(
            identifier = mechanism.identifier(),
            scheme = mechanism.scheme(),
            "Registering auth mechanism"
        );

        let mechanism = Arc::new(mechanism);
        for identifier in mechanism.identifiers() {
            self.auth_mechanisms
                .insert(identifier.to_string(), mechanism.clone());
        }
    }

    fn is_allowed_user_backend(&self, backend: &Backend) -> bool {
        self.user_mounting_allowed
            && backend
                .identifiers()
                .iter()
                .any(|identifier| self.user_mounting_backends.contains(*identifier))
    }

    fn is_allowed_auth_mechanism(&self, _mechanism: &AuthMechanism) -> bool {
        // No per-mechanism personal gating policy exists yet; every
        // mechanism is allowed until one does.
        true
    }

    /// Look up a backend by canonical identifier or alias.
    pub fn backend(&self, identifier: &str) -> Option<Arc<Backend>> {
        self.backends.get(identifier).cloned()
    }

    /// All backends, one per canonical identifier, sorted.
    pub fn backends(&self) -> Vec<Arc<Backend>> {
        let mut canonical: Vec<Arc<Backend>> = self
            .backends
            .iter()
            .filter(|(key, backend)| key.as_str() == backend.identifier())
            .map(|(_, backend)| backend.clone())
            .collect();
        canonical.sort_by(|a, b| a.identifier().cmp(b.identifier()));
        canonical
    }

    /// Backends whose dependency probe reports no missing dependencies.
    pub fn available_backends(&self) -> Vec<Arc<Backend>> {
        self.backends()
            .into_iter()
            .filter(|backend| backend.is_available())
            .collect()
    }

    /// Backends visible in the admin UI.
    pub fn admin_backends(&self) -> Vec<Arc<Backend>> {
        self.backends()
            .into_iter()
            .filter(|backend| backend.visibility().is_admin_visible())
            .collect()
    }

    /// Backends visible in the personal-mount UI.
    pub fn personal_backends(&self) -> Vec<Arc<Backend>> {
        self.backends()
            .into_iter()
            .filter(|backend| backend.visibility().is_personal_visible())
            .collect()
    }

    /// Look up an auth mechanism by canonical identifier or alias.
    pub fn auth_mechanism(&self, identifier: &str) -> Option<Arc<AuthMechanism>> {
        self.auth_mechanisms.get(identifier).cloned()
    }

    /// All auth mechanisms, one per canonical identifier, sorted.
    pub fn auth_mechanisms(&self) -> Vec<Arc<AuthMechanism>> {
        let mut canonical: Vec<Arc<AuthMechanism>> = self
            .auth_mechanisms
            .iter()
            .filter(|(key, mechanism)| key.as_str() == mechanism.identifier())
            .map(|(_, mechanism)| mechanism.clone())
            .collect();
        canonical.sort_by(|a, b| a.identifier().cmp(b.identifier()));
        canonical
    }

    /// Auth mechanisms whose scheme is one of the given schemes.
    pub fn auth_mechanisms_by_scheme(&self, schemes: &[&str]) -> Vec<Arc<AuthMechanism>> {
        self.auth_mechanisms()
            .into_iter()
            .filter(|mechanism| schemes.contains(&mechanism.scheme()))
            .collect()
    }
}
