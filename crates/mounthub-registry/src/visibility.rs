//! Visibility flags for backends and auth mechanisms.

use serde::{Deserialize, Serialize};

/// Where an entity may be configured from: the personal-mount UI, the
/// admin UI, both, or neither.
///
/// A small flag-set with named predicates; callers never test raw bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Visibility(u8);

impl Visibility {
    /// Visible to nobody.
    pub const NONE: Visibility = Visibility(0);
    /// Configurable by users for themselves.
    pub const PERSONAL: Visibility = Visibility(1);
    /// Configurable by administrators.
    pub const ADMIN: Visibility = Visibility(2);
    /// Both personal and admin.
    pub const DEFAULT: Visibility = Visibility(1 | 2);

    /// Whether every flag of `other` is set in `self`.
    pub fn contains(self, other: Visibility) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether personal users may configure this entity.
    pub fn is_personal_visible(self) -> bool {
        self.contains(Self::PERSONAL)
    }

    /// Whether administrators may configure this entity.
    pub fn is_admin_visible(self) -> bool {
        self.contains(Self::ADMIN)
    }

    /// Union of two flag-sets.
    pub fn with(self, other: Visibility) -> Visibility {
        Visibility(self.0 | other.0)
    }

    /// `self` with the flags of `other` cleared.
    pub fn without(self, other: Visibility) -> Visibility {
        Visibility(self.0 & !other.0)
    }

    /// Intersection of two flag-sets.
    pub fn intersect(self, other: Visibility) -> Visibility {
        Visibility(self.0 & other.0)
    }
}

impl Default for Visibility {
    fn default() -> Self {
        Self::DEFAULT
    }
}
