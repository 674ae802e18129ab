//! Site identity model

use gforms_common::SiteId;
use serde::{Deserialize, Serialize};

/// The resolved identity of the site that owns a form.
///
/// Derived per request from the platform directory, never stored. An `id` of
/// `0` means resolution failed; callers must treat it as "unresolvable", not
/// as a site.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteIdentity {
    /// Site id (`0` = unresolved)
    pub id: SiteId,
    /// Canonical domain of the site (may be empty when unresolved)
    pub domain: String,
}

impl SiteIdentity {
    /// Build an identity from its parts
    pub fn new(id: SiteId, domain: impl Into<String>) -> Self {
        Self {
            id,
            domain: domain.into(),
        }
    }

    /// Whether this identity points at a real site
    pub fn is_resolved(&self) -> bool {
        self.id > 0
    }
}

/// A directory entry for one site of the platform
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteRecord {
    /// Site id
    pub id: SiteId,
    /// Canonical domain
    pub domain: String,
    /// Display name
    pub name: String,
}

impl SiteRecord {
    /// Create a record
    pub fn new(id: SiteId, domain: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id,
            domain: domain.into(),
            name: name.into(),
        }
    }
}
