//! Platform site directory seam

use crate::model::SiteRecord;
use dashmap::DashMap;
use gforms_common::SiteId;
use thiserror::Error;

/// Directory lookup failures
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DirectoryError {
    /// No site is registered for the given host
    #[error("no site registered for host '{0}'")]
    UnknownHost(String),
    /// No site exists with the given id
    #[error("no site with id {0}")]
    UnknownSite(SiteId),
}

/// The platform's site directory.
///
/// Owned by the host platform; this system only reads it. Lookup failures are
/// ordinary outcomes here; callers degrade to safe defaults rather than
/// propagating them out of a render or routing call.
pub trait SiteDirectory: Send + Sync {
    /// Resolve the site that owns the given host/domain
    fn site_for_host(&self, host: &str) -> Result<SiteId, DirectoryError>;

    /// Fetch the directory record for a site id
    fn site_details(&self, id: SiteId) -> Result<SiteRecord, DirectoryError>;
}

/// Directory backed by concurrent maps; reference impl for tests and embedding.
pub struct InMemorySiteDirectory {
    records: DashMap<SiteId, SiteRecord>,
    by_host: DashMap<String, SiteId>,
}

impl InMemorySiteDirectory {
    /// Create an empty directory
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
            by_host: DashMap::new(),
        }
    }

    /// Add or replace a site record
    pub fn insert(&self, record: SiteRecord) {
        self.by_host.insert(record.domain.clone(), record.id);
        self.records.insert(record.id, record);
    }

    /// Number of registered sites
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the directory is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for InMemorySiteDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl SiteDirectory for InMemorySiteDirectory {
    fn site_for_host(&self, host: &str) -> Result<SiteId, DirectoryError> {
        self.by_host
            .get(host)
            .map(|entry| *entry)
            .ok_or_else(|| DirectoryError::UnknownHost(host.to_string()))
    }

    fn site_details(&self, id: SiteId) -> Result<SiteRecord, DirectoryError> {
        self.records
            .get(&id)
            .map(|entry| entry.clone())
            .ok_or(DirectoryError::UnknownSite(id))
    }
}
