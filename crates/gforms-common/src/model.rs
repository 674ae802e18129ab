//! Shared site and submission model

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Site ID
///
/// A stable integer identifying one site (tenant) of the platform.
/// `0` is never a valid site id; it means "unresolved".
pub type SiteId = u64;

/// POST field that round-trips the owning site's id back on submission.
///
/// This is the only cross-request state the system produces, and it travels
/// client-side inside the rendered markup.
pub const SITE_MARKER_FIELD: &str = "gravityform_global_site_id";

/// Fixed user-facing fragment returned when a form cannot be rendered.
pub const NOT_FOUND_FRAGMENT: &str = "<p>Oops! This form could not be found.</p>";

/// An inbound form submission as seen by the routing layer.
///
/// Carries the POSTed field map; nothing else about the HTTP request is
/// relevant to routing.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SubmissionRequest {
    /// Raw POST fields
    pub fields: HashMap<String, String>,
}

impl SubmissionRequest {
    /// Create an empty submission (no POST fields)
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a submission from field pairs
    pub fn from_fields<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Read the routing marker, if present and well-formed.
    ///
    /// Absent, non-numeric, negative, or zero values all mean "no marker":
    /// the submission is processed locally, unchanged.
    pub fn site_marker(&self) -> Option<SiteId> {
        self.fields
            .get(SITE_MARKER_FIELD)?
            .trim()
            .parse::<SiteId>()
            .ok()
            .filter(|id| *id > 0)
    }
}
