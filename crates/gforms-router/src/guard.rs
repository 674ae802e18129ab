//! Double-processing guard
//!
//! A submission carrying a routing marker is destined for the marker's site.
//! Form ids are only unique per site, so the embedded form's id may happen to
//! match a local form on the hosting site. If the engine's native processing
//! ran, the entry would land in the wrong form on the wrong site, or be
//! stored twice. The guard runs at the earliest lifecycle point and suppresses
//! native processing before the engine can act.

use crate::cycle::RequestCycle;
use crate::state::RouteState;
use gforms_embed::NATIVE_PROCESS_HANDLER;
use tracing::debug;

/// Suppresses the form engine's native submission handling for marked
/// requests.
#[derive(Clone, Copy)]
pub struct DoubleProcessingGuard;

impl DoubleProcessingGuard {
    /// Create a guard
    pub fn new() -> Self {
        Self
    }

    /// Inspect the inbound submission; when a routing marker is present,
    /// suppress native processing for this request. Returns whether
    /// suppression happened.
    ///
    /// Suppression applies for every marker value, including the hosting
    /// site's own id: the router owns every marked submission.
    pub fn suppress_native(&self, cycle: &mut RequestCycle) -> bool {
        let Some(owner) = cycle.request.site_marker() else {
            return false;
        };

        debug!(owner, "marked submission, suppressing native form processing");
        cycle.suppress(NATIVE_PROCESS_HANDLER);
        if cycle.route_state == RouteState::Unrouted {
            cycle.route_state = RouteState::Skipped;
        }
        true
    }
}

impl Default for DoubleProcessingGuard {
    fn default() -> Self {
        Self::new()
    }
}
