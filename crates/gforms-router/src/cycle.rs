//! Per-request cycle

use crate::state::RouteState;
use gforms_common::{HookContext, SubmissionRequest, SiteId};
use gforms_tenant::SiteContext;
use std::collections::HashSet;

/// Everything one in-flight request carries through the lifecycle points:
/// the inbound submission (empty for plain page renders), the ambient site
/// context, the handlers suppressed for this request, and the routing state.
///
/// Owned by the host dispatcher; one request, one cycle, discarded together.
pub struct RequestCycle {
    /// Inbound POST fields
    pub request: SubmissionRequest,
    /// Ambient "site being acted upon" stack
    pub site: SiteContext,
    /// Routing state machine position
    pub route_state: RouteState,
    suppressed: HashSet<String>,
}

impl RequestCycle {
    /// Start a cycle for a plain page render on the hosting site
    pub fn new(hosting: SiteId) -> Self {
        Self::with_request(hosting, SubmissionRequest::new())
    }

    /// Start a cycle for an inbound submission on the hosting site
    pub fn with_request(hosting: SiteId, request: SubmissionRequest) -> Self {
        Self {
            request,
            site: SiteContext::new(hosting),
            route_state: RouteState::Unrouted,
            suppressed: HashSet::new(),
        }
    }

    /// Suppress a lifecycle handler for the remainder of this request.
    /// Idempotent, and safe for handlers that were never registered.
    pub fn suppress(&mut self, handler_id: &str) {
        self.suppressed.insert(handler_id.to_string());
    }
}

impl HookContext for RequestCycle {
    fn is_suppressed(&self, handler_id: &str) -> bool {
        self.suppressed.contains(handler_id)
    }
}
