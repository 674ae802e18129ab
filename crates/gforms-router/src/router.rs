//! Submission router
//!
//! The late half of the two-phase design: the guard has already kept the
//! engine's native handling away from marked submissions; the router now
//! delegates them to the owning site's engine. The split is necessary because
//! suppression must happen before the engine acts, while delegation must
//! happen at the routing point after initialization.

use crate::cycle::RequestCycle;
use crate::state::RouteState;
use gforms_embed::FormEngine;
use std::sync::Arc;
use tracing::{debug, warn};

/// Delegates marked submissions to the owning site's processing.
#[derive(Clone)]
pub struct SubmissionRouter {
    engine: Arc<dyn FormEngine>,
}

impl SubmissionRouter {
    /// Create a router over the form engine
    pub fn new(engine: Arc<dyn FormEngine>) -> Self {
        Self { engine }
    }

    /// Route the cycle's submission, if it carries a marker.
    ///
    /// Switches to the marker's site for the duration of processing and
    /// restores the hosting site afterwards; a marker naming the hosting site
    /// itself delegates directly with no context mutation. Unmarked requests
    /// and an unavailable engine are no-ops. Returns the resulting state.
    pub fn dispatch(&self, cycle: &mut RequestCycle) -> RouteState {
        let Some(owner) = cycle.request.site_marker() else {
            return cycle.route_state;
        };

        if !self.engine.is_available() {
            warn!(owner, "form engine unavailable, dropping marked submission");
            return cycle.route_state;
        }

        cycle.route_state = RouteState::Routed;
        debug!(owner, host = cycle.site.current(), "routing submission to owning site");

        let site = &cycle.site;
        let request = &cycle.request;
        site.with_site(owner, || self.engine.process_submission(site, request));

        cycle.route_state = RouteState::Processed;
        cycle.route_state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gforms_common::{SubmissionRequest, SiteId, SITE_MARKER_FIELD};
    use gforms_embed::EmbedDescriptor;
    use gforms_tenant::SiteContext;
    use parking_lot::Mutex;

    struct RecordingEngine {
        available: bool,
        processed_under: Mutex<Vec<SiteId>>,
    }

    impl RecordingEngine {
        fn new() -> Self {
            Self {
                available: true,
                processed_under: Mutex::new(Vec::new()),
            }
        }

        fn unavailable() -> Self {
            Self {
                available: false,
                processed_under: Mutex::new(Vec::new()),
            }
        }
    }

    impl FormEngine for RecordingEngine {
        fn is_available(&self) -> bool {
            self.available
        }

        fn render(
            &self,
            _site: &SiteContext,
            _descriptor: &EmbedDescriptor,
            _content: Option<&str>,
        ) -> String {
            String::new()
        }

        fn process_submission(&self, site: &SiteContext, _request: &SubmissionRequest) {
            self.processed_under.lock().push(site.current());
        }
    }

    fn marked(marker: &str) -> SubmissionRequest {
        SubmissionRequest::from_fields([(SITE_MARKER_FIELD, marker)])
    }

    #[test]
    fn test_routes_to_owning_site_and_restores() {
        let engine = Arc::new(RecordingEngine::new());
        let router = SubmissionRouter::new(Arc::clone(&engine) as Arc<dyn FormEngine>);
        let mut cycle = RequestCycle::with_request(1, marked("7"));

        let state = router.dispatch(&mut cycle);

        assert_eq!(state, RouteState::Processed);
        assert!(state.is_terminal());
        assert_eq!(*engine.processed_under.lock(), vec![7]);
        assert_eq!(cycle.site.current(), 1, "hosting site restored");
    }

    #[test]
    fn test_own_site_marker_delegates_without_switching() {
        let engine = Arc::new(RecordingEngine::new());
        let router = SubmissionRouter::new(Arc::clone(&engine) as Arc<dyn FormEngine>);
        let mut cycle = RequestCycle::with_request(1, marked("1"));

        router.dispatch(&mut cycle);

        assert_eq!(*engine.processed_under.lock(), vec![1]);
        assert_eq!(cycle.site.depth(), 1, "no switch for the hosting site's own id");
        assert_eq!(cycle.route_state, RouteState::Processed);
    }

    #[test]
    fn test_unmarked_request_is_a_no_op() {
        let engine = Arc::new(RecordingEngine::new());
        let router = SubmissionRouter::new(Arc::clone(&engine) as Arc<dyn FormEngine>);
        let mut cycle = RequestCycle::with_request(
            1,
            SubmissionRequest::from_fields([("input_1", "hello")]),
        );

        let state = router.dispatch(&mut cycle);

        assert_eq!(state, RouteState::Unrouted);
        assert!(engine.processed_under.lock().is_empty());
    }

    #[test]
    fn test_unavailable_engine_is_a_silent_no_op() {
        let engine = Arc::new(RecordingEngine::unavailable());
        let router = SubmissionRouter::new(Arc::clone(&engine) as Arc<dyn FormEngine>);
        let mut cycle = RequestCycle::with_request(1, marked("7"));

        let state = router.dispatch(&mut cycle);

        assert_eq!(state, RouteState::Unrouted);
        assert!(engine.processed_under.lock().is_empty());
    }

    #[test]
    fn test_dispatch_after_guard_completes_the_state_machine() {
        let engine = Arc::new(RecordingEngine::new());
        let router = SubmissionRouter::new(Arc::clone(&engine) as Arc<dyn FormEngine>);
        let mut cycle = RequestCycle::with_request(1, marked("7"));

        crate::guard::DoubleProcessingGuard::new().suppress_native(&mut cycle);
        assert_eq!(cycle.route_state, RouteState::Skipped);

        router.dispatch(&mut cycle);
        assert_eq!(cycle.route_state, RouteState::Processed);
    }
}
