//! Composition root and lifecycle wiring
//!
//! One `GlobalForms` instance is built at startup, before hook registration,
//! and lives for the process. It is handed to registration code by reference;
//! nothing in the system reaches for it globally.

use crate::cycle::RequestCycle;
use crate::guard::DoubleProcessingGuard;
use crate::router::SubmissionRouter;
use gforms_common::{DirectiveHost, HookPoint, HookRegistry};
use gforms_embed::{DescriptorResolver, EmbedConfig, FormEngine, RenderPipeline};
use gforms_tenant::{SiteDirectory, SiteIdentityResolver};
use std::sync::Arc;
use tracing::info;

/// Hook id of the guard handler
pub const GUARD_HANDLER: &str = "globalforms.guard";
/// Hook id of the directive-registration handler
pub const DIRECTIVE_HANDLER: &str = "globalforms.directive";
/// Hook id of the router handler
pub const ROUTER_HANDLER: &str = "globalforms.router";

/// The assembled system.
///
/// Owns the render pipeline, the double-processing guard, and the submission
/// router; `install` wires them into the host's three lifecycle points.
pub struct GlobalForms {
    pipeline: Arc<RenderPipeline>,
    guard: DoubleProcessingGuard,
    router: SubmissionRouter,
    directives: Arc<dyn DirectiveHost<RequestCycle>>,
    config: EmbedConfig,
}

impl GlobalForms {
    /// Assemble the system from its collaborators.
    pub fn new(
        engine: Arc<dyn FormEngine>,
        directory: Arc<dyn SiteDirectory>,
        directives: Arc<dyn DirectiveHost<RequestCycle>>,
        config: EmbedConfig,
    ) -> Self {
        let resolver = DescriptorResolver::new(
            SiteIdentityResolver::new(directory),
            config.clone(),
        );
        let pipeline = Arc::new(RenderPipeline::new(Arc::clone(&engine), resolver));

        Self {
            pipeline,
            guard: DoubleProcessingGuard::new(),
            router: SubmissionRouter::new(engine),
            directives,
            config,
        }
    }

    /// Register this system's three lifecycle handlers:
    /// the guard at request initialization, the embed directive at content
    /// initialization, and the router at the routing point.
    pub fn install(&self, hooks: &HookRegistry<RequestCycle>) {
        let guard = self.guard;
        hooks.register(HookPoint::RequestInit, GUARD_HANDLER, move |cycle| {
            guard.suppress_native(cycle);
        });

        // Directive re-registration replaces the previous handler, so running
        // this once per request is harmless.
        let directives = Arc::clone(&self.directives);
        let pipeline = Arc::clone(&self.pipeline);
        let directive = self.config.directive.clone();
        hooks.register(HookPoint::ContentInit, DIRECTIVE_HANDLER, move |_cycle| {
            let pipeline = Arc::clone(&pipeline);
            directives.register_directive(
                &directive,
                Arc::new(move |cycle: &RequestCycle, attrs, content| {
                    pipeline.render(&cycle.site, attrs, content)
                }),
            );
        });

        let router = self.router.clone();
        hooks.register(HookPoint::Routing, ROUTER_HANDLER, move |cycle| {
            router.dispatch(cycle);
        });

        info!(directive = %self.config.directive, "globalforms lifecycle handlers installed");
    }
}
