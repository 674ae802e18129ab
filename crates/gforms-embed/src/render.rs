//! Cross-site render pipeline

use crate::descriptor::DescriptorResolver;
use crate::engine::FormEngine;
use crate::rewrite::MarkupRewriter;
use gforms_common::NOT_FOUND_FRAGMENT;
use gforms_tenant::SiteContext;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Renders one embed occurrence: normalize attributes, switch to the owning
/// site, ask the engine for markup, and rewrite it for routing.
///
/// Has no side effects beyond the scoped site switch; an embed that cannot be
/// rendered degrades to the fixed not-found fragment instead of failing the
/// surrounding page.
pub struct RenderPipeline {
    engine: Arc<dyn FormEngine>,
    resolver: DescriptorResolver,
    rewriter: MarkupRewriter,
}

impl RenderPipeline {
    /// Create a pipeline
    pub fn new(engine: Arc<dyn FormEngine>, resolver: DescriptorResolver) -> Self {
        Self {
            engine,
            resolver,
            rewriter: MarkupRewriter::new(),
        }
    }

    /// Render the embed described by `attrs` within the given request's site
    /// context, returning an HTML fragment.
    pub fn render(
        &self,
        site: &SiteContext,
        attrs: &HashMap<String, String>,
        content: Option<&str>,
    ) -> String {
        let descriptor = self.resolver.resolve(site.current(), attrs);

        if !self.engine.is_available() {
            warn!("form engine unavailable, degrading to not-found fragment");
            return NOT_FOUND_FRAGMENT.to_string();
        }
        if descriptor.site_id == 0 {
            warn!(
                form_url = descriptor.form_url.as_deref().unwrap_or(""),
                domain = %descriptor.site_domain,
                "owning site unresolved, degrading to not-found fragment"
            );
            return NOT_FOUND_FRAGMENT.to_string();
        }

        debug!(
            owner = descriptor.site_id,
            host = site.current(),
            form = descriptor.form_id,
            "rendering embedded form"
        );
        let markup = site.with_site(descriptor.site_id, || {
            self.engine.render(site, &descriptor, content)
        });

        self.rewriter.apply(&markup, &descriptor)
    }
}
