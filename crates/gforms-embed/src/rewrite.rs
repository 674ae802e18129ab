//! Markup rewriting
//!
//! Wires rendered form markup back to the routing protocol with textual,
//! first-occurrence substitution. No HTML parsing: match the first relevant
//! attribute or tag, leave everything else untouched, and treat a missing
//! match as a pass-through rather than an error.

use crate::descriptor::EmbedDescriptor;
use gforms_common::{SiteId, SITE_MARKER_FIELD};
use regex::{NoExpand, Regex};

/// Applies exactly one of two mutually exclusive rewrites to rendered markup:
/// retarget the form's action at the owning site's page, or inject the hidden
/// routing-marker field so the hosting page can delegate server-side.
pub struct MarkupRewriter {
    ajax_action: Regex,
    action_attr: Regex,
    form_open: Regex,
}

impl MarkupRewriter {
    /// Compile the rewrite patterns
    pub fn new() -> Self {
        Self {
            ajax_action: Regex::new(r"action='[^']*#").expect("valid ajax action pattern"),
            action_attr: Regex::new(r"action='[^']*'").expect("valid action pattern"),
            form_open: Regex::new(r"<form[^>]*>").expect("valid form tag pattern"),
        }
    }

    /// The hidden field carrying the routing marker for a site
    pub fn hidden_marker(site: SiteId) -> String {
        format!(r#"<input type="hidden" name="{SITE_MARKER_FIELD}" value="{site}"/>"#)
    }

    /// Rewrite `markup` according to the resolved descriptor.
    pub fn apply(&self, markup: &str, descriptor: &EmbedDescriptor) -> String {
        let mut out = markup.to_string();

        // AJAX submissions target a fragment on the current page; point them
        // at the owning site's page instead, fragment preserved. Unreachable
        // while AJAX is forced off upstream; kept for when that changes.
        if descriptor.use_ajax {
            if let Some(url) = descriptor.form_url.as_deref() {
                out = self
                    .ajax_action
                    .replace(&out, NoExpand(&format!("action='{url}#")))
                    .into_owned();
            }
        }

        match descriptor.form_url.as_deref() {
            Some(url) if descriptor.redirect_to_origin => {
                // The browser submits straight back to the owning site's page.
                // Only works when sites share one origin with path routing.
                out = self
                    .action_attr
                    .replace(&out, NoExpand(&format!("action='{url}'")))
                    .into_owned();
            }
            _ => {
                // The hosting page takes the submission; the marker tells the
                // router which site actually owns it.
                let marker = Self::hidden_marker(descriptor.site_id);
                if !out.contains(&marker) {
                    out = self
                        .form_open
                        .replace(&out, |caps: &regex::Captures<'_>| {
                            format!("{}{marker}", &caps[0])
                        })
                        .into_owned();
                }
            }
        }

        out
    }
}

impl Default for MarkupRewriter {
    fn default() -> Self {
        Self::new()
    }
}
