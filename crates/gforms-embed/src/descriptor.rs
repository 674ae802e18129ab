//! Embed descriptor and attribute normalization

use crate::config::EmbedConfig;
use gforms_common::SiteId;
use gforms_tenant::SiteIdentityResolver;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// What the embed renders
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmbedAction {
    /// Render the form itself
    #[default]
    Form,
    /// Render the post-submission confirmation
    Confirmation,
}

impl EmbedAction {
    fn parse(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("confirmation") {
            Self::Confirmation
        } else {
            Self::Form
        }
    }
}

/// The normalized configuration for one embedded form instance.
///
/// Built per render from the directive's raw attributes, immutable after
/// resolution, and discarded when the render call returns. After resolution
/// `site_id` is authoritative: `0` means the owning site could not be
/// determined and the embed must degrade.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EmbedDescriptor {
    /// Show the form title
    pub show_title: bool,
    /// Show the form description
    pub show_description: bool,
    /// Form id on the owning site (0 = select by name)
    pub form_id: u64,
    /// Form name on the owning site
    pub form_name: String,
    /// Opaque pre-filled field values
    pub field_values: String,
    /// AJAX submission. Always false: in-place confirmation rendering does
    /// not work through the AJAX path at the point this system runs.
    pub use_ajax: bool,
    /// Tab index offset for rendered inputs
    pub tab_index: i32,
    /// What to render
    pub action: EmbedAction,
    /// Theme name
    pub theme: String,
    /// Extra style handles
    pub styles: String,
    /// Absolute URL of the form's canonical page on the owning site
    pub form_url: Option<String>,
    /// Submit back to `form_url` instead of the hosting page
    pub redirect_to_origin: bool,
    /// Domain of the owning site
    pub site_domain: String,
    /// Id of the owning site (0 = unresolved)
    pub site_id: SiteId,
}

/// Normalizes raw directive attributes into a complete [`EmbedDescriptor`].
pub struct DescriptorResolver {
    identity: SiteIdentityResolver,
    config: EmbedConfig,
}

impl DescriptorResolver {
    /// Create a resolver
    pub fn new(identity: SiteIdentityResolver, config: EmbedConfig) -> Self {
        Self { identity, config }
    }

    /// Apply defaults, force AJAX off, and resolve the owning site.
    ///
    /// `current` is the hosting site serving the page being rendered.
    pub fn resolve(&self, current: SiteId, attrs: &HashMap<String, String>) -> EmbedDescriptor {
        let form_url = string_attr(attrs, "form_url");
        let site_domain = string_attr(attrs, "site_domain");
        let site_id = attrs
            .get("site_id")
            .and_then(|raw| raw.trim().parse::<SiteId>().ok());

        let owner = self.identity.resolve(
            current,
            form_url.as_deref(),
            site_id,
            site_domain.as_deref(),
        );

        EmbedDescriptor {
            show_title: bool_attr(attrs, "title", true),
            show_description: bool_attr(attrs, "description", true),
            form_id: int_attr(attrs, "id", 0),
            form_name: attrs.get("name").cloned().unwrap_or_default(),
            field_values: attrs.get("field_values").cloned().unwrap_or_default(),
            use_ajax: false,
            tab_index: int_attr(attrs, "tabindex", 0),
            action: EmbedAction::parse(attrs.get("action").map(String::as_str).unwrap_or("form")),
            theme: attrs
                .get("theme")
                .filter(|t| !t.is_empty())
                .cloned()
                .unwrap_or_else(|| self.config.default_theme.clone()),
            styles: attrs.get("styles").cloned().unwrap_or_default(),
            form_url,
            redirect_to_origin: bool_attr(attrs, "redirect_to_origin", false),
            site_domain: owner.domain,
            site_id: owner.id,
        }
    }
}

fn string_attr(attrs: &HashMap<String, String>, key: &str) -> Option<String> {
    attrs.get(key).filter(|v| !v.is_empty()).cloned()
}

fn bool_attr(attrs: &HashMap<String, String>, key: &str, default: bool) -> bool {
    match attrs.get(key) {
        Some(raw) => matches!(
            raw.trim().to_ascii_lowercase().as_str(),
            "true" | "1" | "yes" | "on"
        ),
        None => default,
    }
}

fn int_attr<T: std::str::FromStr>(attrs: &HashMap<String, String>, key: &str, default: T) -> T {
    attrs
        .get(key)
        .and_then(|raw| raw.trim().parse().ok())
        .unwrap_or(default)
}
