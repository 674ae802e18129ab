//! Owning-site resolution
//!
//! Given the addressing attributes of an embed (a form URL, an explicit site
//! id, a site domain, or nothing), determine which site owns the form.

use crate::directory::SiteDirectory;
use crate::model::SiteIdentity;
use gforms_common::SiteId;
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

/// Resolves which site owns a requested form.
///
/// Priority order, first match wins:
///
/// 1. `form_url`: the URL's host is looked up in the directory. A host that
///    resolves to nothing still ends resolution here with an unresolved id;
///    it does not fall through to the remaining rules.
/// 2. explicit `site_id`, defaulting to the current site when zero
/// 3. `site_domain`: a failed lookup keeps the defaulted id from rule 2
/// 4. the current site, with its canonical domain filled in from the directory
pub struct SiteIdentityResolver {
    directory: Arc<dyn SiteDirectory>,
}

impl SiteIdentityResolver {
    /// Create a resolver over the platform directory
    pub fn new(directory: Arc<dyn SiteDirectory>) -> Self {
        Self { directory }
    }

    /// Resolve the owning site for one embed.
    ///
    /// `current` is the hosting site handling the request. An id of `0` in
    /// the returned identity means "unresolvable"; it is never a valid site.
    pub fn resolve(
        &self,
        current: SiteId,
        form_url: Option<&str>,
        site_id: Option<SiteId>,
        site_domain: Option<&str>,
    ) -> SiteIdentity {
        if let Some(url) = form_url.filter(|u| !u.is_empty()) {
            return self.resolve_from_url(url, site_id, site_domain);
        }

        // No URL: start from the explicit id, defaulting to the hosting site.
        let mut id = site_id.filter(|v| *v > 0).unwrap_or(current);

        if let Some(domain) = site_domain.filter(|d| !d.is_empty()) {
            match self.directory.site_for_host(domain) {
                Ok(found) if found > 0 => id = found,
                _ => {
                    // Keep the defaulted id rather than clobbering it with zero.
                    debug!(domain, kept = id, "site_domain did not resolve");
                }
            }
            return SiteIdentity::new(id, domain);
        }

        // Fill in the canonical domain so the identity is complete.
        let domain = match self.directory.site_details(id) {
            Ok(record) => record.domain,
            Err(err) => {
                warn!(site = id, %err, "no directory record for resolved site");
                String::new()
            }
        };
        SiteIdentity::new(id, domain)
    }

    /// `form_url` branch: the URL is authoritative and never falls back to
    /// the other attributes, even when its host resolves to no site.
    fn resolve_from_url(
        &self,
        form_url: &str,
        site_id: Option<SiteId>,
        site_domain: Option<&str>,
    ) -> SiteIdentity {
        let host = Url::parse(form_url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string));

        match host {
            Some(host) => {
                let id = match self.directory.site_for_host(&host) {
                    Ok(id) => id,
                    Err(err) => {
                        warn!(%host, %err, "form_url host does not map to a site");
                        0
                    }
                };
                debug!(%host, site = id, "resolved owning site from form_url");
                SiteIdentity::new(id, host)
            }
            None => {
                // Unusable URL: pass the supplied attributes through unchanged.
                warn!(form_url, "form_url has no extractable host");
                SiteIdentity::new(
                    site_id.unwrap_or(0),
                    site_domain.unwrap_or_default(),
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::InMemorySiteDirectory;
    use crate::model::SiteRecord;

    fn resolver() -> SiteIdentityResolver {
        let dir = InMemorySiteDirectory::new();
        dir.insert(SiteRecord::new(1, "a.example.com", "Site A"));
        dir.insert(SiteRecord::new(7, "b.example.com", "Site B"));
        SiteIdentityResolver::new(Arc::new(dir))
    }

    #[test]
    fn test_form_url_wins_over_everything() {
        let r = resolver();
        let identity = r.resolve(
            1,
            Some("https://b.example.com/contact"),
            Some(1),
            Some("a.example.com"),
        );
        assert_eq!(identity, SiteIdentity::new(7, "b.example.com"));
    }

    #[test]
    fn test_form_url_with_unknown_host_does_not_fall_back() {
        let r = resolver();
        // Even with a perfectly good explicit site_id, the URL branch ends
        // resolution with an unresolved identity.
        let identity = r.resolve(1, Some("https://c.example.com/form"), Some(7), None);
        assert_eq!(identity.id, 0);
        assert_eq!(identity.domain, "c.example.com");
        assert!(!identity.is_resolved());
    }

    #[test]
    fn test_form_url_without_host_passes_attributes_through() {
        let r = resolver();
        let identity = r.resolve(1, Some("not a url"), Some(7), Some("b.example.com"));
        assert_eq!(identity, SiteIdentity::new(7, "b.example.com"));
    }

    #[test]
    fn test_explicit_site_id() {
        let r = resolver();
        let identity = r.resolve(1, None, Some(7), None);
        assert_eq!(identity, SiteIdentity::new(7, "b.example.com"));
    }

    #[test]
    fn test_zero_site_id_defaults_to_current() {
        let r = resolver();
        let identity = r.resolve(1, None, Some(0), None);
        assert_eq!(identity, SiteIdentity::new(1, "a.example.com"));
    }

    #[test]
    fn test_site_domain_overrides_default() {
        let r = resolver();
        let identity = r.resolve(1, None, None, Some("b.example.com"));
        assert_eq!(identity, SiteIdentity::new(7, "b.example.com"));
    }

    #[test]
    fn test_unknown_site_domain_keeps_defaulted_id() {
        let r = resolver();
        let identity = r.resolve(1, None, None, Some("nowhere.example.com"));
        assert_eq!(identity.id, 1);
        assert_eq!(identity.domain, "nowhere.example.com");
    }

    #[test]
    fn test_bare_embed_resolves_to_current_site() {
        let r = resolver();
        let identity = r.resolve(7, None, None, None);
        assert_eq!(identity, SiteIdentity::new(7, "b.example.com"));
    }

    #[test]
    fn test_current_site_missing_from_directory_degrades() {
        let r = resolver();
        let identity = r.resolve(42, None, None, None);
        assert_eq!(identity.id, 42);
        assert_eq!(identity.domain, "");
    }
}
