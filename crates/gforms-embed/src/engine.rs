//! External form engine seam

use crate::descriptor::EmbedDescriptor;
use gforms_common::SubmissionRequest;
use gforms_tenant::SiteContext;

/// Hook handler id under which a hosting integration registers the engine's
/// own submission processing at the routing lifecycle point. The
/// double-processing guard suppresses exactly this handler when a submission
/// carries a routing marker.
pub const NATIVE_PROCESS_HANDLER: &str = "form-engine.native-processing";

/// The platform's form rendering and processing engine.
///
/// An external collaborator: it owns form definitions and entries per site
/// and acts against whichever site is active in the given context. This
/// system never looks inside it; it only probes availability, asks for
/// markup, and delegates submission processing under the right site.
pub trait FormEngine: Send + Sync {
    /// Whether the engine is present and able to render/process.
    ///
    /// Probed once per render or routing call; an unavailable engine degrades
    /// the caller to its safe default.
    fn is_available(&self) -> bool {
        true
    }

    /// Render the form described by `descriptor` for the active site,
    /// returning an HTML fragment.
    fn render(
        &self,
        site: &SiteContext,
        descriptor: &EmbedDescriptor,
        content: Option<&str>,
    ) -> String;

    /// Process an inbound submission against the active site.
    fn process_submission(&self, site: &SiteContext, request: &SubmissionRequest);
}
