//! GlobalForms Common
//!
//! Shared building blocks for cross-site form embedding on a multi-tenant
//! content platform:
//!
//! - Site id type and the routing-marker wire contract
//! - Inbound submission request surface
//! - Lifecycle hook registry and content-directive host seam

#![warn(missing_docs)]

pub mod hooks;
pub mod model;

pub use hooks::{DirectiveHost, HookContext, HookPoint, HookRegistry, InMemoryDirectiveHost};
pub use model::{SubmissionRequest, SiteId, NOT_FOUND_FRAGMENT, SITE_MARKER_FIELD};
