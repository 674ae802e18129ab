//! GlobalForms Tenant Layer
//!
//! Everything about "which site owns this form, and whose hat are we wearing
//! while we touch it":
//!
//! - Site identity model and the platform directory seam
//! - Request-scoped ambient site context with scoped, self-restoring switches
//! - The owning-site resolution algorithm (url > explicit id > domain > current)

#![warn(missing_docs)]

pub mod context;
pub mod directory;
pub mod model;
pub mod resolver;

pub use context::SiteContext;
pub use directory::{DirectoryError, InMemorySiteDirectory, SiteDirectory};
pub use model::{SiteIdentity, SiteRecord};
pub use resolver::SiteIdentityResolver;
