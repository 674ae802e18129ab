//! GlobalForms Embed
//!
//! Renders a form owned by one site inside a page served by another:
//!
//! - Directive attribute normalization into an [`EmbedDescriptor`]
//! - The external form engine seam ([`FormEngine`])
//! - Markup rewriting that wires rendered output back to the routing protocol
//! - The render pipeline composing all of the above

#![warn(missing_docs)]

pub mod config;
pub mod descriptor;
pub mod engine;
pub mod render;
pub mod rewrite;

pub use config::EmbedConfig;
pub use descriptor::{DescriptorResolver, EmbedAction, EmbedDescriptor};
pub use engine::{FormEngine, NATIVE_PROCESS_HANDLER};
pub use render::RenderPipeline;
pub use rewrite::MarkupRewriter;
