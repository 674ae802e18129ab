//! GlobalForms Router
//!
//! Submission-side half of cross-site form embedding, plus the composition
//! root that wires the whole system into the host platform's lifecycle:
//!
//! - Per-request cycle carrying the ambient site context and routing state
//! - Double-processing guard (suppress the engine's native handling early)
//! - Submission router (delegate to the owning site late)
//! - `GlobalForms` composition root and hook registration

#![warn(missing_docs)]

pub mod cycle;
pub mod guard;
pub mod router;
pub mod service;
pub mod state;

pub use cycle::RequestCycle;
pub use guard::DoubleProcessingGuard;
pub use router::SubmissionRouter;
pub use service::GlobalForms;
pub use state::RouteState;
