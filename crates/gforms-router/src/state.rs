//! Routing state machine

use serde::{Deserialize, Serialize};

/// Where one HTTP lifecycle stands with respect to submission routing.
///
/// Legal transitions: `Unrouted → Skipped` (guard suppressed native
/// processing), `Unrouted/Skipped → Routed → Processed` (router delegated to
/// the owning site). `Processed` is terminal; a request with no routing
/// marker never leaves `Unrouted`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RouteState {
    /// No routing decision has been made
    #[default]
    Unrouted,
    /// Native processing was suppressed for this request
    Skipped,
    /// The router has claimed the submission
    Routed,
    /// The owning site's engine has processed the submission
    Processed,
}

impl RouteState {
    /// Whether this is a terminal state for the local-processing path
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Processed | Self::Skipped)
    }
}
