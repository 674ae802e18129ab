//! Request-scoped ambient site context
//!
//! One request owns one context stack. All mutation goes through
//! [`SiteContext::with_site`], which restores the prior site on every exit
//! path, so a failure inside a collaborator can never leave later work in the
//! same request running against the wrong site.

use gforms_common::SiteId;
use parking_lot::Mutex;
use tracing::debug;

/// The site currently being acted upon, as a strict push/restore stack.
///
/// Constructed per request with the hosting site at the bottom; discarded
/// with the request.
pub struct SiteContext {
    stack: Mutex<Vec<SiteId>>,
}

impl SiteContext {
    /// Create a context with the hosting site active
    pub fn new(hosting: SiteId) -> Self {
        Self {
            stack: Mutex::new(vec![hosting]),
        }
    }

    /// The currently active site
    pub fn current(&self) -> SiteId {
        *self
            .stack
            .lock()
            .last()
            .unwrap_or(&0)
    }

    /// How deep the switch stack currently is (1 = no active switch)
    pub fn depth(&self) -> usize {
        self.stack.lock().len()
    }

    /// Run `f` with `target` as the active site.
    ///
    /// When `target` already is the active site, `f` runs directly with zero
    /// context mutation. Otherwise `target` is pushed for the duration of the
    /// call and the exact prior site is restored afterwards: on return, on
    /// error values, and on unwind. Nested switches restore pairwise.
    pub fn with_site<T>(&self, target: SiteId, f: impl FnOnce() -> T) -> T {
        if target == self.current() {
            return f();
        }

        debug!(from = self.current(), to = target, "switching site context");
        self.stack.lock().push(target);
        let _restore = Restore { ctx: self };
        f()
    }
}

/// Pops the pushed site when the switch scope ends, however it ends.
struct Restore<'a> {
    ctx: &'a SiteContext,
}

impl Drop for Restore<'_> {
    fn drop(&mut self) {
        let restored = {
            let mut stack = self.ctx.stack.lock();
            stack.pop();
            stack.last().copied().unwrap_or(0)
        };
        debug!(to = restored, "restored site context");
    }
}
