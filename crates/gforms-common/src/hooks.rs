//! Lifecycle hook registry and content-directive host seam
//!
//! The host platform drives each request through three lifecycle points in a
//! fixed order. This module holds the registry the platform dispatches from,
//! plus the registration surface for content directives (embed tags).

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Lifecycle points exposed by the host platform's request dispatcher.
///
/// Fired once per request, in declaration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HookPoint {
    /// Early request initialization, before any form machinery acts
    RequestInit,
    /// Content system initialization (directives become registrable)
    ContentInit,
    /// Routing, after initialization is complete
    Routing,
}

/// Per-request state a hook handler can consult.
///
/// A handler registered for a point still runs through the registry, but the
/// request cycle may suppress individual handlers for the remainder of that
/// request.
pub trait HookContext {
    /// Whether the given handler id has been suppressed for this request
    fn is_suppressed(&self, handler_id: &str) -> bool;
}

/// A registered lifecycle handler
type Handler<C> = Arc<dyn Fn(&mut C) + Send + Sync>;

/// Hook registry the host dispatcher runs requests through.
///
/// Handlers are identified by a stable string id so they can be deregistered
/// or suppressed individually. Within one point, handlers run in registration
/// order.
pub struct HookRegistry<C> {
    handlers: RwLock<HashMap<HookPoint, Vec<(String, Handler<C>)>>>,
}

impl<C: HookContext> HookRegistry<C> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            handlers: RwLock::new(HashMap::new()),
        }
    }

    /// Register a handler at a lifecycle point.
    ///
    /// Re-registering an existing id at the same point replaces the handler
    /// in place, keeping its position.
    pub fn register<F>(&self, point: HookPoint, id: &str, handler: F)
    where
        F: Fn(&mut C) + Send + Sync + 'static,
    {
        let mut map = self.handlers.write();
        let entries = map.entry(point).or_default();
        let handler: Handler<C> = Arc::new(handler);

        if let Some(existing) = entries.iter_mut().find(|(eid, _)| eid == id) {
            existing.1 = handler;
        } else {
            entries.push((id.to_string(), handler));
        }
    }

    /// Deregister a handler. Idempotent; returns whether anything was removed.
    pub fn deregister(&self, point: HookPoint, id: &str) -> bool {
        let mut map = self.handlers.write();
        match map.get_mut(&point) {
            Some(entries) => {
                let before = entries.len();
                entries.retain(|(eid, _)| eid != id);
                entries.len() != before
            }
            None => false,
        }
    }

    /// Run all handlers registered at a point against the request cycle.
    ///
    /// The handler list is snapshotted before invocation, so handlers are free
    /// to mutate the registry. Handlers suppressed on the cycle are skipped.
    pub fn run(&self, point: HookPoint, cycle: &mut C) {
        let snapshot: Vec<(String, Handler<C>)> = self
            .handlers
            .read()
            .get(&point)
            .map(|entries| entries.to_vec())
            .unwrap_or_default();

        for (id, handler) in snapshot {
            if cycle.is_suppressed(&id) {
                debug!(handler = %id, ?point, "handler suppressed for this request");
                continue;
            }
            handler(cycle);
        }
    }
}

impl<C: HookContext> Default for HookRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// A registered content-directive renderer.
///
/// Receives the request cycle, the directive's raw key/value attributes, and
/// the enclosed content body; returns the markup fragment to emit in place.
pub type DirectiveHandler<C> =
    Arc<dyn Fn(&C, &HashMap<String, String>, Option<&str>) -> String + Send + Sync>;

/// The host platform's content-directive registration surface.
///
/// Implemented by the hosting integration; this system only registers its
/// embed directive against it at content initialization.
pub trait DirectiveHost<C>: Send + Sync {
    /// Register (or replace) a named directive
    fn register_directive(&self, name: &str, handler: DirectiveHandler<C>);
}

/// Directive table backed by a map; reference host for tests and embedding.
pub struct InMemoryDirectiveHost<C> {
    directives: RwLock<HashMap<String, DirectiveHandler<C>>>,
}

impl<C> InMemoryDirectiveHost<C> {
    /// Create an empty directive table
    pub fn new() -> Self {
        Self {
            directives: RwLock::new(HashMap::new()),
        }
    }

    /// Whether a directive with this name is registered
    pub fn has_directive(&self, name: &str) -> bool {
        self.directives.read().contains_key(name)
    }

    /// Render a directive occurrence, as the content engine would while
    /// expanding a page. `None` if no such directive is registered.
    pub fn render(
        &self,
        name: &str,
        cycle: &C,
        attrs: &HashMap<String, String>,
        content: Option<&str>,
    ) -> Option<String> {
        let handler = self.directives.read().get(name).cloned()?;
        Some(handler(cycle, attrs, content))
    }
}

impl<C> DirectiveHost<C> for InMemoryDirectiveHost<C>
where
    C: Send + Sync,
{
    fn register_directive(&self, name: &str, handler: DirectiveHandler<C>) {
        self.directives.write().insert(name.to_string(), handler);
    }
}

impl<C> Default for InMemoryDirectiveHost<C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct TestCycle {
        suppressed: HashSet<String>,
        log: Vec<&'static str>,
    }

    impl TestCycle {
        fn new() -> Self {
            Self {
                suppressed: HashSet::new(),
                log: Vec::new(),
            }
        }
    }

    impl HookContext for TestCycle {
        fn is_suppressed(&self, handler_id: &str) -> bool {
            self.suppressed.contains(handler_id)
        }
    }

    #[test]
    fn test_run_in_registration_order() {
        let registry = HookRegistry::<TestCycle>::new();
        registry.register(HookPoint::Routing, "first", |c| c.log.push("first"));
        registry.register(HookPoint::Routing, "second", |c| c.log.push("second"));

        let mut cycle = TestCycle::new();
        registry.run(HookPoint::Routing, &mut cycle);

        assert_eq!(cycle.log, vec!["first", "second"]);
    }

    #[test]
    fn test_points_are_independent() {
        let registry = HookRegistry::<TestCycle>::new();
        registry.register(HookPoint::RequestInit, "early", |c| c.log.push("early"));

        let mut cycle = TestCycle::new();
        registry.run(HookPoint::Routing, &mut cycle);
        assert!(cycle.log.is_empty());

        registry.run(HookPoint::RequestInit, &mut cycle);
        assert_eq!(cycle.log, vec!["early"]);
    }

    #[test]
    fn test_deregister_is_idempotent() {
        let registry = HookRegistry::<TestCycle>::new();
        registry.register(HookPoint::Routing, "native", |c| c.log.push("native"));

        assert!(registry.deregister(HookPoint::Routing, "native"));
        assert!(!registry.deregister(HookPoint::Routing, "native"));
        assert!(!registry.deregister(HookPoint::RequestInit, "never-registered"));

        let mut cycle = TestCycle::new();
        registry.run(HookPoint::Routing, &mut cycle);
        assert!(cycle.log.is_empty());
    }

    #[test]
    fn test_suppressed_handler_is_skipped() {
        let registry = HookRegistry::<TestCycle>::new();
        registry.register(HookPoint::Routing, "native", |c| c.log.push("native"));
        registry.register(HookPoint::Routing, "router", |c| c.log.push("router"));

        let mut cycle = TestCycle::new();
        cycle.suppressed.insert("native".to_string());
        registry.run(HookPoint::Routing, &mut cycle);

        assert_eq!(cycle.log, vec!["router"]);

        // Suppression is per cycle; a fresh request sees both handlers.
        let mut next = TestCycle::new();
        registry.run(HookPoint::Routing, &mut next);
        assert_eq!(next.log, vec!["native", "router"]);
    }

    #[test]
    fn test_reregister_replaces_in_place() {
        let registry = HookRegistry::<TestCycle>::new();
        registry.register(HookPoint::Routing, "a", |c| c.log.push("a1"));
        registry.register(HookPoint::Routing, "b", |c| c.log.push("b"));
        registry.register(HookPoint::Routing, "a", |c| c.log.push("a2"));

        let mut cycle = TestCycle::new();
        registry.run(HookPoint::Routing, &mut cycle);
        assert_eq!(cycle.log, vec!["a2", "b"]);
    }

    #[test]
    fn test_handler_may_mutate_registry() {
        let registry = Arc::new(HookRegistry::<TestCycle>::new());
        let inner = Arc::clone(&registry);
        registry.register(HookPoint::RequestInit, "guard", move |c| {
            c.log.push("guard");
            inner.deregister(HookPoint::Routing, "native");
        });
        registry.register(HookPoint::Routing, "native", |c| c.log.push("native"));

        let mut cycle = TestCycle::new();
        registry.run(HookPoint::RequestInit, &mut cycle);
        registry.run(HookPoint::Routing, &mut cycle);

        assert_eq!(cycle.log, vec!["guard"]);
    }

    #[test]
    fn test_directive_host_register_and_render() {
        let host = InMemoryDirectiveHost::<TestCycle>::new();
        assert!(!host.has_directive("embed"));

        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        host.register_directive(
            "embed",
            Arc::new(move |_, attrs, content| {
                seen.fetch_add(1, Ordering::SeqCst);
                format!("{}:{}", attrs.len(), content.unwrap_or(""))
            }),
        );

        let cycle = TestCycle::new();
        let mut attrs = HashMap::new();
        attrs.insert("id".to_string(), "3".to_string());

        let out = host.render("embed", &cycle, &attrs, Some("body"));
        assert_eq!(out.as_deref(), Some("1:body"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(host.render("missing", &cycle, &attrs, None).is_none());
    }
}
