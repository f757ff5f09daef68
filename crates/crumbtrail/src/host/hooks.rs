//! Lifecycle hook registry.
//!
//! Maps each [`LifecycleHook`] to the handlers subscribed to it, in
//! subscription order. Subscribing returns a [`HookHandle`]; dropping the
//! handle unsubscribes.

use std::collections::HashMap;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tracing::debug;

/// Host lifecycle events relevant to breadcrumb publication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleHook {
    /// A page navigation started.
    PageStart,
    /// A page navigation finished (the new page is mounted).
    PageFinish,
    /// Rendering failed.
    AppError,
    /// All pending async components resolved.
    SuspenseResolve,
    /// Server-side rendering produced its final output.
    Rendered,
}

type Handler = Arc<dyn Fn() + Send + Sync>;

#[derive(Default)]
struct Registry {
    handlers: HashMap<LifecycleHook, Vec<(u64, Handler)>>,
    next_id: u64,
}

/// Registry of lifecycle handlers.
#[derive(Clone, Default)]
pub struct Hooks {
    inner: Arc<Mutex<Registry>>,
}

impl Hooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe `handler` to `hook`.
    pub fn hook(
        &self,
        hook: LifecycleHook,
        handler: impl Fn() + Send + Sync + 'static,
    ) -> HookHandle {
        let mut registry = self.inner.lock();
        let id = registry.next_id;
        registry.next_id += 1;
        registry
            .handlers
            .entry(hook)
            .or_default()
            .push((id, Arc::new(handler)));

        HookHandle {
            registry: Arc::downgrade(&self.inner),
            hook,
            id,
        }
    }

    /// Invoke every handler subscribed to `hook`, in subscription order.
    ///
    /// Handlers run outside the registry lock, so they may subscribe or
    /// unsubscribe without deadlocking.
    pub fn call(&self, hook: LifecycleHook) {
        let handlers: Vec<Handler> = self
            .inner
            .lock()
            .handlers
            .get(&hook)
            .map(|list| list.iter().map(|(_, h)| Arc::clone(h)).collect())
            .unwrap_or_default();

        debug!(hook = ?hook, handlers = handlers.len(), "calling lifecycle hook");

        for handler in handlers {
            handler();
        }
    }

    /// Check if anything is subscribed to `hook`.
    pub fn has_hook(&self, hook: LifecycleHook) -> bool {
        self.handler_count(hook) > 0
    }

    /// Number of handlers subscribed to `hook`.
    pub fn handler_count(&self, hook: LifecycleHook) -> usize {
        self.inner
            .lock()
            .handlers
            .get(&hook)
            .map(Vec::len)
            .unwrap_or(0)
    }
}

impl std::fmt::Debug for Hooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let registry = self.inner.lock();
        let counts: HashMap<_, _> = registry
            .handlers
            .iter()
            .map(|(hook, list)| (*hook, list.len()))
            .collect();
        f.debug_struct("Hooks").field("handlers", &counts).finish()
    }
}

/// Subscription handle; unsubscribes on drop.
#[must_use = "dropping the handle unsubscribes immediately"]
pub struct HookHandle {
    registry: Weak<Mutex<Registry>>,
    hook: LifecycleHook,
    id: u64,
}

impl Drop for HookHandle {
    fn drop(&mut self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        let mut registry = registry.lock();
        if let Some(list) = registry.handlers.get_mut(&self.hook) {
            list.retain(|(id, _)| *id != self.id);
        }
    }
}

impl std::fmt::Debug for HookHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookHandle")
            .field("hook", &self.hook)
            .field("id", &self.id)
            .finish()
    }
}
