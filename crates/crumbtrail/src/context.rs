//! Per-list breadcrumb context.
//!
//! A [`BreadcrumbContext`] owns everything behind one breadcrumb list id: the
//! ordered contributions, the cached normalized options and resolved items,
//! the transition guard, and the lifecycle hook subscriptions that drive it.
//!
//! Derived values are recomputed on read and cached until one of their inputs
//! changes: a contribution is added, updated or removed, the host navigates,
//! or the active locale switches.

use std::sync::{Arc, Weak};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::guard::{TransitionGuard, state_key};
use crate::host::{HookHandle, Hooks, Host, LifecycleHook};
use crate::item::ResolvedItem;
use crate::options::{BreadcrumbOptions, NormalizedOptions};
use crate::resolve::{Collaborators, resolve_items};

/// Identifier of one contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContributionId(Uuid);

impl ContributionId {
    fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl std::fmt::Display for ContributionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, PartialEq, Eq)]
struct CacheKey {
    revision: u64,
    route_path: String,
    locale: String,
}

struct Cached {
    key: CacheKey,
    options: NormalizedOptions,
    items: Vec<ResolvedItem>,
}

/// State behind one breadcrumb list.
pub struct BreadcrumbContext {
    id: String,
    host: Arc<Host>,
    collaborators: Collaborators,
    /// Contributions in registration order.
    contributions: Mutex<Vec<(ContributionId, BreadcrumbOptions)>>,
    /// Bumped on every contribution change, under the `contributions` lock.
    revision: AtomicU64,
    cache: Mutex<Option<Cached>>,
    guard: TransitionGuard,
    schema_registered: AtomicBool,
    hooks: Mutex<Vec<HookHandle>>,
}

impl BreadcrumbContext {
    /// Create the context for list `id` and subscribe it to the host's
    /// lifecycle hooks.
    ///
    /// A client that is still hydrating starts out paused.
    pub fn new(id: impl Into<String>, host: Arc<Host>, collaborators: Collaborators) -> Arc<Self> {
        let paused = host.is_client() && host.is_hydrating();
        let context = Arc::new(Self {
            id: id.into(),
            host,
            collaborators,
            contributions: Mutex::new(Vec::new()),
            revision: AtomicU64::new(0),
            cache: Mutex::new(None),
            guard: TransitionGuard::new(paused),
            schema_registered: AtomicBool::new(false),
            hooks: Mutex::new(Vec::new()),
        });

        let handles = context.subscribe();
        *context.hooks.lock() = handles;

        debug!(id = %context.id, paused, "created breadcrumb context");
        context
    }

    fn subscribe(self: &Arc<Self>) -> Vec<HookHandle> {
        let hooks = self.host.hooks();
        let weak = Arc::downgrade(self);

        if self.host.is_client() {
            vec![
                on_hook(hooks, &weak, LifecycleHook::PageStart, |c: &BreadcrumbContext| {
                    c.guard.pause();
                }),
                on_hook(hooks, &weak, LifecycleHook::PageFinish, |c: &BreadcrumbContext| {
                    if !c.host.is_hydrating() {
                        c.guard.resume();
                    }
                }),
                on_hook(hooks, &weak, LifecycleHook::AppError, |c: &BreadcrumbContext| {
                    c.guard.resume();
                }),
                on_hook(hooks, &weak, LifecycleHook::SuspenseResolve, |c: &BreadcrumbContext| {
                    c.guard.resume();
                }),
            ]
        } else {
            vec![on_hook(hooks, &weak, LifecycleHook::Rendered, BreadcrumbContext::commit)]
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn host(&self) -> &Arc<Host> {
        &self.host
    }

    pub fn collaborators(&self) -> &Collaborators {
        &self.collaborators
    }

    /// Register a contribution. It is removed when the returned handle drops.
    pub fn contribute(self: &Arc<Self>, options: BreadcrumbOptions) -> Contribution {
        let id = ContributionId::new();
        let mut contributions = self.contributions.lock();
        contributions.push((id, options));
        self.revision.fetch_add(1, Ordering::SeqCst);
        debug!(
            list = %self.id,
            contribution = %id,
            total = contributions.len(),
            "registered breadcrumb contribution"
        );

        Contribution {
            context: Arc::clone(self),
            id,
        }
    }

    /// Replace a contribution in place, keeping its precedence.
    ///
    /// Returns `false` if the contribution is no longer registered.
    pub fn update(&self, id: ContributionId, options: BreadcrumbOptions) -> bool {
        let mut contributions = self.contributions.lock();
        let Some(slot) = contributions.iter_mut().find(|(c, _)| *c == id) else {
            return false;
        };
        slot.1 = options;
        self.revision.fetch_add(1, Ordering::SeqCst);
        debug!(list = %self.id, contribution = %id, "updated breadcrumb contribution");
        true
    }

    fn remove(&self, id: ContributionId) {
        let mut contributions = self.contributions.lock();
        let before = contributions.len();
        contributions.retain(|(c, _)| *c != id);
        if contributions.len() != before {
            self.revision.fetch_add(1, Ordering::SeqCst);
            debug!(
                list = %self.id,
                contribution = %id,
                total = contributions.len(),
                "removed breadcrumb contribution"
            );
        }
    }

    /// Number of live contributions.
    pub fn contribution_count(&self) -> usize {
        self.contributions.lock().len()
    }

    /// The merged options of every contribution.
    pub fn options(&self) -> NormalizedOptions {
        self.with_cached(|cached| cached.options.clone())
    }

    /// Freshly resolved items, ignoring the transition guard.
    pub fn compute(&self) -> Vec<ResolvedItem> {
        self.with_cached(|cached| cached.items.clone())
    }

    /// The publicly observed trail.
    ///
    /// On a paused client this is the last committed trail. Otherwise it is
    /// the freshly resolved trail, which a client also commits.
    pub fn items(&self) -> Vec<ResolvedItem> {
        if self.host.is_client() && self.guard.is_paused() {
            return self.last_committed();
        }

        let items = self.compute();
        if self.host.is_client() {
            self.commit_items(&items);
        }
        items
    }

    /// Resolve and commit the current trail.
    pub fn commit(&self) {
        let items = self.compute();
        self.commit_items(&items);
    }

    fn commit_items(&self, items: &[ResolvedItem]) {
        let key = state_key(&self.id);
        let state = self.host.state();
        if state.get::<Vec<ResolvedItem>>(&key).as_deref() == Some(items) {
            return;
        }
        state.set(&key, &items);
        debug!(list = %self.id, items = items.len(), "committed breadcrumb items");
    }

    /// The last committed trail, empty if nothing was committed yet.
    pub fn last_committed(&self) -> Vec<ResolvedItem> {
        self.host
            .state()
            .get(&state_key(&self.id))
            .unwrap_or_default()
    }

    pub fn is_paused(&self) -> bool {
        self.guard.is_paused()
    }

    /// Drop cached derived values.
    pub fn invalidate(&self) {
        *self.cache.lock() = None;
    }

    pub(crate) fn is_schema_registered(&self) -> bool {
        self.schema_registered.load(Ordering::SeqCst)
    }

    /// Claim schema.org registration. Returns `true` for the first caller only.
    pub(crate) fn claim_schema_registration(&self) -> bool {
        self.schema_registered
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }

    fn with_cached<T>(&self, read: impl FnOnce(&Cached) -> T) -> T {
        let route_path = self.host.route_path();
        let locale = self.collaborators.localizer.locale();

        // Fold under the contributions lock so the revision matches the snapshot.
        let (revision, options) = {
            let contributions = self.contributions.lock();
            let revision = self.revision.load(Ordering::SeqCst);
            let key = CacheKey {
                revision,
                route_path: route_path.clone(),
                locale: locale.clone(),
            };
            if let Some(cached) = self.cache.lock().as_ref()
                && cached.key == key
            {
                return read(cached);
            }
            let options =
                NormalizedOptions::fold(&route_path, contributions.iter().map(|(_, o)| o));
            (revision, options)
        };

        let items = resolve_items(
            &options,
            &self.collaborators,
            self.host.build_mode().is_development(),
        );
        debug!(list = %self.id, revision, path = %route_path, "recomputed breadcrumb items");

        let cached = Cached {
            key: CacheKey {
                revision,
                route_path,
                locale,
            },
            options,
            items,
        };
        let value = read(&cached);
        *self.cache.lock() = Some(cached);
        value
    }
}

fn on_hook(
    hooks: &Hooks,
    context: &Weak<BreadcrumbContext>,
    hook: LifecycleHook,
    action: fn(&BreadcrumbContext),
) -> HookHandle {
    let context = context.clone();
    hooks.hook(hook, move || {
        if let Some(context) = context.upgrade() {
            action(&context);
        }
    })
}

impl std::fmt::Debug for BreadcrumbContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BreadcrumbContext")
            .field("id", &self.id)
            .field("contributions", &self.contribution_count())
            .field("paused", &self.is_paused())
            .field("schema_registered", &self.is_schema_registered())
            .finish_non_exhaustive()
    }
}

/// A registered contribution; deregisters on drop.
#[must_use = "dropping the contribution removes it immediately"]
pub struct Contribution {
    context: Arc<BreadcrumbContext>,
    id: ContributionId,
}

impl Contribution {
    pub fn id(&self) -> ContributionId {
        self.id
    }

    pub fn context(&self) -> &Arc<BreadcrumbContext> {
        &self.context
    }

    /// Replace this contribution's options.
    pub fn update(&self, options: BreadcrumbOptions) {
        self.context.update(self.id, options);
    }
}

impl Drop for Contribution {
    fn drop(&mut self) {
        self.context.remove(self.id);
    }
}

impl std::fmt::Debug for Contribution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Contribution")
            .field("list", &self.context.id)
            .field("id", &self.id)
            .finish()
    }
}
