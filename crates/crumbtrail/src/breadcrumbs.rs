//! Breadcrumb lists of one host.
//!
//! [`Breadcrumbs`] is the entry point: every call site that wants to read or
//! shape a trail calls [`Breadcrumbs::use_items`] with its partial options and
//! keeps the returned [`BreadcrumbItems`] handle for as long as its
//! contribution should apply.

use std::collections::HashMap;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::context::{BreadcrumbContext, Contribution};
use crate::host::Host;
use crate::item::ResolvedItem;
use crate::options::{BreadcrumbOptions, DEFAULT_ID, NormalizedOptions};
use crate::resolve::Collaborators;
use crate::schema::BreadcrumbList;

/// Registry of breadcrumb lists, keyed by id.
pub struct Breadcrumbs {
    host: Arc<Host>,
    collaborators: Collaborators,
    /// A context lives as long as any handle to it does.
    contexts: Mutex<HashMap<String, Weak<BreadcrumbContext>>>,
}

impl Breadcrumbs {
    pub fn new(host: Arc<Host>, collaborators: Collaborators) -> Self {
        Self {
            host,
            collaborators,
            contexts: Mutex::new(HashMap::new()),
        }
    }

    pub fn host(&self) -> &Arc<Host> {
        &self.host
    }

    pub fn collaborators(&self) -> &Collaborators {
        &self.collaborators
    }

    /// Contribute `options` to the list they name (default `breadcrumb`) and
    /// return a live handle to its items.
    ///
    /// The first contribution to a list registers its schema.org
    /// `BreadcrumbList` when the host emits structured data and the merged
    /// options enable it.
    pub fn use_items(&self, options: BreadcrumbOptions) -> BreadcrumbItems {
        let id = options.id.clone().unwrap_or_else(|| DEFAULT_ID.to_string());
        let context = self.context_or_create(&id);
        let contribution = context.contribute(options);
        self.register_schema_org(&context);

        BreadcrumbItems { contribution }
    }

    /// The live context for list `id`, if any handle still holds it.
    pub fn context(&self, id: &str) -> Option<Arc<BreadcrumbContext>> {
        self.contexts.lock().get(id).and_then(Weak::upgrade)
    }

    /// Ids of every live list.
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .contexts
            .lock()
            .iter()
            .filter(|(_, context)| context.strong_count() > 0)
            .map(|(id, _)| id.clone())
            .collect();
        ids.sort();
        ids
    }

    fn context_or_create(&self, id: &str) -> Arc<BreadcrumbContext> {
        let mut contexts = self.contexts.lock();
        if let Some(context) = contexts.get(id).and_then(Weak::upgrade) {
            return context;
        }

        contexts.retain(|_, context| context.strong_count() > 0);
        let context =
            BreadcrumbContext::new(id, Arc::clone(&self.host), self.collaborators.clone());
        contexts.insert(id.to_string(), Arc::downgrade(&context));
        context
    }

    fn register_schema_org(&self, context: &Arc<BreadcrumbContext>) {
        let enabled = context.options().schema_org;

        if !context.is_schema_registered() && self.host.emits_schema_org() && enabled {
            if context.claim_schema_registration() {
                self.host.schema_sink().register(BreadcrumbList::new(context));
                debug!(id = %context.id(), "registered breadcrumb structured data");
            }
        } else if context.is_schema_registered()
            && !enabled
            && self.host.build_mode().is_development()
        {
            warn!(
                id = %context.id(),
                "schema.org output cannot be disabled after it was registered for this list"
            );
        }
    }
}

impl std::fmt::Debug for Breadcrumbs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Breadcrumbs")
            .field("host", &self.host)
            .field("lists", &self.ids())
            .finish_non_exhaustive()
    }
}

/// Live handle to a breadcrumb list.
///
/// Holds the caller's contribution; dropping the handle removes it.
#[derive(Debug)]
#[must_use = "dropping the handle removes its contribution"]
pub struct BreadcrumbItems {
    contribution: Contribution,
}

impl BreadcrumbItems {
    /// The current trail.
    pub fn get(&self) -> Vec<ResolvedItem> {
        self.context().items()
    }

    /// Merged options of every contribution to this list.
    pub fn options(&self) -> NormalizedOptions {
        self.context().options()
    }

    /// Replace this handle's contribution, keeping its precedence.
    ///
    /// The contribution stays with the list it was registered on, even if
    /// the new options name a different id.
    pub fn update(&self, options: BreadcrumbOptions) {
        self.contribution.update(options);
    }

    pub fn id(&self) -> &str {
        self.context().id()
    }

    pub fn context(&self) -> &Arc<BreadcrumbContext> {
        self.contribution.context()
    }

    pub fn is_paused(&self) -> bool {
        self.context().is_paused()
    }
}
