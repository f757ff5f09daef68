//! Breadcrumb item resolution.
//!
//! Turns normalized options and the current path into the final trail:
//!
//! 1. split the path into cumulative segments below the root node
//! 2. apply per-index overrides, then add prepend/append items
//! 3. resolve each item against the router for its canonical link and label
//! 4. drop hidden or unresolvable entries
//!
//! Resolution never fails; anything that cannot be resolved is dropped.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::i18n::{self, Localizer};
use crate::item::{BreadcrumbItem, Override, ResolvedItem, RouteTarget};
use crate::options::NormalizedOptions;
use crate::path::{self, path_to_title, without_query, without_trailing_slash};
use crate::router::RouteResolver;
use crate::site::SiteConfig;

/// Label used for the site's index route when it declares no title.
pub const HOME_LABEL: &str = "Home";

/// The external collaborators resolution depends on.
#[derive(Clone)]
pub struct Collaborators {
    pub router: Arc<dyn RouteResolver>,
    pub localizer: Arc<dyn Localizer>,
    pub site: SiteConfig,
}

impl Collaborators {
    pub fn new(
        router: Arc<dyn RouteResolver>,
        localizer: Arc<dyn Localizer>,
        site: SiteConfig,
    ) -> Self {
        Self {
            router,
            localizer,
            site,
        }
    }

    /// Root node for `root_segment` under the active locale.
    pub fn root_node(&self, root_segment: &str) -> String {
        i18n::root_node(root_segment, self.localizer.as_ref())
    }
}

impl std::fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collaborators")
            .field("locale", &self.localizer.locale())
            .field("site", &self.site)
            .finish_non_exhaustive()
    }
}

/// A draft item plus where it came from.
struct Draft {
    item: BreadcrumbItem,
    /// Generated from a path segment (as opposed to prepend/append).
    from_segment: bool,
}

/// Resolve the breadcrumb trail for `options`.
///
/// `diagnostics` enables development-only warnings for dropped entries.
pub fn resolve_items(
    options: &NormalizedOptions,
    collaborators: &Collaborators,
    diagnostics: bool,
) -> Vec<ResolvedItem> {
    let root = collaborators.root_node(&options.root_segment);
    let source = if options.path.is_empty() {
        root.as_str()
    } else {
        options.path.as_str()
    };
    let current = without_trailing_slash(without_query(source)).to_string();

    let resolver = ItemResolver {
        options,
        collaborators,
        root: &root,
        current: &current,
        diagnostics,
    };

    let drafts = build_drafts(options, &current, &root);
    let count = drafts.len();
    let items: Vec<ResolvedItem> = drafts
        .into_iter()
        .filter_map(|draft| resolver.resolve(draft))
        .collect();

    debug!(
        id = %options.id,
        path = %current,
        drafts = count,
        items = items.len(),
        "resolved breadcrumb items"
    );

    items
}

/// Build draft items: prepend, overridden segments, append.
fn build_drafts(options: &NormalizedOptions, current: &str, root: &str) -> Vec<Draft> {
    let extra = |item: &BreadcrumbItem| Draft {
        item: item.clone(),
        from_segment: false,
    };

    let segments = path::segments(current, root)
        .enumerate()
        .filter_map(|(index, segment)| {
            let generated = BreadcrumbItem::link(segment);
            let item = match options.override_at(index) {
                Some(Override::Suppress) => return None,
                Some(Override::Item(over)) => over.merged_over(&generated),
                None => generated,
            };
            Some(Draft {
                item,
                from_segment: true,
            })
        });

    options
        .prepend
        .iter()
        .map(extra)
        .chain(segments)
        .chain(options.append.iter().map(extra))
        .collect()
}

struct ItemResolver<'a> {
    options: &'a NormalizedOptions,
    collaborators: &'a Collaborators,
    root: &'a str,
    current: &'a str,
    diagnostics: bool,
}

impl ItemResolver<'_> {
    fn resolve(&self, draft: Draft) -> Option<ResolvedItem> {
        let Draft {
            mut item,
            from_segment,
        } = draft;

        let mut fallback_label = String::new();
        let mut fallback_aria_label = String::new();

        let route = item
            .to
            .as_ref()
            .and_then(|target| self.collaborators.router.resolve(target));

        match route {
            Some(route) => {
                if let Some(declared) = &route.meta.breadcrumb {
                    item.assign(declared);
                }
                if route.is_index() {
                    fallback_label = HOME_LABEL.to_string();
                }

                item.to = Some(RouteTarget::Path(route.path.clone()));

                let meta = &route.meta;
                let chosen = [
                    meta.breadcrumb_label.as_deref(),
                    meta.breadcrumb_title.as_deref(),
                    meta.title.as_deref(),
                    Some(fallback_label.as_str()),
                ]
                .into_iter()
                .flatten()
                .find(|label| !label.is_empty())
                .map(String::from)
                .unwrap_or_else(|| path_to_title(&route.path));
                fallback_label = chosen;

                if let Some(name) = route.base_name() {
                    let localizer = &self.collaborators.localizer;
                    fallback_label =
                        localizer.translate(&i18n::item_key(name, "label"), &fallback_label);
                    fallback_aria_label = localizer.translate(
                        &i18n::item_key(name, "ariaLabel"),
                        &fallback_aria_label,
                    );
                }
            }
            None if from_segment && self.options.hide_non_existing => {
                debug!(to = ?item.to, "dropping breadcrumb segment without a route");
                return None;
            }
            None => {
                if let Some(target @ RouteTarget::Named { .. }) = &item.to {
                    if self.diagnostics {
                        warn!(
                            route = ?target,
                            "breadcrumb target does not match any route, dropping it"
                        );
                    }
                    return None;
                }
            }
        }

        let to = item.to.as_ref().and_then(RouteTarget::as_path);

        let current = item.current.unwrap_or(false)
            || to.is_some_and(|to| without_trailing_slash(without_query(to)) == self.current);
        if self.options.hide_current && current {
            return None;
        }

        let to = to.map(|to| self.collaborators.site.fix_slashes(to));
        if let Some(to) = &to {
            if self.options.hide_root && *to == self.collaborators.site.fix_slashes(self.root) {
                return None;
            }
            if fallback_label.is_empty() {
                fallback_label = path_to_title(to);
            }
        }

        let label = item
            .label
            .filter(|label| !label.is_empty())
            .unwrap_or(fallback_label);
        let aria_label = item
            .aria_label
            .filter(|aria| !aria.is_empty())
            .or_else(|| Some(fallback_aria_label).filter(|aria| !aria.is_empty()))
            .unwrap_or_else(|| label.clone());

        Some(ResolvedItem {
            to,
            label,
            aria_label,
            current,
        })
    }
}
