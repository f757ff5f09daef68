//! Route resolution for breadcrumb targets.
//!
//! The resolver is an external collaborator: breadcrumb resolution only needs
//! to know whether a target matches a route, what its canonical path is, and
//! which metadata the route declares. [`RouteTable`] is the bundled
//! implementation, loaded from route definition files.

mod table;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::item::{BreadcrumbItem, RouteTarget};

pub use table::{RouteDefinition, RouteTable};

/// Resolves breadcrumb targets against the application's routes.
pub trait RouteResolver: Send + Sync {
    /// Resolve `target`, returning `None` when no route matches.
    fn resolve(&self, target: &RouteTarget) -> Option<ResolvedRoute>;
}

/// Route-declared metadata relevant to breadcrumbs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteMeta {
    /// Generic page title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Label used for breadcrumbs only; wins over every other title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breadcrumb_label: Option<String>,
    /// Breadcrumb-specific title; wins over `title`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breadcrumb_title: Option<String>,
    /// Fields copied onto the breadcrumb item when this route matches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breadcrumb: Option<BreadcrumbItem>,
}

/// Result of resolving a target against the routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoute {
    /// Canonical path of the target.
    pub path: String,
    /// Route name, if the route has one.
    pub name: Option<String>,
    /// Route metadata.
    pub meta: RouteMeta,
    /// Path parameters extracted or substituted (e.g., {"slug": "my-post"}).
    pub params: HashMap<String, String>,
}

/// Separator between a route's base name and its locale variant
/// (`index___fr`).
pub const LOCALE_ROUTE_SEPARATOR: &str = "___";

impl ResolvedRoute {
    /// Route name without any locale suffix.
    pub fn base_name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .and_then(|name| name.split(LOCALE_ROUTE_SEPARATOR).next())
    }

    /// Whether this is the site's home route.
    pub fn is_index(&self) -> bool {
        self.base_name() == Some("index")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn route(name: Option<&str>) -> ResolvedRoute {
        ResolvedRoute {
            path: "/".into(),
            name: name.map(String::from),
            meta: RouteMeta::default(),
            params: HashMap::new(),
        }
    }

    #[test]
    fn base_name_strips_locale_suffix() {
        assert_eq!(route(Some("index___fr")).base_name(), Some("index"));
        assert_eq!(route(Some("blog")).base_name(), Some("blog"));
        assert_eq!(route(None).base_name(), None);
    }

    #[test]
    fn index_detection() {
        assert!(route(Some("index")).is_index());
        assert!(route(Some("index___de")).is_index());
        assert!(!route(Some("indexes")).is_index());
        assert!(!route(None).is_index());
    }
}
