//! Route table - a [`RouteResolver`] built from route definitions.
//!
//! Definitions are loaded from YAML or JSON arrays and matched most-specific
//! first: fewer `:param` segments win, then deeper paths.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{ResolvedRoute, RouteMeta, RouteResolver};
use crate::error::{Error, Result};
use crate::item::RouteTarget;
use crate::path::{without_query, without_trailing_slash};

/// A route definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteDefinition {
    /// URL path pattern (e.g., "/blog", "/blog/:slug")
    pub path: String,
    /// Route name, used for named targets and translation keys.
    #[serde(default)]
    pub name: Option<String>,
    /// Breadcrumb-relevant metadata.
    #[serde(flatten)]
    pub meta: RouteMeta,
}

impl RouteDefinition {
    /// A route at `path` with no name or metadata.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: None,
            meta: RouteMeta::default(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.meta.title = Some(title.into());
        self
    }

    pub fn breadcrumb_label(mut self, label: impl Into<String>) -> Self {
        self.meta.breadcrumb_label = Some(label.into());
        self
    }

    pub fn breadcrumb_title(mut self, title: impl Into<String>) -> Self {
        self.meta.breadcrumb_title = Some(title.into());
        self
    }

    pub fn breadcrumb(mut self, item: crate::item::BreadcrumbItem) -> Self {
        self.meta.breadcrumb = Some(item);
        self
    }
}

/// Result of matching a path against registered routes.
#[derive(Debug, Clone)]
pub struct RouteMatch<'a> {
    /// The matched route definition.
    pub route: &'a RouteDefinition,
    /// Path parameters extracted (e.g., {"slug": "my-post"})
    pub params: HashMap<String, String>,
}

/// Table of route definitions.
#[derive(Debug, Default)]
pub struct RouteTable {
    /// Definitions in match order (most specific first).
    routes: Vec<RouteDefinition>,
    /// Route name -> index into `routes`.
    names: HashMap<String, usize>,
}

impl RouteTable {
    /// Create an empty route table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from definitions.
    pub fn from_definitions(definitions: impl IntoIterator<Item = RouteDefinition>) -> Self {
        let mut table = Self::new();
        table.routes.extend(definitions);
        table.build_routes();
        table
    }

    /// Parse a YAML array of route definitions.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let definitions: Vec<RouteDefinition> =
            serde_yml::from_str(yaml).map_err(Error::RouteTableYaml)?;
        Ok(Self::from_definitions(definitions))
    }

    /// Parse a JSON array of route definitions.
    pub fn from_json(json: &str) -> Result<Self> {
        let definitions: Vec<RouteDefinition> =
            serde_json::from_str(json).map_err(Error::RouteTableJson)?;
        Ok(Self::from_definitions(definitions))
    }

    /// Load a route table file. `.json` files are parsed as JSON, anything
    /// else as YAML.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.display().to_string(),
            source,
        })?;

        let table = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(&contents)?,
            _ => Self::from_yaml(&contents)?,
        };

        debug!(path = %path.display(), routes = table.len(), "loaded route table");
        Ok(table)
    }

    /// Register a route definition.
    pub fn register(&mut self, route: RouteDefinition) {
        self.routes.push(route);
        self.build_routes();
    }

    /// Sort by specificity and rebuild the name index.
    fn build_routes(&mut self) {
        // Fewer params = more specific = first; deeper paths before shallower.
        self.routes.sort_by_key(|route| {
            let param_count = route.path.matches(':').count();
            let segment_count = route.path.matches('/').count();
            (param_count, std::cmp::Reverse(segment_count))
        });

        self.names = self
            .routes
            .iter()
            .enumerate()
            .filter_map(|(index, route)| route.name.clone().map(|name| (name, index)))
            .collect();

        debug!(routes = self.routes.len(), "built route table");
    }

    /// Match a request path against registered routes.
    pub fn match_path(&self, path: &str) -> Option<RouteMatch<'_>> {
        let path = normalize(path);
        self.routes.iter().find_map(|route| {
            match_pattern(normalize(&route.path), path).map(|params| RouteMatch { route, params })
        })
    }

    /// Get a route by name.
    pub fn get(&self, name: &str) -> Option<&RouteDefinition> {
        self.names.get(name).and_then(|&index| self.routes.get(index))
    }

    /// All routes, in match order.
    pub fn all(&self) -> impl Iterator<Item = &RouteDefinition> {
        self.routes.iter()
    }

    /// Get route count.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl RouteResolver for RouteTable {
    fn resolve(&self, target: &RouteTarget) -> Option<ResolvedRoute> {
        match target {
            RouteTarget::Path(path) => {
                let matched = self.match_path(path)?;
                Some(ResolvedRoute {
                    path: normalize(path).to_string(),
                    name: matched.route.name.clone(),
                    meta: matched.route.meta.clone(),
                    params: matched.params,
                })
            }
            RouteTarget::Named { name, params } => {
                let route = self.get(name)?;
                let Some(path) = fill_pattern(&route.path, params) else {
                    debug!(route = %name, "named target is missing route params");
                    return None;
                };
                Some(ResolvedRoute {
                    path,
                    name: route.name.clone(),
                    meta: route.meta.clone(),
                    params: params.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
                })
            }
        }
    }
}

/// Canonical form used for matching: no query, no trailing slash.
fn normalize(path: &str) -> &str {
    without_trailing_slash(without_query(path))
}

/// Match a route pattern against a path, extracting parameters.
///
/// Pattern: "/blog/:slug/edit"
/// Path: "/blog/my-post/edit"
/// Result: Some({"slug": "my-post"})
fn match_pattern(pattern: &str, path: &str) -> Option<HashMap<String, String>> {
    let pattern_parts: Vec<&str> = pattern.split('/').collect();
    let path_parts: Vec<&str> = path.split('/').collect();

    if pattern_parts.len() != path_parts.len() {
        return None;
    }

    let mut params = HashMap::new();

    for (pat, actual) in pattern_parts.iter().zip(path_parts.iter()) {
        if let Some(param_name) = pat.strip_prefix(':') {
            // An empty segment never satisfies a param
            if actual.is_empty() {
                return None;
            }
            params.insert(param_name.to_string(), actual.to_string());
        } else if pat != actual {
            return None;
        }
    }

    Some(params)
}

/// Substitute `:param` segments of `pattern` from `params`.
///
/// Returns `None` if a param is missing.
fn fill_pattern(
    pattern: &str,
    params: &std::collections::BTreeMap<String, String>,
) -> Option<String> {
    let parts = pattern
        .split('/')
        .map(|part| match part.strip_prefix(':') {
            Some(name) => params.get(name).cloned(),
            None => Some(part.to_string()),
        })
        .collect::<Option<Vec<_>>>()?;

    Some(normalize(&parts.join("/")).to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn match_pattern_exact() {
        let params = match_pattern("/admin/content", "/admin/content");
        assert!(params.is_some());
        assert!(params.unwrap().is_empty());
    }

    #[test]
    fn match_pattern_with_param() {
        let params = match_pattern("/blog/:slug", "/blog/my-post").unwrap();
        assert_eq!(params.get("slug"), Some(&"my-post".to_string()));
    }

    #[test]
    fn match_pattern_no_match() {
        assert!(match_pattern("/admin/content", "/admin/users").is_none());
        assert!(match_pattern("/blog/:slug", "/blog/a/b").is_none());
        assert!(match_pattern("/blog/:slug", "/blog/").is_none());
    }

    #[test]
    fn table_from_yaml() {
        let yaml = r#"
- path: /
  name: index
- path: /blog
  name: blog
  title: Blog
- path: /blog/:slug
  name: blog-slug
  title: Post
  breadcrumb:
    ariaLabel: Blog post
"#;
        let table = RouteTable::from_yaml(yaml).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.get("blog").unwrap().meta.title.as_deref(), Some("Blog"));
        assert_eq!(
            table
                .get("blog-slug")
                .unwrap()
                .meta
                .breadcrumb
                .as_ref()
                .unwrap()
                .aria_label
                .as_deref(),
            Some("Blog post")
        );
    }

    #[test]
    fn table_from_json() {
        let json = r#"[{"path": "/docs", "title": "Docs", "breadcrumb_label": "Documentation"}]"#;
        let table = RouteTable::from_json(json).unwrap();
        let route = table.all().next().unwrap();
        assert_eq!(route.meta.breadcrumb_label.as_deref(), Some("Documentation"));
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        assert!(RouteTable::from_yaml("- path: [unterminated").is_err());
    }

    #[test]
    fn literal_routes_win_over_params() {
        let table = RouteTable::from_definitions([
            RouteDefinition::new("/blog/:slug").title("Post"),
            RouteDefinition::new("/blog/archive").title("Archive"),
        ]);

        let matched = table.match_path("/blog/archive").unwrap();
        assert_eq!(matched.route.meta.title.as_deref(), Some("Archive"));

        let matched = table.match_path("/blog/hello-world").unwrap();
        assert_eq!(matched.route.meta.title.as_deref(), Some("Post"));
        assert_eq!(matched.params.get("slug"), Some(&"hello-world".to_string()));
    }

    #[test]
    fn resolve_path_is_trailing_slash_tolerant() {
        let table = RouteTable::from_definitions([RouteDefinition::new("/blog").name("blog")]);

        let resolved = table.resolve(&RouteTarget::from("/blog/?page=2")).unwrap();
        assert_eq!(resolved.path, "/blog");
        assert_eq!(resolved.name.as_deref(), Some("blog"));

        assert!(table.resolve(&RouteTarget::from("/shop")).is_none());
    }

    #[test]
    fn resolve_root() {
        let table = RouteTable::from_definitions([RouteDefinition::new("/").name("index")]);
        let resolved = table.resolve(&RouteTarget::from("/")).unwrap();
        assert_eq!(resolved.path, "/");
        assert!(resolved.is_index());
    }

    #[test]
    fn resolve_named_target() {
        let table = RouteTable::from_definitions([
            RouteDefinition::new("/blog/:slug").name("post").title("Post"),
        ]);

        let target = RouteTarget::named("post").param("slug", "hello");
        let resolved = table.resolve(&target).unwrap();
        assert_eq!(resolved.path, "/blog/hello");
        assert_eq!(resolved.params.get("slug"), Some(&"hello".to_string()));

        // Missing param and unknown name do not resolve
        assert!(table.resolve(&RouteTarget::named("post")).is_none());
        assert!(table.resolve(&RouteTarget::named("nope")).is_none());
    }

    #[test]
    fn register_keeps_name_index_current() {
        let mut table = RouteTable::new();
        table.register(RouteDefinition::new("/a/:id").name("a"));
        table.register(RouteDefinition::new("/a/b/c").name("abc"));

        assert_eq!(table.get("a").unwrap().path, "/a/:id");
        assert_eq!(table.get("abc").unwrap().path, "/a/b/c");
        assert_eq!(table.all().next().unwrap().path, "/a/b/c");
    }

    #[test]
    fn load_from_file() {
        let dir = std::env::temp_dir().join(format!("crumbtrail-routes-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let file = dir.join("routes.json");
        std::fs::write(&file, r#"[{"path": "/", "name": "index"}]"#).unwrap();

        let table = RouteTable::load(&file).unwrap();
        assert_eq!(table.len(), 1);

        assert!(RouteTable::load(&dir.join("missing.yml")).is_err());
        std::fs::remove_dir_all(&dir).ok();
    }
}
