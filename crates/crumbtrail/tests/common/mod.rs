#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Common test utilities for integration tests.
//!
//! [`TestApp`] wires the real route table, catalog, host and schema graph
//! together the way an application would, so tests exercise the same code
//! paths as production.

#![allow(dead_code)]

use std::sync::Arc;

use serde_json::Value;

use crumbtrail::host::{BuildMode, Host};
use crumbtrail::i18n::{Catalog, LocaleStrategy};
use crumbtrail::path::TrailingSlash;
use crumbtrail::router::RouteTable;
use crumbtrail::schema::SchemaGraph;
use crumbtrail::{BreadcrumbItems, BreadcrumbOptions, Breadcrumbs, Collaborators, SiteConfig};
use crumbtrail_test_utils::fixtures;

/// Site URL used by every test app.
pub const SITE_URL: &str = "https://example.com";

/// A fully wired breadcrumb host.
pub struct TestApp {
    pub host: Arc<Host>,
    pub catalog: Arc<Catalog>,
    pub graph: Arc<SchemaGraph>,
    pub breadcrumbs: Breadcrumbs,
}

impl TestApp {
    /// Server render of the blog fixture at `path`.
    pub fn server(path: &str) -> Self {
        TestAppBuilder::new().path(path).build()
    }

    pub fn builder() -> TestAppBuilder {
        TestAppBuilder::new()
    }

    pub fn use_items(&self, options: BreadcrumbOptions) -> BreadcrumbItems {
        self.breadcrumbs.use_items(options)
    }

    /// Resolve `options` once and return the trail as JSON.
    pub fn trail(&self, options: BreadcrumbOptions) -> Value {
        let items = self.use_items(options);
        serde_json::to_value(items.get()).unwrap()
    }
}

/// Builder for [`TestApp`].
pub struct TestAppBuilder {
    routes: RouteTable,
    path: String,
    client_payload: Option<Option<Value>>,
    build_mode: BuildMode,
    trailing_slash: TrailingSlash,
    default_locale: String,
    strategy: LocaleStrategy,
    locale: Option<String>,
    translations: Vec<(String, String)>,
}

impl TestAppBuilder {
    pub fn new() -> Self {
        Self {
            routes: RouteTable::from_yaml(fixtures::blog_routes_yaml()).unwrap(),
            path: "/".to_string(),
            client_payload: None,
            build_mode: BuildMode::Production,
            trailing_slash: TrailingSlash::None,
            default_locale: "en".to_string(),
            strategy: LocaleStrategy::PrefixExceptDefault,
            locale: None,
            translations: Vec::new(),
        }
    }

    pub fn routes(mut self, routes: RouteTable) -> Self {
        self.routes = routes;
        self
    }

    pub fn path(mut self, path: &str) -> Self {
        self.path = path.to_string();
        self
    }

    /// Interactive client. With a payload the client starts out hydrating.
    pub fn client(mut self, payload: Option<Value>) -> Self {
        self.client_payload = Some(payload);
        self
    }

    pub fn build_mode(mut self, build_mode: BuildMode) -> Self {
        self.build_mode = build_mode;
        self
    }

    pub fn trailing_slash(mut self, trailing_slash: TrailingSlash) -> Self {
        self.trailing_slash = trailing_slash;
        self
    }

    pub fn strategy(mut self, strategy: LocaleStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn locale(mut self, locale: &str) -> Self {
        self.locale = Some(locale.to_string());
        self
    }

    pub fn translations(mut self, language: &str, yaml: &str) -> Self {
        self.translations.push((language.to_string(), yaml.to_string()));
        self
    }

    pub fn build(self) -> TestApp {
        let catalog = Arc::new(Catalog::new(self.default_locale, self.strategy));
        for (language, yaml) in &self.translations {
            catalog.load_yaml(language, yaml).unwrap();
        }
        if let Some(locale) = self.locale {
            catalog.set_locale(locale);
        }

        let graph = Arc::new(SchemaGraph::new());
        let host = match self.client_payload {
            Some(payload) => Host::client(self.build_mode, graph.clone(), payload.as_ref()),
            None => Host::server(self.build_mode, graph.clone()),
        };
        let host = Arc::new(host);
        host.set_route_path(self.path);

        let collaborators = Collaborators::new(
            Arc::new(self.routes),
            catalog.clone(),
            SiteConfig::new(SITE_URL, self.trailing_slash).unwrap(),
        );

        TestApp {
            breadcrumbs: Breadcrumbs::new(Arc::clone(&host), collaborators),
            host,
            catalog,
            graph,
        }
    }
}
