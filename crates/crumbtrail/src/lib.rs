//! Crumbtrail
//!
//! Breadcrumb trails for web applications. Any number of call sites contribute
//! partial [`BreadcrumbOptions`] to a breadcrumb list; the list folds them,
//! walks the current path segment by segment, resolves every segment against
//! the application's routes and translations, and exposes the resulting trail
//! together with a schema.org `BreadcrumbList`.
//!
//! ```
//! use std::sync::Arc;
//!
//! use crumbtrail::host::{BuildMode, Host};
//! use crumbtrail::i18n::NoLocalization;
//! use crumbtrail::path::TrailingSlash;
//! use crumbtrail::router::{RouteDefinition, RouteTable};
//! use crumbtrail::schema::SchemaGraph;
//! use crumbtrail::{BreadcrumbOptions, Breadcrumbs, Collaborators, SiteConfig};
//!
//! let routes = RouteTable::from_definitions([
//!     RouteDefinition::new("/").name("index"),
//!     RouteDefinition::new("/blog").name("blog").title("Blog"),
//! ]);
//! let collaborators = Collaborators::new(
//!     Arc::new(routes),
//!     Arc::new(NoLocalization::default()),
//!     SiteConfig::new("https://example.com", TrailingSlash::None)?,
//! );
//! let host = Arc::new(Host::server(BuildMode::Production, Arc::new(SchemaGraph::new())));
//! host.set_route_path("/blog");
//!
//! let breadcrumbs = Breadcrumbs::new(host, collaborators);
//! let items = breadcrumbs.use_items(BreadcrumbOptions::new());
//! let labels: Vec<_> = items.get().into_iter().map(|i| i.label).collect();
//! assert_eq!(labels, ["Home", "Blog"]);
//! # Ok::<(), crumbtrail::Error>(())
//! ```

pub mod breadcrumbs;
pub mod config;
pub mod context;
pub mod error;
pub mod guard;
pub mod host;
pub mod i18n;
pub mod item;
pub mod options;
pub mod path;
pub mod resolve;
pub mod router;
pub mod schema;
pub mod site;

pub use breadcrumbs::{BreadcrumbItems, Breadcrumbs};
pub use error::{Error, Result};
pub use item::{BreadcrumbItem, Override, ResolvedItem, RouteTarget};
pub use options::{BreadcrumbOptions, NormalizedOptions};
pub use resolve::Collaborators;
pub use site::SiteConfig;
