//! Library error types.
//!
//! Breadcrumb resolution itself never fails: unresolved or invalid entries are
//! dropped from the trail. Errors only surface at the loading edges (route
//! tables, translation catalogs, site configuration).

use thiserror::Error;

/// Library errors.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid route table YAML")]
    RouteTableYaml(#[source] serde_yml::Error),

    #[error("invalid route table JSON")]
    RouteTableJson(#[source] serde_json::Error),

    #[error("invalid translation catalog for language '{language}'")]
    Catalog {
        language: String,
        #[source]
        source: serde_yml::Error,
    },

    #[error("invalid site url '{url}'")]
    SiteUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("unknown trailing slash policy: {0}")]
    TrailingSlash(String),

    #[error("unknown locale strategy: {0}")]
    LocaleStrategy(String),

    #[error("unknown build mode: {0}")]
    BuildMode(String),
}

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
