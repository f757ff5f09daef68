//! Site-wide link settings: public URL and trailing slash policy.

use url::Url;

use crate::error::{Error, Result};
use crate::path::{TrailingSlash, fix_slashes, is_path};

/// Site configuration consumed by breadcrumb resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    url: Url,
    trailing_slash: TrailingSlash,
}

impl SiteConfig {
    /// Parse the public site URL (e.g. `https://example.com` or
    /// `https://example.com/docs` for a site served under a base path).
    pub fn new(site_url: &str, trailing_slash: TrailingSlash) -> Result<Self> {
        let url = Url::parse(site_url).map_err(|source| Error::SiteUrl {
            url: site_url.to_string(),
            source,
        })?;
        Ok(Self {
            url,
            trailing_slash,
        })
    }

    /// The public site URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn trailing_slash(&self) -> TrailingSlash {
        self.trailing_slash
    }

    /// Apply the trailing slash policy to a link.
    pub fn fix_slashes(&self, link: &str) -> String {
        fix_slashes(self.trailing_slash, link)
    }

    /// Absolute canonical URL for a site path.
    ///
    /// Paths are joined onto the site URL (keeping any base path) after slash
    /// normalization. Anything that is not a plain path is returned as is.
    pub fn absolute_url(&self, link: &str) -> String {
        if !is_path(link) {
            return link.to_string();
        }

        let base = self.url.as_str().trim_end_matches('/');
        format!("{base}{}", self.fix_slashes(link))
    }
}
