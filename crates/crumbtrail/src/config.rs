//! Configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::warn;

use crate::host::BuildMode;
use crate::i18n::{Catalog, LocaleStrategy, Localizer, NoLocalization};
use crate::path::TrailingSlash;
use crate::router::RouteTable;
use crate::site::SiteConfig;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Public site URL used for canonical links (default: http://localhost:3000).
    pub site_url: String,

    /// Trailing slash policy for produced links (default: none).
    pub trailing_slash: TrailingSlash,

    /// Default language (default: en).
    pub default_language: String,

    /// Known languages (comma-separated, default: the default language).
    pub languages: Vec<String>,

    /// How locales appear in URLs (default: prefix_except_default).
    pub language_strategy: LocaleStrategy,

    /// Build mode: "development", "production" or "test" (default: production).
    pub build_mode: BuildMode,

    /// Route definition file, YAML or JSON (default: ./routes.yml).
    pub routes_file: PathBuf,

    /// Directory of `<language>.yml` translation files. When None, labels are
    /// not translated.
    pub translations_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let site_url = var("SITE_URL").unwrap_or_else(|| "http://localhost:3000".to_string());
        url::Url::parse(&site_url).context("SITE_URL must be an absolute URL")?;

        let trailing_slash = var("TRAILING_SLASH")
            .map(|v| v.parse::<TrailingSlash>())
            .transpose()
            .context("TRAILING_SLASH must be 'none' or 'always'")?
            .unwrap_or_default();

        let default_language = var("DEFAULT_LANGUAGE").unwrap_or_else(|| "en".to_string());

        let mut languages: Vec<String> = var("LANGUAGES")
            .map(|v| {
                v.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();
        if !languages.contains(&default_language) {
            languages.insert(0, default_language.clone());
        }

        let language_strategy = var("LANGUAGE_STRATEGY")
            .map(|v| v.parse::<LocaleStrategy>())
            .transpose()
            .context("LANGUAGE_STRATEGY is not a known locale strategy")?
            .unwrap_or_default();

        let build_mode = var("BUILD_MODE")
            .map(|v| v.parse::<BuildMode>())
            .transpose()
            .context("BUILD_MODE must be 'development', 'production' or 'test'")?
            .unwrap_or_default();

        let routes_file = var("ROUTES_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./routes.yml"));

        let translations_dir = var("TRANSLATIONS_DIR").map(PathBuf::from);

        Ok(Self {
            site_url,
            trailing_slash,
            default_language,
            languages,
            language_strategy,
            build_mode,
            routes_file,
            translations_dir,
        })
    }

    /// Whether more than one language is configured or translations are loaded.
    pub fn is_localized(&self) -> bool {
        self.languages.len() > 1 || self.translations_dir.is_some()
    }

    /// Site settings for link generation.
    pub fn site(&self) -> Result<SiteConfig> {
        SiteConfig::new(&self.site_url, self.trailing_slash).context("invalid site configuration")
    }

    /// Load the route table from `routes_file`.
    pub fn route_table(&self) -> Result<RouteTable> {
        RouteTable::load(&self.routes_file).with_context(|| {
            format!(
                "failed to load route table from {}",
                self.routes_file.display()
            )
        })
    }

    /// Build the localizer with `locale` active (default language if None).
    ///
    /// Unlocalized sites get a [`NoLocalization`] unless a locale other than
    /// the default is requested.
    pub fn localizer(&self, locale: Option<&str>) -> Result<Arc<dyn Localizer>> {
        let locale = locale.unwrap_or(self.default_language.as_str());
        if !self.is_localized() && locale == self.default_language {
            return Ok(Arc::new(NoLocalization::new(&self.default_language)));
        }

        if !self.languages.iter().any(|l| l == locale) {
            warn!(locale = %locale, languages = ?self.languages, "locale is not in LANGUAGES");
        }

        let catalog = Catalog::new(&self.default_language, self.language_strategy);
        if let Some(dir) = &self.translations_dir {
            catalog
                .load_dir(dir)
                .with_context(|| format!("failed to load translations from {}", dir.display()))?;
        }
        catalog.set_locale(locale);
        Ok(Arc::new(catalog))
    }
}
