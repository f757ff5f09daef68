//! Localization for breadcrumb labels and locale-prefixed roots.
//!
//! A [`Localizer`] answers two questions: which locale is active (and how
//! locales appear in URLs), and how a translation key resolves. Translation
//! never fails; a missing key yields the caller's fallback.

mod catalog;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub use catalog::Catalog;

/// How locales are reflected in URL paths.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocaleStrategy {
    /// No locale prefix on any route.
    NoPrefix,
    /// Every locale except the default is prefixed (`/fr/about`, `/about`).
    #[default]
    PrefixExceptDefault,
    /// Every locale is prefixed, including the default.
    Prefix,
    /// Every locale is prefixed, and the default is also served unprefixed.
    PrefixAndDefault,
}

impl std::str::FromStr for LocaleStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "no_prefix" => Ok(Self::NoPrefix),
            "prefix_except_default" => Ok(Self::PrefixExceptDefault),
            "prefix" => Ok(Self::Prefix),
            "prefix_and_default" => Ok(Self::PrefixAndDefault),
            other => Err(Error::LocaleStrategy(other.to_string())),
        }
    }
}

/// Translation and locale state.
pub trait Localizer: Send + Sync {
    /// Active locale code.
    fn locale(&self) -> String;

    /// Default locale code.
    fn default_locale(&self) -> String;

    /// URL prefix strategy.
    fn strategy(&self) -> LocaleStrategy;

    /// Translate `key` for the active locale, returning `fallback` when the
    /// key is missing. Must not warn about missing keys.
    fn translate(&self, key: &str, fallback: &str) -> String;
}

/// Localizer for sites without internationalization.
#[derive(Debug, Clone)]
pub struct NoLocalization {
    locale: String,
}

impl NoLocalization {
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
        }
    }
}

impl Default for NoLocalization {
    fn default() -> Self {
        Self::new("en")
    }
}

impl Localizer for NoLocalization {
    fn locale(&self) -> String {
        self.locale.clone()
    }

    fn default_locale(&self) -> String {
        self.locale.clone()
    }

    fn strategy(&self) -> LocaleStrategy {
        LocaleStrategy::NoPrefix
    }

    fn translate(&self, _key: &str, fallback: &str) -> String {
        fallback.to_string()
    }
}

/// The root node of the trail: `root_segment`, plus the active locale when
/// the strategy puts it in the URL.
pub fn root_node(root_segment: &str, localizer: &dyn Localizer) -> String {
    let prefixed = match localizer.strategy() {
        LocaleStrategy::Prefix => true,
        LocaleStrategy::NoPrefix => false,
        LocaleStrategy::PrefixExceptDefault | LocaleStrategy::PrefixAndDefault => {
            localizer.default_locale() != localizer.locale()
        }
    };

    if prefixed {
        format!("{root_segment}{}", localizer.locale())
    } else {
        root_segment.to_string()
    }
}

/// Translation key for a breadcrumb field of a named route.
///
/// `breadcrumb.items.<route>.label`, `breadcrumb.items.<route>.ariaLabel`.
pub fn item_key(route_name: &str, field: &str) -> String {
    format!("breadcrumb.items.{route_name}.{field}")
}
