//! In-memory translation catalog.
//!
//! Holds translations for every known language in a single cache and tracks
//! the active locale. Catalog files are nested YAML maps flattened to dotted
//! keys:
//!
//! ```yaml
//! breadcrumb:
//!   items:
//!     blog:
//!       label: Journal
//! ```
//!
//! becomes `breadcrumb.items.blog.label = Journal`.

use std::path::Path;

use dashmap::DashMap;
use parking_lot::RwLock;
use serde_yml::Value;
use tracing::{debug, info};

use super::{LocaleStrategy, Localizer};
use crate::error::{Error, Result};

/// Translation catalog and locale state.
pub struct Catalog {
    /// Translation cache: key = "language\0key" → translation.
    cache: DashMap<String, String>,
    locale: RwLock<String>,
    default_locale: String,
    strategy: LocaleStrategy,
}

impl Catalog {
    /// Create an empty catalog with `default_locale` active.
    pub fn new(default_locale: impl Into<String>, strategy: LocaleStrategy) -> Self {
        let default_locale = default_locale.into();
        Self {
            cache: DashMap::new(),
            locale: RwLock::new(default_locale.clone()),
            default_locale,
            strategy,
        }
    }

    /// Switch the active locale.
    pub fn set_locale(&self, locale: impl Into<String>) {
        let locale = locale.into();
        debug!(locale = %locale, "active locale changed");
        *self.locale.write() = locale;
    }

    /// Insert a single translation.
    pub fn insert(&self, language: &str, key: &str, translation: impl Into<String>) {
        self.cache.insert(cache_key(language, key), translation.into());
    }

    /// Load a nested YAML map of translations for `language`.
    ///
    /// Returns the number of translations loaded.
    pub fn load_yaml(&self, language: &str, yaml: &str) -> Result<usize> {
        let value: Value = serde_yml::from_str(yaml).map_err(|source| Error::Catalog {
            language: language.to_string(),
            source,
        })?;

        let mut entries = Vec::new();
        flatten("", &value, &mut entries);

        let count = entries.len();
        for (key, translation) in entries {
            self.insert(language, &key, translation);
        }

        info!(language = %language, count = count, "loaded translations");
        Ok(count)
    }

    /// Load every `<language>.yml` / `<language>.yaml` file in `dir`.
    ///
    /// Returns the total number of translations loaded.
    pub fn load_dir(&self, dir: &Path) -> Result<usize> {
        let io_error = |source| Error::Io {
            path: dir.display().to_string(),
            source,
        };

        let mut total = 0;
        for entry in std::fs::read_dir(dir).map_err(io_error)? {
            let path = entry.map_err(io_error)?.path();
            let is_yaml = matches!(
                path.extension().and_then(|e| e.to_str()),
                Some("yml" | "yaml")
            );
            if !is_yaml {
                continue;
            }
            let Some(language) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            let contents = std::fs::read_to_string(&path).map_err(|source| Error::Io {
                path: path.display().to_string(),
                source,
            })?;
            total += self.load_yaml(language, &contents)?;
        }

        Ok(total)
    }

    /// Look up a translation for an explicit language.
    pub fn get(&self, language: &str, key: &str) -> Option<String> {
        self.cache
            .get(&cache_key(language, key))
            .map(|t| t.value().clone())
    }

    /// Number of cached translations across all languages.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Clear the translation cache.
    pub fn clear(&self) {
        self.cache.clear();
    }
}

impl Localizer for Catalog {
    fn locale(&self) -> String {
        self.locale.read().clone()
    }

    fn default_locale(&self) -> String {
        self.default_locale.clone()
    }

    fn strategy(&self) -> LocaleStrategy {
        self.strategy
    }

    fn translate(&self, key: &str, fallback: &str) -> String {
        let locale = self.locale.read();
        self.get(&locale, key)
            .unwrap_or_else(|| fallback.to_string())
    }
}

impl std::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog")
            .field("cache_size", &self.cache.len())
            .field("locale", &*self.locale.read())
            .field("default_locale", &self.default_locale)
            .field("strategy", &self.strategy)
            .finish()
    }
}

/// Build a cache key from language and translation key.
///
/// Uses a null byte separator so dotted keys never collide with languages.
fn cache_key(language: &str, key: &str) -> String {
    format!("{language}\0{key}")
}

/// Flatten nested maps into dotted keys. Scalars become strings; sequences
/// and nulls are skipped.
fn flatten(prefix: &str, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::Mapping(map) => {
            for (k, v) in map {
                let Some(segment) = scalar_to_string(k) else {
                    continue;
                };
                let key = if prefix.is_empty() {
                    segment
                } else {
                    format!("{prefix}.{segment}")
                };
                flatten(&key, v, out);
            }
        }
        other => {
            if let Some(text) = scalar_to_string(other)
                && !prefix.is_empty()
            {
                out.push((prefix.to_string(), text));
            }
        }
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
