//! Crumbtrail test utilities.
//!
//! Helpers for integration testing: route table and translation fixtures,
//! expected-trail builders, temporary fixture directories, and assertion
//! utilities for JSON output.

use std::path::{Path, PathBuf};

use serde_json::{Value as JsonValue, json};
use uuid::Uuid;

/// Build the expected JSON form of one resolved breadcrumb item.
pub fn crumb(to: &str, label: &str) -> ExpectedCrumb {
    ExpectedCrumb {
        to: Some(to.to_string()),
        label: label.to_string(),
        aria_label: None,
        current: false,
    }
}

/// Build an expected label-only item (no link).
pub fn label_only(label: &str) -> ExpectedCrumb {
    ExpectedCrumb {
        to: None,
        label: label.to_string(),
        aria_label: None,
        current: false,
    }
}

/// Expected resolved breadcrumb item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedCrumb {
    pub to: Option<String>,
    pub label: String,
    pub aria_label: Option<String>,
    pub current: bool,
}

impl ExpectedCrumb {
    /// Mark as the current page.
    pub fn current(mut self) -> Self {
        self.current = true;
        self
    }

    /// Set an aria label different from the label.
    pub fn with_aria_label(mut self, aria_label: &str) -> Self {
        self.aria_label = Some(aria_label.to_string());
        self
    }

    /// JSON as serialized by the resolver (`to` omitted for label-only items).
    pub fn to_json(&self) -> JsonValue {
        let mut value = json!({
            "label": self.label,
            "ariaLabel": self.aria_label.as_deref().unwrap_or(self.label.as_str()),
            "current": self.current,
        });
        if let Some(to) = &self.to {
            value["to"] = JsonValue::String(to.clone());
        }
        value
    }
}

/// JSON array of expected items.
pub fn trail(items: &[ExpectedCrumb]) -> JsonValue {
    JsonValue::Array(items.iter().map(ExpectedCrumb::to_json).collect())
}

/// Labels of a serialized trail, in order.
pub fn labels(trail: &JsonValue) -> Vec<String> {
    trail
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item["label"].as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default()
}

/// A uniquely named temporary directory, removed on drop.
#[derive(Debug)]
pub struct FixtureDir {
    path: PathBuf,
}

impl FixtureDir {
    /// Create an empty fixture directory.
    pub fn new() -> std::io::Result<Self> {
        let path = std::env::temp_dir().join(format!("crumbtrail-test-{}", Uuid::now_v7()));
        std::fs::create_dir_all(&path)?;
        Ok(Self { path })
    }

    /// Create a fixture directory containing `files` (name, contents).
    pub fn with_files(files: &[(&str, &str)]) -> std::io::Result<Self> {
        let dir = Self::new()?;
        for (name, contents) in files {
            dir.write(name, contents)?;
        }
        Ok(dir)
    }

    /// Write a file into the directory, returning its path.
    pub fn write(&self, name: &str, contents: &str) -> std::io::Result<PathBuf> {
        let path = self.path.join(name);
        std::fs::write(&path, contents)?;
        Ok(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for FixtureDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

/// Assertion helpers for JSON content.
pub mod assert {
    use serde_json::Value;

    /// Assert that a JSON value has a specific key.
    pub fn has_key(value: &Value, key: &str) {
        assert!(
            value.get(key).is_some(),
            "Expected JSON to have key '{}', got: {}",
            key,
            value
        );
    }

    /// Assert that a JSON value does not have a specific key.
    pub fn lacks_key(value: &Value, key: &str) {
        assert!(
            value.get(key).is_none(),
            "Expected JSON to NOT have key '{}', got: {}",
            key,
            value
        );
    }

    /// Assert that a JSON value equals expected.
    pub fn json_eq(actual: &Value, expected: &Value) {
        assert_eq!(
            actual, expected,
            "JSON mismatch:\nactual: {:#}\nexpected: {:#}",
            actual, expected
        );
    }

    /// Assert that a string contains a substring.
    pub fn contains(haystack: &str, needle: &str) {
        assert!(
            haystack.contains(needle),
            "Expected string to contain '{}'\nActual: {}",
            needle,
            haystack
        );
    }

    /// Assert that a string does not contain a substring.
    pub fn not_contains(haystack: &str, needle: &str) {
        assert!(
            !haystack.contains(needle),
            "Expected string to NOT contain '{}'\nActual: {}",
            needle,
            haystack
        );
    }
}

/// Route table and translation fixtures.
pub mod fixtures {
    /// A blog site: home, blog index, a post, a tag page and an about page
    /// whose breadcrumb label is overridden.
    pub fn blog_routes_yaml() -> &'static str {
        r#"
- path: /
  name: index
- path: /blog
  name: blog
  title: Blog
- path: /blog/my-post
  name: blog-my-post
  title: My Post
- path: /blog/tags/:tag
  name: blog-tag
  breadcrumb_title: Tagged
- path: /about
  name: about
  title: About us
  breadcrumb:
    label: About
    ariaLabel: About this site
"#
    }

    /// The blog site with French locale variants, for prefixed strategies.
    pub fn localized_routes_yaml() -> &'static str {
        r#"
- path: /
  name: index___en
- path: /blog
  name: blog___en
  title: Blog
- path: /fr
  name: index___fr
- path: /fr/blog
  name: blog___fr
  title: Blog
"#
    }

    /// A shop, as JSON.
    pub fn shop_routes_json() -> &'static str {
        r#"[
  {"path": "/", "name": "index"},
  {"path": "/shop", "name": "shop", "title": "Shop"},
  {"path": "/shop/:category", "name": "shop-category", "title": "Category"},
  {"path": "/shop/:category/:product", "name": "shop-product", "breadcrumb_label": "Product"}
]"#
    }

    /// French breadcrumb translations.
    pub fn translations_fr_yaml() -> &'static str {
        r#"
breadcrumb:
  items:
    index:
      label: Accueil
      ariaLabel: Page d'accueil
    blog:
      label: Journal
"#
    }

    /// English breadcrumb translations.
    pub fn translations_en_yaml() -> &'static str {
        r#"
breadcrumb:
  items:
    blog:
      ariaLabel: All blog posts
"#
    }
}
