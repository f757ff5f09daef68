//! Breadcrumb item types.
//!
//! [`BreadcrumbItem`] is the partial, caller-facing shape used for prepend,
//! append and override entries and for route-declared metadata. Every field is
//! optional so that items can be layered. [`ResolvedItem`] is the final,
//! fully-populated output of resolution.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Where a breadcrumb links to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RouteTarget {
    /// A plain path such as `/blog/my-post`.
    Path(String),
    /// A structured target resolved by route name, e.g. `{ name: "post", params: { slug: "x" } }`.
    Named {
        name: String,
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        params: BTreeMap<String, String>,
    },
}

impl RouteTarget {
    /// Build a structured target for a named route.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named {
            name: name.into(),
            params: BTreeMap::new(),
        }
    }

    /// Add a route parameter to a named target. No-op for plain paths.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let Self::Named { params, .. } = &mut self {
            params.insert(key.into(), value.into());
        }
        self
    }

    /// The plain path, if this is one.
    pub fn as_path(&self) -> Option<&str> {
        match self {
            Self::Path(path) => Some(path),
            Self::Named { .. } => None,
        }
    }
}

impl From<&str> for RouteTarget {
    fn from(path: &str) -> Self {
        Self::Path(path.to_string())
    }
}

impl From<String> for RouteTarget {
    fn from(path: String) -> Self {
        Self::Path(path)
    }
}

/// A partial breadcrumb item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreadcrumbItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<RouteTarget>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aria_label: Option<String>,
}

impl BreadcrumbItem {
    /// An empty item.
    pub fn new() -> Self {
        Self::default()
    }

    /// An item linking to `to`.
    pub fn link(to: impl Into<RouteTarget>) -> Self {
        Self {
            to: Some(to.into()),
            ..Self::default()
        }
    }

    /// Set the link target.
    pub fn to(mut self, to: impl Into<RouteTarget>) -> Self {
        self.to = Some(to.into());
        self
    }

    /// Set the label.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the aria label.
    pub fn aria_label(mut self, aria_label: impl Into<String>) -> Self {
        self.aria_label = Some(aria_label.into());
        self
    }

    /// Mark as (not) the current page.
    pub fn current(mut self, current: bool) -> Self {
        self.current = Some(current);
        self
    }

    /// Layer `self` on top of `base`: fields set here win, unset fields are
    /// taken from `base`.
    pub fn merged_over(&self, base: &BreadcrumbItem) -> BreadcrumbItem {
        BreadcrumbItem {
            to: self.to.clone().or_else(|| base.to.clone()),
            current: self.current.or(base.current),
            label: self.label.clone().or_else(|| base.label.clone()),
            aria_label: self.aria_label.clone().or_else(|| base.aria_label.clone()),
        }
    }

    /// Copy every field set on `other` onto `self`.
    pub fn assign(&mut self, other: &BreadcrumbItem) {
        if let Some(to) = &other.to {
            self.to = Some(to.clone());
        }
        if let Some(current) = other.current {
            self.current = Some(current);
        }
        if let Some(label) = &other.label {
            self.label = Some(label.clone());
        }
        if let Some(aria_label) = &other.aria_label {
            self.aria_label = Some(aria_label.clone());
        }
    }
}

/// An override entry for one path segment, addressed by index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "OverrideRepr", into = "OverrideRepr")]
pub enum Override {
    /// Remove the segment from the trail (`false` in serialized form).
    Suppress,
    /// Shallow-merge these fields over the segment's generated item.
    Item(BreadcrumbItem),
}

impl From<BreadcrumbItem> for Override {
    fn from(item: BreadcrumbItem) -> Self {
        Self::Item(item)
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum OverrideRepr {
    Flag(bool),
    Item(BreadcrumbItem),
}

impl TryFrom<OverrideRepr> for Override {
    type Error = String;

    fn try_from(repr: OverrideRepr) -> Result<Self, Self::Error> {
        match repr {
            OverrideRepr::Flag(false) => Ok(Self::Suppress),
            OverrideRepr::Flag(true) => {
                Err("override must be `false` or an item object".to_string())
            }
            OverrideRepr::Item(item) => Ok(Self::Item(item)),
        }
    }
}

impl From<Override> for OverrideRepr {
    fn from(value: Override) -> Self {
        match value {
            Override::Suppress => Self::Flag(false),
            Override::Item(item) => Self::Item(item),
        }
    }
}

/// A fully resolved breadcrumb item, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedItem {
    /// Canonical, slash-normalized link. `None` for label-only entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    pub label: String,
    pub aria_label: String,
    pub current: bool,
}
