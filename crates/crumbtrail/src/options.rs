//! Breadcrumb options and the contribution fold.
//!
//! Any number of call sites may contribute a partial [`BreadcrumbOptions`] to
//! the same breadcrumb list. [`NormalizedOptions::fold`] flattens them, in
//! registration order, into one record:
//!
//! - scalar fields: the last contribution that sets a field wins
//! - `prepend` / `append`: concatenated in registration order
//! - `overrides`: merged by index, unset slots never clobber earlier entries

use serde::{Deserialize, Serialize};

use crate::item::{BreadcrumbItem, Override};

/// Default breadcrumb list id.
pub const DEFAULT_ID: &str = "breadcrumb";

/// Default aria label for the breadcrumb navigation landmark.
pub const DEFAULT_ARIA_LABEL: &str = "Breadcrumbs";

/// Default root segment.
pub const DEFAULT_ROOT_SEGMENT: &str = "/";

/// A partial breadcrumb configuration contributed by one call site.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BreadcrumbOptions {
    /// Breadcrumb list id. Contributions with different ids feed different
    /// lists; give each list on a page a unique id.
    pub id: Option<String>,
    /// Build the trail for this path instead of the current route.
    pub path: Option<String>,
    /// Items added after the path segments.
    pub append: Vec<BreadcrumbItem>,
    /// Items added before the path segments.
    pub prepend: Vec<BreadcrumbItem>,
    /// Per-segment overrides by index; `None` leaves a slot untouched.
    pub overrides: Vec<Option<Override>>,
    /// Emit a schema.org `BreadcrumbList`.
    pub schema_org: Option<bool>,
    /// Aria label for the breadcrumb navigation.
    pub aria_label: Option<String>,
    /// Drop the item for the current page.
    pub hide_current: Option<bool>,
    /// Drop the item for the root node.
    pub hide_root: Option<bool>,
    /// Drop path segments that do not match a route.
    pub hide_non_existing: Option<bool>,
    /// Root segment of the trail. Locale prefixes are appended to it.
    pub root_segment: Option<String>,
}

impl BreadcrumbOptions {
    /// Empty contribution.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn append(mut self, item: BreadcrumbItem) -> Self {
        self.append.push(item);
        self
    }

    pub fn prepend(mut self, item: BreadcrumbItem) -> Self {
        self.prepend.push(item);
        self
    }

    /// Merge `item` over the generated item at segment `index`.
    pub fn override_at(self, index: usize, item: BreadcrumbItem) -> Self {
        self.set_override(index, Override::Item(item))
    }

    /// Remove the segment at `index` from the trail.
    pub fn suppress(self, index: usize) -> Self {
        self.set_override(index, Override::Suppress)
    }

    fn set_override(mut self, index: usize, value: Override) -> Self {
        if self.overrides.len() <= index {
            self.overrides.resize(index + 1, None);
        }
        self.overrides[index] = Some(value);
        self
    }

    pub fn schema_org(mut self, enabled: bool) -> Self {
        self.schema_org = Some(enabled);
        self
    }

    pub fn aria_label(mut self, label: impl Into<String>) -> Self {
        self.aria_label = Some(label.into());
        self
    }

    pub fn hide_current(mut self, hide: bool) -> Self {
        self.hide_current = Some(hide);
        self
    }

    pub fn hide_root(mut self, hide: bool) -> Self {
        self.hide_root = Some(hide);
        self
    }

    pub fn hide_non_existing(mut self, hide: bool) -> Self {
        self.hide_non_existing = Some(hide);
        self
    }

    pub fn root_segment(mut self, root: impl Into<String>) -> Self {
        self.root_segment = Some(root.into());
        self
    }
}

/// The merged configuration of every contribution to a breadcrumb list.
///
/// Always carries every field; absent contributions leave the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedOptions {
    pub id: String,
    pub path: String,
    pub append: Vec<BreadcrumbItem>,
    pub prepend: Vec<BreadcrumbItem>,
    pub overrides: Vec<Option<Override>>,
    pub schema_org: bool,
    pub aria_label: String,
    pub hide_current: bool,
    pub hide_root: bool,
    pub hide_non_existing: bool,
    pub root_segment: String,
}

impl NormalizedOptions {
    /// Defaults for a list on a page currently at `route_path`.
    pub fn defaults(route_path: &str) -> Self {
        Self {
            id: DEFAULT_ID.to_string(),
            path: route_path.to_string(),
            append: Vec::new(),
            prepend: Vec::new(),
            overrides: Vec::new(),
            schema_org: true,
            aria_label: DEFAULT_ARIA_LABEL.to_string(),
            hide_current: false,
            hide_root: false,
            hide_non_existing: false,
            root_segment: DEFAULT_ROOT_SEGMENT.to_string(),
        }
    }

    /// Fold contributions, in registration order, over the defaults.
    pub fn fold<'a>(
        route_path: &str,
        contributions: impl IntoIterator<Item = &'a BreadcrumbOptions>,
    ) -> Self {
        let mut result = Self::defaults(route_path);
        for options in contributions {
            result.apply(options);
        }
        result
    }

    fn apply(&mut self, options: &BreadcrumbOptions) {
        if let Some(id) = &options.id {
            self.id.clone_from(id);
        }
        if let Some(path) = &options.path {
            self.path.clone_from(path);
        }
        if let Some(schema_org) = options.schema_org {
            self.schema_org = schema_org;
        }
        if let Some(aria_label) = &options.aria_label {
            self.aria_label.clone_from(aria_label);
        }
        if let Some(hide) = options.hide_current {
            self.hide_current = hide;
        }
        if let Some(hide) = options.hide_root {
            self.hide_root = hide;
        }
        if let Some(hide) = options.hide_non_existing {
            self.hide_non_existing = hide;
        }
        if let Some(root) = &options.root_segment {
            self.root_segment.clone_from(root);
        }

        for (index, value) in options.overrides.iter().enumerate() {
            let Some(value) = value else { continue };
            if self.overrides.len() <= index {
                self.overrides.resize(index + 1, None);
            }
            self.overrides[index] = Some(value.clone());
        }

        self.append.extend(options.append.iter().cloned());
        self.prepend.extend(options.prepend.iter().cloned());
    }

    /// The override registered for segment `index`, if any.
    pub fn override_at(&self, index: usize) -> Option<&Override> {
        self.overrides.get(index).and_then(Option::as_ref)
    }
}
