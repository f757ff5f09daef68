//! schema.org `BreadcrumbList` output.
//!
//! A [`BreadcrumbList`] is registered with the host's [`SchemaOrgSink`] once
//! per breadcrumb list. It only holds a weak reference to its context and
//! re-derives its entries from the resolved items whenever it is read, so the
//! structured data always mirrors the visible trail.

use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use serde::Serialize;
use serde_json::{Value, json};
use tracing::debug;

use crate::context::BreadcrumbContext;
use crate::path::without_query;

/// Consumer of structured breadcrumb descriptors.
pub trait SchemaOrgSink: Send + Sync {
    fn register(&self, list: BreadcrumbList);
}

/// One `ListItem` of a `BreadcrumbList`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListItem {
    pub position: usize,
    pub name: String,
    /// Absolute canonical URL; absent for label-only entries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<String>,
}

/// Lazily derived `BreadcrumbList` descriptor.
#[derive(Clone)]
pub struct BreadcrumbList {
    id: String,
    context: Weak<BreadcrumbContext>,
}

impl BreadcrumbList {
    pub fn new(context: &Arc<BreadcrumbContext>) -> Self {
        Self {
            id: format!("#{}", context.id()),
            context: Arc::downgrade(context),
        }
    }

    /// Fragment id, `#<breadcrumb id>`.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Whether the breadcrumb list behind this descriptor still exists.
    pub fn is_live(&self) -> bool {
        self.context.strong_count() > 0
    }

    /// Entries mirroring the current trail.
    pub fn item_list_element(&self) -> Vec<ListItem> {
        let Some(context) = self.context.upgrade() else {
            return Vec::new();
        };
        let site = &context.collaborators().site;

        context
            .items()
            .into_iter()
            .enumerate()
            .map(|(index, item)| ListItem {
                position: index + 1,
                name: if item.label.is_empty() {
                    item.aria_label
                } else {
                    item.label
                },
                item: item.to.as_deref().map(|to| site.absolute_url(to)),
            })
            .collect()
    }

    /// JSON-LD node, or `None` once the breadcrumb list is gone.
    ///
    /// The node `@id` is the current page's canonical URL plus the fragment id.
    pub fn to_json_ld(&self) -> Option<Value> {
        let context = self.context.upgrade()?;
        let page = context
            .collaborators()
            .site
            .absolute_url(without_query(&context.host().route_path()));

        let elements: Vec<Value> = self
            .item_list_element()
            .into_iter()
            .map(|entry| {
                let mut node = json!({
                    "@type": "ListItem",
                    "position": entry.position,
                    "name": entry.name,
                });
                if let Some(item) = entry.item {
                    node["item"] = Value::String(item);
                }
                node
            })
            .collect();

        Some(json!({
            "@type": "BreadcrumbList",
            "@id": format!("{page}{}", self.id),
            "itemListElement": elements,
        }))
    }
}

impl std::fmt::Debug for BreadcrumbList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BreadcrumbList")
            .field("id", &self.id)
            .field("live", &self.is_live())
            .finish()
    }
}

/// Collects registered descriptors and renders them as one JSON-LD graph.
#[derive(Debug, Default)]
pub struct SchemaGraph {
    lists: Mutex<Vec<BreadcrumbList>>,
}

impl SchemaGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.lists.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.lock().is_empty()
    }

    /// Registered descriptor ids, in registration order.
    pub fn ids(&self) -> Vec<String> {
        self.lists.lock().iter().map(|l| l.id.clone()).collect()
    }

    /// `{"@context": "https://schema.org", "@graph": [...]}` over every live
    /// descriptor.
    pub fn to_json_ld(&self) -> Value {
        let lists = self.lists.lock().clone();
        let graph: Vec<Value> = lists.iter().filter_map(BreadcrumbList::to_json_ld).collect();
        json!({
            "@context": "https://schema.org",
            "@graph": graph,
        })
    }

    /// The graph as an HTML script element.
    pub fn render_script(&self) -> String {
        let body = self.to_json_ld().to_string().replace("</", "<\\/");
        format!(r#"<script type="application/ld+json">{body}</script>"#)
    }
}

impl SchemaOrgSink for SchemaGraph {
    fn register(&self, list: BreadcrumbList) {
        debug!(id = %list.id, "registered schema.org breadcrumb list");
        let mut lists = self.lists.lock();
        lists.retain(BreadcrumbList::is_live);
        lists.push(list);
    }
}
