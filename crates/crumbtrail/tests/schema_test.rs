#![allow(clippy::unwrap_used, clippy::expect_used)]
//! schema.org BreadcrumbList registration and output.

mod common;

use common::TestApp;
use crumbtrail::host::BuildMode;
use crumbtrail::path::TrailingSlash;
use crumbtrail::{BreadcrumbItem, BreadcrumbOptions};
use crumbtrail_test_utils::assert;
use serde_json::json;

#[test]
fn test_server_graph() {
    let app = TestApp::server("/blog/my-post");
    let _items = app.use_items(BreadcrumbOptions::new());

    assert::json_eq(
        &app.graph.to_json_ld(),
        &json!({
            "@context": "https://schema.org",
            "@graph": [{
                "@type": "BreadcrumbList",
                "@id": "https://example.com/blog/my-post#breadcrumb",
                "itemListElement": [
                    {
                        "@type": "ListItem",
                        "position": 1,
                        "name": "Home",
                        "item": "https://example.com/"
                    },
                    {
                        "@type": "ListItem",
                        "position": 2,
                        "name": "Blog",
                        "item": "https://example.com/blog"
                    },
                    {
                        "@type": "ListItem",
                        "position": 3,
                        "name": "My Post",
                        "item": "https://example.com/blog/my-post"
                    }
                ]
            }]
        }),
    );
}

#[test]
fn test_registered_once_per_id() {
    let app = TestApp::server("/blog");
    let _layout = app.use_items(BreadcrumbOptions::new());
    let _page = app.use_items(BreadcrumbOptions::new().hide_root(true));
    let _side = app.use_items(BreadcrumbOptions::new().id("sidebar"));

    assert_eq!(app.graph.ids(), vec!["#breadcrumb", "#sidebar"]);
}

#[test]
fn test_graph_follows_contributions() {
    let app = TestApp::server("/blog");
    let _layout = app.use_items(BreadcrumbOptions::new());
    let first = app.graph.to_json_ld();
    assert_eq!(first["@graph"][0]["itemListElement"].as_array().unwrap().len(), 2);

    let _page = app.use_items(
        BreadcrumbOptions::new().append(BreadcrumbItem::new().label("Archive")),
    );
    let elements = app.graph.to_json_ld()["@graph"][0]["itemListElement"].clone();
    assert_eq!(elements.as_array().unwrap().len(), 3);
    assert::lacks_key(&elements[2], "item");
    assert_eq!(elements[2]["name"], "Archive");
}

#[test]
fn test_production_client_does_not_register() {
    let app = TestApp::builder().path("/blog").client(None).build();
    let _items = app.use_items(BreadcrumbOptions::new());
    assert!(app.graph.is_empty());
}

#[test]
fn test_development_and_test_clients_register() {
    for build_mode in [BuildMode::Development, BuildMode::Test] {
        let app = TestApp::builder()
            .path("/blog")
            .client(None)
            .build_mode(build_mode)
            .build();
        let _items = app.use_items(BreadcrumbOptions::new());
        assert_eq!(app.graph.len(), 1);
    }
}

#[test]
fn test_disabled_schema_is_not_registered() {
    let app = TestApp::server("/blog");
    let _items = app.use_items(BreadcrumbOptions::new().schema_org(false));
    assert!(app.graph.is_empty());

    let script = app.graph.render_script();
    assert::contains(&script, r#""@graph":[]"#);
}

#[test]
fn test_disabling_later_is_ignored() {
    let app = TestApp::builder()
        .path("/blog")
        .build_mode(BuildMode::Development)
        .build();
    let _a = app.use_items(BreadcrumbOptions::new());
    let _b = app.use_items(BreadcrumbOptions::new().schema_org(false));

    assert_eq!(app.graph.len(), 1);
    assert_eq!(
        app.graph.to_json_ld()["@graph"].as_array().unwrap().len(),
        1
    );
}

#[test]
fn test_trailing_slash_in_urls() {
    let app = TestApp::builder()
        .path("/blog")
        .trailing_slash(TrailingSlash::Always)
        .build();
    let _items = app.use_items(BreadcrumbOptions::new());

    let script = app.graph.render_script();
    assert::contains(&script, r#""@id":"https://example.com/blog/#breadcrumb""#);
    assert::contains(&script, r#""item":"https://example.com/blog/""#);
}

#[test]
fn test_dropped_list_leaves_graph() {
    let app = TestApp::server("/blog");
    let items = app.use_items(BreadcrumbOptions::new());
    drop(items);

    assert_eq!(app.graph.len(), 1);
    assert!(app.graph.to_json_ld()["@graph"].as_array().unwrap().is_empty());
}

#[test]
fn test_reused_list_id_replaces_dropped_list() {
    let app = TestApp::builder()
        .path("/")
        .client(None)
        .build_mode(BuildMode::Development)
        .build();

    for path in ["/blog", "/about", "/blog/my-post"] {
        app.host.navigate(path);
        let items = app.use_items(BreadcrumbOptions::new());
        assert_eq!(app.graph.len(), 1);
        drop(items);
    }
    assert_eq!(app.graph.ids(), vec!["#breadcrumb"]);
}

#[test]
fn test_query_string_not_in_id() {
    let app = TestApp::server("/blog?page=2");
    let _items = app.use_items(BreadcrumbOptions::new());
    assert_eq!(
        app.graph.to_json_ld()["@graph"][0]["@id"],
        "https://example.com/blog#breadcrumb"
    );
}
