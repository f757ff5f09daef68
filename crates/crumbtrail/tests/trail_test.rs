#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Breadcrumb trail resolution through the public API.

mod common;

use common::TestApp;
use crumbtrail::i18n::LocaleStrategy;
use crumbtrail::path::TrailingSlash;
use crumbtrail::router::{RouteDefinition, RouteTable};
use crumbtrail::{BreadcrumbItem, BreadcrumbOptions, RouteTarget};
use crumbtrail_test_utils::{assert, crumb, fixtures, label_only, labels, trail};

#[test]
fn test_blog_post_trail() {
    let app = TestApp::server("/blog/my-post");
    let actual = app.trail(BreadcrumbOptions::new());

    assert::json_eq(
        &actual,
        &trail(&[
            crumb("/", "Home"),
            crumb("/blog", "Blog"),
            crumb("/blog/my-post", "My Post").current(),
        ]),
    );
}

#[test]
fn test_unmatched_segment_uses_title_case() {
    let routes = RouteTable::from_definitions([
        RouteDefinition::new("/").name("index"),
        RouteDefinition::new("/blog/my-post").title("My Post"),
    ]);
    let app = TestApp::builder().routes(routes).path("/blog/my-post").build();

    assert_eq!(
        labels(&app.trail(BreadcrumbOptions::new())),
        vec!["Home", "Blog", "My Post"]
    );
}

#[test]
fn test_hide_non_existing_leaves_gap() {
    let routes = RouteTable::from_definitions([
        RouteDefinition::new("/").name("index"),
        RouteDefinition::new("/blog/my-post").title("My Post"),
    ]);
    let app = TestApp::builder().routes(routes).path("/blog/my-post").build();

    let actual = app.trail(BreadcrumbOptions::new().hide_non_existing(true));
    assert::json_eq(
        &actual,
        &trail(&[
            crumb("/", "Home"),
            crumb("/blog/my-post", "My Post").current(),
        ]),
    );
}

#[test]
fn test_prepend_is_always_first() {
    let app = TestApp::server("/blog/my-post");
    let _layout = app.use_items(
        BreadcrumbOptions::new()
            .prepend(BreadcrumbItem::link("/shop").label("Shop"))
            .suppress(0),
    );
    let _page = app.use_items(
        BreadcrumbOptions::new().override_at(0, BreadcrumbItem::new().label("Start")),
    );

    let actual = app.trail(BreadcrumbOptions::new());
    assert_eq!(labels(&actual), vec!["Shop", "Start", "Blog", "My Post"]);
}

#[test]
fn test_suppress_survives_later_overrides() {
    let app = TestApp::server("/blog/my-post");
    let _a = app.use_items(BreadcrumbOptions::new().suppress(1));
    let _b = app.use_items(
        BreadcrumbOptions::new().override_at(2, BreadcrumbItem::new().label("This post")),
    );

    let actual = app.trail(BreadcrumbOptions::new());
    assert_eq!(labels(&actual), vec!["Home", "This post"]);
}

#[test]
fn test_append_label_only_item() {
    let app = TestApp::server("/blog/my-post");
    let actual = app.trail(
        BreadcrumbOptions::new()
            .hide_root(true)
            .append(BreadcrumbItem::new().label("Comments").aria_label("Post comments")),
    );

    assert::json_eq(
        &actual,
        &trail(&[
            crumb("/blog", "Blog"),
            crumb("/blog/my-post", "My Post").current(),
            label_only("Comments").with_aria_label("Post comments"),
        ]),
    );
}

#[test]
fn test_hide_root_and_current() {
    let app = TestApp::server("/blog/my-post");
    let items = app.use_items(BreadcrumbOptions::new().hide_root(true).hide_current(true));

    let resolved = items.get();
    assert!(resolved.iter().all(|i| i.to.as_deref() != Some("/")));
    assert!(resolved.iter().all(|i| !i.current));
    assert_eq!(resolved.len(), 1);
}

#[test]
fn test_trailing_slash_always() {
    let app = TestApp::builder()
        .path("/blog/my-post/")
        .trailing_slash(TrailingSlash::Always)
        .build();

    let actual = app.trail(BreadcrumbOptions::new());
    assert::json_eq(
        &actual,
        &trail(&[
            crumb("/", "Home"),
            crumb("/blog/", "Blog"),
            crumb("/blog/my-post/", "My Post").current(),
        ]),
    );
}

#[test]
fn test_route_breadcrumb_meta() {
    let app = TestApp::server("/about");
    let actual = app.trail(BreadcrumbOptions::new());
    assert::json_eq(
        &actual,
        &trail(&[
            crumb("/", "Home"),
            crumb("/about", "About")
                .with_aria_label("About this site")
                .current(),
        ]),
    );
}

#[test]
fn test_param_route_uses_breadcrumb_title() {
    let app = TestApp::server("/blog/tags/rust");
    let actual = app.trail(BreadcrumbOptions::new());
    assert_eq!(labels(&actual), vec!["Home", "Blog", "Tags", "Tagged"]);
}

#[test]
fn test_named_target_append() {
    let app = TestApp::server("/blog");
    let actual = app.trail(
        BreadcrumbOptions::new()
            .append(BreadcrumbItem::new().to(RouteTarget::named("blog-tag").param("tag", "rust")))
            .append(BreadcrumbItem::new().to(RouteTarget::named("no-such-route"))),
    );

    assert::json_eq(
        &actual,
        &trail(&[
            crumb("/", "Home"),
            crumb("/blog", "Blog").current(),
            crumb("/blog/tags/rust", "Tagged"),
        ]),
    );
}

#[test]
fn test_shop_routes_from_json() {
    let routes = RouteTable::from_json(fixtures::shop_routes_json()).unwrap();
    let app = TestApp::builder().routes(routes).path("/shop/shoes/runner").build();

    let actual = app.trail(BreadcrumbOptions::new());
    assert::json_eq(
        &actual,
        &trail(&[
            crumb("/", "Home"),
            crumb("/shop", "Shop"),
            crumb("/shop/shoes", "Category"),
            crumb("/shop/shoes/runner", "Product").current(),
        ]),
    );
}

#[test]
fn test_explicit_path_option() {
    let app = TestApp::server("/about");
    let actual = app.trail(BreadcrumbOptions::new().path("/blog?page=2"));
    assert_eq!(labels(&actual), vec!["Home", "Blog"]);
    assert_eq!(actual[1]["current"], true);
}

#[test]
fn test_localized_root_and_labels() {
    let routes = RouteTable::from_yaml(fixtures::localized_routes_yaml()).unwrap();
    let app = TestApp::builder()
        .routes(routes)
        .path("/fr/blog")
        .locale("fr")
        .translations("fr", fixtures::translations_fr_yaml())
        .build();

    let actual = app.trail(BreadcrumbOptions::new());
    assert::json_eq(
        &actual,
        &trail(&[
            crumb("/fr", "Accueil").with_aria_label("Page d'accueil"),
            crumb("/fr/blog", "Journal").current(),
        ]),
    );
}

#[test]
fn test_default_locale_is_unprefixed() {
    let routes = RouteTable::from_yaml(fixtures::localized_routes_yaml()).unwrap();
    let app = TestApp::builder()
        .routes(routes)
        .path("/blog")
        .translations("fr", fixtures::translations_fr_yaml())
        .translations("en", fixtures::translations_en_yaml())
        .build();

    let actual = app.trail(BreadcrumbOptions::new());
    assert::json_eq(
        &actual,
        &trail(&[
            crumb("/", "Home"),
            crumb("/blog", "Blog")
                .with_aria_label("All blog posts")
                .current(),
        ]),
    );
}

#[test]
fn test_prefix_strategy_prefixes_default_locale() {
    let routes = RouteTable::from_definitions([
        RouteDefinition::new("/en").name("index___en"),
        RouteDefinition::new("/en/blog").name("blog___en").title("Blog"),
    ]);
    let app = TestApp::builder()
        .routes(routes)
        .strategy(LocaleStrategy::Prefix)
        .path("/en/blog")
        .build();

    let actual = app.trail(BreadcrumbOptions::new().hide_root(true));
    assert::json_eq(&actual, &trail(&[crumb("/en/blog", "Blog").current()]));
}

#[test]
fn test_resolution_is_idempotent() {
    let app = TestApp::server("/blog/my-post");
    let items = app.use_items(
        BreadcrumbOptions::new()
            .prepend(BreadcrumbItem::link("/shop").label("Shop"))
            .hide_non_existing(true),
    );

    assert_eq!(items.get(), items.get());
}
