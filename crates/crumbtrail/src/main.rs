//! Crumbtrail CLI
//!
//! Resolves breadcrumb trails for a route table from the command line.
//!
//! Usage:
//!   crumbtrail --routes routes.yml trail /blog/my-post
//!   crumbtrail --locale fr schema /fr/blog
//!   crumbtrail routes

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crumbtrail::config::Config;
use crumbtrail::host::Host;
use crumbtrail::path::TrailingSlash;
use crumbtrail::router::RouteTable;
use crumbtrail::schema::SchemaGraph;
use crumbtrail::{BreadcrumbOptions, Breadcrumbs, Collaborators};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Route definition file (overrides ROUTES_FILE).
    #[arg(long, global = true)]
    routes: Option<PathBuf>,

    /// Active locale (default: DEFAULT_LANGUAGE).
    #[arg(long, global = true)]
    locale: Option<String>,

    /// Drop the root item.
    #[arg(long, global = true)]
    hide_root: bool,

    /// Drop the item for the current page.
    #[arg(long, global = true)]
    hide_current: bool,

    /// Drop path segments that match no route.
    #[arg(long, global = true)]
    hide_non_existing: bool,

    /// Root segment of the trail.
    #[arg(long, global = true)]
    root_segment: Option<String>,

    /// Trailing slash policy (overrides TRAILING_SLASH).
    #[arg(long, global = true)]
    trailing_slash: Option<TrailingSlash>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the resolved breadcrumb items for a path as JSON.
    Trail { path: String },
    /// Print the schema.org BreadcrumbList for a path as JSON-LD.
    Schema { path: String },
    /// List the route table in match order.
    Routes,
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_tracing();

    let cli = Cli::parse();

    let mut config = Config::from_env().context("failed to load configuration")?;
    if let Some(routes) = &cli.routes {
        config.routes_file.clone_from(routes);
    }
    if let Some(trailing_slash) = cli.trailing_slash {
        config.trailing_slash = trailing_slash;
    }
    info!(
        routes = %config.routes_file.display(),
        build_mode = ?config.build_mode,
        "Configuration loaded"
    );

    let routes = config.route_table()?;

    match &cli.command {
        Command::Routes => {
            print_routes(&routes);
            Ok(())
        }
        Command::Trail { path } => {
            let (breadcrumbs, _) = build_breadcrumbs(&config, &cli, routes, path)?;
            let items = breadcrumbs.use_items(options(&cli));
            println!("{}", serde_json::to_string_pretty(&items.get())?);
            Ok(())
        }
        Command::Schema { path } => {
            let (breadcrumbs, graph) = build_breadcrumbs(&config, &cli, routes, path)?;
            let _items = breadcrumbs.use_items(options(&cli));
            println!("{}", serde_json::to_string_pretty(&graph.to_json_ld())?);
            Ok(())
        }
    }
}

/// Server-rendering breadcrumbs for a single page at `path`.
fn build_breadcrumbs(
    config: &Config,
    cli: &Cli,
    routes: RouteTable,
    path: &str,
) -> Result<(Breadcrumbs, Arc<SchemaGraph>)> {
    let localizer = config.localizer(cli.locale.as_deref())?;
    let collaborators = Collaborators::new(Arc::new(routes), localizer, config.site()?);

    let graph = Arc::new(SchemaGraph::new());
    let host = Arc::new(Host::server(config.build_mode, graph.clone()));
    host.set_route_path(path);

    Ok((Breadcrumbs::new(host, collaborators), graph))
}

fn options(cli: &Cli) -> BreadcrumbOptions {
    let mut options = BreadcrumbOptions::new()
        .hide_root(cli.hide_root)
        .hide_current(cli.hide_current)
        .hide_non_existing(cli.hide_non_existing);
    if let Some(root) = &cli.root_segment {
        options = options.root_segment(root.as_str());
    }
    options
}

fn print_routes(routes: &RouteTable) {
    if routes.is_empty() {
        println!("No routes defined.");
        return;
    }

    println!("{:<32} {:<24} {}", "PATH", "NAME", "LABEL");
    println!("{}", "-".repeat(72));

    for route in routes.all() {
        let meta = &route.meta;
        let label = meta
            .breadcrumb
            .as_ref()
            .and_then(|b| b.label.as_deref())
            .or(meta.breadcrumb_label.as_deref())
            .or(meta.breadcrumb_title.as_deref())
            .or(meta.title.as_deref())
            .unwrap_or("-");
        println!(
            "{:<32} {:<24} {}",
            route.path,
            route.name.as_deref().unwrap_or("-"),
            label
        );
    }
}

/// Initialize tracing. Logs go to stderr so stdout stays machine readable.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
