//! The application host breadcrumbs run inside.
//!
//! A [`Host`] stands in for the web framework: it knows whether it is
//! rendering on the server or running interactively on the client, which
//! build it is, whether the client is still hydrating server output, and the
//! current route path. It also owns the lifecycle [`Hooks`], the
//! [`SharedState`] carried across the render/hydration boundary, and the
//! schema.org sink.

mod hooks;
mod state;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};
use crate::schema::SchemaOrgSink;

pub use hooks::{HookHandle, Hooks, LifecycleHook};
pub use state::SharedState;

/// Where rendering happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// Non-interactive render producing the page output.
    Server,
    /// Interactive client.
    Client,
}

/// Kind of build the host runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildMode {
    Development,
    #[default]
    Production,
    Test,
}

impl BuildMode {
    pub fn is_development(self) -> bool {
        self == Self::Development
    }
}

impl std::str::FromStr for BuildMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            "test" => Ok(Self::Test),
            other => Err(Error::BuildMode(other.to_string())),
        }
    }
}

/// Application host.
pub struct Host {
    render_mode: RenderMode,
    build_mode: BuildMode,
    hydrating: AtomicBool,
    route_path: RwLock<String>,
    hooks: Hooks,
    state: SharedState,
    schema_sink: Arc<dyn SchemaOrgSink>,
}

impl Host {
    /// A server-rendering host at route `/`.
    pub fn server(build_mode: BuildMode, schema_sink: Arc<dyn SchemaOrgSink>) -> Self {
        Self::new(RenderMode::Server, build_mode, schema_sink)
    }

    /// An interactive client host at route `/`.
    ///
    /// With a server payload the client starts out hydrating and imports the
    /// payload's shared state.
    pub fn client(
        build_mode: BuildMode,
        schema_sink: Arc<dyn SchemaOrgSink>,
        payload: Option<&Value>,
    ) -> Self {
        let host = Self::new(RenderMode::Client, build_mode, schema_sink);
        if let Some(payload) = payload {
            host.state.load_payload(payload);
            host.hydrating.store(true, Ordering::SeqCst);
        }
        host
    }

    fn new(
        render_mode: RenderMode,
        build_mode: BuildMode,
        schema_sink: Arc<dyn SchemaOrgSink>,
    ) -> Self {
        Self {
            render_mode,
            build_mode,
            hydrating: AtomicBool::new(false),
            route_path: RwLock::new("/".to_string()),
            hooks: Hooks::new(),
            state: SharedState::new(),
            schema_sink,
        }
    }

    pub fn render_mode(&self) -> RenderMode {
        self.render_mode
    }

    pub fn is_client(&self) -> bool {
        self.render_mode == RenderMode::Client
    }

    pub fn build_mode(&self) -> BuildMode {
        self.build_mode
    }

    /// Whether the client is still hydrating server output.
    pub fn is_hydrating(&self) -> bool {
        self.hydrating.load(Ordering::SeqCst)
    }

    /// Mark hydration as complete.
    pub fn finish_hydration(&self) {
        if self.hydrating.swap(false, Ordering::SeqCst) {
            debug!("hydration finished");
        }
    }

    /// Current route path.
    pub fn route_path(&self) -> String {
        self.route_path.read().clone()
    }

    /// Set the current route path without emitting lifecycle hooks.
    pub fn set_route_path(&self, path: impl Into<String>) {
        *self.route_path.write() = path.into();
    }

    /// Navigate to `path`: `PageStart`, route change, `PageFinish`.
    pub fn navigate(&self, path: impl Into<String>) {
        let path = path.into();
        debug!(path = %path, "navigating");
        self.hooks.call(LifecycleHook::PageStart);
        self.set_route_path(path);
        self.hooks.call(LifecycleHook::PageFinish);
    }

    pub fn hooks(&self) -> &Hooks {
        &self.hooks
    }

    /// Emit a lifecycle hook.
    pub fn call_hook(&self, hook: LifecycleHook) {
        self.hooks.call(hook);
    }

    pub fn state(&self) -> &SharedState {
        &self.state
    }

    /// Shared state to embed in the rendered page.
    pub fn payload(&self) -> Value {
        self.state.to_payload()
    }

    pub fn schema_sink(&self) -> &Arc<dyn SchemaOrgSink> {
        &self.schema_sink
    }

    /// Whether structured data is emitted in this context: server renders,
    /// development builds and test builds.
    pub fn emits_schema_org(&self) -> bool {
        self.render_mode == RenderMode::Server
            || matches!(self.build_mode, BuildMode::Development | BuildMode::Test)
    }
}

impl std::fmt::Debug for Host {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Host")
            .field("render_mode", &self.render_mode)
            .field("build_mode", &self.build_mode)
            .field("hydrating", &self.is_hydrating())
            .field("route_path", &*self.route_path.read())
            .field("hooks", &self.hooks)
            .finish()
    }
}
