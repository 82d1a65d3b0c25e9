//! Development server implementation.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Query, State,
    },
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use tokio::sync::RwLock;
use tower_http::services::ServeDir;

use mms_components::NavState;
use mms_static::{BuildConfig, StaticBuilder};

use crate::watcher::{FileWatcher, WatchEvent};
use crate::websocket::{hmr_client_script, next_message, HmrHub, HmrMessage};

const HMR_PATH: &str = "/__hmr";
const HMR_SCRIPT_PATH: &str = "/__hmr.js";

/// Configuration for the development server.
#[derive(Debug, Clone)]
pub struct DevServerConfig {
    /// Site build settings; the output directory doubles as the served root
    pub build: BuildConfig,

    /// Port to listen on
    pub port: u16,

    /// Host to bind to
    pub host: String,

    /// Open browser on start
    pub open: bool,
}

impl Default for DevServerConfig {
    fn default() -> Self {
        Self {
            build: BuildConfig {
                minify: false,
                ..Default::default()
            },
            port: 7777,
            host: "127.0.0.1".to_string(),
            open: true,
        }
    }
}

/// Errors that can occur with the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid listen address {0}")]
    InvalidAddress(String),

    #[error("Failed to bind to {0}: {1}")]
    BindError(SocketAddr, String),

    #[error("File watch error: {0}")]
    WatchError(String),

    #[error("Build error: {0}")]
    BuildError(#[from] mms_static::BuildError),
}

/// Shared server state.
struct ServerState {
    config: DevServerConfig,
    builder: StaticBuilder,
    hmr: HmrHub,
    /// Resolved output directory; rebuild writes land here
    output_root: PathBuf,
}

impl ServerState {
    fn new(config: DevServerConfig, builder: StaticBuilder) -> Self {
        let output_root = resolve(&config.build.output_dir);
        Self {
            config,
            builder,
            hmr: HmrHub::new(),
            output_root,
        }
    }

    /// Whether `path` was written by a build rather than edited by hand.
    fn is_build_output(&self, path: &Path) -> bool {
        resolve(path).starts_with(&self.output_root)
    }
}

/// Canonical form of `path`. Missing trailing components (a deleted file, an
/// output directory not built yet) are appended to their nearest existing
/// ancestor.
fn resolve(path: &Path) -> PathBuf {
    if let Ok(canonical) = path.canonicalize() {
        return canonical;
    }
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) if !parent.as_os_str().is_empty() => resolve(parent).join(name),
        _ => std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf()),
    }
}

type SharedState = Arc<RwLock<ServerState>>;

/// Development server.
pub struct DevServer {
    config: DevServerConfig,
}

impl DevServer {
    /// Create a new development server.
    pub fn new(config: DevServerConfig) -> Self {
        Self { config }
    }

    /// Paths whose changes trigger a rebuild.
    fn watch_paths(&self) -> Vec<PathBuf> {
        let mut paths = vec![self.config.build.assets_dir.clone()];
        if let Some(content) = &self.config.build.content {
            let dir = content
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(|p| p.to_path_buf())
                .unwrap_or_else(|| PathBuf::from("."));
            paths.push(dir);
        }
        paths
    }

    /// Start the development server.
    pub async fn start(self) -> Result<(), ServerError> {
        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port)
            .parse()
            .map_err(|_| {
                ServerError::InvalidAddress(format!("{}:{}", self.config.host, self.config.port))
            })?;

        let builder = StaticBuilder::new(self.config.build.clone())?;
        let result = builder.build().await?;
        tracing::info!(
            "Initial build: {} sections in {}ms",
            result.sections,
            result.duration_ms
        );

        let state: SharedState = Arc::new(RwLock::new(ServerState::new(
            self.config.clone(),
            builder,
        )));

        // Watched roots resolved so reported paths compare with the output root
        let watch_paths: Vec<PathBuf> = self.watch_paths().iter().map(|p| resolve(p)).collect();
        let (watcher, mut rx) = FileWatcher::new(&watch_paths)
            .map_err(|e| ServerError::WatchError(e.to_string()))?;

        let state_clone = Arc::clone(&state);
        tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                handle_watch_event(&state_clone, event).await;
            }
            // Keep watcher alive
            drop(watcher);
        });

        let app = router(state, &self.config.build.output_dir);

        tracing::info!("Starting dev server at http://{}", addr);

        if self.config.open {
            let url = format!("http://{}", addr);
            let _ = open::that(&url);
        }

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::BindError(addr, e.to_string()))?;

        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::BindError(addr, e.to_string()))?;

        Ok(())
    }
}

fn router(state: SharedState, output_dir: &Path) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/index.html", get(index_handler))
        .route(HMR_PATH, get(ws_handler))
        .route(HMR_SCRIPT_PATH, get(hmr_script_handler))
        .fallback_service(ServeDir::new(output_dir))
        .with_state(state)
}

/// Rebuild after a watched file changes.
async fn handle_watch_event(state: &SharedState, event: WatchEvent) {
    let (config, hmr) = {
        let state = state.read().await;

        // The output directory may sit inside a watched directory
        if state.is_build_output(event.path()) {
            return;
        }
        (state.config.build.clone(), state.hmr.clone())
    };

    match &event {
        WatchEvent::ContentModified(path) => tracing::info!("Content modified: {}", path.display()),
        WatchEvent::AssetModified(path) => tracing::info!("Asset modified: {}", path.display()),
        other => tracing::debug!("Change detected: {}", other.path().display()),
    }

    // Requests keep reading the previous builder until the new one is ready
    match rebuild(&config).await {
        Ok(builder) => {
            state.write().await.builder = builder;
            hmr.send(HmrMessage::Reload);
        }
        Err(e) => {
            tracing::warn!("Rebuild failed: {}", e);
            hmr.send(HmrMessage::BuildFailed {
                message: e.to_string(),
            });
        }
    }
}

/// Reload the catalog and rebuild the output directory.
async fn rebuild(config: &BuildConfig) -> Result<StaticBuilder, mms_static::BuildError> {
    let builder = StaticBuilder::new(config.clone())?;
    let result = builder.build().await?;
    tracing::info!("Rebuilt in {}ms", result.duration_ms);
    Ok(builder)
}

#[derive(Debug, Default, Deserialize)]
struct IndexQuery {
    /// `open` renders the mobile menu expanded
    menu: Option<String>,
}

impl IndexQuery {
    fn nav_state(&self) -> NavState {
        match self.menu.as_deref() {
            Some("open") => NavState::Expanded,
            _ => NavState::Collapsed,
        }
    }
}

/// Handler for the page, rendered live with the reload client injected.
async fn index_handler(
    State(state): State<SharedState>,
    Query(query): Query<IndexQuery>,
) -> Response {
    let state = state.read().await;

    match state
        .builder
        .render_index(query.nav_state(), &[HMR_SCRIPT_PATH.to_string()])
    {
        Ok(html) => Html(html).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to render page: {}", e),
        )
            .into_response(),
    }
}

/// Handler for the live-reload WebSocket endpoint.
async fn ws_handler(ws: WebSocketUpgrade, State(state): State<SharedState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_ws(socket, state))
}

/// Forward hub messages to one browser.
async fn handle_ws(mut socket: WebSocket, state: SharedState) {
    let mut rx = {
        let state = state.read().await;
        state.hmr.subscribe()
    };

    if send_json(&mut socket, &HmrMessage::Connected).await.is_err() {
        return;
    }

    while let Some(msg) = next_message(&mut rx).await {
        if send_json(&mut socket, &msg).await.is_err() {
            break;
        }
    }
}

async fn send_json(socket: &mut WebSocket, msg: &HmrMessage) -> Result<(), ()> {
    let json = serde_json::to_string(msg).map_err(|_| ())?;
    socket
        .send(Message::Text(json.into()))
        .await
        .map_err(|_| ())
}

/// Handler for the reload client script.
async fn hmr_script_handler() -> impl IntoResponse {
    (
        [("content-type", "application/javascript")],
        hmr_client_script(HMR_PATH),
    )
}
