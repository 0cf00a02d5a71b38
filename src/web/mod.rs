//! Web Surface
//!
//! Serves the story form over HTTP. Each submission triggers exactly one
//! generation call; the request is held open until the provider answers.
//! The only shared state is the story weaver (credential and selected
//! model), which is read-only once the server is up.

mod handlers;
pub mod page;

use axum::Router;
use axum::routing::{get, post};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::CredentialSource;
use crate::story::StoryWeaver;
use crate::types::{Result, StoryError};

/// State shared between request handlers
#[derive(Clone)]
pub(crate) struct AppState {
    weaver: Arc<StoryWeaver>,
    logo_path: Option<Arc<PathBuf>>,
    credential_source: Option<CredentialSource>,
}

/// Story form server
pub struct Server {
    weaver: Arc<StoryWeaver>,
    logo_path: Option<PathBuf>,
    credential_source: Option<CredentialSource>,
}

impl Server {
    pub fn new(weaver: Arc<StoryWeaver>) -> Self {
        Self {
            weaver,
            logo_path: None,
            credential_source: None,
        }
    }

    /// Tell visitors where the API key was loaded from
    pub fn with_credential_source(mut self, source: CredentialSource) -> Self {
        self.credential_source = Some(source);
        self
    }

    /// Show the campus logo from `path` when the file exists
    pub fn with_logo(mut self, path: PathBuf) -> Self {
        if path.is_file() {
            self.logo_path = Some(path);
        } else {
            info!("Logo not found at {}, page renders without it", path.display());
        }
        self
    }

    pub fn router(self) -> Router {
        Router::new()
            .route("/", get(handlers::index))
            .route("/story", post(handlers::weave_story))
            .route("/logo", get(handlers::logo))
            .layer(TraceLayer::new_for_http())
            .with_state(AppState {
                weaver: self.weaver,
                logo_path: self.logo_path.map(Arc::new),
                credential_source: self.credential_source,
            })
    }

    /// Bind `addr` and serve until Ctrl-C
    pub async fn run(self, addr: &str) -> Result<()> {
        let app = self.router();

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| StoryError::Server(format!("Failed to bind {}: {}", addr, e)))?;

        info!("Story Weaver listening on http://{}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| StoryError::Server(e.to_string()))?;

        info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}
