//! Server execution logic.

use std::{path::PathBuf, sync::Arc};

use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::get,
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use super::{
    handler::{debug_lobby, get_stats, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// HTTP surface settings that are not use cases.
#[derive(Debug, Clone, Default)]
pub struct ServerOptions {
    /// Built web front-end; `None` disables static serving.
    pub static_dir: Option<PathBuf>,
    /// CORS origins; `*` allows any.
    pub allowed_origins: Vec<String>,
}

/// Matchmaking and signaling server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(app_state, ServerOptions::default());
/// server.run("127.0.0.1".to_string(), 3000).await?;
/// ```
pub struct Server {
    state: Arc<AppState>,
    options: ServerOptions,
}

impl Server {
    pub fn new(state: AppState, options: ServerOptions) -> Self {
        Self {
            state: Arc::new(state),
            options,
        }
    }

    /// Build the router with every route and layer attached.
    pub fn router(&self) -> Router {
        let mut app = Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/stats", get(get_stats))
            .route("/debug/lobby", get(debug_lobby))
            .with_state(self.state.clone());

        // 静的ファイル（SPA のため未知のパスは index.html を返す）
        if let Some(dir) = &self.options.static_dir {
            let index = ServeFile::new(dir.join("index.html"));
            app = app.fallback_service(ServeDir::new(dir).fallback(index));
            tracing::info!("Serving static files from {}", dir.display());
        }

        app.layer(cors_layer(&self.options.allowed_origins))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server on `host:port` until Ctrl+C or SIGTERM.
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;

        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener).await
    }

    /// Serve on an already bound listener.
    pub async fn serve(self, listener: TcpListener) -> Result<(), Box<dyn std::error::Error>> {
        tracing::info!("Matchmaking server listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET])
        .allow_headers(Any);

    if allowed_origins.iter().any(|origin| origin == "*") {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin.trim()) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Ignoring invalid CORS origin '{}': {}", origin, e);
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(origins))
}
