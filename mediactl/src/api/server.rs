//! HTTP server setup and routing

use crate::error::{Error, Result};
use crate::manager::MediaManager;
use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Shared application context passed to all handlers
#[derive(Clone)]
pub struct AppContext {
    pub manager: Arc<MediaManager>,
}

/// Build the router with all routes
pub fn create_router(ctx: AppContext) -> Router {
    Router::new()
        .route("/health", get(super::handlers::health))
        // Volume
        .route("/volume", get(super::handlers::get_volume))
        .route("/volume", post(super::handlers::set_volume))
        .route("/volume/change", post(super::handlers::change_volume))
        // Channels
        .route("/channels", get(super::handlers::list_channels))
        .route("/sounds/destroy", post(super::handlers::destroy_sounds))
        .route("/ambiance", post(super::handlers::setup_ambiance))
        // SSE event stream
        .route("/events", get(super::sse::event_stream))
        .with_state(ctx)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Serve the control API on `port` until `shutdown` resolves
pub async fn run(
    port: u16,
    manager: Arc<MediaManager>,
    shutdown: impl std::future::Future<Output = ()> + Send + 'static,
) -> Result<()> {
    let app = create_router(AppContext { manager });

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Starting HTTP server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| Error::Http(format!("Failed to bind to {}: {}", addr, e)))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| Error::Http(format!("Server error: {}", e)))?;

    Ok(())
}
