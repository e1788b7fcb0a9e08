//! HTTP JSON API for the Phrygian Way site.
//!
//! # Responsibility
//! - Route `/api/*` requests to core services.
//! - Serve until a shutdown signal arrives.

pub mod api;
pub mod config;
pub mod envelope;
pub mod middleware;
pub mod state;

use axum::routing::{get, put};
use axum::Router;
use log::info;
use std::net::SocketAddr;

pub use config::ServerConfig;
pub use state::AppState;

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(api::health))
        .route("/api/content", get(api::get_content).put(api::put_content))
        .route(
            "/api/gallery",
            get(api::list_gallery).post(api::create_gallery_image),
        )
        .route(
            "/api/gallery/{id}",
            put(api::update_gallery_image).delete(api::delete_gallery_image),
        )
        .route("/api/routes", get(api::list_routes))
        .route("/api/routes/{route_id}", get(api::get_route))
        .layer(axum::middleware::from_fn(middleware::log_requests))
        .with_state(state)
}

/// Binds `addr` and serves `state` until Ctrl-C.
pub async fn serve(addr: SocketAddr, state: AppState) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(
        "event=server_listen module=server status=ok addr={}",
        listener.local_addr()?
    );

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("event=server_stop module=server status=ok");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        log::error!("event=shutdown_signal module=server status=error error={err}");
    }
}
