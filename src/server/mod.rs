//! HTTP surface: router, CORS middleware and handlers

pub mod cors;
pub mod declinations;
pub mod error;
pub mod health;

use std::sync::Arc;

use axum::{middleware, routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::ephemeris::Ephemeris;

#[derive(Clone)]
pub struct AppState {
    pub ephemeris: Arc<dyn Ephemeris>,
}

impl AppState {
    pub fn new(ephemeris: Arc<dyn Ephemeris>) -> Self {
        Self { ephemeris }
    }
}

/// Build the application router with the declination endpoint mounted at `route`
pub fn router(state: AppState, route: &str) -> Router {
    Router::new()
        .route(
            route,
            get(declinations::get_declinations)
                .post(declinations::get_declinations)
                .options(declinations::preflight),
        )
        .route("/health", get(health::health_check))
        .fallback(declinations::not_found)
        .layer(middleware::from_fn(cors::cors))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_server(config: Config, ephemeris: Arc<dyn Ephemeris>) -> std::io::Result<()> {
    let app = router(AppState::new(ephemeris), &config.route);

    tracing::info!(bind = %config.bind, route = %config.route, "Starting server");

    let listener = tokio::net::TcpListener::bind(&config.bind).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutting down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
