mod auth;
mod config;
mod errors;
mod export;
mod models;
mod render;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::auth::FirebaseVerifier;
use crate::config::Config;
use crate::render::ChromeEngine;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let crate_name = env!("CARGO_PKG_NAME").replace('-', "_");
            EnvFilter::new(format!("{}={}", crate_name, &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Reslio export API v{}", env!("CARGO_PKG_VERSION"));

    // Rendering engine: one sandboxed Chrome process per export, capped
    let engine = Arc::new(ChromeEngine::new(config.max_concurrent_renders));
    info!(
        "Render engine ready (max {} concurrent browser instances)",
        config.max_concurrent_renders
    );

    // Identity provider collaborator for the export routes
    let verifier = Arc::new(FirebaseVerifier::new(config.firebase_web_api_key.clone()));
    info!("Identity verifier initialized");

    let state = AppState {
        config: config.clone(),
        engine,
        verifier,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
