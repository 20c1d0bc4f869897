pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};

use crate::auth::require_auth;
use crate::export::handlers::{handle_export_portfolio, handle_export_resume};
use crate::state::AppState;

/// Template HTML arrives with fonts and images inlined; the default 2MB
/// body limit is far too small.
const BODY_LIMIT_BYTES: usize = 50 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    let export_routes = Router::new()
        .route("/api/export/resume/:format", post(handle_export_resume))
        .route(
            "/api/export/portfolio/:format",
            post(handle_export_portfolio),
        )
        .layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .route("/", get(health::index_handler))
        .route("/health", get(health::health_handler))
        .merge(export_routes)
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .with_state(state)
}
