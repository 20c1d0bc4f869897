use axum::Json;
use serde_json::{json, Value};

/// GET /
/// Service info and endpoint map, handy for smoke checks after deploy.
pub async fn index_handler() -> Json<Value> {
    Json(json!({
        "message": "Reslio export API is running",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "health": "/health",
            "resumeExport": "/api/export/resume/{pdf|image|docx}",
            "portfolioExport": "/api/export/portfolio/zip",
        }
    }))
}

/// GET /health
/// Returns a simple status object with service version.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "reslio-api"
    }))
}
