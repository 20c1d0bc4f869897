use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::export::{ExportError, ExportFormat};

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Export failures carry the requested format plus the adapter error. The
/// adapter error is logged server-side in full; the response body only ever
/// contains a stable category code and an opaque message, unless the service
/// runs with `EXPOSE_ERROR_DETAIL=true` (local debugging), in which case
/// `detail` is echoed back.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("{format} export failed: {source}")]
    Export {
        format: ExportFormat,
        source: ExportError,
        detail: Option<String>,
    },

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Wraps an adapter failure for a given format. `expose_detail` controls
    /// whether the underlying cause is surfaced to the caller.
    pub fn export(format: ExportFormat, source: ExportError, expose_detail: bool) -> Self {
        let detail = expose_detail.then(|| source.to_string());
        AppError::Export {
            format,
            source,
            detail,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Unauthorized(msg) => {
                tracing::warn!("Auth rejected: {msg}");
                (
                    StatusCode::UNAUTHORIZED,
                    "UNAUTHORIZED",
                    "Invalid or missing token".to_string(),
                )
            }
            AppError::Export {
                format,
                source,
                detail,
            } => {
                // Validation-class payload problems are user-correctable and
                // safe to return verbatim. Everything else stays opaque.
                if let ExportError::Validation(msg) = source {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                } else {
                    tracing::error!("{format} export failed: {source:?}");
                    let message = detail
                        .clone()
                        .unwrap_or_else(|| format!("Failed to export {format}"));
                    (StatusCode::INTERNAL_SERVER_ERROR, source.code(), message)
                }
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "success": false,
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn test_validation_error_maps_to_400() {
        let resp = AppError::Validation("bad payload".to_string()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_unauthorized_maps_to_401() {
        let resp = AppError::Unauthorized("no token".to_string()).into_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_export_validation_is_user_correctable() {
        let err = AppError::export(
            ExportFormat::Pdf,
            ExportError::Validation("templateHTML is required".to_string()),
            false,
        );
        let resp = err.into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_render_engine_error_is_opaque_500() {
        let err = AppError::export(
            ExportFormat::Pdf,
            ExportError::RenderEngine(anyhow!("chrome exploded at /usr/bin/chromium")),
            false,
        );
        match &err {
            AppError::Export { detail, .. } => assert!(detail.is_none()),
            _ => unreachable!(),
        }
        let resp = err.into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_expose_detail_carries_cause() {
        let err = AppError::export(
            ExportFormat::Image,
            ExportError::RenderEngine(anyhow!("launch failed")),
            true,
        );
        match err {
            AppError::Export { detail, .. } => {
                assert!(detail.unwrap().contains("launch failed"));
            }
            _ => unreachable!(),
        }
    }
}
