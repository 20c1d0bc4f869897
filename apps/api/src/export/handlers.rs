//! Export endpoints. Each request is single-shot: validate the format,
//! dispatch to the matching strategy, stream the artifact back.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::export::{run_export, Artifact, ExportFormat, ExportPayload};
use crate::models::resume::ResumeData;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeExportRequest {
    #[serde(default)]
    pub resume_data: Option<ResumeData>,
    #[serde(default)]
    pub template_html: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioExportRequest {
    #[serde(default)]
    pub portfolio_html: Option<String>,
    #[serde(default)]
    pub portfolio_css: Option<String>,
    #[serde(default)]
    pub portfolio_js: Option<String>,
}

/// POST /api/export/resume/:format
pub async fn handle_export_resume(
    State(state): State<AppState>,
    Path(format): Path<String>,
    Json(req): Json<ResumeExportRequest>,
) -> Result<Artifact, AppError> {
    let format: ExportFormat = format.parse().map_err(AppError::Validation)?;
    let payload = resume_payload(format, req)?;

    run_export(state.engine.as_ref(), format, payload)
        .await
        .map_err(|e| AppError::export(format, e, state.config.expose_error_detail))
}

/// POST /api/export/portfolio/:format
pub async fn handle_export_portfolio(
    State(state): State<AppState>,
    Path(format): Path<String>,
    Json(req): Json<PortfolioExportRequest>,
) -> Result<Artifact, AppError> {
    let format: ExportFormat = format.parse().map_err(AppError::Validation)?;
    if format != ExportFormat::Zip {
        return Err(AppError::Validation(format!(
            "Unsupported portfolio export format: {format}"
        )));
    }

    let payload = ExportPayload::Bundle {
        html: req.portfolio_html,
        css: req.portfolio_css,
        js: req.portfolio_js,
    };

    run_export(state.engine.as_ref(), format, payload)
        .await
        .map_err(|e| AppError::export(format, e, state.config.expose_error_detail))
}

fn resume_payload(
    format: ExportFormat,
    req: ResumeExportRequest,
) -> Result<ExportPayload, AppError> {
    match format {
        ExportFormat::Pdf | ExportFormat::Image => {
            let html = req
                .template_html
                .filter(|h| !h.trim().is_empty())
                .ok_or_else(|| {
                    AppError::Validation(format!("templateHTML is required for {format} export"))
                })?;
            Ok(ExportPayload::Markup { html })
        }
        ExportFormat::Docx => {
            let data = req.resume_data.ok_or_else(|| {
                AppError::Validation("resumeData is required for docx export".to_string())
            })?;
            Ok(ExportPayload::Resume(data))
        }
        ExportFormat::Zip => Err(AppError::Validation(
            "zip export is available for portfolios only".to_string(),
        )),
    }
}
