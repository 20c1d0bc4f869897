//! Export service — dispatches a format selector plus payload to the
//! matching renderer strategy and wraps the bytes as a downloadable artifact.
//!
//! Every export is a pure function of its payload: nothing is persisted and
//! nothing outlives the request. There is no queue and no retry; a failed
//! export returns nothing, never a partial artifact.

pub mod archive;
pub mod docx;
pub mod handlers;

use std::fmt;
use std::str::FromStr;

use axum::http::header;
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use chrono::Utc;
use thiserror::Error;
use tracing::info;

use crate::models::resume::ResumeData;
use crate::render::RenderEngine;

// ────────────────────────────────────────────────────────────────────────────
// Error taxonomy
// ────────────────────────────────────────────────────────────────────────────

/// Adapter-level failure, one variant per failure class. Callers see only a
/// stable category; the cause is logged server-side (see `errors::AppError`).
#[derive(Debug, Error)]
pub enum ExportError {
    /// Missing or malformed payload — user-correctable.
    #[error("invalid export payload: {0}")]
    Validation(String),

    /// Browser failed to launch or crashed mid-render. Retryable by the
    /// caller; never retried here.
    #[error("render engine failure: {0}")]
    RenderEngine(anyhow::Error),

    /// Structured-data-to-document transform failed. Should not happen while
    /// the data model keeps every field optional.
    #[error("document serialization failure: {0}")]
    Serialization(String),

    /// Compression stream failure while assembling the bundle.
    #[error("archive failure: {0}")]
    Archive(#[from] zip::result::ZipError),
}

impl ExportError {
    /// Stable category code returned to callers in the error body.
    pub fn code(&self) -> &'static str {
        match self {
            ExportError::Validation(_) => "VALIDATION_ERROR",
            ExportError::RenderEngine(_) => "RENDER_ENGINE_ERROR",
            ExportError::Serialization(_) => "SERIALIZATION_ERROR",
            ExportError::Archive(_) => "ARCHIVE_ERROR",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Format and payload
// ────────────────────────────────────────────────────────────────────────────

/// The four supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Pdf,
    Image,
    Docx,
    Zip,
}

impl ExportFormat {
    pub fn mime(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Image => "image/png",
            ExportFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            ExportFormat::Zip => "application/zip",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Image => "png",
            ExportFormat::Docx => "docx",
            ExportFormat::Zip => "zip",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Image => "image",
            ExportFormat::Docx => "docx",
            ExportFormat::Zip => "zip",
        };
        f.write_str(name)
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pdf" => Ok(ExportFormat::Pdf),
            "image" => Ok(ExportFormat::Image),
            "docx" => Ok(ExportFormat::Docx),
            "zip" => Ok(ExportFormat::Zip),
            other => Err(format!("Unsupported export format: {other}")),
        }
    }
}

/// The input driving a single export, tagged by what the caller supplied.
#[derive(Debug)]
pub enum ExportPayload {
    /// Pre-rendered markup for browser capture (PDF/image).
    Markup { html: String },
    /// Structured record for document generation (DOCX).
    Resume(ResumeData),
    /// Text assets for archive packaging (ZIP). Missing assets get
    /// placeholders so the archive is always structurally complete.
    Bundle {
        html: Option<String>,
        css: Option<String>,
        js: Option<String>,
    },
}

impl ExportPayload {
    /// Filename prefix: resumes render from markup or structured data,
    /// portfolios ship as bundles.
    fn artifact_kind(&self) -> &'static str {
        match self {
            ExportPayload::Markup { .. } | ExportPayload::Resume(_) => "resume",
            ExportPayload::Bundle { .. } => "portfolio",
        }
    }

    fn describe(&self) -> &'static str {
        match self {
            ExportPayload::Markup { .. } => "markup",
            ExportPayload::Resume(_) => "structured resume",
            ExportPayload::Bundle { .. } => "asset bundle",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Artifact
// ────────────────────────────────────────────────────────────────────────────

/// A finished export: binary blob plus download metadata. Ownership moves to
/// the HTTP layer, which streams it and discards it.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub bytes: Bytes,
    pub filename: String,
    pub mime: &'static str,
}

impl IntoResponse for Artifact {
    fn into_response(self) -> Response {
        (
            [
                (header::CONTENT_TYPE, self.mime.to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename={}", self.filename),
                ),
            ],
            self.bytes,
        )
            .into_response()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Dispatch
// ────────────────────────────────────────────────────────────────────────────

/// Runs one export: dispatches on (format, payload), names the artifact
/// `<kind>-<unix-ms>.<ext>`. A format/payload mismatch is a validation error,
/// not a crash.
pub async fn run_export(
    engine: &dyn RenderEngine,
    format: ExportFormat,
    payload: ExportPayload,
) -> Result<Artifact, ExportError> {
    let kind = payload.artifact_kind();

    let bytes = match (format, payload) {
        (ExportFormat::Pdf, ExportPayload::Markup { html }) => engine.render_pdf(&html).await?,
        (ExportFormat::Image, ExportPayload::Markup { html }) => engine.render_image(&html).await?,
        (ExportFormat::Docx, ExportPayload::Resume(data)) => docx::build_resume_docx(&data)?,
        (ExportFormat::Zip, ExportPayload::Bundle { html, css, js }) => {
            archive::build_bundle_zip(html.as_deref(), css.as_deref(), js.as_deref())?
        }
        (format, payload) => {
            return Err(ExportError::Validation(format!(
                "{format} export does not accept a {} payload",
                payload.describe()
            )))
        }
    };

    let filename = format!(
        "{kind}-{}.{}",
        Utc::now().timestamp_millis(),
        format.extension()
    );
    info!("Export complete: {} ({} bytes)", filename, bytes.len());

    Ok(Artifact {
        bytes: Bytes::from(bytes),
        filename,
        mime: format.mime(),
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Test doubles
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use anyhow::anyhow;
    use async_trait::async_trait;

    use super::ExportError;
    use crate::render::RenderEngine;

    /// In-memory engine that mirrors the acquire/use/release scoping of the
    /// real one. Markup containing "boom" fails after acquisition, modelling
    /// a mid-render crash.
    #[derive(Default)]
    pub struct FakeEngine {
        pub acquired: AtomicUsize,
        pub released: AtomicUsize,
    }

    impl FakeEngine {
        fn capture(&self, html: &str, bytes: &[u8]) -> Result<Vec<u8>, ExportError> {
            self.acquired.fetch_add(1, Ordering::SeqCst);
            let result = if html.contains("boom") {
                Err(ExportError::RenderEngine(anyhow!("forced render failure")))
            } else {
                Ok(bytes.to_vec())
            };
            self.released.fetch_add(1, Ordering::SeqCst);
            result
        }
    }

    #[async_trait]
    impl RenderEngine for FakeEngine {
        async fn render_pdf(&self, html: &str) -> Result<Vec<u8>, ExportError> {
            self.capture(html, b"%PDF-1.4 fake")
        }

        async fn render_image(&self, html: &str) -> Result<Vec<u8>, ExportError> {
            self.capture(html, b"\x89PNG fake")
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
