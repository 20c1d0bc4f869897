//! Rendering engine adapter — turns markup into pixels or paginated output.
//!
//! Each render acquires a dedicated headless Chrome process for the duration
//! of one capture and releases it on every exit path: the `Browser` handle
//! owns the child process and kills it on drop, so cleanup is structural
//! rather than dependent on call sites remembering to close.
//!
//! The trait seam exists so the export service can be tested with a fake
//! engine — no real browser, no network.

use std::io::Write;
use std::sync::Arc;

use anyhow::anyhow;
use async_trait::async_trait;
use headless_chrome::protocol::cdp::Page;
use headless_chrome::types::PrintToPdfOptions;
use headless_chrome::{Browser, LaunchOptions, Tab};
use tempfile::NamedTempFile;
use tokio::sync::Semaphore;
use tracing::debug;

use crate::export::ExportError;

/// A4 paper, inches. Chrome's printToPdf takes paper size in inches.
const A4_WIDTH_IN: f64 = 8.27;
const A4_HEIGHT_IN: f64 = 11.69;
/// ~20px at 96dpi.
const PAGE_MARGIN_IN: f64 = 0.21;
/// Fixed viewport for image capture.
const IMAGE_VIEWPORT: (u32, u32) = (1200, 1600);

/// The rendering engine seam. Carried in `AppState` as `Arc<dyn RenderEngine>`.
#[async_trait]
pub trait RenderEngine: Send + Sync {
    /// Renders markup to a paginated A4 PDF with backgrounds enabled.
    async fn render_pdf(&self, html: &str) -> Result<Vec<u8>, ExportError>;

    /// Renders markup to a full-page lossless PNG at a 1200x1600 viewport.
    async fn render_image(&self, html: &str) -> Result<Vec<u8>, ExportError>;
}

/// Production engine: one sandboxed Chrome process per capture, bounded by a
/// semaphore so concurrent exports cannot exhaust memory with unbounded
/// browser instances.
pub struct ChromeEngine {
    permits: Arc<Semaphore>,
}

impl ChromeEngine {
    pub fn new(max_concurrent: usize) -> Self {
        Self {
            permits: Arc::new(Semaphore::new(max_concurrent)),
        }
    }

    /// Stages the markup, launches a browser, runs `capture` against a fresh
    /// tab, and tears the browser down. CDP calls are blocking, so the whole
    /// capture runs on the blocking pool while an owned semaphore permit is
    /// held for its duration.
    async fn render<F>(
        &self,
        html: &str,
        window_size: Option<(u32, u32)>,
        capture: F,
    ) -> Result<Vec<u8>, ExportError>
    where
        F: FnOnce(&Tab) -> anyhow::Result<Vec<u8>> + Send + 'static,
    {
        let permit = self
            .permits
            .clone()
            .acquire_owned()
            .await
            .map_err(|e| ExportError::RenderEngine(anyhow!("render semaphore closed: {e}")))?;

        let html = html.to_owned();
        tokio::task::spawn_blocking(move || {
            let _permit = permit;
            capture_page(&html, window_size, capture)
        })
        .await
        .map_err(|e| ExportError::RenderEngine(anyhow!("render task join error: {e}")))?
    }
}

#[async_trait]
impl RenderEngine for ChromeEngine {
    async fn render_pdf(&self, html: &str) -> Result<Vec<u8>, ExportError> {
        self.render(html, None, |tab| {
            let options = PrintToPdfOptions {
                print_background: Some(true),
                paper_width: Some(A4_WIDTH_IN),
                paper_height: Some(A4_HEIGHT_IN),
                margin_top: Some(PAGE_MARGIN_IN),
                margin_bottom: Some(PAGE_MARGIN_IN),
                margin_left: Some(PAGE_MARGIN_IN),
                margin_right: Some(PAGE_MARGIN_IN),
                ..Default::default()
            };
            tab.print_to_pdf(Some(options))
        })
        .await
    }

    async fn render_image(&self, html: &str) -> Result<Vec<u8>, ExportError> {
        self.render(html, Some(IMAGE_VIEWPORT), |tab| {
            // Clip to the body box model so the raster covers the full page,
            // not just the initial viewport.
            let body = tab.wait_for_element("body")?;
            let clip = body.get_box_model()?.margin_viewport();
            tab.capture_screenshot(
                Page::CaptureScreenshotFormatOption::Png,
                None,
                Some(clip),
                true,
            )
        })
        .await
    }
}

/// One full browser lifecycle: launch sandboxed, load staged markup, wait for
/// the load to settle (fonts/images in), capture, tear down.
fn capture_page<F>(
    html: &str,
    window_size: Option<(u32, u32)>,
    capture: F,
) -> Result<Vec<u8>, ExportError>
where
    F: FnOnce(&Tab) -> anyhow::Result<Vec<u8>>,
{
    // Staged file must outlive the capture; it is deleted on drop.
    let staged = stage_markup(html)?;
    let url = format!("file://{}", staged.path().display());

    let options = LaunchOptions::default_builder()
        .headless(true)
        .sandbox(true)
        .window_size(window_size)
        .build()
        .map_err(|e| ExportError::RenderEngine(anyhow!("invalid launch options: {e}")))?;

    let browser = Browser::new(options).map_err(ExportError::RenderEngine)?;
    debug!("Browser launched for {url}");

    // Browser kills its Chrome process on drop — every path out of this
    // block, error paths included, releases the instance.
    let captured = (|| {
        let tab = browser.new_tab()?;
        tab.navigate_to(&url)?;
        tab.wait_until_navigated()?;
        capture(&tab)
    })();

    captured.map_err(ExportError::RenderEngine)
}

/// Writes markup to a temp .html file so the browser can load it over
/// file:// without a server in the middle.
fn stage_markup(html: &str) -> Result<NamedTempFile, ExportError> {
    let mut file = tempfile::Builder::new()
        .prefix("reslio-export-")
        .suffix(".html")
        .tempfile()
        .map_err(|e| ExportError::RenderEngine(anyhow!("failed to stage markup: {e}")))?;

    file.write_all(html.as_bytes())
        .and_then(|_| file.flush())
        .map_err(|e| ExportError::RenderEngine(anyhow!("failed to write staged markup: {e}")))?;

    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_markup_writes_html_file() {
        let staged = stage_markup("<html><body>hi</body></html>").unwrap();
        let path = staged.path().to_path_buf();
        assert!(path.exists());
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("html"));

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("hi"));
    }

    #[test]
    fn test_staged_markup_removed_on_drop() {
        let path = {
            let staged = stage_markup("<p>gone</p>").unwrap();
            staged.path().to_path_buf()
        };
        assert!(!path.exists());
    }
}
