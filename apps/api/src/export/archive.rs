//! Bundle → ZIP strategy.
//!
//! Packages the three portfolio assets at maximum compression. A missing or
//! blank asset is replaced by a placeholder so the archive always contains
//! exactly `index.html`, `styles.css`, and `script.js`, each non-empty.

use std::io::{Cursor, Write};

use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::export::ExportError;

pub const DEFAULT_HTML: &str = "<html><body><h1>My Portfolio</h1></body></html>";
pub const DEFAULT_CSS: &str = "body { font-family: Arial, sans-serif; }";
pub const DEFAULT_JS: &str = "// Portfolio JavaScript";

pub fn build_bundle_zip(
    html: Option<&str>,
    css: Option<&str>,
    js: Option<&str>,
) -> Result<Vec<u8>, ExportError> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(9));

    for (name, contents) in [
        ("index.html", supplied_or(html, DEFAULT_HTML)),
        ("styles.css", supplied_or(css, DEFAULT_CSS)),
        ("script.js", supplied_or(js, DEFAULT_JS)),
    ] {
        writer.start_file(name, options)?;
        writer
            .write_all(contents.as_bytes())
            .map_err(|e| ExportError::Archive(zip::result::ZipError::Io(e)))?;
    }

    let cursor = writer.finish()?;
    Ok(cursor.into_inner())
}

/// Blank assets count as missing, matching what the editor sends when a pane
/// was never touched.
fn supplied_or<'a>(asset: Option<&'a str>, default: &'a str) -> &'a str {
    match asset {
        Some(text) if !text.trim().is_empty() => text,
        _ => default,
    }
}
