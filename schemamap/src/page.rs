//! Page writer: embeds the rendered fragment into the HTML template.
//!
//! The template is compiled into the binary, so the executable needs no
//! files at runtime.

use askama::Template;
use schemamap_core::{Result, SchemaMapError};
use std::path::{Path, PathBuf};

/// Full HTML page around the entity blocks
#[derive(Template)]
#[template(path = "page.html")]
struct SchemaPage<'a> {
    /// Database name, escaped by the template
    title: &'a str,
    /// Pre-escaped markup from the renderer, inserted verbatim
    content: &'a str,
}

/// Default output location: `<database>.html` in the working directory
pub fn default_output_path(database: &str) -> PathBuf {
    PathBuf::from(format!("{}.html", database))
}

/// Renders the page for `title` and `content`
pub fn render_page(title: &str, content: &str) -> Result<String> {
    SchemaPage { title, content }
        .render()
        .map_err(|e| SchemaMapError::template_failed("Failed to render page template", e))
}

/// Renders the page and writes it to `path`.
///
/// An existing file is truncated and replaced, so re-running against the
/// same database always leaves one well-formed page.
pub async fn write_page(path: &Path, title: &str, content: &str) -> Result<()> {
    let html = render_page(title, content)?;

    tokio::fs::write(path, html)
        .await
        .map_err(|e| SchemaMapError::io(path, e))?;

    tracing::debug!("Wrote {}", path.display());
    Ok(())
}
