//! Rendering of certification graphs
//!
//! A renderer turns a [`CertificationGraph`] into the text of one output
//! file. HTML (interactive vis-network page) is the default; DOT and JSON
//! node-link dumps are available for other tooling.

pub mod formats;

use crate::core::models::CertificationGraph;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

pub use formats::{DotRenderer, HtmlRenderer, JsonRenderer, OutputFormat};

/// Default page title for HTML output
pub const DEFAULT_TITLE: &str = "CS / AMC tree";

/// Errors raised while rendering or writing output
#[derive(Debug, Error)]
pub enum RenderError {
    /// The HTML template failed to render
    #[error("failed to render template: {0}")]
    Template(#[from] askama::Error),
    /// Node or edge data could not be serialized
    #[error("failed to serialize graph data: {0}")]
    Json(#[from] serde_json::Error),
    /// The output file could not be written
    #[error("failed to write {}: {source}", path.display())]
    Io {
        /// Output path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

/// Options shared by all renderers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Page or graph title
    pub title: String,
    /// Enable the physics-based layout (HTML only)
    pub physics: bool,
    /// Local vis-network script inlined into the page instead of the CDN
    /// link (HTML only)
    pub library: Option<PathBuf>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            physics: true,
            library: None,
        }
    }
}

/// Trait for graph renderers
pub trait GraphRenderer {
    /// Render the graph to a string
    ///
    /// # Errors
    /// Returns an error if serialization or templating fails
    fn render(&self, graph: &CertificationGraph) -> Result<String, RenderError>;

    /// Render the graph and write it to `output_path`
    ///
    /// Missing parent directories are created.
    ///
    /// # Errors
    /// Returns an error if rendering fails or the file cannot be written
    fn write(&self, graph: &CertificationGraph, output_path: &Path) -> Result<(), RenderError> {
        let content = self.render(graph)?;
        let io_err = |source| RenderError::Io {
            path: output_path.to_path_buf(),
            source,
        };

        if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(output_path, content).map_err(io_err)?;

        info!(
            path = %output_path.display(),
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "graph written"
        );
        Ok(())
    }
}

/// Create the renderer for an output format
#[must_use]
pub fn renderer_for(format: OutputFormat, options: RenderOptions) -> Box<dyn GraphRenderer> {
    match format {
        OutputFormat::Html => Box::new(HtmlRenderer::new(options)),
        OutputFormat::Dot => Box::new(DotRenderer::new(options)),
        OutputFormat::Json => Box::new(JsonRenderer::new()),
    }
}
