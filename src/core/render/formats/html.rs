//! HTML renderer
//!
//! Generates a single self-contained page that draws the graph with
//! vis-network. Node and edge data are embedded as JSON. The library itself
//! is loaded from a CDN when the page opens, unless a local copy is
//! configured, in which case it is inlined and the page works offline.

use crate::core::models::{CertificationGraph, NodeKind};
use crate::core::render::formats::json::{vis_edges, vis_nodes};
use crate::core::render::{GraphRenderer, RenderError, RenderOptions};
use askama::Template;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// One row of the legend
struct LegendEntry {
    name: &'static str,
    shape: &'static str,
    color: &'static str,
    count: usize,
}

/// Embedded HTML page template
#[derive(Template)]
#[template(path = "graph.html")]
struct GraphPage<'a> {
    title: &'a str,
    physics: bool,
    node_count: usize,
    edge_count: usize,
    legend: Vec<LegendEntry>,
    nodes_json: String,
    edges_json: String,
    library: Option<String>,
}

/// HTML renderer with an interactive, physics-based layout
#[derive(Debug, Clone, Default)]
pub struct HtmlRenderer {
    options: RenderOptions,
}

impl HtmlRenderer {
    /// Create a new HTML renderer
    #[must_use]
    pub const fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Serialize data for a `<script>` block
    ///
    /// Every `<` becomes `\u003c`, so tooltip text can neither close the
    /// script element nor open an HTML comment inside it. `<` only occurs
    /// inside JSON strings, where the escape decodes to the same text.
    fn script_json<T: Serialize>(value: &T) -> Result<String, RenderError> {
        Ok(serde_json::to_string(value)?.replace('<', "\\u003c"))
    }

    /// Read a local vis-network build for inlining
    fn inline_library(path: &Path) -> Result<String, RenderError> {
        let script = fs::read_to_string(path).map_err(|source| RenderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(script.replace("</script", "<\\/script"))
    }

    fn legend(graph: &CertificationGraph) -> Vec<LegendEntry> {
        NodeKind::ALL
            .iter()
            .map(|&kind| LegendEntry {
                name: kind.display_name(),
                shape: kind.shape(),
                color: kind.color(),
                count: graph.count_kind(kind),
            })
            .collect()
    }
}

impl GraphRenderer for HtmlRenderer {
    fn render(&self, graph: &CertificationGraph) -> Result<String, RenderError> {
        let page = GraphPage {
            title: &self.options.title,
            physics: self.options.physics,
            node_count: graph.node_count(),
            edge_count: graph.edge_count(),
            legend: Self::legend(graph),
            nodes_json: Self::script_json(&vis_nodes(graph))?,
            edges_json: Self::script_json(&vis_edges(graph))?,
            library: self
                .options
                .library
                .as_deref()
                .map(Self::inline_library)
                .transpose()?,
        };
        Ok(page.render()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::GraphNode;

    fn graph_with_tooltip(tooltip: &str) -> CertificationGraph {
        let mut graph = CertificationGraph::new();
        let a = graph
            .upsert_node(GraphNode::new("Subpart B", "Subpart B", "Subpart B", NodeKind::Subpart))
            .index();
        let cs = graph
            .upsert_node(GraphNode::new("CS-23.2005", "23.2005", tooltip, NodeKind::Section))
            .index();
        graph.add_edge(a, cs);
        graph
    }

    #[test]
    fn test_html_contains_graph_data() {
        let html = HtmlRenderer::default()
            .render(&graph_with_tooltip("Certification of normal category aeroplanes"))
            .unwrap();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("vis-network"));
        assert!(html.contains(r#""id":"CS-23.2005""#));
        assert!(html.contains(r#""from":"Subpart B","to":"CS-23.2005""#));
        assert!(html.contains(r#""shape":"ellipse""#));
        assert!(html.contains("2 nodes, 1 edges"));
    }

    #[test]
    fn test_html_escapes_script_terminator() {
        let html = HtmlRenderer::default()
            .render(&graph_with_tooltip("bad </script><b>x</b>"))
            .unwrap();
        assert!(!html.contains("bad </script>"));
        assert!(html.contains(r"bad \u003c/script>\u003cb>x\u003c/b>"));
    }

    #[test]
    fn test_html_escapes_comment_opener() {
        let html = HtmlRenderer::default()
            .render(&graph_with_tooltip("<!--<script>"))
            .unwrap();
        assert!(!html.contains("<!--<script>"));
        assert!(html.contains(r#""title":"\u003c!--\u003cscript>""#));
    }

    #[test]
    fn test_html_physics_toggle() {
        let options = RenderOptions {
            title: "Amd 6 <draft>".to_string(),
            physics: false,
            library: None,
        };
        let html = HtmlRenderer::new(options)
            .render(&graph_with_tooltip("t"))
            .unwrap();
        assert!(html.contains("const physicsEnabled = false;"));
        // the title is HTML-escaped
        assert!(html.contains("Amd 6 &lt;draft&gt;"));
    }

    #[test]
    fn test_html_inlines_local_library() {
        let dir = tempfile::TempDir::new().unwrap();
        let library = dir.path().join("vis-network.min.js");
        fs::write(&library, "var vis = { marker: \"</script>\" };").unwrap();

        let options = RenderOptions {
            library: Some(library),
            ..RenderOptions::default()
        };
        let html = HtmlRenderer::new(options)
            .render(&graph_with_tooltip("t"))
            .unwrap();

        assert!(!html.contains("unpkg.com"));
        assert!(html.contains(r#"var vis = { marker: "<\/script>" };"#));
    }

    #[test]
    fn test_html_missing_library_is_io_error() {
        let options = RenderOptions {
            library: Some("does/not/exist.js".into()),
            ..RenderOptions::default()
        };
        let err = HtmlRenderer::new(options)
            .render(&graph_with_tooltip("t"))
            .unwrap_err();
        assert!(matches!(err, RenderError::Io { .. }));
    }

    #[test]
    fn test_html_uses_cdn_by_default() {
        let html = HtmlRenderer::default()
            .render(&graph_with_tooltip("t"))
            .unwrap();
        assert!(html.contains("https://unpkg.com/vis-network@9.1.9"));
    }
}
