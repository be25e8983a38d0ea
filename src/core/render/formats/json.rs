//! JSON node-link renderer
//!
//! The same node and edge records are embedded in the HTML page, so this
//! module also owns their shape.

use crate::core::models::{CertificationGraph, NodeKind};
use crate::core::render::{GraphRenderer, RenderError};
use serde::Serialize;

/// A node as consumed by vis-network
#[derive(Debug, Serialize)]
pub struct VisNode<'a> {
    /// Node id
    pub id: &'a str,
    /// Visible label
    pub label: &'a str,
    /// Tooltip
    pub title: &'a str,
    /// Entity kind
    pub kind: NodeKind,
    /// vis-network shape
    pub shape: &'static str,
    /// Node color
    pub color: &'static str,
}

/// A directed edge as consumed by vis-network
#[derive(Debug, Serialize)]
pub struct VisEdge<'a> {
    /// Parent id
    pub from: &'a str,
    /// Child id
    pub to: &'a str,
    /// Arrow placement
    pub arrows: &'static str,
}

/// Node records in insertion order
#[must_use]
pub fn vis_nodes(graph: &CertificationGraph) -> Vec<VisNode<'_>> {
    graph
        .nodes()
        .map(|n| VisNode {
            id: &n.id,
            label: &n.label,
            title: &n.title,
            kind: n.kind,
            shape: n.kind.shape(),
            color: n.kind.color(),
        })
        .collect()
}

/// Edge records in insertion order
#[must_use]
pub fn vis_edges(graph: &CertificationGraph) -> Vec<VisEdge<'_>> {
    graph
        .edges()
        .map(|(from, to)| VisEdge {
            from,
            to,
            arrows: "to",
        })
        .collect()
}

#[derive(Serialize)]
struct NodeLink<'a> {
    directed: bool,
    nodes: Vec<VisNode<'a>>,
    edges: Vec<VisEdge<'a>>,
}

/// Renders `{ "directed": true, "nodes": [...], "edges": [...] }`
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl JsonRenderer {
    /// Create a new JSON renderer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl GraphRenderer for JsonRenderer {
    fn render(&self, graph: &CertificationGraph) -> Result<String, RenderError> {
        let doc = NodeLink {
            directed: true,
            nodes: vis_nodes(graph),
            edges: vis_edges(graph),
        };
        Ok(serde_json::to_string_pretty(&doc)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::GraphNode;
    use serde_json::Value;

    #[test]
    fn test_json_node_link() {
        let mut graph = CertificationGraph::new();
        let cs = graph
            .upsert_node(GraphNode::new("CS-1", "1", "Scope", NodeKind::Section))
            .index();
        let amc = graph
            .upsert_node(GraphNode::new("AMC-1", "1", "Means", NodeKind::Amc))
            .index();
        graph.add_edge(cs, amc);

        let rendered = JsonRenderer::new().render(&graph).unwrap();
        let value: Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(value["directed"], true);
        assert_eq!(value["nodes"][0]["id"], "CS-1");
        assert_eq!(value["nodes"][0]["shape"], "ellipse");
        assert_eq!(value["nodes"][1]["kind"], "amc");
        assert_eq!(value["nodes"][1]["color"], "red");
        assert_eq!(value["edges"][0]["from"], "CS-1");
        assert_eq!(value["edges"][0]["to"], "AMC-1");
    }
}
