//! Graphviz DOT renderer

use crate::core::models::{CertificationGraph, NodeKind};
use crate::core::render::{GraphRenderer, RenderError, RenderOptions};

/// Renders the graph as a Graphviz digraph
#[derive(Debug, Clone, Default)]
pub struct DotRenderer {
    options: RenderOptions,
}

impl DotRenderer {
    /// Create a new DOT renderer
    #[must_use]
    pub const fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Graphviz has no `dot` shape; use a small filled circle instead
    const fn graphviz_shape(kind: NodeKind) -> &'static str {
        match kind {
            NodeKind::Requirement => "circle",
            other => other.shape(),
        }
    }
}

fn quote(value: &str) -> String {
    let escaped = value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n");
    format!("\"{escaped}\"")
}

impl GraphRenderer for DotRenderer {
    fn render(&self, graph: &CertificationGraph) -> Result<String, RenderError> {
        let mut lines = Vec::new();
        lines.push("digraph certification {".to_string());
        lines.push(format!("    label={};", quote(&self.options.title)));
        lines.push("    rankdir=LR;".to_string());
        lines.push("    node [style=filled, fontcolor=white];".to_string());

        for node in graph.nodes() {
            lines.push(format!(
                "    {} [label={}, tooltip={}, shape={}, fillcolor={}];",
                quote(&node.id),
                quote(&node.label),
                quote(&node.title),
                Self::graphviz_shape(node.kind),
                node.kind.color()
            ));
        }

        for (from, to) in graph.edges() {
            lines.push(format!("    {} -> {};", quote(from), quote(to)));
        }

        lines.push("}".to_string());
        Ok(lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::GraphNode;

    #[test]
    fn test_dot_output() {
        let mut graph = CertificationGraph::new();
        let cs = graph
            .upsert_node(GraphNode::new("CS-1", "1", "Say \"hi\"", NodeKind::Section))
            .index();
        let req = graph
            .upsert_node(GraphNode::new("R1", "R1", "line\nbreak", NodeKind::Requirement))
            .index();
        graph.add_edge(cs, req);

        let dot = DotRenderer::default().render(&graph).unwrap();
        assert!(dot.starts_with("digraph certification {"));
        assert!(dot.contains(r#""CS-1" [label="1", tooltip="Say \"hi\"", shape=ellipse, fillcolor=green];"#));
        assert!(dot.contains(r#"tooltip="line\nbreak", shape=circle, fillcolor=purple"#));
        assert!(dot.contains(r#""CS-1" -> "R1";"#));
        assert!(dot.trim_end().ends_with('}'));
    }
}
