//! Directed graph of certification entities
//!
//! Nodes are keyed by a string id. Edges point from a parent entity to an
//! entity it directly contains, so a well-formed document yields a forest of
//! out-trees rooted at subparts.

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Kind of entity a node stands for
///
/// Each kind has fixed visual attributes used by every renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeKind {
    /// Top-level subpart
    Subpart,
    /// Certification section (CS)
    Section,
    /// Requirement stated by a CS
    Requirement,
    /// Acceptable Means of Compliance
    Amc,
    /// Requirement stated by an AMC
    AmcRequirement,
}

impl NodeKind {
    /// All kinds, in hierarchy order
    pub const ALL: [Self; 5] = [
        Self::Subpart,
        Self::Section,
        Self::Requirement,
        Self::Amc,
        Self::AmcRequirement,
    ];

    /// vis-network shape for this kind
    #[must_use]
    pub const fn shape(self) -> &'static str {
        match self {
            Self::Subpart => "box",
            Self::Section => "ellipse",
            Self::Requirement => "dot",
            Self::Amc => "diamond",
            Self::AmcRequirement => "triangle",
        }
    }

    /// Node color for this kind
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Subpart => "blue",
            Self::Section => "green",
            Self::Requirement => "purple",
            Self::Amc => "red",
            Self::AmcRequirement => "orange",
        }
    }

    /// Human-readable name used in summaries and error messages
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Subpart => "subpart",
            Self::Section => "CS",
            Self::Requirement => "CS requirement",
            Self::Amc => "AMC",
            Self::AmcRequirement => "AMC requirement",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A graph node with its visual attributes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphNode {
    /// Unique node id
    pub id: String,
    /// Text drawn on the node
    pub label: String,
    /// Tooltip text
    pub title: String,
    /// Entity kind
    pub kind: NodeKind,
}

impl GraphNode {
    /// Create a node
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        title: impl Into<String>,
        kind: NodeKind,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            title: title.into(),
            kind,
        }
    }
}

/// A node id that was produced by more than one document entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collision {
    /// The shared id
    pub id: String,
    /// Kind of the node before the collision
    pub previous: NodeKind,
    /// Kind of the entry that collided
    pub incoming: NodeKind,
}

/// Outcome of [`CertificationGraph::upsert_node`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    /// A new node was created
    Inserted(NodeIndex),
    /// An existing node had its attributes overwritten
    Replaced {
        /// Index of the existing node
        index: NodeIndex,
        /// Kind the node had before
        previous: NodeKind,
    },
}

impl Upsert {
    /// Index of the affected node
    #[must_use]
    pub const fn index(self) -> NodeIndex {
        match self {
            Self::Inserted(index) | Self::Replaced { index, .. } => index,
        }
    }
}

/// Per-kind counts for a built graph
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphSummary {
    /// Number of subpart nodes
    pub subparts: usize,
    /// Number of CS nodes
    pub sections: usize,
    /// Number of CS requirement nodes
    pub requirements: usize,
    /// Number of AMC nodes
    pub amcs: usize,
    /// Number of AMC requirement nodes
    pub amc_requirements: usize,
    /// Total edges
    pub edges: usize,
    /// Number of recorded id collisions
    pub collisions: usize,
}

impl GraphSummary {
    /// Total node count
    #[must_use]
    pub const fn nodes(&self) -> usize {
        self.subparts + self.sections + self.requirements + self.amcs + self.amc_requirements
    }
}

/// The directed graph built from a document
///
/// Backed by a `petgraph` [`DiGraph`] plus an id index. Node and edge
/// iteration follow insertion order.
#[derive(Debug, Clone, Default)]
pub struct CertificationGraph {
    graph: DiGraph<GraphNode, ()>,
    index: HashMap<String, NodeIndex>,
    collisions: Vec<Collision>,
}

impl CertificationGraph {
    /// Create an empty graph
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node, or overwrite the attributes of the node with the same id
    pub fn upsert_node(&mut self, node: GraphNode) -> Upsert {
        if let Some(&index) = self.index.get(&node.id) {
            let previous = self.graph[index].kind;
            self.graph[index] = node;
            Upsert::Replaced { index, previous }
        } else {
            let id = node.id.clone();
            let index = self.graph.add_node(node);
            self.index.insert(id, index);
            Upsert::Inserted(index)
        }
    }

    /// Add a parent→child edge; adding an existing edge is a no-op
    pub fn add_edge(&mut self, parent: NodeIndex, child: NodeIndex) {
        if self.graph.find_edge(parent, child).is_none() {
            self.graph.add_edge(parent, child, ());
        }
    }

    /// Record that an id was produced twice
    pub(crate) fn record_collision(&mut self, collision: Collision) {
        self.collisions.push(collision);
    }

    /// Look up a node by id
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.index.get(id).map(|&idx| &self.graph[idx])
    }

    /// Check if a node exists
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Check if an edge `from → to` exists
    #[must_use]
    pub fn has_edge(&self, from: &str, to: &str) -> bool {
        match (self.index.get(from), self.index.get(to)) {
            (Some(&a), Some(&b)) => self.graph.contains_edge(a, b),
            _ => false,
        }
    }

    /// Ids of the direct children of a node, in insertion order
    #[must_use]
    pub fn children(&self, id: &str) -> Vec<&str> {
        self.neighbors(id, Direction::Outgoing)
    }

    /// Ids of the direct parents of a node, in insertion order
    #[must_use]
    pub fn parents(&self, id: &str) -> Vec<&str> {
        self.neighbors(id, Direction::Incoming)
    }

    fn neighbors(&self, id: &str, direction: Direction) -> Vec<&str> {
        let Some(&idx) = self.index.get(id) else {
            return Vec::new();
        };
        // petgraph yields the most recently added edge first
        let mut ids: Vec<&str> = self
            .graph
            .neighbors_directed(idx, direction)
            .map(|n| self.graph[n].id.as_str())
            .collect();
        ids.reverse();
        ids
    }

    /// All nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.graph.node_weights()
    }

    /// All edges as `(parent_id, child_id)` in insertion order
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.graph.raw_edges().iter().map(|edge| {
            (
                self.graph[edge.source()].id.as_str(),
                self.graph[edge.target()].id.as_str(),
            )
        })
    }

    /// Nodes without incoming edges
    #[must_use]
    pub fn roots(&self) -> Vec<&GraphNode> {
        self.graph
            .node_indices()
            .filter(|&idx| {
                self.graph
                    .neighbors_directed(idx, Direction::Incoming)
                    .next()
                    .is_none()
            })
            .map(|idx| &self.graph[idx])
            .collect()
    }

    /// Number of nodes
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Number of nodes of one kind
    #[must_use]
    pub fn count_kind(&self, kind: NodeKind) -> usize {
        self.nodes().filter(|n| n.kind == kind).count()
    }

    /// Id collisions recorded while building
    #[must_use]
    pub fn collisions(&self) -> &[Collision] {
        &self.collisions
    }

    /// Per-kind counts
    #[must_use]
    pub fn summary(&self) -> GraphSummary {
        let mut summary = GraphSummary {
            edges: self.edge_count(),
            collisions: self.collisions.len(),
            ..GraphSummary::default()
        };
        for node in self.nodes() {
            let slot = match node.kind {
                NodeKind::Subpart => &mut summary.subparts,
                NodeKind::Section => &mut summary.sections,
                NodeKind::Requirement => &mut summary.requirements,
                NodeKind::Amc => &mut summary.amcs,
                NodeKind::AmcRequirement => &mut summary.amc_requirements,
            };
            *slot += 1;
        }
        summary
    }

    fn fmt_subtree(
        &self,
        f: &mut fmt::Formatter<'_>,
        id: &str,
        depth: usize,
        seen: &mut HashSet<String>,
    ) -> fmt::Result {
        let Some(node) = self.node(id) else {
            return Ok(());
        };
        let indent = "  ".repeat(depth + 1);
        if !seen.insert(id.to_string()) {
            return writeln!(f, "{indent}{} (see above)", node.id);
        }
        writeln!(f, "{indent}{} [{}]", node.id, node.kind)?;
        for child in self.children(id) {
            self.fmt_subtree(f, child, depth + 1, seen)?;
        }
        Ok(())
    }
}

impl fmt::Display for CertificationGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Certification graph ({} nodes, {} edges):",
            self.node_count(),
            self.edge_count()
        )?;
        let mut seen = HashSet::new();
        for root in self.roots() {
            self.fmt_subtree(f, &root.id, 0, &mut seen)?;
        }
        // nodes only reachable through a cycle have no root above them
        for node in self.nodes() {
            if !seen.contains(&node.id) {
                self.fmt_subtree(f, &node.id, 0, &mut seen)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CertificationGraph {
        let mut graph = CertificationGraph::new();
        let a = graph
            .upsert_node(GraphNode::new("A", "A", "A", NodeKind::Subpart))
            .index();
        let cs = graph
            .upsert_node(GraphNode::new("CS-1", "1", "Scope", NodeKind::Section))
            .index();
        let r1 = graph
            .upsert_node(GraphNode::new("R1", "R1", "text", NodeKind::Requirement))
            .index();
        let r2 = graph
            .upsert_node(GraphNode::new("R2", "R2", "text", NodeKind::Requirement))
            .index();
        graph.add_edge(a, cs);
        graph.add_edge(cs, r1);
        graph.add_edge(cs, r2);
        graph
    }

    #[test]
    fn test_graph_creation() {
        let graph = CertificationGraph::new();
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.roots().is_empty());
    }

    #[test]
    fn test_lookup_and_edges() {
        let graph = sample();
        assert!(graph.contains("CS-1"));
        assert_eq!(graph.node("CS-1").unwrap().title, "Scope");
        assert!(graph.has_edge("A", "CS-1"));
        assert!(!graph.has_edge("CS-1", "A"));
        assert!(!graph.has_edge("A", "missing"));
        assert_eq!(graph.children("CS-1"), vec!["R1", "R2"]);
        assert_eq!(graph.parents("R1"), vec!["CS-1"]);
        assert!(graph.children("missing").is_empty());
    }

    #[test]
    fn test_duplicate_edge_kept_once() {
        let mut graph = sample();
        let a = graph.index["A"];
        let cs = graph.index["CS-1"];
        graph.add_edge(a, cs);
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn test_upsert_overwrites_attributes() {
        let mut graph = sample();
        let outcome = graph.upsert_node(GraphNode::new("R1", "R1", "new text", NodeKind::Requirement));
        assert!(matches!(
            outcome,
            Upsert::Replaced {
                previous: NodeKind::Requirement,
                ..
            }
        ));
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.node("R1").unwrap().title, "new text");
        // edges survive attribute replacement
        assert!(graph.has_edge("CS-1", "R1"));
    }

    #[test]
    fn test_insertion_order() {
        let graph = sample();
        let ids: Vec<_> = graph.nodes().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "CS-1", "R1", "R2"]);
        let edges: Vec<_> = graph.edges().collect();
        assert_eq!(edges, vec![("A", "CS-1"), ("CS-1", "R1"), ("CS-1", "R2")]);
    }

    #[test]
    fn test_summary() {
        let graph = sample();
        let summary = graph.summary();
        assert_eq!(summary.subparts, 1);
        assert_eq!(summary.sections, 1);
        assert_eq!(summary.requirements, 2);
        assert_eq!(summary.nodes(), 4);
        assert_eq!(summary.edges, 3);
        assert_eq!(graph.count_kind(NodeKind::Amc), 0);
    }

    #[test]
    fn test_kind_attributes() {
        assert_eq!(NodeKind::Subpart.shape(), "box");
        assert_eq!(NodeKind::Section.color(), "green");
        assert_eq!(NodeKind::Requirement.shape(), "dot");
        assert_eq!(NodeKind::Amc.shape(), "diamond");
        assert_eq!(NodeKind::AmcRequirement.color(), "orange");
    }

    #[test]
    fn test_graph_display() {
        let display = format!("{}", sample());
        assert!(display.contains("4 nodes, 3 edges"));
        assert!(display.contains("  A [subpart]"));
        assert!(display.contains("    CS-1 [CS]"));
        assert!(display.contains("      R2 [CS requirement]"));
    }

    #[test]
    fn test_graph_display_includes_cycles() {
        let mut graph = CertificationGraph::new();
        let x = graph
            .upsert_node(GraphNode::new("X", "X", "X", NodeKind::Section))
            .index();
        let y = graph
            .upsert_node(GraphNode::new("Y", "Y", "Y", NodeKind::Amc))
            .index();
        graph.add_edge(x, y);
        graph.add_edge(y, x);
        assert!(graph.roots().is_empty());

        let display = format!("{graph}");
        assert!(display.contains("  X [CS]"));
        assert!(display.contains("    Y [AMC]"));
        assert!(display.contains("      X (see above)"));
    }
}
