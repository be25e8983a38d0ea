//! Graph construction from a loaded document
//!
//! Walks subparts → sections → (requirements, AMCs → requirements) and emits
//! one node per entry with a parent→child edge for each containment.

use crate::core::models::{
    CertificationGraph, Collision, Document, GraphNode, NodeKind, Section, Upsert,
};
use petgraph::graph::NodeIndex;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, warn};

/// How entries that map to the same node id are resolved
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IdPolicy {
    /// Reuse the existing node, overwrite its attributes, keep all edges
    #[default]
    Merge,
    /// Fail the build on the first reused id
    Reject,
    /// Prefix every id below a subpart with its parent's id
    Qualify,
}

impl FromStr for IdPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "merge" => Ok(Self::Merge),
            "reject" => Ok(Self::Reject),
            "qualify" | "namespace" => Ok(Self::Qualify),
            _ => Err(format!(
                "Unknown id policy: '{s}'. Use: merge, reject, or qualify"
            )),
        }
    }
}

impl fmt::Display for IdPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Merge => write!(f, "merge"),
            Self::Reject => write!(f, "reject"),
            Self::Qualify => write!(f, "qualify"),
        }
    }
}

/// Errors raised while building a graph
#[derive(Debug, Error)]
pub enum GraphError {
    /// Two entries produced the same node id under [`IdPolicy::Reject`]
    #[error("duplicate node id '{id}': already used by a {existing}, reused by a {incoming}")]
    DuplicateId {
        /// The reused id
        id: String,
        /// Kind of the node that owns the id
        existing: NodeKind,
        /// Kind of the entry that tried to reuse it
        incoming: NodeKind,
    },
}

/// Builds a [`CertificationGraph`] from a [`Document`]
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    policy: IdPolicy,
    graph: CertificationGraph,
}

impl GraphBuilder {
    /// Create a builder using the given id policy
    #[must_use]
    pub fn new(policy: IdPolicy) -> Self {
        Self {
            policy,
            graph: CertificationGraph::new(),
        }
    }

    /// Id policy in effect
    #[must_use]
    pub const fn policy(&self) -> IdPolicy {
        self.policy
    }

    /// Build the graph
    ///
    /// # Errors
    /// Returns [`GraphError::DuplicateId`] when the policy is
    /// [`IdPolicy::Reject`] and two entries share a node id.
    pub fn build(mut self, document: &Document) -> Result<CertificationGraph, GraphError> {
        for subpart in &document.subparts {
            let subpart_id = self.subpart_id(&subpart.name);
            let subpart_idx = self.add_node(GraphNode::new(
                subpart_id.clone(),
                subpart.name.clone(),
                subpart.name.clone(),
                NodeKind::Subpart,
            ))?;
            debug!(
                subpart = %subpart.name,
                sections = subpart.sections.len(),
                "adding subpart"
            );

            for section in &subpart.sections {
                self.add_section(&subpart_id, subpart_idx, section)?;
            }
        }

        Ok(self.graph)
    }

    fn add_section(
        &mut self,
        subpart_id: &str,
        subpart_idx: NodeIndex,
        section: &Section,
    ) -> Result<(), GraphError> {
        let cs_id = self.qualify(subpart_id, &section.node_id());
        let cs_idx = self.add_node(GraphNode::new(
            cs_id.clone(),
            section.number.clone(),
            section.name.clone(),
            NodeKind::Section,
        ))?;
        self.graph.add_edge(subpart_idx, cs_idx);

        for req in &section.requirements {
            let req_id = self.qualify(&cs_id, &req.id);
            let req_idx = self.add_node(GraphNode::new(
                req_id,
                req.id.clone(),
                req.content.clone(),
                NodeKind::Requirement,
            ))?;
            self.graph.add_edge(cs_idx, req_idx);
        }

        for amc in &section.amcs {
            let amc_id = self.qualify(&cs_id, &amc.node_id());
            let amc_idx = self.add_node(GraphNode::new(
                amc_id.clone(),
                amc.number.clone(),
                amc.name.clone(),
                NodeKind::Amc,
            ))?;
            self.graph.add_edge(cs_idx, amc_idx);

            for req in &amc.requirements {
                let req_id = self.qualify(&amc_id, &req.id);
                let req_idx = self.add_node(GraphNode::new(
                    req_id,
                    req.id.clone(),
                    req.content.clone(),
                    NodeKind::AmcRequirement,
                ))?;
                self.graph.add_edge(amc_idx, req_idx);
            }
        }

        Ok(())
    }

    fn subpart_id(&self, name: &str) -> String {
        match self.policy {
            IdPolicy::Qualify => escape_segment(name),
            IdPolicy::Merge | IdPolicy::Reject => name.to_string(),
        }
    }

    /// `parent_id` is already qualified; only `id` is escaped
    fn qualify(&self, parent_id: &str, id: &str) -> String {
        match self.policy {
            IdPolicy::Qualify => format!("{parent_id}/{}", escape_segment(id)),
            IdPolicy::Merge | IdPolicy::Reject => id.to_string(),
        }
    }

    fn add_node(&mut self, node: GraphNode) -> Result<NodeIndex, GraphError> {
        if self.policy == IdPolicy::Reject {
            if let Some(existing) = self.graph.node(&node.id) {
                return Err(GraphError::DuplicateId {
                    id: node.id,
                    existing: existing.kind,
                    incoming: node.kind,
                });
            }
        }

        let id = node.id.clone();
        let incoming = node.kind;
        match self.graph.upsert_node(node) {
            Upsert::Inserted(index) => Ok(index),
            Upsert::Replaced { index, previous } => {
                warn!(
                    id = %id,
                    previous = %previous,
                    incoming = %incoming,
                    "node id reused; merging into existing node"
                );
                self.graph.record_collision(Collision {
                    id,
                    previous,
                    incoming,
                });
                Ok(index)
            }
        }
    }
}

/// Escape one segment of a qualified id so `/` only ever separates segments
fn escape_segment(segment: &str) -> String {
    segment.replace('\\', "\\\\").replace('/', "\\/")
}

/// Build a graph with the default [`IdPolicy::Merge`] policy
///
/// # Errors
/// Never fails under the merge policy; the `Result` mirrors
/// [`GraphBuilder::build`].
pub fn build_graph(document: &Document) -> Result<CertificationGraph, GraphError> {
    GraphBuilder::new(IdPolicy::Merge).build(document)
}
