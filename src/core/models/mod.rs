//! Data models for `cs-amc-graph`

pub mod document;
pub mod graph;

pub use document::{Amc, Document, Requirement, Section, Subpart};
pub use graph::{CertificationGraph, Collision, GraphNode, GraphSummary, NodeKind, Upsert};
