//! CLI command handlers for `csgraph`.
//!
//! This module provides handlers for the CLI subcommands.
//! Each command is implemented in its own submodule.

pub mod config;
pub mod render;
pub mod summary;

use cs_amc_graph::config::Config;
use cs_amc_graph::core::models::CertificationGraph;
use cs_amc_graph::core::{load_document, GraphBuilder};
use cs_amc_graph::logger::error;
use cs_amc_graph::verbose;
use std::path::PathBuf;

/// Load the configured input and build its graph
///
/// Shared by `render` and `summary`. Errors are logged and returned as a
/// one-line message for the terminal.
pub fn load_and_build(config: &Config) -> Result<(PathBuf, CertificationGraph), String> {
    let input = PathBuf::from(&config.paths.input);
    let policy = config.id_policy().map_err(|e| format!("✗ {e}"))?;

    let document = load_document(&input).map_err(|e| {
        error!("Failed to load {}: {e}", input.display());
        format!("✗ {e}")
    })?;
    verbose!(
        "✓ Loaded {} ({} subparts, {} sections)",
        input.display(),
        document.subpart_count(),
        document.section_count()
    );

    let graph = GraphBuilder::new(policy).build(&document).map_err(|e| {
        error!("Graph construction failed for {}: {e}", input.display());
        format!("✗ {e}")
    })?;
    verbose!(
        "✓ Built graph with {} nodes and {} edges (id policy: {policy})",
        graph.node_count(),
        graph.edge_count()
    );

    Ok((input, graph))
}
