//! Render command handler
//!
//! Loads the JSON document, builds the graph and writes it in the configured
//! output format.

use super::load_and_build;
use cs_amc_graph::config::Config;
use cs_amc_graph::core::renderer_for;
use cs_amc_graph::logger::{error, info};
use std::path::PathBuf;

/// Run the render command with the effective configuration.
///
/// # Errors
/// Returns a terminal-ready message if loading, building or writing fails.
pub fn run(config: &Config) -> Result<(), String> {
    let format = config
        .output_format()
        .map_err(|e| format!("✗ {e}. Use: html, dot, or json"))?;

    let (input, graph) = load_and_build(config)?;

    let output = PathBuf::from(&config.paths.output);
    renderer_for(format, config.render_options())
        .write(&graph, &output)
        .map_err(|e| {
            error!("Rendering failed for {}: {e}", input.display());
            format!("✗ Failed to write {format} output: {e}")
        })?;

    if !graph.collisions().is_empty() {
        println!(
            "⚠️  {} node id(s) were shared by several entries and merged (see `csgraph summary`)",
            graph.collisions().len()
        );
    }
    println!("✓ Graph written: {}", output.display());
    info!(
        "Rendered {} nodes and {} edges from {} to {}",
        graph.node_count(),
        graph.edge_count(),
        input.display(),
        output.display()
    );

    Ok(())
}
