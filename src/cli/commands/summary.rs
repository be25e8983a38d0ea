//! Summary command handler

use super::load_and_build;
use cs_amc_graph::config::Config;
use cs_amc_graph::core::models::CertificationGraph;

/// Run the summary command: print counts (and optionally the tree) without writing output.
///
/// # Errors
/// Returns a terminal-ready message if loading or building fails.
pub fn run(config: &Config, tree: bool) -> Result<(), String> {
    let (input, graph) = load_and_build(config)?;

    println!("\n=== Summary ===");
    println!("Input: {}", input.display());
    print_summary(&graph);

    if tree {
        println!();
        print!("{graph}");
    }

    Ok(())
}

fn print_summary(graph: &CertificationGraph) {
    let summary = graph.summary();
    println!("Subparts: {}", summary.subparts);
    println!("CS: {}", summary.sections);
    println!("CS requirements: {}", summary.requirements);
    println!("AMCs: {}", summary.amcs);
    println!("AMC requirements: {}", summary.amc_requirements);
    println!("Total nodes: {}", summary.nodes());
    println!("Total edges: {}", summary.edges);

    if summary.collisions > 0 {
        println!("⚠️  {} id collision(s):", summary.collisions);
        for collision in graph.collisions() {
            println!(
                "  {} ({} merged into {})",
                collision.id, collision.incoming, collision.previous
            );
        }
    }
}
