//! cardgraph CLI: build and inspect sample triple graphs.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use serde::Serialize;

use cardgraph::graph::{Node, NodeKind, Triple, TripleGraph};

#[derive(Parser)]
#[command(name = "cardgraph", version, about = "In-memory triple graph playground")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the bundled sample graph and print its queries.
    Demo,

    /// Dump the bundled sample graph as JSON.
    Export,
}

/// JSON shape for the `export` subcommand.
#[derive(Serialize)]
struct ExportedGraph {
    nodes: Vec<Node>,
    triples: Vec<Triple>,
}

/// A small bundled sample: n1 --p1--> n2 --p1--> n4 <--p1-- n3.
fn sample_graph() -> Result<TripleGraph> {
    let n1 = Arc::new(Node::new("n1", "n1-label"));
    let n2 = Arc::new(Node::new("n2", "n2-label"));
    let n3 = Arc::new(Node::new("n3", "n3-label"));
    let n4 = Arc::new(Node::new("n4", "n4-label"));
    let p1 = Arc::new(Node::with_kind("p1", "p1-label", NodeKind::Predicate));

    let mut graph = TripleGraph::new();
    graph.add_nodes([n1.clone(), n2.clone(), n3.clone(), n4.clone(), p1.clone()]);
    graph.add_triples([
        Triple::new(n1, p1.clone(), n2.clone()),
        Triple::new(n2.clone(), p1.clone(), n4.clone()),
        Triple::new(n3, p1, n4),
    ])?;
    Ok(graph)
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Demo => {
            let graph = sample_graph()?;

            println!("nodes:   {}", graph.node_count());
            println!("triples: {}", graph.triple_count());

            println!("\nroot nodes:");
            for root in graph.root_nodes() {
                println!("  {root}");
            }

            println!("\ndegrees:");
            for node in graph.node_set().iter() {
                println!(
                    "  {:<3} in={} out={}",
                    node.id(),
                    graph.in_degree_of(node),
                    graph.out_degree_of(node)
                );
            }

            println!("\npredicate lookups:");
            for (subject, object) in [("n1", "n2"), ("n2", "n4"), ("n3", "n4"), ("n4", "n1")] {
                match graph.get_predicate(subject, object) {
                    Some(predicate) => println!("  {subject} -> {object}: {}", predicate.id()),
                    None => println!("  {subject} -> {object}: (none)"),
                }
            }
        }
        Commands::Export => {
            let graph = sample_graph()?;
            let exported = ExportedGraph {
                nodes: graph
                    .node_set()
                    .iter()
                    .map(|node| node.as_ref().clone())
                    .collect(),
                triples: graph.triple_set().into_iter().collect(),
            };
            let json = serde_json::to_string_pretty(&exported).into_diagnostic()?;
            println!("{json}");
        }
    }

    Ok(())
}
