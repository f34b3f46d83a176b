//! privgraph CLI: attack-path queries over a JSON identity graph

mod ingest;

use anyhow::Result;
use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use privgraph::algo::{high_value_nodes, try_controllers, try_reachable_nodes, try_shortest_path};
use privgraph::{AnalysisConfig, GraphStore, Node};
use serde_json::json;
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser)]
#[command(name = "privgraph", version, about = "Attack-path analysis over an identity graph")]
struct Cli {
    /// Graph document (JSON with "nodes" and "edges")
    #[arg(long, short, global = true, env = "PRIVGRAPH_GRAPH", default_value = "graph.json")]
    graph: PathBuf,

    /// Analysis config (YAML or JSON)
    #[arg(long, short, global = true, env = "PRIVGRAPH_CONFIG")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    /// Log debug diagnostics to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Shortest path between two named nodes
    Path {
        /// Source node name
        from: String,
        /// Target node name
        to: String,
    },
    /// Everything a node can reach
    Reachable {
        /// Source node name
        name: String,
    },
    /// Everything that can reach a node
    Controllers {
        /// Target node name
        name: String,
    },
    /// Nearest path from a node to a high-value target
    Escalate {
        /// Source node name
        name: String,
    },
    /// List every high-value node
    HighValue,
    /// Graph statistics
    Stats,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => AnalysisConfig::load(path)?,
        None => AnalysisConfig::default(),
    };
    let store = ingest::load_graph(&cli.graph, config.duplicate_names)?;

    match &cli.command {
        Commands::Path { from, to } => run_path(&store, from, to, cli.format),
        Commands::Reachable { name } => {
            let nodes = try_reachable_nodes(&store, name)?;
            print_nodes(&nodes, cli.format)
        }
        Commands::Controllers { name } => {
            let nodes = try_controllers(&store, name)?;
            print_nodes(&nodes, cli.format)
        }
        Commands::Escalate { name } => run_escalate(&store, &config, name, cli.format),
        Commands::HighValue => {
            let nodes = high_value_nodes(&store, &config.classifier);
            print_nodes(&nodes, cli.format)
        }
        Commands::Stats => run_stats(&store, cli.format),
    }
}

fn run_path(store: &GraphStore, from: &str, to: &str, format: OutputFormat) -> Result<()> {
    let path = try_shortest_path(store, from, to)?;

    match format {
        OutputFormat::Json => {
            let value = match &path {
                Some(path) => json!({
                    "hops": path.describe(),
                    "edges": path.edges(),
                }),
                None => json!({ "hops": [], "edges": [] }),
            };
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Table => match path {
            Some(path) => {
                for line in path.describe() {
                    println!("{}", line);
                }
                println!("{} hop(s)", path.len());
            }
            None => println!("(no path)"),
        },
    }

    Ok(())
}

fn run_escalate(store: &GraphStore, config: &AnalysisConfig, name: &str, format: OutputFormat) -> Result<()> {
    let path = store.path_to_high_value_with(name, &config.classifier, config.escalation)?;

    match format {
        OutputFormat::Json => {
            let value = match &path {
                Some(path) => json!({
                    "target": path.target,
                    "edges": path.edges,
                }),
                None => json!({ "target": null, "edges": [] }),
            };
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Table => match path {
            Some(path) => {
                let mut table = Table::new();
                table.set_content_arrangement(ContentArrangement::Dynamic);
                table.set_header(vec!["#", "Source", "Edge", "Target"]);
                for (i, edge) in path.edges.iter().enumerate() {
                    table.add_row(vec![
                        (i + 1).to_string(),
                        display_id(store, edge.source.as_str()),
                        edge.edge_type.to_string(),
                        display_id(store, edge.target.as_str()),
                    ]);
                }
                println!("{}", table);
                println!("Target: {} ({} hop(s))", path.target, path.len());
            }
            None => println!("(no high-value target reachable)"),
        },
    }

    Ok(())
}

fn run_stats(store: &GraphStore, format: OutputFormat) -> Result<()> {
    let stats = store.statistics();

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        OutputFormat::Table => {
            println!("Nodes:          {}", stats.node_count);
            println!("Edges:          {}", stats.edge_count);
            println!("Dangling edges: {}", stats.dangling_edge_count);

            let mut table = Table::new();
            table.set_header(vec!["Kind", "Type", "Count"]);
            for (node_type, count) in &stats.nodes_by_type {
                table.add_row(vec!["node".to_string(), node_type.clone(), count.to_string()]);
            }
            for (edge_type, count) in &stats.edges_by_type {
                table.add_row(vec!["edge".to_string(), edge_type.clone(), count.to_string()]);
            }
            println!("{}", table);
        }
    }

    Ok(())
}

fn print_nodes(nodes: &[&Node], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(nodes)?);
        }
        OutputFormat::Table => {
            if nodes.is_empty() {
                println!("(no results)");
                return Ok(());
            }

            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec!["Name", "Type", "Id"]);
            for node in nodes {
                table.add_row(vec![
                    node.name.clone(),
                    node.node_type.to_string(),
                    node.id.to_string(),
                ]);
            }
            println!("{}", table);
            println!("{} node(s)", nodes.len());
        }
    }

    Ok(())
}

/// Node name for an id, or the raw id when no node is stored under it
fn display_id(store: &GraphStore, id: &str) -> String {
    store
        .get_node(id)
        .map_or_else(|| id.to_string(), |node| node.name.clone())
}
