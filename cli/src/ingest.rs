//! JSON graph ingest
//!
//! Format:
//! ```json
//! {
//!   "nodes": [{"id": "U1", "type": "User", "name": "EVIL@CORP", "properties": {}}],
//!   "edges": [{"source": "U1", "target": "G1", "type": "MemberOf"}]
//! }
//! ```
//! `properties` is optional. Nodes are inserted before edges, each in file
//! order.

use anyhow::{Context, Result};
use privgraph::{DuplicateNamePolicy, Edge, GraphStore, Node};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GraphDocument {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl GraphDocument {
    pub fn from_json_str(s: &str) -> Result<Self> {
        serde_json::from_str(s).context("invalid graph document")
    }

    pub fn into_store(self, policy: DuplicateNamePolicy) -> Result<GraphStore> {
        let mut store = GraphStore::with_duplicate_policy(policy);
        for node in self.nodes {
            let id = node.id.clone();
            store
                .insert_node(node)
                .with_context(|| format!("failed to insert node {}", id))?;
        }
        for edge in self.edges {
            store.insert_edge(edge);
        }
        Ok(store)
    }
}

/// Read a graph document from disk and build the store
pub fn load_graph(path: &Path, policy: DuplicateNamePolicy) -> Result<GraphStore> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read graph file {}", path.display()))?;
    let store = GraphDocument::from_json_str(&contents)?.into_store(policy)?;
    info!(
        "Loaded {} nodes and {} edges from {}",
        store.node_count(),
        store.edge_count(),
        path.display()
    );
    Ok(store)
}
