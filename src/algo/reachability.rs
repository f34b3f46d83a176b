//! Forward reachability and controllers (reverse reachability)

use super::resolve;
use crate::graph::{Endpoint, GraphResult, GraphStore, Node};
use privgraph_traversal::{reachable_set, Direction, NodeIndex};
use tracing::{debug, warn};

fn closure<'a>(store: &'a GraphStore, root: NodeIndex, direction: Direction) -> Vec<&'a Node> {
    reachable_set(store, root, direction)
        .into_iter()
        .filter_map(|idx| store.node_at(idx))
        .collect()
}

fn render(nodes: GraphResult<Vec<&Node>>) -> Vec<String> {
    match nodes {
        Ok(nodes) => nodes.iter().map(|node| node.describe()).collect(),
        Err(e) => {
            warn!("{}", e);
            Vec::new()
        }
    }
}

/// Every node reachable from `source_name` in one or more hops, in BFS
/// discovery order, excluding the source
pub fn try_reachable_nodes<'a>(store: &'a GraphStore, source_name: &str) -> GraphResult<Vec<&'a Node>> {
    let source = resolve(store, source_name, Endpoint::Source)?;
    let nodes = closure(store, source, Direction::Outgoing);
    debug!("{:?} reaches {} nodes", source_name, nodes.len());
    Ok(nodes)
}

/// Every node with a path to `target_name`, in BFS discovery order over the
/// reversed edges, excluding the target
pub fn try_controllers<'a>(store: &'a GraphStore, target_name: &str) -> GraphResult<Vec<&'a Node>> {
    let target = resolve(store, target_name, Endpoint::Target)?;
    let nodes = closure(store, target, Direction::Incoming);
    debug!("{:?} has {} controllers", target_name, nodes.len());
    Ok(nodes)
}

/// Rendered forward closure (`"name [type]"` per node)
pub fn reachable_nodes(store: &GraphStore, source_name: &str) -> Vec<String> {
    render(try_reachable_nodes(store, source_name))
}

/// Rendered reverse closure (`"name [type]"` per node)
pub fn controllers(store: &GraphStore, target_name: &str) -> Vec<String> {
    render(try_controllers(store, target_name))
}

impl GraphStore {
    /// See [`reachable_nodes`]
    pub fn reachable_nodes(&self, source_name: &str) -> Vec<String> {
        reachable_nodes(self, source_name)
    }

    /// See [`controllers`]
    pub fn controllers(&self, target_name: &str) -> Vec<String> {
        controllers(self, target_name)
    }
}
