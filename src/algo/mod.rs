//! Graph query layer
//!
//! Traversals themselves live in the `privgraph-traversal` crate and only see
//! dense node indices. This module resolves display names to indices, runs
//! the traversal over the [`GraphStore`] topology, and maps results back to
//! nodes and edges.
//!
//! Each query comes in two forms:
//! - `try_*` returns a typed result and distinguishes an unresolved name
//!   (`Err(GraphError::NodeNotFound)`) from an empty answer.
//! - the plain form returns the rendered sequence, logging unresolved names
//!   as warnings and returning an empty sequence for both cases.

pub mod escalation;
pub mod pathfinding;
pub mod reachability;

use crate::graph::{Endpoint, GraphError, GraphResult, GraphStore};
use privgraph_traversal::NodeIndex;

// Re-export traversal primitives
pub use privgraph_traversal::{
    breadth_first, nearest_match, BfsTree, Direction, PathResult, SearchOptions, Topology,
};

pub use escalation::{
    high_value_nodes, path_to_high_value, try_path_to_high_value, EscalationOptions,
    EscalationPath,
};
pub use pathfinding::{shortest_path, try_shortest_path, GraphPath, PathStep};
pub use reachability::{controllers, reachable_nodes, try_controllers, try_reachable_nodes};

/// Resolve a display name to a stored node's index
fn resolve(store: &GraphStore, name: &str, role: Endpoint) -> GraphResult<NodeIndex> {
    store
        .index_of_name(name)
        .ok_or_else(|| GraphError::NodeNotFound {
            role,
            name: name.to_string(),
        })
}
