//! Shortest path between two named nodes

use super::resolve;
use crate::graph::{Edge, Endpoint, GraphResult, GraphStore, Node};
use privgraph_traversal::PathResult;
use tracing::{debug, warn};

/// One hop of a path: the edge taken and the node it leads to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathStep<'a> {
    pub edge: &'a Edge,
    pub node: &'a Node,
}

/// A path through the stored graph, start node first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphPath<'a> {
    pub start: &'a Node,
    pub steps: Vec<PathStep<'a>>,
}

impl<'a> GraphPath<'a> {
    /// Map a traversal result onto stored nodes and edges.
    ///
    /// Returns `None` if any index no longer resolves.
    pub(crate) fn from_result(store: &'a GraphStore, result: &PathResult) -> Option<Self> {
        let start = store.node_at(result.source)?;
        let steps = result
            .steps
            .iter()
            .map(|step| {
                Some(PathStep {
                    edge: store.edge_at(step.edge)?,
                    node: store.node_at(step.to)?,
                })
            })
            .collect::<Option<Vec<_>>>()?;
        Some(GraphPath { start, steps })
    }

    /// Number of edges on the path
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The last node on the path
    pub fn end(&self) -> &'a Node {
        self.steps.last().map_or(self.start, |step| step.node)
    }

    pub fn edges(&self) -> Vec<&'a Edge> {
        self.steps.iter().map(|step| step.edge).collect()
    }

    /// `"name [type]"` for the start, then `"(edge type) -> name [type]"`
    /// for each hop
    pub fn describe(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.steps.len() + 1);
        lines.push(self.start.describe());
        for step in &self.steps {
            lines.push(format!("({}) -> {}", step.edge.edge_type, step.node.describe()));
        }
        lines
    }
}

/// Fewest-hop path from `source_name` to `target_name` along edge direction.
///
/// `Ok(None)` means both names resolved but the target is unreachable.
pub fn try_shortest_path<'a>(
    store: &'a GraphStore,
    source_name: &str,
    target_name: &str,
) -> GraphResult<Option<GraphPath<'a>>> {
    let source = resolve(store, source_name, Endpoint::Source)?;
    let target = resolve(store, target_name, Endpoint::Target)?;

    let path = privgraph_traversal::shortest_path(store, source, target)
        .and_then(|result| GraphPath::from_result(store, &result));

    debug!(
        "shortest path {:?} -> {:?}: {}",
        source_name,
        target_name,
        path.as_ref()
            .map_or_else(|| "none".to_string(), |p| format!("{} hops", p.len()))
    );
    Ok(path)
}

/// Rendered shortest path; empty when there is no path or a name does not
/// resolve
pub fn shortest_path(store: &GraphStore, source_name: &str, target_name: &str) -> Vec<String> {
    match try_shortest_path(store, source_name, target_name) {
        Ok(path) => path.map(|p| p.describe()).unwrap_or_default(),
        Err(e) => {
            warn!("{}", e);
            Vec::new()
        }
    }
}

impl GraphStore {
    /// See [`shortest_path`]
    pub fn shortest_path(&self, source_name: &str, target_name: &str) -> Vec<String> {
        shortest_path(self, source_name, target_name)
    }
}
