//! Unweighted shortest path

use super::bfs::breadth_first;
use super::common::{Direction, NodeIndex, Step, Topology};

/// Result of a pathfinding algorithm
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathResult {
    pub source: NodeIndex,
    pub target: NodeIndex,
    pub steps: Vec<Step>,
}

impl PathResult {
    /// Number of edges on the path
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// True for a zero-hop path (source == target)
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Nodes on the path, source first
    pub fn nodes(&self) -> Vec<NodeIndex> {
        let mut nodes = Vec::with_capacity(self.steps.len() + 1);
        nodes.push(self.source);
        nodes.extend(self.steps.iter().map(|step| step.to));
        nodes
    }
}

/// Breadth-First Search (Unweighted Shortest Path)
///
/// Follows outgoing edges. Among equal-length paths the one found first in
/// edge insertion order wins. `source == target` yields a zero-hop path.
pub fn shortest_path<T>(topology: &T, source: NodeIndex, target: NodeIndex) -> Option<PathResult>
where
    T: Topology + ?Sized,
{
    let tree = breadth_first(topology, source, Direction::Outgoing, None, |node, _| {
        node == target
    });

    let hit = tree.hit()?;
    let steps = tree.path_to(hit)?;
    Some(PathResult {
        source,
        target,
        steps,
    })
}
