//! Transitive reachability closures

use super::bfs::breadth_first;
use super::common::{Direction, NodeIndex, Topology};

/// Every node reachable from `root` in one or more hops along `direction`,
/// in BFS discovery order. The root is never included, even when a cycle
/// leads back to it.
pub fn reachable_set<T>(topology: &T, root: NodeIndex, direction: Direction) -> Vec<NodeIndex>
where
    T: Topology + ?Sized,
{
    breadth_first(topology, root, direction, None, |_, _| false)
        .discovered()
        .to_vec()
}

/// Forward closure: what `source` can reach
pub fn descendants<T>(topology: &T, source: NodeIndex) -> Vec<NodeIndex>
where
    T: Topology + ?Sized,
{
    reachable_set(topology, source, Direction::Outgoing)
}

/// Reverse closure: everything that can reach `target`
pub fn ancestors<T>(topology: &T, target: NodeIndex) -> Vec<NodeIndex>
where
    T: Topology + ?Sized,
{
    reachable_set(topology, target, Direction::Incoming)
}
