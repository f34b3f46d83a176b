//! Nearest-match search
//!
//! Finds the closest node (by hop count) satisfying a predicate. Used for
//! "nearest privileged target" style questions where the destination is not
//! known up front.

use super::bfs::breadth_first;
use super::common::{Direction, NodeIndex, Topology};
use super::pathfinding::PathResult;

/// Options for [`nearest_match`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// Allow the source itself to be the match (a zero-hop result)
    pub include_source: bool,
    /// Do not look further than this many hops
    pub max_depth: Option<usize>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            include_source: false,
            max_depth: None,
        }
    }
}

/// Breadth-first search along outgoing edges for the nearest node accepted
/// by `predicate`.
///
/// The predicate runs once per dequeued node. Ties at equal distance go to
/// the node discovered first in edge insertion order. Unless
/// `include_source` is set, a matching source is skipped and the search
/// continues past it.
pub fn nearest_match<T, P>(
    topology: &T,
    source: NodeIndex,
    options: SearchOptions,
    mut predicate: P,
) -> Option<PathResult>
where
    T: Topology + ?Sized,
    P: FnMut(NodeIndex) -> bool,
{
    let tree = breadth_first(
        topology,
        source,
        Direction::Outgoing,
        options.max_depth,
        |node, _| (options.include_source || node != source) && predicate(node),
    );

    let target = tree.hit()?;
    let steps = tree.path_to(target)?;
    Some(PathResult {
        source,
        target,
        steps,
    })
}
