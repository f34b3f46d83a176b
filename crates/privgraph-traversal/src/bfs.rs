//! Breadth-first search primitive
//!
//! Every traversal in this crate is a thin wrapper around [`breadth_first`].
//! The search records, for each discovered node, the hop that first reached
//! it, so any discovered node can be turned back into a path.

use super::common::{Direction, Hop, NodeIndex, Step, Topology};
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::VecDeque;

/// Outcome of a breadth-first search
#[derive(Debug, Clone)]
pub struct BfsTree {
    root: NodeIndex,
    /// child -> (edge used, parent)
    parents: FxHashMap<NodeIndex, Hop>,
    /// Dequeue order, root first
    order: Vec<NodeIndex>,
    hit: Option<NodeIndex>,
}

impl BfsTree {
    fn empty(root: NodeIndex) -> Self {
        BfsTree {
            root,
            parents: FxHashMap::default(),
            order: Vec::new(),
            hit: None,
        }
    }

    /// The node that satisfied the stop condition, if any
    pub fn hit(&self) -> Option<NodeIndex> {
        self.hit
    }

    /// Nodes in the order they were dequeued, including the root
    pub fn visit_order(&self) -> &[NodeIndex] {
        &self.order
    }

    /// Dequeued nodes other than the root, in BFS order
    pub fn discovered(&self) -> &[NodeIndex] {
        self.order.get(1..).unwrap_or(&[])
    }

    /// Whether `node` was reached (enqueued) by this search
    pub fn reached(&self, node: NodeIndex) -> bool {
        (node == self.root && !self.order.is_empty()) || self.parents.contains_key(&node)
    }

    /// Reconstruct the steps from the root to `node`.
    ///
    /// Steps are reported in traversal order. For an incoming search `from`
    /// is the node nearer the root, i.e. the edge target.
    pub fn path_to(&self, node: NodeIndex) -> Option<Vec<Step>> {
        if !self.reached(node) {
            return None;
        }

        let mut steps = Vec::new();
        let mut current = node;
        while current != self.root {
            let hop = self.parents.get(&current)?;
            steps.push(Step {
                edge: hop.edge,
                from: hop.node,
                to: current,
            });
            current = hop.node;
        }
        steps.reverse();
        Some(steps)
    }
}

/// Breadth-first search from `root`.
///
/// `stop(node, depth)` is evaluated as each node is dequeued (the root at
/// depth 0); the first node for which it returns `true` becomes the hit and
/// ends the search. Neighbours are expanded in adjacency order, which gives
/// minimum-hop discovery with ties broken by edge insertion order.
///
/// Absent index slots are skipped. Nodes at `max_depth` are visited but not
/// expanded.
pub fn breadth_first<T, F>(
    topology: &T,
    root: NodeIndex,
    direction: Direction,
    max_depth: Option<usize>,
    mut stop: F,
) -> BfsTree
where
    T: Topology + ?Sized,
    F: FnMut(NodeIndex, usize) -> bool,
{
    let mut tree = BfsTree::empty(root);
    if !topology.is_present(root) {
        return tree;
    }

    let mut queue = VecDeque::new();
    let mut visited = FxHashSet::default();

    queue.push_back((root, 0usize));
    visited.insert(root);

    while let Some((current, depth)) = queue.pop_front() {
        tree.order.push(current);

        if stop(current, depth) {
            tree.hit = Some(current);
            break;
        }

        if max_depth.is_some_and(|limit| depth >= limit) {
            continue;
        }

        for hop in topology.hops(current, direction) {
            if !topology.is_present(hop.node) {
                continue;
            }
            if visited.insert(hop.node) {
                tree.parents.insert(hop.node, Hop::new(hop.edge, current));
                queue.push_back((hop.node, depth + 1));
            }
        }
    }

    tree
}
