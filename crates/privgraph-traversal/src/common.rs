//! Shared types for traversal algorithms
//!
//! Algorithms in this crate only see a dense, integer-indexed topology. The
//! owning graph maps its own identifiers onto `NodeIndex` values and exposes
//! forward and reverse adjacency through the [`Topology`] trait.

/// Dense node index (0..node_bound)
pub type NodeIndex = usize;

/// Dense edge index into the owner's edge arena
pub type EdgeIndex = usize;

/// Which adjacency view a traversal follows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Follow edges source -> target
    Outgoing,
    /// Follow edges target -> source (the transposed graph)
    Incoming,
}

/// One adjacency entry: the edge taken and the node at its far end.
///
/// In the outgoing view `node` is the edge target, in the incoming view it
/// is the edge source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hop {
    pub edge: EdgeIndex,
    pub node: NodeIndex,
}

impl Hop {
    pub fn new(edge: EdgeIndex, node: NodeIndex) -> Self {
        Hop { edge, node }
    }
}

/// One step of a reconstructed path, in traversal order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Step {
    pub edge: EdgeIndex,
    pub from: NodeIndex,
    pub to: NodeIndex,
}

/// Read-only view of a directed multigraph.
///
/// Index slots may exist without a node behind them (an edge may name an
/// endpoint that was never inserted). Such slots report `is_present == false`
/// and are never entered by a traversal.
pub trait Topology {
    /// Upper bound (exclusive) on node indices
    fn node_bound(&self) -> usize;

    /// Whether a node is stored at this index
    fn is_present(&self, node: NodeIndex) -> bool;

    /// Adjacency of `node` in the given direction, in edge insertion order
    fn hops(&self, node: NodeIndex, direction: Direction) -> &[Hop];
}

/// Plain adjacency-list topology.
///
/// Used by tests and by callers that already hold dense edge lists.
#[derive(Debug, Clone, Default)]
pub struct AdjacencyView {
    present: Vec<bool>,
    outgoing: Vec<Vec<Hop>>,
    incoming: Vec<Vec<Hop>>,
    edge_count: usize,
}

impl AdjacencyView {
    /// Create a view with `node_count` present nodes and no edges
    pub fn new(node_count: usize) -> Self {
        AdjacencyView {
            present: vec![true; node_count],
            outgoing: vec![Vec::new(); node_count],
            incoming: vec![Vec::new(); node_count],
            edge_count: 0,
        }
    }

    /// Build from `(source, target)` pairs; edge indices follow slice order
    pub fn from_edges(node_count: usize, edges: &[(NodeIndex, NodeIndex)]) -> Self {
        let mut view = Self::new(node_count);
        for &(source, target) in edges {
            view.add_edge(source, target);
        }
        view
    }

    /// Append an edge, growing the index space if needed. Returns its index.
    ///
    /// Slots created only to hold an endpoint are marked absent.
    pub fn add_edge(&mut self, source: NodeIndex, target: NodeIndex) -> EdgeIndex {
        let bound = source.max(target) + 1;
        if bound > self.present.len() {
            self.present.resize(bound, false);
            self.outgoing.resize(bound, Vec::new());
            self.incoming.resize(bound, Vec::new());
        }

        let edge = self.edge_count;
        self.edge_count += 1;
        self.outgoing[source].push(Hop::new(edge, target));
        self.incoming[target].push(Hop::new(edge, source));
        edge
    }

    /// Mark a slot as present or absent
    pub fn set_present(&mut self, node: NodeIndex, present: bool) {
        if node >= self.present.len() {
            self.present.resize(node + 1, false);
            self.outgoing.resize(node + 1, Vec::new());
            self.incoming.resize(node + 1, Vec::new());
        }
        self.present[node] = present;
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }
}

impl Topology for AdjacencyView {
    fn node_bound(&self) -> usize {
        self.present.len()
    }

    fn is_present(&self, node: NodeIndex) -> bool {
        self.present.get(node).copied().unwrap_or(false)
    }

    fn hops(&self, node: NodeIndex, direction: Direction) -> &[Hop] {
        let lists = match direction {
            Direction::Outgoing => &self.outgoing,
            Direction::Incoming => &self.incoming,
        };
        lists.get(node).map(Vec::as_slice).unwrap_or(&[])
    }
}
