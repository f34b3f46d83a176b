//! In-memory graph storage implementation
//!
//! Node ids are interned into dense slot indices the first time they are
//! seen, either as an inserted node or as an edge endpoint. Forward and
//! reverse adjacency are per-slot lists of [`Hop`]s pointing into a shared
//! edge arena, so both views always refer to the same stored edge.

use super::edge::Edge;
use super::node::{Node, PropertyMap};
use super::types::{EdgeType, NodeId, NodeType};
use crate::config::DuplicateNamePolicy;
use indexmap::IndexSet;
use privgraph_traversal::{Direction, EdgeIndex, Hop, NodeIndex, Topology};
use rustc_hash::{FxBuildHasher, FxHashMap};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;
use tracing::debug;

/// Which end of a query a name was supplied for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Source,
    Target,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Source => write!(f, "Source"),
            Endpoint::Target => write!(f, "Target"),
        }
    }
}

/// Errors that can occur during graph operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("{role} node not found: {name}")]
    NodeNotFound { role: Endpoint, name: String },

    #[error("Node name {name:?} is already used by node {existing}")]
    DuplicateName { name: String, existing: NodeId },
}

pub type GraphResult<T> = Result<T, GraphError>;

/// Summary counts for a graph
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GraphStatistics {
    pub node_count: usize,
    pub edge_count: usize,
    /// Edges with at least one endpoint that is not a stored node
    pub dangling_edge_count: usize,
    pub nodes_by_type: BTreeMap<String, usize>,
    pub edges_by_type: BTreeMap<String, usize>,
}

/// In-memory identity graph
///
/// - slots: NodeId -> dense index (interned ids, nodes and edge endpoints)
/// - nodes: index -> Node (None for ids only ever seen on edges)
/// - edges: edge arena in insertion order
/// - outgoing / incoming: index -> hops, in edge insertion order
/// - name_index: name -> indices holding that name, in insertion order
#[derive(Debug, Default)]
pub struct GraphStore {
    slots: IndexSet<NodeId, FxBuildHasher>,

    nodes: Vec<Option<Node>>,

    /// Slots holding a node, in first-insertion order
    node_order: Vec<NodeIndex>,

    edges: Vec<Edge>,

    outgoing: Vec<Vec<Hop>>,

    incoming: Vec<Vec<Hop>>,

    name_index: FxHashMap<String, Vec<NodeIndex>>,

    duplicate_names: DuplicateNamePolicy,
}

impl GraphStore {
    /// Create a new empty graph store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store with the given duplicate-name policy
    pub fn with_duplicate_policy(policy: DuplicateNamePolicy) -> Self {
        GraphStore {
            duplicate_names: policy,
            ..Self::default()
        }
    }

    /// Upsert a node keyed by `id` with no properties.
    ///
    /// Returns the node previously stored under `id`, if any. Only fails
    /// under [`DuplicateNamePolicy::Reject`] when another id already holds
    /// `name`.
    pub fn add_node(
        &mut self,
        id: impl Into<NodeId>,
        node_type: impl Into<NodeType>,
        name: impl Into<String>,
    ) -> GraphResult<Option<Node>> {
        self.insert_node(Node::new(id, node_type, name))
    }

    /// Upsert a node carrying a property bag. See [`GraphStore::add_node`].
    pub fn add_node_with_properties(
        &mut self,
        id: impl Into<NodeId>,
        node_type: impl Into<NodeType>,
        name: impl Into<String>,
        properties: PropertyMap,
    ) -> GraphResult<Option<Node>> {
        self.insert_node(Node::new_with_properties(id, node_type, name, properties))
    }

    /// Upsert a prepared node. See [`GraphStore::add_node`].
    pub fn insert_node(&mut self, node: Node) -> GraphResult<Option<Node>> {
        let existing_slot = self.slots.get_index_of(node.id.as_str());

        if let Some(holders) = self.name_index.get(&node.name) {
            if let Some(&other) = holders.iter().find(|&&idx| Some(idx) != existing_slot) {
                let existing = self.slots[other].clone();
                match self.duplicate_names {
                    DuplicateNamePolicy::Reject => {
                        return Err(GraphError::DuplicateName {
                            name: node.name,
                            existing,
                        });
                    }
                    DuplicateNamePolicy::FirstWins => {
                        debug!(
                            "Node {} shares name {:?} with {}; lookups resolve to the earlier node",
                            node.id, node.name, existing
                        );
                    }
                }
            }
        }

        let idx = self.intern(&node.id);
        let previous = self.nodes[idx].take();

        match &previous {
            Some(old) if old.name == node.name => {}
            Some(old) => {
                self.unindex_name(&old.name, idx);
                self.name_index.entry(node.name.clone()).or_default().push(idx);
            }
            None => {
                self.node_order.push(idx);
                self.name_index.entry(node.name.clone()).or_default().push(idx);
            }
        }

        self.nodes[idx] = Some(node);
        Ok(previous)
    }

    /// Append a directed edge to both adjacency views.
    ///
    /// Endpoints need not exist; an id with no stored node is never entered
    /// by a traversal.
    pub fn add_edge(
        &mut self,
        source: impl Into<NodeId>,
        target: impl Into<NodeId>,
        edge_type: impl Into<EdgeType>,
    ) -> EdgeIndex {
        self.insert_edge(Edge::new(source, target, edge_type))
    }

    /// Append a prepared edge. See [`GraphStore::add_edge`].
    pub fn insert_edge(&mut self, edge: Edge) -> EdgeIndex {
        let source = self.intern(&edge.source);
        let target = self.intern(&edge.target);
        let edge_idx = self.edges.len();

        self.edges.push(edge);
        self.outgoing[source].push(Hop::new(edge_idx, target));
        self.incoming[target].push(Hop::new(edge_idx, source));
        edge_idx
    }

    /// Resolve a display name to a node id (exact, case-sensitive).
    ///
    /// With duplicate names the earliest-inserted node still holding the
    /// name wins.
    pub fn find_node_id_by_name(&self, name: &str) -> Option<&NodeId> {
        self.index_of_name(name).map(|idx| &self.slots[idx])
    }

    /// Get a node by its display name
    pub fn get_node_by_name(&self, name: &str) -> Option<&Node> {
        self.index_of_name(name).and_then(|idx| self.node_at(idx))
    }

    /// Get a node by id
    pub fn get_node(&self, id: &str) -> Option<&Node> {
        self.slots.get_index_of(id).and_then(|idx| self.node_at(idx))
    }

    /// Check if a node with this id is stored
    pub fn contains_node(&self, id: &str) -> bool {
        self.get_node(id).is_some()
    }

    /// All stored nodes in first-insertion order
    pub fn all_nodes(&self) -> Vec<&Node> {
        self.node_order
            .iter()
            .filter_map(|&idx| self.node_at(idx))
            .collect()
    }

    /// All edges in insertion order
    pub fn all_edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Get all outgoing edges from a node id, in insertion order
    pub fn outgoing_edges(&self, id: &str) -> Vec<&Edge> {
        self.edges_of(id, Direction::Outgoing)
    }

    /// Get all incoming edges to a node id, in insertion order
    pub fn incoming_edges(&self, id: &str) -> Vec<&Edge> {
        self.edges_of(id, Direction::Incoming)
    }

    pub fn node_count(&self) -> usize {
        self.node_order.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn statistics(&self) -> GraphStatistics {
        let mut stats = GraphStatistics {
            node_count: self.node_count(),
            edge_count: self.edge_count(),
            ..GraphStatistics::default()
        };

        for node in self.all_nodes() {
            *stats
                .nodes_by_type
                .entry(node.node_type.to_string())
                .or_default() += 1;
        }

        for edge in self.all_edges() {
            *stats
                .edges_by_type
                .entry(edge.edge_type.to_string())
                .or_default() += 1;
            if !self.contains_node(edge.source.as_str()) || !self.contains_node(edge.target.as_str()) {
                stats.dangling_edge_count += 1;
            }
        }

        stats
    }

    pub(crate) fn index_of_name(&self, name: &str) -> Option<NodeIndex> {
        self.name_index
            .get(name)
            .and_then(|holders| holders.first().copied())
    }

    pub(crate) fn node_at(&self, idx: NodeIndex) -> Option<&Node> {
        self.nodes.get(idx).and_then(Option::as_ref)
    }

    pub(crate) fn edge_at(&self, idx: EdgeIndex) -> Option<&Edge> {
        self.edges.get(idx)
    }

    fn edges_of(&self, id: &str, direction: Direction) -> Vec<&Edge> {
        self.slots
            .get_index_of(id)
            .map(|idx| {
                self.hops(idx, direction)
                    .iter()
                    .filter_map(|hop| self.edge_at(hop.edge))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn intern(&mut self, id: &NodeId) -> NodeIndex {
        if let Some(idx) = self.slots.get_index_of(id.as_str()) {
            return idx;
        }
        let (idx, _) = self.slots.insert_full(id.clone());
        self.nodes.push(None);
        self.outgoing.push(Vec::new());
        self.incoming.push(Vec::new());
        idx
    }

    fn unindex_name(&mut self, name: &str, idx: NodeIndex) {
        if let Some(holders) = self.name_index.get_mut(name) {
            holders.retain(|&held| held != idx);
            if holders.is_empty() {
                self.name_index.remove(name);
            }
        }
    }
}

impl Topology for GraphStore {
    fn node_bound(&self) -> usize {
        self.slots.len()
    }

    fn is_present(&self, node: NodeIndex) -> bool {
        self.node_at(node).is_some()
    }

    fn hops(&self, node: NodeIndex, direction: Direction) -> &[Hop] {
        let lists = match direction {
            Direction::Outgoing => &self.outgoing,
            Direction::Incoming => &self.incoming,
        };
        lists.get(node).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props(pairs: &[(&str, &str)]) -> PropertyMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_add_and_get_node() {
        let mut store = GraphStore::new();
        let previous = store.add_node("U1", "User", "EVIL@CORP").unwrap();

        assert!(previous.is_none());
        assert_eq!(store.node_count(), 1);
        let node = store.get_node("U1").unwrap();
        assert_eq!(node.name, "EVIL@CORP");
        assert!(node.is_type("User"));
        assert!(node.properties.is_empty());
    }

    #[test]
    fn test_node_with_properties() {
        let mut store = GraphStore::new();
        store
            .add_node_with_properties(
                "C1",
                "Computer",
                "WS01.CORP",
                props(&[("distinguishedname", "CN=WS01,OU=Workstations,DC=corp")]),
            )
            .unwrap();

        let node = store.get_node("C1").unwrap();
        assert_eq!(
            node.get_property("distinguishedname"),
            Some("CN=WS01,OU=Workstations,DC=corp")
        );
    }

    #[test]
    fn test_upsert_replaces_node() {
        let mut store = GraphStore::new();
        store.add_node("U1", "User", "OLD@CORP").unwrap();
        let previous = store
            .add_node("U1", "User", "NEW@CORP")
            .unwrap();

        assert_eq!(previous.unwrap().name, "OLD@CORP");
        assert_eq!(store.node_count(), 1);
        assert_eq!(store.find_node_id_by_name("NEW@CORP"), Some(&NodeId::new("U1")));
        assert_eq!(store.find_node_id_by_name("OLD@CORP"), None);
    }

    #[test]
    fn test_find_by_name_is_exact() {
        let mut store = GraphStore::new();
        store.add_node("U1", "User", "Alice@CORP").unwrap();

        assert_eq!(store.find_node_id_by_name("Alice@CORP"), Some(&NodeId::new("U1")));
        assert_eq!(store.find_node_id_by_name("ALICE@CORP"), None);
        assert_eq!(store.find_node_id_by_name("Alice"), None);
    }

    #[test]
    fn test_duplicate_names_first_wins() {
        let mut store = GraphStore::new();
        store.add_node("U1", "User", "SVC@CORP").unwrap();
        store.add_node("U2", "User", "SVC@CORP").unwrap();

        assert_eq!(store.node_count(), 2);
        assert_eq!(store.find_node_id_by_name("SVC@CORP"), Some(&NodeId::new("U1")));

        // Renaming the first holder hands the name to the next one
        store.add_node("U1", "User", "OTHER@CORP").unwrap();
        assert_eq!(store.find_node_id_by_name("SVC@CORP"), Some(&NodeId::new("U2")));
    }

    #[test]
    fn test_upsert_same_name_keeps_precedence() {
        let mut store = GraphStore::new();
        store.add_node("U1", "User", "SVC@CORP").unwrap();
        store.add_node("U2", "User", "SVC@CORP").unwrap();
        store.add_node("U1", "Group", "SVC@CORP").unwrap();

        assert_eq!(store.find_node_id_by_name("SVC@CORP"), Some(&NodeId::new("U1")));
        assert!(store.get_node_by_name("SVC@CORP").unwrap().is_type("Group"));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let mut store = GraphStore::with_duplicate_policy(DuplicateNamePolicy::Reject);
        store.add_node("U1", "User", "SVC@CORP").unwrap();

        let err = store
            .add_node("U2", "User", "SVC@CORP")
            .unwrap_err();
        assert_eq!(
            err,
            GraphError::DuplicateName {
                name: "SVC@CORP".to_string(),
                existing: NodeId::new("U1"),
            }
        );
        assert_eq!(store.node_count(), 1);

        // Re-inserting the holder itself is still an upsert
        assert!(store.add_node("U1", "User", "SVC@CORP").is_ok());
    }

    #[test]
    fn test_edges_in_both_views() {
        let mut store = GraphStore::new();
        store.add_node("U1", "User", "A").unwrap();
        store.add_node("G1", "Group", "B").unwrap();
        store.add_edge("U1", "G1", "MemberOf");
        store.add_edge("U1", "G1", "GenericAll");

        let out = store.outgoing_edges("U1");
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].edge_type.as_str(), "MemberOf");
        assert_eq!(out[1].edge_type.as_str(), "GenericAll");

        let inc = store.incoming_edges("G1");
        assert_eq!(inc, out);
        assert!(store.outgoing_edges("G1").is_empty());
        assert_eq!(store.edge_count(), 2);
    }

    #[test]
    fn test_dangling_edge_allowed() {
        let mut store = GraphStore::new();
        store.add_node("U1", "User", "A").unwrap();
        store.add_edge("U1", "GHOST", "MemberOf");

        assert_eq!(store.edge_count(), 1);
        assert_eq!(store.node_count(), 1);
        assert!(!store.contains_node("GHOST"));
        assert_eq!(store.incoming_edges("GHOST").len(), 1);
        assert!(store.outgoing_edges("NOWHERE").is_empty());
    }

    #[test]
    fn test_node_inserted_after_its_edges() {
        let mut store = GraphStore::new();
        store.add_edge("U1", "G1", "MemberOf");
        store.add_node("G1", "Group", "B").unwrap();
        store.add_node("U1", "User", "A").unwrap();

        let names: Vec<&str> = store.all_nodes().iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A"]);
        assert_eq!(store.outgoing_edges("U1").len(), 1);
    }

    #[test]
    fn test_statistics() {
        let mut store = GraphStore::new();
        store.add_node("U1", "User", "A").unwrap();
        store.add_node("U2", "User", "B").unwrap();
        store.add_node("G1", "Group", "C").unwrap();
        store.add_edge("U1", "G1", "MemberOf");
        store.add_edge("U2", "G1", "MemberOf");
        store.add_edge("G1", "MISSING", "AdminTo");

        let stats = store.statistics();
        assert_eq!(stats.node_count, 3);
        assert_eq!(stats.edge_count, 3);
        assert_eq!(stats.dangling_edge_count, 1);
        assert_eq!(stats.nodes_by_type.get("User"), Some(&2));
        assert_eq!(stats.edges_by_type.get("MemberOf"), Some(&2));
    }

    #[test]
    fn test_topology_view() {
        let mut store = GraphStore::new();
        store.add_node("U1", "User", "A").unwrap();
        store.add_edge("U1", "X", "MemberOf");

        assert_eq!(store.node_bound(), 2);
        assert!(store.is_present(0));
        assert!(!store.is_present(1));
        assert_eq!(store.hops(0, Direction::Outgoing), &[Hop::new(0, 1)]);
        assert_eq!(store.hops(1, Direction::Incoming), &[Hop::new(0, 0)]);
    }
}
