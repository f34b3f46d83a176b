//! Edge implementation for the identity graph

use super::types::{EdgeType, NodeId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A directed, typed relationship between two node ids
///
/// Either endpoint may name an id that was never inserted as a node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    /// Source node (edge goes FROM this node)
    pub source: NodeId,

    /// Target node (edge goes TO this node)
    pub target: NodeId,

    /// Type of relationship (e.g., "MemberOf", "AdminTo")
    #[serde(rename = "type")]
    pub edge_type: EdgeType,
}

impl Edge {
    /// Create a new directed edge
    pub fn new(
        source: impl Into<NodeId>,
        target: impl Into<NodeId>,
        edge_type: impl Into<EdgeType>,
    ) -> Self {
        Edge {
            source: source.into(),
            target: target.into(),
            edge_type: edge_type.into(),
        }
    }

    /// Check if this edge goes FROM a specific node
    pub fn starts_from(&self, node: &NodeId) -> bool {
        self.source == *node
    }

    /// Check if this edge goes TO a specific node
    pub fn ends_at(&self, node: &NodeId) -> bool {
        self.target == *node
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -[{}]-> {}", self.source, self.edge_type, self.target)
    }
}
