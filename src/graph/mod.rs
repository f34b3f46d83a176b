//! Identity graph data model
//!
//! This module implements the directed property graph:
//! - Nodes with an id, a type tag, a display name and string properties
//! - Directed, typed edges that may reference ids with no stored node
//! - Multiple edges between the same nodes
//! - Forward and reverse adjacency kept in edge insertion order

pub mod edge;
pub mod node;
pub mod store;
pub mod types;

// Re-export main types
pub use edge::Edge;
pub use node::{Node, PropertyMap};
pub use store::{Endpoint, GraphError, GraphResult, GraphStatistics, GraphStore};
pub use types::{EdgeType, NodeId, NodeType};
