//! privgraph
//!
//! An in-memory identity and access graph for attack-path analysis. Accounts,
//! groups and hosts are nodes; memberships, admin rights and sessions are
//! directed edges. The graph answers:
//!
//! - shortest path: fewest hops from one named node to another
//! - reachable nodes: everything a node can reach
//! - controllers: everything that can reach a node
//! - escalation: the nearest privileged target reachable from a node
//!
//! # Example Usage
//!
//! ```rust
//! use privgraph::graph::{Edge, GraphStore};
//!
//! let mut store = GraphStore::new();
//! store.add_node("U1", "User", "EVIL@CORP").unwrap();
//! store.add_node("G1", "Group", "DOMAIN ADMINS@CORP").unwrap();
//! store.add_edge("U1", "G1", "MemberOf");
//!
//! assert_eq!(
//!     store.shortest_path("EVIL@CORP", "DOMAIN ADMINS@CORP"),
//!     vec!["EVIL@CORP [User]", "(MemberOf) -> DOMAIN ADMINS@CORP [Group]"]
//! );
//! assert_eq!(
//!     store.path_to_high_value("EVIL@CORP"),
//!     vec![Edge::new("U1", "G1", "MemberOf")]
//! );
//! ```

#![warn(clippy::all)]

pub mod algo;
pub mod classifier;
pub mod config;
pub mod graph;

// Re-export main types for convenience
pub use graph::{
    Edge, EdgeType, Endpoint, GraphError, GraphResult, GraphStatistics, GraphStore, Node, NodeId,
    NodeType, PropertyMap,
};

pub use algo::{EscalationOptions, EscalationPath, GraphPath, PathStep};

pub use classifier::{
    is_high_value_target, BuiltinClassifier, ClassifierPolicy, HighValuePredicate, HighValueRule,
};

pub use config::{AnalysisConfig, ConfigError, ConfigResult, DuplicateNamePolicy};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
