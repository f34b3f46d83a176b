//! Node implementation for the identity graph

use super::types::{NodeId, NodeType};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Open string-keyed property bag (e.g. `"distinguishedname"`)
pub type PropertyMap = HashMap<String, String>;

/// A node in the identity graph
///
/// Nodes have:
/// - A unique ID
/// - A type tag (User, Group, Computer, ...)
/// - A display name, used for lookups
/// - Properties (string key-value pairs)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier for this node
    pub id: NodeId,

    /// Category tag
    #[serde(rename = "type")]
    pub node_type: NodeType,

    /// Display name
    pub name: String,

    /// Properties associated with this node
    #[serde(default)]
    pub properties: PropertyMap,
}

impl Node {
    /// Create a new node with no properties
    pub fn new(id: impl Into<NodeId>, node_type: impl Into<NodeType>, name: impl Into<String>) -> Self {
        Node {
            id: id.into(),
            node_type: node_type.into(),
            name: name.into(),
            properties: PropertyMap::new(),
        }
    }

    /// Create a new node with properties
    pub fn new_with_properties(
        id: impl Into<NodeId>,
        node_type: impl Into<NodeType>,
        name: impl Into<String>,
        properties: PropertyMap,
    ) -> Self {
        Node {
            properties,
            ..Node::new(id, node_type, name)
        }
    }

    /// Check the node's type tag
    pub fn is_type(&self, node_type: &str) -> bool {
        self.node_type.as_str() == node_type
    }

    /// Get a property value
    pub fn get_property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// `"name [type]"`, the form used in query output
    pub fn describe(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.name, self.node_type)
    }
}
