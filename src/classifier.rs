//! High-value target classification
//!
//! A classifier is a pure predicate over a single node. The escalation search
//! is generic over [`HighValuePredicate`], so callers can substitute their own
//! policy; [`BuiltinClassifier`] carries the stock rules and
//! [`ClassifierPolicy`] expresses the same kind of rules as data.

use crate::graph::Node;
use serde::{Deserialize, Serialize};

pub const GROUP: &str = "Group";
pub const USER: &str = "User";
pub const COMPUTER: &str = "Computer";

/// Group name fragments that mark a privileged group
pub const PRIVILEGED_GROUPS: [&str; 3] = ["DOMAIN ADMINS", "ENTERPRISE ADMINS", "SCHEMA ADMINS"];

/// Name prefix of the built-in administrator account
pub const ADMINISTRATOR_PREFIX: &str = "ADMINISTRATOR@";

pub const DISTINGUISHED_NAME: &str = "distinguishedname";
pub const DOMAIN_CONTROLLERS_OU: &str = "OU=Domain Controllers";

/// Hostname fragment treated as a domain controller.
///
/// Matches anywhere in the name, so unrelated hosts containing "DC" are
/// classified as well.
pub const DC_NAME_FRAGMENT: &str = "DC";

/// Decides whether a node is a privileged target
pub trait HighValuePredicate {
    fn is_high_value(&self, node: &Node) -> bool;
}

impl<F> HighValuePredicate for F
where
    F: Fn(&Node) -> bool,
{
    fn is_high_value(&self, node: &Node) -> bool {
        self(node)
    }
}

/// The stock rules: privileged groups, the administrator account and
/// domain controllers. Matching is case-sensitive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuiltinClassifier;

impl HighValuePredicate for BuiltinClassifier {
    fn is_high_value(&self, node: &Node) -> bool {
        match node.node_type.as_str() {
            GROUP => PRIVILEGED_GROUPS
                .iter()
                .any(|fragment| node.name.contains(fragment)),
            USER => node.name.starts_with(ADMINISTRATOR_PREFIX),
            COMPUTER => {
                let in_dc_ou = node
                    .get_property(DISTINGUISHED_NAME)
                    .is_some_and(|dn| dn.contains(DOMAIN_CONTROLLERS_OU));
                in_dc_ou || node.name.contains(DC_NAME_FRAGMENT)
            }
            _ => false,
        }
    }
}

/// Classify with the stock rules
pub fn is_high_value_target(node: &Node) -> bool {
    BuiltinClassifier.is_high_value(node)
}

/// A single data-driven classification rule, scoped to one node type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HighValueRule {
    /// Name contains `pattern`
    NameContains { node_type: String, pattern: String },
    /// Name starts with `pattern`
    NamePrefix { node_type: String, pattern: String },
    /// Property `key` exists and its value contains `pattern`
    PropertyContains {
        node_type: String,
        key: String,
        pattern: String,
    },
}

impl HighValueRule {
    pub fn node_type(&self) -> &str {
        match self {
            HighValueRule::NameContains { node_type, .. }
            | HighValueRule::NamePrefix { node_type, .. }
            | HighValueRule::PropertyContains { node_type, .. } => node_type,
        }
    }

    pub fn matches(&self, node: &Node) -> bool {
        if !node.is_type(self.node_type()) {
            return false;
        }
        match self {
            HighValueRule::NameContains { pattern, .. } => node.name.contains(pattern.as_str()),
            HighValueRule::NamePrefix { pattern, .. } => node.name.starts_with(pattern.as_str()),
            HighValueRule::PropertyContains { key, pattern, .. } => node
                .get_property(key)
                .is_some_and(|value| value.contains(pattern.as_str())),
        }
    }
}

/// Rule list; a node is high-value if any rule matches.
///
/// The default list reproduces [`BuiltinClassifier`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierPolicy {
    pub rules: Vec<HighValueRule>,
}

impl ClassifierPolicy {
    pub fn new(rules: Vec<HighValueRule>) -> Self {
        Self { rules }
    }

    /// A policy that never classifies anything as high-value
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }
}

impl Default for ClassifierPolicy {
    fn default() -> Self {
        let mut rules: Vec<HighValueRule> = PRIVILEGED_GROUPS
            .iter()
            .map(|fragment| HighValueRule::NameContains {
                node_type: GROUP.to_string(),
                pattern: fragment.to_string(),
            })
            .collect();

        rules.push(HighValueRule::NamePrefix {
            node_type: USER.to_string(),
            pattern: ADMINISTRATOR_PREFIX.to_string(),
        });
        rules.push(HighValueRule::PropertyContains {
            node_type: COMPUTER.to_string(),
            key: DISTINGUISHED_NAME.to_string(),
            pattern: DOMAIN_CONTROLLERS_OU.to_string(),
        });
        rules.push(HighValueRule::NameContains {
            node_type: COMPUTER.to_string(),
            pattern: DC_NAME_FRAGMENT.to_string(),
        });

        Self { rules }
    }
}

impl HighValuePredicate for ClassifierPolicy {
    fn is_high_value(&self, node: &Node) -> bool {
        self.rules.iter().any(|rule| rule.matches(node))
    }
}
