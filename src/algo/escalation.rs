//! Escalation search: nearest path to a high-value target

use super::pathfinding::GraphPath;
use super::resolve;
use crate::classifier::{BuiltinClassifier, HighValuePredicate};
use crate::graph::{Edge, Endpoint, GraphResult, GraphStore, Node};
use privgraph_traversal::{nearest_match, SearchOptions};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Escalation search settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EscalationOptions {
    /// Report a high-value source as a zero-hop result instead of searching
    /// past it
    pub include_source: bool,
    /// Hop limit; `None` searches the whole reachable graph
    pub max_depth: Option<usize>,
}

impl From<EscalationOptions> for SearchOptions {
    fn from(options: EscalationOptions) -> Self {
        SearchOptions {
            include_source: options.include_source,
            max_depth: options.max_depth,
        }
    }
}

/// The edges leading from the source to the nearest high-value node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EscalationPath<'a> {
    pub source: &'a Node,
    pub target: &'a Node,
    pub edges: Vec<&'a Edge>,
}

impl<'a> EscalationPath<'a> {
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Owned copies of the path's edges, source to target
    pub fn to_edges(&self) -> Vec<Edge> {
        self.edges.iter().map(|&edge| edge.clone()).collect()
    }
}

impl<'a> From<GraphPath<'a>> for EscalationPath<'a> {
    fn from(path: GraphPath<'a>) -> Self {
        EscalationPath {
            source: path.start,
            target: path.end(),
            edges: path.edges(),
        }
    }
}

/// Breadth-first search from `source_name` for the nearest node accepted by
/// `classifier`.
///
/// Unless `options.include_source` is set the source never counts as a
/// match, even when it is high-value itself. `Ok(None)` means no high-value
/// node is reachable.
pub fn try_path_to_high_value<'a, P>(
    store: &'a GraphStore,
    source_name: &str,
    classifier: &P,
    options: EscalationOptions,
) -> GraphResult<Option<EscalationPath<'a>>>
where
    P: HighValuePredicate + ?Sized,
{
    let source = resolve(store, source_name, Endpoint::Source)?;

    let found = nearest_match(store, source, options.into(), |idx| {
        store
            .node_at(idx)
            .is_some_and(|node| classifier.is_high_value(node))
    });

    let path = found
        .and_then(|result| GraphPath::from_result(store, &result))
        .map(EscalationPath::from);

    match &path {
        Some(path) => debug!(
            "nearest high-value target from {:?}: {} ({} hops)",
            source_name,
            path.target,
            path.len()
        ),
        None => debug!("no high-value target reachable from {:?}", source_name),
    }
    Ok(path)
}

/// Edges of the nearest path to a high-value node under the stock rules;
/// empty when nothing is reachable or the name does not resolve
pub fn path_to_high_value(store: &GraphStore, source_name: &str) -> Vec<Edge> {
    match try_path_to_high_value(store, source_name, &BuiltinClassifier, EscalationOptions::default()) {
        Ok(path) => path.map(|p| p.to_edges()).unwrap_or_default(),
        Err(e) => {
            warn!("{}", e);
            Vec::new()
        }
    }
}

/// Every stored node accepted by `classifier`, in insertion order
pub fn high_value_nodes<'a, P>(store: &'a GraphStore, classifier: &P) -> Vec<&'a Node>
where
    P: HighValuePredicate + ?Sized,
{
    store
        .all_nodes()
        .into_iter()
        .filter(|node| classifier.is_high_value(node))
        .collect()
}

impl GraphStore {
    /// See [`path_to_high_value`]
    pub fn path_to_high_value(&self, source_name: &str) -> Vec<Edge> {
        path_to_high_value(self, source_name)
    }

    /// Escalation search with a custom classifier and options
    pub fn path_to_high_value_with<P>(
        &self,
        source_name: &str,
        classifier: &P,
        options: EscalationOptions,
    ) -> GraphResult<Option<EscalationPath<'_>>>
    where
        P: HighValuePredicate + ?Sized,
    {
        try_path_to_high_value(self, source_name, classifier, options)
    }
}
