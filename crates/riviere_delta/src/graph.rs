//! The data-flow graph.
//!
//! Nodes, edges and subgraphs live in insertion-order vectors (serialized
//! order is the deterministic construction order) with an id index on the
//! side. Edge admission checks both endpoints; `validate` re-checks the
//! whole-graph invariants before the graph leaves the analyzer.

use crate::node::{DfdNode, NodeId, NodeKind};
use riviere_socle::{CompactString, FxHashMap, String};
use serde::Serialize;
use thiserror::Error;

/// Graph construction/validation failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("duplicate node id: {0}")]
    DuplicateNode(String),
    #[error("edge endpoint does not exist: {0}")]
    MissingEndpoint(String),
    #[error("subgraph parent does not exist: {0}")]
    MissingParent(String),
}

/// One directed edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DfdEdge {
    pub from: NodeId,
    pub to: NodeId,
    pub label: CompactString,
}

/// One subgraph in the nesting tree.
#[derive(Debug, Clone, Serialize)]
pub struct SubgraphDef {
    pub id: NodeId,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<NodeId>,
}

/// The assembled data-flow diagram for one component.
#[derive(Debug, Default, Serialize)]
pub struct DfdGraph {
    /// Component name the graph was built for.
    pub component: String,
    nodes: Vec<DfdNode>,
    edges: Vec<DfdEdge>,
    subgraphs: Vec<SubgraphDef>,
    #[serde(skip)]
    index: FxHashMap<NodeId, usize>,
}

impl DfdGraph {
    pub fn new(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            ..Default::default()
        }
    }

    /// Admit a node. Ids must be unique per graph.
    pub fn add_node(&mut self, node: DfdNode) -> Result<NodeId, GraphError> {
        if self.index.contains_key(&node.id) {
            return Err(GraphError::DuplicateNode(String::new(node.id.as_str())));
        }
        let id = node.id.clone();
        self.index.insert(id.clone(), self.nodes.len());
        self.nodes.push(node);
        Ok(id)
    }

    /// Admit an edge. Both endpoints must already exist.
    pub fn add_edge(
        &mut self,
        from: &NodeId,
        to: &NodeId,
        label: impl Into<CompactString>,
    ) -> Result<(), GraphError> {
        for endpoint in [from, to] {
            if !self.index.contains_key(endpoint) {
                return Err(GraphError::MissingEndpoint(String::new(endpoint.as_str())));
            }
        }
        self.edges.push(DfdEdge {
            from: from.clone(),
            to: to.clone(),
            label: label.into(),
        });
        Ok(())
    }

    /// Admit a subgraph: registers the nesting entry and its anchor node so
    /// the subgraph can be an edge endpoint.
    pub fn add_subgraph(
        &mut self,
        id: NodeId,
        label: impl Into<String>,
        parent: Option<NodeId>,
    ) -> Result<NodeId, GraphError> {
        if let Some(parent_id) = &parent {
            if !self.index.contains_key(parent_id) {
                return Err(GraphError::MissingParent(String::new(parent_id.as_str())));
            }
        }
        let label = label.into();
        let id = self.add_node(DfdNode::new(id, label.clone(), NodeKind::Subgraph))?;
        self.subgraphs.push(SubgraphDef {
            id: id.clone(),
            label,
            parent,
        });
        Ok(id)
    }

    #[inline]
    pub fn node(&self, id: &NodeId) -> Option<&DfdNode> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    #[inline]
    pub fn node_mut(&mut self, id: &NodeId) -> Option<&mut DfdNode> {
        self.index.get(id).map(|&i| &mut self.nodes[i])
    }

    #[inline]
    pub fn contains(&self, id: &NodeId) -> bool {
        self.index.contains_key(id)
    }

    #[inline]
    pub fn nodes(&self) -> &[DfdNode] {
        &self.nodes
    }

    #[inline]
    pub fn edges(&self) -> &[DfdEdge] {
        &self.edges
    }

    #[inline]
    pub fn subgraphs(&self) -> &[SubgraphDef] {
        &self.subgraphs
    }

    /// Whether an edge with this exact shape is already present.
    pub fn has_edge(&self, from: &NodeId, to: &NodeId, label: &str) -> bool {
        self.edges
            .iter()
            .any(|e| &e.from == from && &e.to == to && e.label == label)
    }

    /// Find nodes by kind, in insertion order.
    pub fn nodes_of_kind(&self, kind: NodeKind) -> impl Iterator<Item = &DfdNode> {
        self.nodes.iter().filter(move |n| n.kind == kind)
    }

    /// Re-check the whole-graph invariants: unique ids, edge endpoints
    /// present, subgraph parents present.
    pub fn validate(&self) -> Result<(), GraphError> {
        let mut seen = FxHashMap::default();
        for (i, node) in self.nodes.iter().enumerate() {
            if seen.insert(node.id.clone(), i).is_some() {
                return Err(GraphError::DuplicateNode(String::new(node.id.as_str())));
            }
        }
        for edge in &self.edges {
            for endpoint in [&edge.from, &edge.to] {
                if !seen.contains_key(endpoint) {
                    return Err(GraphError::MissingEndpoint(String::new(endpoint.as_str())));
                }
            }
        }
        for sub in &self.subgraphs {
            if let Some(parent) = &sub.parent {
                if !seen.contains_key(parent) {
                    return Err(GraphError::MissingParent(String::new(parent.as_str())));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, kind: NodeKind) -> DfdNode {
        DfdNode::new(NodeId::new(id), id, kind)
    }

    #[test]
    fn test_duplicate_node_rejected() {
        let mut graph = DfdGraph::new("Test");
        graph.add_node(node("store-1", NodeKind::DataStore)).unwrap();
        let err = graph.add_node(node("store-1", NodeKind::DataStore));
        assert!(matches!(err, Err(GraphError::DuplicateNode(_))));
    }

    #[test]
    fn test_edge_requires_endpoints() {
        let mut graph = DfdGraph::new("Test");
        let store = graph.add_node(node("store-1", NodeKind::DataStore)).unwrap();
        let ghost = NodeId::new("process-9");
        assert!(matches!(
            graph.add_edge(&store, &ghost, "display"),
            Err(GraphError::MissingEndpoint(_))
        ));

        let process = graph.add_node(node("process-1", NodeKind::Process)).unwrap();
        graph.add_edge(&store, &process, "display").unwrap();
        assert!(graph.has_edge(&store, &process, "display"));
    }

    #[test]
    fn test_subgraph_anchor_is_edge_endpoint() {
        let mut graph = DfdGraph::new("Test");
        let store = graph.add_node(node("store-1", NodeKind::DataStore)).unwrap();
        let sub = graph
            .add_subgraph(NodeId::new("subgraph-1"), "if: visible", None)
            .unwrap();
        graph.add_edge(&store, &sub, "controls").unwrap();

        assert_eq!(graph.subgraphs().len(), 1);
        assert_eq!(graph.node(&sub).unwrap().kind, NodeKind::Subgraph);
        graph.validate().unwrap();
    }

    #[test]
    fn test_subgraph_parent_must_exist() {
        let mut graph = DfdGraph::new("Test");
        let err = graph.add_subgraph(
            NodeId::new("subgraph-1"),
            "loop",
            Some(NodeId::new("subgraph-0")),
        );
        assert!(matches!(err, Err(GraphError::MissingParent(_))));
    }

    #[test]
    fn test_validate_passes_on_consistent_graph() {
        let mut graph = DfdGraph::new("Test");
        let a = graph.add_node(node("store-1", NodeKind::DataStore)).unwrap();
        let b = graph.add_node(node("output-1", NodeKind::ExternalOutput)).unwrap();
        graph.add_edge(&a, &b, "display").unwrap();
        graph.validate().unwrap();
    }
}
