use super::edge::Edge;
use super::node::Node;
use crate::error::InvalidGraphError;
use ahash::{AHashMap, AHashSet};

/// The node and edge collections of a flow, owned in one place.
///
/// Insertion goes through [`FlowGraph::insert_node`] and
/// [`FlowGraph::insert_edge`], which reject anything that would turn the
/// flow into something other than a tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlowGraph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl FlowGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn root(&self) -> Option<&Node> {
        self.nodes.iter().find(|n| n.is_root())
    }

    pub fn has_root(&self) -> bool {
        self.root().is_some()
    }

    /// Id of the node feeding into `id`, if any.
    pub fn parent_of(&self, id: &str) -> Option<&str> {
        self.edges
            .iter()
            .find(|e| e.target == id)
            .map(|e| e.source.as_str())
    }

    /// Targets of the edges leaving `id`, in insertion order.
    pub fn children_of<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.edges
            .iter()
            .filter(move |e| e.source == id)
            .map(|e| e.target.as_str())
    }

    pub fn insert_node(&mut self, node: Node) -> Result<(), InvalidGraphError> {
        if self.node(&node.id).is_some() {
            return Err(InvalidGraphError::DuplicateNodeId(node.id));
        }
        if node.is_root() && self.has_root() {
            return Err(InvalidGraphError::MultipleRoots(2));
        }
        self.nodes.push(node);
        Ok(())
    }

    pub fn insert_edge(&mut self, edge: Edge) -> Result<(), InvalidGraphError> {
        self.check_edge(&edge)?;
        self.edges.push(edge);
        Ok(())
    }

    /// Inserts a node together with the edge leading to it, or neither.
    pub fn attach(&mut self, node: Node, edge: Option<Edge>) -> Result<(), InvalidGraphError> {
        self.insert_node(node)?;
        if let Some(edge) = edge {
            if let Err(e) = self.insert_edge(edge) {
                self.nodes.pop();
                return Err(e);
            }
        }
        Ok(())
    }

    /// Swaps in a laid-out copy of the node list. Ids and order must match.
    pub(crate) fn replace_nodes(&mut self, nodes: Vec<Node>) {
        debug_assert_eq!(nodes.len(), self.nodes.len());
        self.nodes = nodes;
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
    }

    fn check_edge(&self, edge: &Edge) -> Result<(), InvalidGraphError> {
        for endpoint in [&edge.source, &edge.target] {
            if self.node(endpoint).is_none() {
                return Err(InvalidGraphError::UnknownNode {
                    missing_node_id: endpoint.clone(),
                    edge_id: edge.id.clone(),
                });
            }
        }
        if self.edges.iter().any(|e| e.id == edge.id) {
            return Err(InvalidGraphError::DuplicateEdgeId(edge.id.clone()));
        }
        if let Some(existing) = self.parent_of(&edge.target) {
            return Err(InvalidGraphError::MultipleParents {
                node_id: edge.target.clone(),
                existing_parent: existing.to_string(),
                new_parent: edge.source.clone(),
            });
        }
        Ok(())
    }

    /// Checks every structural invariant of the whole flow.
    ///
    /// Useful after bulk edits that bypassed the checked insertion methods.
    pub fn validate(&self) -> Result<(), InvalidGraphError> {
        let mut ids = AHashSet::with_capacity(self.nodes.len());
        for node in &self.nodes {
            if !ids.insert(node.id.as_str()) {
                return Err(InvalidGraphError::DuplicateNodeId(node.id.clone()));
            }
        }

        let roots = self.nodes.iter().filter(|n| n.is_root()).count();
        if roots > 1 {
            return Err(InvalidGraphError::MultipleRoots(roots));
        }

        let mut edge_ids = AHashSet::with_capacity(self.edges.len());
        let mut parents: AHashMap<&str, &str> = AHashMap::with_capacity(self.edges.len());
        for edge in &self.edges {
            for endpoint in [&edge.source, &edge.target] {
                if !ids.contains(endpoint.as_str()) {
                    return Err(InvalidGraphError::UnknownNode {
                        missing_node_id: endpoint.clone(),
                        edge_id: edge.id.clone(),
                    });
                }
            }
            if !edge_ids.insert(edge.id.as_str()) {
                return Err(InvalidGraphError::DuplicateEdgeId(edge.id.clone()));
            }
            if let Some(existing) = parents.insert(edge.target.as_str(), edge.source.as_str()) {
                return Err(InvalidGraphError::MultipleParents {
                    node_id: edge.target.clone(),
                    existing_parent: existing.to_string(),
                    new_parent: edge.source.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Builds a graph from raw collections without checking them.
///
/// Callers that accept such input should run [`FlowGraph::validate`].
impl From<(Vec<Node>, Vec<Edge>)> for FlowGraph {
    fn from((nodes, edges): (Vec<Node>, Vec<Edge>)) -> Self {
        Self { nodes, edges }
    }
}
