// SPDX-License-Identifier: MIT OR Apache-2.0
//! Graph store holding every node and the link relation between them.

use crate::node::{Node, NodeBehavior, NodeId};
use egui::Pos2;

/// Append-only, insertion-ordered node store.
///
/// Nodes are addressed by [`NodeId`], which is their index in the store.
/// Links are stored on the consuming node as IDs of the nodes it reads.
#[derive(Debug, Default)]
pub struct Graph {
    nodes: Vec<Node>,
}

impl Graph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node, assigning the next identifier
    pub fn add_node(&mut self, position: Pos2, behavior: Box<dyn NodeBehavior>) -> NodeId {
        let id = NodeId::from_index(self.nodes.len());
        self.nodes.push(Node::new(id, position, behavior));
        id
    }

    /// Get a node by ID
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a mutable node by ID
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// All nodes in insertion order
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Record that `target` consumes `source`'s output.
    ///
    /// Duplicate and self links are accepted.
    pub fn link(&mut self, source: NodeId, target: NodeId) -> Result<(), GraphError> {
        if self.node(source).is_none() {
            return Err(GraphError::NodeNotFound(source));
        }
        let target_node = self
            .node_mut(target)
            .ok_or(GraphError::NodeNotFound(target))?;
        target_node.links.push(source);
        target_node.connected = true;

        if let Some(source_node) = self.node_mut(source) {
            source_node.connected = true;
        }

        tracing::debug!("Linked {source} -> {target}");
        Ok(())
    }

    /// Every link as `(source, target)`, grouped by target in store order
    pub fn links(&self) -> impl Iterator<Item = (&Node, &Node)> + '_ {
        self.nodes.iter().flat_map(move |target| {
            target
                .links
                .iter()
                .filter_map(move |source| self.node(*source).map(|source| (source, target)))
        })
    }

    /// Number of links
    pub fn link_count(&self) -> usize {
        self.nodes.iter().map(|node| node.links.len()).sum()
    }
}

/// Error when mutating the graph
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// Node not found
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),
}
