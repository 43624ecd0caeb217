// SPDX-License-Identifier: MIT OR Apache-2.0
//! Pointer gesture tracking: dragging nodes and drawing links.
//!
//! A drag and a link gesture are tracked independently, so a single press
//! can start both. Release always ends both.

use crate::graph::Graph;
use crate::node::NodeId;
use egui::{Pos2, Vec2};

/// Node being dragged
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragState {
    /// Node that follows the pointer
    pub node: NodeId,
    /// Pointer position relative to the node's corner at press time
    pub grab_offset: Vec2,
}

/// Link being drawn from a node's output connector
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConnectState {
    /// Node whose output is being linked
    pub source: NodeId,
    /// Current pointer position, for the preview line
    pub pointer: Pos2,
}

/// Transient gesture state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InteractionState {
    /// Active drag, if any
    pub drag: Option<DragState>,
    /// Active link gesture, if any
    pub connect: Option<ConnectState>,
}

impl InteractionState {
    /// Create an idle state
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether no gesture is active
    pub fn is_idle(&self) -> bool {
        self.drag.is_none() && self.connect.is_none()
    }

    /// Pointer pressed at `p`.
    ///
    /// Every node is tested in store order and a later match replaces an
    /// earlier one, so overlapping nodes resolve to the last in the store.
    pub fn press(&mut self, graph: &Graph, p: Pos2) {
        for node in graph.nodes() {
            if node.body_contains(p) {
                self.drag = Some(DragState {
                    node: node.id(),
                    grab_offset: p - node.position,
                });
            }
            if node.output_hit(p) {
                self.connect = Some(ConnectState {
                    source: node.id(),
                    pointer: p,
                });
            }
        }

        if let Some(drag) = &self.drag {
            tracing::debug!("Dragging {}", drag.node);
        }
        if let Some(connect) = &self.connect {
            tracing::debug!("Connecting from {}", connect.source);
        }
    }

    /// Pointer moved to `p`. Returns `true` if a redraw is required.
    pub fn motion(&mut self, graph: &mut Graph, p: Pos2) -> bool {
        let mut redraw = false;

        if let Some(drag) = self.drag {
            if let Some(node) = graph.node_mut(drag.node) {
                node.position = p - drag.grab_offset;
            }
            redraw = true;
        }

        if let Some(connect) = &mut self.connect {
            connect.pointer = p;
            redraw = true;
        }

        redraw
    }

    /// Pointer released at `p`. Links the gesture's source into every node
    /// whose input connector contains `p`, then clears all gesture state.
    ///
    /// Returns the nodes that received a link.
    pub fn release(&mut self, graph: &mut Graph, p: Pos2) -> Vec<NodeId> {
        let mut linked = Vec::new();

        if let Some(connect) = self.connect {
            let targets: Vec<NodeId> = graph
                .nodes()
                .iter()
                .filter(|node| node.input_hit(p))
                .map(|node| node.id())
                .collect();

            for target in targets {
                match graph.link(connect.source, target) {
                    Ok(()) => linked.push(target),
                    Err(err) => tracing::warn!("Dropped link: {err}"),
                }
            }
        }

        self.drag = None;
        self.connect = None;
        linked
    }
}
