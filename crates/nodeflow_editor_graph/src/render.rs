// SPDX-License-Identifier: MIT OR Apache-2.0
//! Drawing contract between the graph and a drawing surface.

use crate::graph::Graph;
use crate::interaction::InteractionState;
use crate::node::Node;
use egui::Pos2;

/// A surface the editor can draw a frame on
pub trait RenderAdapter {
    /// Clear and paint the canvas background
    fn draw_background(&mut self);

    /// Paint a node's body and title
    fn draw_node_body(&mut self, node: &Node);

    /// Paint a connector on the output (right) or input (left) edge
    fn draw_connector(&mut self, node: &Node, output_side: bool, connected: bool);

    /// Paint a committed link
    fn draw_link_line(&mut self, from: Pos2, to: Pos2);

    /// Paint the live preview of a link being drawn
    fn draw_preview_line(&mut self, from: Pos2, to: Pos2);
}

/// Draw one full frame: background, node bodies with their connectors, the
/// link preview, then committed links.
pub fn render_frame(graph: &Graph, interaction: &InteractionState, adapter: &mut dyn RenderAdapter) {
    adapter.draw_background();

    for node in graph.nodes() {
        adapter.draw_node_body(node);
        let sides = node.behavior().connectors();
        if sides.input {
            adapter.draw_connector(node, false, node.connected);
        }
        if sides.output {
            adapter.draw_connector(node, true, node.connected);
        }
    }

    if let Some(connect) = &interaction.connect {
        if let Some(source) = graph.node(connect.source) {
            adapter.draw_preview_line(source.link_start(), connect.pointer);
        }
    }

    for (source, target) in graph.links() {
        adapter.draw_link_line(source.link_start(), target.link_end());
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::node::NodeId;
    use crate::nodes::{PrintNode, VariableNode};

    /// Draw call captured by [`RecordingAdapter`]
    #[derive(Debug, Clone, PartialEq)]
    pub(crate) enum DrawCall {
        Background,
        Body(NodeId),
        Connector(NodeId, bool, bool),
        Link(Pos2, Pos2),
        Preview(Pos2, Pos2),
    }

    /// Adapter that records every call in order
    #[derive(Debug, Default)]
    pub(crate) struct RecordingAdapter {
        pub(crate) calls: Vec<DrawCall>,
    }

    impl RenderAdapter for RecordingAdapter {
        fn draw_background(&mut self) {
            self.calls.push(DrawCall::Background);
        }

        fn draw_node_body(&mut self, node: &Node) {
            self.calls.push(DrawCall::Body(node.id()));
        }

        fn draw_connector(&mut self, node: &Node, output_side: bool, connected: bool) {
            self.calls.push(DrawCall::Connector(node.id(), output_side, connected));
        }

        fn draw_link_line(&mut self, from: Pos2, to: Pos2) {
            self.calls.push(DrawCall::Link(from, to));
        }

        fn draw_preview_line(&mut self, from: Pos2, to: Pos2) {
            self.calls.push(DrawCall::Preview(from, to));
        }
    }

    #[test]
    fn test_empty_graph_draws_background_only() {
        let mut adapter = RecordingAdapter::default();
        render_frame(&Graph::new(), &InteractionState::new(), &mut adapter);
        assert_eq!(adapter.calls, vec![DrawCall::Background]);
    }

    #[test]
    fn test_frame_order() {
        let mut graph = Graph::new();
        let var = graph.add_node(Pos2::new(10.0, 10.0), VariableNode::boxed());
        let print = graph.add_node(Pos2::new(300.0, 10.0), PrintNode::boxed());
        graph.link(var, print).unwrap();

        let mut interaction = InteractionState::new();
        interaction.press(&graph, Pos2::new(212.0, 60.0));
        interaction.motion(&mut graph, Pos2::new(250.0, 90.0));

        let mut adapter = RecordingAdapter::default();
        render_frame(&graph, &interaction, &mut adapter);

        assert_eq!(
            adapter.calls,
            vec![
                DrawCall::Background,
                DrawCall::Body(var),
                DrawCall::Connector(var, true, true),
                DrawCall::Body(print),
                DrawCall::Connector(print, false, true),
                DrawCall::Preview(Pos2::new(220.0, 60.0), Pos2::new(250.0, 90.0)),
                DrawCall::Link(Pos2::new(220.0, 60.0), Pos2::new(290.0, 60.0)),
            ]
        );
    }
}
