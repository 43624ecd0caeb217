// SPDX-License-Identifier: MIT OR Apache-2.0
//! egui canvas for the node graph.
//!
//! Features:
//! - [`PainterAdapter`]: the render contract on top of an `egui::Painter`
//! - Pointer translation into session gestures
//! - One text field per value-capturing node, following the node around
//! - Status bar

use crate::node::{Node, NodeId, CONNECTOR_SIZE};
use crate::render::RenderAdapter;
use crate::session::EditorSession;
use crate::statement::Value;
use egui::{Color32, Pos2, Rect, Stroke, Vec2};
use std::collections::HashMap;

/// Canvas colours
const BACKGROUND: Color32 = Color32::from_rgb(0xe2, 0xe8, 0xf0);
const CONNECTOR_IDLE: Color32 = Color32::from_rgb(0xcb, 0xd5, 0xe1);
const CONNECTOR_LINKED: Color32 = Color32::from_rgb(0x22, 0xc5, 0x5e);
const PREVIEW: Color32 = Color32::from_rgb(0x6b, 0x72, 0x80);

/// Title placement relative to the node corner
const TITLE_OFFSET: Vec2 = Vec2::new(10.0, 20.0);
const TITLE_SIZE: f32 = 14.0;

/// Draws frames onto an egui painter.
///
/// Canvas coordinates are relative to the top-left of `canvas`.
pub struct PainterAdapter<'a> {
    painter: &'a egui::Painter,
    canvas: Rect,
}

impl<'a> PainterAdapter<'a> {
    /// Create an adapter drawing into `canvas`
    pub fn new(painter: &'a egui::Painter, canvas: Rect) -> Self {
        Self { painter, canvas }
    }

    fn to_screen(&self, p: Pos2) -> Pos2 {
        p + self.canvas.min.to_vec2()
    }

    fn line(&self, from: Pos2, to: Pos2, color: Color32) {
        self.painter.line_segment(
            [self.to_screen(from), self.to_screen(to)],
            Stroke::new(1.0, color),
        );
    }
}

impl RenderAdapter for PainterAdapter<'_> {
    fn draw_background(&mut self) {
        self.painter.rect_filled(self.canvas, 0.0, BACKGROUND);
    }

    fn draw_node_body(&mut self, node: &Node) {
        let rect = node.rect().translate(self.canvas.min.to_vec2());
        self.painter.rect_filled(rect, 0.0, Color32::WHITE);
        self.painter.rect_stroke(rect, 0.0, Stroke::new(1.0, Color32::BLACK));
        self.painter.text(
            rect.min + TITLE_OFFSET,
            egui::Align2::LEFT_BOTTOM,
            node.title(),
            egui::FontId::proportional(TITLE_SIZE),
            Color32::BLACK,
        );
    }

    fn draw_connector(&mut self, node: &Node, output_side: bool, connected: bool) {
        let anchor = if output_side {
            node.output_anchor()
        } else {
            node.input_anchor()
        };
        let fill = if connected { CONNECTOR_LINKED } else { CONNECTOR_IDLE };
        self.painter.circle(
            self.to_screen(anchor),
            CONNECTOR_SIZE,
            fill,
            Stroke::new(1.0, Color32::BLACK),
        );
    }

    fn draw_link_line(&mut self, from: Pos2, to: Pos2) {
        self.line(from, to, Color32::BLACK);
    }

    fn draw_preview_line(&mut self, from: Pos2, to: Pos2) {
        self.line(from, to, PREVIEW);
    }
}

/// Interactive graph canvas
pub struct GraphCanvas {
    /// Text currently shown in each value field
    field_text: HashMap<NodeId, String>,
    /// A gesture started on this canvas and has not been released
    tracking: bool,
    /// Show the status bar
    pub show_status_bar: bool,
}

impl GraphCanvas {
    /// Create a new canvas
    pub fn new() -> Self {
        Self {
            field_text: HashMap::new(),
            tracking: false,
            show_status_bar: true,
        }
    }

    /// Show the canvas. Returns `true` if anything on it changed.
    pub fn ui(&mut self, ui: &mut egui::Ui, session: &mut EditorSession) -> bool {
        let available = ui.available_rect_before_wrap();
        let size = session.canvas_size();
        let rect = if size == Vec2::ZERO {
            available
        } else {
            Rect::from_min_size(available.min, size.min(available.size()))
        };
        let response = ui.allocate_rect(rect, egui::Sense::click_and_drag());

        let mut changed = self.handle_input(ui, &response, rect, session);

        let painter = ui.painter_at(rect);
        session.render(&mut PainterAdapter::new(&painter, rect));

        changed |= self.value_fields(ui, rect, session);

        if self.show_status_bar {
            self.draw_status_bar(&painter, rect, session);
        }

        if changed {
            ui.ctx().request_repaint();
        }
        changed
    }

    fn handle_input(
        &mut self,
        ui: &egui::Ui,
        response: &egui::Response,
        rect: Rect,
        session: &mut EditorSession,
    ) -> bool {
        let (pressed, released, moved, pointer) = ui.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
                i.pointer.delta() != Vec2::ZERO,
                i.pointer.interact_pos(),
            )
        });
        let Some(pointer) = pointer else {
            return false;
        };
        let p = (pointer - rect.min).to_pos2();

        let mut redraw = false;
        if pressed && response.hovered() {
            self.tracking = true;
            redraw |= session.pointer_down(p);
        }
        if moved {
            redraw |= session.pointer_move(p);
        }
        if released && (self.tracking || response.hovered()) {
            self.tracking = false;
            redraw |= session.pointer_up(p);
        }
        redraw
    }

    fn value_fields(&mut self, ui: &egui::Ui, rect: Rect, session: &mut EditorSession) -> bool {
        let fields: Vec<_> = session
            .value_nodes()
            .map(|node| {
                let current = node.behavior().value().map(ToString::to_string).unwrap_or_default();
                (node.id(), node.field_anchor(), node.field_width(), current)
            })
            .collect();

        let mut changed = false;
        for (id, anchor, width, current) in fields {
            let text = self.field_text.entry(id).or_insert(current);
            let edited = egui::Area::new(egui::Id::new(("value_field", id.index())))
                .fixed_pos(rect.min + anchor.to_vec2())
                .order(egui::Order::Foreground)
                .show(ui.ctx(), |ui| {
                    ui.add(egui::TextEdit::singleline(&mut *text).desired_width(width))
                        .changed()
                })
                .inner;

            if edited {
                changed = true;
                if let Err(err) = session.set_value(id, Value::parse_input(text)) {
                    tracing::warn!("Failed to capture value: {err}");
                }
            }
        }
        changed
    }

    fn draw_status_bar(&self, painter: &egui::Painter, rect: Rect, session: &EditorSession) {
        let graph = session.graph();
        let gesture = match (&session.interaction().drag, &session.interaction().connect) {
            (Some(drag), _) => format!(" | Dragging {}", drag.node),
            (None, Some(connect)) => format!(" | Linking from {}", connect.source),
            (None, None) => String::new(),
        };

        painter.text(
            Pos2::new(rect.left() + 5.0, rect.bottom() - 10.0),
            egui::Align2::LEFT_CENTER,
            format!(
                "Nodes: {} | Links: {}{}",
                graph.node_count(),
                graph.link_count(),
                gesture,
            ),
            egui::FontId::proportional(11.0),
            Color32::from_gray(90),
        );
    }
}

impl Default for GraphCanvas {
    fn default() -> Self {
        Self::new()
    }
}
