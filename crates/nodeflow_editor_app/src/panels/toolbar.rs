// SPDX-License-Identifier: MIT OR Apache-2.0
//! Toolbar: add-node buttons followed by Compile and Run.

use nodeflow_editor_graph::{Action, NodeRegistry};

/// Toolbar above the canvas
#[derive(Debug, Default)]
pub struct Toolbar;

impl Toolbar {
    /// Create a new toolbar
    pub fn new() -> Self {
        Self
    }

    /// Draw the toolbar, returning the action clicked this frame
    pub fn ui(&mut self, ui: &mut egui::Ui, registry: &NodeRegistry) -> Option<Action> {
        let mut action = None;

        ui.horizontal_centered(|ui| {
            for kind in registry.kinds() {
                if ui
                    .button(&kind.name)
                    .on_hover_text(format!("Add a {} node", kind.name))
                    .clicked()
                {
                    action = Some(Action::AddNode(kind.id.clone()));
                }
            }

            ui.separator();

            if ui.button("Compile").clicked() {
                action = Some(Action::Compile);
            }
            if ui.button("Run").clicked() {
                action = Some(Action::Run);
            }
        });

        action
    }
}
