// SPDX-License-Identifier: MIT OR Apache-2.0
//! Output panel: the published program and what running it printed.

use egui::{Color32, RichText};

/// Result of the last run shown under the program text
#[derive(Debug, Clone, PartialEq, Default)]
enum RunResult {
    /// Nothing run since the last compile
    #[default]
    None,
    /// Lines printed by the program
    Printed(Vec<String>),
    /// The run failed
    Failed(String),
}

/// Output panel
#[derive(Debug, Default)]
pub struct OutputPanel {
    run: RunResult,
}

impl OutputPanel {
    /// Create a new output panel
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the previous run, e.g. after recompiling
    pub fn clear_run(&mut self) {
        self.run = RunResult::None;
    }

    /// Show what a run printed
    pub fn set_printed(&mut self, lines: Vec<String>) {
        self.run = RunResult::Printed(lines);
    }

    /// Show a failure message
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.run = RunResult::Failed(message.into());
    }

    /// Draw the panel
    pub fn ui(&mut self, ui: &mut egui::Ui, published: &str) {
        ui.heading("Program");
        let mut text = published;
        ui.add(
            egui::TextEdit::multiline(&mut text)
                .code_editor()
                .desired_width(f32::INFINITY)
                .desired_rows(12),
        );

        ui.separator();
        ui.heading("Output");

        egui::ScrollArea::vertical().show(ui, |ui| match &self.run {
            RunResult::None => {
                ui.weak("Run the program to see its output");
            }
            RunResult::Printed(lines) if lines.is_empty() => {
                ui.weak("(no output)");
            }
            RunResult::Printed(lines) => {
                for line in lines {
                    ui.monospace(line);
                }
            }
            RunResult::Failed(message) => {
                ui.label(RichText::new(message).color(Color32::from_rgb(220, 80, 80)));
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_result_transitions() {
        let mut panel = OutputPanel::new();
        assert_eq!(panel.run, RunResult::None);

        panel.set_printed(vec!["42".to_string()]);
        assert_eq!(panel.run, RunResult::Printed(vec!["42".to_string()]));

        panel.set_error("nd0 is not defined");
        assert_eq!(panel.run, RunResult::Failed("nd0 is not defined".to_string()));

        panel.clear_run();
        assert_eq!(panel.run, RunResult::None);
    }
}
