// SPDX-License-Identifier: MIT OR Apache-2.0
//! Editor panels surrounding the graph canvas.

pub mod output;
pub mod toolbar;

pub use output::OutputPanel;
pub use toolbar::Toolbar;
