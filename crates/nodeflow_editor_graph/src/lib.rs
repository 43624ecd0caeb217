// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node graph core for `Nodeflow` Editor.
//!
//! Users place typed nodes on a canvas, wire outputs to inputs, and compile
//! the graph into an ordered list of statements that can be run.
//!
//! ## Architecture
//!
//! - [`Graph`]: append-only node store; links are node IDs held by the
//!   consuming node
//! - [`NodeBehavior`] / [`NodeRegistry`]: pluggable node kinds
//! - [`compiler`]: priority-ordered linearization into a [`Program`]
//! - [`evaluation`]: sandboxed interpreter for programs
//! - [`interaction`]: drag and link gestures
//! - [`render`]: drawing contract, with an egui implementation in [`ui`]
//! - [`EditorSession`]: owns all of the above for one editor

pub mod node;
pub mod nodes;
pub mod statement;
pub mod graph;
pub mod compiler;
pub mod evaluation;
pub mod interaction;
pub mod render;
pub mod session;
pub mod ui;

pub use node::{Node, NodeBehavior, NodeId, NodeKindDef, NodeRegistry};
pub use statement::{Program, Statement, Value};
pub use graph::Graph;
pub use evaluation::{Evaluator, Interpreter};
pub use render::RenderAdapter;
pub use session::{Action, ActionOutcome, EditorError, EditorSession, RunOutcome};
