// SPDX-License-Identifier: MIT OR Apache-2.0
//! Editor session: the graph, the gesture state and the published program.
//!
//! Hosts own one [`EditorSession`] and feed it pointer events and toolbar
//! actions. Methods that change what is on screen return `true` when the
//! host should redraw.

use crate::compiler;
use crate::evaluation::{EvaluationError, Evaluator};
use crate::graph::Graph;
use crate::interaction::InteractionState;
use crate::node::{Node, NodeId, NodeRegistry};
use crate::nodes::create_default_registry;
use crate::render::{render_frame, RenderAdapter};
use crate::statement::{Program, Value};
use egui::{Pos2, Vec2};

/// Toolbar action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Add a node of the given registry kind at its default position
    AddNode(String),
    /// Compile the graph and publish the result
    Compile,
    /// Run the published program
    Run,
}

/// What an [`Action`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// A node was added
    NodeAdded(NodeId),
    /// The graph was compiled and published
    Compiled,
    /// The published program was handed to the evaluator, or skipped
    Ran(RunOutcome),
}

/// Result of the run action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Nothing published, or the published text is blank
    Skipped,
    /// The evaluator ran the program
    Executed,
}

/// Editor session state
#[derive(Debug)]
pub struct EditorSession {
    registry: NodeRegistry,
    graph: Graph,
    interaction: InteractionState,
    canvas_size: Vec2,
    published: Option<Program>,
}

impl EditorSession {
    /// Create a session using the given node kinds
    pub fn new(registry: NodeRegistry) -> Self {
        Self {
            registry,
            graph: Graph::new(),
            interaction: InteractionState::new(),
            canvas_size: Vec2::ZERO,
            published: None,
        }
    }

    /// Available node kinds
    pub fn registry(&self) -> &NodeRegistry {
        &self.registry
    }

    /// The graph store
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Current gesture state
    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    /// Drawable canvas size
    pub fn canvas_size(&self) -> Vec2 {
        self.canvas_size
    }

    /// Add a node of `kind` at the kind's default position
    pub fn add_node(&mut self, kind: &str) -> Result<NodeId> {
        let position = self
            .registry
            .get(kind)
            .map(|def| def.default_position)
            .ok_or_else(|| EditorError::UnknownNodeKind(kind.to_string()))?;
        self.add_node_at(kind, position)
    }

    /// Add a node of `kind` at `position`
    pub fn add_node_at(&mut self, kind: &str, position: Pos2) -> Result<NodeId> {
        let def = self
            .registry
            .get(kind)
            .ok_or_else(|| EditorError::UnknownNodeKind(kind.to_string()))?;
        let id = self.graph.add_node(position, (def.constructor)());
        tracing::debug!("Added {} node {id} at {position:?}", def.name);
        Ok(id)
    }

    /// Store a captured value on a node
    pub fn set_value(&mut self, id: NodeId, value: Value) -> Result<()> {
        let node = self.graph.node_mut(id).ok_or(EditorError::NodeNotFound(id))?;
        if node.behavior_mut().set_value(value) {
            Ok(())
        } else {
            Err(EditorError::NoValue(id))
        }
    }

    /// Compile the graph and publish the program
    pub fn compile(&mut self) -> &Program {
        let program = compiler::compile(&self.graph);
        tracing::info!(
            "Compiled {} nodes into {} statements",
            self.graph.node_count(),
            program.statements().count()
        );
        self.published.insert(program)
    }

    /// Last published program
    pub fn published(&self) -> Option<&Program> {
        self.published.as_ref()
    }

    /// Text of the last published program, empty if nothing was compiled
    pub fn published_text(&self) -> String {
        self.published.as_ref().map(Program::text).unwrap_or_default()
    }

    /// Hand the published program to `evaluator` unless it is blank
    pub fn run(&self, evaluator: &mut dyn Evaluator) -> Result<RunOutcome> {
        let Some(program) = self.published.as_ref().filter(|p| !p.is_blank()) else {
            tracing::debug!("Nothing to run");
            return Ok(RunOutcome::Skipped);
        };

        evaluator.evaluate(program)?;
        tracing::info!("Ran {} statements", program.statements().count());
        Ok(RunOutcome::Executed)
    }

    /// Perform a toolbar action
    pub fn perform(&mut self, action: Action, evaluator: &mut dyn Evaluator) -> Result<ActionOutcome> {
        match action {
            Action::AddNode(kind) => self.add_node(&kind).map(ActionOutcome::NodeAdded),
            Action::Compile => {
                self.compile();
                Ok(ActionOutcome::Compiled)
            }
            Action::Run => self.run(evaluator).map(ActionOutcome::Ran),
        }
    }

    /// Pointer pressed on the canvas
    pub fn pointer_down(&mut self, p: Pos2) -> bool {
        self.interaction.press(&self.graph, p);
        false
    }

    /// Pointer moved over the canvas
    pub fn pointer_move(&mut self, p: Pos2) -> bool {
        self.interaction.motion(&mut self.graph, p)
    }

    /// Pointer released. Always ends any gesture.
    pub fn pointer_up(&mut self, p: Pos2) -> bool {
        self.interaction.release(&mut self.graph, p);
        true
    }

    /// Recompute the drawable area after the host window changed size
    pub fn resize(&mut self, window: Vec2, chrome: Vec2) -> bool {
        self.canvas_size = (window - chrome).max(Vec2::ZERO);
        tracing::debug!("Canvas resized to {:?}", self.canvas_size);
        true
    }

    /// Draw the current frame
    pub fn render(&self, adapter: &mut dyn RenderAdapter) {
        render_frame(&self.graph, &self.interaction, adapter);
    }

    /// Nodes that carry a captured value
    pub fn value_nodes(&self) -> impl Iterator<Item = &Node> {
        self.graph
            .nodes()
            .iter()
            .filter(|node| node.behavior().value().is_some())
    }
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(create_default_registry())
    }
}

/// Error returned by session operations
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    /// No node kind registered under this ID
    #[error("Unknown node kind: {0}")]
    UnknownNodeKind(String),

    /// Node not found
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    /// Node kind does not hold a value
    #[error("Node {0} does not hold a value")]
    NoValue(NodeId),

    /// The evaluator rejected the program
    #[error("Evaluation failed: {0}")]
    Evaluation(#[from] EvaluationError),
}

/// Result type for session operations
pub type Result<T> = std::result::Result<T, EditorError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::Interpreter;
    use crate::render::tests::{DrawCall, RecordingAdapter};

    /// Evaluator that records how often it was called
    #[derive(Default)]
    struct CountingEvaluator {
        calls: usize,
    }

    impl Evaluator for CountingEvaluator {
        fn evaluate(&mut self, _program: &Program) -> std::result::Result<(), EvaluationError> {
            self.calls += 1;
            Ok(())
        }
    }

    fn snapshot(session: &EditorSession) -> Vec<(Pos2, Vec<NodeId>, bool)> {
        session
            .graph()
            .nodes()
            .iter()
            .map(|n: &Node| (n.position, n.links.clone(), n.connected))
            .collect()
    }

    #[test]
    fn test_add_actions_assign_sequential_ids() {
        let mut session = EditorSession::default();
        let mut evaluator = Interpreter::new();
        let kinds = ["print", "variable", "variable", "print", "print"];

        for (index, kind) in kinds.iter().enumerate() {
            let outcome = session
                .perform(Action::AddNode(kind.to_string()), &mut evaluator)
                .unwrap();
            assert_eq!(outcome, ActionOutcome::NodeAdded(NodeId::from_index(index)));
        }

        assert_eq!(session.graph().node_count(), kinds.len());
        let identifiers: Vec<_> = session.graph().nodes().iter().map(Node::identifier).collect();
        assert_eq!(identifiers, ["nd0", "nd1", "nd2", "nd3", "nd4"]);
    }

    #[test]
    fn test_default_positions() {
        let mut session = EditorSession::default();
        let print = session.add_node("print").unwrap();
        let var = session.add_node("variable").unwrap();

        assert_eq!(session.graph().node(print).unwrap().position, Pos2::new(220.0, 10.0));
        assert_eq!(session.graph().node(var).unwrap().position, Pos2::new(10.0, 10.0));
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let mut session = EditorSession::default();
        let err = session.add_node("branch").unwrap_err();
        assert!(matches!(err, EditorError::UnknownNodeKind(ref kind) if kind == "branch"));
        assert!(session.graph().is_empty());
    }

    #[test]
    fn test_set_value_only_on_value_nodes() {
        let mut session = EditorSession::default();
        let var = session.add_node("variable").unwrap();
        let print = session.add_node("print").unwrap();

        session.set_value(var, Value::Number(3.0)).unwrap();
        assert!(matches!(session.set_value(print, Value::Number(3.0)), Err(EditorError::NoValue(_))));
        assert!(matches!(
            session.set_value(NodeId::from_index(8), Value::Number(3.0)),
            Err(EditorError::NodeNotFound(_))
        ));

        let ids: Vec<_> = session.value_nodes().map(Node::id).collect();
        assert_eq!(ids, vec![var]);
    }

    #[test]
    fn test_compile_empty_session() {
        let mut session = EditorSession::default();
        assert_eq!(session.published_text(), "");
        assert_eq!(session.compile().text(), "");
        assert_eq!(session.published_text(), "");
    }

    #[test]
    fn test_run_skips_blank_program() {
        let mut session = EditorSession::default();
        let mut evaluator = CountingEvaluator::default();

        assert_eq!(session.run(&mut evaluator).unwrap(), RunOutcome::Skipped);

        session.add_node("print").unwrap();
        session.compile();
        assert_eq!(session.published_text(), "");
        assert_eq!(session.run(&mut evaluator).unwrap(), RunOutcome::Skipped);
        assert_eq!(evaluator.calls, 0);
    }

    #[test]
    fn test_run_uses_published_program() {
        let mut session = EditorSession::default();
        let mut evaluator = CountingEvaluator::default();
        session.add_node("variable").unwrap();

        // not compiled yet
        assert_eq!(session.run(&mut evaluator).unwrap(), RunOutcome::Skipped);

        session.compile();
        assert_eq!(session.run(&mut evaluator).unwrap(), RunOutcome::Executed);
        assert_eq!(evaluator.calls, 1);
    }

    #[test]
    fn test_evaluation_failure_is_reported() {
        let mut session = EditorSession::default();
        let mut evaluator = Interpreter::new();
        let a = session.add_node_at("print", Pos2::new(0.0, 0.0)).unwrap();
        let b = session.add_node_at("print", Pos2::new(300.0, 0.0)).unwrap();

        // link a print into another print: its identifier is never bound
        session.pointer_down(Pos2::new(205.0, 50.0));
        session.pointer_up(Pos2::new(300.0, 50.0));
        assert_eq!(session.graph().node(b).unwrap().links, vec![a]);

        session.perform(Action::Compile, &mut evaluator).unwrap();
        let err = session.perform(Action::Run, &mut evaluator).unwrap_err();
        assert!(matches!(err, EditorError::Evaluation(EvaluationError::Unbound(_))));
    }

    #[test]
    fn test_end_to_end_variable_to_print() {
        let mut session = EditorSession::default();
        let mut interpreter = Interpreter::new();

        let var = session.add_node("variable").unwrap();
        session.set_value(var, Value::parse_input("42")).unwrap();
        let print = session.add_node("print").unwrap();

        // Variable output connector sits at (210, 60); Print input at (220, 60).
        // Move the print node away so the two hit regions don't overlap.
        session.pointer_down(Pos2::new(300.0, 100.0));
        assert!(session.pointer_move(Pos2::new(480.0, 100.0)));
        assert!(session.pointer_up(Pos2::new(480.0, 100.0)));
        assert_eq!(session.graph().node(print).unwrap().position, Pos2::new(400.0, 10.0));

        session.pointer_down(Pos2::new(212.0, 60.0));
        assert!(session.interaction().connect.is_some());
        session.pointer_move(Pos2::new(300.0, 62.0));
        session.pointer_up(Pos2::new(402.0, 62.0));
        assert!(session.interaction().is_idle());

        session.perform(Action::Compile, &mut interpreter).unwrap();
        assert_eq!(session.published_text(), "const nd0 = 42;\nconsole.log(nd0);");

        let outcome = session.perform(Action::Run, &mut interpreter).unwrap();
        assert_eq!(outcome, ActionOutcome::Ran(RunOutcome::Executed));
        assert_eq!(interpreter.output(), ["42"]);
    }

    #[test]
    fn test_variable_precedes_print_when_added_first() {
        let mut session = EditorSession::default();
        session.add_node("print").unwrap();
        let var = session.add_node("variable").unwrap();
        session.set_value(var, Value::Text("hello".into())).unwrap();

        assert_eq!(session.compile().text(), "const nd1 = \"hello\";\n");
    }

    #[test]
    fn test_press_and_release_on_empty_canvas() {
        let mut session = EditorSession::default();
        session.add_node("variable").unwrap();
        session.add_node("print").unwrap();
        let before = snapshot(&session);

        assert!(!session.pointer_down(Pos2::new(800.0, 500.0)));
        assert!(!session.pointer_move(Pos2::new(810.0, 505.0)));
        session.pointer_up(Pos2::new(810.0, 505.0));

        assert_eq!(snapshot(&session), before);
        assert!(session.interaction().is_idle());
    }

    #[test]
    fn test_resize_subtracts_chrome() {
        let mut session = EditorSession::default();
        assert!(session.resize(Vec2::new(1280.0, 720.0), Vec2::new(320.0, 40.0)));
        assert_eq!(session.canvas_size(), Vec2::new(960.0, 680.0));

        session.resize(Vec2::new(100.0, 20.0), Vec2::new(320.0, 40.0));
        assert_eq!(session.canvas_size(), Vec2::ZERO);
    }

    #[test]
    fn test_render_draws_through_adapter() {
        let mut session = EditorSession::default();
        let var = session.add_node("variable").unwrap();

        let mut adapter = RecordingAdapter::default();
        session.render(&mut adapter);

        assert_eq!(
            adapter.calls,
            vec![
                DrawCall::Background,
                DrawCall::Body(var),
                DrawCall::Connector(var, true, false),
            ]
        );
    }
}
