// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node definitions for the graph framework.

use crate::statement::{Statement, Value};
use egui::{Pos2, Rect, Vec2};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Node body width
pub const NODE_WIDTH: f32 = 200.0;
/// Node body height
pub const NODE_HEIGHT: f32 = 100.0;
/// Connector radius, also the half-extent of connector hit squares
pub const CONNECTOR_SIZE: f32 = 10.0;

/// Offset of a value field from the node's top-left corner
const FIELD_OFFSET: Vec2 = Vec2::new(10.0, 35.0);

/// Stable identifier for a node.
///
/// Wraps the node's insertion index in the graph store. Indices are handed
/// out in creation order and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(usize);

impl NodeId {
    /// Wrap an insertion index
    pub const fn from_index(index: usize) -> Self {
        Self(index)
    }

    /// Insertion index
    pub const fn index(self) -> usize {
        self.0
    }

    /// Symbol used for this node in generated statements
    pub fn identifier(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "nd{}", self.0)
    }
}

/// Which edges of a node draw a connector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConnectorSides {
    /// Left edge (consumes other nodes' output)
    pub input: bool,
    /// Right edge (offers this node's output)
    pub output: bool,
}

/// Inputs to a node's compile step
#[derive(Debug, Clone, Copy)]
pub struct CompileContext<'a> {
    /// The node being compiled
    pub id: NodeId,
    /// Nodes this node consumes, in link order
    pub links: &'a [NodeId],
}

/// Behaviour of a node kind.
///
/// Implementations must be pure: `compile` may only read the behaviour's own
/// state and the supplied context.
pub trait NodeBehavior: fmt::Debug {
    /// Display title
    fn title(&self) -> &str;

    /// Ordering key for compilation, lower compiles first
    fn priority(&self) -> i32;

    /// Statements this node contributes.
    ///
    /// Every concrete kind overrides this. Reaching the default is a
    /// programming error.
    fn compile(&self, ctx: CompileContext<'_>) -> Vec<Statement> {
        unimplemented!("node `{}` ({}) does not implement compile", self.title(), ctx.id)
    }

    /// Connectors drawn for this kind
    fn connectors(&self) -> ConnectorSides {
        ConnectorSides::default()
    }

    /// Captured value, for kinds bound to an input field
    fn value(&self) -> Option<&Value> {
        None
    }

    /// Store a captured value. Returns `false` if this kind holds no value.
    fn set_value(&mut self, _value: Value) -> bool {
        false
    }
}

/// A node instance in the graph
#[derive(Debug)]
pub struct Node {
    id: NodeId,
    /// Top-left corner in canvas coordinates
    pub position: Pos2,
    size: Vec2,
    /// Nodes whose output this node consumes. Not owning.
    pub links: Vec<NodeId>,
    /// Set once any link touches this node
    pub connected: bool,
    behavior: Box<dyn NodeBehavior>,
}

impl Node {
    pub(crate) fn new(id: NodeId, position: Pos2, behavior: Box<dyn NodeBehavior>) -> Self {
        Self {
            id,
            position,
            size: Vec2::new(NODE_WIDTH, NODE_HEIGHT),
            links: Vec::new(),
            connected: false,
            behavior,
        }
    }

    /// Node ID
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Symbol used in generated statements
    pub fn identifier(&self) -> String {
        self.id.identifier()
    }

    /// Body size
    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Display title
    pub fn title(&self) -> &str {
        self.behavior.title()
    }

    /// Compilation ordering key
    pub fn priority(&self) -> i32 {
        self.behavior.priority()
    }

    /// Behaviour of this node
    pub fn behavior(&self) -> &dyn NodeBehavior {
        self.behavior.as_ref()
    }

    /// Mutable behaviour of this node
    pub fn behavior_mut(&mut self) -> &mut dyn NodeBehavior {
        self.behavior.as_mut()
    }

    /// Statements this node contributes
    pub fn compile(&self) -> Vec<Statement> {
        self.behavior.compile(CompileContext {
            id: self.id,
            links: &self.links,
        })
    }

    /// Body rectangle
    pub fn rect(&self) -> Rect {
        Rect::from_min_size(self.position, self.size)
    }

    /// Right edge, vertical centre
    pub fn output_anchor(&self) -> Pos2 {
        Pos2::new(self.position.x + self.size.x, self.position.y + self.size.y / 2.0)
    }

    /// Left edge, vertical centre
    pub fn input_anchor(&self) -> Pos2 {
        Pos2::new(self.position.x, self.position.y + self.size.y / 2.0)
    }

    /// Where outgoing link lines start
    pub fn link_start(&self) -> Pos2 {
        self.output_anchor() + Vec2::new(CONNECTOR_SIZE, 0.0)
    }

    /// Where incoming link lines end
    pub fn link_end(&self) -> Pos2 {
        self.input_anchor() - Vec2::new(CONNECTOR_SIZE, 0.0)
    }

    /// Top-left corner of the value field, if this kind has one
    pub fn field_anchor(&self) -> Pos2 {
        self.position + FIELD_OFFSET
    }

    /// Width of the value field
    pub fn field_width(&self) -> f32 {
        self.size.x - 30.0
    }

    /// Strictly inside the body; edges do not count
    pub fn body_contains(&self, p: Pos2) -> bool {
        let rect = self.rect();
        p.x > rect.min.x && p.x < rect.max.x && p.y > rect.min.y && p.y < rect.max.y
    }

    /// Within the output connector's hit square
    pub fn output_hit(&self, p: Pos2) -> bool {
        in_square(self.output_anchor(), p)
    }

    /// Within the input connector's hit square
    pub fn input_hit(&self, p: Pos2) -> bool {
        in_square(self.input_anchor(), p)
    }
}

fn in_square(center: Pos2, p: Pos2) -> bool {
    (p.x - center.x).abs() < CONNECTOR_SIZE && (p.y - center.y).abs() < CONNECTOR_SIZE
}

/// Node kind definition
pub struct NodeKindDef {
    /// Unique kind identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Where "add node" places new instances
    pub default_position: Pos2,
    /// Builds a fresh behaviour
    pub constructor: fn() -> Box<dyn NodeBehavior>,
}

impl fmt::Debug for NodeKindDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeKindDef")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("default_position", &self.default_position)
            .finish_non_exhaustive()
    }
}

/// Registry of available node kinds
#[derive(Debug)]
pub struct NodeRegistry {
    kinds: IndexMap<String, NodeKindDef>,
}

impl NodeRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            kinds: IndexMap::new(),
        }
    }

    /// Register a node kind, replacing any kind with the same ID
    pub fn register(&mut self, kind: NodeKindDef) {
        self.kinds.insert(kind.id.clone(), kind);
    }

    /// Get a node kind by ID
    pub fn get(&self, id: &str) -> Option<&NodeKindDef> {
        self.kinds.get(id)
    }

    /// All kinds in registration order
    pub fn kinds(&self) -> impl Iterator<Item = &NodeKindDef> {
        self.kinds.values()
    }

    /// Number of registered kinds
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Whether no kinds are registered
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

impl Default for NodeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
