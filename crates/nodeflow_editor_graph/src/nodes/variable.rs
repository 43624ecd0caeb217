// SPDX-License-Identifier: MIT OR Apache-2.0
//! Variable node: binds its identifier to a captured value.

use crate::node::{CompileContext, ConnectorSides, NodeBehavior};
use crate::statement::{Statement, Value};

/// Source node holding a value captured from an input field
#[derive(Debug, Clone, Default)]
pub struct VariableNode {
    /// Current value
    pub value: Value,
}

impl VariableNode {
    /// Registry kind ID
    pub const KIND: &'static str = "variable";

    /// Create a variable holding `value`
    pub fn new(value: Value) -> Self {
        Self { value }
    }

    /// Boxed behaviour for the registry, holding empty text
    pub fn boxed() -> Box<dyn NodeBehavior> {
        Box::new(Self::default())
    }
}

impl NodeBehavior for VariableNode {
    fn title(&self) -> &str {
        "Variable"
    }

    fn priority(&self) -> i32 {
        0
    }

    // Links are not read: a variable always emits exactly one binding.
    fn compile(&self, ctx: CompileContext<'_>) -> Vec<Statement> {
        vec![Statement::Bind {
            name: ctx.id.identifier(),
            value: self.value.clone(),
        }]
    }

    fn connectors(&self) -> ConnectorSides {
        ConnectorSides {
            input: false,
            output: true,
        }
    }

    fn value(&self) -> Option<&Value> {
        Some(&self.value)
    }

    fn set_value(&mut self, value: Value) -> bool {
        self.value = value;
        true
    }
}
