// SPDX-License-Identifier: MIT OR Apache-2.0
//! Built-in node kinds.

pub mod print;
pub mod variable;

use crate::node::{NodeKindDef, NodeRegistry, NODE_WIDTH};
use egui::Pos2;

pub use print::PrintNode;
pub use variable::VariableNode;

/// Create the registry of built-in node kinds
pub fn create_default_registry() -> NodeRegistry {
    let mut registry = NodeRegistry::new();

    registry.register(NodeKindDef {
        id: PrintNode::KIND.to_string(),
        name: "Print".to_string(),
        default_position: Pos2::new(NODE_WIDTH + 20.0, 10.0),
        constructor: PrintNode::boxed,
    });

    registry.register(NodeKindDef {
        id: VariableNode::KIND.to_string(),
        name: "Variable".to_string(),
        default_position: Pos2::new(10.0, 10.0),
        constructor: VariableNode::boxed,
    });

    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry() {
        let registry = create_default_registry();
        assert_eq!(registry.len(), 2);

        let print = registry.get("print").unwrap();
        assert_eq!(print.default_position, Pos2::new(220.0, 10.0));
        assert_eq!((print.constructor)().priority(), 1);

        let variable = registry.get("variable").unwrap();
        assert_eq!(variable.default_position, Pos2::new(10.0, 10.0));
        assert_eq!((variable.constructor)().title(), "Variable");
    }
}
