// SPDX-License-Identifier: MIT OR Apache-2.0
//! Print node: outputs every value linked into it.

use crate::node::{CompileContext, ConnectorSides, NodeBehavior};
use crate::statement::Statement;

/// Sink node emitting one print statement per incoming link
#[derive(Debug, Clone, Copy, Default)]
pub struct PrintNode;

impl PrintNode {
    /// Registry kind ID
    pub const KIND: &'static str = "print";

    /// Boxed behaviour for the registry
    pub fn boxed() -> Box<dyn NodeBehavior> {
        Box::new(Self)
    }
}

impl NodeBehavior for PrintNode {
    fn title(&self) -> &str {
        "Print"
    }

    fn priority(&self) -> i32 {
        1
    }

    fn compile(&self, ctx: CompileContext<'_>) -> Vec<Statement> {
        ctx.links
            .iter()
            .map(|source| Statement::Print {
                name: source.identifier(),
            })
            .collect()
    }

    fn connectors(&self) -> ConnectorSides {
        ConnectorSides {
            input: true,
            output: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeId;

    #[test]
    fn test_no_links_compiles_to_nothing() {
        let statements = PrintNode.compile(CompileContext {
            id: NodeId::from_index(0),
            links: &[],
        });
        assert!(statements.is_empty());
    }

    #[test]
    fn test_one_statement_per_link_in_link_order() {
        let links = [NodeId::from_index(4), NodeId::from_index(1)];
        let statements = PrintNode.compile(CompileContext {
            id: NodeId::from_index(7),
            links: &links,
        });
        let text: Vec<_> = statements.iter().map(ToString::to_string).collect();
        assert_eq!(text, ["console.log(nd4);", "console.log(nd1);"]);
    }

    #[test]
    fn test_print_holds_no_value() {
        let mut node = PrintNode;
        assert!(node.value().is_none());
        assert!(!node.set_value(crate::statement::Value::Number(1.0)));
    }
}
