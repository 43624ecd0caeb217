// SPDX-License-Identifier: MIT OR Apache-2.0
//! Linearizes a graph into a [`Program`].
//!
//! Ordering is by priority bucket only: nodes are stably sorted by ascending
//! [`Node::priority`] and compiled one after another. Link direction is not
//! consulted, so a kind linked to a same-or-lower priority node can be
//! emitted before the node it reads.

use crate::graph::Graph;
use crate::node::Node;
use crate::statement::{Block, Program};

/// Compile every node in the graph
pub fn compile(graph: &Graph) -> Program {
    compile_nodes(graph.nodes())
}

/// Compile a snapshot of nodes given in store order
pub fn compile_nodes(nodes: &[Node]) -> Program {
    let mut ordered: Vec<&Node> = nodes.iter().collect();
    // stable: equal priorities keep store order
    ordered.sort_by_key(|node| node.priority());

    let blocks = ordered
        .into_iter()
        .map(|node| Block {
            node: node.id(),
            statements: node.compile(),
        })
        .collect();

    Program::new(blocks)
}
