// SPDX-License-Identifier: MIT OR Apache-2.0
//! Statement representation produced by the compiler.
//!
//! Nodes never emit raw text. They emit [`Statement`]s, which render to the
//! familiar `const nd0 = 42;` / `console.log(nd0);` surface syntax for display
//! and are executed directly by the sandboxed interpreter.

use crate::node::NodeId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Scalar value held by a value-capturing node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Text, emitted quoted
    Text(String),
    /// Number, emitted literally
    Number(f64),
    /// Boolean, emitted literally
    Bool(bool),
}

impl Value {
    /// Classify text typed into an input widget.
    ///
    /// Finite numbers become [`Value::Number`], `true`/`false` become
    /// [`Value::Bool`], everything else stays text.
    pub fn parse_input(input: &str) -> Self {
        let trimmed = input.trim();
        match trimmed {
            "true" => return Self::Bool(true),
            "false" => return Self::Bool(false),
            _ => {}
        }
        match trimmed.parse::<f64>() {
            Ok(number) if !trimmed.is_empty() && number.is_finite() => Self::Number(number),
            _ => Self::Text(input.to_string()),
        }
    }

    /// Source literal for this value
    pub fn literal(&self) -> String {
        match self {
            Self::Text(text) => quote(text),
            Self::Number(number) => number.to_string(),
            Self::Bool(flag) => flag.to_string(),
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

/// Printed form, as the interpreter writes it to its output
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(number) => write!(f, "{number}"),
            Self::Bool(flag) => write!(f, "{flag}"),
        }
    }
}

fn quote(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for c in text.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            _ => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

/// A single generated statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Statement {
    /// Bind a node identifier to a value
    Bind {
        /// Identifier being bound
        name: String,
        /// Bound value
        value: Value,
    },
    /// Print the value bound to an identifier
    Print {
        /// Identifier to print
        name: String,
    },
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bind { name, value } => write!(f, "const {name} = {};", value.literal()),
            Self::Print { name } => write!(f, "console.log({name});"),
        }
    }
}

/// Statements contributed by one node
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    /// Node that produced the statements
    pub node: NodeId,
    /// Statements in emission order (may be empty)
    pub statements: Vec<Statement>,
}

impl Block {
    /// Render this block, one statement per line
    pub fn text(&self) -> String {
        self.statements
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Output of a compilation pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    blocks: Vec<Block>,
}

impl Program {
    /// Create a program from blocks already in emission order
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    /// Blocks in emission order
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// All statements in emission order
    pub fn statements(&self) -> impl Iterator<Item = &Statement> {
        self.blocks.iter().flat_map(|block| block.statements.iter())
    }

    /// Render the program. Every block occupies at least one line, so a
    /// node without statements leaves an empty line behind.
    pub fn text(&self) -> String {
        self.blocks
            .iter()
            .map(Block::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Whether the rendered text is empty after trimming whitespace
    pub fn is_blank(&self) -> bool {
        self.text().trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_literal_is_quoted_and_escaped() {
        assert_eq!(Value::Text("hello".into()).literal(), "\"hello\"");
        assert_eq!(Value::Text("say \"hi\"".into()).literal(), "\"say \\\"hi\\\"\"");
        assert_eq!(Value::Text("a\\b".into()).literal(), "\"a\\\\b\"");
    }

    #[test]
    fn test_number_literal_is_bare() {
        assert_eq!(Value::Number(5.0).literal(), "5");
        assert_eq!(Value::Number(2.5).literal(), "2.5");
        assert_eq!(Value::Bool(true).literal(), "true");
    }

    #[test]
    fn test_parse_input() {
        assert_eq!(Value::parse_input("42"), Value::Number(42.0));
        assert_eq!(Value::parse_input(" -1.5 "), Value::Number(-1.5));
        assert_eq!(Value::parse_input("false"), Value::Bool(false));
        assert_eq!(Value::parse_input("hello"), Value::Text("hello".into()));
        assert_eq!(Value::parse_input(""), Value::Text(String::new()));
        assert_eq!(Value::parse_input("NaN"), Value::Text("NaN".into()));
        assert_eq!(Value::parse_input("inf"), Value::Text("inf".into()));
    }

    #[test]
    fn test_statement_rendering() {
        let bind = Statement::Bind {
            name: "nd0".into(),
            value: Value::Number(42.0),
        };
        let print = Statement::Print { name: "nd0".into() };
        assert_eq!(bind.to_string(), "const nd0 = 42;");
        assert_eq!(print.to_string(), "console.log(nd0);");
    }

    #[test]
    fn test_empty_blocks_leave_empty_lines() {
        let program = Program::new(vec![
            Block {
                node: NodeId::from_index(0),
                statements: vec![],
            },
            Block {
                node: NodeId::from_index(1),
                statements: vec![Statement::Print { name: "nd0".into() }],
            },
        ]);
        assert_eq!(program.text(), "\nconsole.log(nd0);");
        assert!(!program.is_blank());
        assert_eq!(program.statements().count(), 1);
    }

    #[test]
    fn test_program_of_empty_blocks_is_blank() {
        let program = Program::new(vec![
            Block {
                node: NodeId::from_index(0),
                statements: vec![],
            },
            Block {
                node: NodeId::from_index(1),
                statements: vec![],
            },
        ]);
        assert_eq!(program.text(), "\n");
        assert!(program.is_blank());
        assert!(Program::default().is_blank());
    }
}
