// SPDX-License-Identifier: MIT OR Apache-2.0
//! Program execution.
//!
//! The editor never evaluates generated text. Programs are handed to an
//! [`Evaluator`]; the built-in [`Interpreter`] runs the statement list in an
//! isolated scope with no access to anything outside its own output buffer.

use crate::statement::{Program, Statement, Value};
use indexmap::IndexMap;

/// Default cap on statements executed per evaluation
pub const DEFAULT_STATEMENT_LIMIT: usize = 10_000;

/// Something that can execute a compiled program
pub trait Evaluator {
    /// Execute every statement of `program`
    fn evaluate(&mut self, program: &Program) -> Result<(), EvaluationError>;
}

/// Sandboxed statement interpreter
#[derive(Debug)]
pub struct Interpreter {
    /// Bindings of the current evaluation
    scope: IndexMap<String, Value>,
    /// Lines printed by the last evaluation
    output: Vec<String>,
    /// Maximum statements per evaluation
    statement_limit: usize,
}

impl Interpreter {
    /// Create an interpreter with the default statement limit
    pub fn new() -> Self {
        Self::with_statement_limit(DEFAULT_STATEMENT_LIMIT)
    }

    /// Create an interpreter that refuses programs longer than `limit`
    pub fn with_statement_limit(limit: usize) -> Self {
        Self {
            scope: IndexMap::new(),
            output: Vec::new(),
            statement_limit: limit,
        }
    }

    /// Lines printed by the last evaluation
    pub fn output(&self) -> &[String] {
        &self.output
    }

    /// Take the printed lines, leaving the buffer empty
    pub fn take_output(&mut self) -> Vec<String> {
        std::mem::take(&mut self.output)
    }

    /// Value bound to `name` by the last evaluation
    pub fn binding(&self, name: &str) -> Option<&Value> {
        self.scope.get(name)
    }

    fn execute(&mut self, statement: &Statement) -> Result<(), EvaluationError> {
        match statement {
            Statement::Bind { name, value } => {
                if self.scope.contains_key(name) {
                    return Err(EvaluationError::AlreadyBound(name.clone()));
                }
                self.scope.insert(name.clone(), value.clone());
            }
            Statement::Print { name } => {
                let value = self
                    .scope
                    .get(name)
                    .ok_or_else(|| EvaluationError::Unbound(name.clone()))?;
                let line = value.to_string();
                tracing::debug!("print {name}: {line}");
                self.output.push(line);
            }
        }
        Ok(())
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator for Interpreter {
    fn evaluate(&mut self, program: &Program) -> Result<(), EvaluationError> {
        self.scope.clear();
        self.output.clear();

        let count = program.statements().count();
        if count > self.statement_limit {
            return Err(EvaluationError::StatementLimit {
                count,
                limit: self.statement_limit,
            });
        }

        for statement in program.statements() {
            self.execute(statement)?;
        }
        Ok(())
    }
}

/// Error during evaluation
#[derive(Debug, thiserror::Error)]
pub enum EvaluationError {
    /// Identifier read before being bound
    #[error("{0} is not defined")]
    Unbound(String),

    /// Identifier bound twice
    #[error("Identifier '{0}' has already been declared")]
    AlreadyBound(String),

    /// Program exceeds the statement budget
    #[error("Program has {count} statements, limit is {limit}")]
    StatementLimit {
        /// Statements in the program
        count: usize,
        /// Configured limit
        limit: usize,
    },
}
