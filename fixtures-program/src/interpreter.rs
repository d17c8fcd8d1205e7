//! [`ProgramLoader`] backed by the local parser and evaluator.

use tracing::{debug, instrument};

use fixtures_core::error::Result;
use fixtures_core::traits::ProgramLoader;
use fixtures_core::types::ProgramSummary;

use crate::literal::Literal;
use crate::program::Program;

/// Local program loader.
///
/// Stateless: every call parses `source` afresh.
#[derive(Clone, Copy, Debug, Default)]
pub struct Interpreter;

impl Interpreter {
    /// Creates an interpreter.
    pub fn new() -> Self {
        Self
    }
}

impl ProgramLoader for Interpreter {
    #[instrument(skip_all)]
    fn load(&self, source: &str) -> Result<ProgramSummary> {
        let program = Program::parse(source)?;
        debug!(id = %program.id, functions = program.functions.len(), "Loaded program");
        Ok(program.summary())
    }

    #[instrument(skip(self, source))]
    fn execute(&self, source: &str, function: &str, inputs: &[String]) -> Result<Vec<String>> {
        let program = Program::parse(source)?;
        let inputs = inputs
            .iter()
            .map(|s| s.parse())
            .collect::<Result<Vec<Literal>>>()?;

        let outputs = program.execute(function, &inputs)?;
        let rendered: Vec<String> = outputs.iter().map(ToString::to_string).collect();
        debug!(outputs = ?rendered, "Executed function");
        Ok(rendered)
    }
}
