//! Program summaries returned by a [`ProgramLoader`](crate::traits::ProgramLoader).

use serde::{Deserialize, Serialize};

/// The externally visible shape of one function.
///
/// Types are rendered the way they appear in source, e.g. `u32.public`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionSignature {
    /// Function name
    pub name: String,
    /// Declared input types, in order
    pub inputs: Vec<String>,
    /// Declared output types, in order
    pub outputs: Vec<String>,
}

impl FunctionSignature {
    /// Creates a signature from borrowed parts.
    pub fn new(name: &str, inputs: &[&str], outputs: &[&str]) -> Self {
        Self {
            name: name.to_owned(),
            inputs: inputs.iter().map(|s| s.to_string()).collect(),
            outputs: outputs.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// A loaded program: its identifier and the functions it exposes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramSummary {
    /// Program identifier, e.g. `hellothere.aleo`
    pub id: String,
    /// Functions in declaration order
    pub functions: Vec<FunctionSignature>,
}

impl ProgramSummary {
    /// Looks up a function by name.
    pub fn function(&self, name: &str) -> Option<&FunctionSignature> {
        self.functions.iter().find(|f| f.name == name)
    }

    /// Returns the function names in declaration order.
    pub fn function_names(&self) -> Vec<&str> {
        self.functions.iter().map(|f| f.name.as_str()).collect()
    }
}
