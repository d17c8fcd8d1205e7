//! Harness configuration.

use serde::{Deserialize, Serialize};

/// Inputs to the example program and the outputs they must produce.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionCase {
    /// Input literals, e.g. `3u32`
    pub inputs: Vec<String>,
    /// Expected output literals
    pub outputs: Vec<String>,
}

impl ExecutionCase {
    /// Creates a case from borrowed literals.
    pub fn new(inputs: &[&str], outputs: &[&str]) -> Self {
        Self {
            inputs: inputs.iter().map(|s| s.to_string()).collect(),
            outputs: outputs.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Conformance suite configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HarnessConfig {
    /// Times the seed is turned into a key. 0 skips the seed checks.
    pub seed_repetitions: usize,
    /// Private key the seed must produce, when the relation is known
    pub expected_seed_key: Option<String>,
    /// Cases run against the example program's main function
    pub execution_cases: Vec<ExecutionCase>,
    /// Whether to stop after the first failed check
    pub stop_on_first_failure: bool,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            seed_repetitions: 3,
            expected_seed_key: None,
            execution_cases: vec![ExecutionCase::new(&["3u32", "4u32"], &["7u32"])],
            stop_on_first_failure: false,
        }
    }
}

impl HarnessConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how many times the seed is turned into a key.
    pub fn seed_repetitions(mut self, repetitions: usize) -> Self {
        self.seed_repetitions = repetitions;
        self
    }

    /// Pins the private key the seed must produce.
    pub fn expected_seed_key(mut self, private_key: impl Into<String>) -> Self {
        self.expected_seed_key = Some(private_key.into());
        self
    }

    /// Adds an execution case.
    pub fn execution_case(mut self, case: ExecutionCase) -> Self {
        self.execution_cases.push(case);
        self
    }

    /// Replaces all execution cases.
    pub fn execution_cases(mut self, cases: Vec<ExecutionCase>) -> Self {
        self.execution_cases = cases;
        self
    }

    /// Stops the run after the first failed check.
    pub fn stop_on_first_failure(mut self) -> Self {
        self.stop_on_first_failure = true;
        self
    }
}
