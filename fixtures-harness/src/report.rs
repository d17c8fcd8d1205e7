//! Check outcomes and the run report.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use fixtures_core::error::Result;

/// One check the suite performs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "check", rename_all = "snake_case")]
pub enum Check {
    /// Same seed, same private key
    SeedDeterminism,
    /// Seed produces the configured private key
    SeedKey,
    /// Private key derives the pinned view key
    ViewKey {
        /// Account vector label
        account: &'static str,
    },
    /// View key (or private key) derives the pinned address
    Address {
        /// Account vector label
        account: &'static str,
    },
    /// A signature over the message verifies against its signer only
    Signature,
    /// Record ciphertext decrypts to the pinned plaintext
    RecordDecryption,
    /// Foreign record does not decrypt under the primary key
    ForeignRejection,
    /// Primary record does not decrypt under the foreign view key
    CrossKeyRejection,
    /// Example program loads with the declared shape
    ProgramShape,
    /// Example program computes the expected outputs
    Execution {
        /// Index into the configured cases
        case: usize,
    },
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Check::SeedDeterminism => f.write_str("seed determinism"),
            Check::SeedKey => f.write_str("seed key"),
            Check::ViewKey { account } => write!(f, "view key ({account})"),
            Check::Address { account } => write!(f, "address ({account})"),
            Check::Signature => f.write_str("signature"),
            Check::RecordDecryption => f.write_str("record decryption"),
            Check::ForeignRejection => f.write_str("foreign record rejection"),
            Check::CrossKeyRejection => f.write_str("cross-key rejection"),
            Check::ProgramShape => f.write_str("program shape"),
            Check::Execution { case } => write!(f, "execution (case {case})"),
        }
    }
}

/// Why a check failed.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Mismatch {
    /// Repeated generation from one seed gave different keys.
    #[error("seed produced {first} then {later}")]
    SeedNotDeterministic { first: String, later: String },

    /// The seed produced a different key than configured.
    #[error("seed produced {actual}, expected {expected}")]
    SeedKey { expected: String, actual: String },

    /// A derived view key differs from the pinned one.
    #[error("derived view key {actual}, expected {expected}")]
    ViewKey { expected: String, actual: String },

    /// A derived address differs from the pinned one.
    #[error("derived address {actual}, expected {expected}")]
    Address { expected: String, actual: String },

    /// A signature did not verify against the address that produced it.
    #[error("signature by {address} did not verify")]
    SignatureRejected { address: String },

    /// A signature verified against an address that did not produce it.
    #[error("signature verified against non-signer {address}")]
    SignatureAccepted { address: String },

    /// Decryption produced a different plaintext.
    #[error("decrypted plaintext differs: expected {expected:?}, got {actual:?}")]
    Plaintext { expected: String, actual: String },

    /// A record decrypted under a key that does not own it.
    #[error("record decrypted under a non-owner key: {plaintext:?}")]
    UnexpectedDecryption { plaintext: String },

    /// The example program failed to load or has a different shape.
    #[error("program shape: {reason}")]
    ProgramShape { reason: String },

    /// The example program computed different outputs.
    #[error("outputs {actual:?} for inputs {inputs:?}, expected {expected:?}")]
    Execution {
        inputs: Vec<String>,
        expected: Vec<String>,
        actual: Vec<String>,
    },

    /// The SDK returned an error where a value was required.
    #[error("{operation} failed: {message}")]
    Sdk { operation: String, message: String },

    /// A fixture the check relies on does not decode.
    #[error("fixture '{fixture}' is malformed: {message}")]
    MalformedFixture { fixture: String, message: String },
}

impl Mismatch {
    /// Shorthand for an SDK error during `operation`.
    pub fn sdk(operation: &str, error: impl fmt::Display) -> Self {
        Mismatch::Sdk {
            operation: operation.to_owned(),
            message: error.to_string(),
        }
    }

    /// Shorthand for a fixture that failed to decode.
    pub fn malformed(fixture: &str, error: impl fmt::Display) -> Self {
        Mismatch::MalformedFixture {
            fixture: fixture.to_owned(),
            message: error.to_string(),
        }
    }
}

/// Result of one check.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum CheckStatus {
    /// The SDK behaved as pinned.
    Passed,
    /// The SDK diverged.
    Failed(Mismatch),
    /// Not run, with the reason.
    Skipped(String),
}

/// A check and its status.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CheckOutcome {
    /// What was checked
    pub check: Check,
    /// How it went
    pub status: CheckStatus,
}

impl CheckOutcome {
    /// Returns true if the check failed.
    pub fn is_failure(&self) -> bool {
        matches!(self.status, CheckStatus::Failed(_))
    }
}

impl fmt::Display for CheckOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.status {
            CheckStatus::Passed => write!(f, "{}: ok", self.check),
            CheckStatus::Failed(mismatch) => write!(f, "{}: FAILED: {mismatch}", self.check),
            CheckStatus::Skipped(reason) => write!(f, "{}: skipped ({reason})", self.check),
        }
    }
}

/// Outcomes of a suite run, in execution order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ConformanceReport {
    /// Every check that ran or was skipped
    pub outcomes: Vec<CheckOutcome>,
    /// Set when the run stopped at a failure
    pub stopped_early: bool,
}

impl ConformanceReport {
    /// Creates an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an outcome.
    pub fn push(&mut self, check: Check, status: CheckStatus) {
        self.outcomes.push(CheckOutcome { check, status });
    }

    /// Returns true if no check failed.
    pub fn passed(&self) -> bool {
        !self.outcomes.iter().any(CheckOutcome::is_failure)
    }

    /// Failed checks.
    pub fn failures(&self) -> impl Iterator<Item = &CheckOutcome> {
        self.outcomes.iter().filter(|o| o.is_failure())
    }

    /// Number of passed checks.
    pub fn passed_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.status == CheckStatus::Passed)
            .count()
    }

    /// Looks up the outcome of a check.
    pub fn outcome(&self, check: &Check) -> Option<&CheckOutcome> {
        self.outcomes.iter().find(|o| &o.check == check)
    }

    /// Pretty JSON rendering.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
