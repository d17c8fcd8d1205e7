//! Error types for the fixtures workspace.
//!
//! A single `thiserror` hierarchy shared by the encoding checks, the program
//! reader, the harness, and any [`AccountSdk`](crate::traits::AccountSdk)
//! adapter.

use thiserror::Error;

/// Result type alias using `FixtureError`.
pub type Result<T> = std::result::Result<T, FixtureError>;

/// Main error type for all fixture operations.
#[derive(Debug, Error)]
pub enum FixtureError {
    // ═══════════════════════════════════════════════════════════════════════════
    // KEY & ADDRESS FORMAT ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Private key string is malformed.
    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    /// View key string is malformed.
    #[error("Invalid view key: {0}")]
    InvalidViewKey(String),

    /// Address string is malformed.
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Decoded payload has the wrong size.
    #[error("Invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// Base58 decoding failed.
    #[error("Base58 error: {0}")]
    Base58Error(String),

    /// Bech32 decoding failed.
    #[error("Bech32 error: {0}")]
    Bech32Error(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // RECORD ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Record ciphertext string is malformed.
    #[error("Invalid record ciphertext: {0}")]
    InvalidCiphertext(String),

    /// Record plaintext text could not be parsed.
    #[error("Invalid record plaintext: {0}")]
    InvalidPlaintext(String),

    /// A record is missing a required entry.
    #[error("Record is missing entry '{0}'")]
    MissingEntry(String),

    /// The key does not own the record.
    #[error("Record decryption failed: {0}")]
    DecryptionFailed(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // PROGRAM ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Literal text could not be parsed.
    #[error("Invalid literal '{0}'")]
    InvalidLiteral(String),

    /// Program source failed to parse.
    #[error("Program parse error at statement {statement}: {reason}")]
    ProgramParse { statement: usize, reason: String },

    /// Program uses a construct this reader does not support.
    #[error("Unsupported program construct: {0}")]
    Unsupported(String),

    /// Function not declared by the program.
    #[error("Function not found: {0}")]
    FunctionNotFound(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // EXECUTION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Wrong number of inputs or outputs.
    #[error("Arity mismatch: expected {expected}, got {actual}")]
    ArityMismatch { expected: usize, actual: usize },

    /// A value has a different type than declared.
    #[error("Type mismatch: expected {expected}, got {actual}")]
    TypeMismatch { expected: String, actual: String },

    /// Checked arithmetic halted.
    #[error("Arithmetic halted: {0}")]
    ArithmeticHalt(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // SDK & LOOKUP ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Key generation in the SDK under test failed.
    #[error("Key generation failed: {0}")]
    KeyGenerationError(String),

    /// Any other failure reported by the SDK under test.
    #[error("SDK error: {0}")]
    SdkError(String),

    /// No fixture with that name.
    #[error("Unknown fixture: {0}")]
    UnknownFixture(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // SERIALIZATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl FixtureError {
    /// Returns true if this error describes a malformed string encoding.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            FixtureError::InvalidPrivateKey(_)
                | FixtureError::InvalidViewKey(_)
                | FixtureError::InvalidAddress(_)
                | FixtureError::InvalidCiphertext(_)
                | FixtureError::InvalidLength { .. }
                | FixtureError::Base58Error(_)
                | FixtureError::Bech32Error(_)
        )
    }

    /// Returns true if this error came from parsing or running a program.
    pub fn is_program_error(&self) -> bool {
        matches!(
            self,
            FixtureError::InvalidLiteral(_)
                | FixtureError::ProgramParse { .. }
                | FixtureError::Unsupported(_)
                | FixtureError::FunctionNotFound(_)
                | FixtureError::ArityMismatch { .. }
                | FixtureError::TypeMismatch { .. }
                | FixtureError::ArithmeticHalt(_)
        )
    }

    /// Shorthand for a parse error at the given statement index.
    pub fn parse(statement: usize, reason: impl Into<String>) -> Self {
        FixtureError::ProgramParse {
            statement,
            reason: reason.into(),
        }
    }
}
