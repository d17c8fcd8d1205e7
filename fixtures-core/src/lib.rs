//! # Aleo Fixtures Core
//!
//! Pinned test vectors and the foundational types used by every other
//! fixtures crate:
//!
//! - **Data**: the fixture constants themselves (seed, keys, addresses,
//!   record ciphertext/plaintext, example program)
//! - **Types**: owned key and address strings with structural checks
//! - **Errors**: a single error enum shared across the workspace
//! - **Constants**: prefixes and encoded lengths of the Aleo string formats
//! - **Traits**: the contract of the external SDK under test
//!
//! ## Example
//!
//! ```rust
//! use fixtures_core::data::{ADDRESS_STRING, HELLO_PROGRAM, HELLO_PROGRAM_ID};
//!
//! assert!(ADDRESS_STRING.starts_with("aleo1"));
//! assert!(HELLO_PROGRAM.contains(HELLO_PROGRAM_ID));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod constants;
pub mod data;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use constants::*;
pub use data::{AccountVector, Fixture, FixtureKind, FixtureValue, FIXTURES};
pub use error::{FixtureError, Result};
pub use traits::*;
pub use types::*;
