//! Domain types for the fixtures workspace.
//!
//! - [`PrivateKeyString`], [`ViewKeyString`], [`AddressString`]: owned account strings
//! - [`RecordCiphertextString`]: an encoded record
//! - [`ProgramSummary`]: what a program loader reports about parsed source

mod keys;
mod program;

pub use keys::*;
pub use program::*;
