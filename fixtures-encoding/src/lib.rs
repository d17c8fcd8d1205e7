//! # Aleo Fixtures Encoding
//!
//! Structural decoding of the opaque strings in the fixture table.
//!
//! - **Keys**: base58 with fixed prefix bytes (`APrivateKey1`, `AViewKey1`)
//! - **Addresses & records**: bech32m with the `aleo` / `record` human-readable parts
//! - **Fingerprint**: SHA3-256 over the whole fixture table
//!
//! Nothing here derives or decrypts anything; a string that decodes is only
//! well-formed, not necessarily related to any other fixture.
//!
//! ## Example
//!
//! ```rust
//! use fixtures_core::data::ADDRESS_STRING;
//! use fixtures_encoding::decode_address;
//!
//! let payload = decode_address(ADDRESS_STRING).unwrap();
//! assert_eq!(payload.len(), 32);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod account;
pub mod fingerprint;

pub use account::{
    decode_address, decode_private_key, decode_record_ciphertext, decode_view_key, lint, lint_all,
};
pub use fingerprint::{fingerprint, fingerprint_hex, FIXTURES_FINGERPRINT};
