//! The contract of the SDK under test.
//!
//! The fixtures pin inputs and expected outputs; these traits are the seams
//! through which a test suite plugs in the real implementation (or a
//! replaying double) to check them.

use crate::constants::SEED_SIZE;
use crate::error::Result;
use crate::types::{
    AddressString, PrivateKeyString, ProgramSummary, RecordCiphertextString, ViewKeyString,
};

// ═══════════════════════════════════════════════════════════════════════════════
// ACCOUNT SDK TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// Key derivation, signing, and record decryption.
///
/// Every method must be pure and deterministic: the same input always
/// produces the same output. The derivation chain is one-directional:
///
/// ```text
/// seed → private key → view key → address
/// ```
pub trait AccountSdk: Send + Sync {
    /// Deterministically generates a private key from a 32-byte seed.
    fn private_key_from_seed(&self, seed: &[u8; SEED_SIZE]) -> Result<PrivateKeyString>;

    /// Derives the view key of a private key.
    fn view_key_from_private_key(&self, private_key: &PrivateKeyString) -> Result<ViewKeyString>;

    /// Derives the address of a view key.
    fn address_from_view_key(&self, view_key: &ViewKeyString) -> Result<AddressString>;

    /// Derives the address of a private key through its view key.
    fn address_from_private_key(&self, private_key: &PrivateKeyString) -> Result<AddressString> {
        let view_key = self.view_key_from_private_key(private_key)?;
        self.address_from_view_key(&view_key)
    }

    /// Signs `message` with a private key and returns the encoded signature.
    fn sign(&self, private_key: &PrivateKeyString, message: &[u8]) -> Result<String>;

    /// Checks an encoded signature over `message` against an address.
    ///
    /// Returns `Ok(false)` for a well-formed signature that `address` did not
    /// produce; errors are reserved for signatures that do not parse.
    fn verify(&self, address: &AddressString, message: &[u8], signature: &str) -> Result<bool>;

    /// Decrypts a record ciphertext into its plaintext text.
    ///
    /// # Errors
    /// Must fail when the view key does not own the record.
    fn decrypt_record(
        &self,
        ciphertext: &RecordCiphertextString,
        view_key: &ViewKeyString,
    ) -> Result<String>;

    /// Decrypts a record ciphertext using the view key of `private_key`.
    fn decrypt_record_with_private_key(
        &self,
        ciphertext: &RecordCiphertextString,
        private_key: &PrivateKeyString,
    ) -> Result<String> {
        let view_key = self.view_key_from_private_key(private_key)?;
        self.decrypt_record(ciphertext, &view_key)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// PROGRAM LOADER TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// Program parsing and local evaluation.
pub trait ProgramLoader: Send + Sync {
    /// Parses program source and reports its identifier and functions.
    fn load(&self, source: &str) -> Result<ProgramSummary>;

    /// Runs `function` of the program in `source` on literal inputs
    /// such as `"3u32"`, returning the outputs rendered the same way.
    fn execute(&self, source: &str, function: &str, inputs: &[String]) -> Result<Vec<String>>;
}
