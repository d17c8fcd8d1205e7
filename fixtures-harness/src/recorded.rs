//! An [`AccountSdk`] that replays recorded relations.
//!
//! Nothing is derived: every answer is a lookup. [`RecordedSdk::from_fixtures`]
//! loads the account vectors and the primary record, which makes it the
//! reference the suite itself is tested against.
//!
//! Signatures are tokens binding the signer's address to the hex message:
//!
//! ```text
//! sign1recorded:<address>:<hex(message)>
//! ```

use std::collections::HashMap;

use tracing::debug;

use fixtures_core::constants::SEED_SIZE;
use fixtures_core::data::{AccountVector, ACCOUNTS, RECORD_CIPHERTEXT_STRING, RECORD_PLAINTEXT_STRING, VIEW_KEY_STRING};
use fixtures_core::error::{FixtureError, Result};
use fixtures_core::traits::AccountSdk;
use fixtures_core::types::{AddressString, PrivateKeyString, RecordCiphertextString, ViewKeyString};

const SIGNATURE_PREFIX: &str = "sign1recorded";

fn recorded_signature(address: &AddressString, message: &[u8]) -> String {
    format!("{SIGNATURE_PREFIX}:{address}:{}", hex::encode(message))
}

/// Replaying SDK double.
#[derive(Clone, Debug, Default)]
pub struct RecordedSdk {
    /// seed → private key
    seeds: HashMap<[u8; SEED_SIZE], String>,
    /// private key → view key
    view_keys: HashMap<String, String>,
    /// view key → address
    addresses: HashMap<String, String>,
    /// private key → address, for accounts without a pinned view key
    private_key_addresses: HashMap<String, String>,
    /// (ciphertext, view key) → plaintext
    records: HashMap<(String, String), String>,
}

impl RecordedSdk {
    /// Creates an SDK that knows nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an SDK that knows every account vector and the primary record.
    ///
    /// No seed relation is recorded; add one with [`with_seed`](Self::with_seed).
    pub fn from_fixtures() -> Self {
        let sdk = ACCOUNTS
            .iter()
            .fold(Self::new(), |sdk, account| sdk.with_account(account));
        sdk.with_record(RECORD_CIPHERTEXT_STRING, VIEW_KEY_STRING, RECORD_PLAINTEXT_STRING)
    }

    /// Records the private key a seed generates.
    pub fn with_seed(mut self, seed: [u8; SEED_SIZE], private_key: &str) -> Self {
        self.seeds.insert(seed, private_key.to_owned());
        self
    }

    /// Records an account chain.
    pub fn with_account(mut self, account: &AccountVector) -> Self {
        match account.view_key {
            Some(view_key) => {
                self.view_keys
                    .insert(account.private_key.to_owned(), view_key.to_owned());
                self.addresses
                    .insert(view_key.to_owned(), account.address.to_owned());
            }
            None => {
                self.private_key_addresses
                    .insert(account.private_key.to_owned(), account.address.to_owned());
            }
        }
        self
    }

    /// Records a decryption.
    pub fn with_record(mut self, ciphertext: &str, view_key: &str, plaintext: &str) -> Self {
        self.records.insert(
            (ciphertext.to_owned(), view_key.to_owned()),
            plaintext.to_owned(),
        );
        self
    }
}

impl AccountSdk for RecordedSdk {
    fn private_key_from_seed(&self, seed: &[u8; SEED_SIZE]) -> Result<PrivateKeyString> {
        let private_key = self
            .seeds
            .get(seed)
            .ok_or_else(|| FixtureError::KeyGenerationError("no key recorded for seed".into()))?;
        PrivateKeyString::new(private_key)
    }

    fn view_key_from_private_key(&self, private_key: &PrivateKeyString) -> Result<ViewKeyString> {
        let view_key = self
            .view_keys
            .get(private_key.as_str())
            .ok_or_else(|| FixtureError::SdkError("no view key recorded for private key".into()))?;
        ViewKeyString::new(view_key)
    }

    fn address_from_view_key(&self, view_key: &ViewKeyString) -> Result<AddressString> {
        let address = self
            .addresses
            .get(view_key.as_str())
            .ok_or_else(|| FixtureError::SdkError("no address recorded for view key".into()))?;
        AddressString::new(address)
    }

    fn address_from_private_key(&self, private_key: &PrivateKeyString) -> Result<AddressString> {
        if let Some(address) = self.private_key_addresses.get(private_key.as_str()) {
            return AddressString::new(address);
        }
        let view_key = self.view_key_from_private_key(private_key)?;
        self.address_from_view_key(&view_key)
    }

    fn sign(&self, private_key: &PrivateKeyString, message: &[u8]) -> Result<String> {
        let address = self.address_from_private_key(private_key)?;
        Ok(recorded_signature(&address, message))
    }

    fn verify(&self, address: &AddressString, message: &[u8], signature: &str) -> Result<bool> {
        if !signature.starts_with(SIGNATURE_PREFIX) {
            return Err(FixtureError::SdkError("not a recorded signature".into()));
        }
        Ok(signature == recorded_signature(address, message))
    }

    fn decrypt_record(
        &self,
        ciphertext: &RecordCiphertextString,
        view_key: &ViewKeyString,
    ) -> Result<String> {
        let key = (ciphertext.as_str().to_owned(), view_key.as_str().to_owned());
        match self.records.get(&key) {
            Some(plaintext) => Ok(plaintext.clone()),
            None => {
                debug!("No recorded decryption for ciphertext and view key");
                Err(FixtureError::DecryptionFailed("view key does not own the record".into()))
            }
        }
    }
}
