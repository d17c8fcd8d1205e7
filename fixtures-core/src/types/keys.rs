//! Owned key and address strings.
//!
//! - [`PrivateKeyString`]: `APrivateKey1...` (zeroized on drop, redacted in `Debug`)
//! - [`ViewKeyString`]: `AViewKey1...` (zeroized on drop, redacted in `Debug`)
//! - [`AddressString`]: `aleo1...`
//! - [`RecordCiphertextString`]: `record1...`
//!
//! Only the public strings implement `Serialize`/`Deserialize`.
//!
//! Construction only checks the prefix, length, and alphabet. Full decoding
//! lives in `fixtures-encoding`; derivation lives in the SDK under test.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::constants::{
    ADDRESS_ENCODED_LEN, ADDRESS_HRP, PRIVATE_KEY_ENCODED_LEN, PRIVATE_KEY_TEXT_PREFIX,
    RECORD_CIPHERTEXT_HRP, VIEW_KEY_ENCODED_LEN, VIEW_KEY_TEXT_PREFIX,
};
use crate::error::{FixtureError, Result};

const BASE58_ALPHABET: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";
const BECH32_CHARSET: &str = "qpzry9x8gf2tvdw0s3jn54khce6mua7l";

fn is_base58(s: &str) -> bool {
    s.chars().all(|c| BASE58_ALPHABET.contains(c))
}

fn is_bech32_data(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| BECH32_CHARSET.contains(c))
}

// ═══════════════════════════════════════════════════════════════════════════════
// PRIVATE KEY
// ═══════════════════════════════════════════════════════════════════════════════

/// An encoded Aleo private key.
///
/// Never logged: `Debug` is redacted and there is no `Display`.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct PrivateKeyString(String);

impl PrivateKeyString {
    /// Wraps an encoded private key after a structural check.
    ///
    /// # Errors
    /// Returns [`FixtureError::InvalidPrivateKey`] on a wrong prefix, length, or alphabet.
    pub fn new(s: &str) -> Result<Self> {
        if !s.starts_with(PRIVATE_KEY_TEXT_PREFIX) {
            return Err(FixtureError::InvalidPrivateKey(format!(
                "expected prefix '{PRIVATE_KEY_TEXT_PREFIX}'"
            )));
        }
        if s.len() != PRIVATE_KEY_ENCODED_LEN {
            return Err(FixtureError::InvalidPrivateKey(format!(
                "expected {PRIVATE_KEY_ENCODED_LEN} characters, got {}",
                s.len()
            )));
        }
        if !is_base58(s) {
            return Err(FixtureError::InvalidPrivateKey("not base58".into()));
        }
        Ok(Self(s.to_owned()))
    }

    /// Returns the encoded key.
    ///
    /// # Security
    /// Handle the returned text carefully - do not log it.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PrivateKeyString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PrivateKeyString([REDACTED])")
    }
}

impl FromStr for PrivateKeyString {
    type Err = FixtureError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// VIEW KEY
// ═══════════════════════════════════════════════════════════════════════════════

/// An encoded Aleo view key.
///
/// A view key can decrypt every record owned by its address, so it is
/// treated as secret material too.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct ViewKeyString(String);

impl ViewKeyString {
    /// Wraps an encoded view key after a structural check.
    pub fn new(s: &str) -> Result<Self> {
        if !s.starts_with(VIEW_KEY_TEXT_PREFIX) {
            return Err(FixtureError::InvalidViewKey(format!(
                "expected prefix '{VIEW_KEY_TEXT_PREFIX}'"
            )));
        }
        if s.len() != VIEW_KEY_ENCODED_LEN {
            return Err(FixtureError::InvalidViewKey(format!(
                "expected {VIEW_KEY_ENCODED_LEN} characters, got {}",
                s.len()
            )));
        }
        if !is_base58(s) {
            return Err(FixtureError::InvalidViewKey("not base58".into()));
        }
        Ok(Self(s.to_owned()))
    }

    /// Returns the encoded key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ViewKeyString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ViewKeyString([REDACTED])")
    }
}

impl fmt::Display for ViewKeyString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ViewKeyString {
    type Err = FixtureError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// ADDRESS
// ═══════════════════════════════════════════════════════════════════════════════

/// An encoded Aleo address. Public.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AddressString(String);

impl AddressString {
    /// Wraps an encoded address after a structural check.
    pub fn new(s: &str) -> Result<Self> {
        let data = s
            .strip_prefix(ADDRESS_HRP)
            .and_then(|rest| rest.strip_prefix('1'))
            .ok_or_else(|| FixtureError::InvalidAddress(format!("expected prefix '{ADDRESS_HRP}1'")))?;
        if s.len() != ADDRESS_ENCODED_LEN {
            return Err(FixtureError::InvalidAddress(format!(
                "expected {ADDRESS_ENCODED_LEN} characters, got {}",
                s.len()
            )));
        }
        if !is_bech32_data(data) {
            return Err(FixtureError::InvalidAddress("not bech32".into()));
        }
        Ok(Self(s.to_owned()))
    }

    /// Returns the encoded address.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AddressString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for AddressString {
    type Err = FixtureError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl Serialize for AddressString {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for AddressString {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(&s).map_err(serde::de::Error::custom)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// RECORD CIPHERTEXT
// ═══════════════════════════════════════════════════════════════════════════════

/// An encoded record ciphertext.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RecordCiphertextString(String);

impl RecordCiphertextString {
    /// Wraps an encoded ciphertext after a structural check.
    pub fn new(s: &str) -> Result<Self> {
        let data = s
            .strip_prefix(RECORD_CIPHERTEXT_HRP)
            .and_then(|rest| rest.strip_prefix('1'))
            .ok_or_else(|| {
                FixtureError::InvalidCiphertext(format!("expected prefix '{RECORD_CIPHERTEXT_HRP}1'"))
            })?;
        if !is_bech32_data(data) {
            return Err(FixtureError::InvalidCiphertext("not bech32".into()));
        }
        Ok(Self(s.to_owned()))
    }

    /// Returns the encoded ciphertext.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordCiphertextString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RecordCiphertextString {
    type Err = FixtureError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl Serialize for RecordCiphertextString {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RecordCiphertextString {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(&s).map_err(serde::de::Error::custom)
    }
}
