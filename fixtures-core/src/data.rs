//! Pinned account, record, and program fixtures.
//!
//! Every value here is a literal. Nothing is computed, validated, or
//! transformed at load time; consumers that need a variant must copy.
//! Changing any byte breaks the derivation chains the SDK tests rely on:
//!
//! ```text
//! PRIVATE_KEY_STRING → VIEW_KEY_STRING → ADDRESS_STRING
//! RECORD_CIPHERTEXT_STRING --(VIEW_KEY_STRING)--> RECORD_PLAINTEXT_STRING
//! ```
//!
//! The `fixtures-encoding` crate pins a SHA3-256 fingerprint of [`FIXTURES`].

use serde::Serialize;

use crate::constants::SEED_SIZE;
use crate::error::{FixtureError, Result};

// ═══════════════════════════════════════════════════════════════════════════════
// RAW BYTES
// ═══════════════════════════════════════════════════════════════════════════════

/// Seed for deterministic private key generation.
pub const SEED: [u8; SEED_SIZE] = [
    94, 91, 52, 251, 240, 230, 226, 35, 117, 253, 224, 210, 175, 13, 205, 120, 155, 214, 7, 169,
    66, 62, 206, 50, 188, 40, 29, 122, 40, 250, 54, 18,
];

/// Sample payload for signing and encryption tests (`hello world`).
pub const MESSAGE: [u8; 11] = [104, 101, 108, 108, 111, 32, 119, 111, 114, 108, 100];

// ═══════════════════════════════════════════════════════════════════════════════
// PRIMARY ACCOUNT
// ═══════════════════════════════════════════════════════════════════════════════

/// Private key of the primary account. Owns [`RECORD_CIPHERTEXT_STRING`].
pub const PRIVATE_KEY_STRING: &str = "APrivateKey1zkp3dQx4WASWYQVWKkq14v3RoQDfY2kbLssUj7iifi1VUQ6";

/// View key derived from [`PRIVATE_KEY_STRING`].
pub const VIEW_KEY_STRING: &str = "AViewKey1cxguxtKkjYnT9XDza9yTvVMxt6Ckb1Pv4ck1hppMzmCB";

/// Address derived from [`VIEW_KEY_STRING`].
pub const ADDRESS_STRING: &str = "aleo184vuwr5u7u0ha5f5k44067dd2uaqewxx6pe5ltha5pv99wvhfqxqv339h4";

// ═══════════════════════════════════════════════════════════════════════════════
// BEACON ACCOUNT
// ═══════════════════════════════════════════════════════════════════════════════

/// Private key of the development beacon.
pub const BEACON_PRIVATE_KEY_STRING: &str = "APrivateKey1zkp8CZNn3yeCseEtxuVPbDCwSyhGW6yZKUYKfgXmcpoGPWH";

/// View key derived from [`BEACON_PRIVATE_KEY_STRING`].
pub const BEACON_VIEW_KEY_STRING: &str = "AViewKey1mSnpFFC8Mj4fXbK5YiWgZ3mjiV8CxA79bYNa8ymUpTrw";

/// Address derived from [`BEACON_VIEW_KEY_STRING`].
pub const BEACON_ADDRESS_STRING: &str = "aleo1rhgdu77hgyqd3xjj8ucu3jj9r2krwz6mnzyd80gncr5fxcwlh5rsvzp9px";

// ═══════════════════════════════════════════════════════════════════════════════
// FUNDED ACCOUNT
// ═══════════════════════════════════════════════════════════════════════════════

/// Private key of an account funded on development networks.
pub const FUNDED_PRIVATE_KEY_STRING: &str = "APrivateKey1zkp2RWGDcde3efb89rjhME1VYA8QMxcxep5DShNBR6n8Yjh";

/// Address derived from [`FUNDED_PRIVATE_KEY_STRING`].
pub const FUNDED_ADDRESS_STRING: &str = "aleo1s3ws5tra87fjycnjrwsjcrnw2qxr8jfqqdugnf0xzqqw29q9m5pqem2u4t";

// ═══════════════════════════════════════════════════════════════════════════════
// RECORDS
// ═══════════════════════════════════════════════════════════════════════════════

/// A view key unrelated to any other fixture. Must not decrypt [`RECORD_CIPHERTEXT_STRING`].
pub const FOREIGN_VIEW_KEY_STRING: &str = "AViewKey1ghtvuJQQzQ31xSiVh6X1PK8biEVhQBygRGV4KdYmq4JT";

/// A credits record owned by [`ADDRESS_STRING`].
pub const RECORD_CIPHERTEXT_STRING: &str = "record1qyqsqpe2szk2wwwq56akkwx586hkndl3r8vzdwve32lm7elvphh37rsyqyxx66trwfhkxun9v35hguerqqpqzqrtjzeu6vah9x2me2exkgege824sd8x2379scspmrmtvczs0d93qttl7y92ga0k0rsexu409hu3vlehe3yxjhmey3frh2z5pxm5cmxsv4un97q";

/// Plaintext of [`RECORD_CIPHERTEXT_STRING`] under [`VIEW_KEY_STRING`].
pub const RECORD_PLAINTEXT_STRING: &str = "{\n  owner: aleo184vuwr5u7u0ha5f5k44067dd2uaqewxx6pe5ltha5pv99wvhfqxqv339h4.private,\n  microcredits: 1500000000000000u64.private,\n  _nonce: 3077450429259593211617823051143573281856129402760267155982965992208217472983group.public\n}";

/// A well-formed record whose owner is not [`ADDRESS_STRING`].
///
/// Same layout as [`RECORD_CIPHERTEXT_STRING`] with a different owner field
/// ciphertext, so it parses but must not decrypt under [`PRIVATE_KEY_STRING`].
pub const FOREIGN_CIPHERTEXT_STRING: &str = "record1qyqsqp32szk2wwwq56akkwx586hkndl3r8vzdwve32lm7elvphh37rsyqyxx66trwfhkxun9v35hguerqqpqzqrtjzeu6vah9x2me2exkgege824sd8x2379scspmrmtvczs0d93qttl7y92ga0k0rsexu409hu3vlehe3yxjhmey3frh2z5pxm5cmxsvkhtjt3";

// ═══════════════════════════════════════════════════════════════════════════════
// PROGRAM
// ═══════════════════════════════════════════════════════════════════════════════

/// Identifier of [`HELLO_PROGRAM`].
pub const HELLO_PROGRAM_ID: &str = "hellothere.aleo";

/// The one function [`HELLO_PROGRAM`] exports.
pub const HELLO_PROGRAM_MAIN_FUNCTION: &str = "hello";

/// Adds a public and a private `u32` into a private `u32`.
pub const HELLO_PROGRAM: &str = "program hellothere.aleo;\n\nfunction hello:\n    input r0 as u32.public;\n    input r1 as u32.private;\n    add r0 r1 into r2;\n    output r2 as u32.private;\n";

// ═══════════════════════════════════════════════════════════════════════════════
// ACCOUNT VECTORS
// ═══════════════════════════════════════════════════════════════════════════════

/// A private key together with what it must derive to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct AccountVector {
    /// Short name used in reports
    pub label: &'static str,
    /// Encoded private key
    pub private_key: &'static str,
    /// Expected view key, when one is pinned
    pub view_key: Option<&'static str>,
    /// Expected address
    pub address: &'static str,
}

/// The primary account chain.
pub const ACCOUNT: AccountVector = AccountVector {
    label: "account",
    private_key: PRIVATE_KEY_STRING,
    view_key: Some(VIEW_KEY_STRING),
    address: ADDRESS_STRING,
};

/// The beacon account chain.
pub const BEACON_ACCOUNT: AccountVector = AccountVector {
    label: "beacon",
    private_key: BEACON_PRIVATE_KEY_STRING,
    view_key: Some(BEACON_VIEW_KEY_STRING),
    address: BEACON_ADDRESS_STRING,
};

/// The funded account chain. No view key is pinned for it.
pub const FUNDED_ACCOUNT: AccountVector = AccountVector {
    label: "funded",
    private_key: FUNDED_PRIVATE_KEY_STRING,
    view_key: None,
    address: FUNDED_ADDRESS_STRING,
};

/// Every account chain.
pub const ACCOUNTS: &[AccountVector] = &[ACCOUNT, BEACON_ACCOUNT, FUNDED_ACCOUNT];

// ═══════════════════════════════════════════════════════════════════════════════
// FIXTURE TABLE
// ═══════════════════════════════════════════════════════════════════════════════

/// What a fixture value represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FixtureKind {
    /// Key-generation seed bytes
    Seed,
    /// Arbitrary payload bytes
    Message,
    /// `APrivateKey1...`
    PrivateKey,
    /// `AViewKey1...`
    ViewKey,
    /// `aleo1...`
    Address,
    /// `record1...`
    RecordCiphertext,
    /// `{ owner: ..., ... }`
    RecordPlaintext,
    /// `name.aleo`
    ProgramId,
    /// A function identifier
    FunctionName,
    /// Aleo instructions source
    ProgramSource,
}

/// Raw value of a fixture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FixtureValue {
    /// Binary value
    Bytes(&'static [u8]),
    /// Text value
    Text(&'static str),
}

impl FixtureValue {
    /// Returns the value's bytes (UTF-8 for text).
    pub fn as_bytes(&self) -> &'static [u8] {
        match *self {
            FixtureValue::Bytes(bytes) => bytes,
            FixtureValue::Text(text) => text.as_bytes(),
        }
    }

    /// Returns the text, if this is a text value.
    pub fn as_text(&self) -> Option<&'static str> {
        match *self {
            FixtureValue::Text(text) => Some(text),
            FixtureValue::Bytes(_) => None,
        }
    }
}

/// A named fixture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fixture {
    /// Lookup name
    pub name: &'static str,
    /// What the value represents
    pub kind: FixtureKind,
    /// The literal
    pub value: FixtureValue,
}

const fn text(name: &'static str, kind: FixtureKind, value: &'static str) -> Fixture {
    Fixture {
        name,
        kind,
        value: FixtureValue::Text(value),
    }
}

/// Every fixture, in a fixed order.
pub const FIXTURES: &[Fixture] = &[
    Fixture {
        name: "seed",
        kind: FixtureKind::Seed,
        value: FixtureValue::Bytes(&SEED),
    },
    Fixture {
        name: "message",
        kind: FixtureKind::Message,
        value: FixtureValue::Bytes(&MESSAGE),
    },
    text("private_key", FixtureKind::PrivateKey, PRIVATE_KEY_STRING),
    text("view_key", FixtureKind::ViewKey, VIEW_KEY_STRING),
    text("address", FixtureKind::Address, ADDRESS_STRING),
    text("beacon_private_key", FixtureKind::PrivateKey, BEACON_PRIVATE_KEY_STRING),
    text("beacon_view_key", FixtureKind::ViewKey, BEACON_VIEW_KEY_STRING),
    text("beacon_address", FixtureKind::Address, BEACON_ADDRESS_STRING),
    text("funded_private_key", FixtureKind::PrivateKey, FUNDED_PRIVATE_KEY_STRING),
    text("funded_address", FixtureKind::Address, FUNDED_ADDRESS_STRING),
    text("foreign_view_key", FixtureKind::ViewKey, FOREIGN_VIEW_KEY_STRING),
    text("record_ciphertext", FixtureKind::RecordCiphertext, RECORD_CIPHERTEXT_STRING),
    text("record_plaintext", FixtureKind::RecordPlaintext, RECORD_PLAINTEXT_STRING),
    text("foreign_ciphertext", FixtureKind::RecordCiphertext, FOREIGN_CIPHERTEXT_STRING),
    text("hello_program_id", FixtureKind::ProgramId, HELLO_PROGRAM_ID),
    text("hello_program_main_function", FixtureKind::FunctionName, HELLO_PROGRAM_MAIN_FUNCTION),
    text("hello_program", FixtureKind::ProgramSource, HELLO_PROGRAM),
];

/// Looks up a fixture by name.
pub fn fixture(name: &str) -> Option<&'static Fixture> {
    FIXTURES.iter().find(|f| f.name == name)
}

/// Looks up a fixture by name, failing with [`FixtureError::UnknownFixture`].
pub fn require(name: &str) -> Result<&'static Fixture> {
    fixture(name).ok_or_else(|| FixtureError::UnknownFixture(name.to_owned()))
}

// ═══════════════════════════════════════════════════════════════════════════════
// EXPORT
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Serialize)]
struct ExportedFixture {
    name: &'static str,
    kind: FixtureKind,
    encoding: &'static str,
    value: String,
}

impl From<&Fixture> for ExportedFixture {
    fn from(fixture: &Fixture) -> Self {
        let (encoding, value) = match fixture.value {
            FixtureValue::Bytes(bytes) => ("hex", hex::encode(bytes)),
            FixtureValue::Text(text) => ("utf8", text.to_owned()),
        };
        Self {
            name: fixture.name,
            kind: fixture.kind,
            encoding,
            value,
        }
    }
}

#[derive(Serialize)]
struct Export {
    fixtures: Vec<ExportedFixture>,
    accounts: &'static [AccountVector],
}

/// Renders the fixture table and account chains as pretty JSON.
///
/// Bytes are hex-encoded; text is emitted verbatim. Intended for suites in
/// other languages that need the same vectors.
pub fn export_json() -> Result<String> {
    let export = Export {
        fixtures: FIXTURES.iter().map(ExportedFixture::from).collect(),
        accounts: ACCOUNTS,
    };
    Ok(serde_json::to_string_pretty(&export)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_byte_fixtures() {
        assert_eq!(SEED.len(), 32);
        assert_eq!(&MESSAGE, b"hello world");
        assert_eq!(
            hex::encode(SEED),
            "5e5b34fbf0e6e22375fde0d2af0dcd789bd607a9423ece32bc281d7a28fa3612"
        );
    }

    #[test]
    fn test_program_embeds_id_and_function() {
        assert!(HELLO_PROGRAM.contains(&format!("program {HELLO_PROGRAM_ID};")));
        assert!(HELLO_PROGRAM.contains(&format!("function {HELLO_PROGRAM_MAIN_FUNCTION}:")));
    }

    #[test]
    fn test_plaintext_owned_by_primary_address() {
        assert!(RECORD_PLAINTEXT_STRING.contains(&format!("owner: {ADDRESS_STRING}.private")));
        assert!(RECORD_PLAINTEXT_STRING.contains("microcredits: "));
        assert!(RECORD_PLAINTEXT_STRING.contains("group.public"));
    }

    #[test]
    fn test_accounts_are_distinct() {
        let keys: HashSet<_> = ACCOUNTS.iter().map(|a| a.private_key).collect();
        let addresses: HashSet<_> = ACCOUNTS.iter().map(|a| a.address).collect();
        assert_eq!(keys.len(), ACCOUNTS.len());
        assert_eq!(addresses.len(), ACCOUNTS.len());
        assert!(ACCOUNTS.iter().all(|a| a.view_key != Some(FOREIGN_VIEW_KEY_STRING)));
    }

    #[test]
    fn test_fixture_names_unique() {
        let names: HashSet<_> = FIXTURES.iter().map(|f| f.name).collect();
        assert_eq!(names.len(), FIXTURES.len());
        assert_eq!(FIXTURES.len(), 17);
    }

    #[test]
    fn test_fixture_lookup() {
        let seed = fixture("seed").unwrap();
        assert_eq!(seed.kind, FixtureKind::Seed);
        assert_eq!(seed.value.as_bytes(), &SEED[..]);
        assert!(seed.value.as_text().is_none());

        let program = require("hello_program").unwrap();
        assert_eq!(program.value.as_text(), Some(HELLO_PROGRAM));

        assert!(matches!(require("nope"), Err(FixtureError::UnknownFixture(_))));
    }

    #[test]
    fn test_export_json() {
        let json = export_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let fixtures = value["fixtures"].as_array().unwrap();
        assert_eq!(fixtures.len(), FIXTURES.len());
        assert_eq!(fixtures[0]["name"], "seed");
        assert_eq!(fixtures[0]["encoding"], "hex");
        assert_eq!(fixtures[1]["value"], "68656c6c6f20776f726c64");
        assert_eq!(fixtures[2]["kind"], "private_key");
        assert_eq!(fixtures[2]["value"], PRIVATE_KEY_STRING);

        let accounts = value["accounts"].as_array().unwrap();
        assert_eq!(accounts.len(), 3);
        assert_eq!(accounts[2]["view_key"], serde_json::Value::Null);
    }
}
