//! Decoding of key, address, and record ciphertext strings.
//!
//! ## Layouts
//!
//! ```text
//! private key = base58(PRIVATE_KEY_PREFIX[11] || seed_field[32])
//! view key    = base58(VIEW_KEY_PREFIX[7]     || scalar[32])
//! address     = bech32m("aleo",   group_x[32])
//! record      = bech32m("record", ciphertext bytes)
//! ```

use bech32::{FromBase32, Variant};

use fixtures_core::constants::{
    ADDRESS_HRP, FIELD_SIZE, PRIVATE_KEY_DECODED_SIZE, PRIVATE_KEY_PREFIX, RECORD_CIPHERTEXT_HRP,
    VIEW_KEY_DECODED_SIZE, VIEW_KEY_PREFIX,
};
use fixtures_core::data::{Fixture, FixtureKind, FixtureValue};
use fixtures_core::error::{FixtureError, Result};

// ═══════════════════════════════════════════════════════════════════════════════
// BASE58 KEYS
// ═══════════════════════════════════════════════════════════════════════════════

fn decode_prefixed(s: &str, prefix: &[u8], expected: usize) -> Result<[u8; FIELD_SIZE]> {
    let bytes = bs58::decode(s)
        .into_vec()
        .map_err(|e| FixtureError::Base58Error(e.to_string()))?;

    if bytes.len() != expected {
        return Err(FixtureError::InvalidLength {
            expected,
            actual: bytes.len(),
        });
    }
    if &bytes[..prefix.len()] != prefix {
        return Err(FixtureError::Base58Error("unexpected prefix bytes".into()));
    }

    let mut payload = [0u8; FIELD_SIZE];
    payload.copy_from_slice(&bytes[prefix.len()..]);
    Ok(payload)
}

/// Decodes a private key string into its 32-byte seed field.
///
/// # Errors
/// Fails with [`FixtureError::InvalidPrivateKey`] wrapping the underlying cause.
pub fn decode_private_key(s: &str) -> Result<[u8; FIELD_SIZE]> {
    decode_prefixed(s, &PRIVATE_KEY_PREFIX, PRIVATE_KEY_DECODED_SIZE)
        .map_err(|e| FixtureError::InvalidPrivateKey(e.to_string()))
}

/// Decodes a view key string into its 32-byte scalar.
pub fn decode_view_key(s: &str) -> Result<[u8; FIELD_SIZE]> {
    decode_prefixed(s, &VIEW_KEY_PREFIX, VIEW_KEY_DECODED_SIZE)
        .map_err(|e| FixtureError::InvalidViewKey(e.to_string()))
}

// ═══════════════════════════════════════════════════════════════════════════════
// BECH32M STRINGS
// ═══════════════════════════════════════════════════════════════════════════════

fn decode_bech32m(s: &str, expected_hrp: &str) -> Result<Vec<u8>> {
    let (hrp, data, variant) =
        bech32::decode(s).map_err(|e| FixtureError::Bech32Error(e.to_string()))?;

    if hrp != expected_hrp {
        return Err(FixtureError::Bech32Error(format!(
            "expected hrp '{expected_hrp}', got '{hrp}'"
        )));
    }
    if variant != Variant::Bech32m {
        return Err(FixtureError::Bech32Error("expected bech32m checksum".into()));
    }

    Vec::<u8>::from_base32(&data).map_err(|e| FixtureError::Bech32Error(e.to_string()))
}

/// Decodes an address string into its 32-byte group x-coordinate.
pub fn decode_address(s: &str) -> Result<[u8; FIELD_SIZE]> {
    let bytes =
        decode_bech32m(s, ADDRESS_HRP).map_err(|e| FixtureError::InvalidAddress(e.to_string()))?;

    if bytes.len() != FIELD_SIZE {
        return Err(FixtureError::InvalidAddress(
            FixtureError::InvalidLength {
                expected: FIELD_SIZE,
                actual: bytes.len(),
            }
            .to_string(),
        ));
    }

    let mut payload = [0u8; FIELD_SIZE];
    payload.copy_from_slice(&bytes);
    Ok(payload)
}

/// Decodes a record ciphertext string into its raw bytes.
pub fn decode_record_ciphertext(s: &str) -> Result<Vec<u8>> {
    let bytes = decode_bech32m(s, RECORD_CIPHERTEXT_HRP)
        .map_err(|e| FixtureError::InvalidCiphertext(e.to_string()))?;

    if bytes.is_empty() {
        return Err(FixtureError::InvalidCiphertext("empty payload".into()));
    }
    Ok(bytes)
}

// ═══════════════════════════════════════════════════════════════════════════════
// LINT
// ═══════════════════════════════════════════════════════════════════════════════

/// Checks that a fixture is well-formed for its kind.
///
/// Opaque kinds (seed, message, plaintext, program text, identifiers) only
/// need the right shape of value; their grammar belongs to the SDK.
pub fn lint(fixture: &Fixture) -> Result<()> {
    let text = match (fixture.kind, fixture.value) {
        (FixtureKind::Seed, FixtureValue::Bytes(bytes)) => {
            if bytes.len() != FIELD_SIZE {
                return Err(FixtureError::InvalidLength {
                    expected: FIELD_SIZE,
                    actual: bytes.len(),
                });
            }
            return Ok(());
        }
        (FixtureKind::Message, FixtureValue::Bytes(_)) => return Ok(()),
        (_, FixtureValue::Text(text)) => text,
        (kind, FixtureValue::Bytes(_)) => {
            return Err(FixtureError::TypeMismatch {
                expected: format!("text for {kind:?}"),
                actual: "bytes".into(),
            })
        }
    };

    match fixture.kind {
        FixtureKind::PrivateKey => decode_private_key(text).map(|_| ()),
        FixtureKind::ViewKey => decode_view_key(text).map(|_| ()),
        FixtureKind::Address => decode_address(text).map(|_| ()),
        FixtureKind::RecordCiphertext => decode_record_ciphertext(text).map(|_| ()),
        _ if text.is_empty() => Err(FixtureError::InvalidLength {
            expected: 1,
            actual: 0,
        }),
        _ => Ok(()),
    }
}

/// Lints every fixture, pairing each with its result.
pub fn lint_all(fixtures: &'static [Fixture]) -> Vec<(&'static Fixture, Result<()>)> {
    fixtures.iter().map(|f| (f, lint(f))).collect()
}
