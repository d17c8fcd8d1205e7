//! SHA3-256 fingerprint of a fixture table.
//!
//! ```text
//! fingerprint = SHA3-256(
//!     u32_le(len(DOMAIN)) || DOMAIN ||
//!     for each fixture: u64_le(len(name)) || name || u64_le(len(value)) || value
//! )
//! ```
//!
//! The fingerprint of [`FIXTURES`](fixtures_core::FIXTURES) is pinned in
//! [`FIXTURES_FINGERPRINT`]. Once published, fixtures are frozen: a changed
//! literal must come with a new fingerprint and a note on why.

use sha3::{Digest, Sha3_256};

use fixtures_core::data::Fixture;

/// Domain separator for the fixture fingerprint.
pub const DOMAIN_FINGERPRINT: &[u8] = b"ALEO_FIXTURES_V1";

/// Hex fingerprint of the shipped fixture table.
pub const FIXTURES_FINGERPRINT: &str =
    "942a514dcdf4f76dfa05184b94fa9cc0847d6a0dae27da24268fccd3bd75a0e3";

/// Computes the fingerprint of `fixtures`, in order.
pub fn fingerprint(fixtures: &[Fixture]) -> [u8; 32] {
    let mut hasher = Sha3_256::new();

    hasher.update((DOMAIN_FINGERPRINT.len() as u32).to_le_bytes());
    hasher.update(DOMAIN_FINGERPRINT);

    for fixture in fixtures {
        let value = fixture.value.as_bytes();
        hasher.update((fixture.name.len() as u64).to_le_bytes());
        hasher.update(fixture.name.as_bytes());
        hasher.update((value.len() as u64).to_le_bytes());
        hasher.update(value);
    }

    hasher.finalize().into()
}

/// Hex-encoded [`fingerprint`].
pub fn fingerprint_hex(fixtures: &[Fixture]) -> String {
    hex::encode(fingerprint(fixtures))
}
