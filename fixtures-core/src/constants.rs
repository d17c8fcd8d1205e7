//! Format constants for Aleo account strings.
//!
//! Prefix bytes are the ones the Aleo account formats prepend before base58
//! encoding, so that every encoded key starts with the same human-readable text.

// ═══════════════════════════════════════════════════════════════════════════════
// KEY MATERIAL SIZES
// ═══════════════════════════════════════════════════════════════════════════════

/// Size of a key-generation seed in bytes.
pub const SEED_SIZE: usize = 32;

/// Size of a serialized field or scalar element in bytes.
pub const FIELD_SIZE: usize = 32;

// ═══════════════════════════════════════════════════════════════════════════════
// PRIVATE KEY FORMAT
// ═══════════════════════════════════════════════════════════════════════════════

/// Raw prefix bytes of a private key; base58 renders them as `APrivateKey1`.
pub const PRIVATE_KEY_PREFIX: [u8; 11] = [127, 134, 189, 116, 210, 221, 210, 137, 145, 18, 253];

/// Human-readable start of every encoded private key.
pub const PRIVATE_KEY_TEXT_PREFIX: &str = "APrivateKey1";

/// Decoded size of a private key (prefix + seed field).
pub const PRIVATE_KEY_DECODED_SIZE: usize = PRIVATE_KEY_PREFIX.len() + FIELD_SIZE;

/// Length of an encoded private key string.
pub const PRIVATE_KEY_ENCODED_LEN: usize = 59;

// ═══════════════════════════════════════════════════════════════════════════════
// VIEW KEY FORMAT
// ═══════════════════════════════════════════════════════════════════════════════

/// Raw prefix bytes of a view key; base58 renders them as `AViewKey1`.
pub const VIEW_KEY_PREFIX: [u8; 7] = [14, 138, 223, 204, 247, 224, 122];

/// Human-readable start of every encoded view key.
pub const VIEW_KEY_TEXT_PREFIX: &str = "AViewKey1";

/// Decoded size of a view key (prefix + scalar).
pub const VIEW_KEY_DECODED_SIZE: usize = VIEW_KEY_PREFIX.len() + FIELD_SIZE;

/// Length of an encoded view key string.
pub const VIEW_KEY_ENCODED_LEN: usize = 53;

// ═══════════════════════════════════════════════════════════════════════════════
// BECH32M FORMATS
// ═══════════════════════════════════════════════════════════════════════════════

/// Human-readable part of an address.
pub const ADDRESS_HRP: &str = "aleo";

/// Length of an encoded address string (hrp + separator + 52 data + 6 checksum).
pub const ADDRESS_ENCODED_LEN: usize = 63;

/// Human-readable part of a record ciphertext.
pub const RECORD_CIPHERTEXT_HRP: &str = "record";

// ═══════════════════════════════════════════════════════════════════════════════
// CREDITS
// ═══════════════════════════════════════════════════════════════════════════════

/// Microcredits in one credit.
pub const MICROCREDITS_PER_CREDIT: u64 = 1_000_000;

/// Network suffix of program identifiers.
pub const PROGRAM_NETWORK: &str = "aleo";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decoded_sizes() {
        assert_eq!(PRIVATE_KEY_DECODED_SIZE, 43);
        assert_eq!(VIEW_KEY_DECODED_SIZE, 39);
    }

    #[test]
    fn test_address_length_matches_bech32_layout() {
        // 32 bytes pack into ceil(256 / 5) = 52 five-bit groups.
        let data_groups = (FIELD_SIZE * 8 + 4) / 5;
        assert_eq!(ADDRESS_HRP.len() + 1 + data_groups + 6, ADDRESS_ENCODED_LEN);
    }

    #[test]
    fn test_text_prefixes_distinct() {
        assert_ne!(PRIVATE_KEY_TEXT_PREFIX, VIEW_KEY_TEXT_PREFIX);
        assert_ne!(ADDRESS_HRP, RECORD_CIPHERTEXT_HRP);
    }
}
