//! Record plaintext text.
//!
//! ```text
//! {
//!   owner: aleo1....private,
//!   microcredits: 1500000000000000u64.private,
//!   _nonce: 3077...983group.public
//! }
//! ```
//!
//! [`RecordPlaintext`] parses any flat record of literal entries and prints
//! it back in the layout above. [`CreditsRecord`] is the typed view of a
//! `credits.aleo` record.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use fixtures_core::constants::MICROCREDITS_PER_CREDIT;
use fixtures_core::error::{FixtureError, Result};
use fixtures_core::types::AddressString;

use crate::literal::{IntegerType, Literal, Visibility};

/// One `name: literal.visibility` entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Entry {
    name: String,
    literal: Literal,
    visibility: Visibility,
}

impl Entry {
    /// Creates an entry.
    pub fn new(name: impl Into<String>, literal: Literal, visibility: Visibility) -> Self {
        Self {
            name: name.into(),
            literal,
            visibility,
        }
    }

    /// Entry name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Entry value
    pub fn literal(&self) -> &Literal {
        &self.literal
    }

    /// Entry visibility
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}.{}", self.name, self.literal, self.visibility)
    }
}

/// A decrypted record: an ordered list of entries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RecordPlaintext {
    entries: Vec<Entry>,
}

impl RecordPlaintext {
    /// Parses record plaintext text.
    ///
    /// # Errors
    /// [`FixtureError::InvalidPlaintext`] for malformed structure or duplicate
    /// names; literal and visibility errors are wrapped the same way.
    pub fn parse(text: &str) -> Result<Self> {
        let body = text
            .trim()
            .strip_prefix('{')
            .and_then(|rest| rest.strip_suffix('}'))
            .ok_or_else(|| FixtureError::InvalidPlaintext("expected '{ ... }'".into()))?;

        let mut entries: Vec<Entry> = Vec::new();
        for raw in body.split(',') {
            let entry = parse_entry(raw.trim())?;
            if entries.iter().any(|e| e.name == entry.name) {
                return Err(FixtureError::InvalidPlaintext(format!(
                    "duplicate entry '{}'",
                    entry.name
                )));
            }
            entries.push(entry);
        }

        Ok(Self { entries })
    }

    /// Entries in declaration order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Looks up an entry by name.
    pub fn get(&self, name: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.name == name)
    }

    fn require(&self, name: &str) -> Result<&Entry> {
        self.get(name)
            .ok_or_else(|| FixtureError::MissingEntry(name.to_owned()))
    }
}

fn parse_entry(raw: &str) -> Result<Entry> {
    let invalid = |reason: &str| FixtureError::InvalidPlaintext(format!("entry '{raw}': {reason}"));

    let (name, value) = raw.split_once(':').ok_or_else(|| invalid("expected 'name: value'"))?;
    let name = name.trim();
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(invalid("bad entry name"));
    }

    let (literal, visibility) = value
        .trim()
        .rsplit_once('.')
        .ok_or_else(|| invalid("missing visibility"))?;

    let literal: Literal = literal.parse().map_err(|e: FixtureError| invalid(&e.to_string()))?;
    let visibility: Visibility = visibility
        .parse()
        .map_err(|e: FixtureError| invalid(&e.to_string()))?;

    Ok(Entry::new(name, literal, visibility))
}

impl FromStr for RecordPlaintext {
    type Err = FixtureError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for RecordPlaintext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{\n")?;
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(",\n")?;
            }
            write!(f, "  {entry}")?;
        }
        f.write_str("\n}")
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// CREDITS RECORD
// ═══════════════════════════════════════════════════════════════════════════════

/// A `credits.aleo` record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CreditsRecord {
    /// Record owner
    pub owner: AddressString,
    /// Balance in microcredits
    pub microcredits: u64,
    /// Nonce group element, decimal digits
    pub nonce: String,
}

impl CreditsRecord {
    /// Balance in whole credits, truncated.
    pub fn credits(&self) -> u64 {
        self.microcredits / MICROCREDITS_PER_CREDIT
    }
}

impl TryFrom<&RecordPlaintext> for CreditsRecord {
    type Error = FixtureError;

    fn try_from(record: &RecordPlaintext) -> Result<Self> {
        let owner = match record.require("owner")?.literal() {
            Literal::Address(address) => address.clone(),
            other => {
                return Err(FixtureError::InvalidPlaintext(format!(
                    "owner must be an address, got {}",
                    other.literal_type()
                )))
            }
        };

        let microcredits = match record.require("microcredits")?.literal() {
            Literal::Unsigned(IntegerType::U64, value) => u64::try_from(*value)
                .map_err(|_| FixtureError::InvalidPlaintext("microcredits out of range".into()))?,
            other => {
                return Err(FixtureError::InvalidPlaintext(format!(
                    "microcredits must be u64, got {}",
                    other.literal_type()
                )))
            }
        };

        let nonce_entry = record.require("_nonce")?;
        let nonce = match (nonce_entry.literal(), nonce_entry.visibility()) {
            (Literal::Group(digits), Visibility::Public) => digits.clone(),
            (literal, visibility) => {
                return Err(FixtureError::InvalidPlaintext(format!(
                    "_nonce must be group.public, got {}.{visibility}",
                    literal.literal_type()
                )))
            }
        };

        Ok(Self {
            owner,
            microcredits,
            nonce,
        })
    }
}

impl TryFrom<RecordPlaintext> for CreditsRecord {
    type Error = FixtureError;

    fn try_from(record: RecordPlaintext) -> Result<Self> {
        Self::try_from(&record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fixtures_core::data::{ADDRESS_STRING, RECORD_PLAINTEXT_STRING};

    #[test]
    fn test_plaintext_fixture_roundtrips() {
        let record = RecordPlaintext::parse(RECORD_PLAINTEXT_STRING).unwrap();
        assert_eq!(record.entries().len(), 3);
        assert_eq!(record.to_string(), RECORD_PLAINTEXT_STRING);
    }

    #[test]
    fn test_credits_record_from_fixture() {
        let record = RecordPlaintext::parse(RECORD_PLAINTEXT_STRING).unwrap();
        let credits = CreditsRecord::try_from(&record).unwrap();

        assert_eq!(credits.owner.as_str(), ADDRESS_STRING);
        assert_eq!(credits.microcredits, 1_500_000_000_000_000);
        assert_eq!(credits.credits(), 1_500_000_000);
        assert!(credits.nonce.starts_with("3077450429"));
    }

    #[test]
    fn test_single_line_layout_accepted() {
        let text = format!("{{ owner: {ADDRESS_STRING}.private, microcredits: 5u64.private, _nonce: 0group.public }}");
        let record = RecordPlaintext::parse(&text).unwrap();
        assert_eq!(record.get("microcredits").unwrap().literal().to_string(), "5u64");
        assert_eq!(CreditsRecord::try_from(record).unwrap().credits(), 0);
    }

    #[test]
    fn test_missing_nonce() {
        let text = format!("{{ owner: {ADDRESS_STRING}.private, microcredits: 5u64.private }}");
        let record = RecordPlaintext::parse(&text).unwrap();
        assert!(matches!(
            CreditsRecord::try_from(&record),
            Err(FixtureError::MissingEntry(name)) if name == "_nonce"
        ));
    }

    #[test]
    fn test_wrong_entry_types() {
        let text = format!("{{ owner: {ADDRESS_STRING}.private, microcredits: 5u32.private, _nonce: 0group.public }}");
        let record = RecordPlaintext::parse(&text).unwrap();
        assert!(matches!(
            CreditsRecord::try_from(&record),
            Err(FixtureError::InvalidPlaintext(_))
        ));

        let text = format!("{{ owner: {ADDRESS_STRING}.private, microcredits: 5u64.private, _nonce: 0group.private }}");
        let record = RecordPlaintext::parse(&text).unwrap();
        assert!(CreditsRecord::try_from(&record).is_err());
    }

    #[test]
    fn test_malformed_plaintext() {
        for text in [
            "owner: 5u64.private",
            "{ owner 5u64.private }",
            "{ owner: 5u64 }",
            "{ owner: 5u64.secret }",
            "{ a: 1u8.public, a: 2u8.public }",
            "{ a: 1u8.public, }",
        ] {
            assert!(
                matches!(RecordPlaintext::parse(text), Err(FixtureError::InvalidPlaintext(_))),
                "{text} should be rejected"
            );
        }
    }
}
