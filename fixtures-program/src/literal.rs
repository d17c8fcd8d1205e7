//! Typed literals and value types.
//!
//! A literal carries its type as a suffix (`7u32`, `-1i8`, `3field`), except
//! booleans and addresses which are recognised by shape. Parsing and
//! `Display` are inverse: `literal.to_string()` reproduces the input text.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use fixtures_core::error::{FixtureError, Result};
use fixtures_core::types::AddressString;

// ═══════════════════════════════════════════════════════════════════════════════
// INTEGER TYPES
// ═══════════════════════════════════════════════════════════════════════════════

/// Fixed-width integer types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntegerType {
    /// `u8`
    U8,
    /// `u16`
    U16,
    /// `u32`
    U32,
    /// `u64`
    U64,
    /// `u128`
    U128,
    /// `i8`
    I8,
    /// `i16`
    I16,
    /// `i32`
    I32,
    /// `i64`
    I64,
    /// `i128`
    I128,
}

impl IntegerType {
    /// All integer types, unsigned first.
    pub const ALL: [IntegerType; 10] = [
        IntegerType::U8,
        IntegerType::U16,
        IntegerType::U32,
        IntegerType::U64,
        IntegerType::U128,
        IntegerType::I8,
        IntegerType::I16,
        IntegerType::I32,
        IntegerType::I64,
        IntegerType::I128,
    ];

    /// Width in bits.
    pub fn bits(self) -> u32 {
        match self {
            IntegerType::U8 | IntegerType::I8 => 8,
            IntegerType::U16 | IntegerType::I16 => 16,
            IntegerType::U32 | IntegerType::I32 => 32,
            IntegerType::U64 | IntegerType::I64 => 64,
            IntegerType::U128 | IntegerType::I128 => 128,
        }
    }

    /// Returns true for `i8` through `i128`.
    pub fn is_signed(self) -> bool {
        matches!(
            self,
            IntegerType::I8 | IntegerType::I16 | IntegerType::I32 | IntegerType::I64 | IntegerType::I128
        )
    }

    /// Largest unsigned value of this width.
    pub fn unsigned_max(self) -> u128 {
        match self.bits() {
            128 => u128::MAX,
            bits => (1u128 << bits) - 1,
        }
    }

    /// Smallest signed value of this width.
    pub fn signed_min(self) -> i128 {
        match self.bits() {
            128 => i128::MIN,
            bits => -(1i128 << (bits - 1)),
        }
    }

    /// Largest signed value of this width.
    pub fn signed_max(self) -> i128 {
        match self.bits() {
            128 => i128::MAX,
            bits => (1i128 << (bits - 1)) - 1,
        }
    }

    /// Truncates an unsigned value to this width.
    pub fn wrap_unsigned(self, value: u128) -> u128 {
        value & self.unsigned_max()
    }

    /// Truncates a signed value to this width, sign-extending the result.
    pub fn wrap_signed(self, value: i128) -> i128 {
        let shift = 128 - self.bits();
        (value << shift) >> shift
    }

    /// Source spelling, e.g. `u32`.
    pub fn as_str(self) -> &'static str {
        match self {
            IntegerType::U8 => "u8",
            IntegerType::U16 => "u16",
            IntegerType::U32 => "u32",
            IntegerType::U64 => "u64",
            IntegerType::U128 => "u128",
            IntegerType::I8 => "i8",
            IntegerType::I16 => "i16",
            IntegerType::I32 => "i32",
            IntegerType::I64 => "i64",
            IntegerType::I128 => "i128",
        }
    }
}

impl fmt::Display for IntegerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// LITERAL TYPES
// ═══════════════════════════════════════════════════════════════════════════════

/// The type of a literal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LiteralType {
    /// `address`
    Address,
    /// `boolean`
    Boolean,
    /// `field`
    Field,
    /// `group`
    Group,
    /// `scalar`
    Scalar,
    /// Any fixed-width integer
    Integer(IntegerType),
}

impl fmt::Display for LiteralType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralType::Address => f.write_str("address"),
            LiteralType::Boolean => f.write_str("boolean"),
            LiteralType::Field => f.write_str("field"),
            LiteralType::Group => f.write_str("group"),
            LiteralType::Scalar => f.write_str("scalar"),
            LiteralType::Integer(ty) => write!(f, "{ty}"),
        }
    }
}

impl FromStr for LiteralType {
    type Err = FixtureError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "address" => Ok(LiteralType::Address),
            "boolean" => Ok(LiteralType::Boolean),
            "field" => Ok(LiteralType::Field),
            "group" => Ok(LiteralType::Group),
            "scalar" => Ok(LiteralType::Scalar),
            other => IntegerType::ALL
                .iter()
                .find(|ty| ty.as_str() == other)
                .map(|ty| LiteralType::Integer(*ty))
                .ok_or_else(|| FixtureError::Unsupported(format!("type '{other}'"))),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// VISIBILITY
// ═══════════════════════════════════════════════════════════════════════════════

/// Visibility suffix of a value (`.constant`, `.public`, `.private`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Known to the circuit at synthesis
    Constant,
    /// Revealed on chain
    Public,
    /// Hidden from everyone but the owner
    Private,
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Visibility::Constant => "constant",
            Visibility::Public => "public",
            Visibility::Private => "private",
        })
    }
}

impl FromStr for Visibility {
    type Err = FixtureError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "constant" => Ok(Visibility::Constant),
            "public" => Ok(Visibility::Public),
            "private" => Ok(Visibility::Private),
            other => Err(FixtureError::Unsupported(format!("visibility '{other}'"))),
        }
    }
}

/// A literal type with a visibility, e.g. `u32.public`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValueType {
    /// Literal type
    pub literal: LiteralType,
    /// Visibility
    pub visibility: Visibility,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.literal, self.visibility)
    }
}

impl FromStr for ValueType {
    type Err = FixtureError;

    fn from_str(s: &str) -> Result<Self> {
        let (literal, visibility) = s
            .rsplit_once('.')
            .ok_or_else(|| FixtureError::Unsupported(format!("type '{s}' has no visibility")))?;
        Ok(Self {
            literal: literal.parse()?,
            visibility: visibility.parse()?,
        })
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// LITERALS
// ═══════════════════════════════════════════════════════════════════════════════

/// A typed literal value.
///
/// Field, group, and scalar elements keep their decimal text; they are only
/// compared for equality, never computed on.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Literal {
    /// An account address
    Address(AddressString),
    /// `true` / `false`
    Boolean(bool),
    /// Base field element
    Field(String),
    /// Group element (x-coordinate)
    Group(String),
    /// Scalar field element
    Scalar(String),
    /// `u8` through `u128`
    Unsigned(IntegerType, u128),
    /// `i8` through `i128`
    Signed(IntegerType, i128),
}

impl Literal {
    /// Returns the type of this literal.
    pub fn literal_type(&self) -> LiteralType {
        match self {
            Literal::Address(_) => LiteralType::Address,
            Literal::Boolean(_) => LiteralType::Boolean,
            Literal::Field(_) => LiteralType::Field,
            Literal::Group(_) => LiteralType::Group,
            Literal::Scalar(_) => LiteralType::Scalar,
            Literal::Unsigned(ty, _) | Literal::Signed(ty, _) => LiteralType::Integer(*ty),
        }
    }

    /// Builds an integer literal, checking that `value` fits `ty`.
    pub fn integer(ty: IntegerType, value: i128) -> Result<Self> {
        if ty.is_signed() {
            if value < ty.signed_min() || value > ty.signed_max() {
                return Err(FixtureError::ArithmeticHalt(format!("{value} out of range for {ty}")));
            }
            Ok(Literal::Signed(ty, value))
        } else {
            let unsigned = u128::try_from(value)
                .map_err(|_| FixtureError::ArithmeticHalt(format!("{value} out of range for {ty}")))?;
            Self::unsigned(ty, unsigned)
        }
    }

    /// Builds an unsigned literal, checking that `value` fits `ty`.
    pub fn unsigned(ty: IntegerType, value: u128) -> Result<Self> {
        if ty.is_signed() || value > ty.unsigned_max() {
            return Err(FixtureError::ArithmeticHalt(format!("{value} out of range for {ty}")));
        }
        Ok(Literal::Unsigned(ty, value))
    }

    /// Returns the boolean value, if this is a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Literal::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

fn is_element_digits(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

impl FromStr for Literal {
    type Err = FixtureError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || FixtureError::InvalidLiteral(s.to_owned());

        match s {
            "true" => return Ok(Literal::Boolean(true)),
            "false" => return Ok(Literal::Boolean(false)),
            _ => {}
        }

        if s.starts_with("aleo1") {
            return AddressString::new(s).map(Literal::Address);
        }

        let elements: [(&str, fn(String) -> Literal); 3] = [
            ("field", Literal::Field),
            ("group", Literal::Group),
            ("scalar", Literal::Scalar),
        ];
        for (suffix, build) in elements {
            if let Some(digits) = s.strip_suffix(suffix) {
                return if is_element_digits(digits) {
                    Ok(build(digits.to_owned()))
                } else {
                    Err(invalid())
                };
            }
        }

        // Integers: longest suffix first so `u128` is not read as `u1` + `28`.
        let mut types = IntegerType::ALL;
        types.sort_by_key(|ty| std::cmp::Reverse(ty.as_str().len()));
        for ty in types {
            if let Some(digits) = s.strip_suffix(ty.as_str()) {
                if !is_element_digits(digits) {
                    return Err(invalid());
                }
                return if ty.is_signed() {
                    let value: i128 = digits.parse().map_err(|_| invalid())?;
                    Literal::integer(ty, value).map_err(|_| invalid())
                } else {
                    let value: u128 = digits.parse().map_err(|_| invalid())?;
                    Literal::unsigned(ty, value).map_err(|_| invalid())
                };
            }
        }

        Err(invalid())
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Address(address) => write!(f, "{address}"),
            Literal::Boolean(b) => write!(f, "{b}"),
            Literal::Field(digits) => write!(f, "{digits}field"),
            Literal::Group(digits) => write!(f, "{digits}group"),
            Literal::Scalar(digits) => write!(f, "{digits}scalar"),
            Literal::Unsigned(ty, value) => write!(f, "{value}{ty}"),
            Literal::Signed(ty, value) => write!(f, "{value}{ty}"),
        }
    }
}

impl Serialize for Literal {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Literal {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
