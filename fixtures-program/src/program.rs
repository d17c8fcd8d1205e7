//! Aleo instructions: parsing, static checks, and evaluation.
//!
//! ## Grammar
//!
//! ```text
//! program   := import* "program" id ";" function*
//! import    := "import" id ";"
//! function  := "function" name ":" input* instruction* output*
//! input     := "input" register "as" type "." visibility ";"
//! instr     := opcode operand+ "into" register ";"
//! output    := "output" register "as" type "." visibility ";"
//! ```
//!
//! Registers are numbered in definition order: inputs take `r0..rN`, each
//! instruction defines the next register. A register is never redefined.
//!
//! Checked opcodes halt on overflow, underflow, and division by zero; the
//! `.w` variants wrap at the width of the operand type.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use fixtures_core::constants::PROGRAM_NETWORK;
use fixtures_core::error::{FixtureError, Result};
use fixtures_core::types::{FunctionSignature, ProgramSummary};

use crate::literal::{IntegerType, Literal, LiteralType, ValueType};

// ═══════════════════════════════════════════════════════════════════════════════
// IDENTIFIERS
// ═══════════════════════════════════════════════════════════════════════════════

const RESERVED_DECLARATIONS: [&str; 5] = ["record", "struct", "mapping", "closure", "finalize"];

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// A program identifier, e.g. `hellothere.aleo`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct ProgramId {
    /// Program name
    pub name: String,
    /// Network suffix, always `aleo`
    pub network: String,
}

impl fmt::Display for ProgramId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.name, self.network)
    }
}

impl FromStr for ProgramId {
    type Err = FixtureError;

    fn from_str(s: &str) -> Result<Self> {
        let (name, network) = s
            .split_once('.')
            .ok_or_else(|| FixtureError::Unsupported(format!("program id '{s}' has no network")))?;
        if !is_identifier(name) || network != PROGRAM_NETWORK {
            return Err(FixtureError::Unsupported(format!("program id '{s}'")));
        }
        Ok(Self {
            name: name.to_owned(),
            network: network.to_owned(),
        })
    }
}

/// A register, `r0`, `r1`, ...
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Register(pub u32);

impl Register {
    /// Position in the register file.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}

impl FromStr for Register {
    type Err = FixtureError;

    fn from_str(s: &str) -> Result<Self> {
        s.strip_prefix('r')
            .filter(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|digits| digits.parse().ok())
            .map(Register)
            .ok_or_else(|| FixtureError::Unsupported(format!("register '{s}'")))
    }
}

/// An instruction operand.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum Operand {
    /// Value of a previously defined register
    Register(Register),
    /// Inline literal
    Literal(Literal),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Register(register) => write!(f, "{register}"),
            Operand::Literal(literal) => write!(f, "{literal}"),
        }
    }
}

impl FromStr for Operand {
    type Err = FixtureError;

    fn from_str(s: &str) -> Result<Self> {
        if s.len() > 1 && s.starts_with('r') && s[1..].bytes().all(|b| b.is_ascii_digit()) {
            return s.parse().map(Operand::Register);
        }
        s.parse().map(Operand::Literal)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// OPCODES
// ═══════════════════════════════════════════════════════════════════════════════

/// Supported opcodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Opcode {
    /// `add`, halts on overflow
    Add,
    /// `add.w`, wraps
    AddWrapped,
    /// `sub`, halts on underflow
    Sub,
    /// `sub.w`, wraps
    SubWrapped,
    /// `mul`, halts on overflow
    Mul,
    /// `mul.w`, wraps
    MulWrapped,
    /// `div`, halts on zero divisor
    Div,
    /// `rem`, halts on zero divisor
    Rem,
    /// `and`
    And,
    /// `or`
    Or,
    /// `xor`
    Xor,
    /// `not`
    Not,
    /// `is.eq`
    IsEq,
    /// `is.neq`
    IsNeq,
    /// `lt`
    Lt,
    /// `lte`
    Lte,
    /// `gt`
    Gt,
    /// `gte`
    Gte,
    /// `ternary`
    Ternary,
}

impl Opcode {
    /// Every supported opcode.
    pub const ALL: [Opcode; 19] = [
        Opcode::Add,
        Opcode::AddWrapped,
        Opcode::Sub,
        Opcode::SubWrapped,
        Opcode::Mul,
        Opcode::MulWrapped,
        Opcode::Div,
        Opcode::Rem,
        Opcode::And,
        Opcode::Or,
        Opcode::Xor,
        Opcode::Not,
        Opcode::IsEq,
        Opcode::IsNeq,
        Opcode::Lt,
        Opcode::Lte,
        Opcode::Gt,
        Opcode::Gte,
        Opcode::Ternary,
    ];

    /// Source spelling.
    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Add => "add",
            Opcode::AddWrapped => "add.w",
            Opcode::Sub => "sub",
            Opcode::SubWrapped => "sub.w",
            Opcode::Mul => "mul",
            Opcode::MulWrapped => "mul.w",
            Opcode::Div => "div",
            Opcode::Rem => "rem",
            Opcode::And => "and",
            Opcode::Or => "or",
            Opcode::Xor => "xor",
            Opcode::Not => "not",
            Opcode::IsEq => "is.eq",
            Opcode::IsNeq => "is.neq",
            Opcode::Lt => "lt",
            Opcode::Lte => "lte",
            Opcode::Gt => "gt",
            Opcode::Gte => "gte",
            Opcode::Ternary => "ternary",
        }
    }

    /// Number of operands.
    pub fn arity(self) -> usize {
        match self {
            Opcode::Not => 1,
            Opcode::Ternary => 3,
            _ => 2,
        }
    }

    fn is_arithmetic(self) -> bool {
        matches!(
            self,
            Opcode::Add
                | Opcode::AddWrapped
                | Opcode::Sub
                | Opcode::SubWrapped
                | Opcode::Mul
                | Opcode::MulWrapped
                | Opcode::Div
                | Opcode::Rem
        )
    }

    fn is_ordering(self) -> bool {
        matches!(self, Opcode::Lt | Opcode::Lte | Opcode::Gt | Opcode::Gte)
    }

    /// Infers the result type from operand types.
    ///
    /// # Errors
    /// [`FixtureError::ArityMismatch`] or [`FixtureError::TypeMismatch`].
    pub fn result_type(self, operands: &[LiteralType]) -> Result<LiteralType> {
        if operands.len() != self.arity() {
            return Err(FixtureError::ArityMismatch {
                expected: self.arity(),
                actual: operands.len(),
            });
        }

        let mismatch = |expected: &str| FixtureError::TypeMismatch {
            expected: format!("{expected} for '{self}'"),
            actual: operands
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", "),
        };

        match (self, operands) {
            (Opcode::Not, [ty @ (LiteralType::Boolean | LiteralType::Integer(_))]) => Ok(*ty),
            (Opcode::Not, _) => Err(mismatch("boolean or integer")),
            (Opcode::Ternary, [LiteralType::Boolean, a, b]) if a == b => Ok(*a),
            (Opcode::Ternary, _) => Err(mismatch("boolean condition and matching branches")),
            (Opcode::IsEq | Opcode::IsNeq, [a, b]) if a == b => Ok(LiteralType::Boolean),
            (op, [a @ LiteralType::Integer(_), b]) if a == b && op.is_arithmetic() => Ok(*a),
            (op, [a @ LiteralType::Integer(_), b]) if a == b && op.is_ordering() => {
                Ok(LiteralType::Boolean)
            }
            (
                Opcode::And | Opcode::Or | Opcode::Xor,
                [a @ (LiteralType::Boolean | LiteralType::Integer(_)), b],
            ) if a == b => Ok(*a),
            (op, _) if op.is_arithmetic() || op.is_ordering() => {
                Err(mismatch("two integers of the same type"))
            }
            _ => Err(mismatch("two operands of the same type")),
        }
    }

    /// Applies the opcode to concrete values.
    ///
    /// # Errors
    /// [`FixtureError::ArithmeticHalt`] when a checked operation fails,
    /// [`FixtureError::TypeMismatch`] for operands of the wrong type.
    pub fn evaluate(self, operands: &[Literal]) -> Result<Literal> {
        match (self, operands) {
            (Opcode::IsEq, [a, b]) => Ok(Literal::Boolean(a == b)),
            (Opcode::IsNeq, [a, b]) => Ok(Literal::Boolean(a != b)),
            (Opcode::Ternary, [Literal::Boolean(condition), a, b]) => {
                Ok(if *condition { a.clone() } else { b.clone() })
            }
            (Opcode::Not, [Literal::Boolean(a)]) => Ok(Literal::Boolean(!a)),
            (Opcode::Not, [Literal::Unsigned(ty, a)]) => {
                Ok(Literal::Unsigned(*ty, ty.wrap_unsigned(!a)))
            }
            (Opcode::Not, [Literal::Signed(ty, a)]) => Ok(Literal::Signed(*ty, !a)),
            (Opcode::And, [Literal::Boolean(a), Literal::Boolean(b)]) => Ok(Literal::Boolean(a & b)),
            (Opcode::Or, [Literal::Boolean(a), Literal::Boolean(b)]) => Ok(Literal::Boolean(a | b)),
            (Opcode::Xor, [Literal::Boolean(a), Literal::Boolean(b)]) => Ok(Literal::Boolean(a ^ b)),
            (op, [Literal::Unsigned(ta, a), Literal::Unsigned(tb, b)]) if ta == tb => {
                op.evaluate_unsigned(*ta, *a, *b)
            }
            (op, [Literal::Signed(ta, a), Literal::Signed(tb, b)]) if ta == tb => {
                op.evaluate_signed(*ta, *a, *b)
            }
            _ => {
                let types: Vec<LiteralType> = operands.iter().map(Literal::literal_type).collect();
                // Surfaces the arity or type error the static check would have raised.
                self.result_type(&types)?;
                Err(FixtureError::TypeMismatch {
                    expected: format!("operands for '{self}'"),
                    actual: operands
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join(", "),
                })
            }
        }
    }

    fn halt(self, ty: IntegerType, a: impl fmt::Display, b: impl fmt::Display) -> FixtureError {
        FixtureError::ArithmeticHalt(format!("{self} {a}{ty} {b}{ty}"))
    }

    fn evaluate_unsigned(self, ty: IntegerType, a: u128, b: u128) -> Result<Literal> {
        let checked = |value: Option<u128>| {
            value
                .filter(|v| *v <= ty.unsigned_max())
                .map(|v| Literal::Unsigned(ty, v))
                .ok_or_else(|| self.halt(ty, a, b))
        };
        let wrapped = |value: u128| -> Result<Literal> { Ok(Literal::Unsigned(ty, ty.wrap_unsigned(value))) };

        match self {
            Opcode::Add => checked(a.checked_add(b)),
            Opcode::AddWrapped => wrapped(a.wrapping_add(b)),
            Opcode::Sub => checked(a.checked_sub(b)),
            Opcode::SubWrapped => wrapped(a.wrapping_sub(b)),
            Opcode::Mul => checked(a.checked_mul(b)),
            Opcode::MulWrapped => wrapped(a.wrapping_mul(b)),
            Opcode::Div => checked(a.checked_div(b)),
            Opcode::Rem => checked(a.checked_rem(b)),
            Opcode::And => Ok(Literal::Unsigned(ty, a & b)),
            Opcode::Or => Ok(Literal::Unsigned(ty, a | b)),
            Opcode::Xor => Ok(Literal::Unsigned(ty, a ^ b)),
            Opcode::Lt => Ok(Literal::Boolean(a < b)),
            Opcode::Lte => Ok(Literal::Boolean(a <= b)),
            Opcode::Gt => Ok(Literal::Boolean(a > b)),
            Opcode::Gte => Ok(Literal::Boolean(a >= b)),
            Opcode::IsEq | Opcode::IsNeq | Opcode::Not | Opcode::Ternary => {
                Err(FixtureError::ArityMismatch {
                    expected: self.arity(),
                    actual: 2,
                })
            }
        }
    }

    fn evaluate_signed(self, ty: IntegerType, a: i128, b: i128) -> Result<Literal> {
        let checked = |value: Option<i128>| {
            value
                .filter(|v| *v >= ty.signed_min() && *v <= ty.signed_max())
                .map(|v| Literal::Signed(ty, v))
                .ok_or_else(|| self.halt(ty, a, b))
        };
        let wrapped = |value: i128| -> Result<Literal> { Ok(Literal::Signed(ty, ty.wrap_signed(value))) };

        match self {
            Opcode::Add => checked(a.checked_add(b)),
            Opcode::AddWrapped => wrapped(a.wrapping_add(b)),
            Opcode::Sub => checked(a.checked_sub(b)),
            Opcode::SubWrapped => wrapped(a.wrapping_sub(b)),
            Opcode::Mul => checked(a.checked_mul(b)),
            Opcode::MulWrapped => wrapped(a.wrapping_mul(b)),
            Opcode::Div => checked(a.checked_div(b)),
            // MIN % -1 overflows the quotient, so it halts like `div`.
            Opcode::Rem if a == ty.signed_min() && b == -1 => Err(self.halt(ty, a, b)),
            Opcode::Rem => checked(a.checked_rem(b)),
            Opcode::And => Ok(Literal::Signed(ty, a & b)),
            Opcode::Or => Ok(Literal::Signed(ty, a | b)),
            Opcode::Xor => Ok(Literal::Signed(ty, a ^ b)),
            Opcode::Lt => Ok(Literal::Boolean(a < b)),
            Opcode::Lte => Ok(Literal::Boolean(a <= b)),
            Opcode::Gt => Ok(Literal::Boolean(a > b)),
            Opcode::Gte => Ok(Literal::Boolean(a >= b)),
            Opcode::IsEq | Opcode::IsNeq | Opcode::Not | Opcode::Ternary => {
                Err(FixtureError::ArityMismatch {
                    expected: self.arity(),
                    actual: 2,
                })
            }
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

impl FromStr for Opcode {
    type Err = FixtureError;

    fn from_str(s: &str) -> Result<Self> {
        Opcode::ALL
            .iter()
            .copied()
            .find(|op| op.mnemonic() == s)
            .ok_or_else(|| FixtureError::Unsupported(format!("instruction '{s}'")))
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// FUNCTIONS
// ═══════════════════════════════════════════════════════════════════════════════

/// `input rN as type.visibility;`
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Input {
    /// Register the input is bound to
    pub register: Register,
    /// Declared type
    pub ty: ValueType,
}

/// `output rN as type.visibility;`
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Output {
    /// Register whose value is returned
    pub register: Register,
    /// Declared type
    pub ty: ValueType,
}

/// `<opcode> <operands> into rN;`
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Instruction {
    /// Operation
    pub opcode: Opcode,
    /// Operands, in order
    pub operands: Vec<Operand>,
    /// Register receiving the result
    pub destination: Register,
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.opcode)?;
        for operand in &self.operands {
            write!(f, " {operand}")?;
        }
        write!(f, " into {}", self.destination)
    }
}

/// A function body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Function {
    /// Function name
    pub name: String,
    /// Inputs, bound to `r0..`
    pub inputs: Vec<Input>,
    /// Instructions, in execution order
    pub instructions: Vec<Instruction>,
    /// Outputs, in order
    pub outputs: Vec<Output>,
}

impl Function {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            inputs: Vec::new(),
            instructions: Vec::new(),
            outputs: Vec::new(),
        }
    }

    /// External signature, types rendered as in source.
    pub fn signature(&self) -> FunctionSignature {
        FunctionSignature {
            name: self.name.clone(),
            inputs: self.inputs.iter().map(|i| i.ty.to_string()).collect(),
            outputs: self.outputs.iter().map(|o| o.ty.to_string()).collect(),
        }
    }

    /// Checks register numbering and types, returning the type of every register.
    fn check(&self) -> Result<Vec<LiteralType>> {
        let mut types: Vec<LiteralType> = Vec::new();
        let context = |what: String| FixtureError::Unsupported(format!("function '{}': {what}", self.name));

        for input in &self.inputs {
            if input.register.index() != types.len() {
                return Err(context(format!(
                    "input {} must be r{}",
                    input.register,
                    types.len()
                )));
            }
            types.push(input.ty.literal);
        }

        for instruction in &self.instructions {
            if instruction.destination.index() != types.len() {
                return Err(context(format!(
                    "'{instruction}' must write r{}",
                    types.len()
                )));
            }

            let mut operand_types = Vec::with_capacity(instruction.operands.len());
            for operand in &instruction.operands {
                operand_types.push(match operand {
                    Operand::Register(register) => *types
                        .get(register.index())
                        .ok_or_else(|| context(format!("'{instruction}' reads undefined {register}")))?,
                    Operand::Literal(literal) => literal.literal_type(),
                });
            }

            types.push(instruction.opcode.result_type(&operand_types)?);
        }

        for output in &self.outputs {
            let actual = types
                .get(output.register.index())
                .ok_or_else(|| context(format!("output of undefined {}", output.register)))?;
            if *actual != output.ty.literal {
                return Err(FixtureError::TypeMismatch {
                    expected: output.ty.literal.to_string(),
                    actual: actual.to_string(),
                });
            }
        }

        Ok(types)
    }

    /// Evaluates the function on `inputs`.
    pub fn execute(&self, inputs: &[Literal]) -> Result<Vec<Literal>> {
        if inputs.len() != self.inputs.len() {
            return Err(FixtureError::ArityMismatch {
                expected: self.inputs.len(),
                actual: inputs.len(),
            });
        }

        let mut registers: Vec<Literal> = Vec::with_capacity(self.inputs.len() + self.instructions.len());
        for (declared, value) in self.inputs.iter().zip(inputs) {
            if value.literal_type() != declared.ty.literal {
                return Err(FixtureError::TypeMismatch {
                    expected: declared.ty.literal.to_string(),
                    actual: value.literal_type().to_string(),
                });
            }
            registers.push(value.clone());
        }

        let load = |registers: &[Literal], register: Register| {
            registers
                .get(register.index())
                .cloned()
                .ok_or_else(|| FixtureError::Unsupported(format!("read of undefined {register}")))
        };

        for instruction in &self.instructions {
            let operands = instruction
                .operands
                .iter()
                .map(|operand| match operand {
                    Operand::Register(register) => load(&registers, *register),
                    Operand::Literal(literal) => Ok(literal.clone()),
                })
                .collect::<Result<Vec<_>>>()?;
            registers.push(instruction.opcode.evaluate(&operands)?);
        }

        self.outputs
            .iter()
            .map(|output| load(&registers, output.register))
            .collect()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// PROGRAM
// ═══════════════════════════════════════════════════════════════════════════════

/// A parsed and checked program.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Program {
    /// Program identifier
    pub id: ProgramId,
    /// Imported programs
    pub imports: Vec<ProgramId>,
    /// Functions in declaration order
    pub functions: Vec<Function>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Terminator {
    Semicolon,
    Colon,
}

/// Splits source into statements ending in `;` or `:`, with `//` comments removed.
fn statements(source: &str) -> Result<Vec<(String, Terminator)>> {
    let mut statements = Vec::new();
    let mut current = String::new();

    for line in source.lines() {
        let code = line.split_once("//").map_or(line, |(code, _)| code);
        for c in code.chars() {
            let terminator = match c {
                ';' => Terminator::Semicolon,
                ':' => Terminator::Colon,
                _ => {
                    current.push(c);
                    continue;
                }
            };
            statements.push((current.trim().to_owned(), terminator));
            current.clear();
        }
        current.push(' ');
    }

    if !current.trim().is_empty() {
        return Err(FixtureError::parse(statements.len(), "missing ';' at end of input"));
    }
    Ok(statements)
}

fn parse_typed_register(words: &[&str], statement: usize) -> Result<(Register, ValueType)> {
    match words {
        [_, register, "as", ty] => Ok((
            register.parse().map_err(|e: FixtureError| FixtureError::parse(statement, e.to_string()))?,
            ty.parse().map_err(|e: FixtureError| FixtureError::parse(statement, e.to_string()))?,
        )),
        _ => Err(FixtureError::parse(
            statement,
            format!("expected '{} rN as <type>.<visibility>'", words[0]),
        )),
    }
}

fn parse_instruction(words: &[&str], statement: usize) -> Result<Instruction> {
    let opcode: Opcode = words[0].parse()?;
    let (operands, destination) = match words {
        [_, operands @ .., "into", destination] if !operands.is_empty() => (operands, destination),
        _ => {
            return Err(FixtureError::parse(
                statement,
                format!("expected '{opcode} <operands> into rN'"),
            ))
        }
    };

    if operands.len() != opcode.arity() {
        return Err(FixtureError::ArityMismatch {
            expected: opcode.arity(),
            actual: operands.len(),
        });
    }

    Ok(Instruction {
        opcode,
        operands: operands
            .iter()
            .map(|o| o.parse())
            .collect::<Result<Vec<Operand>>>()
            .map_err(|e| FixtureError::parse(statement, e.to_string()))?,
        destination: destination
            .parse()
            .map_err(|e: FixtureError| FixtureError::parse(statement, e.to_string()))?,
    })
}

impl Program {
    /// Parses and checks program source.
    ///
    /// # Errors
    /// [`FixtureError::ProgramParse`] with the failing statement index for
    /// syntax errors, [`FixtureError::Unsupported`] for declarations and
    /// instructions outside the supported subset, and type errors from the
    /// static check.
    pub fn parse(source: &str) -> Result<Self> {
        let mut id: Option<ProgramId> = None;
        let mut imports: Vec<ProgramId> = Vec::new();
        let mut functions: Vec<Function> = Vec::new();

        for (index, (statement, terminator)) in statements(source)?.into_iter().enumerate() {
            let words: Vec<&str> = statement.split_whitespace().collect();
            let Some(&keyword) = words.first() else {
                return Err(FixtureError::parse(index, "empty statement"));
            };

            if RESERVED_DECLARATIONS.contains(&keyword) {
                return Err(FixtureError::Unsupported(format!("'{keyword}' declaration")));
            }

            match (terminator, keyword) {
                (Terminator::Semicolon, "import") => {
                    if id.is_some() {
                        return Err(FixtureError::parse(index, "import after program declaration"));
                    }
                    let [_, import] = words[..] else {
                        return Err(FixtureError::parse(index, "expected 'import <id>'"));
                    };
                    imports.push(import.parse()?);
                }
                (Terminator::Semicolon, "program") => {
                    if id.is_some() {
                        return Err(FixtureError::parse(index, "duplicate program declaration"));
                    }
                    let [_, program] = words[..] else {
                        return Err(FixtureError::parse(index, "expected 'program <id>'"));
                    };
                    id = Some(program.parse()?);
                }
                (Terminator::Colon, "function") => {
                    if id.is_none() {
                        return Err(FixtureError::parse(index, "function before program declaration"));
                    }
                    let [_, name] = words[..] else {
                        return Err(FixtureError::parse(index, "expected 'function <name>'"));
                    };
                    if !is_identifier(name) {
                        return Err(FixtureError::parse(index, format!("invalid function name '{name}'")));
                    }
                    if functions.iter().any(|f| f.name == name) {
                        return Err(FixtureError::parse(index, format!("duplicate function '{name}'")));
                    }
                    functions.push(Function::new(name));
                }
                (Terminator::Colon, _) => {
                    return Err(FixtureError::parse(index, format!("unexpected '{statement}:'")));
                }
                (Terminator::Semicolon, _) => {
                    let function = functions
                        .last_mut()
                        .ok_or_else(|| FixtureError::parse(index, "statement outside a function"))?;

                    match keyword {
                        "input" => {
                            if !function.instructions.is_empty() || !function.outputs.is_empty() {
                                return Err(FixtureError::parse(index, "input after body"));
                            }
                            let (register, ty) = parse_typed_register(&words, index)?;
                            function.inputs.push(Input { register, ty });
                        }
                        "output" => {
                            let (register, ty) = parse_typed_register(&words, index)?;
                            function.outputs.push(Output { register, ty });
                        }
                        _ => {
                            if !function.outputs.is_empty() {
                                return Err(FixtureError::parse(index, "instruction after output"));
                            }
                            function.instructions.push(parse_instruction(&words, index)?);
                        }
                    }
                }
            }
        }

        let id = id.ok_or_else(|| FixtureError::parse(0, "missing program declaration"))?;
        let program = Self {
            id,
            imports,
            functions,
        };
        for function in &program.functions {
            function.check()?;
        }
        Ok(program)
    }

    /// Looks up a function by name.
    pub fn function(&self, name: &str) -> Result<&Function> {
        self.functions
            .iter()
            .find(|f| f.name == name)
            .ok_or_else(|| FixtureError::FunctionNotFound(name.to_owned()))
    }

    /// Runs `function` on `inputs`.
    pub fn execute(&self, function: &str, inputs: &[Literal]) -> Result<Vec<Literal>> {
        self.function(function)?.execute(inputs)
    }

    /// Identifier and function signatures.
    pub fn summary(&self) -> ProgramSummary {
        ProgramSummary {
            id: self.id.to_string(),
            functions: self.functions.iter().map(Function::signature).collect(),
        }
    }
}

impl FromStr for Program {
    type Err = FixtureError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fixtures_core::data::{HELLO_PROGRAM, HELLO_PROGRAM_ID, HELLO_PROGRAM_MAIN_FUNCTION};
    use proptest::prelude::*;
    use test_case::test_case;

    fn lit(s: &str) -> Literal {
        s.parse().unwrap()
    }

    fn run(source: &str, inputs: &[&str]) -> Result<Vec<String>> {
        let program = Program::parse(source)?;
        let inputs: Vec<Literal> = inputs.iter().map(|s| lit(s)).collect();
        let outputs = program.execute("main", &inputs)?;
        Ok(outputs.iter().map(ToString::to_string).collect())
    }

    fn unary_program(op: &str, ty: &str, out: &str) -> String {
        format!(
            "program t.aleo;\nfunction main:\n    input r0 as {ty}.private;\n    {op} r0 into r1;\n    output r1 as {out}.private;\n"
        )
    }

    fn binary_program(op: &str, ty: &str, out: &str) -> String {
        format!(
            "program t.aleo;\nfunction main:\n    input r0 as {ty}.private;\n    input r1 as {ty}.private;\n    {op} r0 r1 into r2;\n    output r2 as {out}.private;\n"
        )
    }

    #[test]
    fn test_hello_program_shape() {
        let program = Program::parse(HELLO_PROGRAM).unwrap();
        let summary = program.summary();

        assert_eq!(summary.id, HELLO_PROGRAM_ID);
        assert_eq!(summary.function_names(), vec![HELLO_PROGRAM_MAIN_FUNCTION]);
        assert_eq!(
            summary.function(HELLO_PROGRAM_MAIN_FUNCTION).unwrap(),
            &FunctionSignature::new("hello", &["u32.public", "u32.private"], &["u32.private"])
        );
    }

    #[test]
    fn test_hello_program_adds() {
        let program = Program::parse(HELLO_PROGRAM).unwrap();
        let outputs = program
            .execute(HELLO_PROGRAM_MAIN_FUNCTION, &[lit("3u32"), lit("4u32")])
            .unwrap();
        assert_eq!(outputs, vec![lit("7u32")]);
    }

    #[test]
    fn test_execute_checks_inputs() {
        let program = Program::parse(HELLO_PROGRAM).unwrap();

        assert!(matches!(
            program.execute("hello", &[lit("3u32")]),
            Err(FixtureError::ArityMismatch { expected: 2, actual: 1 })
        ));
        assert!(matches!(
            program.execute("hello", &[lit("3u32"), lit("4u64")]),
            Err(FixtureError::TypeMismatch { .. })
        ));
        assert!(matches!(
            program.execute("main", &[]),
            Err(FixtureError::FunctionNotFound(name)) if name == "main"
        ));
        assert!(matches!(
            program.execute("hello", &[lit("4294967295u32"), lit("1u32")]),
            Err(FixtureError::ArithmeticHalt(_))
        ));
    }

    #[test_case("add", "u8", "200u8", "100u8", None ; "add overflow halts")]
    #[test_case("add.w", "u8", "200u8", "100u8", Some("44u8") ; "add wraps")]
    #[test_case("sub", "u32", "3u32", "4u32", None ; "sub underflow halts")]
    #[test_case("sub.w", "u32", "3u32", "4u32", Some("4294967295u32") ; "sub wraps")]
    #[test_case("mul", "i8", "-64i8", "2i8", Some("-128i8") ; "mul at signed min")]
    #[test_case("mul", "i8", "64i8", "2i8", None ; "mul signed overflow halts")]
    #[test_case("mul.w", "i8", "64i8", "2i8", Some("-128i8") ; "mul wraps signed")]
    #[test_case("div", "u64", "7u64", "0u64", None ; "div by zero halts")]
    #[test_case("div", "i16", "-7i16", "2i16", Some("-3i16") ; "div truncates toward zero")]
    #[test_case("div", "i8", "-128i8", "-1i8", None ; "div signed min overflow halts")]
    #[test_case("rem", "i8", "-128i8", "-1i8", None ; "rem signed min halts")]
    #[test_case("rem", "u16", "17u16", "5u16", Some("2u16") ; "rem")]
    #[test_case("xor", "u8", "12u8", "10u8", Some("6u8") ; "xor integers")]
    #[test_case("and", "i32", "-1i32", "5i32", Some("5i32") ; "and signed")]
    fn test_integer_opcodes(op: &str, ty: &str, a: &str, b: &str, expected: Option<&str>) {
        let result = run(&binary_program(op, ty, ty), &[a, b]);
        match expected {
            Some(value) => assert_eq!(result.unwrap(), vec![value.to_string()]),
            None => assert!(matches!(result, Err(FixtureError::ArithmeticHalt(_)))),
        }
    }

    #[test_case("lt", "3u8", "4u8", "true" ; "lt")]
    #[test_case("gte", "-1i64", "0i64", "false" ; "gte signed")]
    #[test_case("is.eq", "5u8", "5u8", "true" ; "is eq")]
    #[test_case("is.neq", "5u8", "5u8", "false" ; "is neq")]
    fn test_comparison_opcodes(op: &str, a: &str, b: &str, expected: &str) {
        let ty = lit(a).literal_type().to_string();
        let result = run(&binary_program(op, &ty, "boolean"), &[a, b]).unwrap();
        assert_eq!(result, vec![expected.to_string()]);
    }

    #[test]
    fn test_not_and_boolean_logic() {
        assert_eq!(run(&unary_program("not", "u8", "u8"), &["0u8"]).unwrap(), vec!["255u8"]);
        assert_eq!(run(&unary_program("not", "i8", "i8"), &["0i8"]).unwrap(), vec!["-1i8"]);
        assert_eq!(run(&unary_program("not", "boolean", "boolean"), &["true"]).unwrap(), vec!["false"]);
        assert_eq!(
            run(&binary_program("or", "boolean", "boolean"), &["false", "true"]).unwrap(),
            vec!["true"]
        );
    }

    #[test]
    fn test_ternary_and_literal_operands() {
        let source = "program t.aleo;\n\
                      function main:\n\
                      input r0 as u32.private;\n\
                      gt r0 10u32 into r1;\n\
                      ternary r1 r0 10u32 into r2; // clamp from below\n\
                      output r2 as u32.public;\n";
        assert_eq!(run(source, &["42u32"]).unwrap(), vec!["42u32"]);
        assert_eq!(run(source, &["3u32"]).unwrap(), vec!["10u32"]);
    }

    #[test]
    fn test_imports_and_multiple_functions() {
        let source = "// header\nimport credits.aleo;\nprogram two.aleo;\n\
                      function a:\n input r0 as u8.public;\n output r0 as u8.public;\n\
                      function b:\n input r0 as u8.public;\n add r0 r0 into r1;\n output r1 as u8.public;\n";
        let program = Program::parse(source).unwrap();
        assert_eq!(program.imports[0].to_string(), "credits.aleo");
        assert_eq!(program.summary().function_names(), vec!["a", "b"]);
        assert_eq!(program.execute("b", &[lit("21u8")]).unwrap(), vec![lit("42u8")]);
    }

    #[test_case("program t.aleo;\nfunction main:\n input r1 as u8.public;\n" ; "input not r0")]
    #[test_case("program t.aleo;\nfunction main:\n input r0 as u8.public;\n add r0 r0 into r5;\n" ; "destination skips")]
    #[test_case("program t.aleo;\nfunction main:\n input r0 as u8.public;\n add r0 r1 into r1;\n" ; "read before define")]
    #[test_case("program t.aleo;\nfunction main:\n input r0 as u8.public;\n add r0 r0 into r1;\n output r1 as u16.public;\n" ; "output type")]
    #[test_case("program t.aleo;\nfunction main:\n input r0 as u8.public;\n input r1 as u16.public;\n add r0 r1 into r2;\n" ; "operand types differ")]
    #[test_case("program t.aleo;\nfunction main:\n input r0 as field.public;\n add r0 r0 into r1;\n" ; "field arithmetic")]
    #[test_case("program t.aleo;\nfunction main:\n input r0 as u8.public;\n ternary r0 r0 r0 into r1;\n" ; "ternary condition")]
    fn test_static_check_rejects(source: &str) {
        let err = Program::parse(source).unwrap_err();
        assert!(err.is_program_error(), "unexpected error: {err}");
    }

    #[test_case("function main:\n" ; "function before program")]
    #[test_case("program t.aleo;\nprogram u.aleo;\n" ; "duplicate program")]
    #[test_case("program t.aleo;\nfunction f:\nfunction f:\n" ; "duplicate function")]
    #[test_case("program t.aleo;\nfunction f:\n input r0 as u8.public\n" ; "missing semicolon")]
    #[test_case("program t.aleo;\nfunction f:\n output r0 u8.public;\n" ; "output without as")]
    #[test_case("program t.aleo;\nfunction f:\n input r0 as u8.public;\n add r0 r0 r1;\n" ; "missing into")]
    #[test_case("" ; "empty source")]
    fn test_parse_errors(source: &str) {
        assert!(matches!(
            Program::parse(source),
            Err(FixtureError::ProgramParse { .. })
        ));
    }

    #[test_case("program t.aleo;\nrecord token:\n owner as address.private;\n" ; "record")]
    #[test_case("program t.aleo;\nmapping balances:\n key as address.public;\n" ; "mapping")]
    #[test_case("program t.aleo;\nclosure helper:\n input r0 as u8;\n" ; "closure")]
    #[test_case("program t.aleo;\nfunction f:\n input r0 as u8.public;\n cast r0 into r1 as u16;\n" ; "cast instruction")]
    #[test_case("program t.network;\n" ; "wrong network")]
    fn test_unsupported_constructs(source: &str) {
        assert!(matches!(
            Program::parse(source),
            Err(FixtureError::Unsupported(_))
        ));
    }

    #[test]
    fn test_parse_error_reports_statement_index() {
        let source = "program t.aleo;\nfunction f:\n input r0 as u8.public;\n add r0 r0 r1;\n";
        match Program::parse(source) {
            Err(FixtureError::ProgramParse { statement, .. }) => assert_eq!(statement, 3),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    proptest! {
        #[test]
        fn prop_hello_matches_checked_add(a in any::<u32>(), b in any::<u32>()) {
            let program = Program::parse(HELLO_PROGRAM).unwrap();
            let result = program.execute("hello", &[
                Literal::Unsigned(IntegerType::U32, a.into()),
                Literal::Unsigned(IntegerType::U32, b.into()),
            ]);
            match a.checked_add(b) {
                Some(sum) => prop_assert_eq!(
                    result.unwrap(),
                    vec![Literal::Unsigned(IntegerType::U32, sum.into())]
                ),
                None => prop_assert!(matches!(result, Err(FixtureError::ArithmeticHalt(_)))),
            }
        }

        #[test]
        fn prop_wrapped_ops_match_native(a in any::<i16>(), b in any::<i16>()) {
            let lhs = Literal::Signed(IntegerType::I16, a.into());
            let rhs = Literal::Signed(IntegerType::I16, b.into());
            let ops = [
                (Opcode::AddWrapped, a.wrapping_add(b)),
                (Opcode::SubWrapped, a.wrapping_sub(b)),
                (Opcode::MulWrapped, a.wrapping_mul(b)),
            ];
            for (op, expected) in ops {
                prop_assert_eq!(
                    op.evaluate(&[lhs.clone(), rhs.clone()]).unwrap(),
                    Literal::Signed(IntegerType::I16, expected.into())
                );
            }
        }

        #[test]
        fn prop_unsigned_div_rem_recombine(a in any::<u64>(), b in 1u64..=u64::MAX) {
            let lhs = Literal::Unsigned(IntegerType::U64, a.into());
            let rhs = Literal::Unsigned(IntegerType::U64, b.into());
            let quotient = Opcode::Div.evaluate(&[lhs.clone(), rhs.clone()]).unwrap();
            let remainder = Opcode::Rem.evaluate(&[lhs, rhs]).unwrap();
            prop_assert_eq!(quotient, Literal::Unsigned(IntegerType::U64, (a / b).into()));
            prop_assert_eq!(remainder, Literal::Unsigned(IntegerType::U64, (a % b).into()));
        }
    }
}
