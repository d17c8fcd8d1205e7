//! # Aleo Fixtures Program Reader
//!
//! Enough of the Aleo text formats to check the record and program fixtures
//! without the real SDK:
//!
//! - **Literals**: `7u32`, `true`, `aleo1...`, `123group`, typed and printed back verbatim
//! - **Records**: `{ owner: ..., microcredits: ..., _nonce: ... }` plaintext text
//! - **Programs**: a parser for the instruction subset used by simple functions
//! - **Interpreter**: local evaluation with checked integer arithmetic
//!
//! ## Example
//!
//! ```rust
//! use fixtures_core::data::{HELLO_PROGRAM, HELLO_PROGRAM_MAIN_FUNCTION};
//! use fixtures_program::{Literal, Program};
//!
//! let program = Program::parse(HELLO_PROGRAM).unwrap();
//! let inputs: Vec<Literal> = vec!["3u32".parse().unwrap(), "4u32".parse().unwrap()];
//! let outputs = program.execute(HELLO_PROGRAM_MAIN_FUNCTION, &inputs).unwrap();
//! assert_eq!(outputs[0].to_string(), "7u32");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod interpreter;
pub mod literal;
pub mod program;
pub mod record;

pub use interpreter::Interpreter;
pub use literal::{IntegerType, Literal, LiteralType, ValueType, Visibility};
pub use program::{Function, Instruction, Opcode, Operand, Program, ProgramId, Register};
pub use record::{CreditsRecord, Entry, RecordPlaintext};
