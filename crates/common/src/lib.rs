//! rollvm common types and program construction.
//!
//! This crate provides the foundational data structures for the rollvm
//! dice-expression engine:
//!
//! - [`Opcode`]: the 14 operations of the instruction set
//! - [`Instruction`]: opcode plus literal, name or template immediate
//! - [`Program`]: a bounded, read-only instruction sequence
//! - [`ProgramBuilder`]: the append-only session that produces programs
//! - [`Value`]: runtime value representation for the evaluator stack
//! - [`BuildError`]: errors from building programs
//!
//! # Usage
//!
//! ```
//! use rollvm_common::{Opcode, ProgramBuilder};
//!
//! let mut builder = ProgramBuilder::new();
//! builder
//!     .append_number("3")
//!     .append_number("100")
//!     .append_operator(Opcode::Dice);
//! let program = builder.finish().unwrap();
//! assert_eq!(program.len(), 3);
//! ```

pub mod builder;
pub mod error;
pub mod instruction;
pub mod opcode;
pub mod program;
pub mod value;

// Re-export commonly used types at the crate root.
pub use builder::ProgramBuilder;
pub use error::BuildError;
pub use instruction::{Instruction, Placeholder};
pub use opcode::Opcode;
pub use program::{Program, DEFAULT_CAPACITY};
pub use value::Value;
