//! rollvm assembler: line-per-instruction listing text ↔ program.
//!
//! The listing is a mechanical 1:1 rendering of builder calls, one per line.
//! It is not a dice-expression grammar: `3d6+2` is written as the postfix
//! sequence that a parser would emit.
//!
//! # Usage
//!
//! ```
//! use rollvm_assembler::{assemble, disassemble};
//!
//! let text = "NUM 3\nNUM 6\nDICE\nNUM 2\nADD\n";
//! let program = assemble(text).unwrap();
//! assert_eq!(program.len(), 5);
//! assert_eq!(disassemble(&program), text);
//! ```
//!
//! # Roundtrip Guarantee
//!
//! `assemble(&disassemble(&program)) == program` holds for every program
//! built with the default capacity (use [`assemble_with_capacity`] with
//! `program.capacity()` otherwise). The disassembler outputs canonical text;
//! the assembler also accepts non-canonical input (lowercase mnemonics,
//! comments, `+`-signed literals, quoted names).

pub mod error;

mod disassembler;
mod lexer;
mod parser;

pub use error::AsmError;

use lexer::tokenize_line;
use parser::parse_line;
use rollvm_common::{Program, ProgramBuilder, DEFAULT_CAPACITY};

/// Assemble listing text into a program of [`DEFAULT_CAPACITY`].
///
/// Returns the first error encountered.
pub fn assemble(text: &str) -> Result<Program, AsmError> {
    assemble_with_capacity(text, DEFAULT_CAPACITY)
}

/// Assemble listing text into a program holding at most `capacity`
/// instructions.
pub fn assemble_with_capacity(text: &str, capacity: usize) -> Result<Program, AsmError> {
    let mut builder = ProgramBuilder::with_capacity(capacity);
    let mut last_line = 0;

    for (idx, line) in text.lines().enumerate() {
        last_line = idx + 1;
        let tokens = tokenize_line(line, last_line)?;
        parse_line(&tokens, last_line, &mut builder)?;
    }

    builder.finish().map_err(|source| AsmError::Build {
        line: last_line,
        source,
    })
}

/// Disassemble a program into canonical listing text.
///
/// One instruction per line, each line newline-terminated.
pub fn disassemble(program: &Program) -> String {
    disassembler::disassemble(program)
}
