//! Build errors for rollvm programs.

use crate::opcode::Opcode;
use thiserror::Error;

/// Errors that occur while building a program.
///
/// The builder keeps the first error it sees. Every append after that is a
/// no-op, so a caller only needs to look once, after the last append.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// Appending would exceed the program's fixed capacity.
    #[error("program overflow: expression exceeds {capacity} instructions")]
    Overflow { capacity: usize },

    /// A numeric literal could not be parsed as a signed 64-bit integer.
    #[error("invalid numeric literal '{literal}'")]
    InvalidLiteral { literal: String },

    /// An opcode that carries an immediate was appended as a bare operator.
    #[error("{} requires an immediate operand", opcode.mnemonic())]
    MissingImmediate { opcode: Opcode },
}
