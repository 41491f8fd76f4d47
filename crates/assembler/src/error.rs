//! Error types for the rollvm assembler.

use rollvm_common::BuildError;
use thiserror::Error;

/// Errors produced while assembling a listing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AsmError {
    /// An unrecognized opcode mnemonic was encountered.
    #[error("line {line}: unknown opcode '{token}'")]
    UnknownOpcode { line: usize, token: String },

    /// An opcode that takes an immediate was given none.
    #[error("line {line}: {opcode} expects an argument")]
    MissingArgument { line: usize, opcode: &'static str },

    /// A token appeared where it was not expected.
    #[error("line {line}: unexpected token '{token}'")]
    UnexpectedToken { line: usize, token: String },

    /// A double-quoted string ran to the end of the line.
    #[error("line {line}: unterminated string")]
    UnterminatedString { line: usize },

    /// The program builder rejected the instruction on this line.
    #[error("line {line}: {source}")]
    Build { line: usize, source: BuildError },
}
