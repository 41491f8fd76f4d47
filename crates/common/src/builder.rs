//! Incremental program construction.
//!
//! The external parser drives a [`ProgramBuilder`] with one call per
//! instruction. The first failure is sticky: later appends are dropped and
//! [`ProgramBuilder::finish`] reports that failure.

use crate::error::BuildError;
use crate::instruction::Instruction;
use crate::opcode::Opcode;
use crate::program::{Program, DEFAULT_CAPACITY};
use tracing::debug;

/// Builder session for a [`Program`] with a fixed instruction capacity.
#[derive(Debug, Clone)]
pub struct ProgramBuilder {
    instructions: Vec<Instruction>,
    capacity: usize,
    error: Option<BuildError>,
}

impl Default for ProgramBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgramBuilder {
    /// A builder with [`DEFAULT_CAPACITY`].
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// A builder that accepts at most `capacity` instructions.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instructions: Vec::with_capacity(capacity.min(DEFAULT_CAPACITY)),
            capacity,
            error: None,
        }
    }

    /// Append an opcode that carries no immediate.
    pub fn append_operator(&mut self, opcode: Opcode) -> &mut Self {
        self.append(|| {
            if opcode.takes_immediate() {
                Err(BuildError::MissingImmediate { opcode })
            } else {
                Ok(Instruction::operator(opcode))
            }
        })
    }

    /// Append `NUM`, parsing `literal` as a decimal `i64`.
    pub fn append_number(&mut self, literal: &str) -> &mut Self {
        self.append(|| {
            literal
                .trim()
                .parse::<i64>()
                .map(Instruction::number)
                .map_err(|_| BuildError::InvalidLiteral {
                    literal: literal.to_string(),
                })
        })
    }

    /// Append `LDV name`.
    pub fn append_variable_load(&mut self, name: &str) -> &mut Self {
        self.append(|| Ok(Instruction::load_variable(name)))
    }

    /// Append `FMT template`.
    pub fn append_format_text(&mut self, template: &str) -> &mut Self {
        self.append(|| Ok(Instruction::format_text(template)))
    }

    fn append(&mut self, make: impl FnOnce() -> Result<Instruction, BuildError>) -> &mut Self {
        if self.error.is_some() {
            return self;
        }

        let result = if self.instructions.len() >= self.capacity {
            Err(BuildError::Overflow {
                capacity: self.capacity,
            })
        } else {
            make()
        };

        match result {
            Ok(instr) => self.instructions.push(instr),
            Err(err) => {
                debug!(%err, at = self.instructions.len(), "program build failed");
                self.error = Some(err);
            }
        }
        self
    }

    /// The sticky build error, if any append has failed so far.
    pub fn error(&self) -> Option<&BuildError> {
        self.error.as_ref()
    }

    /// Number of instructions appended so far.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Returns true if nothing has been appended.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// The instruction bound for this session.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// End the session, returning the program or the first build error.
    pub fn finish(self) -> Result<Program, BuildError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(Program::from_parts(self.instructions, self.capacity)),
        }
    }
}
