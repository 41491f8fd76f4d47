//! Program representation for rollvm instruction streams.
//!
//! A program is a bounded sequence of instructions. The bound is fixed
//! when the builder is created and caps the work any single expression can
//! ask of the evaluator.

use crate::instruction::Instruction;

/// Capacity used by [`crate::ProgramBuilder::new`].
pub const DEFAULT_CAPACITY: usize = 256;

/// A built rollvm program. Read-only once built.
///
/// Only [`crate::ProgramBuilder`] can create one, so `len() <= capacity()`
/// always holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    instructions: Vec<Instruction>,
    capacity: usize,
}

impl Program {
    pub(crate) fn from_parts(instructions: Vec<Instruction>, capacity: usize) -> Self {
        debug_assert!(instructions.len() <= capacity);
        Self {
            instructions,
            capacity,
        }
    }

    /// The instruction stream.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Number of instructions in the program.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Returns true if the program has no instructions.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// The instruction bound this program was built with.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
