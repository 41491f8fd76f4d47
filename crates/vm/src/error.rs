//! Runtime errors for the rollvm evaluator.
//!
//! Every error that comes from a specific instruction includes its index
//! (`at`) for debugging.

use thiserror::Error;

/// Errors that occur during evaluation.
///
/// Evaluation stops at the first error and produces no partial result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// DIV or MOD with a zero right operand, or zero raised to a negative power.
    #[error("division by zero at instruction {at}")]
    DivisionByZero { at: usize },

    /// An operator found fewer operands on the stack than it needs.
    #[error("stack underflow at instruction {at}")]
    StackUnderflow { at: usize },

    /// An operand had the wrong variant.
    #[error("type mismatch at instruction {at}: expected {expected}, found {found}")]
    TypeMismatch {
        at: usize,
        expected: &'static str,
        found: &'static str,
    },

    /// A die must have at least one side.
    #[error("invalid die with {sides} sides at instruction {at}")]
    InvalidSides { at: usize, sides: i64 },

    /// Dice count below zero.
    #[error("invalid dice count {count} at instruction {at}")]
    InvalidDiceCount { at: usize, count: i64 },

    /// Dice count above the configured limit.
    #[error("too many dice: {count} exceeds limit {limit} at instruction {at}")]
    TooManyDice { at: usize, count: i64, limit: i64 },

    /// The dice source returned a value outside `[1, sides]`.
    #[error("dice source rolled {rolled} on a {sides}-sided die at instruction {at}")]
    RollOutOfRange { at: usize, sides: u64, rolled: u64 },

    /// A dice total does not fit in a signed 64-bit integer.
    #[error("dice total overflows for {count}d{sides} at instruction {at}")]
    DiceOverflow { at: usize, count: i64, sides: i64 },

    /// The program finished with nothing on the stack.
    #[error("evaluation ended with an empty stack")]
    EmptyStack,

    /// The program finished with more than one value on the stack.
    #[error("evaluation ended with {count} values on stack (expected 1)")]
    UnbalancedStack { count: usize },
}
