//! Evaluator state: operand stack, trace, and the injected capabilities.

use crate::config::EvalConfig;
use crate::dice::DiceSource;
use crate::error::RuntimeError;
use crate::resolver::VariableResolver;
use crate::trace::TraceBuilder;
use rollvm_common::{Program, Value};

/// The result of a successful evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// The single value left on the stack.
    pub value: Value,
    /// Explanation of the outermost arithmetic step(s).
    pub trace: String,
    /// Details (dice sub-results, variable loads) never attached to the
    /// trace, oldest first.
    pub details: Vec<String>,
}

/// The rollvm evaluator for one program run.
///
/// A machine is consumed by [`Machine::execute`]; every evaluation gets a
/// fresh stack and trace.
pub struct Machine<'a> {
    /// The program being evaluated.
    pub(crate) program: &'a Program,
    /// Where dice rolls come from.
    pub(crate) dice: &'a dyn DiceSource,
    /// Where LDV values come from.
    pub(crate) vars: &'a dyn VariableResolver,
    pub(crate) config: EvalConfig,
    /// Operand stack.
    pub(crate) stack: Vec<Value>,
    pub(crate) trace: TraceBuilder,
    /// Index of the instruction being executed.
    pub(crate) pc: usize,
}

impl<'a> Machine<'a> {
    /// Create a machine for the given program and capabilities.
    pub fn new(
        program: &'a Program,
        dice: &'a dyn DiceSource,
        vars: &'a dyn VariableResolver,
        config: EvalConfig,
    ) -> Self {
        Self {
            program,
            dice,
            vars,
            config,
            stack: Vec::with_capacity(program.len()),
            trace: TraceBuilder::new(),
            pc: 0,
        }
    }

    /// Push a value onto the stack.
    pub(crate) fn push(&mut self, value: Value) {
        self.stack.push(value);
    }

    /// Pop a value from the stack.
    pub(crate) fn pop(&mut self) -> Result<Value, RuntimeError> {
        self.stack
            .pop()
            .ok_or(RuntimeError::StackUnderflow { at: self.pc })
    }

    /// Pop a value that must be an integer.
    pub(crate) fn pop_integer(&mut self) -> Result<i64, RuntimeError> {
        match self.pop()? {
            Value::Integer(n) => Ok(n),
            other => Err(self.type_mismatch("integer", &other)),
        }
    }

    pub(crate) fn type_mismatch(&self, expected: &'static str, found: &Value) -> RuntimeError {
        RuntimeError::TypeMismatch {
            at: self.pc,
            expected,
            found: found.kind(),
        }
    }

    /// Validate a side count and hand it to the dice source as `u64`.
    pub(crate) fn check_sides(&self, sides: i64) -> Result<u64, RuntimeError> {
        u64::try_from(sides)
            .ok()
            .filter(|&s| s >= 1)
            .ok_or(RuntimeError::InvalidSides { at: self.pc, sides })
    }

    /// Roll one die, or return `sides` in fixed-value mode.
    pub(crate) fn roll_one(&self, sides: u64) -> Result<i64, RuntimeError> {
        if self.config.fixed_dice {
            return Ok(sides as i64);
        }

        let rolled = self.dice.roll(sides);
        if rolled < 1 || rolled > sides {
            return Err(RuntimeError::RollOutOfRange {
                at: self.pc,
                sides,
                rolled,
            });
        }
        Ok(rolled as i64)
    }
}
