//! Main execution loop and opcode dispatch for the rollvm evaluator.

use crate::error::RuntimeError;
use crate::machine::{Machine, Outcome};
use rollvm_common::{Instruction, Opcode, Value};
use tracing::{debug, debug_span, trace};

impl<'a> Machine<'a> {
    /// Run every instruction in order and return the single result.
    pub fn execute(mut self) -> Result<Outcome, RuntimeError> {
        let program = self.program;
        let span = debug_span!(
            "evaluate",
            len = program.len(),
            capacity = program.capacity(),
            fixed = self.config.fixed_dice
        );
        let _enter = span.enter();

        for (at, instr) in program.instructions().iter().enumerate() {
            self.pc = at;
            trace!(at, opcode = instr.opcode().mnemonic(), depth = self.stack.len(), "step");
            if let Err(err) = self.step(instr) {
                debug!(%err, "evaluation aborted");
                return Err(err);
            }
        }

        self.finish()
    }

    fn step(&mut self, instr: &Instruction) -> Result<(), RuntimeError> {
        match instr.opcode() {
            Opcode::Number => {
                self.push(Value::Integer(instr.literal()));
                Ok(())
            }
            Opcode::LoadVariable => {
                self.exec_load_variable(instr.text());
                Ok(())
            }
            Opcode::LoadFormatText => self.exec_format_text(instr),
            Opcode::Negate => self.exec_negate(),
            Opcode::DiceUnary => self.exec_dice_unary(),
            Opcode::Halt => Ok(()),
            Opcode::Swap => self.exec_swap(),

            Opcode::Add => self.exec_binary(Opcode::Add, |a, b| Some(a.wrapping_add(b))),
            Opcode::Subtract => self.exec_binary(Opcode::Subtract, |a, b| Some(a.wrapping_sub(b))),
            Opcode::Multiply => self.exec_binary(Opcode::Multiply, |a, b| Some(a.wrapping_mul(b))),
            Opcode::Divide => {
                self.exec_binary(Opcode::Divide, |a, b| (b != 0).then(|| a.wrapping_div(b)))
            }
            Opcode::Modulus => {
                self.exec_binary(Opcode::Modulus, |a, b| (b != 0).then(|| a.wrapping_rem(b)))
            }
            Opcode::Power => self.exec_binary(Opcode::Power, power),
            Opcode::Dice => self.exec_dice(),
        }
    }

    fn finish(mut self) -> Result<Outcome, RuntimeError> {
        match self.stack.len() {
            0 => Err(RuntimeError::EmptyStack),
            1 => {
                let value = self.pop()?;
                let (trace, details) = self.trace.into_parts();
                Ok(Outcome {
                    value,
                    trace,
                    details,
                })
            }
            n => Err(RuntimeError::UnbalancedStack { count: n }),
        }
    }

    // ---- Loads ----

    fn exec_load_variable(&mut self, name: &str) {
        let value = match self.vars.resolve(name) {
            Some(v) => v,
            None => {
                debug!(name, "unknown variable, using 0");
                0
            }
        };

        let slot = self.stack.len();
        self.trace.note(slot, format!("{name}={value}"));
        self.push(Value::Integer(value));
    }

    fn exec_format_text(&mut self, instr: &Instruction) -> Result<(), RuntimeError> {
        let count = instr.placeholders().len();
        if self.stack.len() < count {
            return Err(RuntimeError::StackUnderflow { at: self.pc });
        }

        let slot = self.stack.len() - count;
        let mut values = Vec::with_capacity(count);
        for value in &self.stack[slot..] {
            match value {
                Value::Integer(n) => values.push(*n),
                other => return Err(self.type_mismatch("integer", other)),
            }
        }

        self.stack.truncate(slot);
        self.trace.fold_into(slot);
        self.push(Value::Text(instr.fill_template(&values)));
        Ok(())
    }

    // ---- Unary ----

    fn exec_negate(&mut self) -> Result<(), RuntimeError> {
        let a = self.pop_integer()?;
        self.push(Value::Integer(a.wrapping_neg()));
        Ok(())
    }

    fn exec_dice_unary(&mut self) -> Result<(), RuntimeError> {
        let sides = self.pop_integer()?;
        let faces = self.check_sides(sides)?;
        let value = self.roll_one(faces)?;

        let slot = self.stack.len();
        self.trace.note(slot, format!("d{sides}={value}"));
        self.push(Value::Integer(value));
        Ok(())
    }

    // ---- Binary ----

    /// Pop two integers, record the trace step, apply `op`, push the result.
    /// `op` returns `None` for a zero divisor.
    fn exec_binary(
        &mut self,
        opcode: Opcode,
        op: fn(i64, i64) -> Option<i64>,
    ) -> Result<(), RuntimeError> {
        let b = self.pop_integer()?;
        let a = self.pop_integer()?;
        let slot = self.stack.len();

        self.trace.record(opcode, slot, a, b);
        let result = op(a, b).ok_or(RuntimeError::DivisionByZero { at: self.pc })?;
        self.trace.fold_into(slot);

        self.push(Value::Integer(result));
        Ok(())
    }

    fn exec_dice(&mut self) -> Result<(), RuntimeError> {
        let sides = self.pop_integer()?;
        let count = self.pop_integer()?;
        let slot = self.stack.len();

        self.trace.record(Opcode::Dice, slot, count, sides);

        let faces = self.check_sides(sides)?;
        if count < 0 {
            return Err(RuntimeError::InvalidDiceCount { at: self.pc, count });
        }
        if count > self.config.max_dice_count {
            return Err(RuntimeError::TooManyDice {
                at: self.pc,
                count,
                limit: self.config.max_dice_count,
            });
        }

        let overflow = RuntimeError::DiceOverflow {
            at: self.pc,
            count,
            sides,
        };
        let total = if self.config.fixed_dice {
            count.checked_mul(sides).ok_or(overflow)?
        } else {
            let mut total: i64 = 0;
            for _ in 0..count {
                let roll = self.roll_one(faces)?;
                total = total.checked_add(roll).ok_or_else(|| overflow.clone())?;
            }
            total
        };

        self.trace.fold_into(slot);
        self.trace.note(slot, format!("{count}d{sides}={total}"));
        self.push(Value::Integer(total));
        Ok(())
    }

    fn exec_swap(&mut self) -> Result<(), RuntimeError> {
        let b = self.pop()?;
        let a = self.pop()?;
        let slot = self.stack.len();

        self.trace.swap(slot, slot + 1);
        self.push(b);
        self.push(a);
        Ok(())
    }
}

/// Exact integer exponentiation by repeated squaring, wrapping on overflow.
///
/// Negative exponents truncate toward zero: `1` for base 1, `±1` for base
/// -1, `0` for any other non-zero base, and `None` for base 0.
pub(crate) fn power(base: i64, exp: i64) -> Option<i64> {
    if exp < 0 {
        return match base {
            0 => None,
            1 => Some(1),
            -1 => Some(if exp % 2 == 0 { 1 } else { -1 }),
            _ => Some(0),
        };
    }

    let mut result: i64 = 1;
    let mut base = base;
    let mut exp = exp as u64;
    while exp > 0 {
        if exp & 1 == 1 {
            result = result.wrapping_mul(base);
        }
        exp >>= 1;
        if exp > 0 {
            base = base.wrapping_mul(base);
        }
    }
    Some(result)
}
