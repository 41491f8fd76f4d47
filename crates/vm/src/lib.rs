//! rollvm evaluator: executes built dice-expression programs.
//!
//! The evaluator is a stack machine with:
//! - An operand stack of tagged integer/text values
//! - An injected [`DiceSource`] for rolls (never called in fixed-value mode)
//! - An injected [`VariableResolver`] for LDV
//! - A [`TraceBuilder`] that explains the outermost fold of the expression
//!
//! # Usage
//!
//! ```
//! use rollvm_common::{Opcode, ProgramBuilder, Value};
//! use rollvm_vm::{run_with, EvalConfig, NoVariables, ThreadRngDice};
//!
//! let mut builder = ProgramBuilder::new();
//! builder
//!     .append_number("3")
//!     .append_number("100")
//!     .append_operator(Opcode::Dice);
//! let program = builder.finish().unwrap();
//!
//! let config = EvalConfig::default().with_fixed_dice(true);
//! let outcome = run_with(config, &program, &ThreadRngDice, &NoVariables).unwrap();
//! assert_eq!(outcome.value, Value::Integer(300));
//! assert_eq!(outcome.trace, "3 d 100");
//! assert_eq!(outcome.details, vec!["3d100=300".to_string()]);
//! ```

pub mod config;
pub mod dice;
pub mod error;
pub mod execute;
pub mod machine;
pub mod resolver;
pub mod trace;

pub use config::EvalConfig;
pub use dice::{DiceSource, SeededDice, ThreadRngDice};
pub use error::RuntimeError;
pub use machine::{Machine, Outcome};
pub use resolver::{NoVariables, VariableResolver};
pub use trace::TraceBuilder;

use rollvm_common::Program;

/// Evaluate a program with the default [`EvalConfig`].
///
/// # Errors
///
/// Returns [`RuntimeError`] if evaluation fails (division by zero, invalid
/// dice, type mismatch, malformed program).
pub fn run(
    program: &Program,
    dice: &dyn DiceSource,
    vars: &dyn VariableResolver,
) -> Result<Outcome, RuntimeError> {
    run_with(EvalConfig::default(), program, dice, vars)
}

/// Evaluate a program with an explicit configuration.
///
/// # Errors
///
/// See [`run`].
pub fn run_with(
    config: EvalConfig,
    program: &Program,
    dice: &dyn DiceSource,
    vars: &dyn VariableResolver,
) -> Result<Outcome, RuntimeError> {
    Machine::new(program, dice, vars, config).execute()
}
