//! CLI command implementations.

use crate::{ListingArgs, RunArgs};
use rollvm_common::Program;
use rollvm_vm::{DiceSource, EvalConfig, SeededDice, ThreadRngDice};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Assemble a listing file with the given capacity.
fn read_listing(path: &Path, capacity: usize) -> Result<Program, i32> {
    let text = fs::read_to_string(path).map_err(|e| {
        eprintln!("error: cannot read '{}': {e}", path.display());
        1
    })?;

    let program = rollvm_assembler::assemble_with_capacity(&text, capacity).map_err(|e| {
        eprintln!("error: {e}");
        1
    })?;

    debug!(path = %path.display(), instructions = program.len(), "assembled listing");
    Ok(program)
}

/// Assemble and evaluate a listing.
pub fn run(args: &RunArgs) -> Result<(), i32> {
    let program = read_listing(&args.listing.file, args.listing.capacity)?;

    if args.asm {
        print!("{}", rollvm_assembler::disassemble(&program));
    }

    let config = EvalConfig::default()
        .with_fixed_dice(args.fixed)
        .with_max_dice_count(args.max_dice);
    let vars: HashMap<String, i64> = args.vars.iter().cloned().collect();
    let dice: Box<dyn DiceSource> = match args.seed {
        Some(seed) => Box::new(SeededDice::new(seed)),
        None => Box::new(ThreadRngDice),
    };

    match rollvm_vm::run_with(config, &program, &*dice, &vars) {
        Ok(outcome) => {
            println!("{}", outcome.value);
            if !outcome.trace.is_empty() {
                println!("trace: {}", outcome.trace);
            }
            if !outcome.details.is_empty() {
                println!("details: {}", outcome.details.join(", "));
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("runtime error: {e}");
            Err(3)
        }
    }
}

/// Assemble a listing and report its size.
pub fn check(args: &ListingArgs) -> Result<(), i32> {
    let program = read_listing(&args.file, args.capacity)?;
    println!("OK: {} ({} instructions)", args.file.display(), program.len());
    Ok(())
}

/// Print the canonical listing.
pub fn disassemble(args: &ListingArgs) -> Result<(), i32> {
    let program = read_listing(&args.file, args.capacity)?;
    print!("{}", rollvm_assembler::disassemble(&program));
    Ok(())
}
