//! rollvm CLI: assemble, check, and evaluate dice-expression listings.
//!
//! Exit codes:
//! - 0: Success
//! - 1: Usage/input/assembly error
//! - 3: Runtime error

mod commands;

use clap::{Args, Parser, Subcommand};
use rollvm_common::DEFAULT_CAPACITY;
use rollvm_vm::config::DEFAULT_MAX_DICE_COUNT;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "rollvm", version)]
#[command(about = "Assemble and evaluate rollvm dice-expression listings")]
#[command(arg_required_else_help = true)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Assemble a listing and evaluate it
    Run(RunArgs),
    /// Assemble a listing without evaluating it
    Check(ListingArgs),
    /// Print the canonical form of a listing
    Disassemble(ListingArgs),
}

#[derive(Args, Debug)]
pub(crate) struct ListingArgs {
    /// Listing file, one instruction per line
    pub(crate) file: PathBuf,

    /// Maximum number of instructions in the program
    #[arg(long, default_value_t = DEFAULT_CAPACITY)]
    pub(crate) capacity: usize,
}

#[derive(Args, Debug)]
pub(crate) struct RunArgs {
    #[command(flatten)]
    pub(crate) listing: ListingArgs,

    /// Dice always roll their maximum; the random source is never consulted
    #[arg(long)]
    pub(crate) fixed: bool,

    /// Seed for reproducible rolls
    #[arg(long, value_name = "SEED")]
    pub(crate) seed: Option<u64>,

    /// Variable available to LDV (repeatable)
    #[arg(long = "var", value_name = "NAME=VALUE", value_parser = parse_var)]
    pub(crate) vars: Vec<(String, i64)>,

    /// Largest dice count a single DICE instruction may roll
    #[arg(long = "max-dice", default_value_t = DEFAULT_MAX_DICE_COUNT)]
    pub(crate) max_dice: i64,

    /// Also print the canonical listing
    #[arg(long)]
    pub(crate) asm: bool,
}

fn parse_var(raw: &str) -> Result<(String, i64), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| "expected NAME=VALUE".to_string())?;
    if name.is_empty() {
        return Err("variable name is empty".to_string());
    }
    let value = value
        .trim()
        .parse::<i64>()
        .map_err(|e| format!("invalid value for '{name}': {e}"))?;
    Ok((name.to_string(), value))
}

/// Initialize logging to stderr.
///
/// Use the `RUST_LOG` environment variable to override the default `warn`.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = if err.use_stderr() { 1 } else { 0 };
            let _ = err.print();
            process::exit(code);
        }
    };

    init_logging();

    let result = match &cli.command {
        Command::Run(args) => commands::run(args),
        Command::Check(args) => commands::check(args),
        Command::Disassemble(args) => commands::disassemble(args),
    };

    if let Err(code) = result {
        process::exit(code);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_var_accepts_name_value() {
        assert_eq!(parse_var("str=60"), Ok(("str".to_string(), 60)));
        assert_eq!(parse_var("max hp=-3"), Ok(("max hp".to_string(), -3)));
    }

    #[test]
    fn parse_var_rejects_malformed() {
        assert!(parse_var("str").is_err());
        assert!(parse_var("=5").is_err());
        assert!(parse_var("str=lots").is_err());
    }

    #[test]
    fn run_flags_map_onto_args() {
        let cli = Cli::try_parse_from([
            "rollvm", "run", "roll.rvm", "--fixed", "--var", "str=60", "--var", "dex=45",
            "--max-dice", "12",
        ])
        .unwrap();
        match cli.command {
            Command::Run(args) => {
                assert!(args.fixed);
                assert_eq!(args.vars.len(), 2);
                assert_eq!(args.max_dice, 12);
                assert_eq!(args.listing.capacity, DEFAULT_CAPACITY);
                assert_eq!(args.seed, None);
            }
            other => panic!("expected run, got {other:?}"),
        }
    }
}
