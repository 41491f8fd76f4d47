//! Integration tests for the rollvm CLI.
//!
//! These tests invoke the `rollvm` binary as a subprocess and check
//! exit codes, stdout, and stderr.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[allow(deprecated)]
fn rollvm() -> Command {
    Command::cargo_bin("rollvm").unwrap()
}

/// Helper: write a listing into `dir`, returning its path.
fn write_listing(dir: &TempDir, text: &str) -> PathBuf {
    let path = dir.path().join("roll.rvm");
    fs::write(&path, text).unwrap();
    path
}

const ROLL_3D100: &str = "NUM 3\nNUM 100\nDICE\n";

// ---- No-args / help ----

#[test]
fn no_args_prints_usage_and_exits_1() {
    rollvm()
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Usage: rollvm"));
}

#[test]
fn help_flag_exits_0() {
    rollvm()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Commands:"));
}

#[test]
fn unknown_command_exits_1() {
    rollvm()
        .arg("frobnicate")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

// ---- Run ----

#[test]
fn run_fixed_dice() {
    let dir = TempDir::new().unwrap();
    let file = write_listing(&dir, ROLL_3D100);

    rollvm()
        .arg("run")
        .arg(&file)
        .arg("--fixed")
        .assert()
        .success()
        .stdout("300\ntrace: 3 d 100\ndetails: 3d100=300\n");
}

#[test]
fn run_with_variables() {
    let dir = TempDir::new().unwrap();
    let file = write_listing(&dir, "LDV str\nNUM 5\nADD\n");

    rollvm()
        .arg("run")
        .arg(&file)
        .args(["--var", "str=60"])
        .assert()
        .success()
        .stdout("65\ntrace: 60 + 5\ndetails: str=60\n");
}

#[test]
fn run_missing_variable_is_zero() {
    let dir = TempDir::new().unwrap();
    let file = write_listing(&dir, "LDV str\n");

    rollvm()
        .arg("run")
        .arg(&file)
        .assert()
        .success()
        .stdout("0\ndetails: str=0\n");
}

#[test]
fn run_format_text() {
    let dir = TempDir::new().unwrap();
    let file = write_listing(&dir, "NUM 3\nNUM 4\nFMT \"{a}+{a}=?\"\n");

    rollvm()
        .arg("run")
        .arg(&file)
        .assert()
        .success()
        .stdout("3+4=?\n");
}

#[test]
fn run_seeded_is_reproducible() {
    let dir = TempDir::new().unwrap();
    let file = write_listing(&dir, "NUM 10\nNUM 20\nDICE\nNUM 5\nADD\n");

    let first = rollvm()
        .arg("run")
        .arg(&file)
        .args(["--seed", "42"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let second = rollvm()
        .arg("run")
        .arg(&file)
        .args(["--seed", "42"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    assert_eq!(first, second);
    assert!(String::from_utf8(first).unwrap().contains("[10d20="));
}

#[test]
fn run_asm_prints_listing() {
    let dir = TempDir::new().unwrap();
    let file = write_listing(&dir, "num 3 ; lowercase\nnum 100\ndice\n");

    rollvm()
        .arg("run")
        .arg(&file)
        .args(["--fixed", "--asm"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("NUM 3\nNUM 100\nDICE\n300\n"));
}

#[test]
fn run_division_by_zero_exits_3() {
    let dir = TempDir::new().unwrap();
    let file = write_listing(&dir, "NUM 1\nNUM 0\nDIV\n");

    rollvm()
        .arg("run")
        .arg(&file)
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains(
            "runtime error: division by zero at instruction 2",
        ));
}

#[test]
fn run_max_dice_exits_3() {
    let dir = TempDir::new().unwrap();
    let file = write_listing(&dir, "NUM 6\nNUM 6\nDICE\n");

    rollvm()
        .arg("run")
        .arg(&file)
        .args(["--max-dice", "5"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("too many dice"));
}

#[test]
fn run_capacity_overflow_exits_1() {
    let dir = TempDir::new().unwrap();
    let file = write_listing(&dir, ROLL_3D100);

    rollvm()
        .arg("run")
        .arg(&file)
        .args(["--capacity", "2"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "line 3: program overflow: expression exceeds 2 instructions",
        ));
}

#[test]
fn run_bad_var_exits_1() {
    let dir = TempDir::new().unwrap();
    let file = write_listing(&dir, ROLL_3D100);

    rollvm()
        .arg("run")
        .arg(&file)
        .args(["--var", "str"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("expected NAME=VALUE"));
}

#[test]
fn run_missing_file_exits_1() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("absent.rvm");

    rollvm()
        .arg("run")
        .arg(&file)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("cannot read"));
}

#[test]
fn run_assembly_error_exits_1() {
    let dir = TempDir::new().unwrap();
    let file = write_listing(&dir, "NUM 1\nROLL\n");

    rollvm()
        .arg("run")
        .arg(&file)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("line 2: unknown opcode 'ROLL'"));
}

// ---- Check ----

#[test]
fn check_reports_instruction_count() {
    let dir = TempDir::new().unwrap();
    let file = write_listing(&dir, ROLL_3D100);

    rollvm()
        .arg("check")
        .arg(&file)
        .assert()
        .success()
        .stdout(
            predicate::str::starts_with("OK: ")
                .and(predicate::str::contains("roll.rvm (3 instructions)")),
        );
}

#[test]
fn check_does_not_evaluate() {
    let dir = TempDir::new().unwrap();
    let file = write_listing(&dir, "NUM 1\nNUM 0\nDIV\n");

    rollvm().arg("check").arg(&file).assert().success();
}

// ---- Disassemble ----

#[test]
fn disassemble_prints_canonical_listing() {
    let dir = TempDir::new().unwrap();
    let file = write_listing(
        &dir,
        "; attack roll\n  num +1\n  num 20\n  dice\n  ldv \"str\"\n  add\n",
    );

    rollvm()
        .arg("disassemble")
        .arg(&file)
        .assert()
        .success()
        .stdout("NUM 1\nNUM 20\nDICE\nLDV str\nADD\n");
}
