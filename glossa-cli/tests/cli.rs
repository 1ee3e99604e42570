//! End-to-end tests for the glossa-cli binary.
//!
//! These exercise the compiled binary directly through `run` and `check`,
//! rather than the library's internal command structs.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

fn glossa_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_glossa"))
}

fn write_program(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_cli_help() {
    let mut cmd = Command::new(glossa_bin());
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Usage").or(predicate::str::contains("glossa")));
}

#[test]
fn test_cli_version() {
    let mut cmd = Command::new(glossa_bin());
    cmd.arg("--version");

    cmd.assert().success();
}

#[test]
fn test_run_prints_program_output() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_program(
        &temp_dir,
        "hello.γλωσσα",
        "ΠΡΟΓΡΑΜΜΑ κυριο\nΑΡΧΗ\nΓΡΑΨΕ 42\nΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ\n",
    );

    let mut cmd = Command::new(glossa_bin());
    cmd.arg("run").arg(&path);

    cmd.assert().success().stdout(predicate::str::contains("42"));
}

#[test]
fn test_run_reads_stdin_for_diabase() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_program(
        &temp_dir,
        "echo.γλωσσα",
        "ΠΡΟΓΡΑΜΜΑ κυριο\nΜΕΤΑΒΛΗΤΕΣ\nΑΚΕΡΑΙΕΣ: x\nΑΡΧΗ\nΔΙΑΒΑΣΕ x\nΓΡΑΨΕ x\nΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ\n",
    );

    let mut cmd = Command::new(glossa_bin());
    cmd.arg("run").arg(&path).write_stdin("7\n");

    cmd.assert().success().stdout(predicate::str::contains("7"));
}

#[test]
fn test_run_reports_a_runtime_error_and_exits_nonzero() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_program(
        &temp_dir,
        "divzero.γλωσσα",
        "ΠΡΟΓΡΑΜΜΑ κυριο\nΜΕΤΑΒΛΗΤΕΣ\nΑΚΕΡΑΙΕΣ: x\nΑΡΧΗ\nx <- 1 DIV 0\nΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ\n",
    );

    let mut cmd = Command::new(glossa_bin());
    cmd.arg("run").arg(&path);

    cmd.assert().failure();
}

#[test]
fn test_check_reports_success_for_a_valid_program() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_program(
        &temp_dir,
        "ok.γλωσσα",
        "ΠΡΟΓΡΑΜΜΑ κυριο\nΑΡΧΗ\nΓΡΑΨΕ 1\nΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ\n",
    );

    let mut cmd = Command::new(glossa_bin());
    cmd.arg("check").arg(&path);

    cmd.assert().success();
}

#[test]
fn test_check_reports_failure_for_a_syntax_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_program(&temp_dir, "bad.γλωσσα", "ΠΡΟΓΡΑΜΜΑ χωρίς_τέλος\nΑΡΧΗ\n");

    let mut cmd = Command::new(glossa_bin());
    cmd.arg("check").arg(&path);

    cmd.assert().failure();
}

#[test]
fn test_run_missing_file_fails() {
    let mut cmd = Command::new(glossa_bin());
    cmd.arg("run").arg("/nonexistent/program.γλωσσα");

    cmd.assert().failure();
}
