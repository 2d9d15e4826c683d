//! CLI integration tests.

use assert_cmd::assert::OutputAssertExt;
use predicates::prelude::*;
use std::process::Command;

/// Get the popdyn binary command
fn popdyn_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_popdyn"))
}

#[test]
fn test_cli_help() {
    popdyn_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Population growth simulator"))
        .stdout(predicate::str::contains("Commands:"));
}

#[test]
fn test_series_linear() {
    popdyn_cmd()
        .args([
            "series",
            "--regime",
            "linear",
            "-p",
            "5",
            "-r",
            "1.0",
            "-n",
            "10",
            "-T",
            "100",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("time,population"))
        .stdout(predicate::str::contains("0,5"))
        .stdout(predicate::str::contains("90,95"));
}

#[test]
fn test_series_logistic_requires_capacity() {
    popdyn_cmd()
        .args(["series", "--regime", "logistic", "-p", "5", "-r", "1.0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("carrying capacity"));
}

#[test]
fn test_series_decay_has_no_closed_form() {
    popdyn_cmd()
        .args(["series", "--regime", "decay", "-p", "5", "-r", "1.0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no closed-form"));
}

#[test]
fn test_run_linear_to_completion() {
    popdyn_cmd()
        .args([
            "run",
            "--regime",
            "linear",
            "-p",
            "10",
            "-r",
            "2.0",
            "-d",
            "10",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Final population:"));
}

#[test]
fn test_run_seeded_is_reproducible() {
    let args = [
        "run",
        "--regime",
        "exponential",
        "-p",
        "10",
        "-r",
        "0.2",
        "-k",
        "1000",
        "-d",
        "50",
        "--seed",
        "42",
    ];
    let first = popdyn_cmd().args(args).output().unwrap();
    let second = popdyn_cmd().args(args).output().unwrap();
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn test_run_with_progress_disabled() {
    popdyn_cmd()
        .args([
            "run",
            "--regime",
            "linear",
            "-p",
            "10",
            "-r",
            "2.0",
            "-d",
            "10",
            "--no-progress",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Final population:"));
}

#[test]
fn test_run_rejects_unknown_regime() {
    popdyn_cmd()
        .args(["run", "--regime", "quadratic"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown regime"));
}
