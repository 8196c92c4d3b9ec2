//! Basic CLI surface tests: help, version, and completions.

mod common;

use common::TestEnv;
use predicates::prelude::*;

#[test]
fn test_help_lists_commands() {
    let env = TestEnv::new();
    env.command()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("trace"))
        .stdout(predicate::str::contains("releases"))
        .stdout(predicate::str::contains("validate"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn test_version() {
    let env = TestEnv::new();
    env.command()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("relconfig"));
}

#[test]
fn test_generate_help_mentions_out_dir() {
    let env = TestEnv::new();
    env.command()
        .args(["generate", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--out-dir"))
        .stdout(predicate::str::contains("--format"));
}

#[test]
fn test_completions_bash() {
    let env = TestEnv::new();
    env.command()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("relconfig"))
        .stderr(predicate::str::contains("Generating bash completion script"));
}

#[test]
fn test_unknown_command_fails() {
    let env = TestEnv::new();
    env.command().arg("frobnicate").assert().failure();
}
