//! Integration tests for the `types` and `completions` commands.

mod common;

use common::cgv;
use predicates::prelude::*;

#[test]
fn types_lists_every_kind_in_code_order() {
    let output = cgv().arg("types").output().expect("failed to execute command");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 21);
    assert_eq!(lines[0], " 1  int8        integer in -128..=127");
    assert!(lines[8].starts_with(" 9  decimal64   "), "{}", lines[8]);
    assert!(lines[20].starts_with("21  time        "), "{}", lines[20]);
}

#[test]
fn completions_for_bash() {
    cgv()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cgv"));
}

#[test]
fn help_lists_subcommands() {
    cgv()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("eval"))
        .stdout(predicate::str::contains("repl"))
        .stdout(predicate::str::contains("--div-precision"));
}
