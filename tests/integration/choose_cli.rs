//! End-to-end tests for the `choose` binary

use super::common::bin;
use predicates::prelude::*;

#[test]
fn test_chooses_from_arguments() {
    bin("choose")
        .args(["rock", "paper", "scissors"])
        .assert()
        .success()
        .stdout(predicate::str::is_match("^(rock|paper|scissors)\n$").unwrap());
}

#[test]
fn test_chooses_from_stdin() {
    bin("choose")
        .arg("-")
        .write_stdin("left\nright\n")
        .assert()
        .success()
        .stdout(predicate::str::is_match("^(left|right)\n$").unwrap());
}

#[test]
fn test_empty_input_fails() {
    bin("choose")
        .write_stdin("")
        .assert()
        .code(1)
        .stderr("nothing to choose from\n");
}

#[test]
fn test_selftest_passes() {
    bin("choose").arg("--test").assert().success();
}
