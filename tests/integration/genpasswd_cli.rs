//! End-to-end tests for the `genpasswd` binary

use super::common::fs_fixtures::TestTree;
use super::common::{bin, isolated};
use predicates::prelude::*;

fn stdout_lines(output: &std::process::Output) -> Vec<String> {
    String::from_utf8(output.stdout.clone())
        .expect("stdout should be UTF-8")
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_lower_digit_example() {
    let tree = TestTree::new();
    let output = isolated("genpasswd", &tree)
        .args(["--length", "10", "--lower", "--digits", "--count", "1"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 1);
    let pw = &lines[0];
    assert_eq!(pw.chars().count(), 10);
    assert!(pw.chars().any(|c| c.is_ascii_lowercase()));
    assert!(pw.chars().any(|c| c.is_ascii_digit()));
}

#[test]
fn test_default_covers_every_class() {
    let tree = TestTree::new();
    let output = isolated("genpasswd", &tree)
        .args(["-c", "20"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 20);
    for pw in lines {
        assert_eq!(pw.chars().count(), 16);
        assert!(pw.chars().any(|c| c.is_ascii_lowercase()), "{pw}");
        assert!(pw.chars().any(|c| c.is_ascii_uppercase()), "{pw}");
        assert!(pw.chars().any(|c| c.is_ascii_digit()), "{pw}");
        assert!(pw.chars().any(|c| c.is_ascii_punctuation()), "{pw}");
    }
}

#[test]
fn test_length_below_class_count_is_config_error() {
    let tree = TestTree::new();
    isolated("genpasswd", &tree)
        .args(["-l", "3"])
        .assert()
        .code(2)
        .stdout("")
        .stderr(predicate::str::contains("too short"));
}

#[test]
fn test_passphrase_mode() {
    let tree = TestTree::new();
    tree.write("words", "correct\nhorse\nbattery\nstaple\n");
    let output = isolated("genpasswd", &tree)
        .args(["--words", "-n", "5", "-f"])
        .arg(tree.join("words"))
        .output()
        .unwrap();
    assert!(output.status.success());
    let lines = stdout_lines(&output);
    let words: Vec<&str> = lines[0].split('-').collect();
    assert_eq!(words.len(), 5);
    assert!(words
        .iter()
        .all(|w| ["correct", "horse", "battery", "staple"].contains(w)));
}

#[test]
fn test_config_file_defaults() {
    let tree = TestTree::new();
    tree.write(
        "config.toml",
        "[genpasswd]\nlength = 8\ncount = 2\nclasses = [\"digit\"]\n",
    );
    let output = bin("genpasswd")
        .arg("--config")
        .arg(tree.join("config.toml"))
        .output()
        .unwrap();
    assert!(output.status.success());
    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 2);
    assert!(lines
        .iter()
        .all(|pw| pw.len() == 8 && pw.chars().all(|c| c.is_ascii_digit())));
}

#[test]
fn test_invalid_config_file_is_error() {
    let tree = TestTree::new();
    tree.write("config.toml", "[genpasswd]\nclasses = [\"emoji\"]\n");
    bin("genpasswd")
        .arg("--config")
        .arg(tree.join("config.toml"))
        .assert()
        .code(2)
        .stdout("")
        .stderr(predicate::str::contains("invalid config file"));
}

#[test]
fn test_missing_explicit_config_is_error() {
    let tree = TestTree::new();
    bin("genpasswd")
        .arg("--config")
        .arg(tree.join("absent.toml"))
        .assert()
        .code(2)
        .stdout("")
        .stderr(predicate::str::contains("cannot read config file"));
}

#[test]
fn test_rust_log_enables_logging() {
    let tree = TestTree::new();
    isolated("genpasswd", &tree)
        .env("RUST_LOG", "info")
        .args(["-l", "8"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Entropy"));
}

#[test]
fn test_verbose_logs_entropy_to_stderr() {
    let tree = TestTree::new();
    isolated("genpasswd", &tree)
        .args(["-v", "-l", "12"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Entropy"));
}

#[test]
fn test_selftest_passes() {
    bin("genpasswd")
        .arg("--test")
        .assert()
        .success()
        .stdout(predicate::str::contains("test passwd_composition ... ok"));
}
