//! End-to-end tests for the `batchrename` binary

use super::common::fs_fixtures::TestTree;
use super::common::{bin, isolated};
use predicates::prelude::*;

#[test]
fn test_uppercase_example() {
    let tree = TestTree::with_files(&["a.txt", "b.txt"]);
    isolated("batchrename", &tree)
        .current_dir(tree.root())
        .args(["case", "upper", "a.txt", "b.txt"])
        .assert()
        .success()
        .stdout("");
    assert_eq!(tree.names(), vec!["A.TXT", "B.TXT"]);
    assert_eq!(tree.read("A.TXT"), "a.txt");
}

#[test]
fn test_dry_run_prints_and_changes_nothing() {
    let tree = TestTree::with_files(&["file_200.txt", "file_300.txt"]);
    isolated("batchrename", &tree)
        .current_dir(tree.root())
        .args([
            "-n",
            "regex",
            r"file_(\d+)\.txt",
            "{n}-file.txt",
            "-r",
            "17",
            "-z",
            "3",
            "file_200.txt",
            "file_300.txt",
        ])
        .assert()
        .success()
        .stdout(
            "Rename: file_200.txt -> 017-file.txt\nRename: file_300.txt -> 018-file.txt\n",
        );
    assert_eq!(tree.names(), vec!["file_200.txt", "file_300.txt"]);
}

#[test]
fn test_renumber_group_applies() {
    let tree = TestTree::with_files(&["file_200.txt"]);
    isolated("batchrename", &tree)
        .current_dir(tree.root())
        .args(["regex", r"file_(\d+)\.txt", "{n}-file.txt", "-m", "1-150", "file_200.txt"])
        .assert()
        .success();
    assert_eq!(tree.names(), vec!["50-file.txt"]);
}

#[test]
fn test_paths_from_stdin() {
    let tree = TestTree::with_files(&["file_1.txt", "file_2.txt"]);
    isolated("batchrename", &tree)
        .current_dir(tree.root())
        .args(["--dry-run", "regex", r"file_(\d+)\.txt", r"\1-file.txt", "-"])
        .write_stdin("file_1.txt\nfile_2.txt\n")
        .assert()
        .success()
        .stdout("Rename: file_1.txt -> 1-file.txt\nRename: file_2.txt -> 2-file.txt\n");
}

#[test]
fn test_glob_selects_paths() {
    let tree = TestTree::with_files(&["one.jpeg", "two.jpeg", "notes.txt"]);
    isolated("batchrename", &tree)
        .current_dir(tree.root())
        .args(["-g", "*.jpeg", "replace", ".jpeg", ".jpg"])
        .assert()
        .success();
    assert_eq!(tree.names(), vec!["notes.txt", "one.jpg", "two.jpg"]);
}

#[test]
fn test_walk_renames_nested_entries() {
    let tree = TestTree::new();
    tree.write("Photos/Trip.JPG", "");
    tree.write("Top.TXT", "");
    isolated("batchrename", &tree)
        .args(["-w"])
        .arg(tree.root())
        .args(["case", "lower"])
        .assert()
        .success();
    assert_eq!(tree.names(), vec!["photos", "top.txt"]);
    assert_eq!(tree.names_in("photos"), vec!["trip.jpg"]);
}

#[test]
fn test_walk_renames_directory_onto_vacated_name() {
    let tree = TestTree::new();
    tree.write("1/9", "from dir 1");
    tree.write("2/1", "from dir 2");
    isolated("batchrename", &tree)
        .current_dir(tree.root())
        .args(["number", "{n}"])
        .assert()
        .success();
    assert_eq!(tree.names(), vec!["2", "4"]);
    assert_eq!(tree.read("2/1"), "from dir 1");
    assert_eq!(tree.read("4/3"), "from dir 2");
}

#[test]
fn test_conflict_is_reported_and_nothing_is_overwritten() {
    let tree = TestTree::with_files(&["draft.txt", "final.txt"]);
    isolated("batchrename", &tree)
        .current_dir(tree.root())
        .args(["replace", "draft", "final", "draft.txt"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Conflict: draft.txt -> final.txt"));
    assert_eq!(tree.read("final.txt"), "final.txt");
    assert_eq!(tree.read("draft.txt"), "draft.txt");
}

#[test]
fn test_missing_file_does_not_abort_batch() {
    let tree = TestTree::with_files(&["b.txt"]);
    isolated("batchrename", &tree)
        .current_dir(tree.root())
        .args(["case", "upper", "a.txt", "b.txt"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed: a.txt -> A.TXT"));
    assert_eq!(tree.names(), vec!["B.TXT"]);
}

#[test]
fn test_invalid_pattern_is_usage_error() {
    let tree = TestTree::with_files(&["a.txt"]);
    isolated("batchrename", &tree)
        .current_dir(tree.root())
        .args(["regex", "(unclosed", "x", "a.txt"])
        .assert()
        .code(2)
        .stderr(predicate::str::starts_with("error: invalid pattern"));
    assert_eq!(tree.names(), vec!["a.txt"]);
}

#[test]
fn test_config_file_sets_numbering_defaults() {
    let tree = TestTree::with_files(&["x.png"]);
    tree.write("conf/config.toml", "[batchrename]\nzero_pad = 4\nrenumber_from = 7\n");
    bin("batchrename")
        .current_dir(tree.root())
        .arg("--config")
        .arg(tree.join("conf/config.toml"))
        .args(["-n", "number", "img-{n}.{ext}", "x.png"])
        .assert()
        .success()
        .stdout("Rename: x.png -> img-0007.png\n");
}

#[test]
fn test_missing_rule_is_usage_error() {
    let tree = TestTree::new();
    isolated("batchrename", &tree).arg("-n").assert().code(2);
}

#[test]
fn test_help_exits_zero() {
    bin("batchrename")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn test_selftest_passes() {
    bin("batchrename")
        .arg("--test")
        .assert()
        .success()
        .stdout(predicate::str::contains("0 failed"));
}

#[test]
fn test_selftest_must_be_alone() {
    bin("batchrename").args(["--test", "-n"]).assert().code(2);
}
