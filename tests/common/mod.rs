//! Shared test utilities for toolbin
//!
//! - Temporary file trees
//! - Binary invocation with an isolated config directory


use assert_cmd::Command;

/// Command for one of the crate's binaries
pub fn bin(name: &str) -> Command {
    let mut cmd = Command::cargo_bin(name).expect("binary should be built");
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Like `bin`, with the default config directory pointed at a path that
/// does not exist so the user's own config never leaks into a test
pub fn isolated(name: &str, tree: &fs_fixtures::TestTree) -> Command {
    let mut cmd = bin(name);
    let home = tree.join(".no-home");
    cmd.env("HOME", &home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env("APPDATA", &home);
    cmd
}
