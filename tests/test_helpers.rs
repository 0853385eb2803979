#![allow(dead_code)]

use assert_cmd::Command;
use std::path::Path;

/// Creates a `Command` for the `faith-journal` binary with a clean environment
/// whose data and export directories live under `dir`.
pub fn base_command(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("faith-journal").expect("faith-journal binary not built");
    cmd.env_clear();
    if let Ok(path) = std::env::var("PATH") {
        cmd.env("PATH", path);
    }
    cmd.env("HOME", dir)
        .env("FAITH_JOURNAL_DIR", dir.join("data"))
        .env("FAITH_JOURNAL_EXPORT_DIR", dir.join("exports"));
    cmd
}

/// Runs a command that must succeed and returns its trimmed stdout.
pub fn run_ok(dir: &Path, args: &[&str]) -> String {
    let output = base_command(dir).args(args).output().expect("failed to run");
    assert!(
        output.status.success(),
        "command {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).unwrap().trim().to_string()
}
