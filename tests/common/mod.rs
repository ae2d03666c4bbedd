#![allow(dead_code)]

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

/// Whether a usable git binary is on PATH.
///
/// Repository-backed tests skip themselves when this is false instead of
/// failing the suite.
pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

/// Run git in `dir`, panicking on failure. Scratch-repo plumbing only.
pub fn git(dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("failed to spawn git");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
}

/// Scratch repository with release history.
///
/// Two commits; the first carries a lightweight `v0.0.9` plus tags that do
/// not name released versions (`nightly`, `v1.1.1.1`, `v1.1.1-rc`), the
/// second (HEAD) carries an annotated `v0.1.0` whose body names a code name.
pub fn release_repo() -> TempDir {
    let dir = TempDir::new().expect("could not create temp dir");
    let path = dir.path();

    git(path, &["init", "-q"]);
    git(path, &["config", "user.name", "Test User"]);
    git(path, &["config", "user.email", "test@example.com"]);
    git(path, &["config", "commit.gpgsign", "false"]);
    git(path, &["config", "tag.gpgsign", "false"]);

    git(path, &["commit", "-q", "--allow-empty", "-m", "initial"]);
    git(path, &["tag", "v0.0.9"]);
    git(path, &["tag", "nightly"]);
    git(path, &["tag", "v1.1.1.1"]);
    git(path, &["tag", "v1.1.1-rc"]);

    git(path, &["commit", "-q", "--allow-empty", "-m", "cut 0.1.0"]);
    git(
        path,
        &["tag", "-a", "v0.1.0", "-m", "v0.1.0 codename(Test Tortoise)"],
    );

    dir
}

/// Scratch repository whose HEAD is an untagged commit on top of the
/// release history from [release_repo].
pub fn snapshot_repo() -> TempDir {
    let dir = release_repo();
    git(
        dir.path(),
        &["commit", "-q", "--allow-empty", "-m", "work in progress"],
    );
    dir
}
