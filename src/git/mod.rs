//! Git process boundary
//!
//! This module provides a trait-based abstraction over invocations of the
//! `git` binary, allowing for a real subprocess implementation and a canned
//! implementation for testing.
//!
//! # Overview
//!
//! The primary abstraction is the [GitRunner] trait, which defines the one
//! operation git-verinfo needs: run a git subcommand and capture what it
//! said. The concrete implementations are:
//!
//! - [cli::GitCli]: the real implementation, spawning the `git` binary
//! - [mock::MockGit]: a canned implementation for testing
//!
//! # Usage
//!
//! Most code should depend on the [GitRunner] trait rather than concrete
//! implementations to enable easy testing and flexibility.
//!
//! ```rust
//! # use git_verinfo::git::GitRunner;
//! # fn example<G: GitRunner>(git: &G) {
//! let listing = git.run("tag", &[]);
//! if listing.success() {
//!     for line in listing.stdout.lines() {
//!         println!("tag: {}", line);
//!     }
//! }
//! # }
//! ```

pub mod cli;
pub mod mock;

pub use cli::GitCli;
pub use mock::MockGit;

/// Captured result of one git invocation
///
/// A git call that could not run at all (binary missing, spawn failure) and
/// a git call that ran but exited non-zero are both represented as a failed
/// `GitOutput`; callers never have to distinguish the two.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitOutput {
    /// Process exit status; zero means success
    pub status: i32,
    /// Everything the call printed to stdout
    pub stdout: String,
}

impl GitOutput {
    /// Create a successful output carrying the given stdout
    pub fn ok(stdout: impl Into<String>) -> Self {
        GitOutput {
            status: 0,
            stdout: stdout.into(),
        }
    }

    /// Create a failed output with the given non-zero status and no stdout
    pub fn failed(status: i32) -> Self {
        GitOutput {
            status,
            stdout: String::new(),
        }
    }

    /// Whether the call exited with status zero
    pub fn success(&self) -> bool {
        self.status == 0
    }

    /// The trimmed stdout of a successful call that printed something
    ///
    /// Returns `None` when the call failed or printed only whitespace, which
    /// lets callers treat "git errored" and "git had nothing to say" alike.
    pub fn text(&self) -> Option<&str> {
        if !self.success() {
            return None;
        }
        let trimmed = self.stdout.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed)
        }
    }
}

/// Narrow seam to the `git` binary
///
/// Implementations run one subcommand at a time and report back the exit
/// status and captured stdout. Resolution is strictly sequential: each
/// call's output is consumed before the next call is issued, so
/// implementations need no internal locking.
///
/// ## Error Handling
///
/// `run` is infallible by design. Implementations must never panic on
/// process failure; a missing git binary and a non-zero exit both come back
/// as a failed [GitOutput].
///
/// ## Implementations
///
/// - [GitCli](cli::GitCli): real implementation spawning the `git` binary
/// - [MockGit](mock::MockGit): test implementation returning canned output
pub trait GitRunner {
    /// Run `git <subcommand> <args...>` and capture the result
    ///
    /// # Arguments
    /// * `subcommand` - The git subcommand (e.g., "tag", "rev-parse")
    /// * `args` - Remaining arguments passed through to git
    ///
    /// # Returns
    /// * The exit status and stdout of the call, with every failure mode
    ///   normalized into a non-zero status
    fn run(&self, subcommand: &str, args: &[&str]) -> GitOutput;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_success() {
        assert!(GitOutput::ok("v1.0.0").success());
        assert!(!GitOutput::failed(1).success());
        assert!(!GitOutput::failed(128).success());
    }

    #[test]
    fn test_text_trims_trailing_newline() {
        let out = GitOutput::ok("abc1234\n");
        assert_eq!(out.text(), Some("abc1234"));
    }

    #[test]
    fn test_text_empty_on_failure() {
        let out = GitOutput {
            status: 128,
            stdout: "something".to_string(),
        };
        assert_eq!(out.text(), None);
    }

    #[test]
    fn test_text_empty_on_blank_stdout() {
        assert_eq!(GitOutput::ok("").text(), None);
        assert_eq!(GitOutput::ok("  \n").text(), None);
    }
}
