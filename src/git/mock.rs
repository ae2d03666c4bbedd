use std::cell::RefCell;
use std::collections::HashMap;

use crate::git::{GitOutput, GitRunner};

/// Mock git adapter for testing without spawning processes
///
/// Responses are keyed by subcommand; any subcommand without a configured
/// response fails, the same way a broken or absent git binary would. Every
/// call is recorded so tests can assert exactly which invocations happened
/// and in what order.
pub struct MockGit {
    responses: HashMap<String, GitOutput>,
    calls: RefCell<Vec<(String, Vec<String>)>>,
}

impl MockGit {
    /// Create a mock where every call fails
    pub fn new() -> Self {
        MockGit {
            responses: HashMap::new(),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Set the canned response for a subcommand
    pub fn set_response(&mut self, subcommand: impl Into<String>, output: GitOutput) {
        self.responses.insert(subcommand.into(), output);
    }

    /// All calls received so far, as (subcommand, args) pairs in order
    pub fn calls(&self) -> Vec<(String, Vec<String>)> {
        self.calls.borrow().clone()
    }

    /// How many times the given subcommand was invoked
    pub fn call_count(&self, subcommand: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|(name, _)| name == subcommand)
            .count()
    }
}

impl Default for MockGit {
    fn default() -> Self {
        Self::new()
    }
}

impl GitRunner for MockGit {
    fn run(&self, subcommand: &str, args: &[&str]) -> GitOutput {
        self.calls.borrow_mut().push((
            subcommand.to_string(),
            args.iter().map(|a| a.to_string()).collect(),
        ));
        self.responses
            .get(subcommand)
            .cloned()
            .unwrap_or_else(|| GitOutput::failed(1))
    }
}
