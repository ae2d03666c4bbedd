use std::path::PathBuf;
use std::process::Command;

use tracing::debug;

use crate::git::{GitOutput, GitRunner};

/// Production adapter that spawns the `git` binary
///
/// Runs git in the current working directory by default; [GitCli::in_dir]
/// pins invocations to a specific repository instead, which keeps tests and
/// multi-repo callers independent of the process-wide working directory.
pub struct GitCli {
    workdir: Option<PathBuf>,
}

impl GitCli {
    /// Create an adapter running git in the current working directory
    pub fn new() -> Self {
        GitCli { workdir: None }
    }

    /// Create an adapter running git inside the given directory
    pub fn in_dir(path: impl Into<PathBuf>) -> Self {
        GitCli {
            workdir: Some(path.into()),
        }
    }
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new()
    }
}

impl GitRunner for GitCli {
    fn run(&self, subcommand: &str, args: &[&str]) -> GitOutput {
        let mut command = Command::new("git");
        command.arg(subcommand).args(args);
        if let Some(dir) = &self.workdir {
            command.current_dir(dir);
        }

        match command.output() {
            Ok(output) => {
                let status = output.status.code().unwrap_or(-1);
                if status != 0 {
                    let stderr = String::from_utf8_lossy(&output.stderr);
                    debug!(
                        "git {} exited with status {}: {}",
                        subcommand,
                        status,
                        stderr.trim()
                    );
                }
                GitOutput {
                    status,
                    stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                }
            }
            Err(err) => {
                debug!("failed to spawn git {}: {}", subcommand, err);
                GitOutput::failed(-1)
            }
        }
    }
}
