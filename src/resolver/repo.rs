use serde::Serialize;

use crate::git::GitRunner;

/// Identity of the repository state a resolution ran against
///
/// Pass-through data: the resolvers carry it into the combined result
/// untouched. [discover_repo_info] is the stock way to fill it from the
/// repository itself; callers with richer context (CI metadata, forge APIs)
/// can construct it directly instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GitRepoInfo {
    /// Full SHA of HEAD; empty when it could not be determined
    pub commit: String,
    /// Checked-out branch; absent on a detached HEAD
    pub branch: Option<String>,
    /// URL of the `origin` remote, when one is configured
    pub remote_url: Option<String>,
}

/// Fill a [GitRepoInfo] by probing the repository
///
/// Each probe degrades independently: a failure leaves its field empty
/// instead of failing the caller.
pub fn discover_repo_info<G: GitRunner>(git: &G) -> GitRepoInfo {
    let commit = git
        .run("rev-parse", &["HEAD"])
        .text()
        .map(str::to_string)
        .unwrap_or_default();
    let branch = git
        .run("symbolic-ref", &["--short", "HEAD"])
        .text()
        .map(str::to_string);
    let remote_url = git
        .run("config", &["--get", "remote.origin.url"])
        .text()
        .map(str::to_string);

    GitRepoInfo {
        commit,
        branch,
        remote_url,
    }
}
