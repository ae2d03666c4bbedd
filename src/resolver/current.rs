use semver::Version;
use serde::Serialize;
use tracing::debug;

use crate::config::PackageInfo;
use crate::domain::{CodeName, CurrentVersion};
use crate::error::{Result, VerinfoError};
use crate::git::GitRunner;
use crate::resolver::previous::PreviousVersionsResolver;
use crate::resolver::repo::GitRepoInfo;

/// The combined result of a resolution
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionInfo {
    /// The package descriptor, exactly as supplied
    pub current_package: PackageInfo,
    /// Repository identity, exactly as supplied
    pub git_repo_info: GitRepoInfo,
    /// Previously released versions, ascending
    pub previous_versions: Vec<Version>,
    /// The resolved identity of HEAD
    pub current_version: CurrentVersion,
}

/// Classifies HEAD as a release or a snapshot and assembles [VersionInfo]
///
/// HEAD is a release when an exact tag points at it; the tag supplies the
/// version and, from its annotation body, the code name. Otherwise HEAD is
/// a snapshot and the version is synthesized from the declared package
/// version, preferring a CI build number over the `local` marker.
///
/// Only two conditions abort a resolution: the commit identity call failing
/// and a release tag violating the descriptor's branch constraint.
pub struct CurrentVersionResolver<'g, G: GitRunner> {
    git: &'g G,
    build_number: Option<String>,
}

impl<'g, G: GitRunner> CurrentVersionResolver<'g, G> {
    /// Create a resolver over the given git boundary
    pub fn new(git: &'g G) -> Self {
        CurrentVersionResolver {
            git,
            build_number: None,
        }
    }

    /// Supply the CI build number used for snapshot prereleases
    ///
    /// The resolver never reads the environment itself; whoever constructs
    /// it decides where the number comes from.
    pub fn with_build_number(mut self, build_number: Option<String>) -> Self {
        self.build_number = build_number;
        self
    }

    /// Resolve the identity of HEAD and assemble the combined result
    ///
    /// # Arguments
    /// * `package` - The package descriptor; read, never modified
    /// * `repo_info` - Repository identity, carried through untouched
    /// * `decorate` - Hook forwarded to the previous-versions resolution
    ///
    /// # Returns
    /// * `Ok(VersionInfo)` - The assembled result
    /// * `Err` - The commit identity could not be determined, the declared
    ///   version or branch constraint does not parse, or the release tag
    ///   violates the branch constraint
    pub fn resolve(
        &self,
        package: &PackageInfo,
        repo_info: GitRepoInfo,
        decorate: &mut dyn FnMut(&Version),
    ) -> Result<VersionInfo> {
        let commit_sha = self.commit_sha()?;
        let current_version = self.classify(package, commit_sha)?;
        let previous_versions = PreviousVersionsResolver::new(self.git).resolve(decorate);

        Ok(VersionInfo {
            current_package: package.clone(),
            git_repo_info: repo_info,
            previous_versions,
            current_version,
        })
    }

    /// Short SHA of HEAD; the one git call that must succeed
    fn commit_sha(&self) -> Result<String> {
        let output = self.git.run("rev-parse", &["--short", "HEAD"]);
        match output.text() {
            Some(sha) => Ok(sha.to_string()),
            None => Err(VerinfoError::commit_lookup(format!(
                "git rev-parse exited with status {}",
                output.status
            ))),
        }
    }

    fn classify(&self, package: &PackageInfo, commit_sha: String) -> Result<CurrentVersion> {
        if let Some(tag) = self.exact_tag() {
            let bare = tag.strip_prefix('v').unwrap_or(&tag);
            match Version::parse(bare) {
                Ok(version) => return self.release_version(package, &tag, version, commit_sha),
                Err(err) => {
                    debug!(
                        "describe output '{}' is not a version ({}), treating HEAD as a snapshot",
                        tag, err
                    );
                }
            }
        }

        Ok(CurrentVersion::snapshot(
            package.declared_version()?,
            self.build_number.as_deref(),
            commit_sha,
        ))
    }

    /// The tag pointing exactly at HEAD, when there is one
    fn exact_tag(&self) -> Option<String> {
        let output = self.git.run("describe", &["--exact-match"]);
        match output.text() {
            Some(tag) => Some(tag.to_string()),
            None => {
                debug!("no exact tag on HEAD (describe status {})", output.status);
                None
            }
        }
    }

    fn release_version(
        &self,
        package: &PackageInfo,
        tag: &str,
        version: Version,
        commit_sha: String,
    ) -> Result<CurrentVersion> {
        if let Some(requirement) = package.branch_requirement()? {
            if !requirement.matches(&version) {
                return Err(VerinfoError::BranchMismatch {
                    version,
                    constraint: requirement.to_string(),
                });
            }
        }

        let code_name = self.tag_code_name(tag, package.code_name_marker());
        Ok(CurrentVersion::release(version, code_name, commit_sha))
    }

    /// Code name from the tag annotation; any read failure counts as absent
    fn tag_code_name(&self, tag: &str, marker: &str) -> CodeName {
        let output = self.git.run("cat-file", &["-p", tag]);
        match output.text() {
            Some(body) => CodeName::from_tag_body(body, marker),
            None => CodeName::Absent,
        }
    }
}
