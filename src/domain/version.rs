use std::fmt;

use semver::{BuildMetadata, Prerelease, Version};
use serde::Serialize;
use tracing::warn;

use crate::domain::code_name::CodeName;

/// The resolved version identity of the working tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentVersion {
    /// The version itself; for snapshots, the declared version with a
    /// synthesized prerelease
    pub version: Version,
    /// Whether HEAD is untagged and the version was synthesized
    pub is_snapshot: bool,
    /// Code name read from the release tag, or the fixed `snapshot` label
    pub code_name: CodeName,
    /// Commit identity exactly as git reported it
    #[serde(rename = "commitSHA")]
    pub commit_sha: String,
}

impl CurrentVersion {
    /// Identity of a commit that an exact release tag points at
    pub fn release(version: Version, code_name: CodeName, commit_sha: impl Into<String>) -> Self {
        CurrentVersion {
            version,
            is_snapshot: false,
            code_name,
            commit_sha: commit_sha.into(),
        }
    }

    /// Identity of an untagged commit, synthesized from the declared version
    ///
    /// The declared version's prerelease is replaced wholesale: `build.<n>`
    /// when a CI build number is at hand, `local` otherwise.
    pub fn snapshot(
        declared: Version,
        build_number: Option<&str>,
        commit_sha: impl Into<String>,
    ) -> Self {
        let mut version = declared;
        version.pre = snapshot_prerelease(build_number);
        version.build = BuildMetadata::EMPTY;
        CurrentVersion {
            version,
            is_snapshot: true,
            code_name: CodeName::Named("snapshot".to_string()),
            commit_sha: commit_sha.into(),
        }
    }
}

impl fmt::Display for CurrentVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.version)
    }
}

fn snapshot_prerelease(build_number: Option<&str>) -> Prerelease {
    if let Some(number) = build_number {
        match Prerelease::new(&format!("build.{}", number)) {
            Ok(pre) => return pre,
            Err(_) => {
                warn!("build number '{}' is not usable as a prerelease, falling back to local", number);
            }
        }
    }
    Prerelease::new("local").unwrap_or(Prerelease::EMPTY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_without_build_number() {
        let declared = Version::parse("0.10.9").unwrap();
        let current = CurrentVersion::snapshot(declared, None, "abc1234");

        assert!(current.is_snapshot);
        assert_eq!(current.version.to_string(), "0.10.9-local");
        assert_eq!(current.code_name, CodeName::Named("snapshot".to_string()));
        assert_eq!(current.commit_sha, "abc1234");
    }

    #[test]
    fn test_snapshot_with_build_number() {
        let declared = Version::parse("0.10.9").unwrap();
        let current = CurrentVersion::snapshot(declared, Some("10"), "abc1234");

        assert_eq!(current.version.to_string(), "0.10.9-build.10");
        assert_eq!(current.version.pre.as_str(), "build.10");
    }

    #[test]
    fn test_snapshot_replaces_declared_prerelease() {
        let declared = Version::parse("1.0.0-beta.2").unwrap();
        let current = CurrentVersion::snapshot(declared, None, "abc1234");
        assert_eq!(current.version.to_string(), "1.0.0-local");
    }

    #[test]
    fn test_snapshot_with_unusable_build_number() {
        let declared = Version::parse("0.10.9").unwrap();
        let current = CurrentVersion::snapshot(declared, Some("10_beta"), "abc1234");
        assert_eq!(current.version.to_string(), "0.10.9-local");
    }

    #[test]
    fn test_release_keeps_tag_version() {
        let version = Version::parse("1.2.3-rc.3").unwrap();
        let current = CurrentVersion::release(
            version.clone(),
            CodeName::Named("Ant".to_string()),
            "deadbee",
        );

        assert!(!current.is_snapshot);
        assert_eq!(current.version, version);
        assert_eq!(current.code_name.name(), Some("Ant"));
    }

    #[test]
    fn test_display_is_the_version() {
        let declared = Version::parse("2.0.0").unwrap();
        let current = CurrentVersion::snapshot(declared, Some("7"), "abc");
        assert_eq!(current.to_string(), "2.0.0-build.7");
    }

    #[test]
    fn test_serializes_with_wire_field_names() {
        let declared = Version::parse("0.1.0").unwrap();
        let current = CurrentVersion::snapshot(declared, None, "abc1234");
        let value = serde_json::to_value(&current).unwrap();

        assert_eq!(value["version"], serde_json::json!("0.1.0-local"));
        assert_eq!(value["isSnapshot"], serde_json::json!(true));
        assert_eq!(value["codeName"], serde_json::json!("snapshot"));
        assert_eq!(value["commitSHA"], serde_json::json!("abc1234"));
    }
}
