use std::fs;
use std::path::Path;

use semver::{Version, VersionReq};
use serde::{Deserialize, Serialize};

use crate::domain::DEFAULT_CODE_NAME_TAG;
use crate::error::{Result, VerinfoError};

/// Descriptor file looked for in the working directory
const VERINFO_MANIFEST: &str = "verinfo.toml";
/// Fallback manifest when no dedicated descriptor exists
const CARGO_MANIFEST: &str = "Cargo.toml";

/// Environment variable consulted for the CI build number
pub const BUILD_NUMBER_VAR: &str = "BUILD_NUMBER";

/// The package descriptor: what the working tree claims to be.
///
/// Read by the resolvers, never written. The declared version is the
/// snapshot fallback; `branch_version` optionally constrains which release
/// tags are legal on this branch; `code_name_tag` overrides the marker word
/// scanned for in tag annotations.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PackageInfo {
    pub name: String,

    pub version: String,

    #[serde(default)]
    pub branch_version: Option<String>,

    #[serde(default)]
    pub code_name_tag: Option<String>,
}

impl PackageInfo {
    /// Create a descriptor with just a name and declared version
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        PackageInfo {
            name: name.into(),
            version: version.into(),
            branch_version: None,
            code_name_tag: None,
        }
    }

    /// Attach a branch version constraint
    pub fn with_branch_version(mut self, constraint: impl Into<String>) -> Self {
        self.branch_version = Some(constraint.into());
        self
    }

    /// The declared version, parsed
    ///
    /// Tolerates a leading `v`, which some descriptors carry over from tag
    /// names.
    ///
    /// # Returns
    /// * `Ok(Version)` - The parsed declared version
    /// * `Err` - The descriptor declares something that is not a version
    pub fn declared_version(&self) -> Result<Version> {
        let raw = self.version.trim();
        let bare = raw.strip_prefix('v').unwrap_or(raw);
        Version::parse(bare).map_err(|err| VerinfoError::package_version(raw, err))
    }

    /// The branch constraint, parsed, when one is declared
    pub fn branch_requirement(&self) -> Result<Option<VersionReq>> {
        match &self.branch_version {
            Some(raw) => {
                let req = VersionReq::parse(raw)
                    .map_err(|err| VerinfoError::branch_constraint(raw, err))?;
                Ok(Some(req))
            }
            None => Ok(None),
        }
    }

    /// Marker word for code name lines in tag bodies
    pub fn code_name_marker(&self) -> &str {
        self.code_name_tag
            .as_deref()
            .unwrap_or(DEFAULT_CODE_NAME_TAG)
    }
}

/// Loads the package descriptor.
///
/// Attempts to load the descriptor in the following order:
/// 1. Custom path provided as parameter
/// 2. `verinfo.toml` in the current directory
/// 3. `Cargo.toml` in the current directory (`[package]` name and version,
///    plus the `[package.metadata.verinfo]` table)
///
/// # Arguments
/// * `descriptor_path` - Optional path to a descriptor file
///
/// # Returns
/// * `Ok(PackageInfo)` - The loaded descriptor
/// * `Err` - No descriptor found, or one exists but cannot be read or parsed
pub fn load_package(descriptor_path: Option<&str>) -> Result<PackageInfo> {
    if let Some(path) = descriptor_path {
        return load_package_from(Path::new(path));
    }
    if Path::new(VERINFO_MANIFEST).exists() {
        return load_package_from(Path::new(VERINFO_MANIFEST));
    }
    if Path::new(CARGO_MANIFEST).exists() {
        return load_package_from(Path::new(CARGO_MANIFEST));
    }
    Err(VerinfoError::config(
        "no package descriptor found: expected verinfo.toml or Cargo.toml",
    ))
}

/// Loads the package descriptor from a specific file.
///
/// A file named `Cargo.toml` is read as a cargo manifest; anything else is
/// read as a plain descriptor with the [PackageInfo] fields at top level.
pub fn load_package_from(path: &Path) -> Result<PackageInfo> {
    let text = fs::read_to_string(path)?;
    if path.file_name().and_then(|name| name.to_str()) == Some(CARGO_MANIFEST) {
        parse_cargo_manifest(&text)
    } else {
        let package: PackageInfo = toml::from_str(&text)?;
        Ok(package)
    }
}

/// Read the CI build number from the environment
///
/// Empty and whitespace-only values count as absent.
pub fn build_number_from_env() -> Option<String> {
    match std::env::var(BUILD_NUMBER_VAR) {
        Ok(value) => {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Err(_) => None,
    }
}

#[derive(Deserialize)]
struct CargoManifest {
    package: Option<CargoPackage>,
}

#[derive(Deserialize)]
struct CargoPackage {
    name: String,
    version: String,
    metadata: Option<CargoMetadata>,
}

#[derive(Deserialize)]
struct CargoMetadata {
    verinfo: Option<VerinfoMetadata>,
}

#[derive(Deserialize, Default)]
struct VerinfoMetadata {
    branch_version: Option<String>,
    code_name_tag: Option<String>,
}

fn parse_cargo_manifest(text: &str) -> Result<PackageInfo> {
    let manifest: CargoManifest = toml::from_str(text)?;
    let package = manifest
        .package
        .ok_or_else(|| VerinfoError::config("Cargo.toml has no [package] table"))?;
    let metadata = package
        .metadata
        .and_then(|metadata| metadata.verinfo)
        .unwrap_or_default();

    Ok(PackageInfo {
        name: package.name,
        version: package.version,
        branch_version: metadata.branch_version,
        code_name_tag: metadata.code_name_tag,
    })
}
