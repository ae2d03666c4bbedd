use thiserror::Error;

/// Unified error type for git-verinfo operations
#[derive(Error, Debug)]
pub enum VerinfoError {
    #[error("Cannot determine the current commit: {0}")]
    CommitLookup(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid package version '{value}': {source}")]
    PackageVersion {
        value: String,
        #[source]
        source: semver::Error,
    },

    #[error("Invalid branch version constraint '{value}': {source}")]
    BranchConstraint {
        value: String,
        #[source]
        source: semver::Error,
    },

    #[error("Current version {version} does not satisfy the branch constraint '{constraint}'")]
    BranchMismatch {
        version: semver::Version,
        constraint: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Manifest parsing error: {0}")]
    Manifest(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results in git-verinfo
pub type Result<T> = std::result::Result<T, VerinfoError>;

impl VerinfoError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        VerinfoError::Config(msg.into())
    }

    /// Create a commit lookup error with context
    pub fn commit_lookup(msg: impl Into<String>) -> Self {
        VerinfoError::CommitLookup(msg.into())
    }

    /// Create an error for a package version that does not parse
    pub fn package_version(value: impl Into<String>, source: semver::Error) -> Self {
        VerinfoError::PackageVersion {
            value: value.into(),
            source,
        }
    }

    /// Create an error for a branch constraint that does not parse
    pub fn branch_constraint(value: impl Into<String>, source: semver::Error) -> Self {
        VerinfoError::BranchConstraint {
            value: value.into(),
            source,
        }
    }
}
