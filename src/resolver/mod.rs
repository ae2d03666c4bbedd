//! Version resolution over the git process boundary

pub mod current;
pub mod previous;
pub mod repo;

pub use current::{CurrentVersionResolver, VersionInfo};
pub use previous::PreviousVersionsResolver;
pub use repo::{discover_repo_info, GitRepoInfo};
