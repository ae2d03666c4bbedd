//! Domain logic - pure version rules independent of git operations

pub mod code_name;
pub mod tag;
pub mod version;

pub use code_name::{CodeName, DEFAULT_CODE_NAME_TAG};
pub use tag::parse_release_tag;
pub use version::CurrentVersion;
