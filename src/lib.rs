pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod report;
pub mod resolver;

pub use error::{Result, VerinfoError};
