pub mod bumper;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod ui;
pub mod version_file;

pub use bumper::{BumpOutcome, BumpReason, Decision, VersionBumper};
pub use error::{BumpError, Result};
