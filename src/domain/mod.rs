//! Domain logic - pure version rules independent of git and the filesystem

pub mod version;

pub use version::{Version, VersionBump};
