use std::path::PathBuf;
use thiserror::Error;

/// Unified error type for version-bump operations
#[derive(Error, Debug)]
pub enum BumpError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Invalid component '{0}': expected 'minor' or 'patch'")]
    InvalidComponent(String),

    #[error("Diff query failed: {0}")]
    DiffQuery(String),

    #[error("Version file error ({}): {reason}", .path.display())]
    VersionFile { path: PathBuf, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in version-bump
pub type Result<T> = std::result::Result<T, BumpError>;

impl BumpError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        BumpError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        BumpError::Version(msg.into())
    }

    /// Create a diff query error with context
    pub fn diff_query(msg: impl Into<String>) -> Self {
        BumpError::DiffQuery(msg.into())
    }

    /// Create a version file error for `path`
    pub fn version_file(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        BumpError::VersionFile {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
