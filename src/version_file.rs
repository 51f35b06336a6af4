//! Reading and rewriting the single-line version file.

use crate::domain::Version;
use crate::error::{BumpError, Result};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Read and parse the version file at `path`.
pub fn read_version(path: &Path) -> Result<Version> {
    let content = fs::read_to_string(path)
        .map_err(|e| BumpError::version_file(path, format!("Failed to read: {}", e)))?;
    Version::parse(&content)
}

/// Replace the version file at `path` with `version`.
///
/// The new content goes to a temp file in the same directory which is then
/// renamed over the original, so readers never observe a partial write.
pub fn write_version(path: &Path, version: &Version) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)
        .map_err(|e| BumpError::version_file(path, format!("Failed to create temp file: {}", e)))?;
    if let Ok(metadata) = fs::metadata(path) {
        tmp.as_file()
            .set_permissions(metadata.permissions())
            .map_err(|e| BumpError::version_file(path, format!("Failed to copy permissions: {}", e)))?;
    }
    writeln!(tmp, "{}", version)
        .and_then(|_| tmp.flush())
        .map_err(|e| BumpError::version_file(path, format!("Failed to write: {}", e)))?;
    tmp.persist(path)
        .map_err(|e| BumpError::version_file(path, format!("Failed to replace: {}", e.error)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_version() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("VERSION");
        fs::write(&path, "2.3.1\n").unwrap();

        assert_eq!(read_version(&path).unwrap(), Version::new(2, 3, 1));
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_version(&dir.path().join("VERSION")).unwrap_err();
        assert!(matches!(err, BumpError::VersionFile { .. }));
    }

    #[test]
    fn test_read_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("VERSION");
        fs::write(&path, "not a version").unwrap();

        assert!(matches!(read_version(&path), Err(BumpError::Version(_))));
    }

    #[test]
    fn test_write_version_replaces_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("VERSION");
        fs::write(&path, "1.0.0\n").unwrap();

        write_version(&path, &Version::new(1, 1, 0)).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "1.1.0\n");
        // no leftover temp files
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
