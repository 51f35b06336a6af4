use crate::error::{BumpError, Result};
use crate::git::{DiffProvider, PathSet};
use git2::{Delta, Repository as Git2Repo, Tree};
use std::path::Path;
use tracing::debug;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    /// Root of the working tree
    ///
    /// Bare repositories have no working tree and are rejected.
    pub fn workdir(&self) -> Result<&Path> {
        self.repo
            .workdir()
            .ok_or_else(|| BumpError::config("Repository has no working tree (bare repository)"))
    }

    fn baseline_tree(&self, baseline: &str) -> Result<Tree<'_>> {
        self.repo
            .revparse_single(baseline)
            .and_then(|object| object.peel_to_tree())
            .map_err(|e| {
                BumpError::diff_query(format!("Cannot resolve baseline '{}': {}", baseline, e))
            })
    }

    fn paths_with_status(&self, baseline: &str, wanted: Delta) -> Result<PathSet> {
        let tree = self.baseline_tree(baseline)?;

        let diff = self
            .repo
            .diff_tree_to_workdir_with_index(Some(&tree), None)
            .map_err(|e| {
                BumpError::diff_query(format!("Cannot diff against '{}': {}", baseline, e))
            })?;

        let paths: PathSet = diff
            .deltas()
            .filter(|delta| delta.status() == wanted)
            .filter_map(|delta| {
                delta
                    .new_file()
                    .path()
                    .map(|p| p.to_string_lossy().to_string())
            })
            .collect();

        debug!(baseline, status = ?wanted, count = paths.len(), "collected diff paths");
        Ok(paths)
    }
}

impl DiffProvider for Git2Repository {
    fn modified_paths(&self, baseline: &str) -> Result<PathSet> {
        self.paths_with_status(baseline, Delta::Modified)
    }

    fn added_paths(&self, baseline: &str) -> Result<PathSet> {
        self.paths_with_status(baseline, Delta::Added)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_outside_repository_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = Git2Repository::open(dir.path());
        assert!(matches!(result, Err(BumpError::Git(_))));
    }

    #[test]
    fn test_bare_repository_has_no_workdir() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Git2Repository::from_git2(Git2Repo::init_bare(dir.path()).unwrap());
        assert!(matches!(repo.workdir(), Err(BumpError::Config(_))));
    }

    #[test]
    fn test_unborn_baseline_is_diff_query_error() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Git2Repository::from_git2(Git2Repo::init(dir.path()).unwrap());

        let result = repo.added_paths("master");
        assert!(matches!(result, Err(BumpError::DiffQuery(_))));
    }
}
