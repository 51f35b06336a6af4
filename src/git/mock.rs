use crate::error::{BumpError, Result};
use crate::git::{DiffProvider, PathSet};
use std::cell::Cell;

/// In-memory diff provider for testing without a git repository
///
/// Only the baseline it was created for is known; any other baseline fails
/// the way an unknown git reference does.
pub struct MockDiffProvider {
    baseline: String,
    modified: PathSet,
    added: PathSet,
    queries: Cell<usize>,
}

impl MockDiffProvider {
    /// Create an empty diff against `baseline`
    pub fn new(baseline: impl Into<String>) -> Self {
        MockDiffProvider {
            baseline: baseline.into(),
            modified: PathSet::new(),
            added: PathSet::new(),
            queries: Cell::new(0),
        }
    }

    /// Record a modified path
    pub fn add_modified(&mut self, path: impl Into<String>) {
        self.modified.insert(path.into());
    }

    /// Record an added path
    pub fn add_added(&mut self, path: impl Into<String>) {
        self.added.insert(path.into());
    }

    /// Builder form of [MockDiffProvider::add_modified]
    pub fn with_modified(mut self, path: impl Into<String>) -> Self {
        self.add_modified(path);
        self
    }

    /// Builder form of [MockDiffProvider::add_added]
    pub fn with_added(mut self, path: impl Into<String>) -> Self {
        self.add_added(path);
        self
    }

    /// Number of diff queries answered so far
    pub fn query_count(&self) -> usize {
        self.queries.get()
    }

    fn check_baseline(&self, baseline: &str) -> Result<()> {
        self.queries.set(self.queries.get() + 1);
        if baseline == self.baseline {
            Ok(())
        } else {
            Err(BumpError::diff_query(format!(
                "cannot resolve baseline '{}'",
                baseline
            )))
        }
    }
}

impl DiffProvider for MockDiffProvider {
    fn modified_paths(&self, baseline: &str) -> Result<PathSet> {
        self.check_baseline(baseline)?;
        Ok(self.modified.clone())
    }

    fn added_paths(&self, baseline: &str) -> Result<PathSet> {
        self.check_baseline(baseline)?;
        Ok(self.added.clone())
    }
}
