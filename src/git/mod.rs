//! Git diff abstraction layer
//!
//! The decision procedure only needs two questions answered about the
//! working tree relative to a baseline reference: which files were
//! modified, and which were added. The [DiffProvider] trait captures exactly
//! that, so the bumper can be exercised without a real repository.
//!
//! - [repository::Git2Repository]: real implementation using the `git2` crate
//! - [mock::MockDiffProvider]: in-memory implementation for tests
//!
//! ```rust
//! # use version_bump::git::DiffProvider;
//! # fn example<D: DiffProvider>(diff: &D) -> version_bump::Result<()> {
//! let added = diff.added_paths("master")?;
//! for path in added {
//!     println!("new: {}", path);
//! }
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockDiffProvider;
pub use repository::Git2Repository;

use crate::error::Result;
use std::collections::BTreeSet;

/// Repository-relative paths with `/` separators, sorted
pub type PathSet = BTreeSet<String>;

/// Working-tree diff queries against a baseline reference
///
/// Both queries compare the working tree (including staged changes) with
/// the tree of `baseline`. Untracked files are not part of the diff.
///
/// An unknown baseline must surface as
/// [DiffQuery](crate::error::BumpError::DiffQuery), never as an empty set.
pub trait DiffProvider {
    /// Paths whose content changed relative to `baseline`
    ///
    /// Added and deleted paths are excluded.
    fn modified_paths(&self, baseline: &str) -> Result<PathSet>;

    /// Paths that exist in the working tree but not in `baseline`
    fn added_paths(&self, baseline: &str) -> Result<PathSet>;
}

impl<D: DiffProvider + ?Sized> DiffProvider for &D {
    fn modified_paths(&self, baseline: &str) -> Result<PathSet> {
        (**self).modified_paths(baseline)
    }

    fn added_paths(&self, baseline: &str) -> Result<PathSet> {
        (**self).added_paths(baseline)
    }
}
