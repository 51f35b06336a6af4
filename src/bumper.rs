//! The version bump decision procedure.
//!
//! One invocation makes at most one change to the version file:
//!
//! 1. If the version file itself differs from the baseline, a human already
//!    took care of versioning and nothing happens.
//! 2. Otherwise the first configured package directory containing newly
//!    added files triggers a minor bump.
//! 3. Otherwise the patch component is bumped.
//!
//! All diff queries run before the version file is read or written, so a
//! failing query never leaves a half-applied bump behind.

use std::fmt;
use std::path::{Component, Path, PathBuf};

use tracing::{debug, info};

use crate::config::BumpConfig;
use crate::domain::{Version, VersionBump};
use crate::error::Result;
use crate::git::DiffProvider;
use crate::ui;
use crate::version_file;

/// Why a bump picked its component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BumpReason {
    /// Files were added under this package directory
    NewFiles(String),
    /// No package directory gained files
    NoNewPackageFiles,
    /// The component was named explicitly, no decision was made
    Requested,
}

impl fmt::Display for BumpReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BumpReason::NewFiles(dir) => write!(f, "new files in '{}'", dir),
            BumpReason::NoNewPackageFiles => f.write_str("no new package files"),
            BumpReason::Requested => f.write_str("requested"),
        }
    }
}

/// What a run decided, before anything is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Version file already edited by hand
    Skip,
    Bump {
        component: VersionBump,
        reason: BumpReason,
    },
}

/// What a run did to the version file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BumpOutcome {
    Skipped {
        version_file: String,
    },
    Bumped {
        component: VersionBump,
        from: Version,
        to: Version,
        reason: BumpReason,
    },
}

pub struct VersionBumper<D: DiffProvider> {
    diff: D,
    config: BumpConfig,
    workdir: PathBuf,
}

impl<D: DiffProvider> VersionBumper<D> {
    /// `workdir` is the repository root that relative paths resolve against.
    pub fn new(diff: D, config: BumpConfig, workdir: impl Into<PathBuf>) -> Self {
        VersionBumper {
            diff,
            config,
            workdir: workdir.into(),
        }
    }

    pub fn config(&self) -> &BumpConfig {
        &self.config
    }

    /// Location of the version file on disk
    pub fn version_file_path(&self) -> PathBuf {
        self.config.version_file_in(&self.workdir)
    }

    /// The version file as it appears in diff output, or `None` when it
    /// lives outside the repository.
    fn version_file_repo_path(&self) -> Option<String> {
        let configured = &self.config.version_file;
        let relative = if configured.is_absolute() {
            configured.strip_prefix(&self.workdir).ok()?
        } else {
            configured.as_path()
        };
        Some(to_repo_path(relative))
    }

    /// True when the version file is among the paths modified since `baseline`.
    pub fn has_version_file_been_manually_modified(&self, baseline: &str) -> Result<bool> {
        let modified = self.diff.modified_paths(baseline)?;
        let Some(version_file) = self.version_file_repo_path() else {
            debug!("version file is outside the repository");
            return Ok(false);
        };
        Ok(modified.contains(&version_file))
    }

    /// True when files under `directory` were added since `baseline`.
    ///
    /// The matching files are listed on stdout.
    pub fn directory_has_new_files(&self, directory: &str, baseline: &str) -> Result<bool> {
        let added = self.diff.added_paths(baseline)?;
        let prefix = Path::new(normalize_dir(directory));

        let matched: Vec<&str> = added
            .iter()
            .map(String::as_str)
            .filter(|path| Path::new(path).starts_with(prefix))
            .collect();

        debug!(directory, matched = matched.len(), "checked package directory");
        if matched.is_empty() {
            return Ok(false);
        }

        ui::display_added_files(directory, &matched);
        Ok(true)
    }

    /// Bump the component named by `component` ("minor" or "patch").
    ///
    /// Any other name fails with
    /// [InvalidComponent](crate::error::BumpError::InvalidComponent) before
    /// the version file is opened.
    pub fn bump_version(&self, component: &str) -> Result<BumpOutcome> {
        let component: VersionBump = component.parse()?;
        self.apply(component, BumpReason::Requested, true)
    }

    /// Like [VersionBumper::bump_version] but only reports the new version.
    pub fn preview_bump(&self, component: &str) -> Result<BumpOutcome> {
        let component: VersionBump = component.parse()?;
        self.apply(component, BumpReason::Requested, false)
    }

    /// Walk the decision tree without touching the version file.
    pub fn decide(&self) -> Result<Decision> {
        let baseline = self.config.baseline.as_str();

        if self.has_version_file_been_manually_modified(baseline)? {
            info!(baseline, "version file modified manually");
            return Ok(Decision::Skip);
        }

        for directory in &self.config.package_dirs {
            if self.directory_has_new_files(directory, baseline)? {
                return Ok(Decision::Bump {
                    component: VersionBump::Minor,
                    reason: BumpReason::NewFiles(directory.clone()),
                });
            }
        }

        Ok(Decision::Bump {
            component: VersionBump::Patch,
            reason: BumpReason::NoNewPackageFiles,
        })
    }

    /// Decide and apply.
    pub fn run(&self) -> Result<BumpOutcome> {
        self.execute(true)
    }

    /// Decide and report what would change, leaving the version file alone.
    pub fn run_dry(&self) -> Result<BumpOutcome> {
        self.execute(false)
    }

    fn execute(&self, write: bool) -> Result<BumpOutcome> {
        match self.decide()? {
            Decision::Skip => Ok(BumpOutcome::Skipped {
                version_file: self.config.version_file.display().to_string(),
            }),
            Decision::Bump { component, reason } => self.apply(component, reason, write),
        }
    }

    fn apply(
        &self,
        component: VersionBump,
        reason: BumpReason,
        write: bool,
    ) -> Result<BumpOutcome> {
        let path = self.version_file_path();
        let from = version_file::read_version(&path)?;
        let to = from.bump(component)?;

        if write {
            version_file::write_version(&path, &to)?;
            info!(%component, %from, %to, "version file rewritten");
        }

        Ok(BumpOutcome::Bumped {
            component,
            from,
            to,
            reason,
        })
    }
}

/// Strip a leading `./` and trailing `/` so "./pkg/a/" matches like "pkg/a".
fn normalize_dir(directory: &str) -> &str {
    let mut dir = directory.trim();
    while let Some(rest) = dir.strip_prefix("./") {
        dir = rest;
    }
    if dir == "." {
        return "";
    }
    dir.trim_end_matches('/')
}

fn to_repo_path(path: &Path) -> String {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
