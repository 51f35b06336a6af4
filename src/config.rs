use crate::error::{BumpError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the config file looked up in the current directory.
pub const LOCAL_CONFIG_FILE: &str = "versionbump.toml";
/// Name of the config file looked up in the user config directory.
pub const USER_CONFIG_FILE: &str = ".versionbump.toml";

pub const BASELINE_ENV: &str = "BASELINE_BRANCH";
pub const PACKAGE_DIRS_ENV: &str = "PACKAGE_DIRS";
pub const VERSION_FILE_ENV: &str = "VERSION_FILE";

/// Everything the decision procedure needs to know about one invocation.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BumpConfig {
    /// Git reference the working tree is diffed against
    #[serde(default = "default_baseline")]
    pub baseline: String,

    /// Directory prefixes checked in order for newly added files
    #[serde(default)]
    pub package_dirs: Vec<String>,

    /// Version file, relative to the repository root unless absolute
    #[serde(default = "default_version_file")]
    pub version_file: PathBuf,
}

fn default_baseline() -> String {
    "master".to_string()
}

fn default_version_file() -> PathBuf {
    PathBuf::from("VERSION")
}

impl Default for BumpConfig {
    fn default() -> Self {
        BumpConfig {
            baseline: default_baseline(),
            package_dirs: Vec::new(),
            version_file: default_version_file(),
        }
    }
}

impl BumpConfig {
    /// Apply overrides on top of this config. Unset fields keep their value.
    pub fn with_overrides(mut self, overrides: &ConfigOverrides) -> Self {
        if let Some(baseline) = &overrides.baseline {
            self.baseline = baseline.clone();
        }
        if let Some(dirs) = &overrides.package_dirs {
            self.package_dirs = parse_package_dirs(dirs);
        }
        if let Some(version_file) = &overrides.version_file {
            self.version_file = version_file.clone();
        }
        self
    }

    /// Absolute location of the version file inside `workdir`
    pub fn version_file_in(&self, workdir: &Path) -> PathBuf {
        if self.version_file.is_absolute() {
            self.version_file.clone()
        } else {
            workdir.join(&self.version_file)
        }
    }
}

/// Values that take precedence over the config file.
///
/// `package_dirs` stays in its raw whitespace-separated form so it can be
/// fed straight from an environment variable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub baseline: Option<String>,
    pub package_dirs: Option<String>,
    pub version_file: Option<PathBuf>,
}

impl ConfigOverrides {
    /// Read `BASELINE_BRANCH`, `PACKAGE_DIRS` and `VERSION_FILE`.
    ///
    /// An empty `BASELINE_BRANCH` or `VERSION_FILE` counts as unset. An empty
    /// `PACKAGE_DIRS` is an explicit empty list.
    pub fn from_env() -> Self {
        let non_empty = |name: &str| env::var(name).ok().filter(|v| !v.trim().is_empty());

        ConfigOverrides {
            baseline: non_empty(BASELINE_ENV),
            package_dirs: env::var(PACKAGE_DIRS_ENV).ok(),
            version_file: non_empty(VERSION_FILE_ENV).map(PathBuf::from),
        }
    }

    /// Fill every unset field from `lower`.
    pub fn or(self, lower: ConfigOverrides) -> Self {
        ConfigOverrides {
            baseline: self.baseline.or(lower.baseline),
            package_dirs: self.package_dirs.or(lower.package_dirs),
            version_file: self.version_file.or(lower.version_file),
        }
    }
}

/// Split a whitespace-separated directory list, preserving order.
pub fn parse_package_dirs(raw: &str) -> Vec<String> {
    raw.split_whitespace().map(str::to_string).collect()
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `versionbump.toml` in current directory
/// 3. `.versionbump.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(BumpConfig)` - Loaded or default configuration
/// * `Err` - If an explicit path is missing, or a file cannot be read or parsed
pub fn load_config(config_path: Option<&Path>) -> Result<BumpConfig> {
    let path = if let Some(path) = config_path {
        if !path.exists() {
            return Err(BumpError::config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        path.to_path_buf()
    } else if Path::new(LOCAL_CONFIG_FILE).exists() {
        PathBuf::from(LOCAL_CONFIG_FILE)
    } else if let Some(user_config) = dirs::config_dir()
        .map(|dir| dir.join(USER_CONFIG_FILE))
        .filter(|p| p.exists())
    {
        user_config
    } else {
        return Ok(BumpConfig::default());
    };

    let content = fs::read_to_string(&path)?;
    toml::from_str(&content)
        .map_err(|e| BumpError::config(format!("Invalid config {}: {}", path.display(), e)))
}

/// File layer plus overrides, in precedence order.
pub fn resolve_config(
    config_path: Option<&Path>,
    overrides: &ConfigOverrides,
) -> Result<BumpConfig> {
    Ok(load_config(config_path)?.with_overrides(overrides))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BumpConfig::default();
        assert_eq!(config.baseline, "master");
        assert!(config.package_dirs.is_empty());
        assert_eq!(config.version_file, PathBuf::from("VERSION"));
    }

    #[test]
    fn test_parse_package_dirs() {
        assert_eq!(
            parse_package_dirs("  pkg/a\tpkg/b\npkg/c "),
            vec!["pkg/a", "pkg/b", "pkg/c"]
        );
        assert!(parse_package_dirs("   ").is_empty());
    }

    #[test]
    fn test_overrides_replace_only_set_fields() {
        let overrides = ConfigOverrides {
            baseline: Some("main".to_string()),
            package_dirs: None,
            version_file: None,
        };
        let config = BumpConfig {
            package_dirs: vec!["pkg".to_string()],
            ..BumpConfig::default()
        }
        .with_overrides(&overrides);

        assert_eq!(config.baseline, "main");
        assert_eq!(config.package_dirs, vec!["pkg"]);
        assert_eq!(config.version_file, PathBuf::from("VERSION"));
    }

    #[test]
    fn test_empty_package_dirs_override_clears_list() {
        let overrides = ConfigOverrides {
            package_dirs: Some(String::new()),
            ..ConfigOverrides::default()
        };
        let config = BumpConfig {
            package_dirs: vec!["pkg".to_string()],
            ..BumpConfig::default()
        }
        .with_overrides(&overrides);

        assert!(config.package_dirs.is_empty());
    }

    #[test]
    fn test_overrides_or_prefers_set_fields() {
        let cli = ConfigOverrides {
            baseline: Some("main".to_string()),
            ..ConfigOverrides::default()
        };
        let env = ConfigOverrides {
            baseline: Some("develop".to_string()),
            package_dirs: Some("pkg".to_string()),
            version_file: None,
        };

        let merged = cli.or(env);
        assert_eq!(merged.baseline.as_deref(), Some("main"));
        assert_eq!(merged.package_dirs.as_deref(), Some("pkg"));
        assert_eq!(merged.version_file, None);
    }

    #[test]
    fn test_version_file_in_workdir() {
        let config = BumpConfig::default();
        assert_eq!(
            config.version_file_in(Path::new("/repo")),
            PathBuf::from("/repo/VERSION")
        );
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: BumpConfig = toml::from_str(r#"package_dirs = ["src/a"]"#).unwrap();
        assert_eq!(config.baseline, "master");
        assert_eq!(config.package_dirs, vec!["src/a"]);
    }
}
